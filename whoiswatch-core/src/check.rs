use chrono::{DateTime, Utc};
use tracing::{debug, error, instrument, warn};

use crate::config::Config;
use crate::domain::{ExpirationIssue, Metadata};
use crate::error::CheckError;
use crate::plugin::CheckResult;
use crate::thresholds::Thresholds;
use crate::whois::WhoisClient;

/// Runs one WHOIS expiration check end to end: fetch, parse, evaluate.
#[derive(Debug, Clone)]
pub struct ExpirationCheck {
    config: Config,
    client: WhoisClient,
}

impl ExpirationCheck {
    pub fn new(config: Config) -> Self {
        let client = WhoisClient::new()
            .with_timeout(config.timeout)
            .with_referrals(!config.disable_referral);

        Self { config, client }
    }

    /// Replace the WHOIS client built from the configuration.
    pub fn with_client(mut self, client: WhoisClient) -> Self {
        self.client = client;
        self
    }

    /// Evaluate the configured domain as of `now`. Failures never escape:
    /// they become an UNKNOWN result carrying the error.
    #[instrument(skip(self), fields(domain = %self.config.domain))]
    pub async fn run(&self, now: DateTime<Utc>) -> CheckResult {
        let domain = self.config.domain.as_str();
        let thresholds = Thresholds::from_days(self.config.age_warning, self.config.age_critical, now);

        let lookup = match self.config.registrar_server {
            Some(ref server) => self.client.lookup_with_server(domain, server).await,
            None => self.client.lookup(domain).await,
        };

        let record = match lookup {
            Ok(record) => record,
            Err(e) => {
                error!(error = %e, "failed to query WHOIS data");
                return self.finish(CheckResult::unknown(
                    domain,
                    &format!("Error fetching WHOIS data for {} domain", domain),
                    e,
                ), &thresholds);
            }
        };

        debug!(server = %record.whois_server, "WHOIS data retrieved");

        let metadata = match Metadata::new(&record, thresholds) {
            Ok(metadata) => metadata,
            Err(e @ CheckError::DateParse { .. }) if record.is_available() => {
                error!(error = %e, "WHOIS server reports no registration");
                return self.finish(CheckResult::unknown(
                    domain,
                    &format!("No registration found for {} domain", domain),
                    e,
                ), &thresholds);
            }
            Err(e) => {
                error!(error = %e, "failed to parse WHOIS data");
                return self.finish(CheckResult::unknown(
                    domain,
                    &format!("Error parsing WHOIS data for {} domain", domain),
                    e,
                ), &thresholds);
            }
        };

        let result = CheckResult::evaluated(&metadata, now);

        match metadata.evaluate(now).issue {
            Some(ExpirationIssue::Expired) => error!("Domain has expired"),
            Some(ExpirationIssue::Expiring) => warn!("Domain is expiring"),
            None => debug!("No problems with expiration date for domain detected"),
        }

        self.finish(result, &thresholds)
    }

    fn finish(&self, mut result: CheckResult, thresholds: &Thresholds) -> CheckResult {
        result.set_thresholds(thresholds);
        if self.config.emit_branding {
            result = result.with_branding();
        }
        result
    }
}
