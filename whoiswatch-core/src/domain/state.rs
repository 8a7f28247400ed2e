use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::metadata::Metadata;

/// Monitoring severity, ordered from healthy to unknown as plugin exit codes
/// are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    pub fn label(self) -> &'static str {
        match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a domain is not in an OK state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationIssue {
    #[error("domain has expired")]
    Expired,

    #[error("domain is expiring")]
    Expiring,
}

/// Outcome of classifying a domain at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub state: ServiceState,
    pub issue: Option<ExpirationIssue>,
}

impl Metadata {
    /// The expiration date has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date() < now
    }

    /// Not yet expired, but inside the WARNING or CRITICAL window.
    pub fn is_expiring(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired(now)
            && (self.expiration_date() < self.critical_threshold()
                || self.expiration_date() < self.warning_threshold())
    }

    /// Inside the WARNING window and outside the CRITICAL one.
    pub fn is_warning_state(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired(now)
            && self.expiration_date() < self.warning_threshold()
            && self.expiration_date() >= self.critical_threshold()
    }

    /// Expired, or inside the CRITICAL window. Expiration always wins over
    /// threshold configuration.
    pub fn is_critical_state(&self, now: DateTime<Utc>) -> bool {
        self.is_expired(now) || self.expiration_date() < self.critical_threshold()
    }

    pub fn is_ok_state(&self, now: DateTime<Utc>) -> bool {
        !self.is_warning_state(now) && !self.is_critical_state(now)
    }

    pub fn service_state(&self, now: DateTime<Utc>) -> ServiceState {
        if self.is_critical_state(now) {
            ServiceState::Critical
        } else if self.is_warning_state(now) {
            ServiceState::Warning
        } else if self.is_ok_state(now) {
            ServiceState::Ok
        } else {
            ServiceState::Unknown
        }
    }

    pub fn evaluate(&self, now: DateTime<Utc>) -> Evaluation {
        let issue = if self.is_expired(now) {
            Some(ExpirationIssue::Expired)
        } else if self.is_expiring(now) {
            Some(ExpirationIssue::Expiring)
        } else {
            None
        };

        Evaluation {
            state: self.service_state(now),
            issue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;
    use crate::thresholds::Thresholds;
    use chrono::Duration;

    fn metadata_expiring_in(remaining: Duration) -> Metadata {
        let record = fixtures::record_expiring_in(remaining);
        Metadata::new(&record, fixtures::thresholds()).unwrap()
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ServiceState::Ok.exit_code(), 0);
        assert_eq!(ServiceState::Warning.exit_code(), 1);
        assert_eq!(ServiceState::Critical.exit_code(), 2);
        assert_eq!(ServiceState::Unknown.exit_code(), 3);
        assert_eq!(ServiceState::Warning.to_string(), "WARNING");
    }

    #[test]
    fn test_before_critical_threshold_is_critical() {
        let now = fixtures::now();
        for days in [1, 7, 14] {
            let metadata = metadata_expiring_in(Duration::days(days));
            assert_eq!(
                metadata.evaluate(now),
                Evaluation {
                    state: ServiceState::Critical,
                    issue: Some(ExpirationIssue::Expiring),
                },
                "{} days remaining",
                days
            );
        }
    }

    #[test]
    fn test_between_thresholds_is_warning() {
        let now = fixtures::now();
        for remaining in [Duration::days(15), Duration::days(20), Duration::days(30) - Duration::seconds(1)] {
            let metadata = metadata_expiring_in(remaining);
            assert!(metadata.is_warning_state(now));
            assert!(metadata.is_expiring(now));
            assert_eq!(metadata.service_state(now), ServiceState::Warning);
        }
    }

    #[test]
    fn test_at_or_after_warning_threshold_is_ok() {
        let now = fixtures::now();
        for days in [30, 31, 365] {
            let metadata = metadata_expiring_in(Duration::days(days));
            assert!(metadata.is_ok_state(now));
            assert!(!metadata.is_expiring(now));
            assert_eq!(
                metadata.evaluate(now),
                Evaluation {
                    state: ServiceState::Ok,
                    issue: None,
                }
            );
        }
    }

    #[test]
    fn test_expired_is_always_critical() {
        let now = fixtures::now();
        let record = fixtures::record_expiring_in(-Duration::hours(1));

        // Thresholds already in the past cannot rescue an expired domain.
        let stale = Thresholds::from_days(30, 15, now - Duration::days(365));
        for thresholds in [fixtures::thresholds(), stale] {
            let metadata = Metadata::new(&record, thresholds).unwrap();
            assert!(metadata.is_expired(now));
            assert!(!metadata.is_expiring(now));
            assert!(!metadata.is_warning_state(now));
            assert_eq!(
                metadata.evaluate(now),
                Evaluation {
                    state: ServiceState::Critical,
                    issue: Some(ExpirationIssue::Expired),
                }
            );
        }
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(ExpirationIssue::Expired.to_string(), "domain has expired");
        assert_eq!(ExpirationIssue::Expiring.to_string(), "domain is expiring");
    }
}
