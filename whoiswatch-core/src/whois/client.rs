use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use super::parser::WhoisRecord;
use super::servers::{get_tld, get_whois_server, IANA_WHOIS_SERVER};
use crate::error::{CheckError, Result};
use crate::validation::normalize_domain;

const WHOIS_PORT: u16 = 43;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RESPONSE_SIZE: usize = 1024 * 1024; // 1MB
const MAX_REFERRAL_DEPTH: u8 = 3;

static REFERRAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?im)^\s*Registrar WHOIS Server:[ \t]*(.+)$",
        r"(?im)^\s*Whois Server:[ \t]*(.+)$",
        r"(?im)^\s*ReferralServer:[ \t]*whois://(.+)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid referral regex"))
    .collect()
});

static IANA_REFER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*refer:[ \t]*(\S+)").expect("Invalid IANA refer regex"));

/// Single-attempt WHOIS client speaking the port 43 protocol.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    timeout: Duration,
    port: u16,
    follow_referrals: bool,
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WhoisClient {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            port: WHOIS_PORT,
            follow_referrals: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect to a port other than 43.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Toggle following `Registrar WHOIS Server` referrals from the registry.
    pub fn with_referrals(mut self, follow: bool) -> Self {
        self.follow_referrals = follow;
        self
    }

    /// Look up `domain` starting at its TLD's registry server.
    #[instrument(skip(self), fields(domain = %domain))]
    pub async fn lookup(&self, domain: &str) -> Result<WhoisRecord> {
        let domain = normalize_domain(domain)?;
        let tld = get_tld(&domain).ok_or_else(|| CheckError::InvalidDomain(domain.clone()))?;

        let whois_server = match get_whois_server(tld) {
            Some(server) => server.to_string(),
            None => self.discover_server(tld).await?,
        };

        let mut visited = HashSet::new();
        self.lookup_with_referrals(&domain, &whois_server, 0, &mut visited)
            .await
    }

    /// Look up `domain` on an explicitly chosen server, typically the
    /// registrar's own WHOIS server.
    #[instrument(skip(self), fields(domain = %domain, server = %server))]
    pub async fn lookup_with_server(&self, domain: &str, server: &str) -> Result<WhoisRecord> {
        let domain = normalize_domain(domain)?;

        let mut visited = HashSet::new();
        self.lookup_with_referrals(&domain, server, 0, &mut visited)
            .await
    }

    /// Ask IANA which server is authoritative for a TLD missing from the
    /// built-in table.
    async fn discover_server(&self, tld: &str) -> Result<String> {
        debug!(tld = %tld, "TLD not in server table, asking IANA");

        let response = self.query_server(IANA_WHOIS_SERVER, tld).await?;
        extract_iana_refer(&response).ok_or_else(|| CheckError::WhoisServerNotFound(tld.to_string()))
    }

    fn lookup_with_referrals<'a>(
        &'a self,
        domain: &'a str,
        whois_server: &'a str,
        depth: u8,
        visited: &'a mut HashSet<String>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<WhoisRecord>> + Send + 'a>>
    {
        Box::pin(async move {
            if depth >= MAX_REFERRAL_DEPTH {
                warn!(depth = depth, server = %whois_server, "Max referral depth exceeded");
                return Err(CheckError::WhoisError(
                    "Maximum WHOIS referral depth exceeded".to_string(),
                ));
            }

            let server_lower = whois_server.to_lowercase();
            if visited.contains(&server_lower) {
                warn!(server = %whois_server, "Circular WHOIS referral detected");
                return Err(CheckError::WhoisError(
                    "Circular WHOIS referral detected".to_string(),
                ));
            }
            visited.insert(server_lower);

            debug!(whois_server = %whois_server, depth = depth, "Querying WHOIS server");

            let raw_response = self.query_server(whois_server, domain).await?;

            if self.follow_referrals {
                if let Some(referral) = extract_referral(&raw_response) {
                    if !visited.contains(&referral) {
                        debug!(referral = %referral, "Following referral");
                        match self
                            .lookup_with_referrals(domain, &referral, depth + 1, visited)
                            .await
                        {
                            Ok(record) => {
                                let registry = WhoisRecord::parse(domain, whois_server, &raw_response);
                                return Ok(record.with_fallback(registry));
                            }
                            Err(e) => {
                                warn!(referral = %referral, error = %e, "Referral lookup failed, using registry response");
                            }
                        }
                    }
                }
            }

            Ok(WhoisRecord::parse(domain, whois_server, &raw_response))
        })
    }

    async fn query_server(&self, server: &str, query: &str) -> Result<String> {
        let addr = format!("{}:{}", server, self.port);

        let mut stream = timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| CheckError::Timeout(format!("Connection to {} timed out", server)))?
            .map_err(|e| CheckError::WhoisError(format!("Failed to connect to {}: {}", server, e)))?;

        let query_bytes = format!("{}\r\n", query);
        timeout(self.timeout, stream.write_all(query_bytes.as_bytes()))
            .await
            .map_err(|_| CheckError::Timeout("Write timed out".to_string()))??;

        let mut response = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            match timeout(self.timeout, stream.read(&mut buf)).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => {
                    response.extend_from_slice(&buf[..n]);
                    if response.len() > MAX_RESPONSE_SIZE {
                        return Err(CheckError::WhoisError("Response too large".to_string()));
                    }
                }
                Ok(Err(e)) => return Err(CheckError::WhoisConnectionFailed(e)),
                Err(_) => {
                    // Some servers never close the connection
                    if !response.is_empty() {
                        break;
                    }
                    return Err(CheckError::Timeout("Read timed out".to_string()));
                }
            }
        }

        // Latin-1 fallback for registries that do not answer in UTF-8
        Ok(String::from_utf8(response)
            .unwrap_or_else(|e| e.into_bytes().iter().map(|&c| c as char).collect()))
    }
}

fn extract_referral(response: &str) -> Option<String> {
    for re in REFERRAL_PATTERNS.iter() {
        if let Some(m) = re.captures(response).and_then(|caps| caps.get(1)) {
            let server = m.as_str().trim().to_lowercase();
            let server = server
                .strip_prefix("whois://")
                .unwrap_or(&server)
                .trim_end_matches('/')
                .to_string();
            if !server.is_empty() && server.contains('.') {
                return Some(server);
            }
        }
    }

    None
}

fn extract_iana_refer(response: &str) -> Option<String> {
    IANA_REFER_PATTERN
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}
