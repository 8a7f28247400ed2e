//! Check configuration and its validation.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CheckError, Result};
use crate::validation::{normalize_domain, validate_server};

pub const DEFAULT_AGE_WARNING: u32 = 30;
pub const DEFAULT_AGE_CRITICAL: u32 = 15;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound for either threshold, roughly a century.
pub const MAX_AGE_DAYS: u32 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Disabled,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Disabled => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "disabled" | "off" => Ok(LogLevel::Disabled),
            "panic" | "fatal" | "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(CheckError::Config(format!("invalid logging level {:?}", s))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

/// Settings for a single domain expiration check.
#[derive(Debug, Clone)]
pub struct Config {
    /// Domain whose WHOIS record is evaluated.
    pub domain: String,
    /// Days before expiration at which the check turns WARNING.
    pub age_warning: u32,
    /// Days before expiration at which the check turns CRITICAL.
    pub age_critical: u32,
    pub log_level: LogLevel,
    /// Append application details to the plugin output.
    pub emit_branding: bool,
    /// Query this WHOIS server instead of the TLD's registry server.
    pub registrar_server: Option<String>,
    /// Do not follow `Registrar WHOIS Server` referrals.
    pub disable_referral: bool,
    /// Per-operation network timeout for the WHOIS query.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            age_warning: DEFAULT_AGE_WARNING,
            age_critical: DEFAULT_AGE_CRITICAL,
            log_level: LogLevel::default(),
            emit_branding: false,
            registrar_server: None,
            disable_referral: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Checks every setting, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(CheckError::Config("domain to query not provided".to_string()));
        }

        normalize_domain(&self.domain)?;

        if self.age_warning > MAX_AGE_DAYS {
            return Err(CheckError::Config(format!(
                "invalid expiration WARNING threshold number: {} (maximum {})",
                self.age_warning, MAX_AGE_DAYS
            )));
        }

        if self.age_critical > self.age_warning {
            return Err(CheckError::Config(
                "critical threshold set higher than warning threshold".to_string(),
            ));
        }

        if self.age_critical == self.age_warning {
            return Err(CheckError::Config(format!(
                "critical threshold ({}) set equal to warning threshold ({}); \
                 critical threshold should be lower than warning threshold",
                self.age_critical, self.age_warning
            )));
        }

        if let Some(ref server) = self.registrar_server {
            validate_server(server)?;
        }

        if self.timeout.is_zero() {
            return Err(CheckError::Config("timeout must be greater than zero".to_string()));
        }

        Ok(())
    }
}
