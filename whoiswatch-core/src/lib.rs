pub mod check;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod plugin;
pub mod thresholds;
pub mod validation;
pub mod whois;

pub use error::{CheckError, Result};
pub use validation::normalize_domain;

pub use check::ExpirationCheck;
pub use config::{Config, LogLevel};
pub use domain::{format_expiration, Evaluation, ExpirationIssue, Metadata, Metric, ServiceState};
pub use plugin::CheckResult;
pub use thresholds::Thresholds;
pub use whois::{DateField, WhoisClient, WhoisRecord};

pub use output::{OutputFormat, OutputFormatter};
