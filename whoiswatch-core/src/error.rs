use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("failed to parse domain {field} date: {raw:?}")]
    DateParse { field: &'static str, raw: String },

    #[error("WHOIS lookup failed: {0}")]
    WhoisError(String),

    #[error("WHOIS server not found for TLD: {0}")]
    WhoisServerNotFound(String),

    #[error("WHOIS connection failed: {0}")]
    WhoisConnectionFailed(#[from] std::io::Error),

    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CheckError>;
