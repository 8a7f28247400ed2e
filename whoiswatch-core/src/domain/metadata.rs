use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::error::{CheckError, Result};
use crate::thresholds::Thresholds;
use crate::whois::{DateField, WhoisRecord};

/// Normalized registration details for one domain plus the thresholds it is
/// judged against.
#[derive(Debug, Clone)]
pub struct Metadata {
    name: String,
    creation_date: DateTime<Utc>,
    updated_date: DateTime<Utc>,
    expiration_date: DateTime<Utc>,
    thresholds: Thresholds,
    status: Vec<String>,
    registrar_name: Option<String>,
    registrant_name: Option<String>,
    registrant_email: Option<String>,
}

impl Metadata {
    /// Builds the metadata for `record`, failing if any of the three
    /// registration dates cannot be resolved.
    pub fn new(record: &WhoisRecord, thresholds: Thresholds) -> Result<Self> {
        let expiration_date = normalize_date("expiration", &record.expiration_date)?;
        let updated_date = normalize_date("updated", &record.updated_date)?;
        let creation_date = normalize_date("creation", &record.creation_date)?;

        debug!(
            domain = %record.domain,
            expiration = %expiration_date,
            "Normalized WHOIS dates"
        );

        Ok(Self {
            name: record.domain.clone(),
            creation_date,
            updated_date,
            expiration_date,
            thresholds,
            status: record.status.clone(),
            registrar_name: record.registrar_name.clone(),
            registrant_name: record.registrant_name.clone(),
            registrant_email: record.registrant_email.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn creation_date(&self) -> DateTime<Utc> {
        self.creation_date
    }

    pub fn updated_date(&self) -> DateTime<Utc> {
        self.updated_date
    }

    pub fn expiration_date(&self) -> DateTime<Utc> {
        self.expiration_date
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn warning_threshold(&self) -> DateTime<Utc> {
        self.thresholds.warning
    }

    pub fn critical_threshold(&self) -> DateTime<Utc> {
        self.thresholds.critical
    }

    pub fn status(&self) -> &[String] {
        &self.status
    }

    pub fn registrar_name(&self) -> Option<&str> {
        self.registrar_name.as_deref()
    }

    pub fn registrant_name(&self) -> Option<&str> {
        self.registrant_name.as_deref()
    }

    pub fn registrant_email(&self) -> Option<&str> {
        self.registrant_email.as_deref()
    }
}

/// Resolve a WHOIS date: the parser's timestamp wins, otherwise the raw text
/// must be RFC 3339 or a bare `YYYY-MM-DD`.
fn normalize_date(field: &'static str, date: &DateField) -> Result<DateTime<Utc>> {
    if let Some(parsed) = date.parsed {
        return Ok(parsed);
    }

    let raw = date.raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(dt) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(dt.and_utc());
    }

    Err(CheckError::DateParse {
        field,
        raw: date.raw.clone(),
    })
}
