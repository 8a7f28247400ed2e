use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::metadata::Metadata;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    #[error("domain has already expired")]
    AlreadyExpired,

    #[error("domain {0} date is in the future")]
    FutureDate(&'static str),
}

/// A performance data point: `'label'=value[unit];[warn];[crit];;`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: i64,
    pub unit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crit: Option<u32>,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'={}{};", self.label, self.value, self.unit)?;
        if let Some(warn) = self.warn {
            write!(f, "{}", warn)?;
        }
        f.write_str(";")?;
        if let Some(crit) = self.crit {
            write!(f, "{}", crit)?;
        }
        f.write_str(";;")
    }
}

/// Whole days until the domain expires.
pub fn until_expiration(metadata: &Metadata, now: DateTime<Utc>) -> Result<i64, MetricError> {
    if metadata.is_expired(now) {
        return Err(MetricError::AlreadyExpired);
    }
    Ok((metadata.expiration_date() - now).num_days())
}

/// Whole days since the WHOIS record was last updated.
pub fn since_update(metadata: &Metadata, now: DateTime<Utc>) -> Result<i64, MetricError> {
    days_since("updated", metadata.updated_date(), now)
}

/// Whole days since the domain was registered.
pub fn since_creation(metadata: &Metadata, now: DateTime<Utc>) -> Result<i64, MetricError> {
    days_since("creation", metadata.creation_date(), now)
}

fn days_since(field: &'static str, date: DateTime<Utc>, now: DateTime<Utc>) -> Result<i64, MetricError> {
    if date > now {
        return Err(MetricError::FutureDate(field));
    }
    Ok((now - date).num_days())
}

fn or_zero(label: &'static str, value: Result<i64, MetricError>) -> i64 {
    value.unwrap_or_else(|e| {
        debug!(metric = label, error = %e, "Metric unavailable, reporting 0");
        0
    })
}

impl Metadata {
    /// `expires`, `since_update` and `since_creation`, in days. Each metric is
    /// computed on its own and reported as 0 when it cannot be computed.
    pub fn performance_data(&self, now: DateTime<Utc>) -> Vec<Metric> {
        let thresholds = self.thresholds();

        vec![
            Metric {
                label: "expires",
                value: or_zero("expires", until_expiration(self, now)),
                unit: "d",
                warn: Some(thresholds.warning_days),
                crit: Some(thresholds.critical_days),
            },
            Metric {
                label: "since_update",
                value: or_zero("since_update", since_update(self, now)),
                unit: "d",
                warn: None,
                crit: None,
            },
            Metric {
                label: "since_creation",
                value: or_zero("since_creation", since_creation(self, now)),
                unit: "d",
                warn: None,
                crit: None,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;
    use crate::whois::DateField;
    use chrono::{Duration, TimeZone};

    fn metadata(remaining: Duration) -> Metadata {
        let record = fixtures::record_expiring_in(remaining);
        Metadata::new(&record, fixtures::thresholds()).unwrap()
    }

    #[test]
    fn test_performance_data() {
        let now = fixtures::now();
        let metrics = metadata(Duration::days(12) + Duration::hours(23)).performance_data(now);

        assert_eq!(metrics.len(), 3);
        assert_eq!(metrics[0].to_string(), "'expires'=12d;30;15;;");
        assert_eq!(metrics[1].to_string(), "'since_update'=100d;;;;");
        assert_eq!(metrics[2].label, "since_creation");
        assert_eq!(
            metrics[2].value,
            (now - Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).unwrap()).num_days()
        );
    }

    #[test]
    fn test_expired_domain_reports_zero_days() {
        let now = fixtures::now();
        let metadata = metadata(-Duration::days(3));

        assert_eq!(until_expiration(&metadata, now), Err(MetricError::AlreadyExpired));

        let metrics = metadata.performance_data(now);
        assert_eq!(metrics[0].value, 0);
        assert_eq!(metrics[1].value, 100);
    }

    #[test]
    fn test_one_failing_metric_does_not_block_the_others() {
        let now = fixtures::now();
        let mut record = fixtures::record_expiring_in(Duration::days(60));
        record.updated_date = DateField::from_parsed(now + Duration::days(2));
        let metadata = Metadata::new(&record, fixtures::thresholds()).unwrap();

        assert_eq!(since_update(&metadata, now), Err(MetricError::FutureDate("updated")));

        let metrics = metadata.performance_data(now);
        assert_eq!(metrics[0].value, 60);
        assert_eq!(metrics[1].value, 0);
        assert!(metrics[2].value > 0);
    }
}
