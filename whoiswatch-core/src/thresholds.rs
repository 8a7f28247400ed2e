use chrono::{DateTime, Duration, Utc};

use crate::domain::DOMAIN_DATE_LAYOUT;

/// Absolute WARNING and CRITICAL cut-off instants derived from day counts.
///
/// A domain expiring before `critical` is CRITICAL, one expiring before
/// `warning` (but not before `critical`) is WARNING.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warning_days: u32,
    pub critical_days: u32,
    pub warning: DateTime<Utc>,
    pub critical: DateTime<Utc>,
}

impl Thresholds {
    pub fn from_days(warning_days: u32, critical_days: u32, now: DateTime<Utc>) -> Self {
        Self {
            warning_days,
            critical_days,
            warning: now + Duration::days(i64::from(warning_days)),
            critical: now + Duration::days(i64::from(critical_days)),
        }
    }

    pub fn warning_description(&self) -> String {
        describe(self.warning, self.warning_days)
    }

    pub fn critical_description(&self) -> String {
        describe(self.critical, self.critical_days)
    }
}

fn describe(at: DateTime<Utc>, days: u32) -> String {
    format!("Expires before {} ({} days)", at.format(DOMAIN_DATE_LAYOUT), days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_days() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let thresholds = Thresholds::from_days(30, 15, now);

        assert_eq!(thresholds.warning, Utc.with_ymd_and_hms(2026, 11, 16, 12, 0, 0).unwrap());
        assert_eq!(thresholds.critical, Utc.with_ymd_and_hms(2026, 11, 1, 12, 0, 0).unwrap());
        assert!(thresholds.critical < thresholds.warning);
    }

    #[test]
    fn test_descriptions() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let thresholds = Thresholds::from_days(30, 15, now);

        assert_eq!(
            thresholds.warning_description(),
            "Expires before 2026-11-16 12:00:00 +0000 UTC (30 days)"
        );
        assert_eq!(
            thresholds.critical_description(),
            "Expires before 2026-11-01 12:00:00 +0000 UTC (15 days)"
        );
    }
}
