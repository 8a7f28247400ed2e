use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::thresholds::Thresholds;
use crate::whois::{DateField, WhoisRecord};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
}

/// 30 day warning, 15 day critical, relative to [`now`].
pub fn thresholds() -> Thresholds {
    Thresholds::from_days(30, 15, now())
}

pub fn record_expiring_at(expiration: DateTime<Utc>) -> WhoisRecord {
    WhoisRecord {
        domain: "example.com".to_string(),
        status: vec![
            "clientDeleteProhibited".to_string(),
            "clientTransferProhibited".to_string(),
        ],
        registrar_name: Some("Example Registrar, Inc.".to_string()),
        registrant_name: None,
        registrant_email: None,
        creation_date: DateField::from_parsed(Utc.with_ymd_and_hms(1995, 8, 14, 4, 0, 0).unwrap()),
        updated_date: DateField::from_parsed(now() - Duration::days(100)),
        expiration_date: DateField::from_parsed(expiration),
        whois_server: "whois.verisign-grs.com".to_string(),
        raw_response: String::new(),
    }
}

pub fn record_expiring_in(remaining: Duration) -> WhoisRecord {
    record_expiring_at(now() + remaining)
}
