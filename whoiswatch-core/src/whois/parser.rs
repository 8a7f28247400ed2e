use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A WHOIS date as found in the response: the raw text next to the field
/// label and, when one of the known registry layouts matched, the parsed
/// instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateField {
    pub parsed: Option<DateTime<Utc>>,
    pub raw: String,
}

impl DateField {
    /// Build a field from raw text only, leaving `parsed` empty.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            parsed: None,
            raw: raw.into(),
        }
    }

    pub fn from_parsed(parsed: DateTime<Utc>) -> Self {
        Self {
            parsed: Some(parsed),
            raw: parsed.to_rfc3339(),
        }
    }

    /// Keep this field if it parsed, otherwise take `other` when it parsed
    /// or when this one has no text at all.
    pub fn or(self, other: DateField) -> DateField {
        if self.parsed.is_some() || (other.parsed.is_none() && !self.raw.is_empty()) {
            self
        } else {
            other
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WhoisRecord {
    pub domain: String,
    pub status: Vec<String>,
    pub registrar_name: Option<String>,
    pub registrant_name: Option<String>,
    pub registrant_email: Option<String>,
    pub creation_date: DateField,
    pub updated_date: DateField,
    pub expiration_date: DateField,
    pub whois_server: String,
    #[serde(skip)]
    pub raw_response: String,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Invalid WHOIS field regex"))
        .collect()
}

static REGISTRAR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?im)^\s*Registrar:[ \t]*(.+)$",
        r"(?im)^\s*Registrar Name:[ \t]*(.+)$",
        r"(?im)^\s*Sponsoring Registrar:[ \t]*(.+)$",
    ])
});

static REGISTRANT_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?im)^\s*Registrant Name:[ \t]*(.+)$",
        r"(?im)^\s*Registrant Organization:[ \t]*(.+)$",
        r"(?im)^\s*Registrant:[ \t]*(.+)$",
        r"(?im)^\s*org-name:[ \t]*(.+)$",
    ])
});

static REGISTRANT_EMAIL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?im)^\s*Registrant Email:[ \t]*(.+)$",
        r"(?im)^\s*Registrant E-mail:[ \t]*(.+)$",
    ])
});

static CREATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?im)^\s*Creation Date:[ \t]*(.+)$",
        r"(?im)^\s*Created Date:[ \t]*(.+)$",
        r"(?im)^\s*Created On:[ \t]*(.+)$",
        r"(?im)^\s*Created:[ \t]*(.+)$",
        r"(?im)^\s*Registration Date:[ \t]*(.+)$",
        r"(?im)^\s*Domain Registration Date:[ \t]*(.+)$",
    ])
});

static EXPIRATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?im)^\s*(?:Registry )?Expir(?:y|ation) Date:[ \t]*(.+)$",
        r"(?im)^\s*Registrar Registration Expiration Date:[ \t]*(.+)$",
        r"(?im)^\s*Expires On:[ \t]*(.+)$",
        r"(?im)^\s*Expires:[ \t]*(.+)$",
        r"(?im)^\s*paid-till:[ \t]*(.+)$",
    ])
});

static UPDATED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?im)^\s*Updated Date:[ \t]*(.+)$",
        r"(?im)^\s*Last Updated On:[ \t]*(.+)$",
        r"(?im)^\s*Last Modified:[ \t]*(.+)$",
        r"(?im)^\s*Last Update:[ \t]*(.+)$",
        r"(?im)^\s*Modified:[ \t]*(.+)$",
        r"(?im)^\s*Changed:[ \t]*(.+)$",
    ])
});

static STATUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?im)^\s*Domain Status:[ \t]*(.+)$",
        r"(?im)^\s*Status:[ \t]*(.+)$",
        r"(?im)^\s*state:[ \t]*(.+)$",
    ])
});

impl WhoisRecord {
    pub fn parse(domain: &str, whois_server: &str, raw: &str) -> Self {
        WhoisRecord {
            domain: domain.to_string(),
            status: extract_status(raw),
            registrar_name: extract_field(raw, &REGISTRAR_PATTERNS),
            registrant_name: extract_field(raw, &REGISTRANT_NAME_PATTERNS),
            registrant_email: extract_field(raw, &REGISTRANT_EMAIL_PATTERNS),
            creation_date: extract_date(raw, &CREATION_PATTERNS),
            updated_date: extract_date(raw, &UPDATED_PATTERNS),
            expiration_date: extract_date(raw, &EXPIRATION_PATTERNS),
            whois_server: whois_server.to_string(),
            raw_response: raw.to_string(),
        }
    }

    /// Whether the registry reported the domain as unregistered.
    pub fn is_available(&self) -> bool {
        let available_patterns = [
            "no match",
            "not found",
            "no data found",
            "no entries found",
            "status: free",
            "status: available",
            "domain not found",
            "no object found",
        ];

        let lower = self.raw_response.to_lowercase();
        available_patterns.iter().any(|p| lower.contains(p))
    }

    /// Fill in whatever this record lacks from `fallback`. Used to combine a
    /// registrar's answer with the registry answer that referred to it.
    pub fn with_fallback(mut self, fallback: WhoisRecord) -> Self {
        if self.status.is_empty() {
            self.status = fallback.status;
        }
        self.registrar_name = self.registrar_name.or(fallback.registrar_name);
        self.registrant_name = self.registrant_name.or(fallback.registrant_name);
        self.registrant_email = self.registrant_email.or(fallback.registrant_email);
        self.creation_date = self.creation_date.or(fallback.creation_date);
        self.updated_date = self.updated_date.or(fallback.updated_date);
        self.expiration_date = self.expiration_date.or(fallback.expiration_date);
        self
    }
}

fn extract_field(text: &str, patterns: &[Regex]) -> Option<String> {
    for re in patterns {
        if let Some(m) = re.captures(text).and_then(|caps| caps.get(1)) {
            let value = m.as_str().trim();
            if !value.is_empty() && !value.to_lowercase().starts_with("redacted") {
                return Some(value.to_string());
            }
        }
    }
    None
}

fn extract_date(text: &str, patterns: &[Regex]) -> DateField {
    match extract_field(text, patterns) {
        Some(raw) => DateField {
            parsed: parse_date(&raw),
            raw,
        },
        None => DateField::default(),
    }
}

/// Best-effort parse of the many date layouts registries use.
fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let trimmed = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    // Offsets without a colon, e.g. MarkMonitor's "2028-09-13T07:00:00+0000"
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%SZ",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%d-%b-%Y",
        "%d-%B-%Y",
        "%Y.%m.%d",
        "%Y/%m/%d",
        "%d.%m.%Y",
        "%d/%m/%Y",
        "%b %d %Y",
    ];

    let cleaned = trimmed
        .replace(" (UTC)", "")
        .replace(" UTC", "Z")
        .replace(" +0000", "Z");

    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Some(dt.and_utc());
        }
        if let Ok(d) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    cleaned.parse::<DateTime<Utc>>().ok()
}

fn extract_status(text: &str) -> Vec<String> {
    let mut statuses = Vec::new();

    for re in STATUS_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                // Extract just the status code without the ICANN URL
                if let Some(status) = m.as_str().split_whitespace().next() {
                    let status = status.to_string();
                    if !statuses.contains(&status) {
                        statuses.push(status);
                    }
                }
            }
        }
    }

    statuses
}
