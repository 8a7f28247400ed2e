//! Domain registration expiration evaluation.
//!
//! [`Metadata`] is built once per check from a parsed [`WhoisRecord`] and a
//! pair of [`Thresholds`]; everything else in this module is a read-only view
//! over it: the severity [`Evaluation`], the one-line summary and long report,
//! and the performance [`Metric`]s.
//!
//! [`WhoisRecord`]: crate::whois::WhoisRecord
//! [`Thresholds`]: crate::thresholds::Thresholds

mod duration;
mod metadata;
mod metrics;
mod report;
mod state;

#[cfg(test)]
pub(crate) mod fixtures;

pub use duration::format_expiration;
pub use metadata::Metadata;
pub use metrics::{since_creation, since_update, until_expiration, Metric, MetricError};
pub use state::{Evaluation, ExpirationIssue, ServiceState};

/// Layout used whenever a domain date is shown to a person.
pub const DOMAIN_DATE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S %z %Z";

/// Shown in place of WHOIS values the registry did not provide.
pub const PLACEHOLDER: &str = "unspecified";

/// Returns `value` unless it is missing or blank, `placeholder` otherwise.
pub fn or_default<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder,
    }
}
