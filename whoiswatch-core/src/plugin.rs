//! Nagios plugin result model.
//!
//! A [`CheckResult`] carries everything a monitoring supervisor consumes:
//! the service state (and therefore exit code), the one-line service output,
//! the long service output, accumulated errors, threshold descriptions and
//! performance data. Rendering lives in [`crate::output`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Metadata, Metric, ServiceState};
use crate::thresholds::Thresholds;

/// Line terminator for plugin output. The trailing space keeps line breaks
/// intact in notification clients that collapse bare newlines.
pub const CHECK_OUTPUT_EOL: &str = " \n";

pub const APP_NAME: &str = "check_whois";

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub domain: String,
    pub state: ServiceState,
    pub service_output: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub long_service_output: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_threshold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_threshold: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
    #[serde(skip)]
    pub branding: Option<String>,
}

impl CheckResult {
    /// Result for a domain whose metadata could be evaluated.
    pub fn evaluated(metadata: &Metadata, now: DateTime<Utc>) -> Self {
        let evaluation = metadata.evaluate(now);

        let mut result = Self {
            domain: metadata.name().to_string(),
            state: evaluation.state,
            service_output: metadata.one_line_summary(now),
            long_service_output: metadata.report(),
            errors: Vec::new(),
            warning_threshold: None,
            critical_threshold: None,
            metrics: metadata.performance_data(now),
            branding: None,
        };
        result.set_thresholds(metadata.thresholds());

        if let Some(issue) = evaluation.issue {
            result.errors.push(issue.to_string());
        }

        result
    }

    /// UNKNOWN result for a check that could not get far enough to evaluate
    /// anything.
    pub fn unknown(domain: &str, summary: &str, error: impl ToString) -> Self {
        Self {
            domain: domain.to_string(),
            state: ServiceState::Unknown,
            service_output: format!(
                "{}: {}{}",
                ServiceState::Unknown.label(),
                summary,
                CHECK_OUTPUT_EOL
            ),
            long_service_output: String::new(),
            errors: vec![error.to_string()],
            warning_threshold: None,
            critical_threshold: None,
            metrics: Vec::new(),
            branding: None,
        }
    }

    pub fn set_thresholds(&mut self, thresholds: &Thresholds) {
        self.warning_threshold = Some(thresholds.warning_description());
        self.critical_threshold = Some(thresholds.critical_description());
    }

    pub fn with_branding(mut self) -> Self {
        self.branding = Some(branding());
        self
    }

    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }
}

pub fn branding() -> String {
    format!(
        "Notification generated by {} {}",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    )
}
