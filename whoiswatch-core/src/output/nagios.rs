use super::OutputFormatter;
use crate::plugin::{CheckResult, CHECK_OUTPUT_EOL};

/// Renders a result in the Nagios plugin text protocol: service output,
/// optional sections for errors, thresholds and details, then `|` followed
/// by performance data.
pub struct NagiosFormatter {
    show_thresholds: bool,
}

impl Default for NagiosFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NagiosFormatter {
    pub fn new() -> Self {
        Self {
            show_thresholds: true,
        }
    }

    pub fn without_thresholds(mut self) -> Self {
        self.show_thresholds = false;
        self
    }

    fn section(&self, out: &mut String, title: &str) {
        out.push_str(CHECK_OUTPUT_EOL);
        out.push_str(title);
        out.push_str(CHECK_OUTPUT_EOL);
        out.push_str(CHECK_OUTPUT_EOL);
    }
}

impl OutputFormatter for NagiosFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        let mut out = result.service_output.clone();

        if !result.errors.is_empty() {
            self.section(&mut out, "**ERRORS**");
            for error in &result.errors {
                out.push_str(&format!("* {}{}", error, CHECK_OUTPUT_EOL));
            }
        }

        if self.show_thresholds {
            if let (Some(warning), Some(critical)) =
                (&result.warning_threshold, &result.critical_threshold)
            {
                self.section(&mut out, "**THRESHOLDS**");
                out.push_str(&format!("* CRITICAL: {}{}", critical, CHECK_OUTPUT_EOL));
                out.push_str(&format!("* WARNING: {}{}", warning, CHECK_OUTPUT_EOL));
            }
        }

        if !result.long_service_output.is_empty() {
            self.section(&mut out, "**DETAILED INFO**");
            out.push_str(&result.long_service_output);
        }

        if let Some(ref branding) = result.branding {
            out.push_str(CHECK_OUTPUT_EOL);
            out.push_str(branding);
            out.push_str(CHECK_OUTPUT_EOL);
        }

        if !result.metrics.is_empty() {
            let perf_data: Vec<String> = result.metrics.iter().map(|m| m.to_string()).collect();
            out.push_str(" | ");
            out.push_str(&perf_data.join(" "));
            out.push('\n');
        }

        out
    }
}
