mod json;
mod nagios;

pub use json::JsonFormatter;
pub use nagios::NagiosFormatter;

use crate::plugin::CheckResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Nagios,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nagios" | "plugin" | "text" => Ok(OutputFormat::Nagios),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

pub trait OutputFormatter {
    fn format_check(&self, result: &CheckResult) -> String;
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Nagios => Box::new(NagiosFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
