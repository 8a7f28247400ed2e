use super::OutputFormatter;
use crate::error::{CheckError, Result};
use crate::plugin::CheckResult;

pub struct JsonFormatter {
    pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

fn error_document(error: &CheckError) -> String {
    serde_json::json!({ "error": error.to_string() }).to_string()
}

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        self.to_json(result).unwrap_or_else(|e| error_document(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{fixtures, Metadata};
    use chrono::Duration;

    #[test]
    fn test_format_check_json() {
        let record = fixtures::record_expiring_in(-Duration::days(2));
        let metadata = Metadata::new(&record, fixtures::thresholds()).unwrap();
        let result = CheckResult::evaluated(&metadata, fixtures::now());

        let json = JsonFormatter::new().compact().format_check(&result);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["domain"], "example.com");
        assert_eq!(value["state"], "CRITICAL");
        assert_eq!(value["errors"][0], "domain has expired");
        assert_eq!(value["metrics"][0]["label"], "expires");
        assert_eq!(value["metrics"][0]["value"], 0);
        assert_eq!(value["metrics"][0]["warn"], 30);
        assert!(value["metrics"][1].get("warn").is_none());
    }

    #[test]
    fn test_serialization_failure_is_valid_json() {
        let mut unserializable = std::collections::HashMap::new();
        unserializable.insert((1, 2), "tuple keys are not JSON object keys");

        let err = JsonFormatter::new().to_json(&unserializable).unwrap_err();
        assert!(matches!(err, CheckError::Json(_)));

        let quoted = CheckError::Config("unexpected \"quote\"".to_string());
        let value: serde_json::Value = serde_json::from_str(&error_document(&quoted)).unwrap();
        assert_eq!(value["error"], "Invalid configuration: unexpected \"quote\"");
    }
}
