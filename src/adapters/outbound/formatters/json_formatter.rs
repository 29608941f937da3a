use crate::application::read_models::Report;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde_json::{json, Value};

/// JsonFormatter adapter for pretty-printed JSON reports
///
/// List reports become top-level arrays; the share check becomes an
/// object carrying `result` ("PASS" or "FAIL") and the conflicts.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn to_value(report: &Report) -> serde_json::Result<Value> {
        Ok(match report {
            Report::NoLicenses => json!({ "result": "No licenses found" }),
            Report::Conditions(nodes) => serde_json::to_value(nodes)?,
            Report::ShareCheck(conflicts) => json!({
                "result": if conflicts.is_empty() { "PASS" } else { "FAIL" },
                "conflicts": conflicts,
            }),
            Report::ShareList(shares) => serde_json::to_value(shares)?,
            Report::Trace(trace) => serde_json::to_value(trace)?,
            Report::Notice(notice) => serde_json::to_value(notice)?,
            Report::Relationships(document) => serde_json::to_value(document)?,
        })
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let value = Self::to_value(report)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report to JSON: {}", e))?;
        let mut output = serde_json::to_string_pretty(&value)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report to JSON: {}", e))?;
        output.push('\n');
        Ok(output)
    }
}
