use crate::application::read_models::{NoticeView, Report, TraceView};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// Separator between license texts in a notice
const TEXT_SEPARATOR: &str = "------------------------------------------------------------\n";

/// TextFormatter adapter for line-oriented plain text reports
///
/// Comma-separated where a line has several fields, with condition sets
/// joined by `|`, so the output stays easy to grep and diff.
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write_trace(out: &mut String, trace: &TraceView) -> std::fmt::Result {
        for entry in &trace.entries {
            writeln!(
                out,
                "{},{},{}",
                entry.target,
                entry.origins.join(" "),
                entry.conditions
            )?;
        }
        Ok(())
    }

    fn write_notice(out: &mut String, notice: &NoticeView) -> std::fmt::Result {
        if let Some(product) = &notice.product {
            writeln!(out, "Notices for {}", product)?;
            writeln!(out)?;
        }
        for text in &notice.texts {
            out.push_str(TEXT_SEPARATOR);
            for library in &text.libraries {
                writeln!(out, "{}:", library.name)?;
                for path in &library.install_paths {
                    writeln!(out, "  {}", path)?;
                }
            }
            writeln!(out)?;
            out.push_str(&text.text);
            if !text.text.ends_with('\n') {
                out.push('\n');
            }
        }
        Ok(())
    }

    fn render(report: &Report) -> std::result::Result<String, std::fmt::Error> {
        let mut out = String::new();
        match report {
            Report::NoLicenses => writeln!(out, "No licenses found")?,
            Report::Conditions(nodes) => {
                for node in nodes {
                    writeln!(out, "{},{}", node.target, node.conditions)?;
                }
            }
            Report::ShareCheck(conflicts) => {
                writeln!(out, "{}", if conflicts.is_empty() { "PASS" } else { "FAIL" })?;
            }
            Report::ShareList(shares) => {
                for share in shares {
                    writeln!(out, "{},{}", share.project, share.conditions)?;
                }
            }
            Report::Trace(trace) => Self::write_trace(&mut out, trace)?,
            Report::Notice(notice) => Self::write_notice(&mut out, notice)?,
            Report::Relationships(document) => {
                for relationship in &document.relationships {
                    writeln!(
                        out,
                        "{} {} {}",
                        relationship.subject, relationship.relationship, relationship.object
                    )?;
                }
            }
        }
        Ok(out)
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        Self::render(report).map_err(|e| anyhow::anyhow!("Failed to render text report: {}", e))
    }
}
