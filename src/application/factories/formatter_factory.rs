use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// Selects the formatter adapter for an output format, keeping adapter
/// construction out of the CLI.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use license_graph::application::dto::OutputFormat;
    /// use license_graph::application::factories::FormatterFactory;
    /// use license_graph::application::read_models::Report;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Text);
    /// assert_eq!(formatter.format(&Report::ShareCheck(vec![])).unwrap(), "PASS\n");
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Generating text output...",
            OutputFormat::Json => "📝 Generating JSON output...",
        }
    }
}
