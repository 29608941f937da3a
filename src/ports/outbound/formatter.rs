use crate::application::read_models::Report;
use crate::shared::Result;

/// ReportFormatter port for rendering analysis reports
///
/// Formatters receive the read model only; they never see the graph.
pub trait ReportFormatter {
    /// Renders `report` as the complete output document
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &Report) -> Result<String>;
}
