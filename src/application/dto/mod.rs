mod analysis;
mod analysis_request;
mod output_format;

pub use analysis::Analysis;
pub use analysis_request::AnalysisRequest;
pub use output_format::OutputFormat;
