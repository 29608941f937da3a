/// AnalysisRequest - request DTO shared by the analysis use cases
///
/// Only `roots` is required; the other fields default to empty and are
/// read by the use cases that need them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Root metadata files, as given on the command line
    pub roots: Vec<String>,
    /// Prefixes removed from reported install paths
    pub strip_prefixes: Vec<String>,
    /// Projects or files to seed a restricted trace with
    pub sources: Vec<String>,
    /// Product name recorded in generated documents
    pub product: Option<String>,
}

impl AnalysisRequest {
    pub fn new(roots: Vec<String>) -> Self {
        Self {
            roots,
            ..Default::default()
        }
    }

    pub fn with_strip_prefixes(mut self, strip_prefixes: Vec<String>) -> Self {
        self.strip_prefixes = strip_prefixes;
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_product(mut self, product: Option<String>) -> Self {
        self.product = product;
        self
    }
}
