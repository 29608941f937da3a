/// Which analysis a [`LicenseAnalysisUseCase`](crate::application::use_cases::LicenseAnalysisUseCase) runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    /// Effective conditions of every node
    Conditions,
    /// Sharing/privacy conflicts (PASS/FAIL)
    CheckShare,
    /// Projects whose source must be shared
    ListShare,
    /// Where restriction spreads from the requested sources
    TraceRestricted,
    /// License texts per install path
    Notice,
    /// Packages and SPDX-style relationships
    Relationships,
}

impl Analysis {
    /// Progress message shown while the analysis runs
    pub fn progress_message(self) -> &'static str {
        match self {
            Analysis::Conditions => "🔍 Resolving license conditions...",
            Analysis::CheckShare => "🔍 Checking for source-sharing/privacy conflicts...",
            Analysis::ListShare => "🔍 Listing projects to share...",
            Analysis::TraceRestricted => "🔍 Tracing restricted conditions...",
            Analysis::Notice => "📝 Collecting license notices...",
            Analysis::Relationships => "📝 Collecting package relationships...",
        }
    }
}
