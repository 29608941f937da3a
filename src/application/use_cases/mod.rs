/// Use cases module containing application business logic orchestration
mod license_analysis;

pub use license_analysis::LicenseAnalysisUseCase;
