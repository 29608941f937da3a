/// Result alias used throughout the crate; typed failures are
/// [`ComplianceError`](crate::shared::error::ComplianceError) values carried inside `anyhow::Error`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
