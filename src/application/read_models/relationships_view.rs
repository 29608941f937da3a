use crate::compliance::domain::ConditionSet;
use crate::compliance::services::RelationshipView;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One package of the relationships document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Preferred source location from the project metadata record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_location: Option<String>,
    pub conditions: ConditionSet,
}

/// SPDX-style package and relationship listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipsView {
    pub document_namespace: String,
    pub product: Option<String>,
    pub created: DateTime<Utc>,
    pub packages: Vec<PackageView>,
    pub relationships: Vec<RelationshipView>,
}
