pub mod condition;
pub mod edge_kind;
pub mod license_graph;
pub mod project_metadata;
pub mod resolution;
pub mod target_node;

pub use condition::{ConditionKind, ConditionSet};
pub use edge_kind::{AnnotationError, EdgeKind};
pub use license_graph::LicenseGraph;
pub use project_metadata::{ProjectMetadata, ProjectUrl, ThirdParty, UrlType};
pub use resolution::{Resolution, ResolutionSet};
pub use target_node::{InstallMapping, NodeId, TargetEdge, TargetNode, TargetPath};
