/// Caching adapters decorating outbound ports
mod project_metadata_index;

pub use project_metadata_index::ProjectMetadataIndex;
