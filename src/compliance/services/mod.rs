pub mod condition_resolver;
pub mod conflict_detector;
pub mod graph_walker;
pub mod metadata_loader;
pub mod notice_index;
pub mod relationships;
pub mod restricted_tracer;
pub mod source_sharing;

pub use condition_resolver::{ConditionResolver, ResolvedConditions};
pub use conflict_detector::{ConflictDetector, ConflictView, SourceSharePrivacyConflict};
pub use graph_walker::GraphWalker;
pub use metadata_loader::MetadataLoader;
pub use notice_index::{content_hash, NoticeIndex, NoticeIndexBuilder};
pub use relationships::{Relationship, RelationshipBuilder, RelationshipKind, RelationshipView};
pub use restricted_tracer::{RestrictedTrace, RestrictedTracer, TraceEntry, TraceEntryView};
pub use source_sharing::{ProjectShare, SourceSharing};
