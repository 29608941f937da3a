use license_graph::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock ProjectMetadataReader that counts reads
///
/// The counter is shared, so it stays observable after the reader has
/// been moved into a cache.
#[derive(Default)]
pub struct MockProjectMetadataReader {
    records: HashMap<String, ProjectMetadata>,
    failing: Vec<String>,
    reads: Arc<AtomicUsize>,
}

impl MockProjectMetadataReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, project: &str, name: &str) -> Self {
        self.records.insert(
            project.to_string(),
            ProjectMetadata {
                name: Some(name.to_string()),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_failure(mut self, project: &str) -> Self {
        self.failing.push(project.to_string());
        self
    }

    pub fn read_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.reads)
    }
}

impl ProjectMetadataReader for MockProjectMetadataReader {
    fn read_project_metadata(&self, project: &str) -> Result<Option<ProjectMetadata>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|p| p == project) {
            anyhow::bail!("Failed to parse project metadata for {}: METADATA", project);
        }
        Ok(self.records.get(project).cloned())
    }
}
