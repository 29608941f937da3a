use license_graph::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock MetadataReader serving records from memory
#[derive(Default)]
pub struct MockMetadataReader {
    files: HashMap<String, String>,
    reads: AtomicUsize,
}

impl MockMetadataReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        self.files.insert(name.to_string(), content.to_string());
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl MetadataReader for MockMetadataReader {
    fn read_metadata(&self, path: &str) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.files.get(path) {
            Some(content) => Ok(content.clone()),
            None => anyhow::bail!("Mock metadata not found: {}", path),
        }
    }
}
