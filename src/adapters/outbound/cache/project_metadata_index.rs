use crate::compliance::domain::ProjectMetadata;
use crate::ports::outbound::{ProjectMetadataReader, ProjectMetadataRepository};
use crate::shared::error::{ComplianceError, Failure};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::join_all;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::{OnceCell, Semaphore};

/// Outcome of reading one project, shared by every caller that asked for it.
/// Errors are kept as text so the cached value can be cloned.
type ReadOutcome = std::result::Result<Option<ProjectMetadata>, String>;

/// ProjectMetadataIndex - single-flight, bounded-concurrency project metadata cache
///
/// Decorates any [`ProjectMetadataReader`]:
///
/// - each project directory gets one [`OnceCell`] slot; the first caller
///   performs the read and everyone else, concurrent or later, awaits the
///   same slot, so a directory is read at most once per index;
/// - reads run on the blocking pool and at most `concurrency` of them are
///   in flight, enforced by a [`Semaphore`];
/// - failures are cached like successes and reported together per batch.
///
/// The index is an explicit instance owned by the caller, never a global.
pub struct ProjectMetadataIndex<R: ProjectMetadataReader + 'static> {
    reader: Arc<R>,
    slots: DashMap<String, Arc<OnceCell<ReadOutcome>>>,
    permits: Arc<Semaphore>,
}

impl<R: ProjectMetadataReader + 'static> ProjectMetadataIndex<R> {
    pub const DEFAULT_CONCURRENCY: usize = 8;

    /// Creates an index allowing `concurrency` reads in flight (at least one).
    pub fn new(reader: R, concurrency: usize) -> Self {
        Self {
            reader: Arc::new(reader),
            slots: DashMap::new(),
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    /// Number of project directories read or being read.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    async fn lookup(&self, project: &str) -> ReadOutcome {
        // Clone the slot out so no map guard is held across the await.
        let slot = self.slots.entry(project.to_string()).or_default().clone();

        slot.get_or_init(|| self.read(project.to_string()))
            .await
            .clone()
    }

    async fn read(&self, project: String) -> ReadOutcome {
        let _permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| format!("Project metadata index closed: {}", e))?;

        let reader = Arc::clone(&self.reader);
        match tokio::task::spawn_blocking(move || reader.read_project_metadata(&project)).await {
            Ok(Ok(metadata)) => Ok(metadata),
            Ok(Err(e)) => Err(e.to_string()),
            Err(e) => Err(format!("Project metadata read did not complete: {}", e)),
        }
    }
}

#[async_trait]
impl<R: ProjectMetadataReader + 'static> ProjectMetadataRepository for ProjectMetadataIndex<R> {
    async fn get(&self, projects: &[String]) -> Result<BTreeMap<String, ProjectMetadata>> {
        let distinct: BTreeSet<&str> = projects.iter().map(String::as_str).collect();
        let outcomes = join_all(distinct.iter().map(|p| self.lookup(p))).await;

        let mut found = BTreeMap::new();
        let mut failures = Vec::new();
        for (project, outcome) in distinct.into_iter().zip(outcomes) {
            match outcome {
                Ok(Some(metadata)) => {
                    found.insert(project.to_string(), metadata);
                }
                Ok(None) => {}
                Err(details) => failures.push(Failure::new(project, details)),
            }
        }

        if !failures.is_empty() {
            return Err(ComplianceError::ProjectMetadata { failures }.into());
        }
        Ok(found)
    }
}
