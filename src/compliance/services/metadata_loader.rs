use crate::compliance::domain::{
    AnnotationError, ConditionSet, EdgeKind, InstallMapping, LicenseGraph, TargetNode,
};
use crate::ports::outbound::MetadataReader;
use crate::shared::error::{ComplianceError, Failure};
use crate::shared::Result;
use serde::Deserialize;
use std::collections::{HashSet, VecDeque};

/// On-disk shape of one `.meta_lic` record. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct MetadataRecord {
    #[serde(default)]
    package_name: Option<String>,
    #[serde(default)]
    module_name: Option<String>,
    #[serde(default)]
    license_conditions: Vec<String>,
    #[serde(default)]
    license_texts: Vec<String>,
    #[serde(default)]
    is_container: bool,
    #[serde(default)]
    projects: Vec<String>,
    #[serde(default)]
    built: Vec<String>,
    #[serde(default)]
    installed: Vec<String>,
    #[serde(default)]
    install_map: Vec<InstallMapping>,
    #[serde(default)]
    deps: Vec<DependencyRecord>,
}

#[derive(Debug, Deserialize)]
struct DependencyRecord {
    file: String,
    #[serde(default)]
    annotations: Vec<String>,
}

/// A parsed record: the node plus its outgoing `(dependency, annotations)`.
struct ParsedRecord {
    node: TargetNode,
    deps: Vec<(String, Vec<String>)>,
}

/// An edge whose annotation tags name more than one kind.
struct AnnotationConflict {
    file: String,
    dependency: String,
    kinds: Vec<EdgeKind>,
}

impl AnnotationConflict {
    fn kinds(&self) -> String {
        self.kinds
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// MetadataLoader service for building a [`LicenseGraph`] from root records
///
/// Walks breadth-first from the roots, loading every transitively referenced
/// record exactly once (identity is the normalized file name, so diamonds
/// collapse onto a single node). Every unreadable or malformed record is
/// collected before failing, so one run reports all of them.
pub struct MetadataLoader<R: MetadataReader> {
    reader: R,
}

impl<R: MetadataReader> MetadataLoader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Loads the graph reachable from `roots`
    ///
    /// # Errors
    /// - [`ComplianceError::NoFilesRequested`] if `roots` is empty
    /// - [`ComplianceError::ConflictingAnnotations`] if the only problem is a
    ///   single edge tagged with two different kinds
    /// - [`ComplianceError::MetadataLoad`] listing every failed file otherwise
    pub fn load(&self, roots: &[String]) -> Result<LicenseGraph> {
        self.load_with_progress(roots, |_, _, _| {})
    }

    /// Like [`MetadataLoader::load`], calling `on_file(loaded, discovered,
    /// file)` after each record. `loaded == discovered` only once the walk
    /// has finished.
    pub fn load_with_progress<F>(&self, roots: &[String], mut on_file: F) -> Result<LicenseGraph>
    where
        F: FnMut(usize, usize, &str),
    {
        if roots.is_empty() {
            return Err(ComplianceError::NoFilesRequested.into());
        }

        let root_names: Vec<String> = roots.iter().map(|r| normalize(r)).collect();

        let mut queued: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        for name in &root_names {
            if queued.insert(name.clone()) {
                queue.push_back(name.clone());
            }
        }

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut failures = Vec::new();
        let mut conflicts = Vec::new();

        let mut loaded = 0;
        while let Some(file) = queue.pop_front() {
            loaded += 1;
            let parsed = match self.read_record(&file) {
                Ok(parsed) => parsed,
                Err(details) => {
                    failures.push(Failure::new(&file, details));
                    on_file(loaded, queued.len(), &file);
                    continue;
                }
            };

            for (dependency, annotations) in parsed.deps {
                let dependency = normalize(&dependency);
                match EdgeKind::from_annotations(&annotations) {
                    Ok(kind) => edges.push((file.clone(), dependency.clone(), kind)),
                    Err(AnnotationError::Conflicting(kinds)) => conflicts.push(AnnotationConflict {
                        file: file.clone(),
                        dependency: dependency.clone(),
                        kinds,
                    }),
                    Err(AnnotationError::Unknown(details)) => {
                        failures.push(Failure::new(&file, details));
                    }
                }
                if queued.insert(dependency.clone()) {
                    queue.push_back(dependency);
                }
            }
            nodes.push(parsed.node);
            on_file(loaded, queued.len(), &file);
        }

        if failures.is_empty() && conflicts.len() == 1 {
            let conflict = &conflicts[0];
            return Err(ComplianceError::ConflictingAnnotations {
                file: conflict.file.clone(),
                dependency: conflict.dependency.clone(),
                kinds: conflict.kinds(),
            }
            .into());
        }

        failures.extend(conflicts.iter().map(|c| {
            Failure::new(
                &c.file,
                format!(
                    "Conflicting annotations for dependency {}: {}",
                    c.dependency,
                    c.kinds()
                ),
            )
        }));
        if !failures.is_empty() {
            failures.sort_by(|a, b| a.path.cmp(&b.path));
            return Err(ComplianceError::MetadataLoad { failures }.into());
        }

        LicenseGraph::new(nodes, edges, root_names)
    }

    fn read_record(&self, file: &str) -> std::result::Result<ParsedRecord, String> {
        let content = self
            .reader
            .read_metadata(file)
            .map_err(|e| e.to_string())?;
        parse_record(file, &content)
    }
}

fn parse_record(name: &str, content: &str) -> std::result::Result<ParsedRecord, String> {
    let record: MetadataRecord =
        toml::from_str(content).map_err(|e| format!("Failed to parse metadata: {}", e))?;

    let conditions = ConditionSet::from_names(&record.license_conditions)?;

    let node = TargetNode::new(name, conditions)
        .with_package_name(record.package_name)
        .with_module_name(record.module_name)
        .with_license_texts(record.license_texts)
        .with_container(record.is_container)
        .with_projects(record.projects)
        .with_built(record.built)
        .with_installed(record.installed)
        .with_install_map(record.install_map);

    let deps = record
        .deps
        .into_iter()
        .map(|d| (d.file, d.annotations))
        .collect();

    Ok(ParsedRecord { node, deps })
}

/// Strips any leading `./` so the same file reached by two spellings is one node.
fn normalize(name: &str) -> String {
    let mut name = name.trim();
    while let Some(rest) = name.strip_prefix("./") {
        name = rest;
    }
    name.to_string()
}
