use super::graph_walker::GraphWalker;
use crate::compliance::domain::{
    ConditionSet, EdgeKind, LicenseGraph, NodeId, ProjectMetadata, ResolutionSet, TargetNode,
};
use crate::ports::outbound::{LicenseTextReader, ProjectMetadataRepository};
use crate::shared::error::ComplianceError;
use crate::shared::Result;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// NoticeIndex - license texts deduplicated by content hash, indexed both ways
///
/// Every lookup returns entries in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeIndex {
    texts: BTreeMap<String, String>,
    libraries: BTreeMap<String, BTreeSet<String>>,
    hashes_by_install_path: BTreeMap<String, BTreeSet<String>>,
    install_paths_by_library: BTreeMap<(String, String), BTreeSet<String>>,
}

impl NoticeIndex {
    fn insert(&mut self, text: &str, library: &str, install_paths: &BTreeSet<String>) {
        let hash = content_hash(text);
        self.texts
            .entry(hash.clone())
            .or_insert_with(|| text.to_string());
        self.libraries
            .entry(hash.clone())
            .or_default()
            .insert(library.to_string());
        let installs = self
            .install_paths_by_library
            .entry((hash.clone(), library.to_string()))
            .or_default();
        for path in install_paths {
            installs.insert(path.clone());
            self.hashes_by_install_path
                .entry(path.clone())
                .or_default()
                .insert(hash.clone());
        }
    }

    pub fn install_paths(&self) -> impl Iterator<Item = &str> {
        self.hashes_by_install_path.keys().map(String::as_str)
    }

    pub fn hashes(&self) -> impl Iterator<Item = &str> {
        self.texts.keys().map(String::as_str)
    }

    pub fn hashes_for(&self, install_path: &str) -> Vec<&str> {
        self.hashes_by_install_path
            .get(install_path)
            .map(|hashes| hashes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn text(&self, hash: &str) -> Option<&str> {
        self.texts.get(hash).map(String::as_str)
    }

    pub fn libraries(&self, hash: &str) -> Vec<&str> {
        self.libraries
            .get(hash)
            .map(|libs| libs.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn install_paths_for(&self, hash: &str, library: &str) -> Vec<&str> {
        self.install_paths_by_library
            .get(&(hash.to_string(), library.to_string()))
            .map(|paths| paths.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of distinct license texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Hex-encoded SHA-256 of a license text.
pub fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// NoticeIndexBuilder service - aggregates the license texts a distribution must carry
pub struct NoticeIndexBuilder;

impl NoticeIndexBuilder {
    /// Builds the notice index from notice-family `resolutions`
    ///
    /// The texts of every origin a shipped node resolves against are
    /// attributed to that node's install paths. Install paths are composed
    /// through container `install_map` entries, and each prefix in
    /// `strip_prefixes` is removed from them.
    ///
    /// # Errors
    /// Fails if a license text cannot be read, or with one aggregated error
    /// if any project metadata record is malformed.
    pub async fn build<T, P>(
        graph: &LicenseGraph,
        resolutions: &ResolutionSet,
        text_reader: &T,
        projects: &P,
        strip_prefixes: &[String],
    ) -> Result<NoticeIndex>
    where
        T: LicenseTextReader + ?Sized,
        P: ProjectMetadataRepository + ?Sized,
    {
        let notices = resolutions.matching(ConditionSet::IMPLIES_NOTICE);
        let shipped = GraphWalker::shipped_nodes(graph);
        let install_paths = Self::install_paths(graph, strip_prefixes);

        let metadata = projects.get(&graph.projects()).await?;

        let mut texts: HashMap<String, String> = HashMap::new();
        let mut index = NoticeIndex::default();

        for applies_to in notices.applies_to().filter(|id| shipped.contains(id)) {
            let Some(paths) = install_paths.get(&applies_to) else {
                continue;
            };
            for resolution in notices.resolutions_for(applies_to) {
                let origin = graph.node(resolution.acts_on);
                for reference in origin.license_texts() {
                    let (path, library) = split_reference(reference);
                    let library = library
                        .map(str::to_string)
                        .unwrap_or_else(|| library_name(origin, &metadata));
                    if !texts.contains_key(path) {
                        let text = text_reader.read_license_text(path).map_err(|e| {
                            ComplianceError::LicenseTextRead {
                                path: path.into(),
                                details: e.to_string(),
                            }
                        })?;
                        texts.insert(path.to_string(), text);
                    }
                    index.insert(&texts[path], &library, paths);
                }
            }
        }
        Ok(index)
    }

    /// Install paths of every shipped node, composed through containers.
    ///
    /// Roots install where they say they do. A dependency that installs
    /// files of its own keeps them; one that does not (a static library,
    /// say) ships as part of its dependent and shares its paths. Inside a
    /// container the dependency's files are rewritten by the container's
    /// install map and placed under each of the container's paths. An edge
    /// closing a cycle contributes nothing.
    pub fn install_paths(
        graph: &LicenseGraph,
        strip_prefixes: &[String],
    ) -> BTreeMap<NodeId, BTreeSet<String>> {
        let mut paths: BTreeMap<NodeId, BTreeSet<String>> = BTreeMap::new();
        for &root in graph.roots() {
            let node = graph.node(root);
            let own = if node.installed().is_empty() {
                node.target_files()
            } else {
                node.installed()
            };
            paths.entry(root).or_default().extend(own.iter().cloned());
        }

        // parents before children; the back edge of a cycle is never followed
        let order = GraphWalker::shipped_dependency_first_order(graph);
        let mut position = vec![None; graph.len()];
        for (i, id) in order.iter().enumerate() {
            position[id.index()] = Some(i);
        }

        for &id in order.iter().rev() {
            let Some(parent_paths) = paths.get(&id).cloned() else {
                continue;
            };
            let parent = graph.node(id);
            for edge in graph.edges_from(id).filter(|e| e.kind().is_shipped()) {
                let dep_id = edge.dependency();
                if position[dep_id.index()] >= position[id.index()] {
                    continue;
                }
                let composed =
                    Self::compose(parent, graph.node(dep_id), edge.kind(), &parent_paths);
                paths.entry(dep_id).or_default().extend(composed);
            }
        }

        paths
            .into_iter()
            .map(|(id, set)| {
                let stripped = set
                    .into_iter()
                    .map(|p| strip_prefix(&p, strip_prefixes))
                    .collect();
                (id, stripped)
            })
            .collect()
    }

    fn compose(
        parent: &TargetNode,
        dep: &TargetNode,
        kind: EdgeKind,
        parent_paths: &BTreeSet<String>,
    ) -> BTreeSet<String> {
        if parent.is_container() && kind == EdgeKind::Containment {
            let mapped: Vec<String> = dep
                .target_files()
                .iter()
                .filter_map(|f| parent.install_map().iter().find_map(|m| m.map(f)))
                .collect();
            if !mapped.is_empty() {
                return parent_paths
                    .iter()
                    .flat_map(|p| {
                        mapped.iter().map(move |m| {
                            format!("{}/{}", p.trim_end_matches('/'), m.trim_start_matches('/'))
                        })
                    })
                    .collect();
            }
        }
        if dep.installed().is_empty() {
            parent_paths.clone()
        } else {
            dep.installed().iter().cloned().collect()
        }
    }
}

/// Splits `path:libname` into the text path and the optional library name.
fn split_reference(reference: &str) -> (&str, Option<&str>) {
    match reference.rsplit_once(':') {
        Some((path, library)) if !path.is_empty() && !library.is_empty() => (path, Some(library)),
        _ => (reference, None),
    }
}

/// Library name for a node without an explicit `:libname`: the metadata
/// name of the first of its projects that has one, else the module name,
/// else the file stem.
fn library_name(node: &TargetNode, metadata: &BTreeMap<String, ProjectMetadata>) -> String {
    node.projects()
        .iter()
        .filter_map(|p| metadata.get(p))
        .find_map(|m| m.name())
        .or(node.module_name())
        .map(str::to_string)
        .unwrap_or_else(|| {
            Path::new(node.short_name())
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(node.short_name())
                .to_string()
        })
}

fn strip_prefix(path: &str, prefixes: &[String]) -> String {
    prefixes
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix.as_str()))
        .unwrap_or(path)
        .to_string()
}
