use super::{ConditionSet, EdgeKind};
use serde::Deserialize;

/// Index of a node in its [`LicenseGraph`](super::LicenseGraph) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Maps files under `from_path` to `container_path` inside a container
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstallMapping {
    pub from_path: String,
    pub container_path: String,
}

impl InstallMapping {
    /// Rewrites `file` into the container if it lives under `from_path`.
    pub fn map(&self, file: &str) -> Option<String> {
        file.strip_prefix(self.from_path.as_str())
            .map(|rest| format!("{}{}", self.container_path, rest))
    }
}

/// TargetNode entity - one build artifact and its declared license facts
///
/// Created once while loading and never mutated afterwards; computed
/// condition sets live in per-call results, not on the node.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetNode {
    name: String,
    package_name: Option<String>,
    module_name: Option<String>,
    conditions: ConditionSet,
    license_texts: Vec<String>,
    is_container: bool,
    projects: Vec<String>,
    built: Vec<String>,
    installed: Vec<String>,
    install_map: Vec<InstallMapping>,
}

impl TargetNode {
    pub fn new(name: impl Into<String>, conditions: ConditionSet) -> Self {
        Self {
            name: name.into(),
            package_name: None,
            module_name: None,
            conditions,
            license_texts: Vec::new(),
            is_container: false,
            projects: Vec::new(),
            built: Vec::new(),
            installed: Vec::new(),
            install_map: Vec::new(),
        }
    }

    pub fn with_package_name(mut self, package_name: Option<String>) -> Self {
        self.package_name = package_name;
        self
    }

    pub fn with_module_name(mut self, module_name: Option<String>) -> Self {
        self.module_name = module_name;
        self
    }

    pub fn with_license_texts(mut self, license_texts: Vec<String>) -> Self {
        self.license_texts = license_texts;
        self
    }

    pub fn with_container(mut self, is_container: bool) -> Self {
        self.is_container = is_container;
        self
    }

    pub fn with_projects(mut self, projects: Vec<String>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_built(mut self, built: Vec<String>) -> Self {
        self.built = built;
        self
    }

    pub fn with_installed(mut self, installed: Vec<String>) -> Self {
        self.installed = installed;
        self
    }

    pub fn with_install_map(mut self, install_map: Vec<InstallMapping>) -> Self {
        self.install_map = install_map;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    pub fn module_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// The intrinsic conditions declared for this artifact itself.
    pub fn conditions(&self) -> ConditionSet {
        self.conditions
    }

    pub fn license_texts(&self) -> &[String] {
        &self.license_texts
    }

    pub fn is_container(&self) -> bool {
        self.is_container
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn built(&self) -> &[String] {
        &self.built
    }

    pub fn installed(&self) -> &[String] {
        &self.installed
    }

    pub fn install_map(&self) -> &[InstallMapping] {
        &self.install_map
    }

    /// Output files of the build: built files, or the installed ones when
    /// the record lists no built files.
    pub fn target_files(&self) -> &[String] {
        if self.built.is_empty() {
            &self.installed
        } else {
            &self.built
        }
    }

    /// Short display name: the metadata file name without `.meta_lic`.
    pub fn short_name(&self) -> &str {
        let base = self.name.rsplit('/').next().unwrap_or(&self.name);
        base.strip_suffix(".meta_lic").unwrap_or(base)
    }

    pub fn has_license_info(&self) -> bool {
        !self.conditions.is_empty() || !self.license_texts.is_empty()
    }
}

/// TargetEdge value object - `target` depends on `dependency`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetEdge {
    target: NodeId,
    dependency: NodeId,
    kind: EdgeKind,
}

impl TargetEdge {
    pub fn new(target: NodeId, dependency: NodeId, kind: EdgeKind) -> Self {
        Self {
            target,
            dependency,
            kind,
        }
    }

    /// The dependent end of the edge.
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn dependency(&self) -> NodeId {
        self.dependency
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
}

/// Sequence of edges from a root to the node being visited
pub type TargetPath = Vec<TargetEdge>;
