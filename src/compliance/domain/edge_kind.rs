use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// EdgeKind - the nature of a dependency edge, parsed from its annotation tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Statically linked; also the kind of an edge with no annotation at all
    Static,
    Dynamic,
    /// A compiler or other tool used to produce the dependent
    Toolchain,
    /// The dependent packages the dependency (archive, APEX, image)
    Containment,
    /// A program run during the build, not shipped with the dependent
    BuildTool,
    /// A separate program the dependent needs at run time
    Runtime,
}

impl EdgeKind {
    pub fn name(self) -> &'static str {
        match self {
            EdgeKind::Static => "static",
            EdgeKind::Dynamic => "dynamic",
            EdgeKind::Toolchain => "toolchain",
            EdgeKind::Containment => "containment",
            EdgeKind::BuildTool => "build_tool",
            EdgeKind::Runtime => "runtime",
        }
    }

    /// Edges along which the dependency ships with the dependent.
    pub fn is_shipped(self) -> bool {
        !matches!(self, EdgeKind::Toolchain | EdgeKind::BuildTool)
    }

    /// Resolves an edge's annotation tags to a single kind.
    ///
    /// No tags means a plain derivation (static). Repeated tags naming the
    /// same kind are fine; tags naming two different kinds are returned as
    /// `Err` with the sorted distinct kinds so the caller can report them.
    pub fn from_annotations<S: AsRef<str>>(tags: &[S]) -> Result<Self, AnnotationError> {
        let mut kinds: Vec<EdgeKind> = Vec::new();
        for tag in tags {
            let kind = tag
                .as_ref()
                .parse::<EdgeKind>()
                .map_err(AnnotationError::Unknown)?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds.sort();
        match kinds.as_slice() {
            [] => Ok(EdgeKind::Static),
            [kind] => Ok(*kind),
            _ => Err(AnnotationError::Conflicting(kinds)),
        }
    }
}

/// Why a set of annotation tags could not be resolved to one [`EdgeKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    Unknown(String),
    Conflicting(Vec<EdgeKind>),
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" => Ok(EdgeKind::Static),
            "dynamic" => Ok(EdgeKind::Dynamic),
            "toolchain" => Ok(EdgeKind::Toolchain),
            "containment" | "derivation" => Ok(EdgeKind::Containment),
            "build_tool" | "build-tool" => Ok(EdgeKind::BuildTool),
            "runtime" | "runtime_dependency" | "runtime-dependency" => Ok(EdgeKind::Runtime),
            _ => Err(format!("Unknown dependency annotation: {}", s)),
        }
    }
}
