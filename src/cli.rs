use clap::{Parser, Subcommand};
use std::path::Path;

use crate::application::dto::{Analysis, OutputFormat};
use crate::shared::error::ComplianceError;
use crate::shared::security::read_text_file;
use crate::shared::Result;

/// Response files may name further response files, up to this depth
const MAX_RESPONSE_FILE_DEPTH: usize = 8;

/// License-compliance analysis over build dependency graphs
#[derive(Parser, Debug)]
#[command(name = "license-graph")]
#[command(version)]
#[command(
    about = "Resolve license conditions over a graph of .meta_lic files and check source-sharing obligations",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Prefix to strip from reported install paths (repeatable)
    #[arg(long = "strip-prefix", value_name = "PREFIX")]
    pub strip_prefix: Vec<String>,

    /// Output format: text or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to a config file (defaults to ./license-graph.config.yml if present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Root metadata files; `@file` reads more arguments from a response file
    #[arg(required = true, value_name = "ROOTS")]
    pub roots: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective license conditions of every target
    Conditions {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Check for targets that must be both kept private and shared (PASS/FAIL)
    Checkshare {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// List the projects whose source must be shared, with the reasons
    Listshare {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Trace which shipped targets a restriction on the given sources reaches
    Rtrace {
        /// Projects, targets or metadata files to treat as restricted
        #[arg(long, value_delimiter = ',', required = true, value_name = "SOURCE")]
        sources: Vec<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Collect the license texts to ship, indexed by install path
    Notice {
        /// Product name recorded in the output
        #[arg(long)]
        product: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// List packages and their SPDX-style relationships
    Relationships {
        /// Product name recorded in the output
        #[arg(long)]
        product: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

impl Command {
    pub fn analysis(&self) -> Analysis {
        match self {
            Command::Conditions { .. } => Analysis::Conditions,
            Command::Checkshare { .. } => Analysis::CheckShare,
            Command::Listshare { .. } => Analysis::ListShare,
            Command::Rtrace { .. } => Analysis::TraceRestricted,
            Command::Notice { .. } => Analysis::Notice,
            Command::Relationships { .. } => Analysis::Relationships,
        }
    }

    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Conditions { common }
            | Command::Checkshare { common }
            | Command::Listshare { common }
            | Command::Rtrace { common, .. }
            | Command::Notice { common, .. }
            | Command::Relationships { common, .. } => common,
        }
    }

    pub fn sources(&self) -> &[String] {
        match self {
            Command::Rtrace { sources, .. } => sources,
            _ => &[],
        }
    }

    pub fn product(&self) -> Option<&str> {
        match self {
            Command::Notice { product, .. } | Command::Relationships { product, .. } => {
                product.as_deref()
            }
            _ => None,
        }
    }

    /// The notice index is a document for other tools, so it defaults to JSON.
    pub fn default_format(&self) -> OutputFormat {
        match self {
            Command::Notice { .. } => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.common().format.unwrap_or_else(|| self.default_format())
    }
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Expands `@file` arguments into the whitespace-separated arguments the
/// file contains. Response files may refer to other response files.
///
/// # Errors
/// Fails if a response file cannot be read or response files nest too deeply.
pub fn expand_response_files(args: &[String]) -> Result<Vec<String>> {
    let mut expanded = Vec::new();
    expand_into(args, 0, &mut expanded)?;
    Ok(expanded)
}

fn expand_into(args: &[String], depth: usize, expanded: &mut Vec<String>) -> Result<()> {
    for arg in args {
        let Some(file) = arg.strip_prefix('@') else {
            expanded.push(arg.clone());
            continue;
        };
        if depth >= MAX_RESPONSE_FILE_DEPTH {
            return Err(ComplianceError::InvalidArgument {
                message: format!(
                    "Response files nested more than {} deep at {}",
                    MAX_RESPONSE_FILE_DEPTH, arg
                ),
            }
            .into());
        }
        let content = read_text_file(Path::new(file), "response file").map_err(|e| {
            ComplianceError::FileReadError {
                path: file.into(),
                details: e.to_string(),
            }
        })?;
        let nested: Vec<String> = content.split_whitespace().map(str::to_string).collect();
        expand_into(&nested, depth + 1, expanded)?;
    }
    Ok(())
}
