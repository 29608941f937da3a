mod adapters;
mod application;
mod cli;
mod compliance;
mod config;
mod ports;
mod shared;

use adapters::outbound::cache::ProjectMetadataIndex;
use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::FileSystemReader;
use application::dto::{Analysis, AnalysisRequest};
use application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use application::read_models::Report;
use application::use_cases::LicenseAnalysisUseCase;
use cli::{expand_response_files, Args, Command};
use config::ConfigFile;
use owo_colors::OwoColorize;
use shared::error::{ComplianceError, ExitCode};
use shared::Result;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            let exit_code = e
                .downcast_ref::<ComplianceError>()
                .map(ComplianceError::exit_code)
                .unwrap_or(ExitCode::ApplicationError);
            process::exit(exit_code.as_i32());
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Parse command-line arguments
    let args = Args::parse_args();
    let command = &args.command;
    let common = command.common();

    // Load configuration; flags override it
    let config = load_config(common.config.as_deref())?;
    let request = build_request(command, &config)?;

    // Create adapters (Dependency Injection)
    let progress_reporter = if common.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };
    let concurrency = config
        .project_metadata_concurrency
        .unwrap_or(ProjectMetadataIndex::<FileSystemReader>::DEFAULT_CONCURRENCY);
    let project_metadata = ProjectMetadataIndex::new(FileSystemReader::new(), concurrency);

    // Create use case with injected dependencies
    let use_case = LicenseAnalysisUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        project_metadata,
        progress_reporter,
    );

    // Execute use case
    let analysis = command.analysis();
    let report = use_case.execute(analysis, &request).await?;

    // Format and present output
    let format = command.format();
    if !common.quiet {
        eprintln!("{}", FormatterFactory::progress_message(format));
    }
    let formatter = FormatterFactory::create(format);
    let output = formatter.format(&report)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(common.output.as_deref()));
    presenter.present(&output)?;

    if analysis == Analysis::CheckShare {
        print_verdict(&report);
    }
    Ok(report.exit_code())
}

fn load_config(explicit: Option<&str>) -> Result<ConfigFile> {
    let config = match explicit {
        Some(path) => Some(config::load_config_from_path(Path::new(path))?),
        None => config::discover_config(Path::new("."))?,
    };
    Ok(config.unwrap_or_default())
}

fn build_request(command: &Command, config: &ConfigFile) -> Result<AnalysisRequest> {
    let common = command.common();

    let roots = expand_response_files(&common.roots)?;
    if roots.is_empty() {
        return Err(ComplianceError::NoFilesRequested.into());
    }

    if let Some(prefix) = common.strip_prefix.iter().find(|p| p.trim().is_empty()) {
        return Err(ComplianceError::InvalidArgument {
            message: format!("--strip-prefix must not be empty (got {:?})", prefix),
        }
        .into());
    }
    let strip_prefixes = if common.strip_prefix.is_empty() {
        config.strip_prefix.clone().unwrap_or_default()
    } else {
        common.strip_prefix.clone()
    };

    let product = command
        .product()
        .map(str::to_string)
        .or_else(|| config.product.clone());

    Ok(AnalysisRequest::new(roots)
        .with_strip_prefixes(strip_prefixes)
        .with_sources(command.sources().to_vec())
        .with_product(product))
}

fn print_verdict(report: &Report) {
    if report.passed() {
        eprintln!("{}", "✅ PASS: no source-sharing/privacy conflicts".green());
    } else {
        eprintln!("{}", "❌ FAIL: source-sharing/privacy conflicts found".red());
    }
}
