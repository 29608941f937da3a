use crate::application::dto::{Analysis, AnalysisRequest};
use crate::application::read_models::{Report, ReportBuilder};
use crate::compliance::domain::{ConditionSet, LicenseGraph};
use crate::compliance::services::{
    ConditionResolver, ConflictDetector, MetadataLoader, NoticeIndexBuilder, RelationshipBuilder,
    RestrictedTracer, SourceSharing,
};
use crate::ports::outbound::{
    LicenseTextReader, MetadataReader, ProgressReporter, ProjectMetadataRepository,
};
use crate::shared::Result;
use chrono::Utc;

/// LicenseAnalysisUseCase - orchestrates every license-graph analysis
///
/// Loads the graph reachable from the request's roots, resolves it and
/// runs the requested policy query, returning a [`Report`] for a formatter.
/// All infrastructure arrives through generic dependency injection.
///
/// # Type Parameters
/// * `MR` - MetadataReader implementation
/// * `TR` - LicenseTextReader implementation
/// * `REPO` - ProjectMetadataRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct LicenseAnalysisUseCase<MR, TR, REPO, PR> {
    metadata_reader: MR,
    license_text_reader: TR,
    project_metadata: REPO,
    progress_reporter: PR,
}

impl<MR, TR, REPO, PR> LicenseAnalysisUseCase<MR, TR, REPO, PR>
where
    MR: MetadataReader,
    TR: LicenseTextReader,
    REPO: ProjectMetadataRepository,
    PR: ProgressReporter,
{
    /// Creates a new LicenseAnalysisUseCase with injected dependencies
    pub fn new(
        metadata_reader: MR,
        license_text_reader: TR,
        project_metadata: REPO,
        progress_reporter: PR,
    ) -> Self {
        Self {
            metadata_reader,
            license_text_reader,
            project_metadata,
            progress_reporter,
        }
    }

    /// Executes `analysis` over the graph reachable from `request.roots`
    ///
    /// # Returns
    /// [`Report::NoLicenses`] when the graph loads but no node declares a
    /// condition; otherwise the report of the requested analysis. Conflicts
    /// and empty traces are data, not errors.
    ///
    /// # Errors
    /// Load errors (aggregated across files), project metadata errors, and
    /// unreadable license texts.
    pub async fn execute(&self, analysis: Analysis, request: &AnalysisRequest) -> Result<Report> {
        // Step 1: Load the license graph
        let graph = self.load_graph(&request.roots)?;
        if !graph.has_licenses() {
            self.progress_reporter
                .report_error("⚠️  No licenses found in the requested metadata files.");
            return Ok(Report::NoLicenses);
        }

        // Step 2: Run the requested policy query
        self.progress_reporter.report(analysis.progress_message());
        let report = match analysis {
            Analysis::Conditions => self.conditions(&graph),
            Analysis::CheckShare => self.check_share(&graph),
            Analysis::ListShare => self.list_share(&graph),
            Analysis::TraceRestricted => self.trace_restricted(&graph, &request.sources),
            Analysis::Notice => self.notice(&graph, request).await?,
            Analysis::Relationships => self.relationships(&graph, request).await?,
        };
        Ok(report)
    }

    /// Loads the graph, reporting each file as it is read
    fn load_graph(&self, roots: &[String]) -> Result<LicenseGraph> {
        self.progress_reporter
            .report("📖 Loading license metadata...");

        let loader = MetadataLoader::new(&self.metadata_reader);
        let graph = loader.load_with_progress(roots, |loaded, discovered, file| {
            self.progress_reporter
                .report_progress(loaded, discovered, Some(file));
        })?;

        self.progress_reporter.report_completion(&format!(
            "✅ Loaded {} license metadata file(s)",
            graph.len()
        ));
        Ok(graph)
    }

    fn conditions(&self, graph: &LicenseGraph) -> Report {
        let resolved = ConditionResolver::resolve(graph);
        ReportBuilder::conditions(graph, &resolved)
    }

    fn check_share(&self, graph: &LicenseGraph) -> Report {
        let resolved = ConditionResolver::resolve(graph);
        let conflicts = ConflictDetector::detect(graph, &resolved);

        for conflict in &conflicts {
            let view = conflict.view(graph);
            self.progress_reporter.report_error(&format!(
                "❌ {} must be kept private ({}) but its source must be shared ({})",
                view.target, view.privacy_condition, view.sharing_condition
            ));
        }
        ReportBuilder::share_check(graph, &conflicts)
    }

    fn list_share(&self, graph: &LicenseGraph) -> Report {
        let resolved = ConditionResolver::resolve(graph);
        let resolutions = SourceSharing::resolve(graph, &resolved);
        Report::ShareList(SourceSharing::projects(graph, &resolutions))
    }

    fn trace_restricted(&self, graph: &LicenseGraph, sources: &[String]) -> Report {
        let trace = RestrictedTracer::trace(graph, sources);
        if trace.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  0 targets restricted by {} source(s)\n\n💡 Hint: Check the --sources values for typos; they must name a metadata file, target or project directory",
                sources.len()
            ));
        } else {
            self.progress_reporter.report_completion(&format!(
                "✅ {} target(s) restricted by {} matching source(s)",
                trace.entries.len(),
                trace.sources.len()
            ));
        }
        ReportBuilder::trace(graph, &trace, sources)
    }

    async fn notice(&self, graph: &LicenseGraph, request: &AnalysisRequest) -> Result<Report> {
        let resolved = ConditionResolver::resolve(graph);
        let resolutions =
            ConditionResolver::resolutions(graph, &resolved, ConditionSet::IMPLIES_NOTICE);

        let index = NoticeIndexBuilder::build(
            graph,
            &resolutions,
            &self.license_text_reader,
            &self.project_metadata,
            &request.strip_prefixes,
        )
        .await?;

        self.progress_reporter.report_completion(&format!(
            "✅ Collected {} distinct license text(s) for {} install path(s)",
            index.len(),
            index.install_paths().count()
        ));
        Ok(ReportBuilder::notice(&index, request.product.clone(), Utc::now()))
    }

    async fn relationships(
        &self,
        graph: &LicenseGraph,
        request: &AnalysisRequest,
    ) -> Result<Report> {
        let relationships = RelationshipBuilder::relationships(graph);
        let projects = self.project_metadata.get(&graph.projects()).await?;

        Ok(ReportBuilder::relationships(
            graph,
            &relationships,
            &projects,
            request.product.clone(),
            Utc::now(),
        ))
    }
}
