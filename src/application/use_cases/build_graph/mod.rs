use crate::application::dto::{GraphRequest, GraphResponse, RepoMode, SourceKind};
use crate::application::providers::RepositoryProvider;
use crate::dependency_graph::domain::{
    DependencyEdge, DependencyGraph, DependencyProvider, SyntheticRepository,
};
use crate::ports::outbound::{
    ManifestReader, ProgressReporter, SourceFetcher, SyntheticRepositoryReader,
};
use crate::shared::error::DepvizError;
use crate::shared::Result;
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// BuildGraphUseCase - Core use case for dependency graph resolution
///
/// Resolves the repository source into a dependency provider and runs the
/// graph builder over it:
///
/// - `local-path` pointing at a file: the file is a test repository
///   (`NODE: DEP ...` lines)
/// - `local-path` pointing at a directory: a source tree searched for
///   NuGet manifests
/// - `remote-url`: the repository archive is downloaded into a temporary
///   directory and searched like a local tree
///
/// # Type Parameters
/// * `SRR` - SyntheticRepositoryReader implementation
/// * `MR` - ManifestReader implementation
/// * `SF` - SourceFetcher implementation
/// * `PR` - ProgressReporter implementation
/// * `REG` - DependencyProvider used as registry fallback (optional)
pub struct BuildGraphUseCase<SRR, MR, SF, PR, REG> {
    repository_reader: SRR,
    manifest_reader: MR,
    source_fetcher: SF,
    progress_reporter: PR,
    registry: Option<REG>,
}

impl<SRR, MR, SF, PR, REG> BuildGraphUseCase<SRR, MR, SF, PR, REG>
where
    SRR: SyntheticRepositoryReader,
    MR: ManifestReader,
    SF: SourceFetcher,
    PR: ProgressReporter,
    REG: DependencyProvider,
{
    /// Creates a new BuildGraphUseCase with injected dependencies
    pub fn new(
        repository_reader: SRR,
        manifest_reader: MR,
        source_fetcher: SF,
        progress_reporter: PR,
        registry: Option<REG>,
    ) -> Self {
        Self {
            repository_reader,
            manifest_reader,
            source_fetcher,
            progress_reporter,
            registry,
        }
    }

    /// Executes the graph building use case
    ///
    /// # Errors
    /// Returns an error if the repository source cannot be read or fetched,
    /// or if a source tree has no manifest for the root package. Failures
    /// while resolving individual dependencies only produce warnings.
    pub fn execute(&self, request: GraphRequest) -> Result<GraphResponse> {
        let response = match request.repo_mode {
            RepoMode::LocalPath => self.build_from_local_path(&request)?,
            RepoMode::RemoteUrl => self.build_from_remote(&request)?,
        };

        self.report_summary(&response.graph);
        Ok(response)
    }

    fn build_from_local_path(&self, request: &GraphRequest) -> Result<GraphResponse> {
        let path = Path::new(&request.repo_source);

        if path.is_file() {
            return self.build_from_synthetic_repository(request, path);
        }
        if path.is_dir() {
            let (graph, manifest) = self.build_from_source_tree(request, path)?;
            return Ok(GraphResponse::new(
                graph,
                request.package_name.clone(),
                SourceKind::SourceTree(manifest),
            ));
        }

        Err(DepvizError::InvalidRepoSource {
            source_ref: request.repo_source.clone(),
            reason: "path does not exist".to_string(),
        }
        .into())
    }

    fn build_from_synthetic_repository(
        &self,
        request: &GraphRequest,
        path: &Path,
    ) -> Result<GraphResponse> {
        let content = self.repository_reader.read_repository(path)?;
        let repository = SyntheticRepository::parse(&content);

        self.progress_reporter.report(&format!(
            "📖 Loaded test repository with {} package(s): {}",
            repository.len(),
            path.display()
        ));
        if !repository.contains(&request.package_name) {
            self.progress_reporter.report_error(&format!(
                "⚠️  Package '{}' is not defined in the test repository; it will have no dependencies",
                request.package_name
            ));
        }

        let graph = self.build_with_progress(&request.package_name, &repository, request.max_depth);
        Ok(GraphResponse::new(
            graph,
            request.package_name.clone(),
            SourceKind::SyntheticRepository(path.to_path_buf()),
        ))
    }

    fn build_from_remote(&self, request: &GraphRequest) -> Result<GraphResponse> {
        let workspace = tempfile::TempDir::new()?;

        self.progress_reporter.report(&format!(
            "🌐 Downloading repository: {}",
            request.repo_source
        ));
        let source_root = self
            .source_fetcher
            .fetch(&request.repo_source, workspace.path())?;

        // The temporary checkout is dropped once the graph holds everything
        let (graph, _) = self.build_from_source_tree(request, &source_root)?;
        Ok(GraphResponse::new(
            graph,
            request.package_name.clone(),
            SourceKind::RemoteArchive(request.repo_source.clone()),
        ))
    }

    fn build_from_source_tree(
        &self,
        request: &GraphRequest,
        source_root: &Path,
    ) -> Result<(DependencyGraph, PathBuf)> {
        let manifest = self
            .manifest_reader
            .locate_manifest(source_root, &request.package_name, true)?
            .ok_or_else(|| DepvizError::ManifestNotFound {
                path: source_root.to_path_buf(),
                package: request.package_name.clone(),
                suggestion: format!(
                    "Add {0}.nuspec or {0}.csproj to the repository, or point the source at the directory containing it",
                    request.package_name
                ),
            })?;

        self.progress_reporter
            .report(&format!("📄 Using manifest: {}", manifest.display()));

        let target_framework = request.target_framework.as_deref();
        let root_edges = self
            .manifest_reader
            .read_dependencies(&manifest, target_framework)?;

        let registry = if request.offline {
            None
        } else {
            self.registry
                .as_ref()
                .map(|registry| registry as &dyn DependencyProvider)
        };

        let provider = RepositoryProvider::new(
            &self.manifest_reader,
            source_root,
            request.package_name.as_str(),
            root_edges,
        )
        .with_target_framework(request.target_framework.clone())
        .with_registry(registry);

        let graph = self.build_with_progress(&request.package_name, &provider, request.max_depth);
        Ok((graph, manifest))
    }

    /// Runs the builder, ticking the progress reporter once per expanded package
    fn build_with_progress<P>(&self, root: &str, provider: &P, max_depth: usize) -> DependencyGraph
    where
        P: DependencyProvider + ?Sized,
    {
        let resolved = Cell::new(0usize);
        let tracked = |package_id: &str| -> Result<Vec<DependencyEdge>> {
            let edges = provider.edges_of(package_id);
            resolved.set(resolved.get() + 1);
            self.progress_reporter.report_tick(resolved.get(), package_id);
            edges
        };

        DependencyGraph::build(root, &tracked, max_depth)
    }

    fn report_summary(&self, graph: &DependencyGraph) {
        if graph.is_truncated() {
            self.progress_reporter.report_error(&format!(
                "⚠️  {} package(s) beyond the depth limit of {} were not expanded",
                graph.truncated_nodes().len(),
                graph.max_depth().unwrap_or_default()
            ));
        }
        if graph.has_cycles() {
            self.progress_reporter.report_error(&format!(
                "⚠️  {} dependency cycle(s) detected",
                graph.cycles().len()
            ));
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} package(s) with {} edge(s)",
            graph.node_count(),
            graph.edge_count()
        ));
    }
}
