use super::RepoMode;

/// GraphRequest - Internal request DTO for the graph building use case
///
/// Built from the merged CLI and config-file settings after validation.
#[derive(Debug, Clone)]
pub struct GraphRequest {
    /// Root package whose dependency graph is resolved
    pub package_name: String,
    /// Path or URL, interpreted according to `repo_mode`
    pub repo_source: String,
    pub repo_mode: RepoMode,
    /// Depth limit passed to the graph builder
    pub max_depth: usize,
    /// Framework filter for grouped nuspec dependencies
    pub target_framework: Option<String>,
    /// Never fall back to the package registry
    pub offline: bool,
}

impl GraphRequest {
    pub fn new(
        package_name: String,
        repo_source: String,
        repo_mode: RepoMode,
        max_depth: usize,
    ) -> Self {
        Self {
            package_name,
            repo_source,
            repo_mode,
            max_depth,
            target_framework: None,
            offline: false,
        }
    }

    pub fn with_target_framework(mut self, target_framework: Option<String>) -> Self {
        self.target_framework = target_framework;
        self
    }

    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}
