/// How the repository source string is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepoMode {
    /// A test repository file or a source tree on disk (default)
    #[default]
    LocalPath,
    /// A repository URL downloaded before resolution
    RemoteUrl,
}

impl std::str::FromStr for RepoMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local-path" | "local" => Ok(RepoMode::LocalPath),
            "remote-url" | "remote" => Ok(RepoMode::RemoteUrl),
            _ => Err(format!(
                "Invalid repository mode: {}. Please specify 'local-path' or 'remote-url'",
                s
            )),
        }
    }
}

impl std::fmt::Display for RepoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoMode::LocalPath => write!(f, "local-path"),
            RepoMode::RemoteUrl => write!(f, "remote-url"),
        }
    }
}
