use depviz::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock ManifestReader holding manifests in memory
///
/// Manifests are addressed as `{id}.nuspec`; the first registered manifest
/// also serves as the sole candidate for the root package.
#[derive(Default)]
pub struct MockManifestReader {
    manifests: HashMap<String, Vec<DependencyEdge>>,
    first: Option<String>,
}

impl MockManifestReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(mut self, package: &str, dependencies: &[&str]) -> Self {
        self.first.get_or_insert_with(|| package.to_string());
        self.manifests.insert(
            package.to_string(),
            dependencies
                .iter()
                .map(|id| DependencyEdge::new(*id, "1.0.0"))
                .collect(),
        );
        self
    }
}

impl ManifestReader for MockManifestReader {
    fn locate_manifest(
        &self,
        _source_root: &Path,
        package: &str,
        allow_sole_candidate: bool,
    ) -> Result<Option<PathBuf>> {
        if self.manifests.contains_key(package) {
            return Ok(Some(PathBuf::from(format!("{}.nuspec", package))));
        }
        if allow_sole_candidate && self.manifests.len() == 1 {
            return Ok(self
                .first
                .as_ref()
                .map(|id| PathBuf::from(format!("{}.nuspec", id))));
        }
        Ok(None)
    }

    fn read_dependencies(
        &self,
        manifest: &Path,
        _target_framework: Option<&str>,
    ) -> Result<Vec<DependencyEdge>> {
        let id = manifest
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        self.manifests
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no manifest registered for {}", id))
    }
}
