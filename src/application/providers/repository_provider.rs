use crate::dependency_graph::domain::{DependencyEdge, DependencyProvider};
use crate::ports::outbound::ManifestReader;
use crate::shared::Result;
use std::path::Path;

/// RepositoryProvider answers edge queries from a source tree
///
/// Lookup order for a package:
/// 1. the root package: the edges read from its manifest up front
/// 2. a manifest named exactly after the package in the same tree
/// 3. the registry fallback, when one is configured
/// 4. no edges
pub struct RepositoryProvider<'a, MR: ManifestReader + ?Sized> {
    manifest_reader: &'a MR,
    source_root: &'a Path,
    root_package: String,
    root_edges: Vec<DependencyEdge>,
    target_framework: Option<String>,
    registry: Option<&'a dyn DependencyProvider>,
}

impl<'a, MR: ManifestReader + ?Sized> RepositoryProvider<'a, MR> {
    pub fn new(
        manifest_reader: &'a MR,
        source_root: &'a Path,
        root_package: impl Into<String>,
        root_edges: Vec<DependencyEdge>,
    ) -> Self {
        Self {
            manifest_reader,
            source_root,
            root_package: root_package.into(),
            root_edges,
            target_framework: None,
            registry: None,
        }
    }

    pub fn with_target_framework(mut self, target_framework: Option<String>) -> Self {
        self.target_framework = target_framework;
        self
    }

    /// Packages without a manifest in the tree are looked up here
    pub fn with_registry(mut self, registry: Option<&'a dyn DependencyProvider>) -> Self {
        self.registry = registry;
        self
    }
}

impl<MR: ManifestReader + ?Sized> DependencyProvider for RepositoryProvider<'_, MR> {
    fn edges_of(&self, package_id: &str) -> Result<Vec<DependencyEdge>> {
        if package_id == self.root_package {
            return Ok(self.root_edges.clone());
        }

        if let Some(manifest) =
            self.manifest_reader
                .locate_manifest(self.source_root, package_id, false)?
        {
            return self
                .manifest_reader
                .read_dependencies(&manifest, self.target_framework.as_deref());
        }

        match self.registry {
            Some(registry) => registry.edges_of(package_id),
            None => Ok(Vec::new()),
        }
    }
}
