use crate::dependency_graph::domain::DependencyEdge;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// ManifestReader port for package manifests inside a source tree
///
/// This port abstracts manifest discovery and the manifest dialects
/// (nuspec, csproj, packages.config) behind two calls.
pub trait ManifestReader {
    /// Finds the manifest describing `package` under `source_root`
    ///
    /// # Arguments
    /// * `source_root` - Root directory of the source tree
    /// * `package` - Package identifier to look for
    /// * `allow_sole_candidate` - Whether a lone manifest with a different
    ///   name may stand in for the package (used for the root package only)
    ///
    /// # Returns
    /// The manifest path, or `None` if the tree has no manifest for it
    fn locate_manifest(
        &self,
        source_root: &Path,
        package: &str,
        allow_sole_candidate: bool,
    ) -> Result<Option<PathBuf>>;

    /// Reads the direct dependencies declared by a manifest
    ///
    /// # Arguments
    /// * `manifest` - Path returned by [`ManifestReader::locate_manifest`]
    /// * `target_framework` - Optional framework filter for grouped dependencies
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid manifest
    fn read_dependencies(
        &self,
        manifest: &Path,
        target_framework: Option<&str>,
    ) -> Result<Vec<DependencyEdge>>;
}
