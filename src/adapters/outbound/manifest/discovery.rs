use super::{parse_csproj, parse_nuspec, parse_packages_config};
use crate::dependency_graph::domain::DependencyEdge;
use crate::ports::outbound::ManifestReader;
use crate::shared::error::DepvizError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

const PACKAGES_CONFIG: &str = "packages.config";

/// Manifest files found below one source root, in walk order
#[derive(Debug, Default)]
struct ManifestIndex {
    nuspecs: Vec<PathBuf>,
    projects: Vec<PathBuf>,
}

impl ManifestIndex {
    fn scan(root: &Path) -> Self {
        let mut index = Self::default();

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e))
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            match extension_of(entry.path()).as_deref() {
                Some("nuspec") => index.nuspecs.push(entry.into_path()),
                Some("csproj") => index.projects.push(entry.into_path()),
                _ => {}
            }
        }

        tracing::debug!(
            root = %root.display(),
            nuspecs = index.nuspecs.len(),
            projects = index.projects.len(),
            "indexed manifests"
        );
        index
    }

    /// Discovery priority: `{package}.nuspec`, `{package}.csproj`, then a
    /// lone nuspec, then a lone csproj when sole candidates are allowed
    fn find(&self, package: &str, allow_sole_candidate: bool) -> Option<&PathBuf> {
        let wanted = package.to_lowercase();

        named(&self.nuspecs, &format!("{}.nuspec", wanted))
            .or_else(|| named(&self.projects, &format!("{}.csproj", wanted)))
            .or_else(|| {
                if !allow_sole_candidate {
                    return None;
                }
                sole(&self.nuspecs).or_else(|| sole(&self.projects))
            })
    }
}

fn named<'a>(paths: &'a [PathBuf], file_name: &str) -> Option<&'a PathBuf> {
    paths
        .iter()
        .find(|p| file_name_lower(p).as_deref() == Some(file_name))
}

fn sole(paths: &[PathBuf]) -> Option<&PathBuf> {
    match paths {
        [only] => Some(only),
        _ => None,
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn file_name_lower(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_lowercase)
}

/// Build output and VCS metadata never hold the project's own manifests
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(name.as_ref(), ".git" | ".vs" | "bin" | "obj" | "node_modules")
}

/// NuGetManifestReader adapter for `.nuspec`, `.csproj` and `packages.config`
///
/// This adapter implements the ManifestReader port. Each source root is
/// walked once; later lookups for other packages in the same tree are
/// answered from the cached index.
pub struct NuGetManifestReader {
    indexes: DashMap<PathBuf, Arc<ManifestIndex>>,
}

impl NuGetManifestReader {
    pub fn new() -> Self {
        Self {
            indexes: DashMap::new(),
        }
    }

    fn index_for(&self, source_root: &Path) -> Arc<ManifestIndex> {
        if let Some(index) = self.indexes.get(source_root) {
            return Arc::clone(&index);
        }

        let index = Arc::new(ManifestIndex::scan(source_root));
        self.indexes
            .insert(source_root.to_path_buf(), Arc::clone(&index));
        index
    }

    fn read_manifest(path: &Path) -> Result<String> {
        read_regular_file(path, "project manifest")
    }

    fn parse_with<F>(path: &Path, parse: F) -> Result<Vec<DependencyEdge>>
    where
        F: FnOnce(&str) -> Result<Vec<DependencyEdge>>,
    {
        let content = Self::read_manifest(path)?;
        parse(&content).map_err(|e| {
            DepvizError::ManifestParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// A project without PackageReferences falls back to its packages.config:
    /// the sibling file first, then the first one found below the project
    fn read_project(project: &Path) -> Result<Vec<DependencyEdge>> {
        let references = Self::parse_with(project, parse_csproj)?;
        if !references.is_empty() {
            return Ok(references);
        }

        let Some(project_dir) = project.parent() else {
            return Ok(references);
        };

        let sibling = project_dir.join(PACKAGES_CONFIG);
        if sibling.is_file() {
            return Self::parse_with(&sibling, parse_packages_config);
        }

        let nested = WalkDir::new(project_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e))
            .filter_map(|e| e.ok())
            .find(|e| e.file_type().is_file() && e.file_name() == PACKAGES_CONFIG);

        match nested {
            Some(entry) => Self::parse_with(entry.path(), parse_packages_config),
            None => Ok(references),
        }
    }
}

impl Default for NuGetManifestReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader for NuGetManifestReader {
    fn locate_manifest(
        &self,
        source_root: &Path,
        package: &str,
        allow_sole_candidate: bool,
    ) -> Result<Option<PathBuf>> {
        if !source_root.is_dir() {
            return Err(DepvizError::InvalidRepoSource {
                source_ref: source_root.display().to_string(),
                reason: "not a directory".to_string(),
            }
            .into());
        }

        let index = self.index_for(source_root);
        let found = index.find(package, allow_sole_candidate).cloned();
        if let Some(path) = &found {
            tracing::debug!(package, manifest = %path.display(), "located manifest");
        }
        Ok(found)
    }

    fn read_dependencies(
        &self,
        manifest: &Path,
        target_framework: Option<&str>,
    ) -> Result<Vec<DependencyEdge>> {
        if file_name_lower(manifest).as_deref() == Some(PACKAGES_CONFIG) {
            return Self::parse_with(manifest, parse_packages_config);
        }

        match extension_of(manifest).as_deref() {
            Some("nuspec") => {
                Self::parse_with(manifest, |content| parse_nuspec(content, target_framework))
            }
            Some("csproj") => Self::read_project(manifest),
            _ => Err(DepvizError::ManifestParseError {
                path: manifest.to_path_buf(),
                details: "unsupported manifest type (expected .nuspec, .csproj or packages.config)"
                    .to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    const CSPROJ_FLUENT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <PackageReference Include="FluentAssertions" Version="6.12.0" />
  </ItemGroup>
</Project>"#;

    const CSPROJ_EMPTY: &str = "<Project><PropertyGroup /></Project>";

    const PACKAGES: &str = r#"<packages><package id="NUnit" version="3.13.3" /></packages>"#;

    #[test]
    fn test_discover_nested_csproj_and_parse() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "src/MyLib/MyLib.csproj", CSPROJ_FLUENT);

        let reader = NuGetManifestReader::new();
        let manifest = reader
            .locate_manifest(temp_dir.path(), "MyLib", true)
            .unwrap()
            .unwrap();
        let deps = reader.read_dependencies(&manifest, None).unwrap();

        assert_eq!(deps, vec![DependencyEdge::new("FluentAssertions", "6.12.0")]);
    }

    #[test]
    fn test_nuspec_preferred_over_csproj_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a/Contoso.Core.csproj", CSPROJ_FLUENT);
        let nuspec = write(
            temp_dir.path(),
            "b/contoso.core.NUSPEC",
            "<package><metadata /></package>",
        );

        let reader = NuGetManifestReader::new();
        let found = reader
            .locate_manifest(temp_dir.path(), "Contoso.Core", false)
            .unwrap();
        assert_eq!(found, Some(nuspec));
    }

    #[test]
    fn test_sole_candidate_only_when_allowed() {
        let temp_dir = TempDir::new().unwrap();
        let project = write(temp_dir.path(), "App/Something.csproj", CSPROJ_FLUENT);

        let reader = NuGetManifestReader::new();
        assert_eq!(
            reader.locate_manifest(temp_dir.path(), "Other", true).unwrap(),
            Some(project)
        );
        assert_eq!(
            reader.locate_manifest(temp_dir.path(), "Other", false).unwrap(),
            None
        );
    }

    #[test]
    fn test_ambiguous_candidates_yield_none() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "A/A.csproj", CSPROJ_FLUENT);
        write(temp_dir.path(), "B/B.csproj", CSPROJ_FLUENT);

        let reader = NuGetManifestReader::new();
        assert_eq!(
            reader.locate_manifest(temp_dir.path(), "C", true).unwrap(),
            None
        );
    }

    #[test]
    fn test_build_output_directories_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "App/obj/Release/App.nuspec", "<package />");
        let project = write(temp_dir.path(), "App/App.csproj", CSPROJ_FLUENT);

        let reader = NuGetManifestReader::new();
        assert_eq!(
            reader.locate_manifest(temp_dir.path(), "App", true).unwrap(),
            Some(project)
        );
    }

    #[test]
    fn test_csproj_falls_back_to_sibling_packages_config() {
        let temp_dir = TempDir::new().unwrap();
        let project = write(temp_dir.path(), "Legacy/Legacy.csproj", CSPROJ_EMPTY);
        write(temp_dir.path(), "Legacy/packages.config", PACKAGES);

        let reader = NuGetManifestReader::new();
        let deps = reader.read_dependencies(&project, None).unwrap();
        assert_eq!(deps, vec![DependencyEdge::new("NUnit", "3.13.3")]);
    }

    #[test]
    fn test_csproj_falls_back_to_nested_packages_config() {
        let temp_dir = TempDir::new().unwrap();
        let project = write(temp_dir.path(), "Legacy/Legacy.csproj", CSPROJ_EMPTY);
        write(temp_dir.path(), "Legacy/config/packages.config", PACKAGES);

        let reader = NuGetManifestReader::new();
        let deps = reader.read_dependencies(&project, None).unwrap();
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn test_csproj_without_any_references() {
        let temp_dir = TempDir::new().unwrap();
        let project = write(temp_dir.path(), "Empty/Empty.csproj", CSPROJ_EMPTY);

        let reader = NuGetManifestReader::new();
        assert!(reader.read_dependencies(&project, None).unwrap().is_empty());
    }

    #[test]
    fn test_read_dependencies_reports_malformed_xml() {
        let temp_dir = TempDir::new().unwrap();
        let nuspec = write(temp_dir.path(), "Bad.nuspec", "<package><metadata>");

        let reader = NuGetManifestReader::new();
        let err = reader.read_dependencies(&nuspec, None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse project manifest"));
    }

    #[test]
    fn test_read_dependencies_unsupported_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = write(temp_dir.path(), "build.props", "<Project />");

        let reader = NuGetManifestReader::new();
        assert!(reader.read_dependencies(&file, None).is_err());
    }

    #[test]
    fn test_locate_manifest_rejects_missing_root() {
        let reader = NuGetManifestReader::new();
        let result = reader.locate_manifest(Path::new("/nonexistent/source/tree"), "A", true);
        assert!(result.is_err());
    }
}
