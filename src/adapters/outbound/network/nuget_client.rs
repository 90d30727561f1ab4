use super::build_client;
use crate::adapters::outbound::manifest::parse_nuspec;
use crate::dependency_graph::domain::{DependencyEdge, DependencyProvider};
use crate::shared::error::DepvizError;
use crate::shared::Result;
use dashmap::DashMap;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::thread;
use std::time::Duration;

/// NuGet V3 flat container endpoint on nuget.org
pub const DEFAULT_REGISTRY_URL: &str = "https://api.nuget.org/v3-flatcontainer";

#[derive(Debug, Deserialize)]
struct VersionIndex {
    #[serde(default)]
    versions: Vec<String>,
}

/// NuGetClient adapter for the NuGet V3 flat container API
///
/// - `GET {base}/{id}/index.json` lists versions, oldest first
/// - `GET {base}/{id}/{version}/{id}.nuspec` returns the package manifest
///
/// Ids are lower-cased as the API requires. The version picked for each
/// package is cached, so a package reached from several parents costs one
/// index lookup. Implements [`DependencyProvider`] by reading the latest
/// version's nuspec.
pub struct NuGetClient {
    client: Client,
    base_url: String,
    target_framework: Option<String>,
    max_retries: u32,
    version_cache: DashMap<String, String>,
}

impl NuGetClient {
    const MAX_RETRIES: u32 = 3;
    const RETRY_BACKOFF_MS: u64 = 200;

    /// Creates a client for the registry at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_client(build_client()?, base_url))
    }

    pub(crate) fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            target_framework: None,
            max_retries: Self::MAX_RETRIES,
            version_cache: DashMap::new(),
        }
    }

    /// Restricts grouped nuspec dependencies to one target framework
    pub fn with_target_framework(mut self, target_framework: Option<String>) -> Self {
        self.target_framework = target_framework;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists the published versions of a package, oldest first
    pub fn package_versions(&self, package_id: &str) -> Result<Vec<String>> {
        let url = self.versions_url(package_id)?;
        let body = self.get_text(&url)?;
        let index: VersionIndex = serde_json::from_str(&body).map_err(|e| {
            DepvizError::FetchError {
                url: url.clone(),
                details: format!("invalid version index: {}", e),
            }
        })?;
        Ok(index.versions)
    }

    /// Latest published version (the last one listed), if any
    pub fn latest_version(&self, package_id: &str) -> Result<Option<String>> {
        Ok(self.package_versions(package_id)?.pop())
    }

    /// Downloads the nuspec of one package version
    pub fn fetch_nuspec(&self, package_id: &str, version: &str) -> Result<String> {
        let url = self.nuspec_url(package_id, version)?;
        self.get_text(&url)
    }

    /// Direct dependencies of a package version; the latest version when `None`
    pub fn package_dependencies(
        &self,
        package_id: &str,
        version: Option<&str>,
    ) -> Result<Vec<DependencyEdge>> {
        let version = match version {
            Some(version) => version.to_string(),
            None => self.latest_version(package_id)?.ok_or_else(|| {
                anyhow::anyhow!("Package '{}' has no published versions", package_id)
            })?,
        };

        let nuspec = self.fetch_nuspec(package_id, &version)?;
        parse_nuspec(&nuspec, self.target_framework.as_deref())
    }

    fn resolve_version(&self, package_id: &str) -> Result<Option<String>> {
        let key = package_id.to_lowercase();
        if let Some(cached) = self.version_cache.get(&key) {
            return Ok(Some(cached.clone()));
        }

        let latest = self.latest_version(package_id)?;
        if let Some(version) = &latest {
            self.version_cache.insert(key, version.clone());
        }
        Ok(latest)
    }

    fn versions_url(&self, package_id: &str) -> Result<String> {
        Self::validate_url_component(package_id, "Package id")?;
        let id = package_id.to_lowercase();
        Ok(format!(
            "{}/{}/index.json",
            self.base_url,
            urlencoding::encode(&id)
        ))
    }

    fn nuspec_url(&self, package_id: &str, version: &str) -> Result<String> {
        Self::validate_url_component(package_id, "Package id")?;
        Self::validate_url_component(version, "Version")?;
        let id = urlencoding::encode(&package_id.to_lowercase()).into_owned();
        let version = version.to_lowercase();
        Ok(format!(
            "{}/{}/{}/{}.nuspec",
            self.base_url,
            id,
            urlencoding::encode(&version),
            id
        ))
    }

    /// Rejects components that could escape their path segment
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        if component.is_empty() {
            anyhow::bail!("{} must not be empty", component_type);
        }

        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "Security: {} contains path separators which are not allowed",
                component_type
            );
        }

        if component.contains("..") {
            anyhow::bail!(
                "Security: {} contains '..' which is not allowed",
                component_type
            );
        }

        if component.contains('#') || component.contains('?') || component.contains('@') {
            anyhow::bail!(
                "Security: {} contains URL-unsafe characters",
                component_type
            );
        }

        Ok(())
    }

    /// GET with retry on transport errors and server errors
    ///
    /// Client errors (404 included) are final and returned at once.
    fn get_text(&self, url: &str) -> Result<String> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_retries {
            match self.client.get(url).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.text()?);
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(DepvizError::FetchError {
                            url: url.to_string(),
                            details: "not found (404)".to_string(),
                        }
                        .into());
                    }
                    if status.is_client_error() {
                        return Err(DepvizError::FetchError {
                            url: url.to_string(),
                            details: format!("registry returned status code {}", status),
                        }
                        .into());
                    }
                    last_error = format!("registry returned status code {}", status);
                }
                Err(e) => last_error = e.to_string(),
            }

            if attempt < self.max_retries {
                tracing::debug!(url, attempt, error = %last_error, "retrying registry request");
                thread::sleep(Duration::from_millis(
                    Self::RETRY_BACKOFF_MS * attempt as u64,
                ));
            }
        }

        Err(DepvizError::FetchError {
            url: url.to_string(),
            details: last_error,
        }
        .into())
    }
}

impl DependencyProvider for NuGetClient {
    fn edges_of(&self, package_id: &str) -> Result<Vec<DependencyEdge>> {
        match self.resolve_version(package_id)? {
            Some(version) => self.package_dependencies(package_id, Some(&version)),
            None => Ok(Vec::new()),
        }
    }
}
