//! Configuration file support for depviz.
//!
//! Provides YAML-based configuration through `depviz.config.yml` files,
//! the merge of command-line values over file values, and validation of
//! the merged result into [`Settings`].

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::adapters::outbound::network::DEFAULT_REGISTRY_URL;
use crate::application::dto::{GraphRequest, OutputMode, RepoMode};
use crate::dependency_graph::domain::PackageName;
use crate::dependency_graph::services::DEFAULT_MAX_DEPTH;
use crate::shared::error::DepvizError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "depviz.config.yml";

/// Top-level configuration file schema.
///
/// Every field is optional; the same shape carries command-line overrides
/// so that both sources merge field by field.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    pub package_name: Option<String>,
    pub repo_source: Option<String>,
    pub test_repo_mode: Option<String>,
    pub output_mode: Option<String>,
    pub max_depth: Option<usize>,
    pub target_framework: Option<String>,
    pub registry_url: Option<String>,
    pub offline: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Fields set in `overrides` replace the ones in `self`
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            package_name: overrides.package_name.or(self.package_name),
            repo_source: overrides.repo_source.or(self.repo_source),
            test_repo_mode: overrides.test_repo_mode.or(self.test_repo_mode),
            output_mode: overrides.output_mode.or(self.output_mode),
            max_depth: overrides.max_depth.or(self.max_depth),
            target_framework: overrides.target_framework.or(self.target_framework),
            registry_url: overrides.registry_url.or(self.registry_url),
            offline: overrides.offline.or(self.offline),
            unknown_fields: self.unknown_fields,
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Validated, fully-resolved run parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub package_name: PackageName,
    /// Absolute path for `local-path`, the URL as given for `remote-url`
    pub repo_source: String,
    pub repo_mode: RepoMode,
    pub output_mode: OutputMode,
    pub max_depth: usize,
    pub target_framework: Option<String>,
    pub registry_url: String,
    pub offline: bool,
}

impl Settings {
    /// Validates a merged configuration
    ///
    /// Every problem is collected so the user sees all of them at once.
    pub fn from_config(config: &ConfigFile) -> Result<Settings> {
        let mut errors: Vec<String> = Vec::new();

        let package_name = match config.package_name.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(
                    "package_name is required (use --package or set it in the config file)"
                        .to_string(),
                );
                None
            }
            Some(name) => match PackageName::new(name.to_string()) {
                Ok(name) => Some(name),
                Err(e) => {
                    errors.push(e.to_string());
                    None
                }
            },
        };

        let repo_mode = match config.test_repo_mode.as_deref() {
            None => Some(RepoMode::default()),
            Some(mode) => match mode.parse::<RepoMode>() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
        };

        let output_mode = match config.output_mode.as_deref() {
            None => OutputMode::default(),
            Some(mode) => mode.parse::<OutputMode>().unwrap_or_else(|e| {
                errors.push(e);
                OutputMode::default()
            }),
        };

        let max_depth = config.max_depth.unwrap_or(DEFAULT_MAX_DEPTH);
        if max_depth == 0 {
            errors.push("max_depth must be at least 1".to_string());
        }

        let repo_source = match (config.repo_source.as_deref().map(str::trim), repo_mode) {
            (None | Some(""), _) => {
                errors.push(
                    "repo_source is required (use --source or set it in the config file)"
                        .to_string(),
                );
                None
            }
            (Some(source), Some(RepoMode::LocalPath)) => match validate_local_path(source) {
                Ok(path) => Some(path.display().to_string()),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            (Some(source), Some(RepoMode::RemoteUrl)) => match validate_remote_url(source) {
                Ok(()) => Some(source.to_string()),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            // Mode already reported as invalid
            (Some(_), None) => None,
        };

        let registry_url = config
            .registry_url
            .clone()
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
        if let Err(e) = validate_registry_url(&registry_url) {
            errors.push(e);
        }

        let target_framework = config
            .target_framework
            .as_deref()
            .map(str::trim)
            .filter(|tf| !tf.is_empty())
            .map(str::to_string);

        match (package_name, repo_source, repo_mode) {
            (Some(package_name), Some(repo_source), Some(repo_mode)) if errors.is_empty() => {
                Ok(Settings {
                    package_name,
                    repo_source,
                    repo_mode,
                    output_mode,
                    max_depth,
                    target_framework,
                    registry_url,
                    offline: config.offline.unwrap_or(false),
                })
            }
            _ => Err(DepvizError::Validation {
                message: format!(
                    "Configuration validation failed:\n{}",
                    errors
                        .iter()
                        .map(|e| format!(" - {}", e))
                        .collect::<Vec<_>>()
                        .join("\n")
                ),
            }
            .into()),
        }
    }

    /// Resolved parameters in a stable order
    pub fn parameters(&self) -> Vec<(&'static str, String)> {
        vec![
            ("package_name", self.package_name.to_string()),
            ("repo_source", self.repo_source.clone()),
            ("test_repo_mode", self.repo_mode.to_string()),
            ("output_mode", self.output_mode.to_string()),
            ("max_depth", self.max_depth.to_string()),
            (
                "target_framework",
                self.target_framework.clone().unwrap_or_default(),
            ),
            ("registry_url", self.registry_url.clone()),
            ("offline", self.offline.to_string()),
        ]
    }

    /// `key=value` lines for `--print-config`
    pub fn print_parameters(&self) -> String {
        let mut output = String::new();
        for (key, value) in self.parameters() {
            let _ = writeln!(output, "{}={}", key, value);
        }
        output
    }

    pub fn to_request(&self) -> GraphRequest {
        GraphRequest::new(
            self.package_name.to_string(),
            self.repo_source.clone(),
            self.repo_mode,
            self.max_depth,
        )
        .with_target_framework(self.target_framework.clone())
        .with_offline(self.offline)
    }
}

/// The path must exist; it is returned absolute
fn validate_local_path(source: &str) -> std::result::Result<PathBuf, String> {
    let path = Path::new(source);
    if !path.exists() {
        return Err(format!("repo_source path does not exist: {}", source));
    }
    std::path::absolute(path)
        .map_err(|e| format!("repo_source path cannot be resolved: {}: {}", source, e))
}

fn validate_remote_url(source: &str) -> std::result::Result<(), String> {
    let url = reqwest::Url::parse(source)
        .map_err(|e| format!("repo_source is not a valid URL: {} ({})", source, e))?;

    if !matches!(url.scheme(), "http" | "https" | "git") {
        return Err(format!(
            "repo_source URL scheme must be http, https or git: {}",
            source
        ));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(format!("repo_source URL has no host: {}", source)),
    }
}

fn validate_registry_url(registry_url: &str) -> std::result::Result<(), String> {
    match reqwest::Url::parse(registry_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(format!(
            "registry_url must be an http or https URL: {}",
            registry_url
        )),
    }
}
