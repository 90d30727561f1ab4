use super::build_client;
use crate::ports::outbound::SourceFetcher;
use crate::shared::error::DepvizError;
use crate::shared::security::{validate_size, MAX_ARCHIVE_SIZE};
use crate::shared::Result;
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

const CODELOAD_BASE: &str = "https://codeload.github.com";

/// Branches tried in order when downloading a repository archive
const BRANCHES: [&str; 2] = ["main", "master"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct GitHubRepository {
    owner: String,
    name: String,
}

/// Parses `http(s)://github.com/{owner}/{repo}[.git][/...]`
fn parse_github_url(url: &str) -> Option<GitHubRepository> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    if !matches!(parsed.host_str()?, "github.com" | "www.github.com") {
        return None;
    }

    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let name = segments.next()?;
    let name = name.strip_suffix(".git").unwrap_or(name);
    if name.is_empty() {
        return None;
    }

    Some(GitHubRepository {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

/// Extracts a ZIP archive held in memory into `destination`
///
/// Entry names that would escape `destination` are rejected by the zip
/// reader; the total uncompressed size is capped before anything is written.
pub fn extract_archive(data: &[u8], destination: &Path) -> Result<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    let mut total: u64 = 0;
    for index in 0..archive.len() {
        total = total.saturating_add(archive.by_index(index)?.size());
    }
    validate_size(total, destination, MAX_ARCHIVE_SIZE)?;

    archive.extract(destination)?;
    Ok(())
}

/// Root directory of an extracted GitHub archive
///
/// GitHub names it `{repo}-{branch}`; otherwise the sole top-level
/// directory is used, falling back to `destination` itself.
fn extracted_root(destination: &Path, repository: &str, branch: &str) -> Result<PathBuf> {
    let expected = destination.join(format!("{}-{}", repository, branch));
    if expected.is_dir() {
        return Ok(expected);
    }

    let directories: Vec<PathBuf> = fs::read_dir(destination)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    Ok(match directories.as_slice() {
        [only] => only.clone(),
        _ => destination.to_path_buf(),
    })
}

/// GitHubArchiveFetcher adapter for downloading repository snapshots
///
/// This adapter implements the SourceFetcher port using the codeload
/// ZIP endpoint, trying `main` and then `master`.
pub struct GitHubArchiveFetcher {
    client: Client,
    codeload_base: String,
}

impl GitHubArchiveFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(build_client()?, CODELOAD_BASE))
    }

    pub(crate) fn with_client(client: Client, codeload_base: &str) -> Self {
        Self {
            client,
            codeload_base: codeload_base.trim_end_matches('/').to_string(),
        }
    }

    fn archive_url(&self, repository: &GitHubRepository, branch: &str) -> String {
        format!(
            "{}/{}/{}/zip/refs/heads/{}",
            self.codeload_base,
            urlencoding::encode(&repository.owner),
            urlencoding::encode(&repository.name),
            urlencoding::encode(branch)
        )
    }

    /// Downloads an archive; `None` when the branch does not exist
    fn download(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let response = self.client.get(url).send().map_err(|e| DepvizError::FetchError {
            url: url.to_string(),
            details: e.to_string(),
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DepvizError::FetchError {
                url: url.to_string(),
                details: format!("server returned status code {}", status),
            }
            .into());
        }

        if let Some(length) = response.content_length() {
            validate_size(length, Path::new(url), MAX_ARCHIVE_SIZE)?;
        }

        let mut data = Vec::new();
        response
            .take(MAX_ARCHIVE_SIZE + 1)
            .read_to_end(&mut data)
            .map_err(|e| DepvizError::FetchError {
                url: url.to_string(),
                details: e.to_string(),
            })?;
        validate_size(data.len() as u64, Path::new(url), MAX_ARCHIVE_SIZE)?;

        Ok(Some(data))
    }
}

impl SourceFetcher for GitHubArchiveFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<PathBuf> {
        let repository =
            parse_github_url(url).ok_or_else(|| DepvizError::UnsupportedRemote {
                url: url.to_string(),
            })?;

        for branch in BRANCHES {
            let archive_url = self.archive_url(&repository, branch);
            tracing::debug!(url = %archive_url, "downloading source archive");

            let Some(data) = self.download(&archive_url)? else {
                tracing::debug!(branch, "branch not found, trying next");
                continue;
            };

            extract_archive(&data, destination).map_err(|e| DepvizError::FetchError {
                url: archive_url.clone(),
                details: format!("failed to extract archive: {}", e),
            })?;
            let root = extracted_root(destination, &repository.name, branch)?;
            tracing::info!(branch, root = %root.display(), "source archive extracted");
            return Ok(root);
        }

        Err(DepvizError::FetchError {
            url: url.to_string(),
            details: format!("no archive found for branches {}", BRANCHES.join(", ")),
        }
        .into())
    }
}
