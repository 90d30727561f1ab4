/// Network adapters for external API calls
mod github_fetcher;
mod nuget_client;
#[cfg(test)]
mod test_server;

pub use github_fetcher::{extract_archive, GitHubArchiveFetcher};
pub use nuget_client::{NuGetClient, DEFAULT_REGISTRY_URL};

use std::time::Duration;

/// Request timeout shared by the blocking HTTP clients
const TIMEOUT_SECONDS: u64 = 30;

fn user_agent() -> String {
    format!("depviz/{}", env!("CARGO_PKG_VERSION"))
}

fn build_client() -> crate::shared::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECONDS))
        .user_agent(user_agent())
        .build()?)
}
