use depviz::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock SourceFetcher that records requested URLs
///
/// With `unavailable()` every fetch fails; otherwise an empty directory is
/// created below the destination and returned as the source root.
#[derive(Clone, Default)]
pub struct MockSourceFetcher {
    pub requested: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockSourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl SourceFetcher for MockSourceFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<PathBuf> {
        self.requested.lock().unwrap().push(url.to_string());
        if self.fail {
            anyhow::bail!("network disabled in tests: {}", url);
        }

        let root = destination.join("repo-main");
        std::fs::create_dir_all(&root)?;
        Ok(root)
    }
}
