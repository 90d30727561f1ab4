use crate::shared::Result;
use std::path::{Path, PathBuf};

/// SourceFetcher port for materializing a remote source tree locally
pub trait SourceFetcher {
    /// Downloads the repository at `url` and unpacks it below `destination`
    ///
    /// # Returns
    /// The root directory of the unpacked source tree
    ///
    /// # Errors
    /// Returns an error if the URL is not supported, the download fails,
    /// or the archive cannot be extracted
    fn fetch(&self, url: &str, destination: &Path) -> Result<PathBuf>;
}
