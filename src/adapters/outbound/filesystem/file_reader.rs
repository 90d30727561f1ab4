use crate::ports::outbound::SyntheticRepositoryReader;
use crate::shared::error::DepvizError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading test repository files
///
/// This adapter implements the SyntheticRepositoryReader port. Reads go
/// through the shared security checks: no symlinks, regular files only,
/// bounded size.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticRepositoryReader for FileSystemReader {
    fn read_repository(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(DepvizError::SyntheticRepositoryNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "\"{}\" does not exist.\n   \
                     Pass a test repository file or a source directory with --source, \
                     or set repo_source in depviz.config.yml.",
                    path.display()
                ),
            }
            .into());
        }

        read_regular_file(path, "test repository").map_err(|e| {
            DepvizError::SyntheticRepositoryParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
