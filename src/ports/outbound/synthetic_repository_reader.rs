use crate::shared::Result;
use std::path::Path;

/// SyntheticRepositoryReader port for reading `NODE: DEP ...` files
///
/// Parsing happens in the domain; this port only supplies the text.
pub trait SyntheticRepositoryReader {
    /// Reads the raw content of a synthetic repository file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist
    /// - The file cannot be read due to permissions, size limits or I/O errors
    fn read_repository(&self, path: &Path) -> Result<String>;
}
