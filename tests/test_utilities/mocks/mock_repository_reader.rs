use depviz::prelude::*;
use std::path::Path;

/// Mock SyntheticRepositoryReader returning fixed content for any path
pub struct MockRepositoryReader {
    content: String,
}

impl MockRepositoryReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

impl SyntheticRepositoryReader for MockRepositoryReader {
    fn read_repository(&self, _path: &Path) -> Result<String> {
        Ok(self.content.clone())
    }
}
