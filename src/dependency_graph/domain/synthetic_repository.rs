use super::{DependencyEdge, DependencyProvider};
use crate::shared::Result;
use std::collections::HashMap;

/// In-memory package repository parsed from the flat test format
///
/// ```text
/// # comment
/// A: B C
/// B: D
/// C:
/// ```
///
/// Every edge carries the wildcard version spec.
#[derive(Debug, Clone, Default)]
pub struct SyntheticRepository {
    packages: HashMap<String, Vec<DependencyEdge>>,
}

impl SyntheticRepository {
    /// Parses `NODE: DEP1 DEP2 ...` lines
    ///
    /// Blank lines and `#` comments are ignored, as are lines without a colon.
    /// A node listed twice keeps the dependencies of its last line.
    pub fn parse(content: &str) -> Self {
        let mut packages = HashMap::new();

        for (line_no, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((package, deps)) = line.split_once(':') else {
                tracing::debug!(line = line_no + 1, "skipping test repository line without ':'");
                continue;
            };

            let edges = deps.split_whitespace().map(DependencyEdge::any).collect();
            packages.insert(package.trim().to_string(), edges);
        }

        Self { packages }
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn contains(&self, package_id: &str) -> bool {
        self.packages.contains_key(package_id)
    }

    /// Declared dependencies of a package, `None` if it has no line of its own
    pub fn dependencies(&self, package_id: &str) -> Option<&[DependencyEdge]> {
        self.packages.get(package_id).map(Vec::as_slice)
    }
}

impl DependencyProvider for SyntheticRepository {
    fn edges_of(&self, package_id: &str) -> Result<Vec<DependencyEdge>> {
        Ok(self
            .packages
            .get(package_id)
            .cloned()
            .unwrap_or_default())
    }
}
