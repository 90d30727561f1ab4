use serde::Serialize;

/// A closed dependency path `[c0, c1, ..., ck, c0]`
///
/// The first and last ids are equal. Two cycles are the same only when
/// their id sequences are identical; rotations are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyCycle(Vec<String>);

impl DependencyCycle {
    pub(crate) fn new(path: Vec<String>) -> Self {
        debug_assert!(path.len() >= 2 && path.first() == path.last());
        Self(path)
    }

    pub fn nodes(&self) -> &[String] {
        &self.0
    }

    /// Number of ids in the closed path, including the repeated start
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consecutive (source, target) pairs along the cycle
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl std::fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}

impl PartialEq<[&str]> for DependencyCycle {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for DependencyCycle {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}
