/// Version spec used when a manifest or test repository does not state one
pub const ANY_VERSION: &str = "*";

/// A direct outward edge reported by a dependency provider
///
/// The version spec only travels as far as the graph builder; the graph
/// itself keeps the (source, target) pair alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    pub id: String,
    pub version_spec: String,
}

impl DependencyEdge {
    pub fn new(id: impl Into<String>, version_spec: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version_spec: version_spec.into(),
        }
    }

    /// Edge with an unconstrained version spec
    pub fn any(id: impl Into<String>) -> Self {
        Self::new(id, ANY_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_uses_wildcard_version() {
        let edge = DependencyEdge::any("Serilog");
        assert_eq!(edge.id, "Serilog");
        assert_eq!(edge.version_spec, "*");
    }
}
