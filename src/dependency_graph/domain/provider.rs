use super::DependencyEdge;
use crate::shared::Result;

/// DependencyProvider answers "what are this node's direct edges"
///
/// This is the only input the graph builder consumes. Implementations may
/// block on I/O (filesystem, network); the builder treats any error as
/// "no edges" for that node and keeps going.
pub trait DependencyProvider {
    /// Returns the direct dependencies of `package_id`, in manifest order
    fn edges_of(&self, package_id: &str) -> Result<Vec<DependencyEdge>>;
}

impl<F> DependencyProvider for F
where
    F: Fn(&str) -> Result<Vec<DependencyEdge>>,
{
    fn edges_of(&self, package_id: &str) -> Result<Vec<DependencyEdge>> {
        self(package_id)
    }
}
