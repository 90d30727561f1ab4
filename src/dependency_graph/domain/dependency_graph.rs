use super::{DependencyCycle, DependencyProvider};
use crate::dependency_graph::services::GraphBuilder;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// DependencyGraph aggregate: adjacency plus the cycles found while building it
///
/// Populated by [`GraphBuilder`] and read-only afterwards. Adjacency keys are
/// the nodes that were expanded; a neighbor that was never expanded (because
/// it lay beyond the depth limit) appears only inside neighbor sets and in
/// [`DependencyGraph::truncated_nodes`].
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
    cycles: Vec<DependencyCycle>,
    max_depth: Option<usize>,
    truncated: BTreeSet<String>,
}

impl DependencyGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh graph rooted at `root`
    pub fn build<P>(root: &str, provider: &P, max_depth: usize) -> Self
    where
        P: DependencyProvider + ?Sized,
    {
        let mut graph = Self::new();
        graph.extend_from(root, provider, max_depth);
        graph
    }

    /// Runs another build pass into this graph, merging with what is already here
    ///
    /// Existing edges and cycles are kept; the new pass has its own visited
    /// set, so nodes shared with earlier passes are queried again and their
    /// edges collapse into the existing sets.
    pub fn extend_from<P>(&mut self, root: &str, provider: &P, max_depth: usize)
    where
        P: DependencyProvider + ?Sized,
    {
        GraphBuilder::new(max_depth).build_into(self, root, provider);
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn cycles(&self) -> &[DependencyCycle] {
        &self.cycles
    }

    /// Depth limit used by the most recent build pass
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Nodes that were referenced but never expanded because of the depth limit
    pub fn truncated_nodes(&self) -> &BTreeSet<String> {
        &self.truncated
    }

    pub fn is_truncated(&self) -> bool {
        !self.truncated.is_empty()
    }

    /// Direct dependencies of an expanded node
    pub fn dependencies_of(&self, package_id: &str) -> Option<&BTreeSet<String>> {
        self.adjacency.get(package_id)
    }

    /// Expanded nodes, sorted
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// All edges sorted by (source, target)
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.adjacency.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |target| (source.as_str(), target.as_str()))
        })
    }

    /// True if the id was seen during a build, as an expanded node or a neighbor
    pub fn contains_node(&self, package_id: &str) -> bool {
        self.resolve_node(package_id).is_some()
    }

    /// Returns the graph-owned copy of an id, if the id was seen during a build
    pub(crate) fn resolve_node(&self, package_id: &str) -> Option<&str> {
        if let Some((key, _)) = self.adjacency.get_key_value(package_id) {
            return Some(key.as_str());
        }
        self.adjacency
            .values()
            .find_map(|targets| targets.get(package_id))
            .map(String::as_str)
    }

    /// Every node reachable from `package_id` by following edges forward
    ///
    /// The start node is excluded even when it sits on a cycle. Unknown ids
    /// yield an empty set.
    pub fn transitive_dependencies(&self, package_id: &str) -> BTreeSet<String> {
        if !self.adjacency.contains_key(package_id) {
            return BTreeSet::new();
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([package_id]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(targets) = self.adjacency.get(current) {
                queue.extend(
                    targets
                        .iter()
                        .map(String::as_str)
                        .filter(|t| !visited.contains(t)),
                );
            }
        }

        visited.remove(package_id);
        visited.into_iter().map(str::to_string).collect()
    }

    /// Every node from which `target_id` is reachable ("reverse dependencies")
    ///
    /// Inverts the adjacency once and walks it backwards from the target,
    /// which gives the same set as testing reachability from every node.
    pub fn transitive_dependents(&self, target_id: &str) -> BTreeSet<String> {
        let mut reverse: HashMap<&str, Vec<&str>> = HashMap::new();
        for (source, target) in self.edges() {
            reverse.entry(target).or_default().push(source);
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = reverse
            .get(target_id)
            .map(|sources| sources.iter().copied().collect())
            .unwrap_or_default();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(sources) = reverse.get(current) {
                queue.extend(sources.iter().filter(|s| !visited.contains(*s)));
            }
        }

        visited.remove(target_id);
        visited.into_iter().map(str::to_string).collect()
    }

    pub(crate) fn insert_node(&mut self, package_id: &str) {
        if !self.adjacency.contains_key(package_id) {
            self.adjacency
                .insert(package_id.to_string(), BTreeSet::new());
        }
    }

    pub(crate) fn insert_edge(&mut self, source: &str, target: &str) {
        self.adjacency
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string());
    }

    /// Records a cycle unless an identical id sequence is already present
    pub(crate) fn record_cycle(&mut self, path: Vec<String>) -> bool {
        let cycle = DependencyCycle::new(path);
        if self.cycles.contains(&cycle) {
            return false;
        }
        self.cycles.push(cycle);
        true
    }

    pub(crate) fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = Some(max_depth);
    }

    /// Adds skipped ids to the truncation record, dropping ids that ended up expanded
    pub(crate) fn merge_truncated(&mut self, skipped: BTreeSet<String>) {
        self.truncated.extend(skipped);
        let adjacency = &self.adjacency;
        self.truncated.retain(|id| !adjacency.contains_key(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_graph::domain::SyntheticRepository;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn graph_from(text: &str, root: &str) -> DependencyGraph {
        let repo = SyntheticRepository::parse(text);
        DependencyGraph::build(root, &repo, 100)
    }

    fn chain() -> DependencyGraph {
        graph_from("A: B\nB: C\nC:\n", "A")
    }

    fn cycle() -> DependencyGraph {
        graph_from("A: B\nB: C\nC: A\n", "A")
    }

    fn diamond() -> DependencyGraph {
        graph_from("A: B C\nB: D\nC: D\nD:\n", "A")
    }

    /// Reachability from every node, the straightforward definition of dependents
    fn naive_dependents(graph: &DependencyGraph, target: &str) -> BTreeSet<String> {
        graph
            .nodes()
            .filter(|n| *n != target)
            .filter(|n| graph.transitive_dependencies(n).contains(target))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_linear_chain() {
        let graph = chain();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.has_cycles());
        assert_eq!(graph.transitive_dependencies("A"), set(&["B", "C"]));
        assert!(graph.dependencies_of("A").unwrap().contains("B"));
        assert!(graph.dependencies_of("B").unwrap().contains("C"));
    }

    #[test]
    fn test_cycle_detection() {
        let graph = cycle();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.has_cycles());
        assert_eq!(graph.cycles().len(), 1);
        assert_eq!(graph.cycles()[0], ["A", "B", "C", "A"]);
    }

    #[test]
    fn test_diamond_is_not_double_expanded() {
        let graph = diamond();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(!graph.has_cycles());
        assert_eq!(graph.transitive_dependencies("A"), set(&["B", "C", "D"]));
    }

    #[test]
    fn test_complex_graph() {
        let graph = graph_from("A: B C\nB: D E\nC: E\nD:\nE: F\nF:\n", "A");
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 6);
        assert!(!graph.has_cycles());
        assert_eq!(graph.transitive_dependencies("A").len(), 5);
    }

    #[test]
    fn test_root_without_dependencies() {
        let graph = graph_from("A:\n", "A");
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_cycles());
        assert!(graph.transitive_dependencies("A").is_empty());
    }

    #[test]
    fn test_dependents_over_diamond() {
        let graph = diamond();
        assert_eq!(graph.transitive_dependents("D"), set(&["A", "B", "C"]));
        assert!(graph.transitive_dependents("A").is_empty());
    }

    #[test]
    fn test_dependents_under_cycle() {
        let graph = cycle();
        let dependents = graph.transitive_dependents("A");
        assert!(dependents.contains("B"));
        assert!(dependents.contains("C"));
        assert!(!dependents.contains("A"));
    }

    #[test]
    fn test_dependents_match_per_node_reachability() {
        let graph = graph_from("A: B C\nB: D E\nC: E A\nD: B\nE: F\nF:\n", "A");
        for target in ["A", "B", "C", "D", "E", "F"] {
            assert_eq!(
                graph.transitive_dependents(target),
                naive_dependents(&graph, target),
                "dependents of {}",
                target
            );
        }
    }

    #[test]
    fn test_queries_are_idempotent() {
        let graph = diamond();
        assert_eq!(
            graph.transitive_dependencies("A"),
            graph.transitive_dependencies("A")
        );
        assert_eq!(
            graph.transitive_dependents("D"),
            graph.transitive_dependents("D")
        );
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_unknown_id_yields_empty_sets() {
        let graph = diamond();
        assert!(graph.transitive_dependencies("NOPE").is_empty());
        assert!(graph.transitive_dependents("NOPE").is_empty());
        assert!(!graph.contains_node("NOPE"));
    }

    #[test]
    fn test_self_dependency_excluded_from_transitive_set() {
        let graph = graph_from("A: A B\nB:\n", "A");
        assert_eq!(graph.transitive_dependencies("A"), set(&["B"]));
        assert_eq!(graph.cycles()[0], ["A", "A"]);
    }

    #[test]
    fn test_edges_are_sorted() {
        let graph = graph_from("A: C B\nC:\nB:\n", "A");
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("A", "B"), ("A", "C")]);
    }

    #[test]
    fn test_contains_node_includes_neighbors() {
        let repo = SyntheticRepository::parse("A: B\nB: C\nC:\n");
        let graph = DependencyGraph::build("A", &repo, 1);
        assert!(graph.contains_node("C"));
        assert!(graph.dependencies_of("C").is_none());
    }

    #[test]
    fn test_extend_from_accumulates_roots() {
        let repo = SyntheticRepository::parse("A: C\nB: C\nC: D\nD:\n");
        let mut graph = DependencyGraph::build("A", &repo, 100);
        assert_eq!(graph.node_count(), 3);

        graph.extend_from("B", &repo, 100);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.transitive_dependents("D"), set(&["A", "B", "C"]));
    }
}
