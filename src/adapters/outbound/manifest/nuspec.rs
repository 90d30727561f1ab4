use super::{child_elements, non_empty_attribute, parse_document};
use crate::dependency_graph::domain::{DependencyEdge, ANY_VERSION};
use crate::shared::Result;
use std::collections::HashSet;

/// Parses the dependencies declared in a `.nuspec` document
///
/// Reads `package/metadata/dependencies`, accepting both framework groups
/// and ungrouped `dependency` elements. With a `target_framework`, only
/// groups whose `targetFramework` contains it (case-insensitively) are read;
/// groups without a framework always are. An id listed more than once keeps
/// its first occurrence.
pub fn parse_nuspec(content: &str, target_framework: Option<&str>) -> Result<Vec<DependencyEdge>> {
    let document = parse_document(content)?;
    let wanted = target_framework.map(str::to_lowercase);

    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    let mut push = |node: roxmltree::Node<'_, '_>| {
        let Some(id) = non_empty_attribute(node, "id") else {
            return;
        };
        if seen.insert(id.to_string()) {
            let version = non_empty_attribute(node, "version").unwrap_or(ANY_VERSION);
            edges.push(DependencyEdge::new(id, version));
        }
    };

    let root = document.root_element();
    for metadata in child_elements(root, "metadata") {
        for dependencies in child_elements(metadata, "dependencies") {
            for node in dependencies.children().filter(|n| n.is_element()) {
                match node.tag_name().name() {
                    "group" => {
                        if !group_matches(non_empty_attribute(node, "targetFramework"), wanted.as_deref()) {
                            continue;
                        }
                        child_elements(node, "dependency").for_each(&mut push);
                    }
                    "dependency" => push(node),
                    _ => {}
                }
            }
        }
    }

    Ok(edges)
}

fn group_matches(group_framework: Option<&str>, wanted: Option<&str>) -> bool {
    match (group_framework, wanted) {
        (Some(framework), Some(wanted)) => framework.to_lowercase().contains(wanted),
        _ => true,
    }
}
