use super::{child_elements, non_empty_attribute, parse_document};
use crate::dependency_graph::domain::{DependencyEdge, ANY_VERSION};
use crate::shared::Result;

/// Parses `PackageReference` items from an MSBuild project file
///
/// The id comes from `Include` or, for central-version overrides, `Update`.
/// The version may be an attribute or a `<Version>` child element.
pub fn parse_csproj(content: &str) -> Result<Vec<DependencyEdge>> {
    let document = parse_document(content)?;

    let edges = document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "ItemGroup")
        .flat_map(|group| child_elements(group, "PackageReference"))
        .filter_map(|reference| {
            let id = non_empty_attribute(reference, "Include")
                .or_else(|| non_empty_attribute(reference, "Update"))?;
            let version = non_empty_attribute(reference, "Version")
                .or_else(|| {
                    child_elements(reference, "Version")
                        .next()
                        .and_then(|node| node.text())
                        .map(str::trim)
                        .filter(|text| !text.is_empty())
                })
                .unwrap_or(ANY_VERSION);
            Some(DependencyEdge::new(id, version))
        })
        .collect();

    Ok(edges)
}
