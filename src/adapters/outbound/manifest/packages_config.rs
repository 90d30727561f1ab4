use super::{child_elements, non_empty_attribute, parse_document};
use crate::dependency_graph::domain::DependencyEdge;
use crate::shared::Result;

/// Parses a legacy `packages.config`
///
/// Entries missing either `id` or `version` are ignored, as is a document
/// whose root element is not `packages`.
pub fn parse_packages_config(content: &str) -> Result<Vec<DependencyEdge>> {
    let document = parse_document(content)?;
    let root = document.root_element();
    if root.tag_name().name() != "packages" {
        return Ok(Vec::new());
    }

    Ok(child_elements(root, "package")
        .filter_map(|package| {
            let id = non_empty_attribute(package, "id")?;
            let version = non_empty_attribute(package, "version")?;
            Some(DependencyEdge::new(id, version))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_packages_config() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <package id="NUnit" version="3.13.3" targetFramework="net48" />
  <package id="Moq" version="4.18.4" />
  <package id="NoVersion" />
</packages>"#;
        assert_eq!(
            parse_packages_config(xml).unwrap(),
            vec![
                DependencyEdge::new("NUnit", "3.13.3"),
                DependencyEdge::new("Moq", "4.18.4"),
            ]
        );
    }

    #[test]
    fn test_parse_packages_config_wrong_root() {
        let xml = r#"<configuration><package id="A" version="1" /></configuration>"#;
        assert!(parse_packages_config(xml).unwrap().is_empty());
    }
}
