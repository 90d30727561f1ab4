/// NuGet manifest adapters: XML dialect parsers and source-tree discovery
mod csproj;
mod discovery;
mod nuspec;
mod packages_config;

pub use csproj::parse_csproj;
pub use discovery::NuGetManifestReader;
pub use nuspec::parse_nuspec;
pub use packages_config::parse_packages_config;

use crate::shared::Result;
use roxmltree::{Document, Node};

/// Parses XML, tolerating the byte order mark Visual Studio writes
fn parse_document(content: &str) -> Result<Document<'_>> {
    Ok(Document::parse(content.trim_start_matches('\u{feff}'))?)
}

/// Element children of `node` with the given local name (namespaces ignored)
fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

/// Attribute value, treating an empty value as absent
fn non_empty_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|value| !value.trim().is_empty())
}
