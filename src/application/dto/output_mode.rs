/// Output mode enumeration for rendering a resolved graph
///
/// Both the CLI and the config file accept these names; the formatter
/// factory maps each one onto a formatter adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Node/edge counts, depth limit, truncation and cycles
    Stats,
    /// Indented tree with cycle markers (default)
    #[default]
    AsciiTree,
    /// Sorted transitive dependencies (or dependents with `--reverse`)
    List,
    /// Graphviz DOT export
    Diagram,
    /// Machine-readable JSON document
    Json,
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stats" => Ok(OutputMode::Stats),
            "ascii-tree" | "tree" => Ok(OutputMode::AsciiTree),
            "list" => Ok(OutputMode::List),
            "diagram" | "dot" => Ok(OutputMode::Diagram),
            "json" => Ok(OutputMode::Json),
            _ => Err(format!(
                "Invalid output mode: {}. Please specify 'stats', 'ascii-tree', 'list', 'diagram' or 'json'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Stats => write!(f, "stats"),
            OutputMode::AsciiTree => write!(f, "ascii-tree"),
            OutputMode::List => write!(f, "list"),
            OutputMode::Diagram => write!(f, "diagram"),
            OutputMode::Json => write!(f, "json"),
        }
    }
}
