use crate::adapters::outbound::formatters::{
    DiagramFormatter, JsonFormatter, ListFormatter, StatsFormatter, TreeFormatter,
};
use crate::application::dto::OutputMode;
use crate::ports::outbound::GraphFormatter;

/// Factory for creating graph formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output mode
    ///
    /// # Arguments
    /// * `mode` - The output mode to create a formatter for
    /// * `reverse_target` - For [`OutputMode::List`], list the dependents of
    ///   this package instead of the root's dependencies; ignored otherwise
    ///
    /// # Examples
    /// ```
    /// use depviz::application::dto::OutputMode;
    /// use depviz::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputMode::AsciiTree, None);
    /// ```
    pub fn create(mode: OutputMode, reverse_target: Option<&str>) -> Box<dyn GraphFormatter> {
        match mode {
            OutputMode::Stats => Box::new(StatsFormatter::new()),
            OutputMode::AsciiTree => Box::new(TreeFormatter::new()),
            OutputMode::List => match reverse_target {
                Some(target) => Box::new(ListFormatter::dependents_of(target)),
                None => Box::new(ListFormatter::new()),
            },
            OutputMode::Diagram => Box::new(DiagramFormatter::new()),
            OutputMode::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output mode
    ///
    /// # Examples
    /// ```
    /// use depviz::application::dto::OutputMode;
    /// use depviz::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputMode::Diagram);
    /// assert_eq!(message, "📝 Generating Graphviz diagram output...");
    /// ```
    pub fn progress_message(mode: OutputMode) -> &'static str {
        match mode {
            OutputMode::Stats => "📝 Generating graph statistics...",
            OutputMode::AsciiTree => "📝 Generating ASCII tree output...",
            OutputMode::List => "📝 Generating package list output...",
            OutputMode::Diagram => "📝 Generating Graphviz diagram output...",
            OutputMode::Json => "📝 Generating JSON output...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_graph::domain::{DependencyGraph, SyntheticRepository};

    fn graph() -> DependencyGraph {
        let repo = SyntheticRepository::parse("A: B\nB: C\nC:\n");
        DependencyGraph::build("A", &repo, 10)
    }

    #[test]
    fn test_create_tree_formatter() {
        let output = FormatterFactory::create(OutputMode::AsciiTree, None)
            .format(&graph(), "A")
            .unwrap();
        assert_eq!(output, "A\n└── B\n    └── C\n");
    }

    #[test]
    fn test_create_list_formatter_forward() {
        let output = FormatterFactory::create(OutputMode::List, None)
            .format(&graph(), "A")
            .unwrap();
        assert_eq!(output, "B\nC\n");
    }

    #[test]
    fn test_create_list_formatter_reverse() {
        let output = FormatterFactory::create(OutputMode::List, Some("C"))
            .format(&graph(), "A")
            .unwrap();
        assert_eq!(output, "A\nB\n");
    }

    #[test]
    fn test_reverse_target_ignored_outside_list_mode() {
        let output = FormatterFactory::create(OutputMode::Diagram, Some("C"))
            .format(&graph(), "A")
            .unwrap();
        assert!(output.starts_with("strict digraph"));
    }

    #[test]
    fn test_create_json_and_stats_formatters() {
        let json = FormatterFactory::create(OutputMode::Json, None)
            .format(&graph(), "A")
            .unwrap();
        assert!(json.contains("\"nodeCount\""));

        let stats = FormatterFactory::create(OutputMode::Stats, None)
            .format(&graph(), "A")
            .unwrap();
        assert!(stats.starts_with("Package: A\n"));
    }

    #[test]
    fn test_progress_message_tree() {
        let message = FormatterFactory::progress_message(OutputMode::AsciiTree);
        assert_eq!(message, "📝 Generating ASCII tree output...");
    }

    #[test]
    fn test_progress_message_json() {
        let message = FormatterFactory::progress_message(OutputMode::Json);
        assert_eq!(message, "📝 Generating JSON output...");
    }
}
