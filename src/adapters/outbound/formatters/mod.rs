/// Formatter adapters for the different graph output modes
mod diagram_formatter;
mod json_formatter;
mod list_formatter;
mod stats_formatter;
mod tree_formatter;

pub use diagram_formatter::DiagramFormatter;
pub use json_formatter::JsonFormatter;
pub use list_formatter::ListFormatter;
pub use stats_formatter::StatsFormatter;
pub use tree_formatter::TreeFormatter;
