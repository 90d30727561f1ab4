pub mod graph_builder;

pub use graph_builder::{GraphBuilder, DEFAULT_MAX_DEPTH};
