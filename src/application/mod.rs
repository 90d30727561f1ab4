/// Application layer - Use cases and DTOs
///
/// This layer resolves where the dependency information comes from
/// (test repository file, local source tree, remote archive), wires the
/// matching providers together and hands them to the graph builder.
pub mod dto;
pub mod factories;
pub mod providers;
pub mod use_cases;
