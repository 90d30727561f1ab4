/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven (outbound) ports exist: the CLI drives the use case directly,
/// and the use case reaches the file system, the network and the console
/// through the traits below.
pub mod outbound;
