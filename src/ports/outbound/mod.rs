/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod formatter;
pub mod manifest_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod source_fetcher;
pub mod synthetic_repository_reader;

pub use crate::dependency_graph::domain::DependencyProvider;
pub use formatter::GraphFormatter;
pub use manifest_reader::ManifestReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use source_fetcher::SourceFetcher;
pub use synthetic_repository_reader::SyntheticRepositoryReader;
