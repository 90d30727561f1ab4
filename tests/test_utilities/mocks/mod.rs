/// Mock implementations for testing
mod mock_manifest_reader;
mod mock_progress_reporter;
mod mock_repository_reader;
mod mock_source_fetcher;

pub use mock_manifest_reader::MockManifestReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_repository_reader::MockRepositoryReader;
pub use mock_source_fetcher::MockSourceFetcher;
