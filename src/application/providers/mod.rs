/// Dependency providers composed from the outbound ports
mod repository_provider;

pub use repository_provider::RepositoryProvider;
