use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - graph resolved and rendered
    Success = 0,
    /// Dependency cycles were detected and `--fail-on-cycles` was given
    CyclesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (config error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::CyclesDetected => write!(f, "Cycles Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency graph resolution.
///
/// Every variant carries a hint so the CLI can tell the user what to fix.
#[derive(Debug, Error)]
pub enum DepvizError {
    #[error("Test repository file not found: {path}\n\n💡 Hint: {suggestion}")]
    SyntheticRepositoryNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to read test repository file: {path}\nDetails: {details}\n\n💡 Hint: Each line must look like 'PACKAGE: DEP1 DEP2 ...'")]
    SyntheticRepositoryParseError { path: PathBuf, details: String },

    #[error("No project manifest found for package '{package}' in {path}\n\n💡 Hint: {suggestion}")]
    ManifestNotFound {
        path: PathBuf,
        package: String,
        suggestion: String,
    },

    #[error("Failed to parse project manifest: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is well-formed XML")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Invalid repository source: {source_ref}\nReason: {reason}\n\n💡 Hint: Use an existing directory or test repository file with 'local-path', or a repository URL with 'remote-url'")]
    InvalidRepoSource { source_ref: String, reason: String },

    #[error("Unsupported remote repository: {url}\n\n💡 Hint: Only GitHub repository URLs (https://github.com/<owner>/<repo>) can be fetched")]
    UnsupportedRemote { url: String },

    #[error("Failed to fetch {url}\nDetails: {details}\n\n💡 Hint: Please check your internet connection and that the resource exists")]
    FetchError { url: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for settings and builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
