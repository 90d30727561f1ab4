use clap::Parser;
use std::path::PathBuf;

use depviz::application::dto::{OutputMode, RepoMode};
use depviz::config::ConfigFile;

/// Resolve and visualize the transitive dependency graph of a NuGet package
#[derive(Parser, Debug)]
#[command(name = "depviz")]
#[command(version)]
#[command(
    about = "Resolve and visualize the transitive dependency graph of a NuGet package",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./depviz.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Root package to resolve
    #[arg(short, long, value_name = "NAME")]
    pub package: Option<String>,

    /// Test repository file, source directory, or repository URL
    #[arg(short, long, value_name = "PATH_OR_URL")]
    pub source: Option<String>,

    /// How to read the source: local-path or remote-url
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<RepoMode>,

    /// Output mode: stats, ascii-tree, list, diagram or json
    #[arg(short, long, value_name = "MODE")]
    pub format: Option<OutputMode>,

    /// Maximum traversal depth
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// With `--format list`, print the packages that depend on PACKAGE
    #[arg(short, long, value_name = "PACKAGE")]
    pub reverse: Option<String>,

    /// Only use manifests from the source; never query the package registry
    #[arg(long)]
    pub offline: bool,

    /// Restrict grouped nuspec dependencies to this target framework
    #[arg(long, value_name = "TFM")]
    pub target_framework: Option<String>,

    /// NuGet V3 flat container base URL used for packages not in the source
    #[arg(long, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Print the resolved parameters as key=value lines and exit
    #[arg(long)]
    pub print_config: bool,

    /// Exit with code 1 when the graph contains dependency cycles
    #[arg(long)]
    pub fail_on_cycles: bool,

    /// Verbose diagnostics on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Command-line values in config-file shape, for merging over the file
    pub fn to_overrides(&self) -> ConfigFile {
        ConfigFile {
            package_name: self.package.clone(),
            repo_source: self.source.clone(),
            test_repo_mode: self.mode.map(|mode| mode.to_string()),
            output_mode: self.format.map(|format| format.to_string()),
            max_depth: self.max_depth,
            target_framework: self.target_framework.clone(),
            registry_url: self.registry_url.clone(),
            offline: self.offline.then_some(true),
            ..ConfigFile::default()
        }
    }
}
