mod cli;

use clap::Parser;
use cli::Args;
use depviz::adapters::outbound::console::StderrProgressReporter;
use depviz::adapters::outbound::filesystem::FileSystemReader;
use depviz::adapters::outbound::manifest::NuGetManifestReader;
use depviz::adapters::outbound::network::{GitHubArchiveFetcher, NuGetClient};
use depviz::application::dto::OutputMode;
use depviz::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use depviz::application::use_cases::BuildGraphUseCase;
use depviz::config::{self, ConfigFile, Settings};
use depviz::shared::error::{DepvizError, ExitCode};
use depviz::shared::Result;
use owo_colors::OwoColorize;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);

    let code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(code.as_i32());
}

/// `-v` count picks the level; `RUST_LOG` wins when set
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("depviz={}", level))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let settings = resolve_settings(&args)?;

    if args.print_config {
        print!("{}", settings.print_parameters());
        return Ok(ExitCode::Success);
    }

    if args.reverse.is_some() && settings.output_mode != OutputMode::List {
        return Err(DepvizError::Validation {
            message: "--reverse can only be used with --format list".to_string(),
        }
        .into());
    }

    // Create adapters (Dependency Injection)
    let registry = if settings.offline {
        None
    } else {
        Some(
            NuGetClient::new(&settings.registry_url)?
                .with_target_framework(settings.target_framework.clone()),
        )
    };

    let use_case = BuildGraphUseCase::new(
        FileSystemReader::new(),
        NuGetManifestReader::new(),
        GitHubArchiveFetcher::new()?,
        StderrProgressReporter::new(),
        registry,
    );

    let response = use_case.execute(settings.to_request())?;

    eprintln!("{}", FormatterFactory::progress_message(settings.output_mode));
    let formatter = FormatterFactory::create(settings.output_mode, args.reverse.as_deref());
    let output = formatter.format(&response.graph, &response.root)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output.clone()));
    presenter.present(&output)?;

    if args.fail_on_cycles && response.has_cycles() {
        eprintln!(
            "{}",
            format!(
                "❌ {} dependency cycle(s) found (--fail-on-cycles)",
                response.graph.cycles().len()
            )
            .red()
        );
        return Ok(ExitCode::CyclesDetected);
    }

    Ok(ExitCode::Success)
}

/// Config file (explicit or discovered) with command-line values on top
fn resolve_settings(args: &Args) -> Result<Settings> {
    let file_config = match &args.config {
        Some(path) => config::load_config_from_path(path)?,
        None => {
            let current_dir = std::env::current_dir()?;
            config::discover_config(&current_dir)?.unwrap_or_default()
        }
    };

    let merged: ConfigFile = file_config.merge(args.to_overrides());
    Settings::from_config(&merged)
}
