#![forbid(unsafe_code)]

mod cmd;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, Reported, fallback_output_mode, render_error};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use taxview_core::config::{EffectiveConfig, resolve_config};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "taxview: XBRL taxonomy relationship networks as rooted trees",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file to use instead of taxview.toml / the user config.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Show taxonomy networks as trees",
        long_about = "Load a taxonomy snapshot, reshape its relationship networks into \
                      rooted hierarchies, and render them.",
        after_help = "EXAMPLES:\n    # Every network\n    taxview view taxonomy.json\n\n    # Calculation trees only, shallow\n    taxview view taxonomy.json --network calculations --max-depth 3\n\n    # Emit machine-readable output\n    taxview view taxonomy.json --format json"
    )]
    View(cmd::view::ViewArgs),

    #[command(
        about = "List relationship cycles",
        long_about = "List the strongly connected components of every network, per role.",
        after_help = "EXAMPLES:\n    # Report cycles\n    taxview cycles taxonomy.json\n\n    # Emit machine-readable output\n    taxview cycles taxonomy.json --json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        about = "Show extraction diagnostics",
        long_about = "Run every extraction and list the diagnostics it produced: skipped \
                      edges, empty networks, cycles and truncated depth.",
        after_help = "EXAMPLES:\n    # Summarize diagnostics\n    taxview diagnose taxonomy.json\n\n    # Emit machine-readable output\n    taxview diagnose taxonomy.json --format json"
    )]
    Diagnose(cmd::diagnose::DiagnoseArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    taxview completions bash > /etc/bash_completion.d/taxview"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

impl Cli {
    /// Output mode for errors raised before the config is resolved.
    fn fallback_output_mode(&self) -> OutputMode {
        fallback_output_mode(self.format, self.json)
    }

    fn output_mode(&self, config: &EffectiveConfig) -> OutputMode {
        output::resolve_output_mode(self.format, self.json, &config.resolved_output)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TAXVIEW_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "taxview=debug,info"
        } else if verbose {
            "taxview=info,warn"
        } else {
            "warn"
        })
    });

    let format = env::var("TAXVIEW_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<EffectiveConfig> {
    let project_root = env::current_dir().context("failed to read working directory")?;
    match resolve_config(&project_root, cli.config.as_ref(), cli.json) {
        Ok(config) => Ok(config),
        Err(err) => {
            let code = err.code();
            render_error(
                cli.fallback_output_mode(),
                &CliError::with_details(
                    format!("error loading config: {err}"),
                    code.hint().unwrap_or(code.message()),
                    code.code(),
                ),
            )?;
            Err(Reported.into())
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let config = load_config(cli)?;
    let output = cli.output_mode(&config);
    debug!(?output, "resolved output mode");

    match &cli.command {
        Commands::View(args) => cmd::view::run_view(args, &config.viewer, output),
        Commands::Cycles(args) => cmd::cycles::run_cycles(args, output),
        Commands::Diagnose(args) => cmd::diagnose::run_diagnose(args, &config.viewer, output),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.is::<Reported>() {
                let message = format!("error: {err:#}");
                // Nothing left to report to if stderr itself is gone.
                let _ = render_error(cli.fallback_output_mode(), &CliError::new(message));
            }
            ExitCode::FAILURE
        }
    }
}
