use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use driftcheck::cli::{Cli, Commands};
use driftcheck::output::{self, Verbosity};
use driftcheck::{CheckContext, commands};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status for a verification that found discrepancies under `--strict`
const EXIT_DRIFT: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    let default_level = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(driftcheck::LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };
    output::set_verbosity(verbosity);
    init_logging(verbosity);

    match &cli.command {
        Commands::Completion { shell } => {
            print_completions(*shell, &mut Cli::command());
        }
        Commands::Generate {
            report_missing,
            no_rotate,
        } => {
            let mut ctx = load_context(&cli)?;
            if *report_missing {
                ctx.config.generate.report_missing = true;
            }
            if *no_rotate {
                ctx.config.rotation.enabled = false;
            }
            commands::generate::execute(&ctx)?;
        }
        Commands::Verify { strict } => {
            let ctx = load_context(&cli)?;
            let result = commands::verify::execute(&ctx)?;
            if (*strict || ctx.config.verify.strict_exit) && !result.is_clean() {
                return Ok(ExitCode::from(EXIT_DRIFT));
            }
        }
        Commands::Config { key, list } => {
            let ctx = load_context(&cli)?;
            commands::config::execute(&ctx, key.as_deref(), *list)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Loads configuration and applies command-line path overrides on top of it.
fn load_context(cli: &Cli) -> Result<CheckContext> {
    let mut ctx = CheckContext::load(cli.config.clone())?;

    if let Some(dir) = &cli.data_dir {
        ctx.config.core.data_dir = driftcheck::utils::expand_tilde(dir)?;
    }
    if let Some(list) = &cli.file_list {
        ctx.config.core.file_list = driftcheck::utils::expand_tilde(list)?;
    }
    if let Some(manifest) = &cli.manifest {
        ctx.config.core.manifest = driftcheck::utils::expand_tilde(manifest)?;
    }
    if let Some(base) = &cli.base_dir {
        ctx.config.core.base_dir = Some(driftcheck::utils::expand_tilde(base)?);
    }
    Ok(ctx)
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
