//! # echainspec CLI entry point
//!
//! Parses command-line arguments and dispatches to the resolution and
//! command handlers. One invocation resolves exactly one specification,
//! runs exactly one command against it, and exits.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use echainspec_cli::commands;
use echainspec_cli::resolve::{resolve_spec, ResolveOptions};
use echainspec_formats::{default_registry, format_registry};

/// A chain specification and configuration tool for EVM clients.
///
/// The default behavior is to act as a configuration reader, writer,
/// and implicit converter. Establish a configuration to read either by
/// piping one in (declare its layout with --inputf, or let the tool
/// guess by trial) or by naming a built-in default with --default. With
/// --outputf the established configuration is written in the requested
/// client format; without it, in its original form.
///
/// Examples:
///
///   cat my-parity-spec.json | echainspec --inputf parity --outputf multigeth
///
///   echainspec --inputf parity --file my-parity-spec.json --outputf geth
///
///   echainspec --default classic forks
///
///   echainspec --default kotti validate 3000000
#[derive(Parser, Debug)]
#[command(name = "echainspec", version, about, verbatim_doc_comment)]
struct Cli {
    /// Input format type [geth|multigeth|parity]. Guessed when omitted.
    #[arg(long = "inputf", value_name = "FORMAT", global = true)]
    input_format: Option<String>,

    /// Path to a JSON chain configuration file. Standard input when omitted.
    #[arg(long, value_name = "PATH", global = true)]
    file: Option<PathBuf>,

    /// Use a built-in default chainspec value (see ls-defaults).
    #[arg(long = "default", value_name = "CHAIN", global = true)]
    default_chain: Option<String>,

    /// Output client format type for the written configuration.
    #[arg(long = "outputf", value_name = "FORMAT", global = true)]
    output_format: Option<String>,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered chainspec format names.
    #[command(name = "ls-formats")]
    LsFormats,

    /// List the built-in default chain names.
    #[command(name = "ls-defaults")]
    LsDefaults,

    /// Check the specification's consistency at a block height.
    Validate {
        /// Block height to check at.
        height: u64,
    },

    /// Print the fork activation heights, ascending, one per line.
    Forks,

    /// Print the feature activation triggers, one `name height` per line.
    Ips,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Tracing goes to stderr; command output owns stdout.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let formats = format_registry();
    let defaults = default_registry();

    // Listing commands bypass resolution entirely.
    match cli.command {
        Some(Command::LsFormats) => {
            for name in formats.names() {
                println!("{name}");
            }
            return Ok(0);
        }
        Some(Command::LsDefaults) => {
            for name in defaults.names() {
                println!("{name}");
            }
            return Ok(0);
        }
        _ => {}
    }

    let options = ResolveOptions {
        default_chain: cli.default_chain.as_deref(),
        input_format: cli.input_format.as_deref(),
        file: cli.file.as_deref(),
    };
    let mut stdin = std::io::stdin().lock();
    let spec = resolve_spec(&formats, &defaults, &options, &mut stdin)?;

    match cli.command {
        None => {
            let printed =
                commands::print_or_convert(spec.as_ref(), cli.output_format.as_deref(), &formats)?;
            println!("{printed}");
        }
        Some(Command::Validate { height }) => {
            commands::check_consistency(spec.as_ref(), height)?;
        }
        Some(Command::Forks) => {
            for line in commands::fork_lines(spec.as_ref()) {
                println!("{line}");
            }
        }
        Some(Command::Ips) => {
            for line in commands::ips_lines(spec.as_ref()) {
                println!("{line}");
            }
        }
        Some(Command::LsFormats) | Some(Command::LsDefaults) => {}
    }
    Ok(0)
}
