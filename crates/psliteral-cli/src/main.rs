//! `psliteral` CLI: parse, serialize, and convert PowerShell literal objects.
//!
//! ## Usage
//!
//! ```sh
//! # Parse a literal into JSON (stdin → stdout)
//! echo '@{ Name = "svc01"; Retries = 3 }' | psliteral parse
//!
//! # Serialize a JSON value list back into a literal
//! psliteral serialize -i values.json --type pscustomobject
//!
//! # Convert PowerShell text values into host values
//! psliteral convert --direction host -i values.json -o host.json
//!
//! # Debug logging
//! RUST_LOG=psliteral_core=trace psliteral parse -i params.ps1
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use psliteral_core::json::{convert_json, parse_to_json, serialize_json};
use psliteral_core::{Direction, LiteralType};
use std::io::{self, Read};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "psliteral",
    version,
    about = "PowerShell hashtable/PSCustomObject literal CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log parser and converter activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a PowerShell literal into a JSON value list
    Parse {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit compact instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },
    /// Serialize a JSON value list into a PowerShell literal
    Serialize {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Literal type: hashtable, pscustomobject, or object
        #[arg(long = "type")]
        literal_type: Option<String>,
    },
    /// Convert the values of a JSON value list between host and PowerShell form
    Convert {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Conversion target
        #[arg(short, long, value_enum)]
        direction: DirectionArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Host,
    Powershell,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Host => Direction::Host,
            DirectionArg::Powershell => Direction::PowerShell,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Parse {
            input,
            output,
            compact,
        } => {
            let text = read_input(input.as_deref())?;
            let parser = psliteral_core::Parser::new().context("Failed to build parser")?;
            let json = parse_to_json(&parser, &text, !compact)
                .context("Failed to parse PowerShell literal")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Serialize {
            input,
            output,
            literal_type,
        } => {
            let literal_type = literal_type
                .as_deref()
                .map(str::parse::<LiteralType>)
                .transpose()
                .context("Invalid --type")?;
            let json = read_input(input.as_deref())?;
            let code = serialize_json(&json, literal_type)
                .context("Failed to serialize values to a PowerShell literal")?;
            write_output(output.as_deref(), &code)?;
        }
        Commands::Convert {
            input,
            output,
            direction,
        } => {
            let direction = Direction::from(direction);
            let json = read_input(input.as_deref())?;
            let converted = convert_json(&json, direction, true)
                .with_context(|| format!("Failed to convert values to {}", direction))?;
            write_output(output.as_deref(), &converted)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG` wins
/// over `--verbose`.
fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "psliteral_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
