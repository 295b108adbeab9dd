use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chatmatch::logging::init_tracing;
use chatmatch::{CommandFile, Registry};

/// Match chat messages against the commands declared in a command file.
#[derive(Debug, Parser)]
#[command(name = "chatmatch", version, about)]
struct Cli {
    /// Command file (default: <config dir>/chatmatch/commands.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the registered definitions as JSON and exit
    #[arg(short, long)]
    list: bool,

    /// Log registration and matching at debug level on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Messages to match. Reads one message per line from stdin when omitted.
    messages: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let registry = load_registry(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        serde_json::to_writer(&mut out, registry.definitions())?;
        writeln!(out)?;
        return Ok(());
    }

    if cli.messages.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read message from stdin")?;
            print_match(&registry, &line, &mut out)?;
        }
    } else {
        for message in &cli.messages {
            print_match(&registry, message, &mut out)?;
        }
    }

    Ok(())
}

fn load_registry(path: Option<&std::path::Path>) -> Result<Registry> {
    let file = match path {
        Some(path) => CommandFile::load_from(path)?,
        None => CommandFile::load()?,
    };
    let commands = file.commands.len();
    let registry = file.into_registry()?;
    tracing::debug!(
        commands,
        prefix = %registry.settings().prefix,
        "Loaded command file"
    );
    Ok(registry)
}

/// One JSON line per message: `null` or the array of results.
fn print_match(registry: &Registry, message: &str, out: &mut impl Write) -> Result<()> {
    let results = registry.match_message(message);
    serde_json::to_writer(&mut *out, &results)?;
    writeln!(out)?;
    Ok(())
}
