use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use padcalc::{Config, Engine, Environment, TextLoop, evaluate_expression};

#[derive(Parser)]
#[command(name = "padcalc")]
#[command(about = "A keypad-style calculator with a text command loop", version)]
struct Cli {
    /// Path to config.toml (default: <config dir>/padcalc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read `<number> <op> <number>` or `<function> <number>` lines (default)
    Repl,

    /// Feed keypad labels to the engine, printing the display after each
    Keys {
        /// Labels such as `7`, `×`, `sqrt`, `=`, `MS`; read from stdin when omitted
        labels: Vec<String>,
    },

    /// Evaluate a single expression
    Eval {
        expression: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path),
        None => Config::load_default(),
    }
}

fn run_keys<S: AsRef<str>>(engine: &mut Engine, labels: &[S], out: &mut impl Write) -> Result<()> {
    for label in labels {
        match engine.press(label.as_ref()) {
            Ok(display) => writeln!(out, "{display}")?,
            Err(err) => warn!(%err, "ignoring key"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(cli.config).context("Failed to load configuration")?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let mut text_loop = TextLoop::new(Environment::from_config(&config), config.precision);
            if stdin.is_terminal() {
                text_loop = text_loop.with_prompt("> ");
            }
            text_loop
                .run(stdin.lock(), &mut stdout)
                .context("Text loop I/O failed")?;
        }
        Commands::Keys { labels } => {
            let mut engine = Engine::with_config(&config);
            if labels.is_empty() {
                for line in stdin.lock().lines() {
                    let line = line.context("Failed to read keys from stdin")?;
                    let labels: Vec<&str> = line.split_whitespace().collect();
                    run_keys(&mut engine, &labels, &mut stdout)?;
                }
            } else {
                run_keys(&mut engine, &labels, &mut stdout)?;
            }
        }
        Commands::Eval { expression, json } => {
            let env = Environment::from_config(&config);
            let result = evaluate_expression(&expression, &env, config.precision);
            if json {
                let rendered = serde_json::to_string_pretty(&result)?;
                writeln!(stdout, "{rendered}")?;
            } else if let Some(err) = result.error() {
                anyhow::bail!("{err}");
            } else {
                writeln!(stdout, "{}", result.display())?;
            }
        }
    }

    Ok(())
}
