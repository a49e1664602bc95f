//! Debug console log - Entry Point

use clap::Parser;
use dbgcon::config::{self, ResolvedConfig};
use dbgcon::model::AppError;
use dbgcon::repl::ReplModel;
use dbgcon::{export, logging, transcript};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

/// Debug console log - replays a console transcript and prints the log
#[derive(Parser, Debug)]
#[command(name = "dbgcon")]
#[command(version)]
#[command(about = "Replay a JSONL debug console transcript and print the resulting log")]
pub struct Args {
    /// Path to JSONL transcript (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep identical consecutive lines as separate entries
    #[arg(long)]
    pub no_collapse: bool,

    /// Append the source file name to output lines
    #[arg(long)]
    pub sources: bool,

    /// Path to log file for diagnostics
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log debug-level diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolve configuration with full precedence chain:
    /// Defaults → Config File → Env Vars → CLI Args
    fn resolve_config(&self) -> Result<ResolvedConfig, AppError> {
        let config_file = config::load_config_with_precedence(self.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);

        // Flags only override when explicitly set
        let collapse_override = self.no_collapse.then_some(false);
        let sources_override = self.sources.then_some(true);

        Ok(config::apply_cli_overrides(
            with_env,
            collapse_override,
            sources_override,
            self.log_file.clone(),
        ))
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String, AppError> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };
    Ok(input)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config = args.resolve_config()?;

    logging::init(&config.log_file_path, args.verbose)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let input = read_input(args.file.as_ref())?;
    let parsed = transcript::parse_transcript(&input);
    for error in &parsed.errors {
        eprintln!("dbgcon: skipped {error}");
    }

    let mut model = ReplModel::new(config.console());
    transcript::replay(&mut model, parsed.events).await;

    info!(entries = model.len(), "Replay finished");

    print!("{}", export::render_log(model.entries(), config.include_source));
    Ok(())
}
