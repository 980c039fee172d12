// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env, set up logging, parse command-line arguments
// 2. Read the README (the only fatal failure: exit code 1)
// 3. Fetch every section and patch it into the README
// 4. Write the README back (or print it with --dry-run)
//
// Exit codes: 0 = success, 1 = README missing/unreadable, 2 = other error.
// A source that fails to fetch never changes the exit code; its section just
// gets a placeholder.
// =============================================================================

mod cli;
mod config;
mod format;
mod github;
mod readme;
mod source;
mod update;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;
use update::Updater;

#[tokio::main]
async fn main() {
    setup_env_and_tracing();

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let exit_code = match run(Cli::parse(), &mut stdout, &mut stderr).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn setup_env_and_tracing() {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// Parameters:
//   out: where the process's stdout goes
//   err: where the process's stderr goes
//
// With --dry-run stdout carries the README itself, so the progress lines
// move to stderr and `readme-refresh --dry-run > preview.md` stays clean.
async fn run<'a>(cli: Cli, out: &'a mut dyn Write, err: &'a mut dyn Write) -> Result<i32> {
    let config = Config::from_cli(cli);

    let (progress, document_out): (&mut dyn Write, Option<&mut dyn Write>) = if config.dry_run {
        (err, Some(out))
    } else {
        (out, None)
    };

    writeln!(progress, "Starting README update...")?;

    let document = match readme::read_document(&config.readme_path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(1);
        }
    };

    if !config.has_token() {
        tracing::info!("no GitHub token configured, featured projects and releases will be skipped");
    }

    let http = source::http_client(&config).context("failed to build HTTP client")?;
    let updater = Updater::default_sources(&config, http);
    let updated = updater.refresh(&document, progress).await;

    if let Some(document_out) = document_out {
        write!(document_out, "{}", updated)?;
        return Ok(0);
    }

    readme::write_document(&config.readme_path, &updated)?;
    writeln!(progress, "README updated successfully!")?;
    Ok(0)
}
