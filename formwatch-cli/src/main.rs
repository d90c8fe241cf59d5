//! Formwatch CLI - emails a digest of new contact form submissions

#![deny(warnings)]

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use formwatch_core::{fetch, render, CheckWindow, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "formwatch")]
#[command(about = "Checks a contact store for new submissions and emails an HTML digest")]
#[command(version = env!("FORMWATCH_VERSION"))]
struct Cli {
    /// Path to an env file to load before reading configuration
    /// (default: .env in the working directory, when present)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one check: fetch new submissions and email the digest
    Run,
    /// Fetch the current window and print it without sending anything
    Preview {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment overrides before any configuration is read. A
    // missing default .env is fine; an explicitly named file is not.
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file: {}", path.display()))?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    let settings = Settings::from_env().context("configuration error")?;

    match cli.command {
        Commands::Run => {
            // Outcome status lines are emitted per phase by the pipeline;
            // recovered store/transport failures end the run normally.
            formwatch_core::run_check(&settings, Utc::now());
            Ok(())
        }
        Commands::Preview { format } => {
            let window = CheckWindow::compute(Utc::now(), settings.check_interval_hours);
            eprintln!("Checking for contacts since: {}", window.sql_bound());

            let contacts = fetch::fetch_new_contacts(&settings.database_url, &window);
            match format {
                OutputFormat::Text => {
                    print!("{}", render::render_text(&contacts));
                }
                OutputFormat::Json => {
                    println!("{}", render::render_json(&contacts));
                }
                OutputFormat::Html => match render::render_html_report(&contacts) {
                    Some(report) => println!("{}", report.html),
                    None => eprintln!("No new contacts found."),
                },
            }
            Ok(())
        }
    }
}
