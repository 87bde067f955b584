use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use tatter::{ShredConfig, Shredder};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Tatter - overwrite files with random data several times, then delete them
#[derive(Parser, Debug)]
#[command(name = "tatter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to shred
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Number of overwrite passes (at least 3)
    #[arg(short, long)]
    passes: Option<usize>,

    /// Do not flush overwritten data to storage before removing
    #[arg(long)]
    no_sync: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Use RUST_LOG environment variable to control log level (e.g., RUST_LOG=tatter=debug)
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    info!(files = cli.paths.len(), "tatter starting");

    let no_sync = cli.no_sync.then_some(false);
    let cfg = ShredConfig::resolve(cli.config.as_deref())?.with_overrides(cli.passes, no_sync);
    cfg.validate()?;

    if !cli.yes && !confirm(&cli.paths)? {
        println!("Cancelled.");
        return Ok(());
    }

    let shredder = Shredder::from_config(&cfg);
    let mut failed = 0usize;

    for path in &cli.paths {
        let spinner = create_spinner(&format!("Shredding {}...", path.display()));

        match shredder.shred(path).await {
            Ok(summary) => spinner.finish_with_message(format!(
                "Shredded {} ({} bytes, {} passes)",
                path.display(),
                summary.bytes,
                summary.passes
            )),
            Err(e) if e.content_destroyed() => {
                failed += 1;
                spinner.finish_with_message(format!(
                    "Content of {} destroyed, but the path still exists: {}",
                    path.display(),
                    e
                ));
            }
            Err(e) => {
                failed += 1;
                spinner.finish_with_message(format!(
                    "Failed to shred {}, file left in place: {}",
                    path.display(),
                    e
                ));
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} file(s) could not be shredded", failed, cli.paths.len());
    }

    Ok(())
}

/// Create a spinner for a single file
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Ask before destroying anything. Only an explicit "y" proceeds.
fn confirm(paths: &[PathBuf]) -> Result<bool> {
    for path in paths {
        println!("  {}", path.display());
    }
    print!(
        "Permanently destroy {} file(s)? This cannot be undone. [y/N]: ",
        paths.len()
    );
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;

    Ok(response.trim().eq_ignore_ascii_case("y"))
}
