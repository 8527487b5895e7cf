//! Paddock
//!
//! Process shell around `paddock-core`: reads configuration from flags or the
//! environment, installs logging and the interrupt handler, and runs either
//! the polling loop, a single scan, or bare classification.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use paddock_core::library::DestinationPath;
use paddock_core::types::{CanonicalAddress, ReleaseName};
use paddock_core::{Classifier, LogNotifier, WatchConfig, Watcher};
use serde::Serialize;
use tracing::{info, Level};

/// CLI arguments
#[derive(Parser)]
#[command(name = "paddock")]
#[command(about = "Classify sports releases and file them into a media library")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan once, then keep polling for new releases until interrupted
    Watch(RunArgs),
    /// Scan the source tree once and exit
    Once(RunArgs),
    /// Classify names given as arguments (or one per stdin line) and print JSON
    Classify {
        /// Release file names or paths
        names: Vec<String>,

        /// Scan root the paths are relative to; their parent directories
        /// then count as release containers
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Download tree to scan
    #[arg(short, long, env = "SOURCE_DIR")]
    source: PathBuf,

    /// Library root to file releases under
    #[arg(short, long, env = "DESTINATION_DIR")]
    destination: PathBuf,

    /// Minutes between polls
    #[arg(short, long, env = "PROCESS_INTERVAL", default_value_t = 1)]
    interval: u64,

    /// Send per-file and summary notifications
    #[arg(short, long, env = "NOTIFICATIONS")]
    notifications: bool,

    /// Classify and report without writing to the library
    #[arg(long, env = "DRY_RUN")]
    dry_run: bool,
}

impl RunArgs {
    fn into_config(self) -> Result<WatchConfig> {
        let config = WatchConfig::new(self.source, self.destination)
            .with_poll_interval(Duration::from_secs(self.interval.saturating_mul(60)))
            .with_notifications(self.notifications)
            .with_dry_run(self.dry_run);
        config.validate().context("startup validation failed")?;
        Ok(config)
    }
}

/// One line of `paddock classify` output.
#[derive(Debug, Serialize)]
struct ClassifyOutput {
    input: String,
    address: Option<CanonicalAddress>,
    destination: Option<PathBuf>,
    error: Option<String>,
}

fn classify_one(classifier: &Classifier, name: &str, root: Option<&Path>) -> ClassifyOutput {
    let release = match root {
        Some(root) => ReleaseName::discovered(name, root),
        None => ReleaseName::standalone(name),
    };
    let result = release
        .and_then(|release| classifier.classify(&release).map(|c| (release, c)));
    match result {
        Ok((release, c)) => ClassifyOutput {
            input: name.to_string(),
            destination: Some(DestinationPath::for_address(&c.address, &release.extension).relative()),
            address: Some(c.address),
            error: None,
        },
        Err(e) => ClassifyOutput {
            input: name.to_string(),
            address: None,
            destination: None,
            error: Some(e.to_string()),
        },
    }
}

fn classify(names: Vec<String>, root: Option<PathBuf>) -> Result<()> {
    let classifier = Classifier::new().context("building classifier")?;
    let names = if names.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("reading names from stdin")?
    } else {
        names
    };

    let mut out = io::stdout().lock();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let line = serde_json::to_string(&classify_one(&classifier, name, root.as_deref()))?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn watcher(args: RunArgs) -> Result<Watcher> {
    let config = args.into_config()?;
    info!(
        source = %config.source_root.display(),
        destination = %config.destination_root.display(),
        dry_run = config.dry_run,
        "starting"
    );
    Watcher::new(config, Box::new(LogNotifier)).context("building classifier")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Watch(args) => {
            let mut watcher = watcher(args)?;
            let shutdown = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&shutdown);
            ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
                .context("installing interrupt handler")?;

            let stats = watcher.run(&shutdown);
            info!("stopped: {stats}");
        }
        Commands::Once(args) => {
            let stats = watcher(args)?.run_once();
            info!("done: {stats}");
        }
        Commands::Classify { names, root } => classify(names, root)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::types::RoundKey;

    const NESTED: &str = "/downloads/MotoGP 2025 Round04/motogp.2025.qatar.race.mkv";

    #[test]
    fn parent_directory_is_a_container_only_under_a_root() {
        let classifier = Classifier::new().unwrap();

        let bare = classify_one(&classifier, NESTED, None);
        assert_eq!(bare.address.unwrap().round, RoundKey::Pseudo("QATAR".into()));

        let rooted = classify_one(&classifier, NESTED, Some(Path::new("/downloads")));
        assert_eq!(rooted.address.unwrap().round, RoundKey::Number(4));
        assert!(rooted.destination.is_some());
        assert!(rooted.error.is_none());
    }

    #[test]
    fn unparseable_names_report_an_error() {
        let out = classify_one(&Classifier::new().unwrap(), "Nascar.2024.Daytona.Race.mkv", None);
        assert!(out.address.is_none());
        assert!(out.error.is_some());
    }
}
