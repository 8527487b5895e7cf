//! # Run Loop
//!
//! `InitialScan -> SteadyPoll -> ShuttingDown`. The initial scan walks the
//! whole source tree; steady polls only look at files modified within the
//! last `interval + 1 minute`. Shutdown is cooperative: the flag is checked
//! between files and between sleep chunks, and the current counters are always
//! flushed as a final summary.
//!
//! A file that fails classification is retried only while its modification
//! time stays inside the lookback window.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use tracing::{debug, info, warn};

use super::notify::{deliver, Notifier};
use super::outcome::{LinkMethod, Outcome, RunStats, SkipReason};
use super::scan::discover;
use crate::config::WatchConfig;
use crate::error::Result;
use crate::library::{materialize, DestinationPath, Materialized};
use crate::parser::tokenizer::is_sample;
use crate::parser::Classifier;
use crate::types::ReleaseName;

const SLEEP_CHUNK: Duration = Duration::from_secs(1);

pub const INITIAL_SUMMARY_TITLE: &str = "Initial Scan Summary";
pub const POLL_SUMMARY_TITLE: &str = "Summary";
pub const FINAL_SUMMARY_TITLE: &str = "Final Summary";

/// Run loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InitialScan,
    SteadyPoll,
    ShuttingDown,
}

/// Drives classification and materialization over the source tree.
pub struct Watcher {
    config: WatchConfig,
    classifier: Classifier,
    notifier: Box<dyn Notifier>,
    stats: RunStats,
    phase: Phase,
}

impl Watcher {
    /// # Errors
    ///
    /// Returns `PaddockError::RegexError` if the classifier cannot be built.
    pub fn new(config: WatchConfig, notifier: Box<dyn Notifier>) -> Result<Self> {
        Ok(Self {
            config,
            classifier: Classifier::new()?,
            notifier,
            stats: RunStats::default(),
            phase: Phase::InitialScan,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Classifies and materializes one source file. Never panics and never
    /// touches the source.
    pub fn process_file(&self, path: &Path) -> Outcome {
        let source = path.to_path_buf();
        let release = match ReleaseName::discovered(path, &self.config.source_root) {
            Ok(release) => release,
            Err(error) => return Outcome::Failed { source, error },
        };

        if is_sample(&release.file_name()) {
            return Outcome::Skipped {
                source,
                reason: SkipReason::Sample,
            };
        }

        let classification = match self.classifier.classify(&release) {
            Ok(c) => c,
            Err(error) => return Outcome::Failed { source, error },
        };
        let destination = DestinationPath::for_address(&classification.address, &release.extension)
            .under(&self.config.destination_root);

        if self.config.dry_run {
            return if destination.symlink_metadata().is_ok() {
                Outcome::Skipped {
                    source,
                    reason: SkipReason::DestinationExists,
                }
            } else {
                Outcome::Processed {
                    source,
                    destination,
                    method: LinkMethod::DryRun,
                }
            };
        }

        match materialize(path, &destination) {
            Ok(Materialized::Linked) => Outcome::Processed {
                source,
                destination,
                method: LinkMethod::Hardlink,
            },
            Ok(Materialized::Copied) => Outcome::Processed {
                source,
                destination,
                method: LinkMethod::Copy,
            },
            Ok(Materialized::AlreadyExists) => Outcome::Skipped {
                source,
                reason: SkipReason::DestinationExists,
            },
            Err(error) => Outcome::Failed { source, error },
        }
    }

    /// Processes a file and folds its outcome into the counters.
    fn handle(&mut self, path: &Path) {
        let outcome = self.process_file(path);
        match &outcome {
            Outcome::Processed {
                destination,
                method,
                ..
            } => info!(%method, "{} -> {}", path.display(), destination.display()),
            Outcome::Skipped { reason, .. } => debug!(%reason, "skipped {}", path.display()),
            Outcome::Failed { error, .. } => warn!("{}: {error}", path.display()),
        }

        self.stats.record(&outcome);
        if self.config.notifications {
            let (message, title) = outcome.notification();
            deliver(self.notifier.as_ref(), &message, &title);
        }
    }

    /// Handles every media file modified since `since` (all files when
    /// `None`). Stops early on shutdown. Returns how many files were handled.
    fn scan(&mut self, since: Option<SystemTime>, shutdown: &AtomicBool) -> usize {
        let files = discover(&self.config.source_root, since);
        let mut handled = 0;
        for path in &files {
            if shutdown.load(Ordering::SeqCst) {
                debug!("shutdown requested, {} files left", files.len() - handled);
                break;
            }
            self.handle(path);
            handled += 1;
        }
        handled
    }

    fn emit_summary(&self, title: &str) {
        info!("{title}: {}", self.stats);
        if self.config.notifications {
            let (message, title) = self.stats.summary(title);
            deliver(self.notifier.as_ref(), &message, &title);
        }
    }

    /// Sleeps one poll interval in short chunks. Returns `false` if shutdown
    /// was requested meanwhile.
    fn sleep(&self, shutdown: &AtomicBool) -> bool {
        let deadline = Instant::now() + self.config.poll_interval;
        loop {
            if shutdown.load(Ordering::SeqCst) {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(SLEEP_CHUNK));
        }
    }

    fn initial_scan(&mut self, shutdown: &AtomicBool) {
        self.phase = Phase::InitialScan;
        self.stats.reset();
        info!("initial scan of {}", self.config.source_root.display());
        self.scan(None, shutdown);
    }

    /// Runs the initial scan only, emits its summary and returns the counters.
    pub fn run_once(&mut self) -> RunStats {
        let never = AtomicBool::new(false);
        self.initial_scan(&never);
        self.emit_summary(INITIAL_SUMMARY_TITLE);
        let stats = self.stats;
        self.phase = Phase::ShuttingDown;
        stats
    }

    /// Runs the full state machine until `shutdown` is set. Returns the
    /// counters flushed in the final summary.
    pub fn run(&mut self, shutdown: &AtomicBool) -> RunStats {
        self.initial_scan(shutdown);
        self.emit_summary(INITIAL_SUMMARY_TITLE);
        self.stats.reset();

        self.phase = Phase::SteadyPoll;
        let lookback = self.config.lookback();
        info!(interval = ?self.config.poll_interval, ?lookback, "watching for new releases");

        while self.sleep(shutdown) {
            let since = SystemTime::now()
                .checked_sub(lookback)
                .unwrap_or(SystemTime::UNIX_EPOCH);
            let observed = self.scan(Some(since), shutdown);
            if observed > 0 {
                self.emit_summary(POLL_SUMMARY_TITLE);
                self.stats.reset();
            } else {
                debug!("no recently modified releases");
            }
        }

        self.phase = Phase::ShuttingDown;
        info!("shutting down");
        self.emit_summary(FINAL_SUMMARY_TITLE);
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaddockError;
    use crate::runner::notify::NotifyError;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Records titles and raises the shutdown flag once `stop_on` arrives.
    struct Recorder {
        titles: Rc<RefCell<Vec<String>>>,
        stop_on: &'static str,
        shutdown: Arc<AtomicBool>,
    }

    impl Notifier for Recorder {
        fn notify(&self, _message: &str, title: &str) -> std::result::Result<(), NotifyError> {
            self.titles.borrow_mut().push(title.to_string());
            if title == self.stop_on {
                self.shutdown.store(true, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    struct Fixture {
        _source: TempDir,
        _library: TempDir,
        source: PathBuf,
        library: PathBuf,
    }

    fn fixture(files: &[&str]) -> Fixture {
        let source = TempDir::new().unwrap();
        let library = TempDir::new().unwrap();
        for name in files {
            let path = source.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, name.as_bytes()).unwrap();
        }
        Fixture {
            source: source.path().to_path_buf(),
            library: library.path().to_path_buf(),
            _source: source,
            _library: library,
        }
    }

    fn watcher(f: &Fixture, notifier: Box<dyn Notifier>) -> Watcher {
        let config = WatchConfig::new(&f.source, &f.library)
            .with_poll_interval(Duration::from_millis(10))
            .with_notifications(true);
        Watcher::new(config, notifier).unwrap()
    }

    fn recorder(stop_on: &'static str) -> (Recorder, Rc<RefCell<Vec<String>>>, Arc<AtomicBool>) {
        let titles = Rc::new(RefCell::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));
        let recorder = Recorder {
            titles: Rc::clone(&titles),
            stop_on,
            shutdown: Arc::clone(&shutdown),
        };
        (recorder, titles, shutdown)
    }

    const RELEASES: &[&str] = &[
        "Formula1.2024.Round01.Bahrain.Race.mkv",
        "MotoGP 2025 Round04/motogp.2025.qatar.race.1080p.mkv",
        "ufc.309.jones.vs.miocic.ppv.1080p.mkv",
        "ufc.309.jones.vs.miocic.ppv.sample.mkv",
        "Nascar.2024.Daytona.Race.mkv",
    ];

    #[test]
    fn process_file_outcomes() {
        let f = fixture(RELEASES);
        let (rec, _, _) = recorder("");
        let w = watcher(&f, Box::new(rec));

        match w.process_file(&f.source.join(RELEASES[0])) {
            Outcome::Processed {
                destination,
                method,
                ..
            } => {
                assert_eq!(method, LinkMethod::Hardlink);
                assert_eq!(
                    destination,
                    f.library
                        .join("Formula 1 2024/Round01 Bahrain/Formula 1 2024 - S01E10 - Race.mkv")
                );
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            w.process_file(&f.source.join(RELEASES[0])),
            Outcome::Skipped {
                reason: SkipReason::DestinationExists,
                ..
            }
        ));
        assert!(matches!(
            w.process_file(&f.source.join(RELEASES[3])),
            Outcome::Skipped {
                reason: SkipReason::Sample,
                ..
            }
        ));
        assert!(matches!(
            w.process_file(&f.source.join(RELEASES[4])),
            Outcome::Failed {
                error: PaddockError::UnknownFamily { .. },
                ..
            }
        ));
    }

    #[test]
    fn rerun_is_idempotent() {
        let f = fixture(RELEASES);
        let (rec, _, _) = recorder("");
        let mut w = watcher(&f, Box::new(rec));

        let first = w.run_once();
        assert_eq!(
            first,
            RunStats {
                processed: 3,
                skipped: 1,
                errors: 1
            }
        );
        let ufc = f.library.join("UFC/Season 309/UFC - S309E03 - Main Card.mkv");
        let moto = f
            .library
            .join("MotoGP 2025/Round04 Qatar/MotoGP 2025 - S04E07 - Race.mkv");
        assert_eq!(fs::read(&ufc).unwrap(), RELEASES[2].as_bytes());
        assert!(moto.exists());

        let second = w.run_once();
        assert_eq!(
            second,
            RunStats {
                processed: 0,
                skipped: 4,
                errors: 1
            }
        );
        assert_eq!(fs::read(&ufc).unwrap(), RELEASES[2].as_bytes());
        assert_eq!(w.phase(), Phase::ShuttingDown);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let f = fixture(&RELEASES[..1]);
        let (rec, _, _) = recorder("");
        let config = WatchConfig::new(&f.source, &f.library).with_dry_run(true);
        let mut w = Watcher::new(config, Box::new(rec)).unwrap();

        assert_eq!(w.run_once().processed, 1);
        assert_eq!(fs::read_dir(&f.library).unwrap().count(), 0);
    }

    #[test]
    fn shutdown_after_initial_scan_flushes_final_summary() {
        let f = fixture(&RELEASES[..1]);
        let (rec, titles, shutdown) = recorder(INITIAL_SUMMARY_TITLE);
        let mut w = watcher(&f, Box::new(rec));

        let last = w.run(&shutdown);
        assert!(last.is_empty());
        assert_eq!(w.phase(), Phase::ShuttingDown);
        assert_eq!(
            *titles.borrow(),
            vec!["Processed", INITIAL_SUMMARY_TITLE, FINAL_SUMMARY_TITLE]
        );
    }

    #[test]
    fn steady_poll_sees_recent_files_and_resets() {
        let f = fixture(&RELEASES[..1]);
        let (rec, titles, shutdown) = recorder(POLL_SUMMARY_TITLE);
        let mut w = watcher(&f, Box::new(rec));

        // The file was just written, so it is inside the lookback window and
        // the first poll sees it again, now as an existing destination.
        let last = w.run(&shutdown);
        assert!(last.is_empty());
        assert_eq!(
            *titles.borrow(),
            vec![
                "Processed",
                INITIAL_SUMMARY_TITLE,
                "Skipped",
                POLL_SUMMARY_TITLE,
                FINAL_SUMMARY_TITLE
            ]
        );
    }

    #[test]
    fn notifications_disabled_sends_nothing() {
        let f = fixture(&RELEASES[..1]);
        let (rec, titles, _) = recorder("");
        let config = WatchConfig::new(&f.source, &f.library);
        let mut w = Watcher::new(config, Box::new(rec)).unwrap();
        w.run_once();
        assert!(titles.borrow().is_empty());
    }
}
