//! Discovery, per-file processing and the polling run loop.

pub mod notify;
pub mod outcome;
pub mod scan;
pub mod watch;

pub use notify::{deliver, LogNotifier, Notifier, NotifyError};
pub use outcome::{LinkMethod, Outcome, RunStats, SkipReason};
pub use scan::{discover, is_media_file, MEDIA_EXTENSIONS};
pub use watch::{Phase, Watcher};
