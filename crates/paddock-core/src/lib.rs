//! # Paddock Core
//!
//! Classification engine for sports release filenames. A release name is
//! routed to its sport family, parsed into season, round and location, and its
//! session tokens are resolved to a stable `(title, episode)` slot. The library
//! side turns that address into a media-server friendly path and hardlinks the
//! source into place, falling back to a copy.
//!
//! ## Quick Start
//!
//! ```rust
//! use paddock_core::parser::Classifier;
//!
//! let classifier = Classifier::new().unwrap();
//! let c = classifier
//!     .classify_name("Formula1.2024.Round01.Bahrain.Practice.Session.1.mkv")
//!     .unwrap();
//!
//! assert_eq!(c.address.sport_label, "Formula 1");
//! assert_eq!(c.address.session.title, "Free Practice");
//! assert_eq!(c.address.session.episode, 3);
//! ```
pub mod config;
pub mod error;
pub mod library;
pub mod parser;
pub mod runner;
pub mod session;
pub mod types;

// Re-export primary API
pub use config::WatchConfig;
pub use error::{PaddockError, Result};
pub use library::{materialize, DestinationPath, Materialized};
pub use parser::{Classification, Classifier, Dispatcher, FamilyParser, Tokenizer};
pub use runner::{LogNotifier, Notifier, Outcome, Phase, RunStats, Watcher};
pub use types::{CanonicalAddress, Family, ParsedRelease, ReleaseName, RoundKey, Session};
