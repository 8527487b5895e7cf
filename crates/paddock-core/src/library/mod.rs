//! Library side of the pipeline: where a classified release goes and how it
//! gets there.

pub mod materialize;
pub mod path;

pub use materialize::{materialize, Materialized};
pub use path::{sanitize_component, DestinationPath};
