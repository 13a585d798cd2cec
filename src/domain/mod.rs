//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw tabular input (`Cell`, `Table`)
//! - the validated rating series (`RatingSeries`) and its buckets (`Bucket`)
//! - run configuration (`RunConfig`, `ChartMode`)

pub mod types;

pub use types::*;
