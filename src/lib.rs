//! `nps-report` library crate.
//!
//! The binary (`nps`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes or typing into prompts
//! - loading, extraction, and aggregation stay independent of presentation

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod nps;
pub mod plot;
pub mod ratings;
pub mod report;
pub mod tui;
