//! Reporting: the text summary printed after a successful run.

pub mod format;

pub use format::*;
