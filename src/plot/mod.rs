//! Rating distribution plots (binning + ASCII rendering).

pub mod ascii;

pub use ascii::*;
