//! Input/output helpers.
//!
//! - CSV / spreadsheet loading (`table`)
//! - JSON summary export (`export`)

pub mod export;
pub mod table;

pub use export::*;
pub use table::*;
