//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the shared value model.
//! CONTEXT: Re-exports public types used by the grid pipeline crate.

pub mod cell;
pub mod record;

// Re-export commonly used types at the crate root
pub use cell::{CellError, CellValue};
pub use record::Record;
