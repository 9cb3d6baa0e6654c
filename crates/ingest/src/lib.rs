//! # Orderlens Ingest Crate
//!
//! Turns a directory of Amazon order exports (tab-delimited flat files) into
//! the normalised `OrderRecord` collection the analytics consume.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** The only crate that touches the filesystem. Everything
//!   downstream sees immutable records, never raw text.
//! - **Lenient by Default:** Dirty cells are defaulted and counted in a `ParseAudit`;
//!   a malformed row is skipped with a warning. Only I/O failures abort a load.
//! - **Deterministic:** Files are read in sorted path order and rows in file order,
//!   so the same directory always yields the same record sequence.
//!
//! ## Public API
//!
//! - `discover_files`: Finds the export files matching a pattern.
//! - `load_file`: Reads and normalises a single export.
//! - `load_orders`: Discovers and loads every export described by `InputSettings`.
//! - `IngestError`: The specific error types that can be returned from this crate.

pub mod discovery;
pub mod error;
pub mod reader;

pub use discovery::discover_files;
pub use error::IngestError;
pub use reader::{FileLoad, LoadStats, LoadedOrders, load_file, load_orders};
