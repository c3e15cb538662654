// src/config/mod.rs
pub mod consts;
pub mod file;
pub mod options;

pub use options::{AppOptions, ExportFormat, ExportOptions, RecordKind, ScrapeOptions, SourceKind};
