// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod engine;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;
pub mod scrape;
pub mod source;
pub mod specs;
pub mod store;

pub use data::{EntityRecord, PageResult, Record, ReviewRecord, Section};
pub use error::{Error, ExtractError, MissingSection, Result};
pub use specs::{extract, EntityType};
