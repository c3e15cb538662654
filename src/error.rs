// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

use crate::data::Section;

/// Failures that cross the extractor boundary.
///
/// Structural absences inside a page are *not* here: they surface as
/// [`MissingSection`] and are absorbed by the extractor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("unsupported entity type: {0:?}")]
    UnsupportedEntityType(String),

    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("entity id must not be empty")]
    EmptyId,
}

/// A section the selectors look for but the page (or review node) lacks.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("missing {section} section")]
pub struct MissingSection {
    pub section: Section,
}

impl MissingSection {
    pub fn new(section: Section) -> Self {
        Self { section }
    }
}

/// Crate-wide error for the driver, store, export and CLI layers.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bad record on line {line} of {path}: {source}")]
    Record {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("bad config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    ConfigWrite(#[from] toml::ser::Error),

    #[cfg(feature = "http")]
    #[error("HTTP request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("{0}")]
    Options(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
