// src/config/options.rs
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::core::sanitize::sanitize_id_filename;
use crate::engine::SelectorSet;
use crate::error::{Error, Result};
use crate::specs::EntityType;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    /// Per-entity-type selector overrides, keyed by type name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub selectors: BTreeMap<String, SelectorSet>,
}

impl AppOptions {
    /// Effective selectors for `kind`: the configured override, else the built-in set.
    pub fn selectors_for(&self, kind: EntityType) -> SelectorSet {
        self.selectors
            .iter()
            .find(|(name, _)| name.parse::<EntityType>().ok() == Some(kind))
            .map(|(_, set)| set.clone())
            .unwrap_or_else(|| kind.default_selectors())
    }

    /// Every override key must name a known entity type, and every id must
    /// be unique (including its page directory name for directory sources).
    pub fn validate(&self) -> Result<()> {
        for name in self.selectors.keys() {
            name.parse::<EntityType>()?;
        }
        if self.scrape.page_size == 0 {
            return Err(Error::Options(s!("page_size must be at least 1")));
        }
        self.scrape.validate_ids()
    }
}

impl ScrapeOptions {
    pub fn validate_ids(&self) -> Result<()> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for id in &self.ids {
            if id.trim().is_empty() {
                return Err(Error::Options(s!("entity ids must not be empty")));
            }
            let key = match self.source {
                SourceKind::Dir(_) => sanitize_id_filename(id),
                SourceKind::Url(_) => id.clone(),
            };
            if let Some(prev) = seen.insert(key, id) {
                return Err(Error::Options(if prev == id.as_str() {
                    format!("duplicate entity id {id:?}")
                } else {
                    format!("entity ids {prev:?} and {id:?} share a page directory")
                }));
            }
        }
        Ok(())
    }
}

/// Where pages come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Captured pages: `<dir>/<id>/<page_index>.html`.
    Dir(PathBuf),
    /// Live pages from a URL template with `{id}`, `{page}`, `{offset}`.
    Url(String),
}

impl Default for SourceKind {
    fn default() -> Self {
        SourceKind::Dir(PathBuf::from(DEFAULT_PAGES_DIR))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    pub entity_type: EntityType,
    pub ids: Vec<String>,
    pub source: SourceKind,
    pub page_size: usize,
    /// Stop after this many pages per id even if more exist.
    pub max_pages: Option<usize>,
    pub workers: usize,
    pub request_pause_ms: u64,
    pub jitter_ms: u64,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            entity_type: EntityType::Attraction,
            ids: Vec::new(),
            source: SourceKind::default(),
            page_size: PAGE_SIZE,
            max_pages: None,
            workers: WORKERS,
            request_pause_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
            user_agent: s!(USER_AGENT),
            timeout_secs: TIMEOUT_SECS,
        }
    }
}

impl ScrapeOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pause before a request; jitter is derived from the id and page so runs
    /// stay reproducible.
    pub fn pause_for(&self, id: &str, page_index: usize) -> Duration {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            let seed = id.bytes().fold(page_index as u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            seed % self.jitter_ms
        };
        Duration::from_millis(self.request_pause_ms + jitter)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Jsonl,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Jsonl => "jsonl", ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    /// Field separator for delimited formats; `None` for JSON Lines.
    pub fn delim(&self) -> Option<char> {
        match self { ExportFormat::Jsonl => None, ExportFormat::Csv => Some(','), ExportFormat::Tsv => Some('\t') }
    }
}

/// Which records a delimited export flattens. JSON Lines always carries both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Reviews,
    Entities,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub records: RecordKind,
    /// File or directory. `None` means `out/reviews.<ext>`.
    pub out_path: Option<PathBuf>,
    pub include_headers: bool,
    /// JSON Lines record store the scrape writes to.
    pub store_path: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jsonl,
            records: RecordKind::Reviews,
            out_path: None,
            include_headers: true,
            store_path: Path::new(STORE_DIR).join(STORE_FILE),
        }
    }
}

impl ExportOptions {
    pub fn default_file_name(&self) -> String {
        join!(DEFAULT_FILE, ".", self.format.ext())
    }

    /// Resolved export file. A directory (existing, or written with a trailing
    /// separator) gets the default file name appended.
    pub fn out_path(&self) -> PathBuf {
        match &self.out_path {
            None => Path::new(DEFAULT_OUT_DIR).join(self.default_file_name()),
            Some(p) if p.is_dir() || crate::file::looks_like_dir_hint(p) => p.join(self.default_file_name()),
            Some(p) => p.clone(),
        }
    }

    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        self.out_path = if s.is_empty() { None } else { Some(PathBuf::from(s)) };
    }
}
