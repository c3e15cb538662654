// src/specs/mod.rs
//! # Review page specs
//!
//! One spec per **entity type**. Each spec encodes *where the ground truth
//! lives in the HTML* for that kind of review listing: the review container,
//! the four per-review fields, and the page-level metadata sections.
//!
//! ## What lives here
//! - The closed [`EntityType`] enumeration and its name parsing.
//! - Default [`SelectorSet`]s, one module per entity type.
//! - [`extract`], the single entry point: resolve the type, compile its spec,
//!   run the shared engine.
//!
//! ## What does **not** live here
//! - Fetching pages or walking pagination (`scrape`, `source`).
//! - The extraction routine itself (`engine`): specs only describe selectors.
//! - Persistence (`store`) and export formatting (`csv`, `file`).
//!
//! ## Adding a source
//! Add a variant to [`EntityType`], a module with its `selectors()` and one
//! arm in [`EntityType::default_selectors`]. Nothing else changes.
//!
//! ## Conventions & invariants
//! - Default selectors are generic and meant to be overridden per site
//!   snapshot through the config file (`[selectors.<type>]`).
//! - A spec may leave a metadata section out entirely (`None`): restaurants
//!   have no about section, and that is not a failure.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::core::html::Page;
use crate::data::PageResult;
use crate::engine::{self, PageSpec, SelectorSet};
use crate::error::ExtractError;

pub mod attraction;
pub mod restaurant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Attraction,
    Restaurant,
}

impl EntityType {
    pub const ALL: [EntityType; 2] = [EntityType::Attraction, EntityType::Restaurant];

    pub fn name(self) -> &'static str {
        match self {
            EntityType::Attraction => "attraction",
            EntityType::Restaurant => "restaurant",
        }
    }

    pub fn default_selectors(self) -> SelectorSet {
        match self {
            EntityType::Attraction => attraction::selectors(),
            EntityType::Restaurant => restaurant::selectors(),
        }
    }

    /// Compile this type's built-in selectors.
    pub fn spec(self) -> Result<PageSpec, ExtractError> {
        PageSpec::try_from(&self.default_selectors())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityType {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EntityType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExtractError::UnsupportedEntityType(s!(s)))
    }
}

/// Extract one page for `id` using the built-in selectors of `entity_type`.
///
/// The type name is resolved before the page is touched: an unknown name is
/// an `UnsupportedEntityType` error, never an empty result.
pub fn extract<P: Page>(page: &P, id: &str, entity_type: &str) -> Result<PageResult, ExtractError> {
    let kind: EntityType = entity_type.parse()?;
    extract_typed(page, id, kind)
}

pub fn extract_typed<P: Page>(page: &P, id: &str, kind: EntityType) -> Result<PageResult, ExtractError> {
    let spec = kind.spec()?;
    engine::extract(&spec, page, id)
}
