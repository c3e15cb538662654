// src/data.rs
//
// Record shapes produced by extraction and persisted by the store.
//
// - EntityRecord: once-per-page metadata (about / address) for the entity.
// - ReviewRecord: one user review.
// - Record:       either of the above; serialized untagged so a JSON line is
//                 the flat field map downstream labeling tools expect.
// - PageResult:   what one page yields, or EndOfContent when pagination is done.
//
// Every record carries the caller's `id`: the join key back to the entity.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl EntityRecord {
    /// Build from whatever metadata was found; `None` when nothing was.
    pub fn from_parts(id: &str, about: Option<String>, address: Option<String>) -> Option<Self> {
        if about.is_none() && address.is_none() {
            return None;
        }
        Some(Self { id: s!(id), about, address })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: String,
    pub date: String,
    pub rating: String,
    pub title: String,
    pub review: String,
}

/// Review comes first: its required fields make the untagged match unambiguous,
/// while an entity line only needs `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Review(ReviewRecord),
    Entity(EntityRecord),
}

impl Record {
    pub fn id(&self) -> &str {
        match self {
            Record::Review(r) => &r.id,
            Record::Entity(e) => &e.id,
        }
    }

    pub fn as_review(&self) -> Option<&ReviewRecord> {
        match self { Record::Review(r) => Some(r), Record::Entity(_) => None }
    }

    pub fn as_entity(&self) -> Option<&EntityRecord> {
        match self { Record::Entity(e) => Some(e), Record::Review(_) => None }
    }
}

impl From<ReviewRecord> for Record {
    fn from(r: ReviewRecord) -> Self { Record::Review(r) }
}

impl From<EntityRecord> for Record {
    fn from(e: EntityRecord) -> Self { Record::Entity(e) }
}

/// Outcome of extracting one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageResult {
    /// Metadata record first (if any), then reviews in document order.
    /// May be empty when every review node was malformed.
    Records(Vec<Record>),
    /// The page had no review nodes at all: stop paginating this id.
    EndOfContent,
}

impl PageResult {
    pub fn is_end(&self) -> bool {
        matches!(self, PageResult::EndOfContent)
    }

    pub fn records(&self) -> &[Record] {
        match self {
            PageResult::Records(r) => r,
            PageResult::EndOfContent => &[],
        }
    }

    pub fn reviews(&self) -> impl Iterator<Item = &ReviewRecord> {
        self.records().iter().filter_map(Record::as_review)
    }

    pub fn entity(&self) -> Option<&EntityRecord> {
        self.records().first().and_then(Record::as_entity)
    }
}

/// Named sections of a page, used for skip logging and `MissingSection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Address,
    Date,
    Rating,
    Title,
    Body,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::About => "about",
            Section::Address => "address",
            Section::Date => "date",
            Section::Rating => "rating",
            Section::Title => "title",
            Section::Body => "review body",
        })
    }
}
