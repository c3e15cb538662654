// src/engine/types.rs
use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// How a field's value is read once its node is found.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Read {
    /// Whitespace-normalized text content.
    #[default]
    Text,
    /// Value of a named attribute (`aria-label`, `title`, ...).
    Attr(String),
    /// The n-th token of the `class` attribute.
    ClassToken(usize),
}

/// One field: where it lives and how to read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub selector: String,
    #[serde(default)]
    pub read: Read,
}

impl FieldSpec {
    pub fn text(selector: &str) -> Self {
        Self { selector: s!(selector), read: Read::Text }
    }

    pub fn attr(selector: &str, name: &str) -> Self {
        Self { selector: s!(selector), read: Read::Attr(s!(name)) }
    }

    pub fn class_token(selector: &str, n: usize) -> Self {
        Self { selector: s!(selector), read: Read::ClassToken(n) }
    }
}

/// Selector set for one entity type, in source form (config/TOML friendly).
///
/// `review` selects review containers from the page root. The four review
/// fields are looked up *inside* each container; `about`/`address` from the
/// page root. A metadata field set to `None` is simply never looked for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    pub review: String,
    pub date: FieldSpec,
    pub rating: FieldSpec,
    pub title: FieldSpec,
    pub body: FieldSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<FieldSpec>,
}

/// A field with its selector parsed.
#[derive(Debug)]
pub struct Field {
    pub selector: Selector,
    pub read: Read,
}

/// Compiled, ready-to-run page spec.
///
/// `scraper::Selector` is not shared across threads here: each worker compiles
/// its own from the `SelectorSet`.
#[derive(Debug)]
pub struct PageSpec {
    pub review: Selector,
    pub date: Field,
    pub rating: Field,
    pub title: Field,
    pub body: Field,
    pub about: Option<Field>,
    pub address: Option<Field>,
}

impl TryFrom<&SelectorSet> for PageSpec {
    type Error = ExtractError;

    fn try_from(set: &SelectorSet) -> Result<Self, Self::Error> {
        Ok(Self {
            review: compile(&set.review)?,
            date: set.date.compile()?,
            rating: set.rating.compile()?,
            title: set.title.compile()?,
            body: set.body.compile()?,
            about: set.about.as_ref().map(FieldSpec::compile).transpose()?,
            address: set.address.as_ref().map(FieldSpec::compile).transpose()?,
        })
    }
}

impl FieldSpec {
    pub fn compile(&self) -> Result<Field, ExtractError> {
        Ok(Field { selector: compile(&self.selector)?, read: self.read.clone() })
    }
}

pub fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: s!(selector),
        reason: e.to_string(),
    })
}
