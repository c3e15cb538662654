// src/engine/mod.rs
mod engine;
mod types;

pub use engine::{extract, extract_entity, extract_review, lookup};
pub use types::{compile, Field, FieldSpec, PageSpec, Read, SelectorSet};
