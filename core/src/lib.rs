//! Boolean keyword search over a small corpus of French text documents.
//!
//! Documents are normalized into canonical terms, accumulated into an
//! [`index::Index`] one document at a time, and queried with a flat
//! `+required -excluded optional` grammar.

use serde::{Deserialize, Serialize};

pub mod corpus;
pub mod document;
pub mod error;
pub mod index;
pub mod persist;
pub mod query;
pub mod search;
pub mod tokenizer;

pub use error::{Error, Result};

/// 1-based document identifier, assigned in processing order.
pub type DocId = u32;

/// A normalized word used as an index key.
pub type Term = String;

/// Catalog entry for an indexed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    /// Source file name, e.g. `exercice12.txt`.
    pub name: String,
    /// Display title taken from the first line of the source.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocId,
    pub meta: DocMeta,
}

impl Document {
    pub fn new(id: DocId, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id, meta: DocMeta { name: name.into(), title: title.into() } }
    }
}
