//! Flat `+required -excluded optional` query grammar.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::tokenizer::Normalizer;
use crate::Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermRole {
    /// `+word`
    Required,
    /// `-word`: suppresses documents, never matched positively.
    Excluded,
    /// Bare word.
    Optional,
}

impl TermRole {
    /// Higher wins when the same term shows up under several roles.
    fn precedence(self) -> u8 {
        match self {
            TermRole::Excluded => 2,
            TermRole::Required => 1,
            TermRole::Optional => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTerm {
    /// Lookup key; equals `word` until the query is normalized.
    pub term: Term,
    /// The word as the user typed it, without its `+`/`-` prefix.
    pub word: String,
    pub role: TermRole,
}

impl QueryTerm {
    pub fn new(word: impl Into<String>, role: TermRole) -> Self {
        let word = word.into();
        Self { term: word.clone(), word, role }
    }
}

/// Parsed query. Each distinct term appears once, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    terms: Vec<QueryTerm>,
}

impl Query {
    /// Collapse repeated terms, keeping the strongest role at the first position.
    pub fn from_terms<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = QueryTerm>,
    {
        let mut terms: Vec<QueryTerm> = Vec::new();
        for candidate in candidates {
            match terms.iter_mut().find(|t| t.term == candidate.term) {
                Some(existing) if candidate.role.precedence() > existing.role.precedence() => {
                    existing.role = candidate.role
                }
                Some(_) => {}
                None => terms.push(candidate),
            }
        }
        Self { terms }
    }

    pub fn terms(&self) -> &[QueryTerm] { &self.terms }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Terms that produce hits (required and optional), in query order.
    pub fn positive_terms(&self) -> impl Iterator<Item = &QueryTerm> + '_ {
        self.terms.iter().filter(|t| t.role != TermRole::Excluded)
    }

    pub fn required(&self) -> BTreeSet<&str> { self.with_role(TermRole::Required) }

    pub fn excluded(&self) -> BTreeSet<&str> { self.with_role(TermRole::Excluded) }

    pub fn optional(&self) -> BTreeSet<&str> { self.with_role(TermRole::Optional) }

    fn with_role(&self, role: TermRole) -> BTreeSet<&str> {
        self.terms.iter().filter(|t| t.role == role).map(|t| t.term.as_str()).collect()
    }

    /// Rewrite every term into index form.
    ///
    /// Optional and excluded words that cannot be normalized are dropped. A
    /// required one is kept under its lowercased spelling, which fails the
    /// alphabetic test and so never matches an index term.
    pub fn normalize(&self, normalizer: &Normalizer) -> Query {
        Query::from_terms(self.terms.iter().filter_map(|t| {
            let term = match normalizer.normalize_query_term(&t.word) {
                Some(term) => term,
                None if t.role == TermRole::Required => t.word.to_lowercase(),
                None => return None,
            };
            Some(QueryTerm { term, word: t.word.clone(), role: t.role })
        }))
    }
}

/// Parse one line of user input.
///
/// A line without spaces is a single optional term taken verbatim.
pub fn parse(raw: &str) -> Result<Query> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::EmptyQuery);
    }
    if !raw.contains(' ') {
        return Ok(Query::from_terms([QueryTerm::new(raw, TermRole::Optional)]));
    }

    let query = Query::from_terms(raw.split(' ').filter_map(|word| {
        let (role, term) = if let Some(rest) = word.strip_prefix('-') {
            (TermRole::Excluded, rest)
        } else if let Some(rest) = word.strip_prefix('+') {
            (TermRole::Required, rest)
        } else {
            (TermRole::Optional, word)
        };
        (!term.is_empty()).then(|| QueryTerm::new(term, role))
    }));
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }
    Ok(query)
}
