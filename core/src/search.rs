use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::index::Index;
use crate::query::{Query, TermRole};
use crate::{DocId, Term};

/// How `+` and `-` terms restrict the documents that may produce hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// A document must contain every required term and no excluded term.
    #[default]
    Strict,
    /// Roles are parsed but not enforced: every positive term matches anywhere.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// Index term the hit was found under.
    pub term: Term,
    /// Query word as typed, used for display.
    pub word: String,
    pub doc_id: DocId,
    pub doc_name: String,
    pub doc_title: String,
    pub local_frequency: u32,
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} : {} occurrence(s) de {}",
            self.doc_title, self.doc_name, self.local_frequency, self.word
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub hits: Vec<Hit>,
    pub global_frequency: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Matched { documents: usize },
    NoResults,
}

impl Evaluation {
    pub fn outcome(&self) -> Outcome {
        if self.hits.is_empty() {
            return Outcome::NoResults;
        }
        let documents: BTreeSet<DocId> = self.hits.iter().map(|h| h.doc_id).collect();
        Outcome::Matched { documents: documents.len() }
    }
}

fn eligible(index: &Index, query: &Query, doc_id: DocId, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Lenient => true,
        MatchMode::Strict => query.terms().iter().all(|t| {
            let present = index.frequency(&t.term, doc_id).is_some();
            match t.role {
                TermRole::Required => present,
                TermRole::Excluded => !present,
                TermRole::Optional => true,
            }
        }),
    }
}

/// Walk the query's positive terms in order and, within each term, its
/// postings in ascending document order.
pub fn evaluate(index: &Index, query: &Query, mode: MatchMode) -> Evaluation {
    let mut evaluation = Evaluation::default();
    for qt in query.positive_terms() {
        let Some(postings) = index.postings(&qt.term) else { continue };
        for (doc_id, freq) in postings.iter() {
            if !eligible(index, query, doc_id, mode) {
                continue;
            }
            let Some(meta) = index.document(doc_id) else { continue };
            evaluation.global_frequency += u64::from(freq);
            evaluation.hits.push(Hit {
                term: qt.term.clone(),
                word: qt.word.clone(),
                doc_id,
                doc_name: meta.name.clone(),
                doc_title: meta.title.clone(),
                local_frequency: freq,
            });
        }
    }
    tracing::debug!(hits = evaluation.hits.len(), global_frequency = evaluation.global_frequency, ?mode, "evaluated query");
    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;
    use crate::query::parse;
    use crate::Document;

    fn terms(words: &[&str]) -> Vec<Term> { words.iter().map(|w| w.to_string()).collect() }

    fn tiny_index() -> Index {
        let mut b = IndexBuilder::new();
        b.add_document(Document::new(1, "exercice1.txt", "Notations"), &terms(&["chapeau", "pardessus"]));
        b.add_document(Document::new(2, "exercice2.txt", "En partie double"), &terms(&["pardessus", "cou"]));
        b.add_document(Document::new(3, "exercice3.txt", "Litotes"), &terms(&["chapeau", "chapeau"]));
        b.finish()
    }

    fn rows(e: &Evaluation) -> Vec<(&str, DocId, u32)> {
        e.hits.iter().map(|h| (h.term.as_str(), h.doc_id, h.local_frequency)).collect()
    }

    #[test]
    fn lenient_ignores_roles() {
        let e = evaluate(&tiny_index(), &parse("chapeau +pardessus -cou").unwrap(), MatchMode::Lenient);
        assert_eq!(rows(&e), vec![("chapeau", 1, 1), ("chapeau", 3, 2), ("pardessus", 1, 1), ("pardessus", 2, 1)]);
        assert_eq!(e.global_frequency, 5);
    }

    #[test]
    fn strict_enforces_required_and_excluded() {
        let e = evaluate(&tiny_index(), &parse("chapeau +pardessus -cou").unwrap(), MatchMode::Strict);
        assert_eq!(rows(&e), vec![("chapeau", 1, 1), ("pardessus", 1, 1)]);
        assert_eq!(e.global_frequency, 2);
        assert_eq!(e.outcome(), Outcome::Matched { documents: 1 });
    }

    #[test]
    fn unknown_terms_yield_no_results() {
        let e = evaluate(&tiny_index(), &parse("ficelle bouton").unwrap(), MatchMode::Strict);
        assert!(e.hits.is_empty());
        assert_eq!(e.global_frequency, 0);
        assert_eq!(e.outcome(), Outcome::NoResults);
    }

    #[test]
    fn excluded_only_query_matches_nothing() {
        let e = evaluate(&tiny_index(), &parse("-cou -chapeau").unwrap(), MatchMode::Lenient);
        assert_eq!(e.outcome(), Outcome::NoResults);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let index = tiny_index();
        let q = parse("pardessus chapeau cou").unwrap();
        let first = evaluate(&index, &q, MatchMode::Strict);
        let second = evaluate(&index, &q, MatchMode::Strict);
        assert_eq!(first, second);
        assert_eq!(
            first.hits.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
            second.hits.iter().map(|h| h.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn hit_renders_results_line() {
        let e = evaluate(&tiny_index(), &parse("cou").unwrap(), MatchMode::Strict);
        assert_eq!(e.hits[0].to_string(), "En partie double - exercice2.txt : 1 occurrence(s) de cou");
    }
}
