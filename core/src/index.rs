use std::collections::{BTreeMap, HashMap};

use crate::{DocId, DocMeta, Document, Term};

/// Per-term postings: document id -> local frequency, in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    freqs: BTreeMap<DocId, u32>,
}

impl PostingList {
    pub fn frequency(&self, doc_id: DocId) -> Option<u32> { self.freqs.get(&doc_id).copied() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.freqs.iter().map(|(d, f)| (*d, *f))
    }

    pub fn len(&self) -> usize { self.freqs.len() }

    pub fn is_empty(&self) -> bool { self.freqs.is_empty() }

    fn add(&mut self, doc_id: DocId, freq: u32) {
        *self.freqs.entry(doc_id).or_insert(0) += freq;
    }
}

/// Single-writer accumulator for the inverted index and document catalog.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    postings: HashMap<Term, PostingList>,
    docs: BTreeMap<DocId, DocMeta>,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    /// Count `terms` and merge them under `doc.id`.
    ///
    /// One call per document id: a repeated id adds its counts again.
    pub fn add_document(&mut self, doc: Document, terms: &[Term]) {
        let mut tf_counts: HashMap<&str, u32> = HashMap::new();
        for term in terms {
            *tf_counts.entry(term.as_str()).or_insert(0) += 1;
        }
        for (term, tf) in tf_counts {
            self.postings.entry(term.to_string()).or_default().add(doc.id, tf);
        }
        tracing::debug!(doc_id = doc.id, name = %doc.meta.name, terms = terms.len(), "indexed document");
        self.docs.insert(doc.id, doc.meta);
    }

    pub fn num_documents(&self) -> usize { self.docs.len() }

    pub fn finish(self) -> Index {
        Index { postings: self.postings, docs: self.docs }
    }
}

/// Read-only snapshot produced by [`IndexBuilder::finish`].
#[derive(Debug, Clone, Default)]
pub struct Index {
    postings: HashMap<Term, PostingList>,
    docs: BTreeMap<DocId, DocMeta>,
}

impl Index {
    pub fn postings(&self, term: &str) -> Option<&PostingList> { self.postings.get(term) }

    pub fn frequency(&self, term: &str, doc_id: DocId) -> Option<u32> {
        self.postings(term).and_then(|p| p.frequency(doc_id))
    }

    pub fn document(&self, doc_id: DocId) -> Option<&DocMeta> { self.docs.get(&doc_id) }

    pub fn documents(&self) -> impl Iterator<Item = (DocId, &DocMeta)> + '_ {
        self.docs.iter().map(|(id, meta)| (*id, meta))
    }

    pub fn num_documents(&self) -> usize { self.docs.len() }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    /// Sum of all local frequencies recorded for `doc_id`.
    pub fn document_length(&self, doc_id: DocId) -> u64 {
        self.postings.values().filter_map(|p| p.frequency(doc_id)).map(u64::from).sum()
    }

    /// Every `(term, doc, frequency)` triple, sorted by term then doc id.
    pub fn entries(&self) -> Vec<(&str, DocId, u32)> {
        let mut terms: Vec<&Term> = self.postings.keys().collect();
        terms.sort();
        terms
            .into_iter()
            .flat_map(|term| self.postings[term].iter().map(move |(d, f)| (term.as_str(), d, f)))
            .collect()
    }
}
