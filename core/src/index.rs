use crate::tokenizer::tokenize;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type DocId = String;

/// A loaded document: its identifier, token sequence and per-term counts.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocId,
    terms: Vec<String>,
    counts: HashMap<String, u32>,
}

impl Document {
    pub fn new(id: impl Into<DocId>, terms: Vec<String>) -> Self {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in &terms {
            *counts.entry(term.clone()).or_insert(0) += 1;
        }
        Self { id: id.into(), terms, counts }
    }

    /// Build a document from raw text using the shared tokenizer.
    pub fn from_text(id: impl Into<DocId>, text: &str) -> Self {
        Self::new(id, tokenize(text))
    }

    pub fn id(&self) -> &str { &self.id }

    pub fn terms(&self) -> &[String] { &self.terms }

    /// Number of tokens, repetitions included.
    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Raw occurrence count of `term` (0 if absent).
    pub fn term_count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool { self.counts.contains_key(term) }

    /// Distinct terms with their raw counts, in no particular order.
    pub fn term_counts(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

/// Immutable term statistics over a document collection.
///
/// Built once, then shared by reference with every scorer. Documents and postings are kept
/// in sorted maps so every enumeration (documents, vocabulary, postings) is deterministic.
#[derive(Debug, Default)]
pub struct CollectionIndex {
    docs: BTreeMap<DocId, Document>,
    postings: BTreeMap<String, BTreeSet<DocId>>,
}

impl CollectionIndex {
    /// Index a collection. Fails if two documents share an identifier.
    pub fn new<I>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut docs: BTreeMap<DocId, Document> = BTreeMap::new();
        let mut postings: BTreeMap<String, BTreeSet<DocId>> = BTreeMap::new();
        for doc in documents {
            if docs.contains_key(doc.id()) {
                return Err(Error::DuplicateDocument(doc.id.clone()));
            }
            for (term, _) in doc.term_counts() {
                postings.entry(term.to_string()).or_default().insert(doc.id.clone());
            }
            docs.insert(doc.id.clone(), doc);
        }
        tracing::info!(num_docs = docs.len(), num_terms = postings.len(), "built collection index");
        Ok(Self { docs, postings })
    }

    /// Tokenize and index `(id, raw text)` pairs.
    pub fn from_texts<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<DocId>,
        V: AsRef<str>,
    {
        Self::new(pairs.into_iter().map(|(id, text)| Document::from_text(id, text.as_ref())))
    }

    /// N, the number of documents.
    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn document(&self, id: &str) -> Option<&Document> { self.docs.get(id) }

    pub fn contains_document(&self, id: &str) -> bool { self.docs.contains_key(id) }

    /// Documents in identifier order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ { self.docs.values() }

    pub fn document_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.docs.keys().map(String::as_str)
    }

    /// Number of documents containing `term` at least once. 0 for unknown terms.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, BTreeSet::len)
    }

    /// Raw count of `term` in document `id`. 0 if either is unknown.
    pub fn term_frequency(&self, id: &str, term: &str) -> u32 {
        self.docs.get(id).map_or(0, |d| d.term_count(term))
    }

    /// Distinct terms across the collection, sorted. Each call starts a fresh iteration.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    pub fn vocabulary_size(&self) -> usize { self.postings.len() }

    /// Identifiers of the documents containing `term`, or `None` for an unknown term.
    pub fn postings(&self, term: &str) -> Option<&BTreeSet<DocId>> { self.postings.get(term) }

    /// Snapshot of the index statistics suitable for display or serialization.
    pub fn summary(&self) -> IndexSummary {
        IndexSummary {
            num_docs: self.num_docs(),
            vocabulary_size: self.vocabulary_size(),
            postings: self.postings.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub num_docs: usize,
    pub vocabulary_size: usize,
    pub postings: BTreeMap<String, BTreeSet<DocId>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> CollectionIndex {
        CollectionIndex::from_texts([
            ("d1", "apple mango"),
            ("d2", "mango banana"),
            ("d3", "apple banana mango"),
        ])
        .unwrap()
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let ix = CollectionIndex::from_texts([("a", "x x x"), ("b", "x y")]).unwrap();
        assert_eq!(ix.document_frequency("x"), 2);
        assert_eq!(ix.document_frequency("y"), 1);
        assert_eq!(ix.term_frequency("a", "x"), 3);
    }

    #[test]
    fn unknown_terms_have_zero_df_and_no_postings() {
        let ix = fixture();
        assert_eq!(ix.document_frequency("kiwi"), 0);
        assert!(ix.postings("kiwi").is_none());
        assert_eq!(ix.term_frequency("d1", "kiwi"), 0);
        assert_eq!(ix.term_frequency("nope", "apple"), 0);
    }

    #[test]
    fn vocabulary_is_sorted_and_restartable() {
        let ix = fixture();
        let first: Vec<&str> = ix.vocabulary().collect();
        let second: Vec<&str> = ix.vocabulary().collect();
        assert_eq!(first, vec!["apple", "banana", "mango"]);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_collection() {
        let ix = CollectionIndex::new(Vec::new()).unwrap();
        assert_eq!(ix.num_docs(), 0);
        assert_eq!(ix.vocabulary().count(), 0);
    }

    #[test]
    fn empty_document_is_indexed() {
        let ix = CollectionIndex::from_texts([("blank", ""), ("d", "word")]).unwrap();
        assert_eq!(ix.num_docs(), 2);
        assert_eq!(ix.document("blank").map(Document::len), Some(0));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = CollectionIndex::from_texts([("d1", "a"), ("d1", "b")]).unwrap_err();
        assert!(matches!(err, Error::DuplicateDocument(ref id) if id == "d1"));
        assert!(err.is_invalid_input());
    }
}
