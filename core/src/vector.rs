//! TF-IDF vector space ranking with cosine similarity.
//!
//! - `tf(d, t) = count(t, d) / |d|`, 0 for an empty document
//! - `idf(t) = log10(N / (df(t) + 1))`, negative once `df(t) >= N`; never clamped
//! - `score(d, q) = cos(tfidf(d), tfidf(q))`, 0 when either vector has zero magnitude
//!
//! Document vectors do not depend on the query, so they are computed once per ranker.

use crate::ranking::{rank, ScoredDocument};
use crate::{CollectionIndex, DocId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Sparse term weight vector. Terms not present have weight 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(t, &w)| (t.as_str(), w))
    }

    /// Dot product over the shared terms, summed in term order.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small
            .weights
            .iter()
            .filter_map(|(t, &w)| large.weights.get(t).map(|&v| w * v))
            .sum()
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Cosine similarity; 0.0 when either magnitude is exactly zero.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        let norms = self.magnitude() * other.magnitude();
        if norms == 0.0 {
            return 0.0;
        }
        self.dot(other) / norms
    }
}

impl FromIterator<(String, f64)> for TermVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self { weights: iter.into_iter().collect() }
    }
}

/// Length-normalized term frequencies of a token sequence. Empty for an empty sequence.
pub fn term_frequencies(terms: &[String]) -> HashMap<&str, f64> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    if terms.is_empty() {
        return counts;
    }
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    let len = terms.len() as f64;
    for tf in counts.values_mut() {
        *tf /= len;
    }
    counts
}

pub struct VectorSpaceRanker<'a> {
    index: &'a CollectionIndex,
    idf: BTreeMap<String, f64>,
    doc_vectors: BTreeMap<DocId, TermVector>,
}

impl<'a> VectorSpaceRanker<'a> {
    pub fn new(index: &'a CollectionIndex) -> Self {
        let n = index.num_docs() as f64;
        let idf: BTreeMap<String, f64> = index
            .vocabulary()
            .map(|t| (t.to_string(), (n / (index.document_frequency(t) as f64 + 1.0)).log10()))
            .collect();

        let doc_vectors = index
            .documents()
            .map(|doc| {
                let vector: TermVector = term_frequencies(doc.terms())
                    .into_iter()
                    .map(|(t, tf)| (t.to_string(), tf * idf.get(t).copied().unwrap_or(0.0)))
                    .collect();
                (doc.id().to_string(), vector)
            })
            .collect();

        tracing::debug!(num_docs = index.num_docs(), num_terms = idf.len(), "computed tf-idf document vectors");
        Self { index, idf, doc_vectors }
    }

    /// Collection IDF of `term`, or `None` outside the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> { self.idf.get(term).copied() }

    pub fn document_vector(&self, id: &str) -> Option<&TermVector> { self.doc_vectors.get(id) }

    /// TF-IDF vector of a query. Terms outside the vocabulary get no weight but still
    /// count toward the query length.
    pub fn query_vector(&self, query_terms: &[String]) -> TermVector {
        term_frequencies(query_terms)
            .into_iter()
            .filter_map(|(t, tf)| self.idf.get(t).map(|idf| (t.to_string(), tf * idf)))
            .collect()
    }

    /// Cosine similarity of every document with the query.
    pub fn score(&self, query_terms: &[String]) -> BTreeMap<DocId, f64> {
        let query = self.query_vector(query_terms);
        self.doc_vectors
            .iter()
            .map(|(id, vector)| (id.clone(), vector.cosine(&query)))
            .collect()
    }

    /// Every document ranked by cosine similarity, highest first.
    pub fn rank(&self, query_terms: &[String]) -> Vec<ScoredDocument> {
        let query = self.query_vector(query_terms);
        let mut distinct: Vec<&String> = query_terms.iter().collect();
        distinct.sort_unstable();
        distinct.dedup();
        rank(self.doc_vectors.iter().map(|(id, vector)| {
            let matched_terms = distinct
                .iter()
                .filter(|t| self.index.term_frequency(id, t) > 0)
                .count();
            ScoredDocument { id: id.clone(), score: vector.cosine(&query), matched_terms }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn fixture() -> CollectionIndex {
        CollectionIndex::from_texts([
            ("d1", "apple mango"),
            ("d2", "mango banana"),
            ("d3", "apple banana mango"),
        ])
        .unwrap()
    }

    fn vector(pairs: &[(&str, f64)]) -> TermVector {
        pairs.iter().map(|&(t, w)| (t.to_string(), w)).collect()
    }

    #[test]
    fn tf_is_length_normalized() {
        let toks = tokenize("a b a c");
        let tf = term_frequencies(&toks);
        assert_eq!(tf["a"], 0.5);
        assert_eq!(tf["b"], 0.25);
        assert!(term_frequencies(&[]).is_empty());
    }

    #[test]
    fn idf_follows_log10_formula_and_may_be_negative() {
        let ix = fixture();
        let vs = VectorSpaceRanker::new(&ix);
        assert_eq!(vs.idf("apple"), Some(0.0));
        assert!((vs.idf("mango").unwrap() - (3.0f64 / 4.0).log10()).abs() < 1e-12);
        assert!(vs.idf("mango").unwrap() < 0.0);
        assert_eq!(vs.idf("kiwi"), None);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let v = vector(&[("a", 1.0)]);
        assert_eq!(v.cosine(&TermVector::new()), 0.0);
        assert_eq!(TermVector::new().cosine(&v), 0.0);
        assert_eq!(vector(&[("a", 0.0)]).cosine(&v), 0.0);
    }

    #[test]
    fn cosine_orthogonal_and_parallel() {
        let a = vector(&[("x", 1.0), ("y", 2.0)]);
        let b = vector(&[("z", 3.0)]);
        let c = vector(&[("x", 2.0), ("y", 4.0)]);
        assert_eq!(a.cosine(&b), 0.0);
        assert!((a.cosine(&c) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn documents_with_both_terms_rank_above_partial_match() {
        let ix = fixture();
        let vs = VectorSpaceRanker::new(&ix);
        let ranked = vs.rank(&tokenize("apple mango"));
        let ids: Vec<&str> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[2], "d2");
        assert!(ids[..2].contains(&"d1") && ids[..2].contains(&"d3"));
    }

    #[test]
    fn informative_terms_drive_the_ranking() {
        let ix = CollectionIndex::from_texts([
            ("a", "rust borrow checker"),
            ("b", "python garbage collector"),
            ("c", "rust garbage"),
            ("d", "java virtual machine"),
            ("e", "go runtime scheduler"),
        ])
        .unwrap();
        let vs = VectorSpaceRanker::new(&ix);
        let ranked = vs.rank(&tokenize("borrow checker"));
        assert_eq!(ranked[0].id, "a");
        assert!(ranked[0].score > 0.0);
        assert!(ranked[1..].iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn empty_document_and_empty_query_score_zero() {
        let ix = CollectionIndex::from_texts([("blank", ""), ("d", "word other"), ("e", "third")]).unwrap();
        let vs = VectorSpaceRanker::new(&ix);
        assert!(vs.document_vector("blank").unwrap().is_empty());
        let scores = vs.score(&tokenize("word"));
        assert_eq!(scores["blank"], 0.0);
        assert!(vs.score(&[]).values().all(|&s| s == 0.0));
    }

    #[test]
    fn unknown_query_terms_score_zero() {
        let ix = fixture();
        let vs = VectorSpaceRanker::new(&ix);
        assert!(vs.query_vector(&tokenize("kiwi")).is_empty());
        assert!(vs.score(&tokenize("kiwi")).values().all(|&s| s == 0.0));
    }

    #[test]
    fn empty_collection_ranks_nothing() {
        let ix = CollectionIndex::new(Vec::new()).unwrap();
        let vs = VectorSpaceRanker::new(&ix);
        assert!(vs.rank(&tokenize("anything")).is_empty());
    }

    #[test]
    fn query_vector_weights_known_terms_only() {
        let ix = fixture();
        let vs = VectorSpaceRanker::new(&ix);
        let q = vs.query_vector(&tokenize("mango kiwi mango banana"));
        let weights: Vec<(&str, f64)> = q.iter().collect();
        let mango = 0.5 * (3.0f64 / 4.0).log10();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].0, "banana");
        assert_eq!(weights[1].0, "mango");
        assert!((weights[1].1 - mango).abs() < 1e-12);
        assert_eq!(weights[0].1, 0.0);
    }
}
