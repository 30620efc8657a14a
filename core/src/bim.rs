//! Binary Independence Model with relevance feedback.
//!
//! For a query term `t`, with `R` judged-relevant documents out of `N`:
//!
//! ```text
//! p_t = (r_t + 0.5) / (R + 1)
//! u_t = (n_t - r_t + 0.5) / (N - R + 1)
//! c_t = log10( p_t (1 - u_t) / (u_t (1 - p_t)) )
//! ```
//!
//! where `r_t` counts relevant documents containing `t` and `n_t` is the document
//! frequency of `t`. A document's RSV is the sum of `c_t` over the distinct query terms
//! it contains; absent terms contribute nothing.

use crate::ranking::{rank, ScoredDocument};
use crate::{CollectionIndex, DocId, Error, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Statistics behind one query term's contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermWeight {
    /// Relevant documents containing the term.
    pub relevant_df: usize,
    /// Documents containing the term.
    pub df: usize,
    /// Smoothed P(term | relevant).
    pub p: f64,
    /// Smoothed P(term | non-relevant).
    pub u: f64,
    /// Log-odds weight added to the RSV of each document containing the term.
    pub weight: f64,
}

/// Term weight `c_t` for `r` relevant occurrences, `n` document frequency, `big_r`
/// relevant documents and `big_n` documents.
///
/// Callers must ensure `r <= big_r`, `r <= n`, `n - r <= big_n - big_r`.
pub fn bim_term_weight(r: usize, n: usize, big_r: usize, big_n: usize) -> TermWeight {
    let p = (r as f64 + 0.5) / (big_r as f64 + 1.0);
    let u = (n as f64 - r as f64 + 0.5) / (big_n as f64 - big_r as f64 + 1.0);
    let weight = ((p * (1.0 - u)) / (u * (1.0 - p))).log10();
    TermWeight { relevant_df: r, df: n, p, u, weight }
}

/// RSV scorer bound to a collection and a validated relevance feedback set.
pub struct BimScorer<'a> {
    index: &'a CollectionIndex,
    relevant: BTreeSet<DocId>,
}

impl<'a> BimScorer<'a> {
    /// Bind a relevance feedback set. Repeated ids collapse, and every id must be in the
    /// collection, so `R <= N` holds for any scorer this returns.
    pub fn new<I, S>(index: &'a CollectionIndex, relevant: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for id in relevant {
            let id = id.as_ref();
            if !index.contains_document(id) {
                return Err(Error::UnknownDocument(id.to_string()));
            }
            set.insert(id.to_string());
        }
        tracing::debug!(relevant = set.len(), num_docs = index.num_docs(), "bound relevance feedback");
        Ok(Self { index, relevant: set })
    }

    pub fn relevant(&self) -> &BTreeSet<DocId> { &self.relevant }

    /// Statistics and weight of a single term under this feedback set.
    pub fn term_weight(&self, term: &str) -> TermWeight {
        let r = self
            .relevant
            .iter()
            .filter(|id| self.index.term_frequency(id, term) > 0)
            .count();
        bim_term_weight(r, self.index.document_frequency(term), self.relevant.len(), self.index.num_docs())
    }

    /// RSV of every document for the given query terms.
    pub fn score(&self, query_terms: &[String]) -> BTreeMap<DocId, f64> {
        self.scored(query_terms).map(|s| (s.id, s.score)).collect()
    }

    /// Every document ranked by RSV, highest first.
    pub fn rank(&self, query_terms: &[String]) -> Vec<ScoredDocument> {
        rank(self.scored(query_terms))
    }

    fn scored<'q>(&'q self, query_terms: &[String]) -> impl Iterator<Item = ScoredDocument> + 'q {
        let weights: BTreeMap<String, f64> = query_terms
            .iter()
            .map(|t| (t.clone(), self.term_weight(t).weight))
            .collect();
        self.index.documents().map(move |doc| {
            let mut rsv = 0.0;
            let mut matched_terms = 0;
            for (term, weight) in &weights {
                if doc.contains(term) {
                    rsv += weight;
                    matched_terms += 1;
                }
            }
            ScoredDocument { id: doc.id().to_string(), score: rsv, matched_terms }
        })
    }
}
