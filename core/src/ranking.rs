use crate::DocId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub score: f64,
    /// Distinct query terms the document contains.
    pub matched_terms: usize,
}

/// Sort scored documents into a ranking.
///
/// Order: score descending, then matched query terms descending, then id ascending.
/// `total_cmp` keeps the order total even if a NaN slips through.
pub fn rank<I>(scored: I) -> Vec<ScoredDocument>
where
    I: IntoIterator<Item = ScoredDocument>,
{
    let mut ranked: Vec<ScoredDocument> = scored.into_iter().collect();
    ranked.sort_unstable_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.matched_terms.cmp(&a.matched_terms))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, score: f64, matched_terms: usize) -> ScoredDocument {
        ScoredDocument { id: id.to_string(), score, matched_terms }
    }

    #[test]
    fn ties_break_by_matched_terms_then_id() {
        let r = rank(vec![doc("b", 1.0, 1), doc("a", 1.0, 1), doc("c", 2.0, 0), doc("d", 1.0, 2)]);
        let ids: Vec<&str> = r.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn negative_scores_rank_last() {
        let r = rank(vec![doc("neg", -0.2, 1), doc("zero", 0.0, 0)]);
        assert_eq!(r[0].id, "zero");
        assert_eq!(r[1].id, "neg");
    }
}
