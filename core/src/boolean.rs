//! Exact Boolean set retrieval over the collection postings.
//!
//! Queries are flat sequences of operand terms and `AND` / `OR` / `NOT` operators,
//! evaluated strictly left to right with no precedence and no grouping.

use crate::{CollectionIndex, DocId};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    /// Recognize an operator keyword, ignoring case.
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("AND") {
            Some(Operator::And)
        } else if token.eq_ignore_ascii_case("OR") {
            Some(Operator::Or)
        } else if token.eq_ignore_ascii_case("NOT") {
            Some(Operator::Not)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    Operator(Operator),
    /// Case-folded operand term.
    Term(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanQuery {
    tokens: Vec<QueryToken>,
}

impl BooleanQuery {
    /// Split a query line on whitespace. Operator keywords match in any case. Every other
    /// word becomes an operand, case-folded by uppercasing and then lowercasing, so `Straße`
    /// is looked up as `strasse`.
    pub fn parse(text: &str) -> Self {
        let tokens = text
            .split_whitespace()
            .map(|word| match Operator::parse(word) {
                Some(op) => QueryToken::Operator(op),
                None => QueryToken::Term(word.to_uppercase().to_lowercase()),
            })
            .collect();
        Self { tokens }
    }

    pub fn from_tokens(tokens: Vec<QueryToken>) -> Self { Self { tokens } }

    pub fn tokens(&self) -> &[QueryToken] { &self.tokens }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }
}

/// Evaluation state. The pending operator is not cleared by an operand, so it applies to
/// every following operand until another operator replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No operator seen yet; an operand replaces the running result.
    AwaitingOperand,
    /// An operator is pending; the last one read wins.
    HaveOperator(Operator),
}

/// One pass over a query. [`Evaluation::finish`] consumes it, so no token can be fed
/// once the result has been handed out.
struct Evaluation<'e, 'a> {
    evaluator: &'e BooleanEvaluator<'a>,
    state: State,
    result: BTreeSet<DocId>,
}

impl Evaluation<'_, '_> {
    fn feed(&mut self, token: &QueryToken) {
        let term = match token {
            QueryToken::Operator(op) => {
                self.state = State::HaveOperator(*op);
                return;
            }
            QueryToken::Term(term) => term,
        };
        let evaluator = self.evaluator;
        let postings = evaluator.postings(term);
        match self.state {
            State::AwaitingOperand => self.result = postings.clone(),
            State::HaveOperator(Operator::And) => self.result.retain(|id| postings.contains(id)),
            State::HaveOperator(Operator::Or) => self.result.extend(postings.iter().cloned()),
            State::HaveOperator(Operator::Not) => self.result.retain(|id| !postings.contains(id)),
        }
    }

    fn finish(self) -> BTreeSet<DocId> {
        tracing::debug!(state = ?self.state, matches = self.result.len(), "evaluated boolean query");
        self.result
    }
}

pub struct BooleanEvaluator<'a> {
    index: &'a CollectionIndex,
    empty: BTreeSet<DocId>,
}

impl<'a> BooleanEvaluator<'a> {
    pub fn new(index: &'a CollectionIndex) -> Self {
        Self { index, empty: BTreeSet::new() }
    }

    /// Documents containing `term`; the empty set for unknown terms.
    pub fn postings(&self, term: &str) -> &BTreeSet<DocId> {
        self.index.postings(term).unwrap_or(&self.empty)
    }

    /// Parse and evaluate a raw query line.
    pub fn search(&self, text: &str) -> BTreeSet<DocId> {
        self.evaluate(&BooleanQuery::parse(text))
    }

    /// Evaluate a query into the set of matching document ids.
    ///
    /// The running result starts as every document, so a query without operands returns
    /// the whole collection and a leading `NOT t` yields the complement of `t`.
    pub fn evaluate(&self, query: &BooleanQuery) -> BTreeSet<DocId> {
        let mut eval = Evaluation {
            evaluator: self,
            state: State::AwaitingOperand,
            result: self.index.document_ids().map(str::to_string).collect(),
        };
        for token in query.tokens() {
            eval.feed(token);
        }
        eval.finish()
    }
}
