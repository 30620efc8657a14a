//! Classical retrieval models over one shared term-statistics index.
//!
//! A [`CollectionIndex`] is built once per collection and borrowed by each model:
//! - [`boolean`]: exact set retrieval with `AND` / `OR` / `NOT`
//! - [`bim`]: Binary Independence Model with relevance feedback
//! - [`vector`]: TF-IDF vectors ranked by cosine similarity
//!
//! The models do no I/O. [`loader`] reads collections from a directory, CSV or JSON lines.

pub mod bim;
pub mod boolean;
pub mod error;
pub mod index;
pub mod loader;
pub mod ranking;
pub mod tokenizer;
pub mod vector;

pub use bim::BimScorer;
pub use boolean::{BooleanEvaluator, BooleanQuery};
pub use error::{Error, Result};
pub use index::{CollectionIndex, DocId, Document, IndexSummary};
pub use ranking::ScoredDocument;
pub use vector::{TermVector, VectorSpaceRanker};
