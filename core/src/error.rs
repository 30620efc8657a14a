use std::path::PathBuf;

/// Errors raised by index construction, the BIM scorer and the loaders.
///
/// Degenerate-but-legal inputs (empty documents, empty queries, unknown terms) never
/// produce an error; they resolve to zero scores instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Two documents in one collection share an identifier.
    #[error("duplicate document id: {0}")]
    DuplicateDocument(String),
    /// Relevance feedback names a document the collection does not contain.
    #[error("relevance feedback references unknown document: {0}")]
    UnknownDocument(String),
    /// A tabular row did not have exactly two columns.
    #[error("{}: line {line}: expected 2 columns (id, text), found {columns}", path.display())]
    MalformedRow { path: PathBuf, line: u64, columns: usize },
    /// A JSON-lines record could not be decoded.
    #[error("{}: line {line}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// True for errors caused by inputs that violate a stated precondition, as opposed to
    /// failures of the underlying file system.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::DuplicateDocument(_)
                | Error::UnknownDocument(_)
                | Error::MalformedRow { .. }
                | Error::MalformedRecord { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
