//! Read a document collection from disk.
//!
//! Three layouts are understood:
//! - a directory: one document per regular file, id = file name (sub-directories ignored)
//! - a `.csv` file: header row, then `id,text` rows
//! - a `.jsonl` / `.json` file: one `{"id": ..., "body": ...}` object per line

use crate::{CollectionIndex, Document, Error, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    body: String,
}

/// Load a collection, choosing the layout from the path: directories are read file by
/// file, `.jsonl`/`.json` as JSON lines, anything else as CSV.
pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let docs = if path.is_dir() {
        load_directory(path)?
    } else {
        match path.extension().and_then(|s| s.to_str()) {
            Some("jsonl") | Some("json") => load_jsonl(path)?,
            _ => load_csv(path)?,
        }
    };
    tracing::info!(path = %path.display(), num_docs = docs.len(), "loaded documents");
    Ok(docs)
}

/// Load and index a collection in one step.
pub fn load_index<P: AsRef<Path>>(path: P) -> Result<CollectionIndex> {
    CollectionIndex::new(load_collection(path)?)
}

/// One document per regular file directly inside `dir`, in file name order.
pub fn load_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<Document>> {
    let mut docs = Vec::new();
    let walker = WalkDir::new(dir.as_ref())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let id = entry.file_name().to_string_lossy().into_owned();
        let text = fs::read_to_string(entry.path())?;
        docs.push(Document::from_text(id, &text));
    }
    Ok(docs)
}

/// Two-column CSV (`id`, `text`) with a header row. Rows with any other column count are
/// rejected.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut docs = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != 2 {
            return Err(Error::MalformedRow {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                columns: record.len(),
            });
        }
        docs.push(Document::from_text(&record[0], &record[1]));
    }
    Ok(docs)
}

/// JSON lines, one `{"id", "body"}` object per line. Blank lines are skipped.
pub fn load_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut docs = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line).map_err(|source| Error::MalformedRecord {
            path: path.to_path_buf(),
            line: i + 1,
            source,
        })?;
        docs.push(Document::from_text(doc.id, &doc.body));
    }
    Ok(docs)
}
