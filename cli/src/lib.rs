use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ircore::loader::load_index;
use ircore::tokenizer::tokenize;
use ircore::{BimScorer, BooleanEvaluator, CollectionIndex, ScoredDocument, VectorSpaceRanker};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "irank")]
#[command(about = "Rank documents with Boolean, BIM or TF-IDF vector space retrieval", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct Source {
    /// Document collection: a directory of text files, a .csv (id,text) or a .jsonl file
    #[arg(long)]
    pub docs: PathBuf,
    /// Print JSON instead of plain text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a Boolean query, e.g. "apple AND NOT mango"
    Boolean {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        query: String,
    },
    /// Rank with the Binary Independence Model using relevance feedback
    Bim {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        query: String,
        /// Comma-separated ids of documents judged relevant
        #[arg(long, default_value = "")]
        relevant: String,
        /// Only print the best k documents
        #[arg(long)]
        top: Option<usize>,
    },
    /// Rank by cosine similarity of TF-IDF vectors
    Vector {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        query: String,
        /// Only print the best k documents
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print collection statistics and the inverted index
    Index {
        #[command(flatten)]
        source: Source,
    },
}

#[derive(Serialize)]
pub struct BooleanResponse {
    pub query: String,
    pub total_hits: usize,
    pub matches: Vec<String>,
}

#[derive(Serialize)]
pub struct RankingResponse {
    pub query: String,
    pub total_hits: usize,
    pub results: Vec<ScoredDocument>,
}

/// Split a comma-separated id list, trimming entries and dropping blanks.
pub fn parse_relevant(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn open(source: &Source) -> Result<CollectionIndex> {
    load_index(&source.docs).with_context(|| format!("loading documents from {}", source.docs.display()))
}

/// Execute one command, writing its report to `out`.
pub fn run<W: Write>(command: Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Boolean { source, query } => {
            let index = open(&source)?;
            let matches: Vec<String> = BooleanEvaluator::new(&index).search(&query).into_iter().collect();
            tracing::info!(query = %query, total_hits = matches.len(), "boolean query");
            let resp = BooleanResponse { query, total_hits: matches.len(), matches };
            if source.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&resp)?)?;
            } else if resp.matches.is_empty() {
                writeln!(out, "No documents match the query.")?;
            } else {
                for id in &resp.matches {
                    writeln!(out, "{id}")?;
                }
            }
        }
        Commands::Bim { source, query, relevant, top } => {
            let index = open(&source)?;
            let scorer = BimScorer::new(&index, parse_relevant(&relevant))
                .context("invalid relevance feedback")?;
            let ranked = scorer.rank(&tokenize(&query));
            write_ranking(out, query, ranked, top, source.json)?;
        }
        Commands::Vector { source, query, top } => {
            let index = open(&source)?;
            let ranked = VectorSpaceRanker::new(&index).rank(&tokenize(&query));
            write_ranking(out, query, ranked, top, source.json)?;
        }
        Commands::Index { source } => {
            let summary = open(&source)?.summary();
            if source.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                writeln!(out, "documents: {}", summary.num_docs)?;
                writeln!(out, "vocabulary: {}", summary.vocabulary_size)?;
                for (term, ids) in &summary.postings {
                    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                    writeln!(out, "{term}: {}", ids.join(", "))?;
                }
            }
        }
    }
    Ok(())
}

fn write_ranking<W: Write>(
    out: &mut W,
    query: String,
    mut ranked: Vec<ScoredDocument>,
    top: Option<usize>,
    json: bool,
) -> Result<()> {
    let total_hits = ranked.len();
    if let Some(k) = top {
        ranked.truncate(k);
    }
    tracing::info!(query = %query, total_hits, "ranked documents");
    if json {
        let resp = RankingResponse { query, total_hits, results: ranked };
        writeln!(out, "{}", serde_json::to_string_pretty(&resp)?)?;
        return Ok(());
    }
    for hit in &ranked {
        writeln!(out, "{}: {:.4}", hit.id, hit.score)?;
    }
    Ok(())
}
