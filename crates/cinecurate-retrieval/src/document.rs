//! Curated table loading as text documents.
//!
//! Every CSV row becomes one document whose text lists each cell as
//! `header: value` on its own line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Document loading errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("No CSV documents found under {0}")]
    Empty(PathBuf),
}

/// Result type for document loading.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// One curated row rendered as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// `header: value` lines.
    pub content: String,
    /// File the row came from.
    pub source: String,
    /// Zero-based row index within `source`.
    pub row: usize,
}

/// Render one row against its header.
pub fn render_row(headers: &csv::StringRecord, record: &csv::StringRecord) -> String {
    headers
        .iter()
        .zip(record.iter())
        .map(|(header, value)| format!("{}: {}", header.trim(), value.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Load every row of a curated CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> DocumentResult<Vec<Document>> {
    let path = path.as_ref();
    let csv_err = |source| DocumentError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let source = path.display().to_string();

    let mut documents = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        documents.push(Document {
            content: render_row(&headers, &record),
            source: source.clone(),
            row,
        });
    }

    debug!(path = %source, documents = documents.len(), "Loaded documents");
    Ok(documents)
}

/// Load every `*.csv` file under a directory, in sorted path order.
pub fn load_dir(dir: impl AsRef<Path>) -> DocumentResult<Vec<Document>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    collect_csv(dir, &mut files)?;
    if files.is_empty() {
        return Err(DocumentError::Empty(dir.to_path_buf()));
    }
    files.sort();

    let mut documents = Vec::new();
    for file in files {
        documents.extend(load_csv(&file)?);
    }
    Ok(documents)
}

fn collect_csv(dir: &Path, files: &mut Vec<PathBuf>) -> DocumentResult<()> {
    let io_err = |source| DocumentError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            collect_csv(&path, files)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("csv") {
            files.push(path);
        }
    }
    Ok(())
}

/// Join document texts with blank lines.
pub fn join_contents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> String {
    documents
        .into_iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
