//! Tab-separated table loading.
//!
//! IMDb dumps are tab separated with a header row, use `\N` for null cells and
//! contain unescaped quote characters inside titles, so quoting is disabled and
//! quotes are read as literal text.

use crate::error::{CurateError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Null marker used by the IMDb dumps.
pub const NULL_MARKER: &str = "\\N";

/// A record type that can be built from one table row.
pub trait FromRow: Sized {
    /// Columns this record reads. Each must be present in the header.
    const COLUMNS: &'static [&'static str];

    /// Build a record from a row.
    fn from_row(row: &Row<'_>) -> Result<Self>;
}

/// One row of a table, addressed by column name.
pub struct Row<'a> {
    path: &'a Path,
    line: u64,
    names: &'static [&'static str],
    indices: &'a [usize],
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    /// Raw cell text. Columns not declared by the record read as empty.
    pub fn raw(&self, column: &str) -> &'a str {
        self.names
            .iter()
            .position(|name| *name == column)
            .and_then(|i| self.record.get(self.indices[i]))
            .unwrap_or("")
    }

    /// Cell text with `\N` and empty cells mapped to `None`.
    pub fn text(&self, column: &str) -> Option<String> {
        nullable(self.raw(column)).map(str::to_string)
    }

    /// Parse a cell that must hold a value.
    pub fn parse<T: FromStr>(&self, column: &str) -> Result<T> {
        let value = self.raw(column);
        value.trim().parse().map_err(|_| CurateError::InvalidField {
            path: self.path.to_path_buf(),
            line: self.line,
            column: column.to_string(),
            value: value.to_string(),
        })
    }

    /// Parse an optional cell. Null and unparseable text both yield `None`.
    pub fn parse_lenient<T: FromStr>(&self, column: &str) -> Option<T> {
        nullable(self.raw(column)).and_then(|v| v.trim().parse().ok())
    }

    /// Split a comma-joined list cell.
    pub fn list(&self, column: &str) -> Vec<String> {
        nullable(self.raw(column))
            .map(|v| v.split(',').map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// 1-based line number of this row in its file.
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// Map the IMDb null marker and empty text to `None`.
pub fn nullable(value: &str) -> Option<&str> {
    if value.is_empty() || value == NULL_MARKER {
        None
    } else {
        Some(value)
    }
}

/// Streaming reader yielding typed records from a tab-separated table.
pub struct TsvReader<T, R = BufReader<File>> {
    path: PathBuf,
    reader: csv::Reader<R>,
    indices: Vec<usize>,
    record: csv::StringRecord,
    _marker: PhantomData<T>,
}

impl<T: FromRow> TsvReader<T> {
    /// Open a table on disk and validate its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CurateError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(path, BufReader::with_capacity(1 << 20, file))
    }
}

impl<T: FromRow, R: Read> TsvReader<T, R> {
    /// Wrap any reader. `label` is used in error messages.
    pub fn from_reader(label: impl Into<PathBuf>, reader: R) -> Result<Self> {
        let path = label.into();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| CurateError::csv(&path, e))?
            .clone();

        let indices = T::COLUMNS
            .iter()
            .map(|column| {
                headers
                    .iter()
                    .position(|h| h == *column)
                    .ok_or_else(|| CurateError::MissingColumn {
                        path: path.clone(),
                        column: column.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path,
            reader,
            indices,
            record: csv::StringRecord::new(),
            _marker: PhantomData,
        })
    }

    /// Path (or label) this reader was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: FromRow, R: Read> Iterator for TsvReader<T, R> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map(|p| p.line()).unwrap_or(0);
                let row = Row {
                    path: &self.path,
                    line,
                    names: T::COLUMNS,
                    indices: &self.indices,
                    record: &self.record,
                };
                Some(T::from_row(&row))
            }
            Err(e) => Some(Err(CurateError::csv(&self.path, e))),
        }
    }
}

/// Load a whole table into memory.
pub fn read_all<T: FromRow>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    TsvReader::<T>::open(path)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        key: String,
        count: u32,
        tags: Vec<String>,
        year: Option<u32>,
    }

    impl FromRow for Pair {
        const COLUMNS: &'static [&'static str] = &["key", "count", "tags", "year"];

        fn from_row(row: &Row<'_>) -> Result<Self> {
            Ok(Self {
                key: row.raw("key").to_string(),
                count: row.parse("count")?,
                tags: row.list("tags"),
                year: row.parse_lenient("year"),
            })
        }
    }

    fn reader(data: &str) -> Result<TsvReader<Pair, &[u8]>> {
        TsvReader::from_reader("mem.tsv", data.as_bytes())
    }

    #[test]
    fn test_reads_columns_in_any_order() {
        let data = "year\tkey\textra\ttags\tcount\n1999\ta\tx\tp,q\t3\n\\N\t\"b\tx\t\\N\t4\n";
        let rows: Vec<Pair> = reader(data).unwrap().collect::<Result<_>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "a");
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].tags, vec!["p", "q"]);
        assert_eq!(rows[0].year, Some(1999));
        // Quotes are literal
        assert_eq!(rows[1].key, "\"b");
        assert!(rows[1].tags.is_empty());
        assert_eq!(rows[1].year, None);
    }

    #[test]
    fn test_missing_column() {
        let err = reader("key\tcount\ttags\n").err().unwrap();
        assert!(matches!(err, CurateError::MissingColumn { ref column, .. } if column == "year"));
    }

    #[test]
    fn test_invalid_required_field_reports_line() {
        let data = "key\tcount\ttags\tyear\na\t1\t\\N\t\\N\nb\tmany\t\\N\t\\N\n";
        let results: Vec<Result<Pair>> = reader(data).unwrap().collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(CurateError::InvalidField { line, column, value, .. }) => {
                assert_eq!(*line, 3);
                assert_eq!(column, "count");
                assert_eq!(value, "many");
            }
            _ => panic!("expected InvalidField"),
        }
    }

    #[test]
    fn test_lenient_parse_passes_garbage_through() {
        let data = "key\tcount\ttags\tyear\na\t1\t\\N\tsoon\n";
        let rows: Vec<Pair> = reader(data).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(rows[0].year, None);
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let data = "key\tcount\ttags\tyear\na\t1\n";
        let results: Vec<Result<Pair>> = reader(data).unwrap().collect();
        assert!(matches!(results[0], Err(CurateError::Csv { .. })));
    }
}
