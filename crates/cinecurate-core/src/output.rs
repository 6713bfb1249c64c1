//! Curated table writers.
//!
//! Outputs are comma separated with a header row and `\n` line endings. The
//! target file is truncated and rewritten on every run.

use crate::error::{CurateError, Result};
use crate::types::{CuratedMovie, CuratedPerson};
use std::io::Write;
use std::path::Path;
use tracing::info;

fn csv_writer<W: Write>(sink: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink)
}

fn write_rows<W, I, const N: usize>(sink: W, header: [&str; N], rows: I) -> csv::Result<()>
where
    W: Write,
    I: IntoIterator<Item = [String; N]>,
{
    let mut writer = csv_writer(sink);
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CurateError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::File::create(path).map_err(|source| CurateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize curated movies into any writer.
pub fn write_movies_to<W: Write>(sink: W, movies: &[CuratedMovie]) -> csv::Result<()> {
    write_rows(sink, CuratedMovie::HEADER, movies.iter().map(CuratedMovie::to_record))
}

/// Serialize curated people into any writer.
pub fn write_people_to<W: Write>(sink: W, people: &[CuratedPerson]) -> csv::Result<()> {
    write_rows(sink, CuratedPerson::HEADER, people.iter().map(CuratedPerson::to_record))
}

/// Write the curated movie table, creating parent directories.
pub fn write_movies(path: &Path, movies: &[CuratedMovie]) -> Result<()> {
    let file = create(path)?;
    write_movies_to(file, movies).map_err(|e| CurateError::csv(path, e))?;
    info!(path = %path.display(), rows = movies.len(), "Curated movies saved");
    Ok(())
}

/// Write the curated people table, creating parent directories.
pub fn write_people(path: &Path, people: &[CuratedPerson]) -> Result<()> {
    let file = create(path)?;
    write_people_to(file, people).map_err(|e| CurateError::csv(path, e))?;
    info!(path = %path.display(), rows = people.len(), "Curated people saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_is_header_only() {
        let mut buf = Vec::new();
        write_movies_to(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "originalTitle,actor,actress,director,writer,isAdult,startYear,runtimeMinutes,genres\n"
        );
    }

    #[test]
    fn test_cells_with_commas_are_quoted() {
        let movie = CuratedMovie {
            original_title: "Crouching Tiger, Hidden Dragon".into(),
            actor: Some("Chow Yun-Fat".into()),
            ..Default::default()
        };
        let mut buf = Vec::new();
        write_movies_to(&mut buf, &[movie]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let line = text.lines().nth(1).unwrap();
        assert_eq!(line, "\"Crouching Tiger, Hidden Dragon\",Chow Yun-Fat,,,,,,,");
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rag").join("movie_curated.csv");
        write_movies(&path, &[]).unwrap();
        assert!(path.exists());
    }
}
