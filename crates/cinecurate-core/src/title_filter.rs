//! Title filter: keep the rows typed as movies.

use crate::error::Result;
use crate::types::TitleRecord;
use tracing::info;

/// Movies selected from the title table.
#[derive(Debug, Clone, Default)]
pub struct MovieSelection {
    /// Movie rows in title-table order.
    pub movies: Vec<TitleRecord>,
    /// Rows read from the title table.
    pub total: usize,
}

/// Keep the titles whose type tag is `movie`.
pub fn filter_movies<I>(titles: I) -> Result<MovieSelection>
where
    I: IntoIterator<Item = Result<TitleRecord>>,
{
    let mut selection = MovieSelection::default();
    for title in titles {
        let title = title?;
        selection.total += 1;
        if title.is_movie() {
            selection.movies.push(title);
        }
    }

    info!(
        total = selection.total,
        movies = selection.movies.len(),
        "Filtered movies"
    );
    Ok(selection)
}
