//! Basics projector: restrict the movie table to qualifying titles.

use crate::types::{ProjectedMovie, TitleRecord};
use std::collections::HashSet;
use tracing::info;

/// Join a comma list with single spaces. Empty lists yield `None`.
///
/// The normalization is one way: commas inside an item become
/// indistinguishable from separators.
pub fn space_join(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(" "))
    }
}

/// Keep qualifying movies in title-table order and drop the type tag and
/// end year.
pub fn project_basics(movies: &[TitleRecord], qualifying: &HashSet<&str>) -> Vec<ProjectedMovie> {
    let projected: Vec<ProjectedMovie> = movies
        .iter()
        .filter(|movie| qualifying.contains(movie.id.as_str()))
        .map(|movie| ProjectedMovie {
            id: movie.id.clone(),
            original_title: movie.original_title.clone(),
            is_adult: movie.is_adult,
            start_year: movie.start_year,
            runtime_minutes: movie.runtime_minutes,
            genres: space_join(&movie.genres),
        })
        .collect();

    info!(
        movies = movies.len(),
        projected = projected.len(),
        "Projected movie basics"
    );
    projected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, genres: &[&str]) -> TitleRecord {
        TitleRecord {
            id: id.into(),
            title_type: "movie".into(),
            original_title: Some(format!("{id} title")),
            is_adult: Some(false),
            start_year: Some(1999),
            end_year: Some(2001),
            runtime_minutes: Some(136),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn test_genres_lose_their_commas() {
        let movies = vec![movie("tt1", &["Action", "Sci-Fi"])];
        let qualifying: HashSet<&str> = ["tt1"].into_iter().collect();

        let projected = project_basics(&movies, &qualifying);
        assert_eq!(projected[0].genres.as_deref(), Some("Action Sci-Fi"));
        assert!(!projected[0].genres.as_deref().unwrap().contains(','));
    }

    #[test]
    fn test_restricts_to_qualifying_in_title_order() {
        let movies = vec![movie("tt1", &[]), movie("tt2", &[]), movie("tt3", &["Drama"])];
        let qualifying: HashSet<&str> = ["tt3", "tt1"].into_iter().collect();

        let projected = project_basics(&movies, &qualifying);
        let ids: Vec<&str> = projected.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt3"]);
        assert_eq!(projected[0].genres, None);
        assert_eq!(projected[0].start_year, Some(1999));
    }

    #[test]
    fn test_space_join_keeps_empty_items() {
        let items = vec!["a".to_string(), String::new(), "b".to_string()];
        assert_eq!(space_join(&items).as_deref(), Some("a  b"));
    }
}
