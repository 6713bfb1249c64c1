//! Rating filter: keep popular, well-rated movies.

use crate::config::CurationConfig;
use crate::error::Result;
use crate::types::{RatingRecord, TitleRecord};
use std::collections::HashSet;
use tracing::info;

/// Identifiers of the qualifying movies.
#[derive(Debug, Clone, Default)]
pub struct QualifyingMovies {
    /// In rating-table order.
    pub ids: Vec<String>,
    /// Ratings that belonged to a movie, before thresholds.
    pub matched: usize,
}

impl QualifyingMovies {
    pub fn id_set(&self) -> HashSet<&str> {
        self.ids.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Both comparisons are strict.
pub fn qualifies(rating: &RatingRecord, config: &CurationConfig) -> bool {
    rating.num_votes > config.min_votes && rating.average_rating > config.min_rating
}

/// Join ratings to the selected movies and apply the thresholds.
pub fn filter_by_ratings<I>(
    ratings: I,
    movies: &[TitleRecord],
    config: &CurationConfig,
) -> Result<QualifyingMovies>
where
    I: IntoIterator<Item = Result<RatingRecord>>,
{
    let movie_ids: HashSet<&str> = movies.iter().map(|m| m.id.as_str()).collect();

    let mut result = QualifyingMovies::default();
    for rating in ratings {
        let rating = rating?;
        if !movie_ids.contains(rating.id.as_str()) {
            continue;
        }
        result.matched += 1;
        if qualifies(&rating, config) {
            result.ids.push(rating.id);
        }
    }

    info!(
        matched = result.matched,
        qualifying = result.ids.len(),
        min_votes = config.min_votes,
        min_rating = config.min_rating,
        "Filtered movies by ratings and popularity"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str) -> TitleRecord {
        TitleRecord {
            id: id.into(),
            title_type: "movie".into(),
            original_title: Some(id.to_uppercase()),
            is_adult: None,
            start_year: None,
            end_year: None,
            runtime_minutes: None,
            genres: Vec::new(),
        }
    }

    fn rating(id: &str, average_rating: f64, num_votes: u64) -> Result<RatingRecord> {
        Ok(RatingRecord {
            id: id.into(),
            average_rating,
            num_votes,
        })
    }

    #[test]
    fn test_thresholds_are_strict() {
        let config = CurationConfig::default();
        let movies = vec![movie("tt1"), movie("tt2"), movie("tt3"), movie("tt4")];
        let ratings = vec![
            rating("tt1", 7.0, 5000),  // rating equal to minimum
            rating("tt2", 8.0, 1000),  // votes equal to minimum
            rating("tt3", 7.1, 1001),
            rating("tt4", 6.5, 90000),
        ];

        let result = filter_by_ratings(ratings, &movies, &config).unwrap();
        assert_eq!(result.ids, vec!["tt3"]);
        assert_eq!(result.matched, 4);
    }

    #[test]
    fn test_ignores_ratings_of_non_movies() {
        let config = CurationConfig::default();
        let movies = vec![movie("tt1")];
        let ratings = vec![rating("tt9", 9.9, 1_000_000), rating("tt1", 8.2, 50_000)];

        let result = filter_by_ratings(ratings, &movies, &config).unwrap();
        assert_eq!(result.ids, vec!["tt1"]);
        assert_eq!(result.matched, 1);
    }

    #[test]
    fn test_keeps_rating_file_order() {
        let config = CurationConfig::default();
        let movies = vec![movie("tt1"), movie("tt2"), movie("tt3")];
        let ratings = vec![
            rating("tt3", 8.0, 2000),
            rating("tt1", 8.0, 2000),
            rating("tt2", 8.0, 2000),
        ];

        let result = filter_by_ratings(ratings, &movies, &config).unwrap();
        assert_eq!(result.ids, vec!["tt3", "tt1", "tt2"]);
    }

    #[test]
    fn test_vote_threshold_is_configurable() {
        let movies = vec![movie("tt1")];
        let strict = CurationConfig::default().with_min_votes(50_000);
        let result = filter_by_ratings(vec![rating("tt1", 8.2, 50_000)], &movies, &strict).unwrap();
        assert!(result.is_empty());

        let relaxed = CurationConfig::default().with_min_votes(10_000);
        let result = filter_by_ratings(vec![rating("tt1", 8.2, 50_000)], &movies, &relaxed).unwrap();
        assert_eq!(result.len(), 1);
    }
}
