//! Principal aggregator: pivot cast and crew into one row per movie.
//!
//! Credits are capped per movie and group in source-file order. The file is
//! expected to be sorted by `ordering` within each title; no re-sort happens.

use crate::config::{CurationConfig, JoinKey};
use crate::error::Result;
use crate::types::{CuratedMovie, PrincipalRecord, ProjectedMovie, RoleCategory, RoleGroup};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// A retained principal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credit {
    pub title_id: String,
    pub person_id: String,
    pub ordering: u32,
    pub category: RoleCategory,
}

/// Credits kept after capping, in principal-table order.
#[derive(Debug, Clone, Default)]
pub struct CreditSelection {
    pub credits: Vec<Credit>,
    /// Principal rows that belonged to a qualifying movie.
    pub matched: usize,
    /// Rows read from the principal table.
    pub total: usize,
}

impl CreditSelection {
    /// Person identifiers referenced by the kept credits.
    pub fn person_ids(&self) -> HashSet<&str> {
        self.credits.iter().map(|c| c.person_id.as_str()).collect()
    }
}

/// Filter principals to qualifying movies and keep the first credits of each
/// group per movie.
///
/// A single ordered pass gives the same rows, in the same order, as capping
/// each group separately and restoring the original row positions.
pub fn select_credits<I>(
    principals: I,
    qualifying: &HashSet<&str>,
    config: &CurationConfig,
) -> Result<CreditSelection>
where
    I: IntoIterator<Item = Result<PrincipalRecord>>,
{
    let mut selection = CreditSelection::default();
    let mut taken: HashMap<(String, RoleGroup), usize> = HashMap::new();

    for principal in principals {
        let principal = principal?;
        selection.total += 1;
        if !qualifying.contains(principal.title_id.as_str()) {
            continue;
        }
        selection.matched += 1;

        let Some(category) = RoleCategory::parse(&principal.category) else {
            continue;
        };
        let group = category.group();
        let count = taken
            .entry((principal.title_id.clone(), group))
            .or_insert(0);
        if *count >= config.cap(group) {
            continue;
        }
        *count += 1;

        selection.credits.push(Credit {
            title_id: principal.title_id,
            person_id: principal.person_id,
            ordering: principal.ordering,
            category,
        });
    }

    info!(
        total = selection.total,
        matched = selection.matched,
        kept = selection.credits.len(),
        "Subset cast and crew"
    );
    Ok(selection)
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct MovieKey {
    title: String,
    /// Only set when grouping by identifier.
    id: Option<String>,
}

/// Group credits by movie and category, join names with spaces, pivot one row
/// per movie and re-merge the descriptive attributes.
///
/// Rows are ordered by title (then identifier). Credits whose movie has no
/// title are dropped. Persons missing from `names` are skipped.
///
/// With [`JoinKey::Title`], movies sharing an original title are grouped into
/// one row whose name lists concatenate every such movie's credits, and the
/// attributes come from the first of them in title-table order.
pub fn aggregate(
    credits: &[Credit],
    movies: &[ProjectedMovie],
    names: &HashMap<&str, &str>,
    join_key: JoinKey,
) -> Vec<CuratedMovie> {
    let by_id: HashMap<&str, &ProjectedMovie> =
        movies.iter().map(|m| (m.id.as_str(), m)).collect();
    let mut by_title: HashMap<&str, &ProjectedMovie> = HashMap::new();
    for movie in movies {
        if let Some(title) = movie.original_title.as_deref() {
            by_title.entry(title).or_insert(movie);
        }
    }

    let mut pivot: BTreeMap<MovieKey, BTreeMap<RoleCategory, Vec<&str>>> = BTreeMap::new();
    for credit in credits {
        let Some(movie) = by_id.get(credit.title_id.as_str()) else {
            debug!(title_id = %credit.title_id, "Credit without projected movie");
            continue;
        };
        let Some(title) = movie.original_title.as_deref() else {
            continue;
        };
        let key = MovieKey {
            title: title.to_string(),
            id: match join_key {
                JoinKey::Title => None,
                JoinKey::Identifier => Some(movie.id.clone()),
            },
        };

        let cell = pivot.entry(key).or_default().entry(credit.category).or_default();
        if let Some(name) = names.get(credit.person_id.as_str()).copied() {
            cell.push(name);
        }
    }

    let rows: Vec<CuratedMovie> = pivot
        .into_iter()
        .map(|(key, cells)| {
            let attributes = match key.id.as_deref() {
                Some(id) => by_id.get(id),
                None => by_title.get(key.title.as_str()),
            };

            let mut row = CuratedMovie {
                original_title: key.title.clone(),
                ..Default::default()
            };
            if let Some(movie) = attributes {
                row.is_adult = movie.is_adult;
                row.start_year = movie.start_year;
                row.runtime_minutes = movie.runtime_minutes;
                row.genres = movie.genres.clone();
            }
            for (category, names) in cells {
                row.set_credits(category, names.join(" "));
            }
            row
        })
        .collect();

    info!(rows = rows.len(), join_key = %join_key, "Pivoted principals");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(title_id: &str, ordering: u32, person_id: &str, category: &str) -> Result<PrincipalRecord> {
        Ok(PrincipalRecord {
            title_id: title_id.into(),
            person_id: person_id.into(),
            ordering,
            category: category.into(),
        })
    }

    fn projected(id: &str, title: &str, year: u32) -> ProjectedMovie {
        ProjectedMovie {
            id: id.into(),
            original_title: Some(title.into()),
            is_adult: Some(false),
            start_year: Some(year),
            runtime_minutes: Some(120),
            genres: Some("Drama".into()),
        }
    }

    fn credit(title_id: &str, person_id: &str, category: RoleCategory) -> Credit {
        Credit {
            title_id: title_id.into(),
            person_id: person_id.into(),
            ordering: 1,
            category,
        }
    }

    #[test]
    fn test_caps_actors_to_first_two() {
        let config = CurationConfig::default();
        let qualifying: HashSet<&str> = ["tt1"].into_iter().collect();
        let principals = vec![
            principal("tt1", 1, "nm1", "actor"),
            principal("tt1", 2, "nm2", "actress"),
            principal("tt1", 3, "nm3", "actor"),
            principal("tt1", 4, "nm4", "director"),
            principal("tt1", 5, "nm5", "director"),
            principal("tt1", 6, "nm6", "composer"),
            principal("tt2", 1, "nm7", "actor"),
        ];

        let selection = select_credits(principals, &qualifying, &config).unwrap();
        let people: Vec<&str> = selection.credits.iter().map(|c| c.person_id.as_str()).collect();
        assert_eq!(people, vec!["nm1", "nm2", "nm4"]);
        assert_eq!(selection.matched, 6);
        assert_eq!(selection.total, 7);
    }

    #[test]
    fn test_actor_cap_is_configurable() {
        let config = CurationConfig::default().with_max_actors(3);
        let qualifying: HashSet<&str> = ["tt1"].into_iter().collect();
        let principals = (1..=4).map(|i| principal("tt1", i, &format!("nm{i}"), "actor"));

        let selection = select_credits(principals, &qualifying, &config).unwrap();
        assert_eq!(selection.credits.len(), 3);
    }

    #[test]
    fn test_cap_follows_file_order_not_ordering_rank() {
        let config = CurationConfig::default();
        let qualifying: HashSet<&str> = ["tt1"].into_iter().collect();
        let principals = vec![
            principal("tt1", 3, "nm3", "actor"),
            principal("tt1", 1, "nm1", "actor"),
            principal("tt1", 2, "nm2", "actor"),
        ];

        let selection = select_credits(principals, &qualifying, &config).unwrap();
        let people: Vec<&str> = selection.credits.iter().map(|c| c.person_id.as_str()).collect();
        assert_eq!(people, vec!["nm3", "nm1"]);
    }

    #[test]
    fn test_selection_preserves_interleaved_order() {
        let config = CurationConfig::default();
        let qualifying: HashSet<&str> = ["tt1", "tt2"].into_iter().collect();
        let principals = vec![
            principal("tt1", 1, "nm1", "writer"),
            principal("tt2", 1, "nm2", "actor"),
            principal("tt1", 2, "nm3", "actor"),
            principal("tt2", 2, "nm4", "director"),
        ];

        let selection = select_credits(principals, &qualifying, &config).unwrap();
        let people: Vec<&str> = selection.credits.iter().map(|c| c.person_id.as_str()).collect();
        assert_eq!(people, vec!["nm1", "nm2", "nm3", "nm4"]);
    }

    #[test]
    fn test_pivot_joins_names_in_credit_order() {
        let movies = vec![projected("tt1", "Alpha", 2001)];
        let credits = vec![
            credit("tt1", "nm2", RoleCategory::Actor),
            credit("tt1", "nm1", RoleCategory::Actor),
            credit("tt1", "nm3", RoleCategory::Director),
            credit("tt1", "nm9", RoleCategory::Writer),
        ];
        let names: HashMap<&str, &str> =
            [("nm1", "Ann Lee"), ("nm2", "Bo Park"), ("nm3", "Cy Dunn")].into_iter().collect();

        let rows = aggregate(&credits, &movies, &names, JoinKey::Title);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.original_title, "Alpha");
        assert_eq!(row.actor.as_deref(), Some("Bo Park Ann Lee"));
        assert_eq!(row.actress, None);
        assert_eq!(row.director.as_deref(), Some("Cy Dunn"));
        // Unknown person: the group exists but holds no names
        assert_eq!(row.writer.as_deref(), Some(""));
        assert_eq!(row.start_year, Some(2001));
    }

    #[test]
    fn test_rows_sorted_by_title() {
        let movies = vec![projected("tt1", "Zulu", 1964), projected("tt2", "Alien", 1979)];
        let credits = vec![
            credit("tt1", "nm1", RoleCategory::Actor),
            credit("tt2", "nm2", RoleCategory::Actress),
        ];
        let names: HashMap<&str, &str> = [("nm1", "A"), ("nm2", "B")].into_iter().collect();

        let rows = aggregate(&credits, &movies, &names, JoinKey::Title);
        let titles: Vec<&str> = rows.iter().map(|r| r.original_title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Zulu"]);
    }

    #[test]
    fn test_shared_title_merges_under_title_key() {
        let movies = vec![projected("tt1", "Hamlet", 1948), projected("tt2", "Hamlet", 1996)];
        let credits = vec![
            credit("tt1", "nm1", RoleCategory::Director),
            credit("tt2", "nm2", RoleCategory::Director),
        ];
        let names: HashMap<&str, &str> =
            [("nm1", "Laurence Olivier"), ("nm2", "Kenneth Branagh")].into_iter().collect();

        let rows = aggregate(&credits, &movies, &names, JoinKey::Title);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].director.as_deref(), Some("Laurence Olivier Kenneth Branagh"));
        assert_eq!(rows[0].start_year, Some(1948));
    }

    #[test]
    fn test_shared_title_splits_under_identifier_key() {
        let movies = vec![projected("tt2", "Hamlet", 1996), projected("tt1", "Hamlet", 1948)];
        let credits = vec![
            credit("tt2", "nm2", RoleCategory::Director),
            credit("tt1", "nm1", RoleCategory::Director),
        ];
        let names: HashMap<&str, &str> =
            [("nm1", "Laurence Olivier"), ("nm2", "Kenneth Branagh")].into_iter().collect();

        let rows = aggregate(&credits, &movies, &names, JoinKey::Identifier);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].director.as_deref(), Some("Laurence Olivier"));
        assert_eq!(rows[0].start_year, Some(1948));
        assert_eq!(rows[1].director.as_deref(), Some("Kenneth Branagh"));
        assert_eq!(rows[1].start_year, Some(1996));
    }

    #[test]
    fn test_movie_without_title_is_dropped() {
        let mut untitled = projected("tt1", "", 2000);
        untitled.original_title = None;
        let credits = vec![credit("tt1", "nm1", RoleCategory::Actor)];
        let names: HashMap<&str, &str> = [("nm1", "A")].into_iter().collect();

        let rows = aggregate(&credits, &[untitled], &names, JoinKey::Title);
        assert!(rows.is_empty());
    }
}
