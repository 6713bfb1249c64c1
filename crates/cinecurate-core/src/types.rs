//! Typed records for the IMDb input tables and the curated output.

use crate::error::Result;
use crate::table::{FromRow, Row};

/// Type tag of the titles retained by the curation.
pub const MOVIE_TYPE: &str = "movie";

/// One row of `title.basics.tsv`.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRecord {
    pub id: String,
    pub title_type: String,
    pub original_title: Option<String>,
    pub is_adult: Option<bool>,
    pub start_year: Option<u32>,
    pub end_year: Option<u32>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<String>,
}

impl TitleRecord {
    pub fn is_movie(&self) -> bool {
        self.title_type == MOVIE_TYPE
    }
}

impl FromRow for TitleRecord {
    const COLUMNS: &'static [&'static str] = &[
        "tconst",
        "titleType",
        "originalTitle",
        "isAdult",
        "startYear",
        "endYear",
        "runtimeMinutes",
        "genres",
    ];

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.raw("tconst").to_string(),
            title_type: row.raw("titleType").to_string(),
            original_title: row.text("originalTitle"),
            is_adult: row.parse_lenient::<u8>("isAdult").map(|flag| flag != 0),
            start_year: row.parse_lenient("startYear"),
            end_year: row.parse_lenient("endYear"),
            runtime_minutes: row.parse_lenient("runtimeMinutes"),
            genres: row.list("genres"),
        })
    }
}

/// One row of `title.ratings.tsv`.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub id: String,
    pub average_rating: f64,
    pub num_votes: u64,
}

impl FromRow for RatingRecord {
    const COLUMNS: &'static [&'static str] = &["tconst", "averageRating", "numVotes"];

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.raw("tconst").to_string(),
            average_rating: row.parse("averageRating")?,
            num_votes: row.parse("numVotes")?,
        })
    }
}

/// One row of `title.principals.tsv`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrincipalRecord {
    pub title_id: String,
    pub person_id: String,
    pub ordering: u32,
    pub category: String,
}

impl FromRow for PrincipalRecord {
    const COLUMNS: &'static [&'static str] = &["tconst", "ordering", "nconst", "category"];

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            title_id: row.raw("tconst").to_string(),
            person_id: row.raw("nconst").to_string(),
            ordering: row.parse("ordering")?,
            category: row.raw("category").to_string(),
        })
    }
}

/// One row of `name.basics.tsv`.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    pub id: String,
    pub primary_name: Option<String>,
    pub professions: Vec<String>,
    pub known_for: Vec<String>,
}

impl FromRow for PersonRecord {
    const COLUMNS: &'static [&'static str] =
        &["nconst", "primaryName", "primaryProfession", "knownForTitles"];

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            id: row.raw("nconst").to_string(),
            primary_name: row.text("primaryName"),
            professions: row.list("primaryProfession"),
            known_for: row.list("knownForTitles"),
        })
    }
}

/// Credit categories kept by the aggregator, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleCategory {
    Actor,
    Actress,
    Director,
    Writer,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 4] = [
        RoleCategory::Actor,
        RoleCategory::Actress,
        RoleCategory::Director,
        RoleCategory::Writer,
    ];

    /// Parse a principal `category` value. Unretained categories yield `None`.
    pub fn parse(category: &str) -> Option<Self> {
        match category {
            "actor" => Some(RoleCategory::Actor),
            "actress" => Some(RoleCategory::Actress),
            "director" => Some(RoleCategory::Director),
            "writer" => Some(RoleCategory::Writer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Actor => "actor",
            RoleCategory::Actress => "actress",
            RoleCategory::Director => "director",
            RoleCategory::Writer => "writer",
        }
    }

    /// Group sharing a per-movie cap. Actors and actresses share one.
    pub fn group(&self) -> RoleGroup {
        match self {
            RoleCategory::Actor | RoleCategory::Actress => RoleGroup::Actors,
            RoleCategory::Director => RoleGroup::Director,
            RoleCategory::Writer => RoleGroup::Writer,
        }
    }
}

/// Capped partitions of the principal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleGroup {
    Actors,
    Director,
    Writer,
}

/// A movie after the basics projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedMovie {
    /// Kept as the identifier join key. Not written to the output.
    pub id: String,
    pub original_title: Option<String>,
    pub is_adult: Option<bool>,
    pub start_year: Option<u32>,
    pub runtime_minutes: Option<u32>,
    /// Genres joined by single spaces.
    pub genres: Option<String>,
}

/// One row of the curated output table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CuratedMovie {
    pub original_title: String,
    pub actor: Option<String>,
    pub actress: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub is_adult: Option<bool>,
    pub start_year: Option<u32>,
    pub runtime_minutes: Option<u32>,
    pub genres: Option<String>,
}

impl CuratedMovie {
    /// Output header, in column order.
    pub const HEADER: [&'static str; 9] = [
        "originalTitle",
        "actor",
        "actress",
        "director",
        "writer",
        "isAdult",
        "startYear",
        "runtimeMinutes",
        "genres",
    ];

    pub fn credits(&self, category: RoleCategory) -> Option<&str> {
        match category {
            RoleCategory::Actor => self.actor.as_deref(),
            RoleCategory::Actress => self.actress.as_deref(),
            RoleCategory::Director => self.director.as_deref(),
            RoleCategory::Writer => self.writer.as_deref(),
        }
    }

    pub(crate) fn set_credits(&mut self, category: RoleCategory, names: String) {
        let slot = match category {
            RoleCategory::Actor => &mut self.actor,
            RoleCategory::Actress => &mut self.actress,
            RoleCategory::Director => &mut self.director,
            RoleCategory::Writer => &mut self.writer,
        };
        *slot = Some(names);
    }

    /// Cells in header order.
    ///
    /// Missing values, IMDb `\N` cells included, render as empty cells
    /// rather than the literal `\N` marker.
    pub fn to_record(&self) -> [String; 9] {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let num = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        [
            self.original_title.clone(),
            opt(&self.actor),
            opt(&self.actress),
            opt(&self.director),
            opt(&self.writer),
            self.is_adult
                .map(|adult| if adult { "1" } else { "0" }.to_string())
                .unwrap_or_default(),
            num(self.start_year),
            num(self.runtime_minutes),
            opt(&self.genres),
        ]
    }
}

/// A person after the people curation.
#[derive(Debug, Clone, PartialEq)]
pub struct CuratedPerson {
    pub id: String,
    pub primary_name: Option<String>,
    /// Professions joined by single spaces.
    pub professions: String,
    /// Known-for title identifiers joined by single spaces.
    pub known_for: String,
}

impl CuratedPerson {
    pub const HEADER: [&'static str; 4] =
        ["nconst", "primaryName", "primaryProfession", "knownForTitles"];

    pub fn to_record(&self) -> [String; 4] {
        [
            self.id.clone(),
            self.primary_name.clone().unwrap_or_default(),
            self.professions.clone(),
            self.known_for.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_category_parse() {
        assert_eq!(RoleCategory::parse("actress"), Some(RoleCategory::Actress));
        assert_eq!(RoleCategory::parse("composer"), None);
        assert_eq!(RoleCategory::parse("Actor"), None);
    }

    #[test]
    fn test_actor_and_actress_share_a_group() {
        assert_eq!(RoleCategory::Actor.group(), RoleCategory::Actress.group());
        assert_ne!(RoleCategory::Actor.group(), RoleCategory::Writer.group());
    }

    #[test]
    fn test_curated_record_cells() {
        let mut movie = CuratedMovie {
            original_title: "Heat".into(),
            is_adult: Some(false),
            start_year: Some(1995),
            genres: Some("Action Crime".into()),
            ..Default::default()
        };
        movie.set_credits(RoleCategory::Director, "Michael Mann".into());

        let cells = movie.to_record();
        assert_eq!(cells[0], "Heat");
        assert_eq!(cells[1], "");
        assert_eq!(cells[3], "Michael Mann");
        assert_eq!(cells[5], "0");
        assert_eq!(cells[6], "1995");
        assert_eq!(cells[7], "");
        assert_eq!(cells[8], "Action Crime");
    }
}
