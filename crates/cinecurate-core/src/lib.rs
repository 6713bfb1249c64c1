//! # cinecurate-core
//!
//! Curates the IMDb title, rating, principal and name dumps into one compact
//! movie table for question-answering consumers.
//!
//! The pipeline runs four stages in order:
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | Title filter | `title.basics.tsv` | rows typed `movie` |
//! | Rating filter | `title.ratings.tsv` | qualifying identifiers |
//! | Basics projector | movies + identifiers | projected movies |
//! | Principal aggregator | `title.principals.tsv`, `name.basics.tsv` | one row per movie |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cinecurate_core::prelude::*;
//!
//! let config = CurationConfig::default().with_min_votes(10_000);
//! let report = Curator::new(config, CurationPaths::default()).run()?;
//! println!("{} rows -> {}", report.counts.curated_rows, report.movie_output.display());
//! ```

pub mod basics;
pub mod config;
pub mod error;
pub mod output;
pub mod people;
pub mod pipeline;
pub mod principals;
pub mod rating_filter;
pub mod table;
pub mod title_filter;
pub mod types;

pub use config::{CurationConfig, CurationPaths, JoinKey, OutputMode};
pub use error::{CurateError, Result};
pub use pipeline::{curate, Curated, CurationReport, Curator, Sources, Stage, StageCounts};
pub use types::{
    CuratedMovie, CuratedPerson, PersonRecord, PrincipalRecord, ProjectedMovie, RatingRecord,
    RoleCategory, RoleGroup, TitleRecord,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CurateError, Result};
    pub use crate::{CurationConfig, CurationPaths, JoinKey, OutputMode};
    pub use crate::{CurationReport, Curator, Stage};
    pub use crate::{CuratedMovie, CuratedPerson};
}
