//! End-to-end curation run.

use crate::basics::project_basics;
use crate::config::{CurationConfig, CurationPaths};
use crate::error::Result;
use crate::output::{write_movies, write_people};
use crate::people::{curate_people, display_names, load_people};
use crate::principals::{aggregate, select_credits};
use crate::rating_filter::filter_by_ratings;
use crate::table::TsvReader;
use crate::title_filter::filter_movies;
use crate::types::{CuratedMovie, CuratedPerson, PersonRecord, PrincipalRecord, RatingRecord, TitleRecord};
use std::path::PathBuf;
use tracing::info;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    TitleFilter,
    RatingFilter,
    BasicsProjector,
    PrincipalAggregator,
    PersonCurator,
    Write,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::TitleFilter => "Filtering movies",
            Stage::RatingFilter => "Filtering by ratings and popularity",
            Stage::BasicsProjector => "Projecting movie basics",
            Stage::PrincipalAggregator => "Aggregating cast and crew",
            Stage::PersonCurator => "Curating people",
            Stage::Write => "Writing curated tables",
        }
    }
}

/// Row counts observed by each stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub titles: usize,
    pub movies: usize,
    pub rated_movies: usize,
    pub qualifying: usize,
    pub projected: usize,
    pub principals: usize,
    pub credits: usize,
    pub people: usize,
    pub curated_rows: usize,
}

/// Tables produced by one curation.
#[derive(Debug, Clone, Default)]
pub struct Curated {
    pub movies: Vec<CuratedMovie>,
    /// Present when people curation is enabled.
    pub people: Option<Vec<CuratedPerson>>,
    pub counts: StageCounts,
}

/// Outcome of [`Curator::run`].
#[derive(Debug, Clone)]
pub struct CurationReport {
    pub counts: StageCounts,
    pub movie_output: PathBuf,
    pub people_output: Option<PathBuf>,
}

/// Row sources for one curation. Each is consumed once, in stage order.
pub struct Sources<T, R, P, N> {
    pub titles: T,
    pub ratings: R,
    pub principals: P,
    /// Called once the credits are known.
    pub people: N,
}

/// Run every stage over the given sources without touching the filesystem.
pub fn curate<T, R, P, N, NI>(
    config: &CurationConfig,
    sources: Sources<T, R, P, N>,
    mut on_stage: impl FnMut(Stage),
) -> Result<Curated>
where
    T: IntoIterator<Item = Result<TitleRecord>>,
    R: IntoIterator<Item = Result<RatingRecord>>,
    P: IntoIterator<Item = Result<PrincipalRecord>>,
    N: FnOnce() -> Result<NI>,
    NI: IntoIterator<Item = Result<PersonRecord>>,
{
    config.validate()?;
    let mut counts = StageCounts::default();

    on_stage(Stage::TitleFilter);
    let selection = filter_movies(sources.titles)?;
    counts.titles = selection.total;
    counts.movies = selection.movies.len();

    on_stage(Stage::RatingFilter);
    let qualifying = filter_by_ratings(sources.ratings, &selection.movies, config)?;
    counts.rated_movies = qualifying.matched;
    counts.qualifying = qualifying.len();
    let qualifying_ids = qualifying.id_set();

    on_stage(Stage::BasicsProjector);
    let projected = project_basics(&selection.movies, &qualifying_ids);
    counts.projected = projected.len();

    on_stage(Stage::PrincipalAggregator);
    let credits = select_credits(sources.principals, &qualifying_ids, config)?;
    counts.principals = credits.total;
    counts.credits = credits.credits.len();

    let people = load_people((sources.people)()?, &credits.person_ids())?;
    counts.people = people.len();
    let names = display_names(&people);
    let movies = aggregate(&credits.credits, &projected, &names, config.join_key);
    counts.curated_rows = movies.len();

    let curated_people = if config.curate_people {
        on_stage(Stage::PersonCurator);
        Some(curate_people(&people))
    } else {
        None
    };

    Ok(Curated {
        movies,
        people: curated_people,
        counts,
    })
}

/// Runs the curation over the raw IMDb files and writes the curated tables.
#[derive(Debug, Clone)]
pub struct Curator {
    config: CurationConfig,
    paths: CurationPaths,
}

impl Curator {
    pub fn new(config: CurationConfig, paths: CurationPaths) -> Self {
        Self { config, paths }
    }

    pub fn config(&self) -> &CurationConfig {
        &self.config
    }

    pub fn paths(&self) -> &CurationPaths {
        &self.paths
    }

    /// Run all stages and write the outputs.
    pub fn run(&self) -> Result<CurationReport> {
        self.run_with(|_| {})
    }

    /// Like [`Curator::run`], reporting each stage as it starts.
    pub fn run_with(&self, mut on_stage: impl FnMut(Stage)) -> Result<CurationReport> {
        info!(
            raw_dir = %self.paths.raw_dir.display(),
            mode = %self.config.mode,
            "Starting curation"
        );

        let titles = TsvReader::<TitleRecord>::open(self.paths.title_basics())?;
        let ratings = TsvReader::<RatingRecord>::open(self.paths.title_ratings())?;
        let principals = TsvReader::<PrincipalRecord>::open(self.paths.title_principals())?;
        let people = TsvReader::<PersonRecord>::open(self.paths.name_basics())?;

        let sources = Sources {
            titles,
            ratings,
            principals,
            people: move || Ok(people),
        };
        let curated = curate(&self.config, sources, &mut on_stage)?;

        on_stage(Stage::Write);
        let movie_output = self.paths.movie_output(self.config.mode);
        write_movies(&movie_output, &curated.movies)?;

        let people_output = match &curated.people {
            Some(people) => {
                let path = self.paths.people_output();
                write_people(&path, people)?;
                Some(path)
            }
            None => None,
        };

        Ok(CurationReport {
            counts: curated.counts,
            movie_output,
            people_output,
        })
    }
}
