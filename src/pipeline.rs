//! Sort and filter stages, and the request-scoped pipeline composing them.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::dataset::{Dataset, DatasetSource};
use crate::error::DatasetLoadError;
use crate::record::Movie;
use crate::synthetic::SyntheticLoad;
use crate::telemetry::Telemetry;

const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date used to order `movie`; unparsable or missing dates sort as [`NaiveDate::MIN`].
pub fn effective_date(movie: &Movie) -> NaiveDate {
    movie
        .release_date
        .as_deref()
        .and_then(parse_calendar_date)
        .unwrap_or(NaiveDate::MIN)
}

/// Strict `YYYY-MM-DD`; chrono alone would also accept single-digit fields.
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let well_formed = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT).ok()
}

/// Order movies by release date, most recent first.
///
/// Stable: movies with equal effective dates keep their input order, which
/// also holds for all movies without a usable date (they sort last).
pub fn sort_desc_release_date<'a, I>(movies: I) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let mut keyed: Vec<(Reverse<NaiveDate>, &'a Movie)> = movies
        .into_iter()
        .map(|movie| (Reverse(effective_date(movie)), movie))
        .collect();
    // `sort_by_key` is stable.
    keyed.sort_by_key(|(date, _)| *date);
    keyed.into_iter().map(|(_, movie)| movie).collect()
}

/// Keep movies whose title contains `query`, ignoring case.
///
/// An absent or empty query keeps everything. The query is matched literally.
/// Movies without a title never match a non-empty query.
pub fn filter_by_title<'a, I>(movies: I, query: Option<&str>) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    let needle = match query {
        Some(q) if !q.is_empty() => q.to_uppercase(),
        _ => return movies.into_iter().collect(),
    };

    movies
        .into_iter()
        .filter(|movie| {
            movie
                .title
                .as_deref()
                .is_some_and(|title| title.to_uppercase().contains(&needle))
        })
        .collect()
}

/// Load -> sort -> filter, with a span around each stage.
#[derive(Debug)]
pub struct MoviePipeline {
    source: DatasetSource,
    telemetry: Telemetry,
    synthetic: SyntheticLoad,
}

impl MoviePipeline {
    pub fn new(source: DatasetSource, telemetry: Telemetry) -> Self {
        Self {
            source,
            telemetry,
            synthetic: SyntheticLoad::default(),
        }
    }

    pub fn with_synthetic_load(mut self, synthetic: SyntheticLoad) -> Self {
        self.synthetic = synthetic;
        self
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// Obtain the dataset without running the stages.
    pub fn dataset(&self) -> Result<Arc<Dataset>, DatasetLoadError> {
        self.source.get(&self.telemetry)
    }

    /// Movies sorted by descending release date, restricted to titles matching `query`.
    pub fn run(&self, query: Option<&str>) -> Result<Vec<Movie>, DatasetLoadError> {
        let dataset = self.dataset()?;

        self.synthetic.run(&self.telemetry);

        let sorted = {
            let _span =
                crate::operation_span!(self.telemetry, "sort_desc_release_date").entered();
            sort_desc_release_date(dataset.iter())
        };

        let filtered = {
            let _span = crate::operation_span!(self.telemetry, "filter_by_title").entered();
            filter_by_title(sorted, query)
        };

        tracing::debug!(
            query = query.unwrap_or_default(),
            total = dataset.len(),
            returned = filtered.len(),
            "Movie pipeline finished"
        );

        Ok(filtered.into_iter().cloned().collect())
    }
}
