use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use movies::Movie;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Accepted query parameter names, highest priority first.
pub const SEARCH_PARAMS: [&str; 2] = ["q", "query"];

/// Pick the search term from raw query pairs.
///
/// The first accepted name that appears at all wins, even with an empty
/// value; a repeated name resolves to its first occurrence.
pub fn resolve_search_term<'a>(
    params: &'a [(String, String)],
    accepted: &[&str],
) -> Option<&'a str> {
    accepted.iter().find_map(|name| {
        params
            .iter()
            .find(|(key, _)| key.as_str() == *name)
            .map(|(_, value)| value.as_str())
    })
}

/// List movies, most recent first, optionally restricted by title
///
/// `GET /movies?q=<text>` (or `?query=<text>`). Always returns the full
/// surviving set as a JSON array of `{title, rating, release_date}`.
pub async fn list_movies(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ServerResult<impl IntoResponse> {
    let query = resolve_search_term(&params, &SEARCH_PARAMS).map(str::to_owned);
    let span = movies::operation_span!(state.pipeline.telemetry(), "movies");

    let response: ServerResult<Json<Vec<Movie>>> = async move {
        tracing::info!(
            query = query.as_deref().unwrap_or_default(),
            "/movies receive request"
        );
        metrics::counter!("movies_requests_total").increment(1);

        let pipeline = state.pipeline.clone();
        let started = Instant::now();
        let blocking_span = tracing::Span::current();
        let result = tokio::task::spawn_blocking(move || {
            let _entered = blocking_span.entered();
            pipeline.run(query.as_deref())
        })
        .await?;
        metrics::histogram!("movies_pipeline_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        let listing: Vec<Movie> = result.inspect_err(|_| {
            metrics::counter!("movies_dataset_load_failures_total").increment(1);
        })?;
        metrics::gauge!("movies_returned").set(listing.len() as f64);

        Ok(Json(listing))
    }
    .instrument(span)
    .await;

    response
}
