//! Launch Query Engine
//!
//! Filters, sorts and truncates candidate launches for one set of
//! parameters.

use crate::error::Result;
use crate::models::{Launch, LaunchQueryResult};
use crate::query::{LaunchQueryParameters, SortOrder};
use crate::source::{LaunchSource, UpstreamFilter};

/// Fetches candidates from `source` and selects the ones `params` asks for.
///
/// Source failures are returned unchanged.
pub async fn run_query<S>(params: &LaunchQueryParameters, source: &S) -> Result<LaunchQueryResult>
where
    S: LaunchSource + ?Sized,
{
    let candidates = source.fetch_launches(&params.upstream_filter()).await?;
    Ok(LaunchQueryResult::new(select(params, candidates)))
}

/// Applies filters, then a stable sort by launch date, then the limit.
///
/// Truncation must come after sorting, otherwise the wrong records would
/// survive the cut.
pub fn select(params: &LaunchQueryParameters, candidates: Vec<Launch>) -> Vec<Launch> {
    let filter = params.upstream_filter();
    let mut selected: Vec<Launch> = candidates
        .into_iter()
        .filter(|launch| matches(params, &filter, launch))
        .collect();

    // sort_by is stable: equal dates keep their input order
    match params.sort() {
        SortOrder::Asc => selected.sort_by(|a, b| a.date_utc.cmp(&b.date_utc)),
        SortOrder::Desc => selected.sort_by(|a, b| b.date_utc.cmp(&a.date_utc)),
    }

    selected.truncate(params.limit() as usize);
    selected
}

/// Whether `launch` passes every filter set in `params`. `filter` is
/// `params.upstream_filter()`, built once per query by the caller.
fn matches(params: &LaunchQueryParameters, filter: &UpstreamFilter, launch: &Launch) -> bool {
    filter.matches(launch)
        && params
            .name_contains()
            .map_or(true, |needle| launch.name.to_lowercase().contains(needle))
}
