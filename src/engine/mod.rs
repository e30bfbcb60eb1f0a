pub mod aggregate;
pub mod catalogue;
pub mod eligibility;
pub mod fields;
pub mod finalize;
pub mod profile;
pub mod ranking;
pub mod score;

use crate::error::Result;
use crate::provider::{MatchProvider, MatchQuery};
use crate::types::matches::{MatchFilters, MatchRecord};
use crate::types::report::RankingEntry;
use catalogue::StatKind;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticRequest {
    pub stat: StatKind,
    pub filters: MatchFilters,
}

/// Ranks every player appearing in `matches` by `kind`.
pub fn rank(matches: &[MatchRecord], kind: StatKind) -> Vec<RankingEntry> {
    let players = aggregate::aggregate(matches, kind);
    debug!(
        statistic = kind.key(),
        matches = matches.len(),
        players = players.len(),
        "aggregated matches"
    );
    ranking::assemble(players, kind)
}

/// Fetches the request's slice once, with only the columns the statistic
/// needs, and ranks it. Returns the ranking and the number of matches read.
pub fn run(
    provider: &dyn MatchProvider,
    request: &StatisticRequest,
) -> Result<(Vec<RankingEntry>, usize)> {
    let query = MatchQuery {
        filters: request.filters.clone(),
        fields: fields::required_fields(request.stat).to_vec(),
        player: None,
    };
    debug!(
        columns = ?fields::required_columns(request.stat),
        filters = %request.filters.describe(),
        "fetching matches"
    );
    let matches = provider.fetch(&query)?;
    Ok((rank(&matches, request.stat), matches.len()))
}
