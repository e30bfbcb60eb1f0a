use crate::engine::aggregate::{Aggregator, RunningTotals};
use crate::engine::catalogue::{Category, StatKind};
use crate::engine::finalize::{finalize, ratio, Total};
use crate::error::{Result, StatsError};
use crate::types::matches::MatchRecord;
use crate::types::report::{PlayerProfile, ProfileSection, ProfileStat};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileRates {
    pub points_per_game: f64,
    pub points_per_set: f64,
    pub points_per_match: f64,
    pub games_per_set: f64,
    pub games_per_match: f64,
    pub sets_per_match: f64,
}

impl ProfileRates {
    fn from_totals(totals: &RunningTotals, matches: u32) -> Self {
        let points = Total::PointsPlayed.of(totals);
        let games = Total::Games.of(totals);
        let sets = Total::Sets.of(totals);
        let matches = f64::from(matches);
        Self {
            points_per_game: ratio(points, games),
            points_per_set: ratio(points, sets),
            points_per_match: ratio(points, matches),
            games_per_set: ratio(games, sets),
            games_per_match: ratio(games, matches),
            sets_per_match: ratio(sets, matches),
        }
    }
}

/// Every catalogue statistic for one player over `matches`, grouped by
/// category. All statistics share a single aggregation pass.
pub fn build_profile(matches: &[MatchRecord], player_id: &str) -> Result<PlayerProfile> {
    let tracked = StatKind::all().collect::<Vec<_>>();
    let mut aggregator = Aggregator::new(&tracked);
    for record in matches.iter().filter(|record| record.involves(player_id)) {
        aggregator.observe(record);
    }
    let player = aggregator
        .finish()
        .into_iter()
        .find(|player| player.id == player_id)
        .ok_or_else(|| StatsError::PlayerNotFound(player_id.to_string()))?;

    let sections = Category::ALL
        .iter()
        .map(|category| ProfileSection {
            category: *category,
            stats: tracked
                .iter()
                .zip(&player.samples)
                .filter(|(kind, _)| kind.category() == Some(*category))
                .map(|(kind, used)| ProfileStat {
                    statistic: *kind,
                    label: kind.label().to_string(),
                    unit: kind.unit(),
                    value: finalize(*kind, &player.totals, *used),
                    matches_used: *used,
                })
                .collect(),
        })
        .filter(|section| !section.stats.is_empty())
        .collect();

    Ok(PlayerProfile {
        rates: ProfileRates::from_totals(&player.totals, player.matches_appeared),
        id: player.id,
        name: player.name,
        country_code: player.country_code,
        matches_appeared: player.matches_appeared,
        sections,
    })
}
