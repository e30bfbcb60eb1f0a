use crate::engine::aggregate::PlayerAggregate;
use crate::engine::catalogue::StatKind;
use crate::engine::finalize::finalize;
use crate::types::report::RankingEntry;

/// Finalizes every player and orders them by value, highest first. Ties
/// keep first-encounter order.
pub fn assemble(players: Vec<PlayerAggregate>, kind: StatKind) -> Vec<RankingEntry> {
    let mut entries = players
        .into_iter()
        .map(|player| {
            let matches_used = player.matches_used();
            RankingEntry {
                output: finalize(kind, &player.totals, matches_used),
                id: player.id,
                name: player.name,
                country_code: player.country_code,
                matches_used,
                matches_appeared: player.matches_appeared,
            }
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.output.total_cmp(&a.output));
    entries
}
