use crate::engine::catalogue::StatKind;
use crate::engine::eligibility::is_eligible;
use crate::engine::score::{tokenize, SetResult};
use crate::types::matches::{MatchRecord, ServeCounters, ServeField, Side};
use std::collections::HashMap;

/// Running sums for one player. Return-side totals are derived from the
/// opponent's serve counters in the same match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningTotals {
    pub aces: i64,
    pub double_faults: i64,
    pub serve_points: i64,
    pub first_in: i64,
    pub first_won: i64,
    pub second_won: i64,
    pub bp_saved: i64,
    pub bp_faced: i64,
    pub service_games: i64,
    pub service_games_won: i64,

    pub aces_conceded: i64,
    pub double_faults_conceded: i64,
    pub ret_bp_won: i64,
    pub ret_bp_chances: i64,
    pub ret_first_chances: i64,
    pub ret_first_won: i64,
    pub ret_second_chances: i64,
    pub ret_second_won: i64,
    pub ret_points_chances: i64,
    pub ret_points_won: i64,
    pub return_games: i64,
    pub return_games_won: i64,

    pub games: i64,
    pub games_won: i64,
    pub sets: i64,
    pub sets_won: i64,
    pub tiebreaks: i64,
    pub tiebreaks_won: i64,

    pub minutes: f64,
}

/// Saturates at the `i64` bounds.
fn bump(total: &mut i64, value: i64) {
    *total = total.saturating_add(value);
}

/// `minuend - subtrahend`, floored at zero.
fn shortfall(minuend: i64, subtrahend: i64) -> i64 {
    minuend.saturating_sub(subtrahend).max(0)
}

impl RunningTotals {
    fn add_serve(&mut self, own: &ServeCounters) {
        bump(&mut self.aces, own.count(ServeField::Ace));
        bump(&mut self.double_faults, own.count(ServeField::DoubleFault));
        bump(&mut self.serve_points, own.count(ServeField::ServePoints));
        bump(&mut self.first_in, own.count(ServeField::FirstIn));
        bump(&mut self.first_won, own.count(ServeField::FirstWon));
        bump(&mut self.second_won, own.count(ServeField::SecondWon));
        bump(&mut self.bp_saved, own.count(ServeField::BreakPointsSaved));
        bump(&mut self.bp_faced, own.count(ServeField::BreakPointsFaced));

        let service_games = own.count(ServeField::ServiceGames);
        let broken = shortfall(
            own.count(ServeField::BreakPointsFaced),
            own.count(ServeField::BreakPointsSaved),
        );
        bump(&mut self.service_games, service_games);
        bump(&mut self.service_games_won, shortfall(service_games, broken));
    }

    fn add_return(&mut self, opponent: &ServeCounters) {
        let serve_points = opponent.count(ServeField::ServePoints);
        let first_in = opponent.count(ServeField::FirstIn);
        let first_won = opponent.count(ServeField::FirstWon);
        let second_won = opponent.count(ServeField::SecondWon);
        let bp_faced = opponent.count(ServeField::BreakPointsFaced);
        let breaks = shortfall(bp_faced, opponent.count(ServeField::BreakPointsSaved));

        bump(&mut self.aces_conceded, opponent.count(ServeField::Ace));
        bump(&mut self.double_faults_conceded, opponent.count(ServeField::DoubleFault));

        bump(&mut self.ret_bp_won, breaks);
        bump(&mut self.ret_bp_chances, bp_faced);

        bump(&mut self.ret_first_chances, first_in.max(0));
        bump(&mut self.ret_first_won, shortfall(first_in, first_won));

        let second_chances = shortfall(serve_points, first_in);
        bump(&mut self.ret_second_chances, second_chances);
        bump(&mut self.ret_second_won, shortfall(second_chances, second_won));

        bump(&mut self.ret_points_chances, serve_points.max(0));
        bump(
            &mut self.ret_points_won,
            shortfall(serve_points, first_won.saturating_add(second_won)),
        );

        bump(&mut self.return_games, opponent.count(ServeField::ServiceGames));
        bump(&mut self.return_games_won, breaks);
    }

    fn add_score(&mut self, sets: &[SetResult], won_match: bool) {
        for set in sets {
            let (own, _) = set.share(won_match);
            let won = i64::from(set.won_by(won_match));
            bump(&mut self.games, i64::from(set.games()));
            bump(&mut self.games_won, i64::from(own));
            bump(&mut self.sets, 1);
            bump(&mut self.sets_won, won);
            if set.tiebreak {
                bump(&mut self.tiebreaks, 1);
                bump(&mut self.tiebreaks_won, won);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAggregate {
    pub id: String,
    pub name: String,
    pub country_code: String,
    pub matches_appeared: u32,
    /// Eligible sample size per tracked statistic, in the order the
    /// statistics were handed to the aggregator.
    pub samples: Vec<u32>,
    pub totals: RunningTotals,
}

impl PlayerAggregate {
    fn new(id: &str, name: &str, country_code: Option<&str>, tracked: usize) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            country_code: country_code.unwrap_or_default().trim().to_string(),
            matches_appeared: 0,
            samples: vec![0; tracked],
            totals: RunningTotals::default(),
        }
    }

    /// Sample size of the first tracked statistic.
    pub fn matches_used(&self) -> u32 {
        self.samples.first().copied().unwrap_or(0)
    }
}

/// One side of a match seen from that side: its own counters and the
/// counters of the player across the net.
#[derive(Debug, Clone, Copy)]
struct SideView<'a> {
    own: &'a Side,
    opponent: &'a Side,
    won_match: bool,
}

/// Builds per-player totals in one pass, both sides of every match.
pub struct Aggregator<'k> {
    tracked: &'k [StatKind],
    players: Vec<PlayerAggregate>,
    index: HashMap<String, usize>,
}

impl<'k> Aggregator<'k> {
    pub fn new(tracked: &'k [StatKind]) -> Self {
        Self {
            tracked,
            players: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn observe(&mut self, record: &MatchRecord) {
        let sets = record.score.as_deref().map(tokenize).unwrap_or_default();
        let views = [
            SideView {
                own: &record.winner,
                opponent: &record.loser,
                won_match: true,
            },
            SideView {
                own: &record.loser,
                opponent: &record.winner,
                won_match: false,
            },
        ];

        for view in views {
            let Some((id, name)) = view.own.player.known() else {
                continue;
            };
            let slot = match self.index.get(id).copied() {
                Some(slot) => slot,
                None => {
                    self.players.push(PlayerAggregate::new(
                        id,
                        name,
                        view.own.player.country_code.as_deref(),
                        self.tracked.len(),
                    ));
                    self.index.insert(id.to_string(), self.players.len() - 1);
                    self.players.len() - 1
                }
            };
            let player = &mut self.players[slot];

            player.matches_appeared += 1;
            player.totals.add_serve(&view.own.serve);
            player.totals.add_return(&view.opponent.serve);
            player.totals.add_score(&sets, view.won_match);
            if let Some(minutes) = record.minutes {
                player.totals.minutes += minutes;
            }

            for (sample, kind) in player.samples.iter_mut().zip(self.tracked) {
                if is_eligible(
                    *kind,
                    &view.own.serve,
                    &view.opponent.serve,
                    &sets,
                    record.minutes,
                ) {
                    *sample += 1;
                }
            }
        }
    }

    /// Aggregates in first-encounter order.
    pub fn finish(self) -> Vec<PlayerAggregate> {
        self.players
    }
}

pub fn aggregate(matches: &[MatchRecord], kind: StatKind) -> Vec<PlayerAggregate> {
    let tracked = [kind];
    let mut aggregator = Aggregator::new(&tracked);
    for record in matches {
        aggregator.observe(record);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::matches::PlayerIdentity;

    fn side(id: &str, name: &str, serve: ServeCounters) -> Side {
        Side {
            player: PlayerIdentity {
                id: Some(id.to_string()),
                name: Some(name.to_string()),
                country_code: Some("SRB".to_string()),
            },
            serve,
        }
    }

    fn record(winner: Side, loser: Side, score: &str) -> MatchRecord {
        MatchRecord {
            winner,
            loser,
            score: Some(score.to_string()),
            minutes: Some(95.0),
            ..MatchRecord::default()
        }
    }

    fn find<'a>(players: &'a [PlayerAggregate], id: &str) -> &'a PlayerAggregate {
        players
            .iter()
            .find(|player| player.id == id)
            .expect("player should be aggregated")
    }

    #[test]
    fn first_serve_return_comes_from_opponent() {
        let winner = side(
            "a",
            "Alpha",
            ServeCounters {
                first_in: Some(20),
                first_won: Some(15),
                ..ServeCounters::default()
            },
        );
        let loser = side("b", "Bravo", ServeCounters::default());
        let players = aggregate(&[record(winner, loser, "6-4 6-4")], StatKind::FirstReturnWon);

        let alpha = find(&players, "a");
        let bravo = find(&players, "b");
        assert_eq!(alpha.totals.first_won, 15);
        assert_eq!(alpha.totals.ret_first_chances, 0);
        assert_eq!(bravo.totals.ret_first_won, 5);
        assert_eq!(bravo.totals.ret_first_chances, 20);
        assert_eq!(bravo.totals.first_won, 0);
        assert_eq!(bravo.matches_used(), 1);
        assert_eq!(alpha.matches_used(), 0);
    }

    #[test]
    fn return_totals_floor_at_zero() {
        let inconsistent = ServeCounters {
            svpt: Some(50),
            first_in: Some(30),
            first_won: Some(35),
            second_won: Some(25),
            bp_saved: Some(5),
            bp_faced: Some(3),
            ..ServeCounters::default()
        };
        let players = aggregate(
            &[record(
                side("a", "Alpha", inconsistent),
                side("b", "Bravo", ServeCounters::default()),
                "6-1 6-1",
            )],
            StatKind::ReturnPointsWon,
        );

        let bravo = find(&players, "b");
        assert_eq!(bravo.totals.ret_first_won, 0);
        assert_eq!(bravo.totals.ret_second_chances, 20);
        assert_eq!(bravo.totals.ret_second_won, 0);
        assert_eq!(bravo.totals.ret_points_won, 0);
        assert_eq!(bravo.totals.ret_bp_won, 0);
        assert_eq!(bravo.totals.ret_bp_chances, 3);
    }

    #[test]
    fn score_totals_follow_match_orientation() {
        let players = aggregate(
            &[record(
                side("a", "Alpha", ServeCounters::default()),
                side("b", "Bravo", ServeCounters::default()),
                "6-4 6-7(5) 7-6(3)",
            )],
            StatKind::TiebreaksWon,
        );

        let alpha = find(&players, "a");
        let bravo = find(&players, "b");
        assert_eq!(alpha.totals.games, 36);
        assert_eq!(alpha.totals.games_won, 19);
        assert_eq!(bravo.totals.games_won, 17);
        assert_eq!(alpha.totals.sets_won, 2);
        assert_eq!(bravo.totals.sets_won, 1);
        assert_eq!(alpha.totals.tiebreaks, 2);
        assert_eq!(alpha.totals.tiebreaks_won, 1);
        assert_eq!(bravo.totals.tiebreaks_won, 1);
    }

    #[test]
    fn every_match_adds_one_appearance_per_side() {
        let matches = vec![
            record(
                side("a", "Alpha", ServeCounters::default()),
                side("b", "Bravo", ServeCounters::default()),
                "6-0 6-0",
            ),
            record(
                side("b", "Bravo", ServeCounters::default()),
                side("c", "Charlie", ServeCounters::default()),
                "garbage",
            ),
        ];
        let players = aggregate(&matches, StatKind::SetsPlayed);

        let appearances: u32 = players.iter().map(|player| player.matches_appeared).sum();
        assert_eq!(appearances, 4);
        assert!(players
            .iter()
            .all(|player| player.matches_used() <= player.matches_appeared));
        assert_eq!(find(&players, "b").matches_appeared, 2);
        assert_eq!(find(&players, "b").matches_used(), 1);
        assert_eq!(find(&players, "c").matches_used(), 0);
    }

    #[test]
    fn anonymous_side_is_skipped_but_opponent_is_kept() {
        let mut anonymous = side("", "Nobody", ServeCounters::default());
        anonymous.player.id = None;
        let players = aggregate(
            &[record(
                side("a", "Alpha", ServeCounters::default()),
                anonymous,
                "6-2 6-2",
            )],
            StatKind::Aces,
        );

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, "a");
    }

    #[test]
    fn zero_denominator_match_still_adds_raw_totals() {
        let matches = vec![
            record(
                side(
                    "a",
                    "Alpha",
                    ServeCounters {
                        svpt: Some(30),
                        first_in: Some(30),
                        second_won: Some(2),
                        ..ServeCounters::default()
                    },
                ),
                side("b", "Bravo", ServeCounters::default()),
                "6-0 6-0",
            ),
            record(
                side(
                    "a",
                    "Alpha",
                    ServeCounters {
                        svpt: Some(40),
                        first_in: Some(30),
                        second_won: Some(6),
                        ..ServeCounters::default()
                    },
                ),
                side("b", "Bravo", ServeCounters::default()),
                "6-0 6-0",
            ),
        ];
        let players = aggregate(&matches, StatKind::SecondServeWon);

        let alpha = find(&players, "a");
        assert_eq!(alpha.matches_used(), 1);
        assert_eq!(alpha.matches_appeared, 2);
        assert_eq!(alpha.totals.second_won, 8);
        assert_eq!(alpha.totals.serve_points, 70);
    }

    #[test]
    fn service_and_return_games_use_breaks() {
        let serving = ServeCounters {
            sv_gms: Some(10),
            bp_faced: Some(5),
            bp_saved: Some(3),
            ..ServeCounters::default()
        };
        let players = aggregate(
            &[record(
                side("a", "Alpha", serving),
                side("b", "Bravo", ServeCounters::default()),
                "6-4 6-4",
            )],
            StatKind::ServiceGamesWon,
        );

        let alpha = find(&players, "a");
        let bravo = find(&players, "b");
        assert_eq!(alpha.totals.service_games, 10);
        assert_eq!(alpha.totals.service_games_won, 8);
        assert_eq!(bravo.totals.return_games, 10);
        assert_eq!(bravo.totals.return_games_won, 2);
    }

    #[test]
    fn minutes_accumulate_when_present() {
        let mut untimed = record(
            side("a", "Alpha", ServeCounters::default()),
            side("b", "Bravo", ServeCounters::default()),
            "6-3 6-3",
        );
        untimed.minutes = None;
        let timed = record(
            side("a", "Alpha", ServeCounters::default()),
            side("b", "Bravo", ServeCounters::default()),
            "6-3 6-3",
        );
        let players = aggregate(&[untimed, timed], StatKind::AvgMinutes);

        let alpha = find(&players, "a");
        assert_eq!(alpha.totals.minutes, 95.0);
        assert_eq!(alpha.matches_used(), 1);
    }

    #[test]
    fn extreme_counters_saturate_instead_of_overflowing() {
        let corrupt = ServeCounters {
            ace: Some(i64::MAX),
            svpt: Some(i64::MAX),
            first_in: Some(i64::MIN),
            first_won: Some(i64::MAX),
            second_won: Some(i64::MAX),
            bp_saved: Some(i64::MIN),
            bp_faced: Some(1),
            sv_gms: Some(i64::MAX),
            ..ServeCounters::default()
        };
        let matches = vec![
            record(
                side("a", "Alpha", corrupt),
                side("b", "Bravo", corrupt),
                "6-4 4000000000-4000000000",
            ),
            record(
                side("a", "Alpha", corrupt),
                side("b", "Bravo", corrupt),
                "6-4 6-4",
            ),
        ];
        let players = aggregate(&matches, StatKind::Aces);

        let alpha = find(&players, "a");
        assert_eq!(alpha.totals.aces, i64::MAX);
        assert_eq!(alpha.totals.ret_bp_won, i64::MAX);
        assert_eq!(alpha.totals.service_games_won, 0);
        assert_eq!(alpha.totals.games, 30 + i64::from(u32::MAX));

        for kind in StatKind::all() {
            let entries = crate::engine::rank(&matches, kind);
            assert!(entries.iter().all(|entry| entry.output.is_finite()));
        }
    }
}
