use crate::engine::catalogue::StatKind;
use crate::engine::score::SetResult;
use crate::types::matches::ServeCounters;

/// Serve quantity whose positivity gates a percentage sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denominator {
    ServePoints,
    FirstServeIn,
    SecondServePoints,
    BreakPointsFaced,
    ServiceGames,
}

impl Denominator {
    /// `None` when any column the denominator is built from is absent.
    pub fn value(self, counters: &ServeCounters) -> Option<i64> {
        match self {
            Denominator::ServePoints => counters.svpt,
            Denominator::FirstServeIn => counters.first_in,
            Denominator::SecondServePoints => {
                Some(counters.svpt?.saturating_sub(counters.first_in?))
            }
            Denominator::BreakPointsFaced => counters.bp_faced,
            Denominator::ServiceGames => counters.sv_gms,
        }
    }

    fn is_positive(self, counters: &ServeCounters) -> bool {
        self.value(counters).map(|value| value > 0).unwrap_or(false)
    }
}

/// Rule deciding whether a match counts toward a statistic's sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Always,
    OwnPositive(Denominator),
    OpponentPositive(Denominator),
    /// Both sides' serve points present and summing above zero.
    CombinedServePoints,
    /// Serve points and both serve-won columns present on both sides.
    PointFieldsPresent,
    GamesPlayed,
    SetsPlayed,
    TiebreakPlayed,
    MinutesPositive,
    MinutesPresent,
}

impl Eligibility {
    pub fn admits(
        self,
        own: &ServeCounters,
        opponent: &ServeCounters,
        sets: &[SetResult],
        minutes: Option<f64>,
    ) -> bool {
        match self {
            Eligibility::Always => true,
            Eligibility::OwnPositive(denominator) => denominator.is_positive(own),
            Eligibility::OpponentPositive(denominator) => denominator.is_positive(opponent),
            Eligibility::CombinedServePoints => match (own.svpt, opponent.svpt) {
                (Some(own), Some(opponent)) => own.saturating_add(opponent) > 0,
                _ => false,
            },
            Eligibility::PointFieldsPresent => [own, opponent].iter().all(|side| {
                side.svpt.is_some() && side.first_won.is_some() && side.second_won.is_some()
            }),
            Eligibility::GamesPlayed => sets.iter().any(|set| set.games() > 0),
            Eligibility::SetsPlayed => !sets.is_empty(),
            Eligibility::TiebreakPlayed => sets.iter().any(|set| set.tiebreak),
            Eligibility::MinutesPositive => minutes.map(|minutes| minutes > 0.0).unwrap_or(false),
            Eligibility::MinutesPresent => minutes.is_some(),
        }
    }
}

/// Whether this match counts toward `kind`'s sample for the side owning
/// `own`. Unrecognised statistics admit every match.
pub fn is_eligible(
    kind: StatKind,
    own: &ServeCounters,
    opponent: &ServeCounters,
    sets: &[SetResult],
    minutes: Option<f64>,
) -> bool {
    kind.eligibility().admits(own, opponent, sets, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(svpt: Option<i64>, first_in: Option<i64>) -> ServeCounters {
        ServeCounters {
            svpt,
            first_in,
            ..ServeCounters::default()
        }
    }

    #[test]
    fn counters_are_always_eligible() {
        let empty = ServeCounters::default();
        assert!(is_eligible(StatKind::Aces, &empty, &empty, &[], None));
        assert!(is_eligible(StatKind::DoubleFaults, &empty, &empty, &[], None));
    }

    #[test]
    fn second_serve_needs_second_serve_points() {
        let all_first_serves = counters(Some(40), Some(40));
        let some_second_serves = counters(Some(40), Some(25));
        let opponent = ServeCounters::default();

        assert!(!is_eligible(StatKind::SecondServeWon, &all_first_serves, &opponent, &[], None));
        assert!(is_eligible(StatKind::SecondServeWon, &some_second_serves, &opponent, &[], None));
        assert!(!is_eligible(
            StatKind::SecondServeWon,
            &counters(Some(40), None),
            &opponent,
            &[],
            None
        ));
    }

    #[test]
    fn return_percentages_use_opponent_denominator() {
        let own = counters(Some(0), Some(0));
        let opponent = counters(Some(60), Some(35));

        assert!(is_eligible(StatKind::FirstReturnWon, &own, &opponent, &[], None));
        assert!(is_eligible(StatKind::ReturnPointsWon, &own, &opponent, &[], None));
        assert!(!is_eligible(StatKind::FirstServeWon, &own, &opponent, &[], None));
    }

    #[test]
    fn break_points_won_requires_opponent_break_points_faced() {
        let own = ServeCounters {
            bp_faced: Some(4),
            ..ServeCounters::default()
        };
        let opponent = ServeCounters {
            bp_faced: Some(0),
            ..ServeCounters::default()
        };
        assert!(is_eligible(StatKind::BreakPointsSaved, &own, &opponent, &[], None));
        assert!(!is_eligible(StatKind::BreakPointsWon, &own, &opponent, &[], None));
    }

    #[test]
    fn score_statistics_need_sets_and_tiebreaks() {
        let empty = ServeCounters::default();
        let plain = [SetResult::new(6, 3, false)];
        let with_tiebreak = [SetResult::new(6, 3, false), SetResult::new(7, 6, true)];

        assert!(!is_eligible(StatKind::SetsPlayed, &empty, &empty, &[], None));
        assert!(is_eligible(StatKind::TotalGames, &empty, &empty, &plain, None));
        assert!(!is_eligible(StatKind::TiebreaksWonPct, &empty, &empty, &plain, None));
        assert!(!is_eligible(StatKind::TiebreaksPlayed, &empty, &empty, &plain, None));
        assert!(is_eligible(StatKind::TiebreaksWon, &empty, &empty, &with_tiebreak, None));
    }

    #[test]
    fn minutes_rules_differ_between_totals_and_averages() {
        let empty = ServeCounters::default();
        assert!(!is_eligible(StatKind::TotalMinutes, &empty, &empty, &[], Some(0.0)));
        assert!(is_eligible(StatKind::AvgMinutes, &empty, &empty, &[], Some(0.0)));
        assert!(!is_eligible(StatKind::AvgMinutes, &empty, &empty, &[], None));
    }

    #[test]
    fn total_points_won_needs_every_point_column() {
        let full = ServeCounters {
            svpt: Some(70),
            first_won: Some(35),
            second_won: Some(12),
            ..ServeCounters::default()
        };
        let partial = ServeCounters {
            second_won: None,
            ..full
        };
        assert!(is_eligible(StatKind::TotalPointsWon, &full, &full, &[], None));
        assert!(!is_eligible(StatKind::TotalPointsWon, &full, &partial, &[], None));
    }

    #[test]
    fn unrecognized_statistic_admits_everything() {
        let empty = ServeCounters::default();
        assert!(is_eligible(StatKind::Unrecognized, &empty, &empty, &[], None));
    }
}
