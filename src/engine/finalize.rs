use crate::engine::aggregate::RunningTotals;
use crate::engine::catalogue::{StatKind, Unit};

/// A quantity read off a player's running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Total {
    Aces,
    DoubleFaults,
    ServePoints,
    FirstServeIn,
    FirstServeWon,
    SecondServeWon,
    SecondServePoints,
    ServicePointsWon,
    ServiceGames,
    ServiceGamesWon,
    BreakPointsSaved,
    BreakPointsFaced,
    AcesConceded,
    DoubleFaultsConceded,
    ReturnBreakPointsWon,
    ReturnBreakPointChances,
    ReturnFirstWon,
    ReturnFirstChances,
    ReturnSecondWon,
    ReturnSecondChances,
    ReturnPointsWon,
    ReturnPointChances,
    ReturnGames,
    ReturnGamesWon,
    PointsPlayed,
    PointsWon,
    Games,
    GamesWon,
    Sets,
    SetsWon,
    Tiebreaks,
    TiebreaksWon,
    Minutes,
}

impl Total {
    pub fn of(self, totals: &RunningTotals) -> f64 {
        let count = match self {
            Total::Aces => totals.aces,
            Total::DoubleFaults => totals.double_faults,
            Total::ServePoints => totals.serve_points,
            Total::FirstServeIn => totals.first_in,
            Total::FirstServeWon => totals.first_won,
            Total::SecondServeWon => totals.second_won,
            Total::SecondServePoints => totals.serve_points.saturating_sub(totals.first_in).max(0),
            Total::ServicePointsWon => totals.first_won.saturating_add(totals.second_won),
            Total::ServiceGames => totals.service_games,
            Total::ServiceGamesWon => totals.service_games_won,
            Total::BreakPointsSaved => totals.bp_saved,
            Total::BreakPointsFaced => totals.bp_faced,
            Total::AcesConceded => totals.aces_conceded,
            Total::DoubleFaultsConceded => totals.double_faults_conceded,
            Total::ReturnBreakPointsWon => totals.ret_bp_won,
            Total::ReturnBreakPointChances => totals.ret_bp_chances,
            Total::ReturnFirstWon => totals.ret_first_won,
            Total::ReturnFirstChances => totals.ret_first_chances,
            Total::ReturnSecondWon => totals.ret_second_won,
            Total::ReturnSecondChances => totals.ret_second_chances,
            Total::ReturnPointsWon => totals.ret_points_won,
            Total::ReturnPointChances => totals.ret_points_chances,
            Total::ReturnGames => totals.return_games,
            Total::ReturnGamesWon => totals.return_games_won,
            Total::PointsPlayed => totals.serve_points.saturating_add(totals.ret_points_chances),
            Total::PointsWon => totals
                .first_won
                .saturating_add(totals.second_won)
                .saturating_add(totals.ret_points_won),
            Total::Games => totals.games,
            Total::GamesWon => totals.games_won,
            Total::Sets => totals.sets,
            Total::SetsWon => totals.sets_won,
            Total::Tiebreaks => totals.tiebreaks,
            Total::TiebreaksWon => totals.tiebreaks_won,
            Total::Minutes => return totals.minutes,
        };
        count as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    Total(Total),
    Percentage { numerator: Total, denominator: Total },
    /// Total divided by the statistic's eligible sample size.
    Average(Total),
}

impl Formula {
    pub fn unit(self) -> Unit {
        match self {
            Formula::Total(_) => Unit::Count,
            Formula::Percentage { .. } => Unit::Percentage,
            Formula::Average(_) => Unit::Average,
        }
    }

    pub fn evaluate(self, totals: &RunningTotals, matches_used: u32) -> f64 {
        match self {
            Formula::Total(total) => total.of(totals),
            Formula::Percentage {
                numerator,
                denominator,
            } => percentage(numerator.of(totals), denominator.of(totals)),
            Formula::Average(total) => ratio(total.of(totals), f64::from(matches_used)),
        }
    }
}

/// `numerator / denominator`, zero when the denominator is not positive.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    (100.0 * ratio(numerator, denominator)).clamp(0.0, 100.0)
}

/// Final value of `kind` for one player; unrecognised statistics are 0.
pub fn finalize(kind: StatKind, totals: &RunningTotals, matches_used: u32) -> f64 {
    kind.formula()
        .map(|formula| formula.evaluate(totals, matches_used))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_serve_won_uses_second_serve_points() {
        let totals = RunningTotals {
            serve_points: 100,
            first_in: 60,
            second_won: 20,
            ..RunningTotals::default()
        };
        assert_eq!(finalize(StatKind::SecondServeWon, &totals, 3), 50.0);
    }

    #[test]
    fn zero_denominators_yield_zero() {
        let totals = RunningTotals::default();
        for kind in StatKind::all() {
            let value = finalize(kind, &totals, 0);
            assert_eq!(value, 0.0, "{} should be zero", kind.key());
            assert!(value.is_finite());
        }
    }

    #[test]
    fn average_divides_by_matches_used() {
        let totals = RunningTotals {
            minutes: 300.0,
            ..RunningTotals::default()
        };
        assert_eq!(finalize(StatKind::AvgMinutes, &totals, 3), 100.0);
        assert_eq!(finalize(StatKind::AvgMinutes, &totals, 0), 0.0);
        assert_eq!(finalize(StatKind::TotalMinutes, &totals, 0), 300.0);
    }

    #[test]
    fn points_combine_serve_and_return() {
        let totals = RunningTotals {
            serve_points: 80,
            first_won: 40,
            second_won: 10,
            ret_points_chances: 70,
            ret_points_won: 25,
            ..RunningTotals::default()
        };
        assert_eq!(finalize(StatKind::TotalPointsPlayed, &totals, 1), 150.0);
        assert_eq!(finalize(StatKind::TotalPointsWon, &totals, 1), 75.0);
        assert_eq!(finalize(StatKind::TotalPointsWonPct, &totals, 1), 50.0);
    }

    #[test]
    fn percentages_stay_within_bounds() {
        let inconsistent = RunningTotals {
            first_in: 10,
            first_won: 14,
            ..RunningTotals::default()
        };
        assert_eq!(finalize(StatKind::FirstServeWon, &inconsistent, 1), 100.0);
    }

    #[test]
    fn unrecognized_statistic_is_zero() {
        let totals = RunningTotals {
            aces: 12,
            ..RunningTotals::default()
        };
        assert_eq!(finalize(StatKind::Unrecognized, &totals, 5), 0.0);
    }
}
