//! Every statistic the engine knows, with its full contract in one row:
//! the serve columns it needs, which matches count toward its sample and
//! how its totals become the reported value.

use crate::engine::eligibility::{Denominator, Eligibility};
use crate::engine::finalize::{Formula, Total};
use crate::types::matches::ServeField;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Aces,
    DoubleFaults,
    FirstServe,
    FirstServeWon,
    SecondServeWon,
    ServicePointsWon,
    ServiceGamesWon,
    BreakPointsSaved,
    AcesAgainst,
    DoubleFaultsAgainst,
    BreakPointsWon,
    FirstReturnWon,
    SecondReturnWon,
    ReturnPointsWon,
    ReturnGamesWon,
    TotalPointsPlayed,
    TotalPointsWon,
    TotalPointsWonPct,
    TotalGames,
    TotalGamesWon,
    GamesWonPct,
    SetsPlayed,
    SetsWon,
    SetsWonPct,
    TiebreaksPlayed,
    TiebreaksWon,
    TiebreaksWonPct,
    TotalMinutes,
    AvgMinutes,
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Serve,
    Return,
    Points,
    Games,
    Sets,
    Tiebreaks,
    Time,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Serve,
        Category::Return,
        Category::Points,
        Category::Games,
        Category::Sets,
        Category::Tiebreaks,
        Category::Time,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::Serve => "Serve",
            Category::Return => "Return",
            Category::Points => "Points",
            Category::Games => "Games",
            Category::Sets => "Sets",
            Category::Tiebreaks => "Tiebreaks",
            Category::Time => "Time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Count,
    Percentage,
    Average,
}

impl Unit {
    pub fn name(self) -> &'static str {
        match self {
            Unit::Count => "count",
            Unit::Percentage => "percentage",
            Unit::Average => "average",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatDef {
    pub kind: StatKind,
    pub key: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub fields: &'static [ServeField],
    pub eligibility: Eligibility,
    pub formula: Formula,
}

use Eligibility as E;
use ServeField as F;

const ACE: &[ServeField] = &[F::Ace];
const DF: &[ServeField] = &[F::DoubleFault];
const FIRST_SERVE: &[ServeField] = &[F::ServePoints, F::FirstIn];
const FIRST_SERVE_WON: &[ServeField] = &[F::FirstIn, F::FirstWon];
const SECOND_SERVE_WON: &[ServeField] = &[F::ServePoints, F::FirstIn, F::SecondWon];
const SERVICE_WON: &[ServeField] = &[F::ServePoints, F::FirstWon, F::SecondWon];
const BREAK_POINTS: &[ServeField] = &[F::BreakPointsSaved, F::BreakPointsFaced];
const SERVICE_GAMES: &[ServeField] = &[F::ServiceGames, F::BreakPointsSaved, F::BreakPointsFaced];
const SERVE_POINTS: &[ServeField] = &[F::ServePoints];
const NONE: &[ServeField] = &[];

const fn pct(numerator: Total, denominator: Total) -> Formula {
    Formula::Percentage {
        numerator,
        denominator,
    }
}

pub const CATALOGUE: &[StatDef] = &[
    StatDef {
        kind: StatKind::Aces,
        key: "aces",
        label: "Aces",
        category: Category::Serve,
        fields: ACE,
        eligibility: E::Always,
        formula: Formula::Total(Total::Aces),
    },
    StatDef {
        kind: StatKind::DoubleFaults,
        key: "df",
        label: "Double Faults",
        category: Category::Serve,
        fields: DF,
        eligibility: E::Always,
        formula: Formula::Total(Total::DoubleFaults),
    },
    StatDef {
        kind: StatKind::FirstServe,
        key: "1stserve",
        label: "1st Serve %",
        category: Category::Serve,
        fields: FIRST_SERVE,
        eligibility: E::OwnPositive(Denominator::ServePoints),
        formula: pct(Total::FirstServeIn, Total::ServePoints),
    },
    StatDef {
        kind: StatKind::FirstServeWon,
        key: "1stservewon",
        label: "1st Serve Won %",
        category: Category::Serve,
        fields: FIRST_SERVE_WON,
        eligibility: E::OwnPositive(Denominator::FirstServeIn),
        formula: pct(Total::FirstServeWon, Total::FirstServeIn),
    },
    StatDef {
        kind: StatKind::SecondServeWon,
        key: "2ndservewon",
        label: "2nd Serve Won %",
        category: Category::Serve,
        fields: SECOND_SERVE_WON,
        eligibility: E::OwnPositive(Denominator::SecondServePoints),
        formula: pct(Total::SecondServeWon, Total::SecondServePoints),
    },
    StatDef {
        kind: StatKind::ServicePointsWon,
        key: "servicewon",
        label: "Service Points Won %",
        category: Category::Serve,
        fields: SERVICE_WON,
        eligibility: E::OwnPositive(Denominator::ServePoints),
        formula: pct(Total::ServicePointsWon, Total::ServePoints),
    },
    StatDef {
        kind: StatKind::ServiceGamesWon,
        key: "servicegameswon",
        label: "Service Games Won %",
        category: Category::Serve,
        fields: SERVICE_GAMES,
        eligibility: E::OwnPositive(Denominator::ServiceGames),
        formula: pct(Total::ServiceGamesWon, Total::ServiceGames),
    },
    StatDef {
        kind: StatKind::BreakPointsSaved,
        key: "bpsaved",
        label: "Break Points Saved %",
        category: Category::Serve,
        fields: BREAK_POINTS,
        eligibility: E::OwnPositive(Denominator::BreakPointsFaced),
        formula: pct(Total::BreakPointsSaved, Total::BreakPointsFaced),
    },
    StatDef {
        kind: StatKind::AcesAgainst,
        key: "acesagainst",
        label: "Aces Against",
        category: Category::Return,
        fields: ACE,
        eligibility: E::Always,
        formula: Formula::Total(Total::AcesConceded),
    },
    StatDef {
        kind: StatKind::DoubleFaultsAgainst,
        key: "dfagainst",
        label: "Double Faults Against",
        category: Category::Return,
        fields: DF,
        eligibility: E::Always,
        formula: Formula::Total(Total::DoubleFaultsConceded),
    },
    StatDef {
        kind: StatKind::BreakPointsWon,
        key: "bpwon",
        label: "Break Points Won %",
        category: Category::Return,
        fields: BREAK_POINTS,
        eligibility: E::OpponentPositive(Denominator::BreakPointsFaced),
        formula: pct(Total::ReturnBreakPointsWon, Total::ReturnBreakPointChances),
    },
    StatDef {
        kind: StatKind::FirstReturnWon,
        key: "1streturnwon",
        label: "1st Serve Return Won %",
        category: Category::Return,
        fields: FIRST_SERVE_WON,
        eligibility: E::OpponentPositive(Denominator::FirstServeIn),
        formula: pct(Total::ReturnFirstWon, Total::ReturnFirstChances),
    },
    StatDef {
        kind: StatKind::SecondReturnWon,
        key: "2ndreturnwon",
        label: "2nd Serve Return Won %",
        category: Category::Return,
        fields: SECOND_SERVE_WON,
        eligibility: E::OpponentPositive(Denominator::SecondServePoints),
        formula: pct(Total::ReturnSecondWon, Total::ReturnSecondChances),
    },
    StatDef {
        kind: StatKind::ReturnPointsWon,
        key: "returnwon",
        label: "Return Points Won %",
        category: Category::Return,
        fields: SERVICE_WON,
        eligibility: E::OpponentPositive(Denominator::ServePoints),
        formula: pct(Total::ReturnPointsWon, Total::ReturnPointChances),
    },
    StatDef {
        kind: StatKind::ReturnGamesWon,
        key: "returngameswon",
        label: "Return Games Won %",
        category: Category::Return,
        fields: SERVICE_GAMES,
        eligibility: E::OpponentPositive(Denominator::ServiceGames),
        formula: pct(Total::ReturnGamesWon, Total::ReturnGames),
    },
    StatDef {
        kind: StatKind::TotalPointsPlayed,
        key: "totalpointsplayed",
        label: "Total Points Played",
        category: Category::Points,
        fields: SERVE_POINTS,
        eligibility: E::CombinedServePoints,
        formula: Formula::Total(Total::PointsPlayed),
    },
    StatDef {
        kind: StatKind::TotalPointsWon,
        key: "totalpointswon",
        label: "Total Points Won",
        category: Category::Points,
        fields: SERVICE_WON,
        eligibility: E::PointFieldsPresent,
        formula: Formula::Total(Total::PointsWon),
    },
    StatDef {
        kind: StatKind::TotalPointsWonPct,
        key: "totalpointswonpct",
        label: "Total Points Won %",
        category: Category::Points,
        fields: SERVICE_WON,
        eligibility: E::CombinedServePoints,
        formula: pct(Total::PointsWon, Total::PointsPlayed),
    },
    StatDef {
        kind: StatKind::TotalGames,
        key: "totalgames",
        label: "Total Games Played",
        category: Category::Games,
        fields: NONE,
        eligibility: E::GamesPlayed,
        formula: Formula::Total(Total::Games),
    },
    StatDef {
        kind: StatKind::TotalGamesWon,
        key: "totalgameswon",
        label: "Total Games Won",
        category: Category::Games,
        fields: NONE,
        eligibility: E::GamesPlayed,
        formula: Formula::Total(Total::GamesWon),
    },
    StatDef {
        kind: StatKind::GamesWonPct,
        key: "gameswonpct",
        label: "Games Won %",
        category: Category::Games,
        fields: NONE,
        eligibility: E::GamesPlayed,
        formula: pct(Total::GamesWon, Total::Games),
    },
    StatDef {
        kind: StatKind::SetsPlayed,
        key: "setsplayed",
        label: "Sets Played",
        category: Category::Sets,
        fields: NONE,
        eligibility: E::SetsPlayed,
        formula: Formula::Total(Total::Sets),
    },
    StatDef {
        kind: StatKind::SetsWon,
        key: "setswon",
        label: "Sets Won",
        category: Category::Sets,
        fields: NONE,
        eligibility: E::SetsPlayed,
        formula: Formula::Total(Total::SetsWon),
    },
    StatDef {
        kind: StatKind::SetsWonPct,
        key: "setswonpct",
        label: "Sets Won %",
        category: Category::Sets,
        fields: NONE,
        eligibility: E::SetsPlayed,
        formula: pct(Total::SetsWon, Total::Sets),
    },
    StatDef {
        kind: StatKind::TiebreaksPlayed,
        key: "tiebreaksplayed",
        label: "Tiebreaks Played",
        category: Category::Tiebreaks,
        fields: NONE,
        eligibility: E::TiebreakPlayed,
        formula: Formula::Total(Total::Tiebreaks),
    },
    StatDef {
        kind: StatKind::TiebreaksWon,
        key: "tiebreakswon",
        label: "Tiebreaks Won",
        category: Category::Tiebreaks,
        fields: NONE,
        eligibility: E::TiebreakPlayed,
        formula: Formula::Total(Total::TiebreaksWon),
    },
    StatDef {
        kind: StatKind::TiebreaksWonPct,
        key: "tiebreakswonpct",
        label: "Tiebreaks Won %",
        category: Category::Tiebreaks,
        fields: NONE,
        eligibility: E::TiebreakPlayed,
        formula: pct(Total::TiebreaksWon, Total::Tiebreaks),
    },
    StatDef {
        kind: StatKind::TotalMinutes,
        key: "totalminutes",
        label: "Total Minutes",
        category: Category::Time,
        fields: NONE,
        eligibility: E::MinutesPositive,
        formula: Formula::Total(Total::Minutes),
    },
    StatDef {
        kind: StatKind::AvgMinutes,
        key: "avgminutes",
        label: "Average Minutes per Match",
        category: Category::Time,
        fields: NONE,
        eligibility: E::MinutesPresent,
        formula: Formula::Average(Total::Minutes),
    },
];

impl StatKind {
    /// Resolves a statistic key. Unknown keys map to `Unrecognized`,
    /// which every stage treats as a zero-valued statistic.
    pub fn parse(key: &str) -> StatKind {
        let key = key.trim().to_ascii_lowercase();
        let key = match key.as_str() {
            "totalpoints" => "totalpointsplayed",
            other => other,
        };
        CATALOGUE
            .iter()
            .find(|def| def.key == key)
            .map(|def| def.kind)
            .unwrap_or(StatKind::Unrecognized)
    }

    pub fn def(self) -> Option<&'static StatDef> {
        CATALOGUE.iter().find(|def| def.kind == self)
    }

    pub fn all() -> impl Iterator<Item = StatKind> {
        CATALOGUE.iter().map(|def| def.kind)
    }

    pub fn key(self) -> &'static str {
        self.def().map(|def| def.key).unwrap_or("unrecognized")
    }

    pub fn label(self) -> &'static str {
        self.def().map(|def| def.label).unwrap_or("Unrecognized statistic")
    }

    pub fn category(self) -> Option<Category> {
        self.def().map(|def| def.category)
    }

    pub fn unit(self) -> Unit {
        self.def()
            .map(|def| def.formula.unit())
            .unwrap_or(Unit::Count)
    }

    pub fn eligibility(self) -> Eligibility {
        self.def()
            .map(|def| def.eligibility)
            .unwrap_or(Eligibility::Always)
    }

    pub fn formula(self) -> Option<Formula> {
        self.def().map(|def| def.formula)
    }
}

impl Serialize for StatKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}
