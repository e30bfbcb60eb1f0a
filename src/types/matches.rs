use crate::error::{Result, StatsError};

/// A per-side serve counter column. The column suffix matches the
/// `w_`/`l_` prefixed names used by the match dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServeField {
    Ace,
    DoubleFault,
    ServePoints,
    FirstIn,
    FirstWon,
    SecondWon,
    BreakPointsSaved,
    BreakPointsFaced,
    ServiceGames,
}

impl ServeField {
    pub const ALL: [ServeField; 9] = [
        ServeField::Ace,
        ServeField::DoubleFault,
        ServeField::ServePoints,
        ServeField::FirstIn,
        ServeField::FirstWon,
        ServeField::SecondWon,
        ServeField::BreakPointsSaved,
        ServeField::BreakPointsFaced,
        ServeField::ServiceGames,
    ];

    pub fn column(self) -> &'static str {
        match self {
            ServeField::Ace => "ace",
            ServeField::DoubleFault => "df",
            ServeField::ServePoints => "svpt",
            ServeField::FirstIn => "1stIn",
            ServeField::FirstWon => "1stWon",
            ServeField::SecondWon => "2ndWon",
            ServeField::BreakPointsSaved => "bpSaved",
            ServeField::BreakPointsFaced => "bpFaced",
            ServeField::ServiceGames => "SvGms",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeCounters {
    pub ace: Option<i64>,
    pub df: Option<i64>,
    pub svpt: Option<i64>,
    pub first_in: Option<i64>,
    pub first_won: Option<i64>,
    pub second_won: Option<i64>,
    pub bp_saved: Option<i64>,
    pub bp_faced: Option<i64>,
    pub sv_gms: Option<i64>,
}

impl ServeCounters {
    pub fn get(&self, field: ServeField) -> Option<i64> {
        match field {
            ServeField::Ace => self.ace,
            ServeField::DoubleFault => self.df,
            ServeField::ServePoints => self.svpt,
            ServeField::FirstIn => self.first_in,
            ServeField::FirstWon => self.first_won,
            ServeField::SecondWon => self.second_won,
            ServeField::BreakPointsSaved => self.bp_saved,
            ServeField::BreakPointsFaced => self.bp_faced,
            ServeField::ServiceGames => self.sv_gms,
        }
    }

    fn slot(&mut self, field: ServeField) -> &mut Option<i64> {
        match field {
            ServeField::Ace => &mut self.ace,
            ServeField::DoubleFault => &mut self.df,
            ServeField::ServePoints => &mut self.svpt,
            ServeField::FirstIn => &mut self.first_in,
            ServeField::FirstWon => &mut self.first_won,
            ServeField::SecondWon => &mut self.second_won,
            ServeField::BreakPointsSaved => &mut self.bp_saved,
            ServeField::BreakPointsFaced => &mut self.bp_faced,
            ServeField::ServiceGames => &mut self.sv_gms,
        }
    }

    /// Keeps only the requested columns; everything else reads as absent.
    pub fn project(&self, fields: &[ServeField]) -> ServeCounters {
        let mut projected = ServeCounters::default();
        for field in fields {
            *projected.slot(*field) = self.get(*field);
        }
        projected
    }

    /// Value of a column with absent counters read as zero.
    pub fn count(&self, field: ServeField) -> i64 {
        self.get(field).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub id: Option<String>,
    pub name: Option<String>,
    pub country_code: Option<String>,
}

impl PlayerIdentity {
    /// Id and name, when both are present and non-blank.
    pub fn known(&self) -> Option<(&str, &str)> {
        let id = self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())?;
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())?;
        Some((id, name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Side {
    pub player: PlayerIdentity,
    pub serve: ServeCounters,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecord {
    pub winner: Side,
    pub loser: Side,
    pub score: Option<String>,
    pub minutes: Option<f64>,
    pub surface: Option<String>,
    pub tourney_level: Option<String>,
    pub season: Option<i32>,
}

impl MatchRecord {
    pub fn involves(&self, player_id: &str) -> bool {
        [&self.winner, &self.loser]
            .iter()
            .any(|side| side.player.id.as_deref().map(str::trim) == Some(player_id))
    }
}

/// Surface, season and tournament-level slice; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilters {
    pub surface: Option<String>,
    pub season: Option<i32>,
    pub tourney_level: Option<String>,
}

impl MatchFilters {
    pub fn parse(surface: Option<&str>, season: Option<&str>, level: Option<&str>) -> Result<Self> {
        let season = match normalize(season) {
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
                StatsError::InvalidFilter(format!("season must be a year or 'all': {raw}"))
            })?),
            None => None,
        };
        Ok(Self {
            surface: normalize(surface).map(str::to_string),
            season,
            tourney_level: normalize(level).map(str::to_string),
        })
    }

    pub fn accepts(&self, record: &MatchRecord) -> bool {
        if let Some(surface) = &self.surface {
            if !same_label(record.surface.as_deref(), surface) {
                return false;
            }
        }
        if let Some(level) = &self.tourney_level {
            if !same_label(record.tourney_level.as_deref(), level) {
                return false;
            }
        }
        if let Some(season) = self.season {
            if record.season != Some(season) {
                return false;
            }
        }
        true
    }

    pub fn describe(&self) -> String {
        format!(
            "surface={} season={} level={}",
            self.surface.as_deref().unwrap_or("all"),
            self.season
                .map(|season| season.to_string())
                .unwrap_or_else(|| "all".to_string()),
            self.tourney_level.as_deref().unwrap_or("all")
        )
    }
}

fn normalize(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
}

fn same_label(value: Option<&str>, wanted: &str) -> bool {
    value
        .map(|value| value.trim().eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}
