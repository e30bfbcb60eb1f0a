/// Higher game count at which a set is a match tie-break (e.g. `10-8`).
pub const MATCH_TIEBREAK_GAMES: u32 = 10;
/// Games the set winner needs in a regular set.
pub const SET_GAMES: u32 = 6;
/// Winning margin that closes a regular set without a tie-break.
pub const SET_MARGIN: u32 = 2;
/// Game count that closes a set regardless of margin (7-5, 7-6).
pub const EXTENDED_SET_GAMES: u32 = 7;

/// One set, oriented winner-of-match first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetResult {
    pub winner_games: u32,
    pub loser_games: u32,
    pub tiebreak: bool,
    /// A bracketed deciding tie-break (`[10-7]`). Its figures are points,
    /// not games, and the set goes to the match winner.
    pub super_tiebreak: bool,
}

impl SetResult {
    pub fn new(winner_games: u32, loser_games: u32, tiebreak: bool) -> Self {
        Self {
            winner_games,
            loser_games,
            tiebreak,
            super_tiebreak: false,
        }
    }

    pub fn super_tiebreak(winner_points: u32, loser_points: u32) -> Self {
        Self {
            winner_games: winner_points,
            loser_games: loser_points,
            tiebreak: false,
            super_tiebreak: true,
        }
    }

    /// `(own, other)` games from the point of view of one side.
    pub fn share(&self, won_match: bool) -> (u32, u32) {
        if self.super_tiebreak {
            (0, 0)
        } else if won_match {
            (self.winner_games, self.loser_games)
        } else {
            (self.loser_games, self.winner_games)
        }
    }

    pub fn won_by(&self, won_match: bool) -> bool {
        if self.super_tiebreak {
            return won_match;
        }
        let (own, other) = self.share(won_match);
        own > other
    }

    pub fn games(&self) -> u32 {
        if self.super_tiebreak {
            return 0;
        }
        self.winner_games.saturating_add(self.loser_games)
    }
}

#[derive(Debug, Clone, Copy)]
struct SetToken {
    high: u32,
    low: u32,
    winner_games: u32,
    loser_games: u32,
    tiebreak_marker: bool,
    bracketed: bool,
}

impl SetToken {
    fn parse(token: &str) -> Option<Self> {
        if let Some(inner) = token.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            let (left, right) = inner.split_once('-')?;
            return Some(Self::from_games(
                parse_games(left)?,
                parse_games(right)?,
                false,
                true,
            ));
        }

        let (left, rest) = token.split_once('-')?;
        let winner_games = parse_games(left)?;
        let (right, tiebreak_marker) = match rest.split_once('(') {
            Some((games, points)) => {
                let points = points.strip_suffix(')')?;
                parse_games(points)?;
                (games, true)
            }
            None => (rest, false),
        };
        let loser_games = parse_games(right)?;
        Some(Self::from_games(winner_games, loser_games, tiebreak_marker, false))
    }

    fn from_games(
        winner_games: u32,
        loser_games: u32,
        tiebreak_marker: bool,
        bracketed: bool,
    ) -> Self {
        Self {
            high: winner_games.max(loser_games),
            low: winner_games.min(loser_games),
            winner_games,
            loser_games,
            tiebreak_marker,
            bracketed,
        }
    }

    fn is_completed(&self) -> bool {
        self.bracketed
            || self.tiebreak_marker
            || self.high >= MATCH_TIEBREAK_GAMES
            || (self.high >= SET_GAMES
                && (self.high - self.low >= SET_MARGIN || self.high >= EXTENDED_SET_GAMES))
    }

    fn into_result(self) -> SetResult {
        if self.bracketed {
            SetResult::super_tiebreak(self.winner_games, self.loser_games)
        } else {
            SetResult::new(self.winner_games, self.loser_games, self.tiebreak_marker)
        }
    }
}

fn parse_games(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Splits a free-text score into its completed sets. Tokens that are not
/// `g-g`, `g-g(n)` or `[p-p]` are ignored, and every candidate must pass
/// the completion rule, so a set cut short by a retirement never appears.
pub fn tokenize(score: &str) -> Vec<SetResult> {
    score
        .split_whitespace()
        .filter_map(SetToken::parse)
        .filter(SetToken::is_completed)
        .map(SetToken::into_result)
        .collect()
}
