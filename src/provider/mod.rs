pub mod filesystem;
pub mod json_dir;

use crate::error::Result;
use crate::types::matches::{MatchFilters, MatchRecord, ServeField};

/// What to fetch: the filtered slice, the serve columns to keep and,
/// for profiles, a player who must appear on one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchQuery {
    pub filters: MatchFilters,
    pub fields: Vec<ServeField>,
    pub player: Option<String>,
}

impl MatchQuery {
    pub fn admits(&self, record: &MatchRecord) -> bool {
        self.filters.accepts(record)
            && self
                .player
                .as_deref()
                .map(|player| record.involves(player))
                .unwrap_or(true)
    }
}

/// Source of match records. Columns outside `query.fields` must come back
/// absent.
pub trait MatchProvider {
    fn fetch(&self, query: &MatchQuery) -> Result<Vec<MatchRecord>>;
}
