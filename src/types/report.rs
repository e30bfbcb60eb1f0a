use crate::engine::catalogue::{Category, StatKind, Unit};
use crate::engine::profile::ProfileRates;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: String,
    pub name: String,
    pub country_code: String,
    pub matches_used: u32,
    pub matches_appeared: u32,
    pub output: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub version: String,
    pub generated_at: String,
    pub dataset_digest: String,
    pub matches_considered: usize,
    pub filters: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub meta: ReportMeta,
    pub statistic: String,
    pub label: String,
    pub unit: Unit,
    pub min_matches: u32,
    pub entries: Vec<RankingEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileStat {
    pub statistic: StatKind,
    pub label: String,
    pub unit: Unit,
    pub value: f64,
    pub matches_used: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSection {
    pub category: Category,
    pub stats: Vec<ProfileStat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    pub country_code: String,
    pub matches_appeared: u32,
    pub sections: Vec<ProfileSection>,
    pub rates: ProfileRates,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub meta: ReportMeta,
    pub profile: PlayerProfile,
}
