pub mod json;
pub mod md;

use crate::error::StatsError;
use crate::types::report::{ProfileReport, RankingReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "md" | "markdown" => Some(OutputFormat::Md),
            _ => None,
        }
    }
}

pub fn render_ranking(report: &RankingReport, format: OutputFormat) -> Result<String, StatsError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(StatsError::Json),
        OutputFormat::Md => Ok(md::ranking_to_markdown(report)),
    }
}

pub fn render_profile(report: &ProfileReport, format: OutputFormat) -> Result<String, StatsError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(StatsError::Json),
        OutputFormat::Md => Ok(md::profile_to_markdown(report)),
    }
}
