use crate::engine::catalogue::StatKind;
use crate::error::StatsError;
use crate::report::OutputFormat;
use serde::Deserialize;

pub const DEFAULT_STAT: &str = "aces";
pub const DEFAULT_TOP: u32 = 100;
pub const MAX_TOP: u32 = 500;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsConfig {
    pub ranking: Option<RankingConfig>,
    pub output: Option<OutputConfig>,
    pub filters: Option<FilterConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingConfig {
    pub stat: Option<String>,
    pub top: Option<u32>,
    pub min_matches: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SeasonSetting {
    Year(i64),
    Label(String),
}

impl SeasonSetting {
    pub fn as_filter(&self) -> String {
        match self {
            SeasonSetting::Year(year) => year.to_string(),
            SeasonSetting::Label(label) => label.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    pub surface: Option<String>,
    pub season: Option<SeasonSetting>,
    pub level: Option<String>,
}

impl StatsConfig {
    pub fn stat(&self) -> String {
        self.ranking
            .as_ref()
            .and_then(|ranking| ranking.stat.clone())
            .unwrap_or_else(|| DEFAULT_STAT.to_string())
    }

    pub fn top(&self) -> u32 {
        self.ranking
            .as_ref()
            .and_then(|ranking| ranking.top)
            .unwrap_or(DEFAULT_TOP)
    }

    pub fn min_matches(&self) -> u32 {
        self.ranking
            .as_ref()
            .and_then(|ranking| ranking.min_matches)
            .unwrap_or(0)
    }

    pub fn format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|output| output.format.as_deref())
            .and_then(OutputFormat::parse)
            .unwrap_or(OutputFormat::Md)
    }

    pub fn surface(&self) -> Option<String> {
        self.filters.as_ref().and_then(|filters| filters.surface.clone())
    }

    pub fn season(&self) -> Option<String> {
        self.filters
            .as_ref()
            .and_then(|filters| filters.season.as_ref())
            .map(SeasonSetting::as_filter)
    }

    pub fn level(&self) -> Option<String> {
        self.filters.as_ref().and_then(|filters| filters.level.clone())
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        if let Some(ranking) = &self.ranking {
            if let Some(top) = ranking.top {
                if !(1..=MAX_TOP).contains(&top) {
                    return Err(StatsError::ConfigParse(format!(
                        "ranking.top must be between 1 and {MAX_TOP} (found {top})"
                    )));
                }
            }
            if let Some(stat) = &ranking.stat {
                if StatKind::parse(stat) == StatKind::Unrecognized {
                    return Err(StatsError::ConfigParse(format!(
                        "ranking.stat is not a known statistic: {stat}"
                    )));
                }
            }
        }

        if let Some(format) = self.output.as_ref().and_then(|output| output.format.as_ref()) {
            if OutputFormat::parse(format).is_none() {
                return Err(StatsError::ConfigParse(format!(
                    "output.format must be 'md' or 'json' (found {format})"
                )));
            }
        }

        if let Some(SeasonSetting::Label(label)) =
            self.filters.as_ref().and_then(|filters| filters.season.as_ref())
        {
            if !label.trim().eq_ignore_ascii_case("all") && label.trim().parse::<i32>().is_err() {
                return Err(StatsError::ConfigParse(format!(
                    "filters.season must be a year or 'all' (found {label})"
                )));
            }
        }

        Ok(())
    }
}
