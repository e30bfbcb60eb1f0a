use crate::error::{Result, StatsError};
use crate::provider::filesystem::list_json_files;
use crate::provider::{MatchProvider, MatchQuery};
use crate::types::matches::{MatchRecord, PlayerIdentity, ServeCounters, Side};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads match rows from every `*.json` file under a data directory. Each
/// file holds an array of rows using the dataset's column names
/// (`winner_id`, `w_1stIn`, ...).
#[derive(Debug, Clone)]
pub struct JsonDirProvider {
    root: PathBuf,
}

impl JsonDirProvider {
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(StatsError::PathNotFound(root.display().to_string()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// SHA-256 over every data file's relative path and contents.
    pub fn digest(&self) -> Result<String> {
        let mut hasher = Sha256::new();
        for path in list_json_files(&self.root) {
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            hasher.update(relative.to_string_lossy().as_bytes());
            hasher.update(fs::read(&path)?);
        }
        Ok(hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect())
    }

    fn read_rows(path: &Path) -> Result<Option<Vec<MatchRow>>> {
        let content = fs::read_to_string(path)?;
        match serde_json::from_str::<Vec<MatchRow>>(&content) {
            Ok(rows) => Ok(Some(rows)),
            Err(err) => {
                warn!(file = %path.display(), error = %err, "skipping unreadable match file");
                Ok(None)
            }
        }
    }
}

impl MatchProvider for JsonDirProvider {
    fn fetch(&self, query: &MatchQuery) -> Result<Vec<MatchRecord>> {
        let mut matches = Vec::new();
        for path in list_json_files(&self.root) {
            let Some(rows) = Self::read_rows(&path)? else {
                continue;
            };
            let before = matches.len();
            for row in rows {
                let mut record = row.into_record();
                if !query.admits(&record) {
                    continue;
                }
                record.winner.serve = record.winner.serve.project(&query.fields);
                record.loser.serve = record.loser.serve.project(&query.fields);
                matches.push(record);
            }
            debug!(file = %path.display(), kept = matches.len() - before, "read match file");
        }
        Ok(matches)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(value)) => Some(value.to_string()),
        Some(Scalar::Float(value)) if value.is_finite() && value.fract() == 0.0 => {
            Some((value as i64).to_string())
        }
        Some(Scalar::Float(value)) => Some(value.to_string()),
        Some(Scalar::Text(text)) => Some(text.trim().to_string()).filter(|text| !text.is_empty()),
        None => None,
    })
}

fn number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<f64>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(value)) => Some(value as f64),
        Some(Scalar::Float(value)) => Some(value).filter(|value| value.is_finite()),
        Some(Scalar::Text(text)) => text.trim().parse::<f64>().ok().filter(|value| value.is_finite()),
        None => None,
    })
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<i64>, D::Error> {
    Ok(number(deserializer)?.map(|value| value as i64))
}

#[derive(Debug, Deserialize)]
struct MatchRow {
    #[serde(default, deserialize_with = "text_or_number")]
    winner_id: Option<String>,
    #[serde(default)]
    winner_name: Option<String>,
    #[serde(default)]
    winner_ioc: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    loser_id: Option<String>,
    #[serde(default)]
    loser_name: Option<String>,
    #[serde(default)]
    loser_ioc: Option<String>,

    #[serde(default)]
    score: Option<String>,
    #[serde(default, deserialize_with = "number")]
    minutes: Option<f64>,
    #[serde(default)]
    surface: Option<String>,
    #[serde(default)]
    tourney_level: Option<String>,
    #[serde(default, deserialize_with = "count")]
    year: Option<i64>,
    #[serde(default, deserialize_with = "text_or_number")]
    tourney_date: Option<String>,

    #[serde(default, deserialize_with = "count")]
    w_ace: Option<i64>,
    #[serde(default, deserialize_with = "count")]
    w_df: Option<i64>,
    #[serde(default, deserialize_with = "count")]
    w_svpt: Option<i64>,
    #[serde(default, rename = "w_1stIn", deserialize_with = "count")]
    w_first_in: Option<i64>,
    #[serde(default, rename = "w_1stWon", deserialize_with = "count")]
    w_first_won: Option<i64>,
    #[serde(default, rename = "w_2ndWon", deserialize_with = "count")]
    w_second_won: Option<i64>,
    #[serde(default, rename = "w_SvGms", deserialize_with = "count")]
    w_sv_gms: Option<i64>,
    #[serde(default, rename = "w_bpSaved", deserialize_with = "count")]
    w_bp_saved: Option<i64>,
    #[serde(default, rename = "w_bpFaced", deserialize_with = "count")]
    w_bp_faced: Option<i64>,

    #[serde(default, deserialize_with = "count")]
    l_ace: Option<i64>,
    #[serde(default, deserialize_with = "count")]
    l_df: Option<i64>,
    #[serde(default, deserialize_with = "count")]
    l_svpt: Option<i64>,
    #[serde(default, rename = "l_1stIn", deserialize_with = "count")]
    l_first_in: Option<i64>,
    #[serde(default, rename = "l_1stWon", deserialize_with = "count")]
    l_first_won: Option<i64>,
    #[serde(default, rename = "l_2ndWon", deserialize_with = "count")]
    l_second_won: Option<i64>,
    #[serde(default, rename = "l_SvGms", deserialize_with = "count")]
    l_sv_gms: Option<i64>,
    #[serde(default, rename = "l_bpSaved", deserialize_with = "count")]
    l_bp_saved: Option<i64>,
    #[serde(default, rename = "l_bpFaced", deserialize_with = "count")]
    l_bp_faced: Option<i64>,
}

impl MatchRow {
    fn season(&self) -> Option<i32> {
        if let Some(year) = self.year.and_then(|year| i32::try_from(year).ok()) {
            return Some(year);
        }
        let date = self.tourney_date.as_deref()?;
        NaiveDate::parse_from_str(date, "%Y%m%d")
            .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
            .ok()
            .map(|date| date.year())
    }

    fn into_record(self) -> MatchRecord {
        let season = self.season();
        MatchRecord {
            winner: Side {
                player: PlayerIdentity {
                    id: self.winner_id,
                    name: self.winner_name,
                    country_code: self.winner_ioc,
                },
                serve: ServeCounters {
                    ace: self.w_ace,
                    df: self.w_df,
                    svpt: self.w_svpt,
                    first_in: self.w_first_in,
                    first_won: self.w_first_won,
                    second_won: self.w_second_won,
                    bp_saved: self.w_bp_saved,
                    bp_faced: self.w_bp_faced,
                    sv_gms: self.w_sv_gms,
                },
            },
            loser: Side {
                player: PlayerIdentity {
                    id: self.loser_id,
                    name: self.loser_name,
                    country_code: self.loser_ioc,
                },
                serve: ServeCounters {
                    ace: self.l_ace,
                    df: self.l_df,
                    svpt: self.l_svpt,
                    first_in: self.l_first_in,
                    first_won: self.l_first_won,
                    second_won: self.l_second_won,
                    bp_saved: self.l_bp_saved,
                    bp_faced: self.l_bp_faced,
                    sv_gms: self.l_sv_gms,
                },
            },
            score: self.score,
            minutes: self.minutes,
            surface: self.surface,
            tourney_level: self.tourney_level,
            season,
        }
    }
}
