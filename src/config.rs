use crate::error::{Result, StatsError};
use crate::types::config::StatsConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "matchstats.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".matchstats/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/matchstats/config.toml";

pub fn load_config(data_dir: &Path) -> Result<Option<StatsConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(data_dir, global.as_deref())
}

/// Layers in application order. Later layers win key by key.
fn layer_paths(data_dir: &Path, global_path: Option<&Path>) -> Vec<PathBuf> {
    global_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([
            data_dir.join(DEFAULT_CONFIG_FILE),
            data_dir.join(DEFAULT_LOCAL_FILE),
        ])
        .filter(|path| path.is_file())
        .collect()
}

/// The data directory's `matchstats.toml` switches layering on; without
/// it no configuration applies, not even the global file.
pub(crate) fn load_config_with_global(
    data_dir: &Path,
    global_path: Option<&Path>,
) -> Result<Option<StatsConfig>> {
    if !data_dir.join(DEFAULT_CONFIG_FILE).is_file() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    for path in layer_paths(data_dir, global_path) {
        debug!(layer = %path.display(), "applying config layer");
        overlay(&mut merged, read_layer(&path)?);
    }

    let cfg: StatsConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| StatsError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

/// Parses one layer and checks it on its own, so a bad value is reported
/// against the file that set it.
fn read_layer(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = toml::from_str(&content).map_err(|e| in_layer(path, e.to_string()))?;
    let layer: StatsConfig = value
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| in_layer(path, e.to_string()))?;
    layer.validate().map_err(|e| match e {
        StatsError::ConfigParse(message) => in_layer(path, message),
        other => other,
    })?;
    Ok(value)
}

fn in_layer(path: &Path, message: String) -> StatsError {
    StatsError::ConfigParse(format!("{}: {}", path.display(), message))
}

fn overlay(base: &mut Value, layer: Value) {
    let layer_table = match layer {
        Value::Table(table) => table,
        scalar => {
            *base = scalar;
            return;
        }
    };
    let base_table = match base {
        Value::Table(table) => table,
        other => {
            *other = Value::Table(layer_table);
            return;
        }
    };
    for (key, value) in layer_table {
        match base_table.get_mut(&key) {
            Some(existing) => overlay(existing, value),
            None => {
                base_table.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_data_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_data_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[output]
format = "json"

[ranking]
top = 20
min_matches = 5
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[ranking]
stat = "returnwon"
top = 50

[filters]
surface = "Hard"
"#,
        )
        .expect("data config should write");

        fs::create_dir_all(root.path().join(".matchstats")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[filters]
surface = "Grass"
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        assert_eq!(cfg.stat(), "returnwon");
        assert_eq!(cfg.top(), 50);
        assert_eq!(cfg.min_matches(), 5);
        assert_eq!(cfg.format(), OutputFormat::Json);
        assert_eq!(cfg.surface().as_deref(), Some("Grass"));
    }

    #[test]
    fn load_config_reports_invalid_values() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[ranking]\ntop = 900\n")
            .expect("data config should write");

        let err = load_config_with_global(root.path(), None).expect_err("top = 900 should fail");
        assert!(err.to_string().contains("ranking.top"));
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn invalid_global_layer_is_reported_against_its_file() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");
        fs::write(&global_path, "[output]\nformat = \"sarif\"\n").expect("global should write");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[output]\nformat = \"md\"\n")
            .expect("data config should write");

        let err = load_config_with_global(root.path(), Some(&global_path))
            .expect_err("bad global format should fail");
        let message = err.to_string();
        assert!(message.contains("output.format"));
        assert!(message.contains(&global_path.display().to_string()));
    }

    #[test]
    fn global_layer_ignored_without_data_config() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");
        fs::write(&global_path, "[ranking]\ntop = 5\n").expect("global should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn overlay_replaces_scalars_and_merges_tables() {
        let mut base: Value = toml::from_str("[ranking]\ntop = 5\nstat = \"aces\"\n")
            .expect("base should parse");
        let layer: Value = toml::from_str("[ranking]\ntop = 9\n").expect("layer should parse");
        overlay(&mut base, layer);

        let ranking = base.get("ranking").expect("ranking table should remain");
        assert_eq!(ranking.get("top").and_then(Value::as_integer), Some(9));
        assert_eq!(ranking.get("stat").and_then(Value::as_str), Some("aces"));
    }
}
