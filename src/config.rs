//! Host configuration file (`config.toml`).

use cellgrid_core::{CellgridError, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    log_level: Option<String>,
    table_separator: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: log::LevelFilter,
    pub table_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: log::LevelFilter::Warn,
            table_separator: "\t".to_string(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellgrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load configuration.
///
/// An explicit path must exist. The default location is optional: when it
/// is absent the defaults apply.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(Config::default()),
        },
    };
    log::debug!("loading config from {}", path.display());

    let meta = std::fs::metadata(&path)?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(CellgridError::Config {
            path,
            message: format!(
                "file too large ({} bytes, max {})",
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ),
        });
    }
    let content = std::fs::read_to_string(&path)?;
    parse(&content).map_err(|message| CellgridError::Config { path, message })
}

fn parse(content: &str) -> std::result::Result<Config, String> {
    let file: ConfigFile = toml::from_str(content).map_err(|e| e.to_string())?;
    let mut config = Config::default();

    if let Some(level) = file.log_level {
        config.log_level = level
            .trim()
            .parse()
            .map_err(|_| format!("unknown log_level '{}'", level))?;
    }
    if let Some(separator) = file.table_separator {
        config.table_separator = separator;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_path_is_deterministic() {
        // Should never panic and should either be Some(path) or None.
        let _ = default_config_path();
    }

    #[test]
    fn parse_empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn parse_overrides() {
        let config = parse("log_level = \"DEBUG\"\ntable_separator = \" | \"\n").unwrap();
        assert_eq!(config.log_level, log::LevelFilter::Debug);
        assert_eq!(config.table_separator, " | ");
    }

    #[test]
    fn parse_rejects_unknown_fields_and_levels() {
        assert!(parse("colour = true").is_err());
        let err = parse("log_level = \"loud\"").unwrap_err();
        assert!(err.contains("loud"));
    }

    #[test]
    fn load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "table_separator = \",\"").unwrap();
        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.table_separator, ",");
        assert_eq!(config.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(load(Some(&missing)), Err(CellgridError::Io(_))));
    }

    #[test]
    fn load_invalid_file_names_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = 3").unwrap();
        let err = load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
