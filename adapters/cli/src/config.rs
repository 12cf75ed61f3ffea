//! Optional TOML configuration for the command-line adapter.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Presentation used when printing a run's result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// One direction name per line, or `LOOP`.
    #[default]
    Text,
    /// The full run report as JSON.
    Json,
}

/// Settings resolved from the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Output presentation.
    pub(crate) format: OutputFormat,
    /// Whether successful paths are replayed before printing.
    pub(crate) verify: bool,
    /// Log filter directives used when `RUST_LOG` is unset.
    pub(crate) log_filter: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    version: u32,
    #[serde(default)]
    output: OutputSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    #[serde(default)]
    format: OutputFormat,
    #[serde(default)]
    verify: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingSection {
    filter: Option<String>,
}

/// Reads and validates the configuration stored at `path`.
pub(crate) fn load(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config at {}", path.display()))
}

fn parse(contents: &str) -> Result<Settings> {
    let config: ConfigFile =
        toml::from_str(contents).context("failed to parse config toml contents")?;
    if config.version != SUPPORTED_CONFIG_VERSION {
        bail!(
            "unsupported config version {}; expected {}",
            config.version,
            SUPPORTED_CONFIG_VERSION
        );
    }

    let log_filter = config
        .logging
        .filter
        .map(|filter| filter.trim().to_owned())
        .filter(|filter| !filter.is_empty());

    Ok(Settings {
        format: config.output.format,
        verify: config.output.verify,
        log_filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let settings = parse(
            r#"
                version = 1

                [output]
                format = "json"
                verify = true

                [logging]
                filter = "maze_robot_system_simulation=debug"
            "#,
        )
        .expect("config parses");

        assert_eq!(
            settings,
            Settings {
                format: OutputFormat::Json,
                verify: true,
                log_filter: Some("maze_robot_system_simulation=debug".to_owned()),
            }
        );
    }

    #[test]
    fn sections_are_optional() {
        let settings = parse("version = 1").expect("config parses");

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn blank_filter_is_ignored() {
        let settings = parse("version = 1\n[logging]\nfilter = \"  \"").expect("config parses");

        assert_eq!(settings.log_filter, None);
    }

    #[test]
    fn rejects_unknown_version() {
        let error = parse("version = 2").expect_err("version 2 is unsupported");

        assert!(error.to_string().contains("unsupported config version 2"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse("version = 1\n[output]\ncolour = true").is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(parse("version = 1\n[output]\nformat = \"yaml\"").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("missing.toml");

        let error = load(&path).expect_err("file is missing");

        assert!(error.to_string().starts_with("failed to read config"));
    }
}
