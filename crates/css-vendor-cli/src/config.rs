use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use css_vendor::SourceConfig;
use serde::{Deserialize, Serialize};

/// Project-local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "css-vendor.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            sources: default_sources(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("css")
}

/// Built-in sources: Open Props beta, the Open Props UI component library
/// and the project's own `custom` stylesheets.
pub fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::remote("ui/opbeta", "https://unpkg.com/open-props@2.0.0-beta.5")
            .with_files(["index.css", "utilities.css"])
            .with_directory("css", ["media-queries.css"])
            .with_directory("css/sizes", ["media.css"])
            .with_directory("css/font", ["lineheight.css"])
            .with_directory("css/color", ["hues.oklch.css"]),
        SourceConfig::remote(
            "ui",
            "https://raw.githubusercontent.com/felix-bohlin/ui/main/src",
        )
        .with_auto_pull("felix-bohlin/ui/main/src"),
        SourceConfig::local("custom", "custom").with_files(["layout.css", "utils.css"]),
    ]
}

/// User-level config file: `~/.config/css-vendor/sources.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("css-vendor").join("sources.toml"))
}

pub fn parse(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Otherwise `./css-vendor.toml`, then
/// the user config, are tried; a file that fails to parse there is skipped
/// with a warning. Falls back to the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        return parse(&contents)
            .with_context(|| format!("failed to parse config at {}", path.display()));
    }

    let candidates = [Some(PathBuf::from(LOCAL_CONFIG_FILE)), user_config_path()];
    for path in candidates.into_iter().flatten() {
        let Ok(contents) = std::fs::read_to_string(&path) else {
            continue;
        };
        match parse(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                return Ok(config);
            }
            Err(e) => eprintln!(
                "warning: failed to parse config at {}, skipping: {e}",
                path.display()
            ),
        }
    }

    Ok(AppConfig::default())
}
