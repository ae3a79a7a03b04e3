/// CLI configuration
use crate::error::{CliError, Result};
use remusic_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
const DEFAULT_CONFIG_FILE: &str = "remusic.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// TOML fixture seeding the in-memory store (empty store when unset)
    #[serde(default = "default_fixture")]
    pub fixture: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `remusic.toml` is read if
    /// present. `REMUSIC_*` variables override both, with `__` between
    /// nested keys (`REMUSIC_PLAYBACK__HISTORY_LIMIT=50`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("REMUSIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.history_limit == Some(0) {
            return Err(CliError::Config(
                "playback.history_limit must be at least 1 (omit it for unbounded history)"
                    .to_string(),
            ));
        }

        if let Some(fixture) = &self.catalog.fixture {
            if !fixture.exists() {
                return Err(CliError::Config(format!(
                    "Fixture not found at {:?}",
                    fixture
                )));
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::Config("logging.filter must not be empty".to_string()));
        }

        Ok(())
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        fixture: default_fixture(),
    }
}

fn default_fixture() -> Option<PathBuf> {
    None
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "remusic_cli=info,remusic_playback=info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            playback: PlaybackConfig::default(),
            logging: default_logging(),
        }
    }
}
