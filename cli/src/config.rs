use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use nutrigram_core::models::TelegramId;

/// Development address of the backend; overridden per install.
const DEFAULT_API_URL: &str = "http://localhost:8000";

pub struct Config {
    pub api_url: String,
    /// Bridge-supplied identity, resolved once here and passed into every
    /// view. `None` is a valid state: views render the missing-identity
    /// error without touching the network.
    pub telegram_id: Option<TelegramId>,
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    api_url: Option<String>,
    telegram_id: Option<i64>,
}

impl Config {
    /// Reads `config.json` from the platform config directory, then applies
    /// `NUTRIGRAM_API_URL` / `NUTRIGRAM_TELEGRAM_ID` environment overrides.
    pub fn load() -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "nutrigram").context("Could not determine home directory")?;

        let path = proj_dirs.config_dir().join("config.json");
        let file: ConfigFile = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        } else {
            ConfigFile::default()
        };

        let api_url = resolve_api_url(std::env::var("NUTRIGRAM_API_URL").ok(), file.api_url);
        let telegram_id = resolve_identity(
            std::env::var("NUTRIGRAM_TELEGRAM_ID").ok(),
            file.telegram_id,
        )?;

        Ok(Config {
            api_url,
            telegram_id,
        })
    }
}

fn resolve_api_url(env_value: Option<String>, file_value: Option<String>) -> String {
    let url = env_value
        .filter(|v| !v.trim().is_empty())
        .or(file_value)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    url.trim_end_matches('/').to_string()
}

/// An env override that is present but unparsable is an error, not a silent
/// fall-through to the config file.
fn resolve_identity(
    env_value: Option<String>,
    file_value: Option<i64>,
) -> Result<Option<TelegramId>> {
    if let Some(raw) = env_value {
        let id = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid NUTRIGRAM_TELEGRAM_ID: '{raw}'"))?;
        return Ok(Some(TelegramId(id)));
    }
    Ok(file_value.map(TelegramId))
}
