use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_LISTING_URL: &str = "https://archiveofourown.org/works/search\
?utf8=%E2%9C%93&work_search%5Bsort_column%5D=created_at\
&work_search%5Bsort_direction%5D=desc&commit=Search";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    pub api_base: String,
    pub rate_limit_ms: u64,
    pub post_limit: usize,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.twitter.com/2".to_string(),
            rate_limit_ms: 1000,
            post_limit: 280,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    pub top_n: usize,
    pub daily_gain_min: u64,
    pub weekly_gain_min: u64,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            daily_gain_min: 30,
            weekly_gain_min: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    pub listing_url: String,
    pub daily_threshold: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            daily_threshold: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PulseConfig {
    pub store: StoreConfig,
    pub publish: PublishConfig,
    pub digest: DigestConfig,
    pub ingest: IngestConfig,
}

impl PulseConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                PulseConfig::default()
            }
        } else {
            PulseConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = env::var("PULSE_STORE_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.store.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("PULSE_STORE_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.store.timeout_ms = value;
            }
        }
        if let Ok(api_base) = env::var("PULSE_API_BASE") {
            if !api_base.trim().is_empty() {
                self.publish.api_base = api_base;
            }
        }
        if let Ok(rate_limit) = env::var("PULSE_RATE_LIMIT_MS") {
            if let Ok(value) = rate_limit.parse::<u64>() {
                self.publish.rate_limit_ms = value;
            }
        }
        if let Ok(listing_url) = env::var("PULSE_LISTING_URL") {
            if !listing_url.trim().is_empty() {
                self.ingest.listing_url = listing_url;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("PULSE_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/pulse.toml")))
}
