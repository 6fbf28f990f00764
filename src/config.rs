use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://192.168.5.57:5678/webhook/chatbot-sda";

/// Bundled defaults for builds that ship without a `.env` file.
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub timeout: Option<Duration>,
    pub download_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            download_dir: None,
        }
    }
}

impl Config {
    /// Read `SDA_ENDPOINT`, `SDA_TIMEOUT_SECS` and `SDA_DOWNLOAD_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let endpoint = lookup("SDA_ENDPOINT")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.endpoint);
        let timeout = lookup("SDA_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let download_dir = lookup("SDA_DOWNLOAD_DIR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            endpoint,
            timeout,
            download_dir,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    // A local .env wins during development
    if dotenvy::dotenv().is_ok() {
        return;
    }

    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if env::var(key).is_err() {
            // SAFETY: called from main before the runtime spawns any threads
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

/// Parse `KEY=VALUE` lines, skipping comments and blanks.
pub fn parse_env_lines(source: &str) -> Vec<(&str, &str)> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SDA_ENDPOINT", " http://localhost:5678/webhook/test "),
            ("SDA_TIMEOUT_SECS", "30"),
            ("SDA_DOWNLOAD_DIR", "/tmp/unduhan"),
        ]));
        assert_eq!(config.endpoint, "http://localhost:5678/webhook/test");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.download_dir, Some(PathBuf::from("/tmp/unduhan")));
    }

    #[test]
    fn invalid_timeout_means_none() {
        let config = Config::from_lookup(lookup(&[("SDA_TIMEOUT_SECS", "lama")]));
        assert_eq!(config.timeout, None);
        let config = Config::from_lookup(lookup(&[("SDA_TIMEOUT_SECS", "0")]));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn env_lines_skip_comments() {
        let parsed = parse_env_lines("# komentar\n\nSDA_ENDPOINT = http://x\nRUSAK\n");
        assert_eq!(parsed, vec![("SDA_ENDPOINT", "http://x")]);
    }

    #[test]
    fn bundled_config_parses() {
        let parsed = parse_env_lines(BUNDLED_CONFIG);
        assert!(parsed.iter().any(|(key, _)| *key == "SDA_ENDPOINT"));
    }
}
