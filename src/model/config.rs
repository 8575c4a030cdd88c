use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::model::IndicatorCategory;

const ENV_CONFIG_PATH: &str = "LEGAL_RESEARCH_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; JapanLegalMCP/1.0)";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ja,en;q=0.9";

pub const DEFAULT_PRECEDENTS_URL: &str =
    "https://www.no-harassment.mhlw.go.jp/foundation/judicail-precedent/";
pub const DEFAULT_PRECEDENTS_LINK_FRAGMENT: &str = "judicail-precedent";
pub const DEFAULT_MIN_TITLE_CHARS: usize = 5;

/// Outbound request settings shared by every fetch
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl FetchConfig {
    /// Timeout actually applied; a zero value is replaced with the default
    pub fn effective_timeout_ms(&self) -> u64 {
        if self.timeout_ms == 0 {
            DEFAULT_TIMEOUT_MS
        } else {
            self.timeout_ms
        }
    }
}

/// Listing page scraped for harassment precedents
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PrecedentSourceConfig {
    /// Listing page URL; validated when the research service is built
    pub url: String,
    /// Substring an anchor's href must contain to be a candidate
    pub link_fragment: String,
    /// Titles must be strictly longer than this many characters
    pub min_title_chars: usize,
}

impl Default for PrecedentSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PRECEDENTS_URL.to_string(),
            link_fragment: DEFAULT_PRECEDENTS_LINK_FRAGMENT.to_string(),
            min_title_chars: DEFAULT_MIN_TITLE_CHARS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub harassment_precedents: PrecedentSourceConfig,
}

/// Extra strong-indicator rule supplied through the config file
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorRuleConfig {
    pub category: IndicatorCategory,
    pub token: String,
}

/// Classifier extensions. Entries are appended after the built-in tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub strong_indicators: Vec<IndicatorRuleConfig>,
    #[serde(default)]
    pub witness_indicators: Vec<String>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub fetch: FetchConfig,
    pub sources: SourcesConfig,
    pub classifier: ClassifierConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            sources: SourcesConfig::default(),
            classifier: ClassifierConfig::default(),
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        if file.fetch.timeout_ms == 0 {
            tracing::warn!(
                default_ms = DEFAULT_TIMEOUT_MS,
                "fetch.timeout_ms must be positive, using default"
            );
        }

        Self {
            fetch: file.fetch,
            sources: file.sources,
            classifier: file.classifier,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let parsed = Self::parse(&contents);
                match &parsed {
                    Some(_) => tracing::info!(path = %path.display(), "Loaded configuration from file"),
                    None => tracing::warn!(path = %path.display(), "Failed to parse config file, using defaults"),
                }
                parsed
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    /// Parse YAML contents; an empty document yields the defaults
    fn parse(contents: &str) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str(contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::debug!(error = %e, "Invalid YAML configuration");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = Config::parse("   \n").unwrap();
        assert_eq!(file.fetch.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(file.fetch.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(file.sources.harassment_precedents.url, DEFAULT_PRECEDENTS_URL);
        assert!(file.classifier.strong_indicators.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let yaml = r#"
fetch:
  timeout_ms: 5000
classifier:
  strong_indicators:
    - category: dignity_denial
      token: "無能"
  witness_indicators:
    - "同僚"
"#;
        let file = Config::parse(yaml).unwrap();
        assert_eq!(file.fetch.timeout_ms, 5000);
        assert_eq!(file.fetch.accept_language, DEFAULT_ACCEPT_LANGUAGE);
        assert_eq!(file.sources.harassment_precedents.min_title_chars, 5);
        assert_eq!(file.classifier.strong_indicators.len(), 1);
        assert_eq!(
            file.classifier.strong_indicators[0].category,
            IndicatorCategory::DignityDenial
        );
        assert_eq!(file.classifier.witness_indicators, vec!["同僚".to_string()]);
    }

    #[test]
    fn test_shipped_config_parses() {
        let file = Config::parse(include_str!("../../config.yaml")).unwrap();
        assert_eq!(file.fetch.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(
            file.sources.harassment_precedents.link_fragment,
            DEFAULT_PRECEDENTS_LINK_FRAGMENT
        );
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(Config::parse("fetch: [unclosed").is_none());
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let fetch = FetchConfig {
            timeout_ms: 0,
            ..FetchConfig::default()
        };
        assert_eq!(fetch.effective_timeout_ms(), DEFAULT_TIMEOUT_MS);
    }
}
