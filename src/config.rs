use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::SearchConfig;
use crate::models::{RankingWeights, SearchWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_fetch_limit")]
    pub public_posts_limit: u16,
    #[serde(default = "default_fetch_limit")]
    pub search_limit: u16,
}

fn default_timeout_secs() -> u64 { 30 }
fn default_fetch_limit() -> u16 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_context_ttl_secs")]
    pub context_ttl_secs: u64,
    #[serde(default = "default_context_cache_size")]
    pub context_cache_size: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            context_ttl_secs: default_context_ttl_secs(),
            context_cache_size: default_context_cache_size(),
        }
    }
}

fn default_context_ttl_secs() -> u64 { 300 }
fn default_context_cache_size() -> u64 { 1000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingSettings {
    #[serde(default)]
    pub weights: RankingWeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingWeightsConfig {
    #[serde(default = "default_follow_bonus")]
    pub follow_bonus: i64,
    #[serde(default = "default_category_label_hit")]
    pub category_label_hit: i64,
    #[serde(default = "default_title_label_hit")]
    pub title_label_hit: i64,
    #[serde(default = "default_popularity_cap")]
    pub popularity_cap: i64,
    #[serde(default = "default_recency_max")]
    pub recency_max: i64,
    #[serde(default = "default_recency_decay_per_day")]
    pub recency_decay_per_day: i64,
    #[serde(default = "default_unknown_age_days")]
    pub unknown_age_days: i64,
}

impl Default for RankingWeightsConfig {
    fn default() -> Self {
        Self {
            follow_bonus: default_follow_bonus(),
            category_label_hit: default_category_label_hit(),
            title_label_hit: default_title_label_hit(),
            popularity_cap: default_popularity_cap(),
            recency_max: default_recency_max(),
            recency_decay_per_day: default_recency_decay_per_day(),
            unknown_age_days: default_unknown_age_days(),
        }
    }
}

impl From<&RankingWeightsConfig> for RankingWeights {
    fn from(cfg: &RankingWeightsConfig) -> Self {
        Self {
            follow_bonus: cfg.follow_bonus,
            category_label_hit: cfg.category_label_hit,
            title_label_hit: cfg.title_label_hit,
            popularity_cap: cfg.popularity_cap,
            recency_max: cfg.recency_max,
            recency_decay_per_day: cfg.recency_decay_per_day,
            unknown_age_days: cfg.unknown_age_days,
        }
    }
}

fn default_follow_bonus() -> i64 { 300 }
fn default_category_label_hit() -> i64 { 200 }
fn default_title_label_hit() -> i64 { 120 }
fn default_popularity_cap() -> i64 { 100 }
fn default_recency_max() -> i64 { 120 }
fn default_recency_decay_per_day() -> i64 { 4 }
fn default_unknown_age_days() -> i64 { 999 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_generic_keyword")]
    pub generic_keyword: String,
    #[serde(default = "default_untitled_placeholder")]
    pub untitled_placeholder: String,
    #[serde(default = "default_uncategorized_placeholder")]
    pub uncategorized_placeholder: String,
    #[serde(default = "default_subtitle_prefix")]
    pub subtitle_prefix: String,
    #[serde(default)]
    pub weights: SearchWeightsConfig,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            generic_keyword: default_generic_keyword(),
            untitled_placeholder: default_untitled_placeholder(),
            uncategorized_placeholder: default_uncategorized_placeholder(),
            subtitle_prefix: default_subtitle_prefix(),
            weights: SearchWeightsConfig::default(),
        }
    }
}

impl From<&SearchSettings> for SearchConfig {
    fn from(cfg: &SearchSettings) -> Self {
        Self {
            generic_keyword: cfg.generic_keyword.clone(),
            untitled_placeholder: cfg.untitled_placeholder.clone(),
            uncategorized_placeholder: cfg.uncategorized_placeholder.clone(),
            subtitle_prefix: cfg.subtitle_prefix.clone(),
            weights: SearchWeights::from(&cfg.weights),
        }
    }
}

fn default_generic_keyword() -> String { "地圖".to_string() }
fn default_untitled_placeholder() -> String { "(未命名地圖)".to_string() }
fn default_uncategorized_placeholder() -> String { "未分類".to_string() }
fn default_subtitle_prefix() -> String { "分類：".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchWeightsConfig {
    #[serde(default = "default_title_hit")]
    pub title_hit: i64,
    #[serde(default = "default_title_position_window")]
    pub title_position_window: i64,
    #[serde(default = "default_category_hit")]
    pub category_hit: i64,
    #[serde(default = "default_category_position_window")]
    pub category_position_window: i64,
    #[serde(default = "default_generic_title_hit")]
    pub generic_title_hit: i64,
    #[serde(default = "default_generic_category_hit")]
    pub generic_category_hit: i64,
    #[serde(default = "default_generic_position_window")]
    pub generic_position_window: i64,
}

impl Default for SearchWeightsConfig {
    fn default() -> Self {
        Self {
            title_hit: default_title_hit(),
            title_position_window: default_title_position_window(),
            category_hit: default_category_hit(),
            category_position_window: default_category_position_window(),
            generic_title_hit: default_generic_title_hit(),
            generic_category_hit: default_generic_category_hit(),
            generic_position_window: default_generic_position_window(),
        }
    }
}

impl From<&SearchWeightsConfig> for SearchWeights {
    fn from(cfg: &SearchWeightsConfig) -> Self {
        Self {
            title_hit: cfg.title_hit,
            title_position_window: cfg.title_position_window,
            category_hit: cfg.category_hit,
            category_position_window: cfg.category_position_window,
            generic_title_hit: cfg.generic_title_hit,
            generic_category_hit: cfg.generic_category_hit,
            generic_position_window: cfg.generic_position_window,
        }
    }
}

fn default_title_hit() -> i64 { 200 }
fn default_title_position_window() -> i64 { 100 }
fn default_category_hit() -> i64 { 180 }
fn default_category_position_window() -> i64 { 60 }
fn default_generic_title_hit() -> i64 { 60 }
fn default_generic_category_hit() -> i64 { 50 }
fn default_generic_position_window() -> i64 { 20 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with WONDER__, e.g. WONDER__LOGGING__LEVEL)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., WONDER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("WONDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    pub fn ranking_weights(&self) -> RankingWeights {
        RankingWeights::from(&self.ranking.weights)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::from(&self.search)
    }
}

/// Apply well-known environment variables that do not follow the WONDER__ scheme
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(base_url) = env::var("BACKEND_BASE_URL") {
        builder = builder.set_override("backend.base_url", base_url)?;
    }

    builder.build()
}
