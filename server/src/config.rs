//! Process-global configuration (spec §6 "Configuration surface", §9
//! "Global mutable config"): assembled once at startup from CLI flags and
//! `--env`, then handed down as an immutable `Arc<Config>`. Never mutated
//! after [`crate::init::InitState::wait_all_blocking`] returns.

use std::path::PathBuf;

use campus_search_http::SearchConfig;
use campus_search_scrape::CacheConfig;
use clap::ValueEnum;

/// Deployment profile selected by `--env` (spec §6 "CLI surface").
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum Env {
    Development,
    Production,
    Testing,
}

impl Default for Env {
    fn default() -> Self {
        Env::Development
    }
}

/// The full process-global configuration, built once in `main` and shared
/// read-only via `Arc` thereafter.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: Env,
    pub search: SearchConfig,
    pub cache: CacheConfig,
    pub warn_about_http_version: bool,
    pub base_url: String,
    pub bind_all: bool,
    pub pretty_json: bool,
    pub compression: bool,
    pub public_dir: PathBuf,
}

impl Config {
    /// Build the effective configuration for `env`, applying the profile
    /// overrides spec §6's CLI surface table describes:
    ///
    /// - `development`: `send_score` + `send_hidden_fields` on, pretty JSON.
    /// - `production`: response compression on, binds `0.0.0.0`.
    pub fn for_env(env: Env, base_url: String, resources_dir: PathBuf) -> Self {
        let mut search = SearchConfig::default();
        let mut pretty_json = false;
        let mut compression = false;
        let mut bind_all = false;

        match env {
            Env::Development => {
                search.send_score = true;
                search.send_hidden_fields = true;
                pretty_json = true;
            }
            Env::Production => {
                compression = true;
                bind_all = true;
            }
            Env::Testing => {}
        }

        let cache_dir_name = campus_search_core::normalize::sanitise_path_segment("Cache");
        Config {
            env,
            search,
            cache: CacheConfig { cache_dir: resources_dir.join(cache_dir_name), use_caching: true },
            warn_about_http_version: true,
            base_url,
            bind_all,
            pretty_json,
            compression,
            public_dir: resources_dir.join("Public"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_enables_score_and_hidden_fields() {
        let config = Config::for_env(Env::Development, "http://x".into(), PathBuf::from("."));
        assert!(config.search.send_score);
        assert!(config.search.send_hidden_fields);
        assert!(config.pretty_json);
        assert!(!config.bind_all);
    }

    #[test]
    fn production_enables_compression_and_binds_all() {
        let config = Config::for_env(Env::Production, "http://x".into(), PathBuf::from("."));
        assert!(config.compression);
        assert!(config.bind_all);
        assert!(!config.search.send_score);
    }

    #[test]
    fn cache_dir_is_sanitised_under_resources_dir() {
        let config = Config::for_env(Env::Testing, "http://x".into(), PathBuf::from("/tmp/res"));
        assert_eq!(config.cache.cache_dir, PathBuf::from("/tmp/res/Cache"));
    }
}
