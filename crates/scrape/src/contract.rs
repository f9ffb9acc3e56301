//! Scraping contract and runner (spec §4.6 / C7): a scraper plugin declares
//! a cache key and an async `scrape` operation; [`run_scraper`] wraps it
//! with the cache-then-scrape-then-background-persist protocol.

use std::path::{Path, PathBuf};
use std::sync::Once;

use async_trait::async_trait;
use campus_search_core::normalize::sanitise_path_segment;
use reqwest::Client;
use scraper::Html;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{CacheIoError, ScrapingError};

/// Cache-directory configuration (spec §6 "cache_directory", "use_caching").
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub cache_dir: PathBuf,
    pub use_caching: bool,
}

impl CacheConfig {
    pub fn path_for(&self, cache_key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", sanitise_path_segment(cache_key)))
    }
}

/// Environment handed to every [`Scraper::scrape`] call: HTTP client, cache
/// configuration, and the one-shot HTTP-version warning flag (spec §4.6).
#[derive(Clone)]
pub struct ScrapeEnv {
    pub client: Client,
    pub cache: CacheConfig,
    pub warn_about_http_version: bool,
}

static HTTP_VERSION_WARNED: Once = Once::new();

impl ScrapeEnv {
    /// Fetch `url` and parse it as HTML, surfacing non-2xx statuses and
    /// emitting the one-shot HTTP-version warning (spec §4.6).
    pub async fn fetch_html(&self, url: &str) -> Result<Html, ScrapingError> {
        let response = self.client.get(url).send().await?;
        if self.warn_about_http_version
            && !matches!(response.version(), reqwest::Version::HTTP_11 | reqwest::Version::HTTP_10)
        {
            let version = response.version();
            HTTP_VERSION_WARNED.call_once(|| {
                warn!(?version, "negotiated HTTP version is not HTTP/1 — target sites may misbehave under HTTP/2");
            });
        }
        if !response.status().is_success() {
            return Err(ScrapingError::Status(response.status()));
        }
        let body = response.text().await?;
        Ok(Html::parse_document(&body))
    }
}

/// A scraper plugin for one record type (spec §4.6 / C7).
#[async_trait]
pub trait Scraper: Send + Sync {
    /// The JSON-(de)serializable output this plugin produces — typically `Vec<Record>`.
    type Output: Serialize + DeserializeOwned + Clone + Send + 'static;

    /// Cache key; default is the sanitised type/plugin name.
    fn cache_key(&self) -> &str;

    /// Fetch and decode this plugin's corpus from its HTTP source.
    async fn scrape(&self, env: &ScrapeEnv) -> Result<Self::Output, ScrapingError>;
}

async fn read_cache<O: DeserializeOwned>(path: &Path) -> Result<O, CacheIoError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn spawn_cache_write<O: Serialize + Send + 'static>(path: PathBuf, value: O) {
    tokio::spawn(async move {
        if let Some(parent) = path.parent() {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                warn!(error = %err, path = %parent.display(), "failed to create cache directory");
                return;
            }
        }
        let _ = tokio::fs::remove_file(&path).await;
        match serde_json::to_vec(&value) {
            Ok(bytes) => {
                if let Err(err) = tokio::fs::write(&path, bytes).await {
                    warn!(error = %err, path = %path.display(), "failed to write cache file");
                } else {
                    debug!(path = %path.display(), "wrote cache file");
                }
            }
            Err(err) => warn!(error = %err, "failed to encode cache payload"),
        }
    });
}

/// Run `scraper` per spec §4.6's cache-then-scrape protocol:
///
/// 1. If caching is enabled and the cache file exists and decodes, return it.
/// 2. Else call `scraper.scrape`; on success spawn a detached background
///    write and return the value without waiting on it.
/// 3. On a decode/read failure in step 1, or a scrape failure in step 2,
///    retry once with the cache file forcibly removed before surfacing the
///    original error.
pub async fn run_scraper<S: Scraper>(
    scraper: &S,
    env: &ScrapeEnv,
) -> Result<S::Output, ScrapingError> {
    let cache_path = env.cache.path_for(scraper.cache_key());

    if env.cache.use_caching {
        match read_cache::<S::Output>(&cache_path).await {
            Ok(value) => {
                info!(key = scraper.cache_key(), "loaded corpus from cache");
                return Ok(value);
            }
            Err(_) => debug!(key = scraper.cache_key(), "cache miss or stale, scraping fresh"),
        }
    }

    match scraper.scrape(env).await {
        Ok(value) => {
            spawn_cache_write(cache_path, value.clone());
            Ok(value)
        }
        Err(first_err) => {
            warn!(key = scraper.cache_key(), error = %first_err, "scrape failed, retrying once with cache invalidated");
            let _ = tokio::fs::remove_file(&cache_path).await;
            match scraper.scrape(env).await {
                Ok(value) => {
                    spawn_cache_write(cache_path, value.clone());
                    Ok(value)
                }
                Err(_) => Err(first_err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct Payload(Vec<String>);

    struct AlwaysOk;

    #[async_trait]
    impl Scraper for AlwaysOk {
        type Output = Payload;
        fn cache_key(&self) -> &str {
            "always_ok"
        }
        async fn scrape(&self, _env: &ScrapeEnv) -> Result<Self::Output, ScrapingError> {
            Ok(Payload(vec!["a".into(), "b".into()]))
        }
    }

    struct FailsOnce {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Scraper for FailsOnce {
        type Output = Payload;
        fn cache_key(&self) -> &str {
            "fails_once"
        }
        async fn scrape(&self, _env: &ScrapeEnv) -> Result<Self::Output, ScrapingError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Err(ScrapingError::Status(reqwest::StatusCode::BAD_GATEWAY))
            } else {
                Ok(Payload(vec!["recovered".into()]))
            }
        }
    }

    fn test_env(dir: &std::path::Path) -> ScrapeEnv {
        ScrapeEnv {
            client: Client::new(),
            cache: CacheConfig { cache_dir: dir.to_path_buf(), use_caching: true },
            warn_about_http_version: false,
        }
    }

    #[tokio::test]
    async fn fresh_scrape_then_cache_hit_on_next_run() {
        let dir = tempfile::tempdir().unwrap();
        let env = test_env(dir.path());

        let first = run_scraper(&AlwaysOk, &env).await.unwrap();
        assert_eq!(first.0, vec!["a", "b"]);

        // allow the detached cache-write task to run
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(env.cache.path_for("always_ok").exists());

        let second = run_scraper(&AlwaysOk, &env).await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn retries_once_on_scrape_failure() {
        let dir = tempfile::tempdir().unwrap();
        let env = test_env(dir.path());
        let scraper = FailsOnce { calls: Arc::new(AtomicUsize::new(0)) };

        let result = run_scraper(&scraper, &env).await.unwrap();
        assert_eq!(result.0, vec!["recovered"]);
        assert_eq!(scraper.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn disabled_caching_always_scrapes_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = test_env(dir.path());
        env.cache.use_caching = false;

        tokio::fs::create_dir_all(&env.cache.cache_dir).await.unwrap();
        tokio::fs::write(env.cache.path_for("always_ok"), b"garbage").await.unwrap();

        let result = run_scraper(&AlwaysOk, &env).await.unwrap();
        assert_eq!(result.0, vec!["a", "b"]);
    }
}
