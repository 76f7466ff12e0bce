//! Remote source client
//!
//! Fetches the benchmark metadata, per-version results and latency CSVs,
//! the model registry and the pricing list. Any failure of a required
//! source is returned as a [`FetchError`]; callers must not merge partial
//! sources.
//!
//! URL layout under the benchmark base URL:
//! - `benchmark_runs.json`
//! - `<version>/results.csv`
//! - `Addenda/Latency/<version>_latency.csv`

use std::time::Duration;

use llmc_common::config::TomlConfig;
use llmc_common::sources::{
    parse_pricing, parse_registry, read_latency_csv, read_results_csv, sorted_versions,
    BenchmarkKind, BenchmarkMetadata, LatencyRow, PricingEntry, RegistryEntry, ResultRow,
};
use llmc_common::RawSources;
use thiserror::Error;
use tracing::{debug, error, info, warn};

const USER_AGENT: &str = concat!("llm-calculator/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const BENCHMARK_FILE: &str = "benchmark_runs.json";
pub const RESULT_FILE: &str = "results.csv";
pub const LATENCY_FOLDER: &str = "Addenda/Latency";
pub const LATENCY_SUFFIX: &str = "_latency.csv";

/// Source fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network communication error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server answered with a non-200 status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Payload could not be parsed
    #[error("Parse error for {url}: {message}")]
    ParseError { url: String, message: String },

    /// Local source file could not be read
    #[error("Failed to read {path}: {message}")]
    FileError { path: String, message: String },

    /// No benchmark version of a kind had both results and latency
    #[error("No usable {0} benchmark version")]
    NoVersion(&'static str),
}

/// Where the sources live
#[derive(Debug, Clone)]
pub struct SourceUrls {
    /// Benchmark runs base URL, always ending in `/`
    pub benchmark_base_url: String,
    pub registry_url: String,
    /// Local file path or http(s) URL
    pub pricing_source: String,
}

impl From<&TomlConfig> for SourceUrls {
    fn from(config: &TomlConfig) -> Self {
        let mut base = config.benchmark_base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self {
            benchmark_base_url: base,
            registry_url: config.registry_url.clone(),
            pricing_source: config.pricing_source.clone(),
        }
    }
}

impl SourceUrls {
    pub fn metadata_url(&self) -> String {
        format!("{}{}", self.benchmark_base_url, BENCHMARK_FILE)
    }

    pub fn results_url(&self, version: &str) -> String {
        format!("{}{}/{}", self.benchmark_base_url, version, RESULT_FILE)
    }

    pub fn latency_url(&self, version: &str) -> String {
        format!(
            "{}{}/{}{}",
            self.benchmark_base_url, LATENCY_FOLDER, version, LATENCY_SUFFIX
        )
    }
}

/// HTTP client for all remote sources
pub struct SourceClient {
    http_client: reqwest::Client,
    urls: SourceUrls,
}

impl SourceClient {
    /// Create new source client
    pub fn new(urls: SourceUrls) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self { http_client, urls })
    }

    pub fn urls(&self) -> &SourceUrls {
        &self.urls
    }

    /// GET `url` as text; anything but 200 is an error
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "Fetching source");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(url = %url, status = status.as_u16(), "Failed to read file");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(FetchError::ParseError {
                url: url.to_string(),
                message: "empty payload".to_string(),
            });
        }
        Ok(text)
    }

    /// Fetch benchmark metadata and return version names, latest first
    pub async fn fetch_version_metadata(&self) -> Result<Vec<String>, FetchError> {
        let url = self.urls.metadata_url();
        let text = self.get_text(&url).await?;
        let metadata: BenchmarkMetadata =
            serde_json::from_str(&text).map_err(|e| FetchError::ParseError {
                url: url.clone(),
                message: e.to_string(),
            })?;
        let versions = sorted_versions(&metadata);
        info!(count = versions.len(), latest = ?versions.first(), "Fetched benchmark versions");
        Ok(versions)
    }

    async fn fetch_version(
        &self,
        version: &str,
    ) -> Result<(Vec<ResultRow>, Vec<LatencyRow>), FetchError> {
        let results_url = self.urls.results_url(version);
        let latency_url = self.urls.latency_url(version);

        let results_text = self.get_text(&results_url).await?;
        let latency_text = self.get_text(&latency_url).await?;

        let results = read_results_csv(results_text.as_bytes()).map_err(|e| {
            FetchError::ParseError {
                url: results_url,
                message: e.to_string(),
            }
        })?;
        let latency = read_latency_csv(latency_text.as_bytes()).map_err(|e| {
            FetchError::ParseError {
                url: latency_url,
                message: e.to_string(),
            }
        })?;
        Ok((results, latency))
    }

    /// Results and latency of the latest usable version of `kind`
    ///
    /// Versions are tried in the given order; a version whose files fail to
    /// fetch or parse is logged and skipped.
    pub async fn fetch_benchmark_data(
        &self,
        kind: BenchmarkKind,
        versions: &[String],
    ) -> Result<(Vec<ResultRow>, Vec<LatencyRow>), FetchError> {
        for version in versions.iter().filter(|v| kind.includes(v)) {
            match self.fetch_version(version).await {
                Ok((results, latency)) => {
                    info!(
                        kind = kind.as_str(),
                        version = %version,
                        results = results.len(),
                        latency = latency.len(),
                        "Fetched benchmark data"
                    );
                    return Ok((results, latency));
                }
                Err(e) => {
                    warn!(kind = kind.as_str(), version = %version, "Error fetching data: {}", e);
                }
            }
        }
        Err(FetchError::NoVersion(kind.as_str()))
    }

    /// Fetch the model registry
    pub async fn fetch_registry(&self) -> Result<Vec<RegistryEntry>, FetchError> {
        let url = &self.urls.registry_url;
        let text = self.get_text(url).await?;
        let registry = parse_registry(&text).map_err(|e| FetchError::ParseError {
            url: url.clone(),
            message: e.to_string(),
        })?;
        info!(entries = registry.len(), "Fetched model registry");
        Ok(registry)
    }

    /// Load the pricing list from a URL or a local file
    pub async fn fetch_pricing(&self) -> Result<Vec<PricingEntry>, FetchError> {
        let source = &self.urls.pricing_source;
        let text = if source.starts_with("http://") || source.starts_with("https://") {
            self.get_text(source).await?
        } else {
            tokio::fs::read_to_string(source)
                .await
                .map_err(|e| FetchError::FileError {
                    path: source.clone(),
                    message: e.to_string(),
                })?
        };
        let pricing = parse_pricing(&text).map_err(|e| FetchError::ParseError {
            url: source.clone(),
            message: e.to_string(),
        })?;
        info!(entries = pricing.len(), "Loaded pricing");
        Ok(pricing)
    }

    async fn fetch_all(&self) -> Result<RawSources, FetchError> {
        let versions = self.fetch_version_metadata().await?;
        let (mm_results, mm_latency) = self
            .fetch_benchmark_data(BenchmarkKind::Multimodal, &versions)
            .await?;
        let (text_results, text_latency) = self
            .fetch_benchmark_data(BenchmarkKind::Text, &versions)
            .await?;
        let registry = self.fetch_registry().await?;
        let pricing = self.fetch_pricing().await?;

        Ok(RawSources {
            mm_latency,
            mm_results,
            text_latency,
            text_results,
            registry,
            pricing,
        })
    }

    /// Fetch every merge input, or fail as a whole
    pub async fn collect_sources(&self) -> Result<RawSources, FetchError> {
        let result = self.fetch_all().await;
        if let Err(e) = &result {
            error!("Source collection failed: {}", e);
        }
        result
    }
}
