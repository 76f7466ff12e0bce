//! Raw source shapes consumed by the merge engine
//!
//! Benchmark results and latency tables arrive as CSV, the model registry
//! and pricing as JSON. Values that differ in shape between entries are
//! kept as [`serde_json::Value`] and resolved by [`crate::normalize`].

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{Error, Result};

/// Header pandas gives the unnamed index column of a results CSV
pub const DEFAULT_MODEL_NAME: &str = "Unnamed: 0";
/// Score column of a results CSV
pub const DEFAULT_CLEMSCORE: &str = "-, clemscore";

/// One row of a benchmark results table
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub model: String,
    pub score: Option<f64>,
}

/// One row of a benchmark latency table
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyRow {
    pub model: String,
    pub latency: Option<f64>,
}

/// Model registry entry
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntry {
    pub model_name: String,
    #[serde(default)]
    pub parameters: Value,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub open_weight: bool,
    #[serde(default)]
    pub languages: Value,
    #[serde(default)]
    pub context_size: Value,
    #[serde(default)]
    pub license: LicenseInfo,
    #[serde(default)]
    pub model_config: Value,
}

/// License name and URL of a registry entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LicenseInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Pricing entry, prices per 1M tokens with a currency prefix
#[derive(Debug, Clone, Deserialize)]
pub struct PricingEntry {
    pub model_id: String,
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub output: Value,
}

/// Benchmark metadata file (`benchmark_runs.json`)
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkMetadata {
    pub versions: Vec<BenchmarkVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkVersion {
    pub version: String,
}

/// The six inputs of the merge engine
#[derive(Debug, Clone, Default)]
pub struct RawSources {
    pub mm_latency: Vec<LatencyRow>,
    pub mm_results: Vec<ResultRow>,
    pub text_latency: Vec<LatencyRow>,
    pub text_results: Vec<ResultRow>,
    pub registry: Vec<RegistryEntry>,
    pub pricing: Vec<PricingEntry>,
}

/// Benchmark family a version belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkKind {
    Text,
    Multimodal,
}

impl BenchmarkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BenchmarkKind::Text => "text",
            BenchmarkKind::Multimodal => "multimodal",
        }
    }

    /// Does `version` belong to this family
    pub fn includes(self, version: &str) -> bool {
        (self == BenchmarkKind::Multimodal) == version.contains("multimodal")
    }
}

/// Numeric sort key of a version name
///
/// `"v1.6_multimodal"` → `[1, 6]`. Returns `None` when the numeric prefix
/// does not parse.
pub fn version_sort_key(version: &str) -> Option<Vec<u64>> {
    let trimmed = version.strip_prefix('v').unwrap_or(version);
    let numeric = trimmed.split('_').next().unwrap_or_default();
    numeric
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

/// Version names, latest first
///
/// Versions without a numeric prefix sort after all others.
pub fn sorted_versions(metadata: &BenchmarkMetadata) -> Vec<String> {
    let mut keyed: Vec<(Option<Vec<u64>>, String)> = metadata
        .versions
        .iter()
        .map(|v| {
            let key = version_sort_key(&v.version);
            if key.is_none() {
                warn!(version = %v.version, "Version name has no numeric prefix");
            }
            (key, v.version.clone())
        })
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.into_iter().map(|(_, v)| v).collect()
}

fn parse_cell(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Read a benchmark results CSV
///
/// The model column is the unnamed index column (header `""` or
/// `"Unnamed: 0"`), falling back to the first column; the score column is
/// `"-, clemscore"`.
pub fn read_results_csv<R: Read>(reader: R) -> Result<Vec<ResultRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let model_col = column_index(&headers, "")
        .or_else(|| column_index(&headers, DEFAULT_MODEL_NAME))
        .unwrap_or(0);
    let score_col = column_index(&headers, DEFAULT_CLEMSCORE).ok_or_else(|| {
        Error::InvalidInput(format!("results CSV has no '{}' column", DEFAULT_CLEMSCORE))
    })?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let Some(model) = record.get(model_col).map(str::trim).filter(|m| !m.is_empty()) else {
            continue;
        };
        rows.push(ResultRow {
            model: model.to_string(),
            score: record.get(score_col).and_then(parse_cell),
        });
    }
    Ok(rows)
}

/// Read a benchmark latency CSV (`model`, `latency` columns)
pub fn read_latency_csv<R: Read>(reader: R) -> Result<Vec<LatencyRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let model_col = column_index(&headers, "model")
        .ok_or_else(|| Error::InvalidInput("latency CSV has no 'model' column".to_string()))?;
    let latency_col = column_index(&headers, "latency")
        .ok_or_else(|| Error::InvalidInput("latency CSV has no 'latency' column".to_string()))?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let Some(model) = record.get(model_col).map(str::trim).filter(|m| !m.is_empty()) else {
            continue;
        };
        rows.push(LatencyRow {
            model: model.to_string(),
            latency: record.get(latency_col).and_then(parse_cell),
        });
    }
    Ok(rows)
}

/// Parse the model registry JSON array
pub fn parse_registry(json: &str) -> Result<Vec<RegistryEntry>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse the pricing JSON array
pub fn parse_pricing(json: &str) -> Result<Vec<PricingEntry>> {
    Ok(serde_json::from_str(json)?)
}
