//! Merge engine
//!
//! Joins the benchmark results, latency measurements, model registry and
//! pricing into the canonical row-per-model table:
//!
//! 1. Clean result model names (temperature suffix stripped)
//! 2. Average latency per model over multimodal + text runs
//! 3. Average score per model over multimodal + text runs
//! 4. Outer-join latency and score on model name
//! 5. Build registry rows (license, modality flags)
//! 6. Inner-join with the registry (registry is authoritative)
//! 7. Left-join pricing (unmatched prices are 0.0)
//! 8. Derive parameters, license link, temp date, context size
//! 9. Derive the dummy parameter sentinel for commercial models
//! 10. Sort by score, highest first

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::ops::Deref;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::model::{sort_by_score, ModelRecord};
use crate::normalize::{
    clean_model_name, clean_price, map_languages, modality_flag, parse_context_size,
    parse_parameters, parse_release_date,
};
use crate::sources::{LatencyRow, RawSources, RegistryEntry, ResultRow};

/// The canonical table: built once, shared read-only
///
/// Cloning is cheap (reference counted); the rows are never mutated after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct CanonicalTable {
    records: Arc<[ModelRecord]>,
}

impl CanonicalTable {
    /// Build a table from records, sorting them by score (highest first)
    pub fn from_records(mut records: Vec<ModelRecord>) -> Self {
        sort_by_score(&mut records);
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }
}

impl Deref for CanonicalTable {
    type Target = [ModelRecord];

    fn deref(&self) -> &[ModelRecord] {
        &self.records
    }
}

/// Running mean that ignores absent values
#[derive(Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Average latency per model over both latency tables
fn average_latency<'a>(tables: impl IntoIterator<Item = &'a LatencyRow>) -> BTreeMap<String, Option<f64>> {
    let mut groups: BTreeMap<String, Mean> = BTreeMap::new();
    for row in tables {
        groups.entry(row.model.clone()).or_default().push(row.latency);
    }
    groups.into_iter().map(|(k, m)| (k, m.value())).collect()
}

/// Average score per cleaned model name over both result tables
fn average_score<'a>(tables: impl IntoIterator<Item = &'a ResultRow>) -> BTreeMap<String, Option<f64>> {
    let mut groups: BTreeMap<String, Mean> = BTreeMap::new();
    for row in tables {
        groups
            .entry(clean_model_name(&row.model))
            .or_default()
            .push(row.score);
    }
    groups.into_iter().map(|(k, m)| (k, m.value())).collect()
}

/// Benchmark side of the join: (latency, score) per model
type BenchmarkRow = (Option<f64>, Option<f64>);

fn outer_join(
    latency: BTreeMap<String, Option<f64>>,
    scores: BTreeMap<String, Option<f64>>,
) -> BTreeMap<String, BenchmarkRow> {
    let mut joined: BTreeMap<String, BenchmarkRow> = latency
        .into_iter()
        .map(|(model, lat)| (model, (lat, None)))
        .collect();
    for (model, score) in scores {
        joined.entry(model).or_insert((None, None)).1 = score;
    }
    joined
}

/// Index registry entries by model name, first entry wins
fn index_registry(registry: &[RegistryEntry]) -> HashMap<&str, &RegistryEntry> {
    let mut index = HashMap::with_capacity(registry.len());
    for entry in registry {
        match index.entry(entry.model_name.as_str()) {
            Entry::Occupied(_) => {
                warn!(model = %entry.model_name, "Duplicate registry entry, keeping the first");
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }
    index
}

/// Index cleaned prices by model id, first entry wins
fn index_pricing(sources: &RawSources) -> HashMap<&str, (Option<f64>, Option<f64>)> {
    let mut index = HashMap::with_capacity(sources.pricing.len());
    for entry in &sources.pricing {
        index
            .entry(entry.model_id.as_str())
            .or_insert_with(|| (clean_price(&entry.input), clean_price(&entry.output)));
    }
    index
}

/// Build one canonical row from its joined parts (steps 5, 7 and 8)
fn build_record(
    model: &str,
    (latency, score): BenchmarkRow,
    entry: &RegistryEntry,
    price: Option<(Option<f64>, Option<f64>)>,
) -> ModelRecord {
    let (input, output) = price.unwrap_or((None, None));
    let parameters = if entry.open_weight {
        parse_parameters(&entry.parameters)
    } else {
        None
    };
    let release_date = entry.release_date.as_deref().and_then(parse_release_date);
    let license_name = entry.license.name.clone();
    let license_url = entry.license.url.clone();

    ModelRecord {
        model_name: model.to_string(),
        score,
        latency,
        parameters,
        // assigned in a second pass once the open-weight maximum is known
        dummy_parameters: 0.0,
        release_date,
        open_weight: entry.open_weight,
        languages: map_languages(&entry.languages),
        context_size: parse_context_size(&entry.context_size),
        license: format!("[{}]({})", license_name, license_url),
        license_name,
        license_url,
        single_image: modality_flag(&entry.model_config, "single_image"),
        multiple_images: modality_flag(&entry.model_config, "multiple_images"),
        audio: modality_flag(&entry.model_config, "audio"),
        video: modality_flag(&entry.model_config, "video"),
        input_price: input.unwrap_or(0.0),
        output_price: output.unwrap_or(0.0),
        temp_date: release_date,
    }
}

/// Largest parameter count among open-weight rows (0.0 when none is known)
pub fn max_open_parameters(records: &[ModelRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.open_weight)
        .filter_map(|r| r.parameters)
        .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))))
        .unwrap_or(0.0)
}

/// Assign `dummy_parameters` to every row
///
/// Open-weight rows keep their own count; commercial rows get the largest
/// open-weight count so that parameter-range filters never drop them.
fn assign_dummy_parameters(records: &mut [ModelRecord]) {
    let sentinel = max_open_parameters(records);
    for record in records.iter_mut() {
        record.dummy_parameters = if record.open_weight {
            record.parameters.unwrap_or(0.0)
        } else {
            sentinel
        };
    }
}

/// Merge the raw sources into the canonical table
pub fn merge_sources(sources: &RawSources) -> CanonicalTable {
    let avg_latency = average_latency(sources.mm_latency.iter().chain(&sources.text_latency));
    let avg_score = average_score(sources.mm_results.iter().chain(&sources.text_results));
    debug!(
        latency_models = avg_latency.len(),
        score_models = avg_score.len(),
        "Averaged benchmark runs"
    );

    let benchmarks = outer_join(avg_latency, avg_score);
    let registry = index_registry(&sources.registry);
    let pricing = index_pricing(sources);

    let mut records: Vec<ModelRecord> = benchmarks
        .into_iter()
        .filter_map(|(model, bench)| {
            let entry = registry.get(model.as_str())?;
            let price = pricing.get(model.as_str()).copied();
            Some(build_record(&model, bench, entry, price))
        })
        .collect();

    assign_dummy_parameters(&mut records);

    let priced = records
        .iter()
        .filter(|r| pricing.contains_key(r.model_name.as_str()))
        .count();
    info!(
        models = records.len(),
        registry_entries = sources.registry.len(),
        priced,
        "Merged canonical table"
    );

    CanonicalTable::from_records(records)
}
