//! Filter-control domains derived from the canonical table
//!
//! The leaderboard controls (language and license pickers, price /
//! parameter / context sliders, year and month dropdowns) take their
//! choices and bounds from the data. [`Facets::default_params`] is the
//! "everything selected" state the leaderboard opens with.

use std::collections::BTreeSet;

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::filter::{FilterParams, MONTHS, START_YEAR};
use crate::merge::max_open_parameters;
use crate::model::{ModalityTag, ModelKind, ModelRecord};

/// Choices and bounds of every filter control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facets {
    pub languages: Vec<String>,
    pub licenses: Vec<String>,
    pub max_input_price: f64,
    pub max_output_price: f64,
    pub max_latency: f64,
    pub min_parameters: f64,
    pub max_parameters: f64,
    pub min_context: i64,
    pub max_context: i64,
    pub years: Vec<String>,
    pub months: Vec<String>,
    /// Modality tags offered as extra-modality checkboxes
    pub modalities: Vec<ModalityTag>,
    pub model_kinds: Vec<ModelKind>,
}

fn max_f64(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

impl Facets {
    /// Derive control domains from `records`
    pub fn from_records(records: &[ModelRecord]) -> Self {
        let languages: BTreeSet<String> = records
            .iter()
            .filter_map(|r| r.languages.as_deref())
            .flat_map(|langs| langs.split(','))
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        let licenses: BTreeSet<String> = records
            .iter()
            .map(|r| r.license_name.clone())
            .collect();

        let min_parameters = records
            .iter()
            .filter_map(|r| r.parameters)
            .reduce(f64::min)
            .unwrap_or(0.0);
        let min_context = records.iter().map(|r| r.context_size).min().unwrap_or(0);
        let max_context = records.iter().map(|r| r.context_size).max().unwrap_or(0);

        let end_year = Utc::now().year();
        Self {
            languages: languages.into_iter().collect(),
            licenses: licenses.into_iter().collect(),
            max_input_price: max_f64(records.iter().map(|r| r.input_price)),
            max_output_price: max_f64(records.iter().map(|r| r.output_price)),
            max_latency: max_f64(records.iter().filter_map(|r| r.latency)),
            min_parameters,
            max_parameters: max_open_parameters(records),
            min_context,
            max_context,
            years: (START_YEAR..=end_year).map(|y| y.to_string()).collect(),
            months: MONTHS.iter().map(|m| m.to_string()).collect(),
            modalities: vec![
                ModalityTag::SingleImage,
                ModalityTag::MultiImage,
                ModalityTag::Audio,
                ModalityTag::Video,
            ],
            model_kinds: ModelKind::ALL.to_vec(),
        }
    }

    /// Filter parameters with every control at its widest setting
    pub fn default_params(&self) -> FilterParams {
        FilterParams {
            languages: Vec::new(),
            parameters: [0.0, self.max_parameters],
            input_price: [0.0, self.max_input_price],
            output_price: [0.0, self.max_output_price],
            modalities: Vec::new(),
            context: [0.0, self.max_context as f64],
            model_kinds: self.model_kinds.clone(),
            start_year: None,
            start_month: None,
            end_year: None,
            end_month: None,
            licenses: self.licenses.clone(),
        }
    }
}
