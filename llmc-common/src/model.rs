//! Canonical model record and display projection
//!
//! A [`ModelRecord`] is one row of the canonical table produced by the
//! merge engine. A [`DisplayRow`] is the subset of columns shown in the
//! leaderboard.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

// Column names of the canonical table, matching the serde renames on
// `ModelRecord` field for field.
pub const MODEL_NAME: &str = "Model Name";
pub const SCORE: &str = "Score (0-100)";
pub const LATENCY: &str = "Latency (s)";
pub const PARAMS: &str = "Parameters (B)";
pub const DUMMY_PARAMS: &str = "Parameters Dummy (B)";
pub const RELEASE_DATE: &str = "Release Date";
pub const OPEN_WEIGHT: &str = "Open Weight";
pub const LANGS: &str = "Languages";
pub const CONTEXT: &str = "Context Size (k)";
pub const LICENSE_NAME: &str = "License Name";
pub const LICENSE_URL: &str = "License URL";
pub const SINGLE_IMG: &str = "Single Image";
pub const MULT_IMG: &str = "Multi Image";
pub const AUDIO: &str = "Audio";
pub const VIDEO: &str = "Video";
pub const INPUT: &str = "Input $/1M tokens";
pub const OUTPUT: &str = "Output $/1M tokens";
pub const LICENSE: &str = "License";
pub const TEMP_DATE: &str = "Temp Date";

/// Every canonical column in field order (the CSV cache header row)
pub const CANONICAL_COLUMNS: [&str; 19] = [
    MODEL_NAME,
    SCORE,
    LATENCY,
    PARAMS,
    DUMMY_PARAMS,
    RELEASE_DATE,
    OPEN_WEIGHT,
    LANGS,
    CONTEXT,
    LICENSE_NAME,
    LICENSE_URL,
    SINGLE_IMG,
    MULT_IMG,
    AUDIO,
    VIDEO,
    INPUT,
    OUTPUT,
    LICENSE,
    TEMP_DATE,
];

/// Columns of the leaderboard display, in display order
pub const DISPLAY_COLUMNS: [&str; 9] = [
    MODEL_NAME,
    SCORE,
    INPUT,
    OUTPUT,
    LATENCY,
    CONTEXT,
    PARAMS,
    RELEASE_DATE,
    LICENSE,
];

/// One row of the canonical table
///
/// Field renames match the CSV cache headers so that the cache file is
/// readable on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    #[serde(rename = "Model Name")]
    pub model_name: String,

    /// Benchmark score averaged over all runs (absent if only latency exists)
    #[serde(rename = "Score (0-100)")]
    pub score: Option<f64>,

    /// Latency in seconds averaged over all runs (absent if only a score exists)
    #[serde(rename = "Latency (s)")]
    pub latency: Option<f64>,

    /// Parameter count in billions; absent for commercial models
    #[serde(rename = "Parameters (B)")]
    pub parameters: Option<f64>,

    /// Parameter count used by the parameter-range filter
    #[serde(rename = "Parameters Dummy (B)")]
    pub dummy_parameters: f64,

    #[serde(rename = "Release Date")]
    pub release_date: Option<NaiveDate>,

    #[serde(rename = "Open Weight")]
    pub open_weight: bool,

    /// Comma-joined language display names
    #[serde(rename = "Languages")]
    pub languages: Option<String>,

    /// Context window in thousands of tokens
    #[serde(rename = "Context Size (k)")]
    pub context_size: i64,

    #[serde(rename = "License Name")]
    pub license_name: String,

    #[serde(rename = "License URL")]
    pub license_url: String,

    #[serde(rename = "Single Image")]
    pub single_image: bool,

    #[serde(rename = "Multi Image")]
    pub multiple_images: bool,

    #[serde(rename = "Audio")]
    pub audio: bool,

    #[serde(rename = "Video")]
    pub video: bool,

    /// Price in $ per 1M input tokens
    #[serde(rename = "Input $/1M tokens")]
    pub input_price: f64,

    /// Price in $ per 1M output tokens
    #[serde(rename = "Output $/1M tokens")]
    pub output_price: f64,

    /// `[name](url)` markdown link
    #[serde(rename = "License")]
    pub license: String,

    /// Copy of the release date read by the date filter
    #[serde(rename = "Temp Date")]
    pub temp_date: Option<NaiveDate>,
}

impl ModelRecord {
    /// True when the model supports none of the extra modalities
    pub fn is_text_only(&self) -> bool {
        !(self.single_image || self.multiple_images || self.audio || self.video)
    }

    /// Project to the leaderboard display columns
    pub fn to_display_row(&self) -> DisplayRow {
        DisplayRow {
            model_name: self.model_name.clone(),
            score: self.score.map(round1),
            input_price: self.input_price,
            output_price: self.output_price,
            latency: self.latency.map(round1),
            context_size: self.context_size,
            parameters: self.parameters,
            release_date: self.release_date,
            license: self.license.clone(),
        }
    }
}

/// Leaderboard row (display projection of [`ModelRecord`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    #[serde(rename = "Model Name")]
    pub model_name: String,
    #[serde(rename = "Score (0-100)")]
    pub score: Option<f64>,
    #[serde(rename = "Input $/1M tokens")]
    pub input_price: f64,
    #[serde(rename = "Output $/1M tokens")]
    pub output_price: f64,
    #[serde(rename = "Latency (s)")]
    pub latency: Option<f64>,
    #[serde(rename = "Context Size (k)")]
    pub context_size: i64,
    #[serde(rename = "Parameters (B)")]
    pub parameters: Option<f64>,
    #[serde(rename = "Release Date")]
    pub release_date: Option<NaiveDate>,
    #[serde(rename = "License")]
    pub license: String,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Descending score order with absent scores last
pub fn by_score_desc(a: &ModelRecord, b: &ModelRecord) -> Ordering {
    match (a.score, b.score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort records by score, highest first (stable)
pub fn sort_by_score(records: &mut [ModelRecord]) {
    records.sort_by(by_score_desc);
}

/// Modality selection tag of the modality filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalityTag {
    TextOnly,
    SingleImage,
    MultiImage,
    Audio,
    Video,
}

impl ModalityTag {
    pub const ALL: [ModalityTag; 5] = [
        ModalityTag::TextOnly,
        ModalityTag::SingleImage,
        ModalityTag::MultiImage,
        ModalityTag::Audio,
        ModalityTag::Video,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModalityTag::TextOnly => "Text-Only",
            ModalityTag::SingleImage => SINGLE_IMG,
            ModalityTag::MultiImage => MULT_IMG,
            ModalityTag::Audio => AUDIO,
            ModalityTag::Video => VIDEO,
        }
    }

    /// Does `record` satisfy this tag's condition
    pub fn matches(self, record: &ModelRecord) -> bool {
        match self {
            ModalityTag::TextOnly => record.is_text_only(),
            ModalityTag::SingleImage => record.single_image,
            ModalityTag::MultiImage => record.multiple_images,
            ModalityTag::Audio => record.audio,
            ModalityTag::Video => record.video,
        }
    }
}

/// Model licensing kind of the open-weight filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    OpenWeight,
    Commercial,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::OpenWeight, ModelKind::Commercial];

    pub fn label(self) -> &'static str {
        match self {
            ModelKind::OpenWeight => "Open-Weight",
            ModelKind::Commercial => "Commercial",
        }
    }

    pub fn matches(self, record: &ModelRecord) -> bool {
        match self {
            ModelKind::OpenWeight => record.open_weight,
            ModelKind::Commercial => !record.open_weight,
        }
    }
}

macro_rules! label_serde {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .into_iter()
                    .find(|v| v.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| Error::InvalidInput(format!("unknown {}: {}", $what, s)))
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

label_serde!(ModalityTag, "modality");
label_serde!(ModelKind, "model kind");
