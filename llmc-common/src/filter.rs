//! Filter engine
//!
//! Narrows the canonical table with a fixed, closed set of predicates.
//! All predicate groups are conjunctive; each is skipped once the working
//! set is already empty. Every call starts from the full table, so results
//! only depend on the table and the current parameters.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::merge::CanonicalTable;
use crate::model::{sort_by_score, DisplayRow, ModalityTag, ModelKind, ModelRecord};

/// Earliest selectable release year (default start year)
pub const START_YEAR: i32 = 2020;

/// English month names, January first
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Current values of every filter control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Languages that must all be present
    pub languages: Vec<String>,
    /// Inclusive `[low, high]` on dummy parameters (billions)
    pub parameters: [f64; 2],
    pub input_price: [f64; 2],
    pub output_price: [f64; 2],
    /// Modality tags; a row qualifies if it matches any of them
    pub modalities: Vec<ModalityTag>,
    /// Inclusive `[low, high]` on context size (thousands of tokens)
    pub context: [f64; 2],
    pub model_kinds: Vec<ModelKind>,
    pub start_year: Option<String>,
    pub start_month: Option<String>,
    pub end_year: Option<String>,
    pub end_month: Option<String>,
    /// License name fragments; a row qualifies if it contains any of them
    pub licenses: Vec<String>,
}

fn in_range(value: f64, [low, high]: [f64; 2]) -> bool {
    value >= low && value <= high
}

/// Apply `pred` unless the working set is already empty
fn narrow<'a>(
    rows: Vec<&'a ModelRecord>,
    name: &str,
    pred: impl Fn(&ModelRecord) -> bool,
) -> Vec<&'a ModelRecord> {
    if rows.is_empty() {
        return rows;
    }
    let before = rows.len();
    let kept: Vec<_> = rows.into_iter().filter(|&r| pred(r)).collect();
    debug!(predicate = name, before, after = kept.len(), "Applied filter");
    kept
}

fn language_matches(record: &ModelRecord, selection: &[String]) -> bool {
    match record.languages.as_deref() {
        Some(langs) => selection.iter().all(|lang| langs.contains(lang.as_str())),
        None => selection.is_empty(),
    }
}

fn open_weight_step<'a>(rows: Vec<&'a ModelRecord>, kinds: &[ModelKind]) -> Vec<&'a ModelRecord> {
    let open = kinds.contains(&ModelKind::OpenWeight);
    let commercial = kinds.contains(&ModelKind::Commercial);
    match (open, commercial) {
        (true, true) => rows,
        (true, false) => narrow(rows, "open_weight", |r| ModelKind::OpenWeight.matches(r)),
        (false, true) => narrow(rows, "open_weight", |r| ModelKind::Commercial.matches(r)),
        (false, false) => Vec::new(),
    }
}

/// Parse a month given as an English name or a number 1-12
fn parse_month(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(raw))
        .map(|i| i as u32 + 1)
}

fn first_of_month(year: &str, month: &str) -> Result<NaiveDate, String> {
    let y = year
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid year '{}': {}", year, e))?;
    let m = parse_month(month).ok_or_else(|| format!("invalid month '{}'", month))?;
    NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| format!("date out of range: {}-{}", y, m))
}

fn or_default(value: Option<&str>, default: String) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default,
    }
}

/// Date range bounds from the four optional controls
///
/// Missing start year is [`START_YEAR`], missing end year the current year,
/// missing months January / December. Bounds are first-of-month dates.
pub fn date_bounds(
    start_year: Option<&str>,
    start_month: Option<&str>,
    end_year: Option<&str>,
    end_month: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), String> {
    let start_year = or_default(start_year, START_YEAR.to_string());
    let end_year = or_default(end_year, Utc::now().year().to_string());
    let start_month = or_default(start_month, MONTHS[0].to_string());
    let end_month = or_default(end_month, MONTHS[11].to_string());

    let start = first_of_month(&start_year, &start_month)?;
    let end = first_of_month(&end_year, &end_month)?;
    Ok((start, end))
}

// TODO: a single malformed dropdown value disables date filtering entirely;
// raise with product whether it should narrow to nothing instead.
/// Keep rows whose temp date lies in the selected range (inclusive)
///
/// Malformed controls, or any row without a date, leave the rows
/// unfiltered by date.
pub fn filter_by_date<'a>(
    rows: Vec<&'a ModelRecord>,
    start_year: Option<&str>,
    start_month: Option<&str>,
    end_year: Option<&str>,
    end_month: Option<&str>,
) -> Vec<&'a ModelRecord> {
    if rows.is_empty() {
        return rows;
    }
    let (start, end) = match date_bounds(start_year, start_month, end_year, end_month) {
        Ok(bounds) => bounds,
        Err(e) => {
            warn!("Error processing dates: {}; date filter skipped", e);
            return rows;
        }
    };
    if rows.iter().any(|r| r.temp_date.is_none()) {
        warn!("Rows without a release date; date filter skipped");
        return rows;
    }
    narrow(rows, "date", |r| {
        r.temp_date.is_some_and(|d| d >= start && d <= end)
    })
}

/// Apply every predicate in the fixed order, returning full records sorted
/// by score (highest first)
pub fn filter_records(records: &[ModelRecord], params: &FilterParams) -> Vec<ModelRecord> {
    let mut rows: Vec<&ModelRecord> = records.iter().collect();

    rows = narrow(rows, "language", |r| language_matches(r, &params.languages));
    rows = narrow(rows, "parameters", |r| {
        in_range(r.dummy_parameters, params.parameters)
    });
    rows = narrow(rows, "input_price", |r| in_range(r.input_price, params.input_price));
    rows = narrow(rows, "output_price", |r| {
        in_range(r.output_price, params.output_price)
    });
    if !params.modalities.is_empty() {
        rows = narrow(rows, "modality", |r| {
            params.modalities.iter().any(|tag| tag.matches(r))
        });
    }
    rows = narrow(rows, "context", |r| {
        in_range(r.context_size as f64, params.context)
    });
    if !rows.is_empty() {
        rows = open_weight_step(rows, &params.model_kinds);
    }
    rows = narrow(rows, "license", |r| {
        params
            .licenses
            .iter()
            .any(|lic| r.license_name.contains(lic.as_str()))
    });
    rows = filter_by_date(
        rows,
        params.start_year.as_deref(),
        params.start_month.as_deref(),
        params.end_year.as_deref(),
        params.end_month.as_deref(),
    );

    let mut out: Vec<ModelRecord> = rows.into_iter().cloned().collect();
    sort_by_score(&mut out);
    out
}

/// Filter the canonical table and project to the display columns
pub fn filter(table: &CanonicalTable, params: &FilterParams) -> Vec<DisplayRow> {
    filter_records(table, params)
        .iter()
        .map(ModelRecord::to_display_row)
        .collect()
}
