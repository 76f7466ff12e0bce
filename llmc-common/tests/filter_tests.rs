//! Integration tests for the filter engine
//!
//! Tests cover:
//! - Idempotence and order-independence of the predicate groups
//! - Commercial parameter sentinel vs. parameter ranges
//! - Open-weight / commercial selection semantics
//! - Modality union semantics
//! - Date defaults and malformed date fallback
//! - License substring matching
//! - Empty tables passing through every predicate

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Utc};
use llmc_common::model::DISPLAY_COLUMNS;
use llmc_common::{
    filter, filter_records, CanonicalTable, Facets, FilterParams, ModalityTag, ModelKind,
    ModelRecord,
};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn base(name: &str, score: f64) -> ModelRecord {
    ModelRecord {
        model_name: name.to_string(),
        score: Some(score),
        latency: Some(1.2),
        parameters: Some(7.0),
        dummy_parameters: 7.0,
        release_date: date(2024, 2, 1),
        open_weight: true,
        languages: Some("English".to_string()),
        context_size: 8,
        license_name: "Apache 2.0".to_string(),
        license_url: "https://www.apache.org/licenses/LICENSE-2.0".to_string(),
        single_image: false,
        multiple_images: false,
        audio: false,
        video: false,
        input_price: 0.0,
        output_price: 0.0,
        license: "[Apache 2.0](https://www.apache.org/licenses/LICENSE-2.0)".to_string(),
        temp_date: date(2024, 2, 1),
    }
}

/// A small, varied table
fn fixture() -> CanonicalTable {
    let mut llama = base("llama-3-70b", 52.0);
    llama.parameters = Some(70.0);
    llama.dummy_parameters = 70.0;
    llama.languages = Some("English, German, French".to_string());
    llama.context_size = 128;
    llama.license_name = "Llama 3 Community License".to_string();
    llama.release_date = date(2024, 4, 1);
    llama.temp_date = llama.release_date;

    let mut mistral = base("mistral-7b", 21.0);
    mistral.license_name = "MIT License".to_string();
    mistral.languages = Some("English, French".to_string());
    mistral.release_date = date(2023, 9, 1);
    mistral.temp_date = mistral.release_date;

    let mut gpt = base("gpt-4o", 71.0);
    gpt.open_weight = false;
    gpt.parameters = None;
    gpt.dummy_parameters = 70.0;
    gpt.single_image = true;
    gpt.multiple_images = true;
    gpt.input_price = 5.0;
    gpt.output_price = 15.0;
    gpt.context_size = 128;
    gpt.license_name = "Proprietary".to_string();
    gpt.languages = Some("English, German, French, Japanese".to_string());

    let mut gemini = base("gemini-1.5-pro", 64.0);
    gemini.open_weight = false;
    gemini.parameters = None;
    gemini.dummy_parameters = 70.0;
    gemini.audio = true;
    gemini.video = true;
    gemini.input_price = 3.5;
    gemini.output_price = 10.5;
    gemini.context_size = 1000;
    gemini.license_name = "Proprietary".to_string();
    gemini.release_date = date(2024, 5, 1);
    gemini.temp_date = gemini.release_date;

    CanonicalTable::from_records(vec![llama, mistral, gpt, gemini])
}

fn open_params(table: &CanonicalTable) -> FilterParams {
    Facets::from_records(table).default_params()
}

fn names(records: &[ModelRecord]) -> BTreeSet<String> {
    records.iter().map(|r| r.model_name.clone()).collect()
}

#[test]
fn test_default_params_keep_whole_table() {
    let table = fixture();
    let out = filter_records(&table, &open_params(&table));
    assert_eq!(out.len(), table.len());
}

#[test]
fn test_result_sorted_by_score_and_projected() {
    let table = fixture();
    let rows = filter(&table, &open_params(&table));
    let scores: Vec<f64> = rows.iter().filter_map(|r| r.score).collect();
    assert_eq!(scores, vec![71.0, 64.0, 52.0, 21.0]);

    let json = serde_json::to_value(&rows[0]).unwrap();
    let keys: BTreeSet<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = DISPLAY_COLUMNS.into_iter().collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_filtering_is_idempotent() {
    let table = fixture();
    let mut params = open_params(&table);
    params.languages = vec!["French".to_string()];
    params.input_price = [0.0, 4.0];

    let once = filter_records(&table, &params);
    let twice = filter_records(&once, &params);
    assert_eq!(once, twice);
}

#[test]
fn test_predicate_groups_are_order_independent() {
    let table = fixture();
    let open = open_params(&table);

    // Every group on its own, each removing at least one row
    let mut by_language = open.clone();
    by_language.languages = vec!["French".to_string()];
    let mut by_parameters = open.clone();
    by_parameters.parameters = [10.0, 70.0];
    let mut by_price = open.clone();
    by_price.input_price = [0.0, 4.0];
    by_price.output_price = [0.0, 12.0];
    let mut by_modality = open.clone();
    by_modality.modalities = vec![ModalityTag::TextOnly, ModalityTag::Video];
    let mut by_context = open.clone();
    by_context.context = [64.0, 500.0];
    let mut by_kind = open.clone();
    by_kind.model_kinds = vec![ModelKind::OpenWeight];
    let mut by_license = open.clone();
    by_license.licenses = vec!["Llama".to_string(), "Proprietary".to_string()];
    let mut by_date = open.clone();
    by_date.start_year = Some("2024".to_string());
    by_date.start_month = Some("March".to_string());

    let singles = [
        &by_language,
        &by_parameters,
        &by_price,
        &by_modality,
        &by_context,
        &by_kind,
        &by_license,
        &by_date,
    ];
    for p in singles {
        assert!(filter_records(&table, p).len() < table.len(), "{:?}", p);
    }

    let combined = FilterParams {
        languages: by_language.languages.clone(),
        parameters: by_parameters.parameters,
        input_price: by_price.input_price,
        output_price: by_price.output_price,
        modalities: by_modality.modalities.clone(),
        context: by_context.context,
        model_kinds: by_kind.model_kinds.clone(),
        start_year: by_date.start_year.clone(),
        start_month: by_date.start_month.clone(),
        end_year: None,
        end_month: None,
        licenses: by_license.licenses.clone(),
    };

    let intersection = singles
        .iter()
        .map(|p| names(&filter_records(&table, p)))
        .reduce(|a, b| a.intersection(&b).cloned().collect())
        .unwrap();

    assert_eq!(names(&filter_records(&table, &combined)), intersection);
    assert_eq!(intersection, BTreeSet::from(["llama-3-70b".to_string()]));
}

#[test]
fn test_commercial_models_survive_any_low_bound_under_sentinel() {
    let table = fixture();
    for low in [0.0, 10.0, 50.0, 70.0] {
        let mut params = open_params(&table);
        params.parameters = [low, 70.0];
        let out = filter_records(&table, &params);
        assert!(out.iter().any(|r| r.model_name == "gpt-4o"), "low bound {low}");
        assert!(out.iter().any(|r| r.model_name == "gemini-1.5-pro"), "low bound {low}");
    }
}

#[test]
fn test_sentinel_equals_max_open_weight_parameters() {
    let table = fixture();
    let max_open = table
        .iter()
        .filter(|r| r.open_weight)
        .filter_map(|r| r.parameters)
        .fold(f64::MIN, f64::max);
    for r in table.iter().filter(|r| !r.open_weight) {
        assert_eq!(r.dummy_parameters, max_open);
    }
}

#[test]
fn test_neither_open_nor_commercial_selected_is_empty() {
    let table = fixture();
    let mut params = open_params(&table);
    params.model_kinds.clear();
    assert!(filter(&table, &params).is_empty());
}

#[test]
fn test_both_kinds_selected_is_no_op() {
    let table = fixture();
    let mut params = open_params(&table);
    params.model_kinds = vec![ModelKind::Commercial, ModelKind::OpenWeight];
    assert_eq!(filter_records(&table, &params).len(), table.len());
}

#[test]
fn test_single_kind_selection() {
    let table = fixture();
    let mut params = open_params(&table);

    params.model_kinds = vec![ModelKind::OpenWeight];
    let open = filter_records(&table, &params);
    assert!(open.iter().all(|r| r.open_weight));
    assert_eq!(open.len(), 2);

    params.model_kinds = vec![ModelKind::Commercial];
    let commercial = filter_records(&table, &params);
    assert!(commercial.iter().all(|r| !r.open_weight));
    assert_eq!(commercial.len(), 2);
}

#[test]
fn test_text_only_selection_has_no_modality_flags() {
    let table = fixture();
    let mut params = open_params(&table);
    params.modalities = vec![ModalityTag::TextOnly];
    let out = filter_records(&table, &params);
    assert!(!out.is_empty());
    for r in &out {
        assert!(!r.single_image && !r.multiple_images && !r.audio && !r.video);
    }
}

#[test]
fn test_modality_tags_union() {
    let table = fixture();
    let mut params = open_params(&table);
    params.modalities = vec![ModalityTag::SingleImage, ModalityTag::Audio];
    let out = names(&filter_records(&table, &params));
    assert_eq!(
        out,
        BTreeSet::from(["gpt-4o".to_string(), "gemini-1.5-pro".to_string()])
    );
}

#[test]
fn test_license_substring_match() {
    let table = fixture();
    let mut params = open_params(&table);
    params.licenses = vec!["MIT".to_string()];
    let out = filter_records(&table, &params);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].license_name, "MIT License");
}

#[test]
fn test_language_selection_requires_all() {
    let table = fixture();
    let mut params = open_params(&table);
    params.languages = vec!["German".to_string(), "Japanese".to_string()];
    let out = filter_records(&table, &params);
    assert_eq!(names(&out), BTreeSet::from(["gpt-4o".to_string()]));
}

#[test]
fn test_context_range_inclusive() {
    let table = fixture();
    let mut params = open_params(&table);
    params.context = [128.0, 128.0];
    let out = names(&filter_records(&table, &params));
    assert_eq!(
        out,
        BTreeSet::from(["gpt-4o".to_string(), "llama-3-70b".to_string()])
    );
}

#[test]
fn test_date_defaults_span_epoch_to_current_year() {
    let mut old = base("old", 10.0);
    old.temp_date = date(2019, 12, 31);
    let mut epoch = base("epoch", 20.0);
    epoch.temp_date = date(2020, 1, 1);
    let mut recent = base("recent", 30.0);
    recent.temp_date = date(Utc::now().year(), 1, 1);
    let table = CanonicalTable::from_records(vec![old, epoch, recent]);

    let out = names(&filter_records(&table, &open_params(&table)));
    assert_eq!(
        out,
        BTreeSet::from(["epoch".to_string(), "recent".to_string()])
    );
}

#[test]
fn test_malformed_year_leaves_dates_unfiltered() {
    let table = fixture();
    let mut params = open_params(&table);
    params.start_year = Some("not-a-year".to_string());
    // end bound that would otherwise drop everything released after 2023-09
    params.end_year = Some("2023".to_string());
    params.end_month = Some("September".to_string());

    let out = filter_records(&table, &params);
    assert_eq!(out.len(), table.len());
}

#[test]
fn test_date_range_narrows() {
    let table = fixture();
    let mut params = open_params(&table);
    params.start_year = Some("2024".to_string());
    params.start_month = Some("March".to_string());
    params.end_year = Some("2024".to_string());
    params.end_month = Some("May".to_string());
    let out = names(&filter_records(&table, &params));
    assert_eq!(
        out,
        BTreeSet::from(["llama-3-70b".to_string(), "gemini-1.5-pro".to_string()])
    );
}

#[test]
fn test_empty_table_passes_every_predicate() {
    let empty = CanonicalTable::from_records(Vec::new());
    let mut params = open_params(&fixture());
    params.start_year = Some("garbage".to_string());
    params.modalities = vec![ModalityTag::Video];
    assert!(filter(&empty, &params).is_empty());
}

#[test]
fn test_short_circuit_matches_unconditional_result() {
    // The language predicate empties the set first; later predicates that
    // would also reject everything must not change the (empty) result.
    let table = fixture();
    let mut params = open_params(&table);
    params.languages = vec!["Klingon".to_string()];
    let early_empty = filter_records(&table, &params);

    params.model_kinds.clear();
    params.licenses.clear();
    let also_empty = filter_records(&table, &params);

    assert!(early_empty.is_empty());
    assert_eq!(early_empty, also_empty);
}

#[test]
fn test_filter_does_not_mutate_table() {
    let table = fixture();
    let before: Vec<ModelRecord> = table.to_vec();
    let mut params = open_params(&table);
    params.model_kinds = vec![ModelKind::Commercial];
    let _ = filter(&table, &params);
    assert_eq!(table.to_vec(), before);
}
