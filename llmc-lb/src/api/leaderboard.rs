//! Leaderboard table and filtering
//!
//! Every request recomputes from the full canonical table; nothing is
//! carried over between requests.

use axum::{extract::State, Json};
use llmc_common::model::DISPLAY_COLUMNS;
use llmc_common::{filter, DisplayRow, Facets, FilterParams, ModalityTag, ModelKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;

/// Filter request; omitted fields take their widest setting
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    pub languages: Option<Vec<String>>,
    pub parameters: Option<[f64; 2]>,
    pub input_price: Option<[f64; 2]>,
    pub output_price: Option<[f64; 2]>,
    pub modalities: Option<Vec<ModalityTag>>,
    pub context: Option<[f64; 2]>,
    pub model_kinds: Option<Vec<ModelKind>>,
    pub start_year: Option<String>,
    pub start_month: Option<String>,
    pub end_year: Option<String>,
    pub end_month: Option<String>,
    pub licenses: Option<Vec<String>>,
}

impl FilterRequest {
    /// Resolve against the control defaults
    pub fn into_params(self, facets: &Facets) -> FilterParams {
        let defaults = facets.default_params();
        FilterParams {
            languages: self.languages.unwrap_or(defaults.languages),
            parameters: self.parameters.unwrap_or(defaults.parameters),
            input_price: self.input_price.unwrap_or(defaults.input_price),
            output_price: self.output_price.unwrap_or(defaults.output_price),
            modalities: self.modalities.unwrap_or(defaults.modalities),
            context: self.context.unwrap_or(defaults.context),
            model_kinds: self.model_kinds.unwrap_or(defaults.model_kinds),
            start_year: self.start_year,
            start_month: self.start_month,
            end_year: self.end_year,
            end_month: self.end_month,
            licenses: self.licenses.unwrap_or(defaults.licenses),
        }
    }
}

/// Leaderboard response with display columns and rows
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub rows: Vec<DisplayRow>,
}

impl LeaderboardResponse {
    fn new(rows: Vec<DisplayRow>) -> Self {
        Self {
            total_rows: rows.len(),
            columns: DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }
}

/// GET /api/leaderboard
///
/// Unfiltered leaderboard, highest score first.
pub async fn get_leaderboard(State(state): State<AppState>) -> Json<LeaderboardResponse> {
    let rows = state.table.iter().map(|r| r.to_display_row()).collect();
    Json(LeaderboardResponse::new(rows))
}

/// POST /api/leaderboard/filter
///
/// Applies the filter engine with the requested control values.
pub async fn filter_leaderboard(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> Json<LeaderboardResponse> {
    let params = request.into_params(&state.facets);
    let rows = filter(&state.table, &params);
    debug!(rows = rows.len(), "Filtered leaderboard");
    Json(LeaderboardResponse::new(rows))
}
