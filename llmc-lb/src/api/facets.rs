//! Filter-control domains

use axum::{extract::State, Json};
use llmc_common::Facets;

use crate::AppState;

/// GET /api/facets
///
/// Choices and bounds for every filter control.
pub async fn get_facets(State(state): State<AppState>) -> Json<Facets> {
    Json(state.facets.as_ref().clone())
}
