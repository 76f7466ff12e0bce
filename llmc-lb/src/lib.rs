//! llmc-lb library - Leaderboard service
//!
//! Builds the canonical table once at startup and serves the filter
//! engine over HTTP.

use std::sync::Arc;

use axum::Router;
use llmc_common::{CanonicalTable, Facets};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod fetch;
pub mod startup;

/// Application state shared across HTTP handlers
///
/// Built once; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    /// Canonical table (read-only)
    pub table: CanonicalTable,
    /// Filter-control domains derived from the table
    pub facets: Arc<Facets>,
}

impl AppState {
    /// Create new application state
    pub fn new(table: CanonicalTable) -> Self {
        let facets = Arc::new(Facets::from_records(&table));
        Self { table, facets }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/facets", get(api::get_facets))
        .route("/api/leaderboard", get(api::get_leaderboard))
        .route("/api/leaderboard/filter", post(api::filter_leaderboard))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
