//! HTTP API handlers for llmc-lb

pub mod facets;
pub mod health;
pub mod leaderboard;

pub use facets::get_facets;
pub use health::health_routes;
pub use leaderboard::{filter_leaderboard, get_leaderboard};
