//! # LLM Calculator Common Library
//!
//! Shared code for the leaderboard service including:
//! - Canonical model record and display types
//! - Source normalization of raw benchmark, registry and pricing values
//! - Merge engine producing the canonical table
//! - Filter engine over the canonical table
//! - Filter-control bounds (facets)
//! - CSV cache of the canonical table
//! - Configuration loading

pub mod cache;
pub mod config;
pub mod error;
pub mod facets;
pub mod filter;
pub mod languages;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod sources;

pub use error::{Error, Result};
pub use facets::Facets;
pub use filter::{filter, filter_records, FilterParams};
pub use merge::{merge_sources, CanonicalTable};
pub use model::{DisplayRow, ModalityTag, ModelKind, ModelRecord};
pub use sources::RawSources;
