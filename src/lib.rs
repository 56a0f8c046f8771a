//! HomeMatch - problem detection and provider matching for household services
//!
//! This library turns a free-text problem description into ranked service
//! category suggestions with an urgency level, and ranks service providers
//! for a category by distance from the requester.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{distance_between, distance_miles, haversine_miles, Distance, GeoPoint},
    DetectorSettings, ProblemDetector, ProviderMatcher, Taxonomy,
};
pub use crate::models::{
    CategorySuggestion, MatchFilters, MatchedProvider, ProblemDetectionResult, ProviderRecord,
    ServiceCategory, UrgencyLevel,
};
