// Core algorithm exports
pub mod detector;
pub mod distance;
pub mod filters;
pub mod guidance;
pub mod matcher;
pub mod taxonomy;
pub mod urgency;

pub use detector::{CategoryScore, DetectorSettings, ProblemDetector};
pub use distance::{distance_between, distance_miles, haversine_miles, Distance, GeoPoint};
pub use filters::is_eligible;
pub use guidance::{follow_up_questions, next_steps};
pub use matcher::ProviderMatcher;
pub use taxonomy::{CategoryGroup, CategoryKeywordProfile, Taxonomy, TaxonomyError};
pub use urgency::classify_urgency;
