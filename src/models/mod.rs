// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CategorySuggestion, MatchFilters, MatchedProvider, ProblemDetectionResult, ProblemSession,
    ProviderRecord, ServiceCategory, UrgencyLevel,
};
pub use requests::{DetectProblemRequest, FindProvidersRequest};
pub use responses::{DetectProblemResponse, ErrorResponse, HealthResponse};
