use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to classify a problem description
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DetectProblemRequest {
    #[validate(length(max = 5000))]
    #[serde(default)]
    pub description: Option<String>,
    /// Category chosen by the user, overriding the detected one
    #[serde(alias = "selected_category", rename = "selectedCategory", default)]
    pub selected_category: Option<String>,
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Request to find providers near the requester
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindProvidersRequest {
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_distance", rename = "maxDistance", default)]
    pub max_distance: Option<f64>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(alias = "min_rating", rename = "minRating", default)]
    pub min_rating: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_rate", rename = "maxRate", default)]
    pub max_rate: Option<f64>,
    #[serde(default)]
    pub availability: Option<String>,
}
