use serde::{Deserialize, Serialize};
use crate::models::domain::{ServiceCategory, UrgencyLevel};

/// Response for the detect endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectProblemResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "aiSuggestedCategory")]
    pub ai_suggested_category: ServiceCategory,
    pub confidence: f64,
    #[serde(rename = "keywordsMatched")]
    pub keywords_matched: Vec<String>,
    #[serde(rename = "urgencyLevel")]
    pub urgency_level: UrgencyLevel,
    #[serde(rename = "finalCategory")]
    pub final_category: ServiceCategory,
    #[serde(rename = "needsClarification")]
    pub needs_clarification: bool,
    #[serde(rename = "nextSteps")]
    pub next_steps: Vec<String>,
    #[serde(rename = "followUpQuestions")]
    pub follow_up_questions: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub providers: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
