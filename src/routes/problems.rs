use actix_web::{web, HttpResponse, Responder};
use std::str::FromStr;
use validator::Validate;

use crate::core::{follow_up_questions, next_steps};
use crate::models::{
    DetectProblemRequest, DetectProblemResponse, ErrorResponse, ProblemSession, ServiceCategory,
};
use crate::routes::AppState;
use crate::services::SessionError;

/// Description used when the client only picked a category
const DEFAULT_DESCRIPTION: &str = "General service request";

/// Configure all problem-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/problems/detect", web::post().to(detect_problem))
        .route("/problems/categories", web::get().to(list_categories))
        .route("/problems/session/{session_id}", web::get().to(get_session));
}

/// Detect problem endpoint
///
/// POST /api/v1/problems/detect
///
/// Request body:
/// ```json
/// {
///   "description": "string",
///   "selectedCategory": "plumbing",
///   "userId": "string"
/// }
/// ```
async fn detect_problem(
    state: web::Data<AppState>,
    req: web::Json<DetectProblemRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for detect request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let selected = match req.selected_category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match ServiceCategory::from_str(raw) {
            Ok(category) => Some(category),
            Err(_) => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid category".to_string(),
                    message: format!("Unknown service category: {}", raw),
                    status_code: 400,
                });
            }
        },
    };

    let description = match req.description.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => DEFAULT_DESCRIPTION,
    };

    let detection = state.detector.detect(description);
    let ai_category = detection.top_category();
    let final_category = selected.unwrap_or(ai_category);
    let keywords_matched = detection
        .top()
        .map(|s| s.keywords_found.clone())
        .unwrap_or_default();

    let session = ProblemSession {
        problem_description: req.description.clone().unwrap_or_default(),
        ai_suggested_category: ai_category,
        final_category,
        confidence: detection.top_confidence(),
        urgency_level: detection.urgency_level,
        user_id: req.user_id.clone(),
        status: "ready_for_matching".to_string(),
        created_at: chrono::Utc::now(),
    };

    let session_id = match state.sessions.create(&session).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to store problem session: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to store session".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::info!(
        "Detected {} ({:.2}) with {} urgency, final category {}, session {}",
        ai_category,
        session.confidence,
        detection.urgency_level,
        final_category,
        session_id
    );

    HttpResponse::Ok().json(DetectProblemResponse {
        session_id,
        ai_suggested_category: ai_category,
        confidence: session.confidence,
        keywords_matched,
        urgency_level: detection.urgency_level,
        final_category,
        needs_clarification: detection.needs_clarification,
        next_steps: next_steps(detection.urgency_level),
        follow_up_questions: follow_up_questions(final_category),
    })
}

/// List category groups
///
/// GET /api/v1/problems/categories
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.detector.taxonomy().list_groups())
}

/// Get a stored problem session
///
/// GET /api/v1/problems/session/{session_id}
async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let session_id = path.into_inner();

    match state.sessions.get(&session_id).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(SessionError::NotFound(_)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Session not found".to_string(),
            message: "Session not found or expired".to_string(),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to read session {}: {}", session_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Invalid session data".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
