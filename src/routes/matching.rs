use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::GeoPoint;
use crate::models::{ErrorResponse, FindProvidersRequest, HealthResponse, MatchFilters};
use crate::routes::AppState;

/// Configure all matching-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching/find-providers", web::post().to(find_providers));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: state.providers.count().await,
        timestamp: chrono::Utc::now(),
    })
}

/// Find providers endpoint
///
/// POST /api/v1/matching/find-providers
///
/// Request body:
/// ```json
/// {
///   "category": "plumbing",
///   "latitude": 39.78,
///   "longitude": -89.65,
///   "maxDistance": 50.0,
///   "minRating": 4.0,
///   "maxRate": 120.0,
///   "availability": "same_day"
/// }
/// ```
async fn find_providers(
    state: web::Data<AppState>,
    req: web::Json<FindProvidersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_providers request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if state.seed_samples && state.providers.ensure_seeded().await > 0 {
        tracing::info!("Provider store was empty, seeded sample providers");
    }

    let requester = GeoPoint::from_parts(req.latitude, req.longitude);
    let filters = MatchFilters {
        max_distance: req.max_distance.unwrap_or(state.default_max_distance),
        min_rating: req.min_rating.unwrap_or(0.0),
        max_rate: req.max_rate,
        availability: req.availability.clone(),
    };

    let candidates = state.providers.all().await;

    tracing::debug!("Found {} candidates for {}", candidates.len(), req.category);

    let providers = state
        .matcher
        .find_providers(requester, &req.category, &filters, &candidates);

    tracing::info!(
        "Returning {} providers for {} (from {} candidates, requester located: {})",
        providers.len(),
        req.category,
        candidates.len(),
        requester.is_some()
    );

    HttpResponse::Ok().json(providers)
}
