// Route exports
pub mod matching;
pub mod problems;

use actix_web::web;
use std::sync::Arc;

use crate::core::{ProblemDetector, ProviderMatcher};
use crate::services::{ProviderStore, SessionStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<ProblemDetector>,
    pub matcher: ProviderMatcher,
    pub providers: Arc<ProviderStore>,
    pub sessions: Arc<SessionStore>,
    pub default_max_distance: f64,
    pub seed_samples: bool,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(problems::configure)
            .configure(matching::configure),
    );
}
