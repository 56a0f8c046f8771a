use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use homematch::config::Settings;
use homematch::core::{DetectorSettings, ProblemDetector, ProviderMatcher, Taxonomy};
use homematch::routes::{self, AppState};
use homematch::services::{ProviderStore, SessionStore};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path extraction errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    // Initialize logging; LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting HomeMatch service...");

    // Build the taxonomy once; everything shares it read-only
    let taxonomy = match &settings.taxonomy.path {
        Some(path) => Taxonomy::from_file(path).unwrap_or_else(|e| {
            error!("Failed to load taxonomy from {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => Taxonomy::home_services(),
    };

    info!("Taxonomy loaded with {} categories", taxonomy.profiles().len());

    let detector_settings = DetectorSettings::from(&settings.detection);
    let detector = ProblemDetector::new(Arc::new(taxonomy), detector_settings)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    info!("Detector initialized with settings: {:?}", detector_settings);

    // Initialize the provider store
    let providers = match &settings.providers.seed_file {
        Some(path) => match ProviderStore::load_file(path) {
            Ok(records) => {
                info!("Loaded {} providers from {}", records.len(), path.display());
                ProviderStore::with_providers(records)
            }
            Err(e) => {
                error!("Failed to load providers from {}: {}", path.display(), e);
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
            }
        },
        None => ProviderStore::new(),
    };

    let sessions = SessionStore::new(settings.session.capacity, settings.session.ttl_secs);

    info!(
        "Session store initialized (capacity: {}, TTL: {}s)",
        settings.session.capacity, settings.session.ttl_secs
    );

    // Build application state
    let app_state = AppState {
        detector: Arc::new(detector),
        matcher: ProviderMatcher::new(),
        providers: Arc::new(providers),
        sessions: Arc::new(sessions),
        default_max_distance: settings.matching.default_max_distance,
        seed_samples: settings.providers.seed_samples,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
