use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use wonder_rank::config::Settings;
use wonder_rank::core::{RankingEngine, SearchMatcher};
use wonder_rank::routes::{self, AppState};
use wonder_rank::services::{BackendClient, ContextCache};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&settings.logging.level))
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Wonder Rank service...");
    info!("Configuration loaded successfully");

    let backend = BackendClient::new(
        settings.backend.base_url.clone(),
        Duration::from_secs(settings.backend.timeout_secs),
    )
    .map_err(|e| {
        error!("Failed to build backend client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("Backend client initialized ({})", backend.base_url());

    let contexts = ContextCache::new(
        settings.cache.context_cache_size,
        settings.cache.context_ttl_secs,
    );

    info!(
        "Context cache initialized ({} entries, TTL: {}s)",
        settings.cache.context_cache_size, settings.cache.context_ttl_secs
    );

    let weights = settings.ranking_weights();
    let ranking = RankingEngine::new(weights);
    info!("Ranking engine initialized with weights: {:?}", weights);

    let search_config = settings.search_config();
    info!("Search generic keyword: {:?}", search_config.generic_keyword);
    let search = SearchMatcher::new(search_config);

    let app_state = AppState {
        backend: Arc::new(backend),
        contexts: Arc::new(contexts),
        ranking,
        search,
        public_posts_limit: settings.backend.public_posts_limit,
        search_limit: settings.backend.search_limit,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
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
