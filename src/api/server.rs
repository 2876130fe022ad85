//! HTTP API server

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{gate, AccessPolicy, Authenticator};
use crate::bootstrap;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::{self, SharedStore};

use super::{paths, routes};

/// Application state shared across handlers. Nothing in here is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: SharedStore,
    pub auth: Authenticator,
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    pub fn new(config: Config, store: SharedStore) -> Result<Self> {
        let auth = Authenticator::new(store.clone(), &config.auth)?;
        let policy = AccessPolicy::from_config(config.auth.protect_tracking_routes);

        Ok(Self {
            config: Arc::new(config),
            store,
            auth,
            policy: Arc::new(policy),
        })
    }
}

/// Validate config, open storage and run migrations. Any failure here
/// should abort the process.
pub async fn prepare_state(config: Config) -> Result<AppState> {
    config.validate()?;

    let store = store::open(&config.storage).await?;
    let state = AppState::new(config, store)?;

    let report = bootstrap::migrate(state.store.as_ref(), &state.auth, &state.config).await?;
    tracing::debug!("Startup migration: {:?}", report);

    Ok(state)
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = prepare_state(config).await?;
    let app = create_router(state)?;

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| Error::Config(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config.server.cors_origins)?;

    Ok(Router::new()
        .route(paths::HEALTH, get(routes::health))
        // Auth routes
        .route(paths::REGISTER, post(routes::register))
        .route(paths::LOGIN, post(routes::login))
        .route(paths::AUTH_CREATE, post(routes::create_user))
        // Admin routes
        .route(
            paths::COMPANIES,
            get(routes::list_companies).post(routes::create_company),
        )
        .route(
            paths::COMPANY,
            put(routes::update_company).delete(routes::delete_company),
        )
        .route(
            paths::METHODS,
            get(routes::list_methods).post(routes::create_method),
        )
        .route(
            paths::METHOD,
            put(routes::update_method).delete(routes::delete_method),
        )
        // User routes
        .route(paths::DASHBOARD, get(routes::dashboard))
        .route(paths::COMMUNICATION, post(routes::record_communication))
        .route(paths::NOTIFICATIONS, get(routes::notifications))
        .route(paths::CALENDAR, get(routes::calendar))
        // Middleware
        .route_layer(middleware::from_fn_with_state(state.clone(), gate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}
