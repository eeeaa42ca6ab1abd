//! Portal Content Backend
//!
//! CRUD backend for the portal brochure site, serving banners, categories,
//! news, events, FAQs, logos, regions, and site-wide settings over three
//! storage backends behind one record-store capability.

mod api;
mod cache;
mod config;
mod errors;
mod geo;
mod models;
mod store;

use std::sync::Arc;

use axum::{middleware, routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cache::Caches;
use config::Config;
use geo::GeoGate;
use store::{AdminDocStore, DocumentStore, Stores, TableStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub stores: Arc<Stores>,
    pub caches: Arc<Caches>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Portal Content Backend");
    tracing::info!("Document store path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Tenant: {}", config.tenant);

    if config.admin_store_url.is_none() || config.admin_store_token.is_none() {
        tracing::warn!(
            "Admin document store not configured (PORTAL_ADMIN_STORE_URL / PORTAL_ADMIN_STORE_TOKEN). Admin-backed routes will fail."
        );
    }
    if config.table_store_url.is_none() || config.table_store_key.is_none() {
        tracing::warn!(
            "Table store not configured (PORTAL_TABLE_STORE_URL / PORTAL_TABLE_STORE_KEY). Table-backed routes will fail."
        );
    }
    if config.geo_lookup_url.is_none() {
        tracing::info!("Geolocation gate disabled (PORTAL_GEO_LOOKUP_URL not set)");
    }

    // Create application state; storage clients connect lazily on first use
    let state = build_state(config);

    // Build router
    let bind_addr = state.config.bind_addr;
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Construct the process-wide state from configuration.
pub fn build_state(config: Config) -> AppState {
    let stores = Stores {
        document: Arc::new(DocumentStore::new(config.db_path.clone())),
        admin: Arc::new(AdminDocStore::new(
            config.admin_store_url.clone(),
            config.admin_store_token.clone(),
        )),
        table: Arc::new(TableStore::new(
            config.table_store_url.clone(),
            config.table_store_key.clone(),
        )),
    };

    AppState {
        stores: Arc::new(stores),
        caches: Arc::new(Caches::new()),
        config: Arc::new(config),
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Geolocation gate in front of all API routes
    let gate = Arc::new(GeoGate::new(
        state.config.geo_lookup_url.clone(),
        state.config.trusted_ip.clone(),
        state.config.blocked_countries.clone(),
    ));

    // API routes
    let api_routes = Router::new()
        // Banners (table backend)
        .route("/banners/create", post(api::create_banner))
        .route("/banners/get", post(api::get_banner))
        .route("/banners/update", post(api::update_banner))
        .route("/banners/delete", post(api::delete_banner))
        // Categories (table backend)
        .route("/categories/create", post(api::create_category))
        .route("/categories/get", post(api::get_category))
        .route("/categories/update", post(api::update_category))
        .route("/categories/delete", post(api::delete_category))
        // News (table backend)
        .route("/news/create", post(api::create_news))
        .route("/news/get", post(api::get_news))
        .route("/news/update", post(api::update_news))
        .route("/news/delete", post(api::delete_news))
        // Events (admin backend)
        .route("/events/create", post(api::create_event))
        .route("/events/get", post(api::get_event))
        .route("/events/update", post(api::update_event))
        .route("/events/delete", post(api::delete_event))
        // FAQs (admin backend)
        .route("/faqs/create", post(api::create_faq))
        .route("/faqs/get", post(api::get_faq))
        .route("/faqs/update", post(api::update_faq))
        .route("/faqs/delete", post(api::delete_faq))
        // Store FAQs (admin backend)
        .route("/store-faqs/create", post(api::create_store_faq))
        .route("/store-faqs/get", post(api::get_store_faq))
        .route("/store-faqs/update", post(api::update_store_faq))
        .route("/store-faqs/delete", post(api::delete_store_faq))
        // Logos (admin backend)
        .route("/logos/create", post(api::create_logo))
        .route("/logos/get", post(api::get_logo))
        .route("/logos/update", post(api::update_logo))
        .route("/logos/delete", post(api::delete_logo))
        // Regions (document backend)
        .route("/regions/create", post(api::create_region))
        .route("/regions/get", post(api::get_region))
        .route("/regions/update", post(api::update_region))
        .route("/regions/delete", post(api::delete_region))
        // Privacy policy (document backend, key-validated cache)
        .route("/privacy-policy/create", post(api::create_privacy_policy))
        .route("/privacy-policy/get", post(api::get_privacy_policy))
        .route("/privacy-policy/update", post(api::update_privacy_policy))
        .route("/privacy-policy/delete", post(api::delete_privacy_policy))
        // Email settings (document backend, time-boxed cache)
        .route("/email-settings/create", post(api::create_email_settings))
        .route("/email-settings/get", post(api::get_email_settings))
        .route("/email-settings/update", post(api::update_email_settings))
        .route("/email-settings/delete", post(api::delete_email_settings))
        // Apply the geolocation gate
        .layer(middleware::from_fn(move |req, next| {
            geo::geo_gate_layer(gate.clone(), req, next)
        }));

    // Health check and blocked page live outside the gate
    let open_routes = Router::new()
        .route("/health", get(health_check))
        .route(geo::BLOCKED_PATH, get(blocked_page));

    Router::new()
        .nest("/api", api_routes)
        .merge(open_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Landing page for denylisted callers.
async fn blocked_page() -> &'static str {
    "This service is not available in your region."
}

#[cfg(test)]
mod tests;
