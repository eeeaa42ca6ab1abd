//! Configuration module for the portal backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Path to the embedded document store database file
    pub db_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Tenant suffix for admin-store collection names
    pub tenant: String,
    /// Base URL of the admin-privileged document store
    pub admin_store_url: Option<String>,
    /// Service token for the admin-privileged document store
    pub admin_store_token: Option<String>,
    /// Base URL of the relational REST backend
    pub table_store_url: Option<String>,
    /// Service key for the relational REST backend
    pub table_store_key: Option<String>,
    /// Base URL of the IP geolocation lookup service
    pub geo_lookup_url: Option<String>,
    /// Caller IP that bypasses the geolocation gate
    pub trusted_ip: Option<String>,
    /// Country codes denied by the geolocation gate
    pub blocked_countries: Vec<String>,
    /// Resolved per-entity storage locations
    pub collections: Collections,
}

/// Storage location for each entity, resolved once so routes cannot drift.
#[derive(Debug, Clone)]
pub struct Collections {
    pub banners: String,
    pub categories: String,
    pub news: String,
    pub events: String,
    pub faqs: String,
    pub store_faqs: String,
    pub logos: String,
    pub regions: String,
    pub privacy_policies: String,
    pub email_settings: String,
}

impl Collections {
    /// Resolve all locations from the environment, falling back to the
    /// tenant-suffixed defaults for admin-store collections and plain names
    /// elsewhere.
    pub fn resolve(tenant: &str) -> Self {
        Self {
            banners: env_or("PORTAL_BANNERS_TABLE", "banners"),
            categories: env_or("PORTAL_CATEGORIES_TABLE", "categories"),
            news: env_or("PORTAL_NEWS_TABLE", "news"),
            events: env_or("PORTAL_EVENTS_COLLECTION", &format!("events-{}", tenant)),
            faqs: env_or("PORTAL_FAQS_COLLECTION", &format!("faqs-{}", tenant)),
            store_faqs: env_or(
                "PORTAL_STORE_FAQS_COLLECTION",
                &format!("storeFaqs-{}", tenant),
            ),
            logos: env_or("PORTAL_LOGOS_COLLECTION", &format!("logos-{}", tenant)),
            regions: env_or("PORTAL_REGIONS_COLLECTION", "regions"),
            privacy_policies: env_or("PORTAL_PRIVACY_POLICY_COLLECTION", "privacy-policies"),
            email_settings: env_or("PORTAL_EMAIL_SETTINGS_COLLECTION", "email-settings"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bind_addr = env_or("PORTAL_BIND_ADDR", "127.0.0.1:8080")
            .parse()
            .expect("Invalid PORTAL_BIND_ADDR format");

        let db_path = env_or("PORTAL_DB_PATH", "./data/portal.sqlite").into();
        let log_level = env_or("PORTAL_LOG_LEVEL", "info");
        let tenant = env_or("PORTAL_TENANT", "portal");

        let blocked_countries = env::var("PORTAL_BLOCKED_COUNTRIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        let collections = Collections::resolve(&tenant);

        Self {
            bind_addr,
            db_path,
            log_level,
            tenant,
            admin_store_url: env::var("PORTAL_ADMIN_STORE_URL").ok(),
            admin_store_token: env::var("PORTAL_ADMIN_STORE_TOKEN").ok(),
            table_store_url: env::var("PORTAL_TABLE_STORE_URL").ok(),
            table_store_key: env::var("PORTAL_TABLE_STORE_KEY").ok(),
            geo_lookup_url: env::var("PORTAL_GEO_LOOKUP_URL").ok(),
            trusted_ip: env::var("PORTAL_TRUSTED_IP").ok(),
            blocked_countries,
            collections,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
