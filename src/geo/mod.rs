//! Geolocation request gate.
//!
//! Resolves the caller's country through an external lookup service and
//! redirects denylisted countries to the blocked page before any route runs.
//! A configured trusted IP always passes, and any lookup failure fails open.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

/// Path denylisted callers are redirected to.
pub const BLOCKED_PATH: &str = "/blocked";

pub struct GeoGate {
    lookup_url: Option<String>,
    trusted_ip: Option<String>,
    blocked_countries: Vec<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoLookup {
    country_code: Option<String>,
}

impl GeoGate {
    pub fn new(
        lookup_url: Option<String>,
        trusted_ip: Option<String>,
        blocked_countries: Vec<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap_or_default();

        Self {
            lookup_url: lookup_url.map(|u| u.trim_end_matches('/').to_string()),
            trusted_ip,
            blocked_countries,
            client,
        }
    }

    /// Decide whether a request from `ip` may pass.
    pub async fn allows(&self, ip: Option<&str>) -> bool {
        let Some(ip) = ip else {
            return true;
        };
        if self.trusted_ip.as_deref() == Some(ip) {
            return true;
        }
        if self.blocked_countries.is_empty() {
            return true;
        }

        match self.country_for(ip).await {
            Some(code) => !self
                .blocked_countries
                .iter()
                .any(|blocked| blocked.eq_ignore_ascii_case(&code)),
            // fail open: a lookup failure never blocks traffic
            None => true,
        }
    }

    async fn country_for(&self, ip: &str) -> Option<String> {
        let base = self.lookup_url.as_ref()?;
        let url = format!("{}/{}", base, ip);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("geolocation lookup failed for {}: {}", ip, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "geolocation lookup for {} returned {}",
                ip,
                response.status()
            );
            return None;
        }

        match response.json::<GeoLookup>().await {
            Ok(lookup) => lookup.country_code,
            Err(e) => {
                tracing::warn!("geolocation lookup returned malformed payload: {}", e);
                None
            }
        }
    }
}

/// Gate layer function applied in front of the API routes.
pub async fn geo_gate_layer(gate: Arc<GeoGate>, request: Request, next: Next) -> Response {
    let ip = client_ip(request.headers());

    if gate.allows(ip.as_deref()).await {
        next.run(request).await
    } else {
        tracing::info!("blocking request from denylisted region");
        Redirect::temporary(BLOCKED_PATH).into_response()
    }
}

/// First hop of the forwarded chain.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
