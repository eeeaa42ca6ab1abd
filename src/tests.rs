//! Integration tests for the portal backend.
//!
//! The fixture runs the real router against a scratch document store and two
//! in-process stub servers standing in for the remote backends.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::cache::Caches;
use crate::config::{Collections, Config};
use crate::errors::AppError;
use crate::store::{RawRecord, RecordStore, Stores};
use crate::{build_state, create_router, AppState};

// ==================== STUB BACKENDS ====================

type StubDocs = Arc<Mutex<HashMap<(String, String), RawRecord>>>;

/// Stub for the admin document API: documents at `/{collection}/{id}` with
/// RFC 3339 timestamps, 404 on missing targets.
fn admin_stub_router(docs: StubDocs) -> Router {
    Router::new()
        .route("/{collection}", post(admin_create))
        .route(
            "/{collection}/{id}",
            get(admin_get).patch(admin_update).delete(admin_delete),
        )
        .with_state(docs)
}

async fn admin_create(
    State(docs): State<StubDocs>,
    Path(collection): Path<String>,
    Json(mut fields): Json<RawRecord>,
) -> Json<RawRecord> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();
    fields.insert("id".to_string(), Value::String(id.clone()));
    fields.insert("createdAt".to_string(), Value::String(now.clone()));
    fields.insert("updatedAt".to_string(), Value::String(now));
    docs.lock()
        .unwrap()
        .insert((collection, id), fields.clone());
    Json(fields)
}

async fn admin_get(
    State(docs): State<StubDocs>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<RawRecord>, StatusCode> {
    docs.lock()
        .unwrap()
        .get(&(collection, id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn admin_update(
    State(docs): State<StubDocs>,
    Path((collection, id)): Path<(String, String)>,
    Json(fields): Json<RawRecord>,
) -> Result<Json<RawRecord>, StatusCode> {
    let mut docs = docs.lock().unwrap();
    let doc = docs
        .get_mut(&(collection, id))
        .ok_or(StatusCode::NOT_FOUND)?;
    for (key, value) in fields {
        doc.insert(key, value);
    }
    Ok(Json(doc.clone()))
}

async fn admin_delete(
    State(docs): State<StubDocs>,
    Path((collection, id)): Path<(String, String)>,
) -> StatusCode {
    if docs.lock().unwrap().remove(&(collection, id)).is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Stub for the relational REST backend: rows filtered with `id=eq.{id}`,
/// writes returning representations, deletes silent about missing rows.
fn table_stub_router(rows: StubDocs) -> Router {
    Router::new()
        .route(
            "/rest/v1/{table}",
            get(table_get)
                .post(table_create)
                .patch(table_update)
                .delete(table_delete),
        )
        .with_state(rows)
}

fn filter_id(params: &HashMap<String, String>) -> Option<String> {
    params.get("id")?.strip_prefix("eq.").map(|s| s.to_string())
}

async fn table_get(
    State(rows): State<StubDocs>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<RawRecord>> {
    let matched = filter_id(&params)
        .and_then(|id| rows.lock().unwrap().get(&(table, id)).cloned())
        .into_iter()
        .collect();
    Json(matched)
}

async fn table_create(
    State(rows): State<StubDocs>,
    Path(table): Path<String>,
    Json(mut fields): Json<RawRecord>,
) -> (StatusCode, Json<Vec<RawRecord>>) {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();
    fields.insert("id".to_string(), Value::String(id.clone()));
    fields.insert("createdAt".to_string(), Value::String(now.clone()));
    fields.insert("updatedAt".to_string(), Value::String(now));
    rows.lock().unwrap().insert((table, id), fields.clone());
    (StatusCode::CREATED, Json(vec![fields]))
}

async fn table_update(
    State(rows): State<StubDocs>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    Json(fields): Json<RawRecord>,
) -> Json<Vec<RawRecord>> {
    let Some(id) = filter_id(&params) else {
        return Json(Vec::new());
    };
    let mut rows = rows.lock().unwrap();
    match rows.get_mut(&(table, id)) {
        Some(row) => {
            for (key, value) in fields {
                row.insert(key, value);
            }
            Json(vec![row.clone()])
        }
        None => Json(Vec::new()),
    }
}

async fn table_delete(
    State(rows): State<StubDocs>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    if let Some(id) = filter_id(&params) {
        rows.lock().unwrap().remove(&(table, id));
    }
    StatusCode::NO_CONTENT
}

/// Stub geolocation lookup that places every caller in country XX.
fn geo_stub_router() -> Router {
    Router::new().route("/{ip}", get(geo_lookup))
}

async fn geo_lookup(Path(_ip): Path<String>) -> Json<Value> {
    Json(json!({ "countryCode": "XX" }))
}

// ==================== FIXTURE ====================

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn test_collections() -> Collections {
    Collections {
        banners: "banners".to_string(),
        categories: "categories".to_string(),
        news: "news".to_string(),
        events: "events-test".to_string(),
        faqs: "faqs-test".to_string(),
        store_faqs: "storeFaqs-test".to_string(),
        logos: "logos-test".to_string(),
        regions: "regions".to_string(),
        privacy_policies: "privacy-policies".to_string(),
        email_settings: "email-settings".to_string(),
    }
}

fn test_config(db_path: std::path::PathBuf) -> Config {
    Config {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        db_path,
        log_level: "warn".to_string(),
        tenant: "test".to_string(),
        admin_store_url: None,
        admin_store_token: None,
        table_store_url: None,
        table_store_key: None,
        geo_lookup_url: None,
        trusted_ip: None,
        blocked_countries: Vec::new(),
        collections: test_collections(),
    }
}

struct GeoConfig {
    lookup_url: String,
    blocked_countries: Vec<String>,
    trusted_ip: Option<String>,
}

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::build(None).await
    }

    async fn with_geo(blocked_countries: &[&str], trusted_ip: Option<&str>) -> Self {
        let lookup_url = spawn_server(geo_stub_router()).await;
        Self::build(Some(GeoConfig {
            lookup_url,
            blocked_countries: blocked_countries.iter().map(|c| c.to_string()).collect(),
            trusted_ip: trusted_ip.map(|ip| ip.to_string()),
        }))
        .await
    }

    async fn build(geo: Option<GeoConfig>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let admin_url = spawn_server(admin_stub_router(StubDocs::default())).await;
        let table_url = spawn_server(table_stub_router(StubDocs::default())).await;

        let mut config = test_config(temp_dir.path().join("portal.sqlite"));
        config.admin_store_url = Some(admin_url);
        config.admin_store_token = Some("stub-token".to_string());
        config.table_store_url = Some(table_url);
        config.table_store_key = Some("stub-key".to_string());
        if let Some(geo) = geo {
            config.geo_lookup_url = Some(geo.lookup_url);
            config.blocked_countries = geo.blocked_countries;
            config.trusted_ip = geo.trusted_ip;
        }

        let state = build_state(config);
        let app = create_router(state);
        let base_url = spawn_server(app).await;

        // Wait for the servers to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        TestFixture {
            client,
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}

// ==================== TESTS ====================

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_region_crud() {
    let fixture = TestFixture::new().await;

    // Create region
    let create = fixture
        .post(
            "/api/regions/create",
            json!({
                "name": "North",
                "networkId": "net-001",
                "description": "Northern stores"
            }),
        )
        .await;
    assert_eq!(create.status(), 200);
    let created: Value = create.json().await.unwrap();
    assert_eq!(created["success"], true);
    assert!(created["id"].is_string());
    assert!(created.get("_id").is_none());
    assert!(created["createdAt"].is_i64());
    assert_eq!(created["isActive"], true);
    let region_id = created["id"].as_str().unwrap().to_string();
    let updated_at_before = created["updatedAt"].as_i64().unwrap();

    // Get region
    let get = fixture
        .post("/api/regions/get", json!({ "id": region_id }))
        .await;
    assert_eq!(get.status(), 200);
    let fetched: Value = get.json().await.unwrap();
    assert_eq!(fetched["name"], "North");

    // Update region; untouched fields survive the merge
    tokio::time::sleep(Duration::from_millis(20)).await;
    let update = fixture
        .post(
            "/api/regions/update",
            json!({ "id": region_id, "updates": { "name": "North-East" } }),
        )
        .await;
    assert_eq!(update.status(), 200);
    let updated: Value = update.json().await.unwrap();
    assert_eq!(updated["name"], "North-East");
    assert_eq!(updated["networkId"], "net-001");
    assert!(updated["updatedAt"].as_i64().unwrap() > updated_at_before);

    // Delete region
    let delete = fixture
        .post("/api/regions/delete", json!({ "id": region_id }))
        .await;
    assert_eq!(delete.status(), 200);
    let deleted: Value = delete.json().await.unwrap();
    assert_eq!(deleted, json!({ "success": true }));

    // Verify deleted
    let get_deleted = fixture
        .post("/api/regions/get", json!({ "id": region_id }))
        .await;
    assert_eq!(get_deleted.status(), 404);
    let body: Value = get_deleted.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Region not found");

    // Repeating the delete reports not found, not a crash
    let delete_again = fixture
        .post("/api/regions/delete", json!({ "id": region_id }))
        .await;
    assert_eq!(delete_again.status(), 404);
    let body: Value = delete_again.json().await.unwrap();
    assert_eq!(body["error"], "Region not found");
}

#[tokio::test]
async fn test_region_duplicate_network_id_rejected() {
    let fixture = TestFixture::new().await;

    let first = fixture
        .post(
            "/api/regions/create",
            json!({ "name": "A", "networkId": "dup-1" }),
        )
        .await;
    assert_eq!(first.status(), 200);

    let second = fixture
        .post(
            "/api/regions/create",
            json!({ "name": "B", "networkId": "dup-1" }),
        )
        .await;
    assert_eq!(second.status(), 500);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_event_crud() {
    let fixture = TestFixture::new().await;

    // Create event
    let create = fixture
        .post(
            "/api/events/create",
            json!({
                "title": "Summer Sale",
                "description": "Storewide discounts",
                "startDate": 1780000000000i64,
                "endDate": 1780600000000i64
            }),
        )
        .await;
    assert_eq!(create.status(), 200);
    let created: Value = create.json().await.unwrap();
    assert_eq!(created["success"], true);
    let event_id = created["id"].as_str().unwrap().to_string();
    // admin-store timestamps arrive as RFC 3339 and leave as epoch millis
    assert!(created["createdAt"].is_i64());
    assert!(created["updatedAt"].is_i64());
    // client-owned dates pass through unconverted
    assert_eq!(created["startDate"], json!(1780000000000i64));
    let updated_at_before = created["updatedAt"].as_i64().unwrap();

    // Get event
    let get = fixture
        .post("/api/events/get", json!({ "id": event_id }))
        .await;
    assert_eq!(get.status(), 200);
    let fetched: Value = get.json().await.unwrap();
    assert_eq!(fetched["title"], "Summer Sale");

    // Update event
    tokio::time::sleep(Duration::from_millis(20)).await;
    let update = fixture
        .post(
            "/api/events/update",
            json!({ "id": event_id, "updates": { "moreDetails": "Free shipping" } }),
        )
        .await;
    assert_eq!(update.status(), 200);
    let updated: Value = update.json().await.unwrap();
    assert_eq!(updated["moreDetails"], "Free shipping");
    assert_eq!(updated["title"], "Summer Sale");
    assert!(updated["updatedAt"].as_i64().unwrap() > updated_at_before);

    // Delete event
    let delete = fixture
        .post("/api/events/delete", json!({ "id": event_id }))
        .await;
    assert_eq!(delete.status(), 200);
    let deleted: Value = delete.json().await.unwrap();
    assert_eq!(deleted["success"], true);

    // Repeating the identical delete reports the event-level message
    let delete_again = fixture
        .post("/api/events/delete", json!({ "id": event_id }))
        .await;
    assert_eq!(delete_again.status(), 404);
    let body: Value = delete_again.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Event not found");
}

#[tokio::test]
async fn test_logo_update_shows_new_name() {
    let fixture = TestFixture::new().await;

    let create = fixture
        .post(
            "/api/logos/create",
            json!({ "name": "OldName", "logoUrl": "https://cdn.example.com/logo.png" }),
        )
        .await;
    assert_eq!(create.status(), 200);
    let created: Value = create.json().await.unwrap();
    let logo_id = created["id"].as_str().unwrap().to_string();
    let updated_at_before = created["updatedAt"].as_i64().unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    let update = fixture
        .post(
            "/api/logos/update",
            json!({ "id": logo_id, "updates": { "name": "NewName" } }),
        )
        .await;
    assert_eq!(update.status(), 200);

    let get = fixture
        .post("/api/logos/get", json!({ "id": logo_id }))
        .await;
    assert_eq!(get.status(), 200);
    let fetched: Value = get.json().await.unwrap();
    assert_eq!(fetched["name"], "NewName");
    assert!(fetched["updatedAt"].as_i64().unwrap() > updated_at_before);
}

#[tokio::test]
async fn test_banner_crud() {
    let fixture = TestFixture::new().await;

    let create = fixture
        .post(
            "/api/banners/create",
            json!({ "title": "Hero", "imageUrl": "https://cdn.example.com/hero.jpg" }),
        )
        .await;
    assert_eq!(create.status(), 200);
    let created: Value = create.json().await.unwrap();
    assert_eq!(created["success"], true);
    assert!(created["id"].is_string());
    assert!(created["createdAt"].is_i64());
    let banner_id = created["id"].as_str().unwrap().to_string();

    let update = fixture
        .post(
            "/api/banners/update",
            json!({ "id": banner_id, "updates": { "layoutPosition": 2 } }),
        )
        .await;
    assert_eq!(update.status(), 200);

    let get = fixture
        .post("/api/banners/get", json!({ "id": banner_id }))
        .await;
    assert_eq!(get.status(), 200);
    let fetched: Value = get.json().await.unwrap();
    assert_eq!(fetched["layoutPosition"], 2);
    assert_eq!(fetched["title"], "Hero");
}

#[tokio::test]
async fn test_table_backend_delete_reports_success_without_existence_check() {
    let fixture = TestFixture::new().await;

    // The relational backend cannot distinguish a missing row on delete, so
    // the route answers success regardless — unlike the document- and
    // admin-backed deletes, which answer 404.
    let delete = fixture
        .post("/api/banners/delete", json!({ "id": "no-such-row" }))
        .await;
    assert_eq!(delete.status(), 200);
    let body: Value = delete.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn test_faq_collection_override() {
    let fixture = TestFixture::new().await;

    let create = fixture
        .post(
            "/api/faqs/create",
            json!({ "question": "Opening hours?", "answer": "9 to 5" }),
        )
        .await;
    assert_eq!(create.status(), 200);
    let created: Value = create.json().await.unwrap();
    assert_eq!(created["order"], 0);
    assert_eq!(created["isActive"], true);
    let faq_id = created["id"].as_str().unwrap().to_string();

    // A different collection does not see the document
    let other = fixture
        .post(
            "/api/faqs/get",
            json!({ "id": faq_id, "collection": "faqs-other" }),
        )
        .await;
    assert_eq!(other.status(), 404);

    // The configured collection does
    let same = fixture
        .post(
            "/api/faqs/get",
            json!({ "id": faq_id, "collection": "faqs-test" }),
        )
        .await;
    assert_eq!(same.status(), 200);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let fixture = TestFixture::new().await;

    let banner = fixture.post("/api/banners/create", json!({})).await;
    assert_eq!(banner.status(), 400);
    let body: Value = banner.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "title is required");

    let event = fixture
        .post("/api/events/create", json!({ "title": "X" }))
        .await;
    assert_eq!(event.status(), 400);
    let body: Value = event.json().await.unwrap();
    assert_eq!(body["error"], "startDate and endDate are required");

    let region = fixture
        .post("/api/regions/create", json!({ "name": "N" }))
        .await;
    assert_eq!(region.status(), 400);
    let body: Value = region.json().await.unwrap();
    assert_eq!(body["error"], "networkId is required");
}

/// Record store that counts calls and fails loudly if one arrives.
#[derive(Default)]
struct SpyStore {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl RecordStore for SpyStore {
    async fn create(&self, _location: &str, _fields: RawRecord) -> Result<RawRecord, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Backend("unexpected backend call".to_string()))
    }

    async fn find_by_id(
        &self,
        _location: &str,
        _id: &str,
    ) -> Result<Option<RawRecord>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Backend("unexpected backend call".to_string()))
    }

    async fn update_by_id(
        &self,
        _location: &str,
        _id: &str,
        _fields: RawRecord,
    ) -> Result<RawRecord, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Backend("unexpected backend call".to_string()))
    }

    async fn delete_by_id(&self, _location: &str, _id: &str) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Backend("unexpected backend call".to_string()))
    }
}

#[tokio::test]
async fn test_missing_id_never_reaches_backend() {
    let temp_dir = TempDir::new().unwrap();
    let spy = Arc::new(SpyStore::default());
    let stores = Stores {
        document: spy.clone(),
        admin: spy.clone(),
        table: spy.clone(),
    };
    let state = AppState {
        stores: Arc::new(stores),
        caches: Arc::new(Caches::new()),
        config: Arc::new(test_config(temp_dir.path().join("unused.sqlite"))),
    };
    let base_url = spawn_server(create_router(state)).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let client = Client::new();

    for path in [
        "/api/events/delete",
        "/api/regions/get",
        "/api/email-settings/delete",
    ] {
        let resp = client
            .post(format!("{}{}", base_url, path))
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "{} should reject a missing id", path);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "id is required");
    }

    // update with a payload but no id
    let resp = client
        .post(format!("{}/api/banners/update", base_url))
        .json(&json!({ "updates": { "title": "New" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // update with an id but no updates
    let resp = client
        .post(format!("{}/api/banners/update", base_url))
        .json(&json!({ "id": "b1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // create with missing required fields
    let resp = client
        .post(format!("{}/api/banners/create", base_url))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unconfigured_admin_store_fails_fast() {
    let temp_dir = TempDir::new().unwrap();
    let state = build_state(test_config(temp_dir.path().join("portal.sqlite")));
    let base_url = spawn_server(create_router(state)).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let client = Client::new();

    let resp = client
        .post(format!("{}/api/events/get", base_url))
        .json(&json!({ "id": "evt1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "admin document store is not configured");
}

#[tokio::test]
async fn test_settings_cache_serves_single_slot() {
    let fixture = TestFixture::new().await;

    let create = fixture
        .post(
            "/api/email-settings/create",
            json!({ "email1": "contact@example.com" }),
        )
        .await;
    assert_eq!(create.status(), 200);
    let created: Value = create.json().await.unwrap();
    let settings_id = created["id"].as_str().unwrap().to_string();

    // First read populates the slot
    let first = fixture
        .post("/api/email-settings/get", json!({ "id": settings_id }))
        .await;
    assert_eq!(first.status(), 200);

    // Remove the underlying document through another route's collection
    // override; nothing clears the settings slot
    let sidestep = fixture
        .post(
            "/api/regions/delete",
            json!({ "id": settings_id, "collection": "email-settings" }),
        )
        .await;
    assert_eq!(sidestep.status(), 200);

    // Still served from the slot even though the record is gone
    let second = fixture
        .post("/api/email-settings/get", json!({ "id": settings_id }))
        .await;
    assert_eq!(second.status(), 200);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["email1"], "contact@example.com");

    // A mutation through the settings routes clears the slot, even when the
    // mutation itself fails
    let update = fixture
        .post(
            "/api/email-settings/update",
            json!({ "id": settings_id, "updates": { "email1": "new@example.com" } }),
        )
        .await;
    assert_eq!(update.status(), 404);

    let third = fixture
        .post("/api/email-settings/get", json!({ "id": settings_id }))
        .await;
    assert_eq!(third.status(), 404);
}

#[tokio::test]
async fn test_policy_cache_invalidated_by_mutations() {
    let fixture = TestFixture::new().await;

    let create = fixture
        .post(
            "/api/privacy-policy/create",
            json!({ "title": "Privacy", "content": "v1" }),
        )
        .await;
    assert_eq!(create.status(), 200);
    let created: Value = create.json().await.unwrap();
    let policy_id = created["id"].as_str().unwrap().to_string();

    // First read populates the slot under this id
    let first = fixture
        .post("/api/privacy-policy/get", json!({ "id": policy_id }))
        .await;
    assert_eq!(first.status(), 200);
    let body: Value = first.json().await.unwrap();
    assert_eq!(body["content"], "v1");

    // The update clears the slot, so the next read sees fresh content
    let update = fixture
        .post(
            "/api/privacy-policy/update",
            json!({ "id": policy_id, "updates": { "content": "v2" } }),
        )
        .await;
    assert_eq!(update.status(), 200);

    let second = fixture
        .post("/api/privacy-policy/get", json!({ "id": policy_id }))
        .await;
    assert_eq!(second.status(), 200);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["content"], "v2");

    // A different key misses the slot and falls through to the store
    let other = fixture
        .post("/api/privacy-policy/get", json!({ "id": "other-id" }))
        .await;
    assert_eq!(other.status(), 404);
}

#[tokio::test]
async fn test_policy_cache_hit_survives_out_of_band_delete() {
    let fixture = TestFixture::new().await;

    let create = fixture
        .post(
            "/api/privacy-policy/create",
            json!({ "title": "Privacy", "content": "cached" }),
        )
        .await;
    let created: Value = create.json().await.unwrap();
    let policy_id = created["id"].as_str().unwrap().to_string();

    // Populate the slot
    let first = fixture
        .post("/api/privacy-policy/get", json!({ "id": policy_id }))
        .await;
    assert_eq!(first.status(), 200);

    // Delete the document through another route's collection override; the
    // policy slot is only cleared by policy mutations
    let sidestep = fixture
        .post(
            "/api/regions/delete",
            json!({ "id": policy_id, "collection": "privacy-policies" }),
        )
        .await;
    assert_eq!(sidestep.status(), 200);

    // The stale payload is still served from the slot
    let second = fixture
        .post("/api/privacy-policy/get", json!({ "id": policy_id }))
        .await;
    assert_eq!(second.status(), 200);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["content"], "cached");
}

#[tokio::test]
async fn test_geo_gate_redirects_denylisted_country() {
    let fixture = TestFixture::with_geo(&["XX"], Some("198.51.100.7")).await;

    // Denylisted caller is redirected before any route runs
    let resp = fixture
        .client
        .post(fixture.url("/api/regions/get"))
        .header("x-forwarded-for", "203.0.113.5")
        .json(&json!({ "id": "r1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 307);
    assert_eq!(resp.headers()["location"], "/blocked");

    // The blocked page itself is reachable
    let blocked = fixture
        .client
        .get(fixture.url("/blocked"))
        .send()
        .await
        .unwrap();
    assert_eq!(blocked.status(), 200);

    // The trusted IP bypasses the lookup entirely
    let resp = fixture
        .client
        .post(fixture.url("/api/regions/get"))
        .header("x-forwarded-for", "198.51.100.7")
        .json(&json!({ "id": "r1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // No forwarded address fails open
    let resp = fixture
        .post("/api/regions/get", json!({ "id": "r1" }))
        .await;
    assert_eq!(resp.status(), 404);
}
