#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use rust_catalog_backend::config::CatalogConfig;
use rust_catalog_backend::entities::{categories, product_images, products};
use rust_catalog_backend::infrastructure::database;
use rust_catalog_backend::services::storage::StorageService;
use rust_catalog_backend::{AppState, create_app};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const ADMIN_TOKEN: &str = "dev-admin-token";

/// Smallest valid PNG: 1x1 transparent pixel.
pub const PNG_PIXEL: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub struct MockStorageService {
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    fail_deletes: AtomicBool,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            fail_deletes: AtomicBool::new(false),
        }
    }

    /// Make every `delete_file` call fail, as an unreachable bucket would.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.files.lock().unwrap().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn upload_file(&self, key: &str, data: Vec<u8>) -> anyhow::Result<()> {
        self.files.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }

    async fn get_file(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Key not found"))
    }

    async fn delete_file(&self, key: &str) -> anyhow::Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("Storage unavailable: cannot delete {}", key));
        }
        self.files.lock().unwrap().remove(key);
        Ok(())
    }

    async fn file_exists(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.files.lock().unwrap().contains_key(key))
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("rust_catalog_backend=debug,tower_http=debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    database::run_migrations(&db).await.unwrap();
    db
}

pub struct TestApp {
    pub app: Router,
    pub db: DatabaseConnection,
    pub storage: Arc<MockStorageService>,
}

pub async fn setup_app() -> TestApp {
    setup_app_with_config(CatalogConfig::development()).await
}

pub async fn setup_app_with_config(config: CatalogConfig) -> TestApp {
    init_tracing();
    let db = setup_test_db().await;
    let storage = Arc::new(MockStorageService::new());
    let state = AppState::new(db.clone(), storage.clone(), config);

    TestApp {
        app: create_app(state),
        db,
        storage,
    }
}

/// Fixed base time so `date_added` ordering is deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub async fn insert_category(
    db: &DatabaseConnection,
    name: &str,
    parent_id: Option<i32>,
) -> categories::Model {
    categories::ActiveModel {
        name: Set(name.to_string()),
        parent_id: Set(parent_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_product(
    db: &DatabaseConnection,
    category_id: i32,
    name: &str,
    description: &str,
    price_cents: i64,
    minutes_after_base: i64,
) -> products::Model {
    products::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        price: Set(Decimal::new(price_cents, 2)),
        category_id: Set(category_id),
        date_added: Set(base_time() + Duration::minutes(minutes_after_base)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_image(
    db: &DatabaseConnection,
    storage: &MockStorageService,
    product_id: i32,
    key: &str,
) -> product_images::Model {
    storage.upload_file(key, PNG_PIXEL.to_vec()).await.unwrap();
    product_images::ActiveModel {
        product_id: Set(product_id),
        image: Set(key.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn admin_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", ADMIN_TOKEN));

    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn multipart_upload(uri: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let boundary = "----CatalogTestBoundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", format!("Bearer {}", ADMIN_TOKEN))
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Query-string value, UTF-8 percent-encoded.
pub fn urlencode(text: &str) -> String {
    utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().unwrap(),
        other => other.to_string().parse().unwrap(),
    }
}

pub fn names(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}
