mod common;

use axum::http::StatusCode;
use common::*;
use http_body_util::BodyExt;
use rust_catalog_backend::config::CatalogConfig;
use rust_catalog_backend::services::storage::LocalStorageService;
use rust_catalog_backend::{AppState, create_app};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn test_uploaded_image_is_served_from_media_root() {
    init_tracing();
    let media_root = tempfile::tempdir().unwrap();
    let config = CatalogConfig {
        media_root: media_root.path().to_string_lossy().to_string(),
        ..CatalogConfig::development()
    };

    let db = setup_test_db().await;
    let storage = Arc::new(LocalStorageService::new(media_root.path()));
    let app = create_app(AppState::new(db.clone(), storage, config));

    let category = insert_category(&db, "Posters", None).await;
    let product = insert_product(&db, category.id, "Skyline", "Night city", 1500, 1).await;

    let response = app
        .clone()
        .oneshot(multipart_upload(
            &format!("/admin/products/{}/images", product.id),
            "skyline.png",
            PNG_PIXEL,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let image = body_json(response).await;
    let key = image["image"].as_str().unwrap().to_string();
    assert!(media_root.path().join(&key).exists());

    let response = app
        .clone()
        .oneshot(get(image["url"].as_str().unwrap()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], PNG_PIXEL);

    let response = app
        .clone()
        .oneshot(admin_request(
            "DELETE",
            &format!("/admin/products/{}", product.id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!media_root.path().join(&key).exists());
}
