use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::types::*;
use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/admin/products/{id}/images",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Images of the product", body = Vec<ProductImageResponse>),
        (status = 404, description = "Product not found")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn list_images(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ProductImageResponse>>, AppError> {
    let images = state.admin.list_images(id).await?;
    Ok(Json(
        images
            .into_iter()
            .map(|img| ProductImageResponse::from_model(img, &state.config))
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/admin/products/{id}/images",
    params(("id" = i32, Path, description = "Product ID")),
    request_body(content = Object, description = "Image file in the `image` field", content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = ProductImageResponse),
        (status = 400, description = "Not an image"),
        (status = 404, description = "Product not found"),
        (status = 413, description = "Image too large")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ProductImageResponse>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field.file_name().unwrap_or("image").to_string();
        let data = field
            .bytes()
            .await
            .map_err(multipart_error)?
            .to_vec();

        let image = state.admin.add_image(id, &filename, data).await?;
        return Ok((
            StatusCode::CREATED,
            Json(ProductImageResponse::from_model(image, &state.config)),
        ));
    }

    Err(AppError::BadRequest(
        "No `image` field found in request".to_string(),
    ))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

#[utoipa::path(
    delete,
    path = "/admin/images/{id}",
    params(("id" = i32, Path, description = "Image ID")),
    responses(
        (status = 204, description = "Image file and record deleted"),
        (status = 404, description = "Image not found")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.admin.delete_image(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
