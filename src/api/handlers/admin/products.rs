use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::types::*;
use crate::services::admin::{ProductInput, ProductListFilter};
use crate::utils::pagination::parse_page;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/admin/products",
    params(AdminProductQuery),
    responses(
        (status = 200, description = "Products, newest first", body = ProductPageResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<AdminProductQuery>,
) -> Result<Json<ProductPageResponse>, AppError> {
    let page_number = parse_page(query.page.as_deref())?;
    let filter = ProductListFilter {
        category_id: query.category,
        search: query.search,
        added_from: query.added_from,
        added_to: query.added_to,
    };
    let page = state.admin.list_products(&filter, page_number).await?;

    Ok(Json(ProductPageResponse {
        products: page.items.into_iter().map(Into::into).collect(),
        page: page.meta,
    }))
}

#[utoipa::path(
    post,
    path = "/admin/products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid input or unknown category")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<ProductInput>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = state.admin.create_product(req).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(
    get,
    path = "/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Product not found")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, AppError> {
    Ok(Json(state.admin.get_product(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid input or unknown category"),
        (status = 404, description = "Product not found")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<ProductInput>,
) -> Result<Json<ProductResponse>, AppError> {
    Ok(Json(state.admin.update_product(id, req).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Image files removed, then the product", body = DeleteProductResponse),
        (status = 404, description = "Product not found")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteProductResponse>, AppError> {
    let deleted_images = state.admin.delete_product(id).await?;
    Ok(Json(DeleteProductResponse { deleted_images }))
}
