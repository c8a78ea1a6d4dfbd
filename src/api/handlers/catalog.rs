use crate::AppState;
use crate::api::error::AppError;
use crate::services::catalog::{ProductFilter, SortKey};
use crate::utils::pagination::parse_page;
use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::types::*;

#[utoipa::path(
    get,
    path = "/",
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductListResponse),
        (status = 400, description = "Page is not a number"),
        (status = 404, description = "Page out of range")
    ),
    tag = "catalog"
)]
pub async fn product_list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>, AppError> {
    let sort = SortKey::from_param_or_default(query.sort.as_deref());
    let page_number = parse_page(query.page.as_deref())?;
    let filter = ProductFilter::new(query.q.clone(), sort);

    let page = state.catalog.list_products(&filter, page_number).await?;

    Ok(Json(ProductListResponse {
        products: page.items.into_iter().map(Into::into).collect(),
        page: page.meta,
        query: query.q.unwrap_or_default(),
        sort,
    }))
}

#[utoipa::path(
    get,
    path = "/product/{id}/",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with category breadcrumbs and images", body = ProductDetailResponse),
        (status = 404, description = "Product not found")
    ),
    tag = "catalog"
)]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let detail = state.catalog.product_detail(id).await?;

    Ok(Json(ProductDetailResponse {
        product: detail.product.into(),
        category: detail.category.into(),
        breadcrumbs: detail.ancestors.into_iter().map(Into::into).collect(),
        images: detail
            .images
            .into_iter()
            .map(|img| ProductImageResponse::from_model(img, &state.config))
            .collect(),
    }))
}
