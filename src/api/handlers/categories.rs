use crate::AppState;
use crate::api::error::AppError;
use crate::services::categories::CategoryService;
use axum::{
    Json,
    extract::{Path, State},
};

use super::types::*;

#[utoipa::path(
    get,
    path = "/category/{id}/",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category with direct subcategories and products", body = CategoryDetailResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "catalog"
)]
pub async fn category_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryDetailResponse>, AppError> {
    let detail = CategoryService::category_detail(&state.db, id).await?;

    Ok(Json(CategoryDetailResponse {
        category: detail.category.into(),
        breadcrumbs: detail.ancestors.into_iter().map(Into::into).collect(),
        subcategories: detail.subcategories.into_iter().map(Into::into).collect(),
        products: detail.products.into_iter().map(Into::into).collect(),
    }))
}
