use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::types::*;
use crate::services::admin::{CascadeReport, CategoryInput, CategoryListFilter, ParentFilter};
use crate::utils::pagination::parse_page;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/admin/categories",
    params(AdminCategoryQuery),
    responses(
        (status = 200, description = "Categories ordered by name", body = CategoryPageResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<AdminCategoryQuery>,
) -> Result<Json<CategoryPageResponse>, AppError> {
    let parent = ParentFilter::from_param(query.parent.as_deref()).ok_or_else(|| {
        AppError::BadRequest("parent must be 'root' or a category id".to_string())
    })?;
    let filter = CategoryListFilter {
        parent,
        search: query.search,
    };
    let page = state
        .admin
        .list_categories(&filter, parse_page(query.page.as_deref())?)
        .await?;

    Ok(Json(CategoryPageResponse {
        categories: page.items.into_iter().map(Into::into).collect(),
        page: page.meta,
    }))
}

#[utoipa::path(
    post,
    path = "/admin/categories",
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid name or unknown parent")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryInput>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let category = state.admin.create_category(req).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

#[utoipa::path(
    get,
    path = "/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryResponse>, AppError> {
    Ok(Json(state.admin.get_category(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid input or the move would create a cycle"),
        (status = 404, description = "Category not found")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<CategoryInput>,
) -> Result<Json<CategoryResponse>, AppError> {
    Ok(Json(state.admin.update_category(id, req).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category and everything below it deleted", body = CascadeReport),
        (status = 404, description = "Category not found")
    ),
    security(("admin_token" = [])),
    tag = "admin"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CascadeReport>, AppError> {
    Ok(Json(state.admin.delete_category(id).await?))
}
