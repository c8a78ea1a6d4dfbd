use crate::config::CatalogConfig;
use crate::entities::{categories, product_images, products};
use crate::services::catalog::SortKey;
use crate::utils::pagination::PageMeta;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub url: String,
}

impl From<categories::Model> for CategoryResponse {
    fn from(model: categories::Model) -> Self {
        Self {
            url: model.absolute_url(),
            id: model.id,
            name: model.name,
            parent_id: model.parent_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: i32,
    pub date_added: chrono::DateTime<Utc>,
    pub url: String,
}

impl From<products::Model> for ProductResponse {
    fn from(model: products::Model) -> Self {
        Self {
            url: model.absolute_url(),
            id: model.id,
            name: model.name,
            description: model.description,
            price: fixed_point_price(model.price),
            category_id: model.category_id,
            date_added: model.date_added,
        }
    }
}

/// Prices always leave with two decimal places, whatever scale the store returned.
pub fn fixed_point_price(price: Decimal) -> Decimal {
    let mut price = price.round_dp(2);
    price.rescale(2);
    price
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductImageResponse {
    pub id: i32,
    pub product_id: i32,
    /// Storage key
    pub image: String,
    pub url: String,
}

impl ProductImageResponse {
    pub fn from_model(model: product_images::Model, config: &CatalogConfig) -> Self {
        Self {
            url: config.media_url_for(&model.image),
            id: model.id,
            product_id: model.product_id,
            image: model.image,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Search text matched against name and description
    pub q: Option<String>,
    /// `date_added` (default), `name` or `price`
    pub sort: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub page: PageMeta,
    pub query: String,
    pub sort: SortKey,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub category: CategoryResponse,
    /// Ancestors of the product's category, root first
    pub breadcrumbs: Vec<CategoryResponse>,
    pub images: Vec<ProductImageResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDetailResponse {
    pub category: CategoryResponse,
    pub breadcrumbs: Vec<CategoryResponse>,
    pub subcategories: Vec<CategoryResponse>,
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPageResponse {
    pub categories: Vec<CategoryResponse>,
    pub page: PageMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPageResponse {
    pub products: Vec<ProductResponse>,
    pub page: PageMeta,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminCategoryQuery {
    /// `root` or a parent category id
    pub parent: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminProductQuery {
    pub category: Option<i32>,
    pub search: Option<String>,
    pub added_from: Option<chrono::DateTime<Utc>>,
    pub added_to: Option<chrono::DateTime<Utc>>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteProductResponse {
    pub deleted_images: u64,
}
