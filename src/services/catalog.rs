use crate::api::error::AppError;
use crate::entities::{categories, prelude::*, product_images, products};
use crate::services::categories::CategoryService;
use crate::utils::pagination::{Page, PageWindow, PaginationError, paginate};
use crate::utils::search::{fold_case, like_pattern};
use sea_orm::{
    Condition, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
    sea_query::{Expr, LikeExpr},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

/// Orderings the public product list accepts. Always ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    DateAdded,
    Name,
    Price,
}

impl SortKey {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "date_added" => Some(Self::DateAdded),
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    /// Unknown keys fall back to the default ordering without an error.
    pub fn from_param_or_default(raw: Option<&str>) -> Self {
        match raw.filter(|r| !r.is_empty()) {
            None => Self::default(),
            Some(r) => Self::from_param(r).unwrap_or_else(|| {
                tracing::debug!("Ignoring unknown sort key '{}'", r);
                Self::default()
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateAdded => "date_added",
            Self::Name => "name",
            Self::Price => "price",
        }
    }

    fn column(&self) -> products::Column {
        match self {
            Self::DateAdded => products::Column::DateAdded,
            Self::Name => products::Column::Name,
            Self::Price => products::Column::Price,
        }
    }

    pub fn apply(&self, select: Select<Products>) -> Select<Products> {
        select
            .order_by_asc(self.column())
            .order_by_asc(products::Column::Id)
    }

    pub fn compare(&self, a: &products::Model, b: &products::Model) -> Ordering {
        let primary = match self {
            Self::DateAdded => a.date_added.cmp(&b.date_added),
            Self::Name => a.name.cmp(&b.name),
            Self::Price => a.price.cmp(&b.price),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Search text and ordering for a product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub sort: SortKey,
}

impl ProductFilter {
    pub fn new(search: Option<String>, sort: SortKey) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()),
            sort,
        }
    }

    pub fn matches(&self, product: &products::Model) -> bool {
        match &self.search {
            None => true,
            Some(search) => {
                let needle = fold_case(search);
                fold_case(&product.name).contains(&needle)
                    || fold_case(&product.description).contains(&needle)
            }
        }
    }

    pub fn condition(&self) -> Option<Condition> {
        self.search.as_deref().map(search_condition)
    }
}

/// Case-insensitive substring match on name OR description, over the folded columns.
pub fn search_condition(search: &str) -> Condition {
    let pattern = like_pattern(search);
    Condition::any()
        .add(
            Expr::col(products::Column::NameSearch)
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
        .add(
            Expr::col(products::Column::DescriptionSearch)
                .like(LikeExpr::new(pattern).escape('\\')),
        )
}

/// Filter, order and page an in-memory product collection.
pub fn select_products(
    items: Vec<products::Model>,
    filter: &ProductFilter,
    page: i64,
    page_size: u64,
) -> Result<Page<products::Model>, PaginationError> {
    let mut selected: Vec<_> = items.into_iter().filter(|p| filter.matches(p)).collect();
    selected.sort_by(|a, b| filter.sort.compare(a, b));
    paginate(selected, page, page_size)
}

#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: products::Model,
    pub category: categories::Model,
    pub ancestors: Vec<categories::Model>,
    pub images: Vec<product_images::Model>,
}

pub struct CatalogService {
    db: DatabaseConnection,
    page_size: u64,
}

impl CatalogService {
    pub fn new(db: DatabaseConnection, page_size: u64) -> Self {
        Self { db, page_size }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: i64,
    ) -> Result<Page<products::Model>, AppError> {
        let mut select = Products::find();
        if let Some(cond) = filter.condition() {
            select = select.filter(cond);
        }

        let total = select.clone().count(&self.db).await?;
        let window = PageWindow::resolve(page, self.page_size, total)?;

        let items = filter
            .sort
            .apply(select)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await?;

        tracing::debug!(
            "Product list page {}/{} ({} matching)",
            window.meta.number,
            window.meta.num_pages,
            total
        );

        Ok(Page {
            items,
            meta: window.meta,
        })
    }

    pub async fn product_detail(&self, id: i32) -> Result<ProductDetail, AppError> {
        let product = Products::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        let category = Categories::find_by_id(product.category_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Product {} references missing category {}",
                    product.id, product.category_id
                ))
            })?;

        let ancestors = CategoryService::ancestors(&self.db, &category).await?;

        let images = product
            .find_related(ProductImages)
            .order_by_asc(product_images::Column::Id)
            .all(&self.db)
            .await?;

        Ok(ProductDetail {
            product,
            category,
            ancestors,
            images,
        })
    }
}
