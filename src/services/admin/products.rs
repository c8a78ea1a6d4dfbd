use crate::api::error::AppError;
use crate::entities::{prelude::*, product_images, products};
use crate::services::catalog::search_condition;
use crate::utils::pagination::{Page, PageWindow};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use validator::Validate;

use super::{AdminService, ProductInput, ProductListFilter};

impl AdminService {
    /// Admin product listing, newest first.
    pub async fn list_products(
        &self,
        filter: &ProductListFilter,
        page: i64,
    ) -> Result<Page<products::Model>, AppError> {
        let mut select = Products::find();

        if let Some(category_id) = filter.category_id {
            select = select.filter(products::Column::CategoryId.eq(category_id));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(search_condition(search));
        }
        if let Some(from) = filter.added_from {
            select = select.filter(products::Column::DateAdded.gte(from));
        }
        if let Some(to) = filter.added_to {
            select = select.filter(products::Column::DateAdded.lte(to));
        }

        let total = select.clone().count(&self.db).await?;
        let window = PageWindow::resolve(page, self.config.admin_page_size, total)?;

        let items = select
            .order_by_desc(products::Column::DateAdded)
            .order_by_desc(products::Column::Id)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await?;

        Ok(Page {
            items,
            meta: window.meta,
        })
    }

    pub async fn get_product(&self, id: i32) -> Result<products::Model, AppError> {
        Products::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<products::Model, AppError> {
        input.validate()?;
        self.ensure_category_exists(input.category_id).await?;

        let product = products::ActiveModel {
            name: Set(input.name.trim().to_string()),
            description: Set(input.description),
            price: Set(input.price),
            category_id: Set(input.category_id),
            date_added: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!("🛒 Product created: {} ({})", product.name, product.id);
        Ok(product)
    }

    /// Replaces the editable fields. `date_added` is never touched.
    pub async fn update_product(
        &self,
        id: i32,
        input: ProductInput,
    ) -> Result<products::Model, AppError> {
        input.validate()?;
        let existing = self.get_product(id).await?;
        if existing.category_id != input.category_id {
            self.ensure_category_exists(input.category_id).await?;
        }

        let mut active: products::ActiveModel = existing.into();
        active.name = Set(input.name.trim().to_string());
        active.description = Set(input.description);
        active.price = Set(input.price);
        active.category_id = Set(input.category_id);
        let updated = active.update(&self.db).await?;

        tracing::info!("🛒 Product updated: {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Remove a product: stored image files first, then the image rows and the product.
    ///
    /// Returns how many images were removed. A storage failure aborts before any
    /// record is touched.
    pub async fn delete_product(&self, id: i32) -> Result<u64, AppError> {
        let product = self.get_product(id).await?;

        let images = product
            .find_related(ProductImages)
            .all(&self.db)
            .await?;

        for image in &images {
            self.storage.delete_file(&image.image).await.map_err(|e| {
                AppError::Internal(format!("Failed to delete image file {}: {}", image.image, e))
            })?;
            tracing::debug!("Deleted image file {}", image.image);
        }

        let txn = self.db.begin().await?;

        let removed = ProductImages::delete_many()
            .filter(product_images::Column::ProductId.eq(product.id))
            .exec(&txn)
            .await?
            .rows_affected;
        Products::delete_by_id(product.id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            "🗑️  Product deleted: {} ({}) with {} images",
            product.name,
            product.id,
            removed
        );
        Ok(removed)
    }
}
