use crate::api::error::AppError;
use crate::entities::{categories, prelude::*, product_images, products};
use crate::services::categories::CategoryService;
use crate::utils::pagination::{Page, PageWindow};
use crate::utils::search::like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
    sea_query::{Expr, LikeExpr},
};
use validator::Validate;

use super::{AdminService, CascadeReport, CategoryInput, CategoryListFilter, ParentFilter};

impl AdminService {
    pub async fn list_categories(
        &self,
        filter: &CategoryListFilter,
        page: i64,
    ) -> Result<Page<categories::Model>, AppError> {
        let mut select = Categories::find();

        select = match filter.parent {
            ParentFilter::Any => select,
            ParentFilter::Root => select.filter(categories::Column::ParentId.is_null()),
            ParentFilter::Id(id) => select.filter(categories::Column::ParentId.eq(id)),
        };

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(
                Expr::col(categories::Column::NameSearch)
                    .like(LikeExpr::new(like_pattern(search)).escape('\\')),
            );
        }

        let total = select.clone().count(&self.db).await?;
        let window = PageWindow::resolve(page, self.config.admin_page_size, total)?;

        let items = select
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await?;

        Ok(Page {
            items,
            meta: window.meta,
        })
    }

    pub async fn get_category(&self, id: i32) -> Result<categories::Model, AppError> {
        Categories::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create_category(
        &self,
        input: CategoryInput,
    ) -> Result<categories::Model, AppError> {
        input.validate()?;

        if let Some(parent_id) = input.parent_id {
            self.ensure_category_exists(parent_id).await?;
        }

        let category = categories::ActiveModel {
            name: Set(input.name.trim().to_string()),
            parent_id: Set(input.parent_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!("📁 Category created: {} ({})", category.name, category.id);
        Ok(category)
    }

    /// Rename and/or re-parent. Moving a category under its own subtree is refused.
    ///
    /// The cycle check and the write share one transaction, so two concurrent
    /// moves cannot close a loop between them.
    pub async fn update_category(
        &self,
        id: i32,
        input: CategoryInput,
    ) -> Result<categories::Model, AppError> {
        input.validate()?;

        let txn = self.db.begin().await?;

        let tree = CategoryService::load_tree_for_update(&txn).await?;
        let existing = tree
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        if let Some(parent_id) = input.parent_id {
            if tree.get(parent_id).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Category {} does not exist",
                    parent_id
                )));
            }
            if tree.would_create_cycle(id, parent_id)? {
                return Err(AppError::BadRequest(format!(
                    "Category {} cannot be moved under {}: it would become its own ancestor",
                    id, parent_id
                )));
            }
        }

        let mut active: categories::ActiveModel = existing.into();
        active.name = Set(input.name.trim().to_string());
        active.parent_id = Set(input.parent_id);
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!("📁 Category updated: {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Delete a category with every subcategory, product and image record below it.
    ///
    /// Stored image files are left in place, as with a database-level cascade.
    pub async fn delete_category(&self, id: i32) -> Result<CascadeReport, AppError> {
        let category = self.get_category(id).await?;

        let txn = self.db.begin().await?;

        let tree = CategoryService::load_tree(&txn).await?;
        let mut category_ids = vec![category.id];
        category_ids.extend(tree.descendants(category.id)?);

        let product_ids: Vec<i32> = Products::find()
            .select_only()
            .column(products::Column::Id)
            .filter(products::Column::CategoryId.is_in(category_ids.clone()))
            .into_tuple()
            .all(&txn)
            .await?;

        let image_rows = ProductImages::delete_many()
            .filter(product_images::Column::ProductId.is_in(product_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;

        let product_rows = Products::delete_many()
            .filter(products::Column::Id.is_in(product_ids))
            .exec(&txn)
            .await?
            .rows_affected;

        // Deepest first so no row outlives its parent
        let mut category_rows = 0;
        for category_id in category_ids.iter().rev() {
            category_rows += Categories::delete_by_id(*category_id)
                .exec(&txn)
                .await?
                .rows_affected;
        }

        txn.commit().await?;

        let report = CascadeReport {
            categories: category_rows,
            products: product_rows,
            images: image_rows,
        };
        tracing::info!(
            "🗑️  Category {} deleted: {} categories, {} products, {} images",
            category.name,
            report.categories,
            report.products,
            report.images
        );
        Ok(report)
    }
}
