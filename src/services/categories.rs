use crate::api::error::AppError;
use crate::entities::{categories, prelude::*, products};
use crate::utils::hierarchy::{CategoryTree, HierarchyError};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct CategoryDetail {
    pub category: categories::Model,
    pub ancestors: Vec<categories::Model>,
    pub subcategories: Vec<categories::Model>,
    pub products: Vec<products::Model>,
}

/// Read side of the category hierarchy
pub struct CategoryService;

impl CategoryService {
    /// A category with its direct children and directly-owned products.
    ///
    /// Only one level is returned; products of subcategories are not gathered.
    pub async fn category_detail(
        db: &impl ConnectionTrait,
        id: i32,
    ) -> Result<CategoryDetail, AppError> {
        let category = Categories::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let ancestors = Self::ancestors(db, &category).await?;

        let subcategories = Categories::find()
            .filter(categories::Column::ParentId.eq(category.id))
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id)
            .all(db)
            .await?;

        let products = Products::find()
            .filter(products::Column::CategoryId.eq(category.id))
            .order_by_asc(products::Column::Id)
            .all(db)
            .await?;

        Ok(CategoryDetail {
            category,
            ancestors,
            subcategories,
            products,
        })
    }

    /// Ancestor chain from the root down to the immediate parent.
    pub async fn ancestors(
        db: &impl ConnectionTrait,
        category: &categories::Model,
    ) -> Result<Vec<categories::Model>, AppError> {
        let mut chain = Vec::new();
        let mut visited = HashSet::from([category.id]);
        let mut child_id = category.id;
        let mut current_parent = category.parent_id;

        while let Some(parent_id) = current_parent {
            if !visited.insert(parent_id) {
                return Err(HierarchyError::Cycle(parent_id).into());
            }

            let parent = Categories::find_by_id(parent_id)
                .one(db)
                .await?
                .ok_or(HierarchyError::MissingParent {
                    category_id: child_id,
                    parent_id,
                })?;

            child_id = parent.id;
            current_parent = parent.parent_id;
            chain.insert(0, parent);
        }

        Ok(chain)
    }

    pub async fn load_tree(db: &impl ConnectionTrait) -> Result<CategoryTree, AppError> {
        let all = Categories::find().all(db).await?;
        Ok(CategoryTree::new(all))
    }

    /// `load_tree` holding row locks until the transaction ends (Postgres).
    ///
    /// SQLite has no row locks; its single writer serializes the same work.
    pub async fn load_tree_for_update(
        db: &impl ConnectionTrait,
    ) -> Result<CategoryTree, AppError> {
        let mut select = Categories::find();
        if db.get_database_backend() == DatabaseBackend::Postgres {
            select = select.lock_exclusive();
        }
        Ok(CategoryTree::new(select.all(db).await?))
    }
}
