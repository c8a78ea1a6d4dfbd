use crate::api::error::AppError;
use crate::config::CatalogConfig;
use crate::entities::prelude::*;
use crate::services::storage::StorageService;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;

pub mod categories;
pub mod images;
pub mod products;
pub mod types;

pub use types::*;

/// Write side of the catalog: CRUD for categories, products and their images.
pub struct AdminService {
    db: DatabaseConnection,
    storage: Arc<dyn StorageService>,
    config: CatalogConfig,
}

impl AdminService {
    pub fn new(
        db: DatabaseConnection,
        storage: Arc<dyn StorageService>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            db,
            storage,
            config,
        }
    }

    async fn ensure_category_exists(&self, id: i32) -> Result<(), AppError> {
        Categories::find_by_id(id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::BadRequest(format!("Category {} does not exist", id)))
    }
}
