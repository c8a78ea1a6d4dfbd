use crate::api::error::AppError;
use crate::entities::{prelude::*, product_images};
use crate::utils::validation::{sanitize_filename, validate_file_size, validate_image};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use uuid::Uuid;

use super::AdminService;

impl AdminService {
    pub async fn list_images(
        &self,
        product_id: i32,
    ) -> Result<Vec<product_images::Model>, AppError> {
        let product = self.get_product(product_id).await?;
        Ok(product
            .find_related(ProductImages)
            .order_by_asc(product_images::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Store an uploaded image under `product_images/` and attach it to a product.
    pub async fn add_image(
        &self,
        product_id: i32,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<product_images::Model, AppError> {
        let product = self.get_product(product_id).await?;

        validate_file_size(data.len(), self.config.max_image_size)
            .map_err(|e| AppError::PayloadTooLarge(e.to_string()))?;
        let mime = validate_image(&data).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let safe_name =
            sanitize_filename(filename).map_err(|e| AppError::BadRequest(e.to_string()))?;

        let key = format!(
            "{}{}-{}",
            product_images::UPLOAD_PREFIX,
            Uuid::new_v4(),
            safe_name
        );

        self.storage
            .upload_file(&key, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store image {}: {}", key, e)))?;

        let inserted = product_images::ActiveModel {
            product_id: Set(product.id),
            image: Set(key.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(image) => {
                tracing::info!(
                    "🖼️  Image {} ({}) attached to product {}",
                    image.image,
                    mime,
                    product.id
                );
                Ok(image)
            }
            Err(e) => {
                // Don't leave an unreferenced file behind
                if let Err(cleanup) = self.storage.delete_file(&key).await {
                    tracing::warn!("Failed to remove orphaned image {}: {}", key, cleanup);
                }
                Err(e.into())
            }
        }
    }

    /// Delete one image: its stored file, then its record.
    pub async fn delete_image(&self, image_id: i32) -> Result<(), AppError> {
        let image = ProductImages::find_by_id(image_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Image {} not found", image_id)))?;

        self.storage.delete_file(&image.image).await.map_err(|e| {
            AppError::Internal(format!("Failed to delete image file {}: {}", image.image, e))
        })?;

        ProductImages::delete_by_id(image.id).exec(&self.db).await?;

        tracing::info!("🗑️  Image {} removed from product {}", image.image, image.product_id);
        Ok(())
    }
}
