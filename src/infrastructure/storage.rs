use crate::config::CatalogConfig;
use crate::services::storage::{LocalStorageService, S3StorageService, StorageService};
use aws_sdk_s3::config::Region;
use std::env;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &CatalogConfig) -> anyhow::Result<Arc<dyn StorageService>> {
    let Ok(endpoint_url) = env::var("MINIO_ENDPOINT") else {
        info!("🗂️  Local Storage: {}", config.media_root);
        tokio::fs::create_dir_all(&config.media_root).await?;
        return Ok(Arc::new(LocalStorageService::new(&config.media_root)));
    };

    let access_key = env::var("MINIO_ACCESS_KEY")
        .map_err(|_| anyhow::anyhow!("MINIO_ACCESS_KEY must be set when MINIO_ENDPOINT is"))?;
    let secret_key = env::var("MINIO_SECRET_KEY")
        .map_err(|_| anyhow::anyhow!("MINIO_SECRET_KEY must be set when MINIO_ENDPOINT is"))?;
    let bucket = env::var("MINIO_BUCKET")
        .map_err(|_| anyhow::anyhow!("MINIO_BUCKET must be set when MINIO_ENDPOINT is"))?;

    info!("☁️  S3 Storage: {} (Bucket: {})", endpoint_url, bucket);

    let aws_config = aws_config::from_env()
        .endpoint_url(&endpoint_url)
        .region(Region::new("us-east-1"))
        .credentials_provider(aws_sdk_s3::config::Credentials::new(
            access_key, secret_key, None, None, "static",
        ))
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .build();

    let s3_client = aws_sdk_s3::Client::from_conf(s3_config);
    Ok(Arc::new(S3StorageService::new(s3_client, bucket)))
}
