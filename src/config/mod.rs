use std::env;

/// Runtime configuration for the catalog service
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Products per page on the public list (default: 10)
    pub page_size: u64,

    /// Rows per page on admin listings (default: 100)
    pub admin_page_size: u64,

    /// Directory holding uploaded media when using local storage (default: "media")
    pub media_root: String,

    /// Public URL prefix media is served under (default: "/media")
    pub media_url: String,

    /// Maximum product image size in bytes (default: 10 MB)
    pub max_image_size: usize,

    /// Bearer token required on /admin routes. Admin API is disabled when unset.
    pub admin_token: Option<String>,

    /// Allowed CORS Origins (comma separated)
    pub allowed_origins: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            admin_page_size: 100,
            media_root: "media".to_string(),
            media_url: "/media".to_string(),
            max_image_size: 10 * 1024 * 1024, // 10 MB
            admin_token: None,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(), // Vite default
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v: &u64| v > 0)
                .unwrap_or(default.page_size),

            admin_page_size: env::var("ADMIN_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v: &u64| v > 0)
                .unwrap_or(default.admin_page_size),

            media_root: env::var("MEDIA_ROOT").unwrap_or(default.media_root),

            media_url: env::var("MEDIA_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(default.media_url),

            max_image_size: env::var("MAX_IMAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_image_size),

            admin_token: env::var("ADMIN_TOKEN").ok().filter(|v| !v.is_empty()),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Config for local development and tests (admin enabled with a fixed token)
    pub fn development() -> Self {
        Self {
            admin_token: Some("dev-admin-token".to_string()),
            ..Self::default()
        }
    }

    /// Public URL of a stored file key
    pub fn media_url_for(&self, key: &str) -> String {
        format!("{}/{}", self.media_url, key.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.admin_page_size, 100);
        assert_eq!(config.media_root, "media");
        assert!(config.admin_token.is_none());
    }

    #[test]
    fn test_development_config() {
        let config = CatalogConfig::development();
        assert!(config.admin_token.is_some());
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_media_url_for() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.media_url_for("product_images/a.png"),
            "/media/product_images/a.png"
        );
    }

    #[test]
    fn test_from_env_ignores_zero_page_size() {
        unsafe { env::set_var("PAGE_SIZE", "0") };
        let config = CatalogConfig::from_env();
        unsafe { env::remove_var("PAGE_SIZE") };
        assert_eq!(config.page_size, 10);
    }
}
