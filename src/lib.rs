pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::CatalogConfig;
use crate::services::admin::AdminService;
use crate::services::catalog::CatalogService;
use crate::services::storage::StorageService;
use api::handlers::{admin, catalog, categories, health};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::catalog::product_list,
        api::handlers::catalog::product_detail,
        api::handlers::categories::category_detail,
        api::handlers::health::health_check,
        api::handlers::admin::categories::list_categories,
        api::handlers::admin::categories::create_category,
        api::handlers::admin::categories::get_category,
        api::handlers::admin::categories::update_category,
        api::handlers::admin::categories::delete_category,
        api::handlers::admin::products::list_products,
        api::handlers::admin::products::create_product,
        api::handlers::admin::products::get_product,
        api::handlers::admin::products::update_product,
        api::handlers::admin::products::delete_product,
        api::handlers::admin::images::list_images,
        api::handlers::admin::images::upload_image,
        api::handlers::admin::images::delete_image,
    ),
    components(
        schemas(
            api::handlers::types::CategoryResponse,
            api::handlers::types::ProductResponse,
            api::handlers::types::ProductImageResponse,
            api::handlers::types::ProductListResponse,
            api::handlers::types::ProductDetailResponse,
            api::handlers::types::CategoryDetailResponse,
            api::handlers::types::CategoryPageResponse,
            api::handlers::types::ProductPageResponse,
            api::handlers::types::DeleteProductResponse,
            api::handlers::health::HealthResponse,
            services::admin::CategoryInput,
            services::admin::ProductInput,
            services::admin::CascadeReport,
            services::catalog::SortKey,
            utils::pagination::PageMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "catalog", description = "Product list, product and category pages"),
        (name = "admin", description = "Catalog administration"),
        (name = "system", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_token",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn StorageService>,
    pub catalog: Arc<CatalogService>,
    pub admin: Arc<AdminService>,
    pub config: CatalogConfig,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        storage: Arc<dyn StorageService>,
        config: CatalogConfig,
    ) -> Self {
        let catalog = Arc::new(CatalogService::new(db.clone(), config.page_size));
        let admin = Arc::new(AdminService::new(
            db.clone(),
            storage.clone(),
            config.clone(),
        ));

        Self {
            db,
            storage,
            catalog,
            admin,
            config,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/categories",
            get(admin::list_categories).post(admin::create_category),
        )
        .route(
            "/categories/:id",
            get(admin::get_category)
                .put(admin::update_category)
                .delete(admin::delete_category),
        )
        .route(
            "/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/products/:id",
            get(admin::get_product)
                .put(admin::update_product)
                .delete(admin::delete_product),
        )
        .route(
            "/products/:id/images",
            get(admin::list_images)
                .post(admin::upload_image)
                .layer(DefaultBodyLimit::max(
                    state.config.max_image_size + 1024 * 1024, // multipart overhead
                )),
        )
        .route("/images/:id", delete(admin::delete_image))
        .route_layer(from_fn_with_state(
            state.clone(),
            api::middleware::admin_auth::admin_auth_middleware,
        ));

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(catalog::product_list))
        .route("/product/:id/", get(catalog::product_detail))
        .route("/product/:id", get(catalog::product_detail))
        .route("/category/:id/", get(categories::category_detail))
        .route("/category/:id", get(categories::category_detail))
        .route("/health", get(health::health_check))
        .nest("/admin", admin_routes);

    let media_url = state.config.media_url.as_str();
    if let Some(root) = state.storage.local_root() {
        if media_url.starts_with('/') && media_url.len() > 1 {
            app = app.nest_service(media_url, ServeDir::new(root));
        }
    }

    app.layer(from_fn(api::middleware::metrics::metrics_middleware))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &CatalogConfig) -> CorsLayer {
    let allow_origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
