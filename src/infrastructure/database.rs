use crate::entities::{categories, product_images, products};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Schema,
    Statement,
};
use std::env;
use std::time::Duration;
use tracing::info;

pub async fn setup_database() -> anyhow::Result<DatabaseConnection> {
    let db_url = env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    info!("📂 Database: {}", db_url);

    let mut opt = ConnectOptions::new(&db_url);
    opt.max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    info!("✅ Database connected successfully");

    run_migrations(&db).await?;

    Ok(db)
}

pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    let builder = db.get_database_backend();

    if builder == DatabaseBackend::Postgres {
        info!("🔄 Running SQLx migrations for PostgreSQL...");
        sqlx::migrate!("./migrations")
            .run(db.get_postgres_connection_pool())
            .await?;
        return Ok(());
    }

    info!("🔄 Running SeaORM auto-migrations for SQLite/Other...");
    let schema = Schema::new(builder);

    // Parents before children so foreign keys resolve
    let stmts = vec![
        schema
            .create_table_from_entity(categories::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(products::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(product_images::Entity)
            .if_not_exists()
            .to_owned(),
    ];

    for stmt in stmts {
        db.execute(builder.build(&stmt)).await?;
    }

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_categories_parent_id ON categories(parent_id);",
        "CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id);",
        "CREATE INDEX IF NOT EXISTS idx_products_date_added ON products(date_added);",
        "CREATE INDEX IF NOT EXISTS idx_product_images_product_id ON product_images(product_id);",
    ];
    for sql in indexes {
        db.execute(Statement::from_string(builder, sql.to_string()))
            .await?;
    }

    Ok(())
}
