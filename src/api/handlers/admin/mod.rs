pub mod categories;
pub mod images;
pub mod products;

pub use categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
pub use images::{delete_image, list_images, upload_image};
pub use products::{create_product, delete_product, get_product, list_products, update_product};
