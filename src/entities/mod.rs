pub mod prelude;

pub mod categories;
pub mod product_images;
pub mod products;
