pub use super::categories::Entity as Categories;
pub use super::product_images::Entity as ProductImages;
pub use super::products::Entity as Products;
