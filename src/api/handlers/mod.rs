pub mod admin;
pub mod catalog;
pub mod categories;
pub mod health;
pub mod types;
