pub mod admin;
pub mod catalog;
pub mod categories;
pub mod storage;
