pub mod hierarchy;
pub mod pagination;
pub mod search;
pub mod validation;
