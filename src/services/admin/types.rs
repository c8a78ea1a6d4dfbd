use crate::utils::validation::{validate_not_blank, validate_price};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CategoryInput {
    #[validate(
        length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    pub parent_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct ProductInput {
    #[validate(
        length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    pub category_id: i32,
}

/// Which parent a category listing is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParentFilter {
    #[default]
    Any,
    Root,
    Id(i32),
}

impl ParentFilter {
    /// `root` selects top-level categories, a number selects children of that id.
    pub fn from_param(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("") => Some(Self::Any),
            Some("root") => Some(Self::Root),
            Some(id) => id.parse().ok().map(Self::Id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryListFilter {
    pub parent: ParentFilter,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductListFilter {
    pub category_id: Option<i32>,
    pub search: Option<String>,
    pub added_from: Option<DateTime<Utc>>,
    pub added_to: Option<DateTime<Utc>>,
}

/// Rows removed by a category cascade delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CascadeReport {
    pub categories: u64,
    pub products: u64,
    pub images: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parent_filter_from_param() {
        assert_eq!(ParentFilter::from_param(None), Some(ParentFilter::Any));
        assert_eq!(ParentFilter::from_param(Some("root")), Some(ParentFilter::Root));
        assert_eq!(ParentFilter::from_param(Some("12")), Some(ParentFilter::Id(12)));
        assert_eq!(ParentFilter::from_param(Some("shoes")), None);
    }

    #[test]
    fn test_product_input_validation() {
        let valid = ProductInput {
            name: "Trail Shoe".to_string(),
            description: String::new(),
            price: Decimal::from_str("89.99").unwrap(),
            category_id: 1,
        };
        assert!(valid.validate().is_ok());

        let too_precise = ProductInput {
            price: Decimal::from_str("89.999").unwrap(),
            ..valid.clone()
        };
        assert!(too_precise.validate().is_err());

        let blank = ProductInput {
            name: "  ".to_string(),
            ..valid
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_category_input_validation() {
        let long = CategoryInput {
            name: "x".repeat(256),
            parent_id: None,
        };
        assert!(long.validate().is_err());

        let ok = CategoryInput {
            name: "Footwear".to_string(),
            parent_id: Some(1),
        };
        assert!(ok.validate().is_ok());
    }
}
