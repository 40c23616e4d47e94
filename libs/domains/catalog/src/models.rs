use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::query::DEFAULT_PAGE_SIZE;

/// Upper bound on prices, mirroring the numeric(18,2) column.
fn max_price() -> Decimal {
    Decimal::new(99_999_999_999_999_999, 2)
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO || *price > max_price() {
        let mut err = ValidationError::new("range");
        err.message = Some("Price must be between 0 and 999999999999999.99".into());
        return Err(err);
    }
    Ok(())
}

/// Product entity.
///
/// Fields are private: instances exist only through the validated entry
/// points ([`Product::create`], [`Product::apply_update`]) or rehydration
/// from the store. `id` is assigned once and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    is_active: bool,
}

impl Product {
    /// Validated construction path. Assigns a fresh id.
    pub fn create(input: CreateProduct) -> Result<Self, ValidationErrors> {
        input.validate()?;
        Ok(Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            is_active: input.is_active,
        })
    }

    /// Rehydrate from a trusted store row, bypassing validation.
    pub(crate) fn from_parts(
        id: Uuid,
        name: String,
        description: Option<String>,
        price: Decimal,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            is_active,
        }
    }

    /// Replace name, description, price and active flag as one operation.
    /// The id is untouched. Fails without partial mutation when the payload
    /// violates a field constraint.
    pub fn apply_update(&mut self, update: UpdateProduct) -> Result<(), ValidationErrors> {
        update.validate()?;
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.is_active = update.is_active;
        Ok(())
    }

    /// Toggle availability. No validation beyond the type.
    pub fn set_status(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Payload for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = validate_price))]
    pub price: Decimal,
    #[serde(default)]
    pub is_active: bool,
}

/// Payload for updating a product. All four fields are replaced atomically.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = validate_price))]
    pub price: Decimal,
    #[serde(default)]
    pub is_active: bool,
}

/// Payload for toggling the active flag only
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub is_active: bool,
}

/// Sort keys accepted by the listing query. Anything else falls back to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortField {
    #[default]
    Name,
    Price,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-insensitive substring match on the name
    pub name: Option<String>,
    /// Lower price bound (inclusive)
    pub min_price: Option<Decimal>,
    /// Upper price bound (inclusive)
    pub max_price: Option<Decimal>,
    /// Match only products with this active flag
    pub is_active: Option<bool>,
    /// Sort key: "name" or "price" (case-insensitive); defaults to name
    pub sort_by: Option<String>,
    /// Ascending order unless explicitly false
    #[serde(default = "default_true")]
    pub ascending: bool,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size; the listing endpoint defaults to 20 per page
    #[serde(default = "default_api_page_size")]
    pub page_size: i64,
}

fn default_true() -> bool {
    true
}

fn default_page() -> i64 {
    1
}

fn default_api_page_size() -> i64 {
    20
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            name: None,
            min_price: None,
            max_price: None,
            is_active: None,
            sort_by: None,
            ascending: true,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE as i64,
        }
    }
}

impl ProductFilter {
    /// Resolved sort key; unknown or missing values sort by name.
    pub fn sort_field(&self) -> SortField {
        self.sort_by
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// 1-based page; values below 1 clamp to 1.
    pub fn effective_page(&self) -> u64 {
        self.page.max(1) as u64
    }

    /// Page size; values below 1 clamp to the default.
    pub fn effective_page_size(&self) -> u64 {
        if self.page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size as u64
        }
    }

    /// Rows to skip for the requested page.
    pub fn offset(&self) -> u64 {
        (self.effective_page() - 1).saturating_mul(self.effective_page_size())
    }

    /// Name fragment to match, or None when unset or blank.
    pub fn name_fragment(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// A page of products plus the total count of rows matching the filter,
/// regardless of pagination.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_count: u64,
}

/// Listing row: the product without its description
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}

/// Full transfer shape of a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_active: bool,
}

/// Listing response with the total match count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductSummary>,
    pub total_count: u64,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            price: product.price(),
            is_active: product.is_active(),
        }
    }
}

impl From<&Product> for ProductDetail {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            description: product.description().map(|s| s.to_string()),
            price: product.price(),
            is_active: product.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str, price: i64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::from(price),
            is_active: false,
        }
    }

    #[test]
    fn test_create_assigns_id_and_copies_fields() {
        let product = Product::create(CreateProduct {
            name: "Coffee".to_string(),
            description: Some("Beans".to_string()),
            price: Decimal::from(200),
            is_active: true,
        })
        .unwrap();

        assert_eq!(product.name(), "Coffee");
        assert_eq!(product.description(), Some("Beans"));
        assert_eq!(product.price(), Decimal::from(200));
        assert!(product.is_active());
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let err = Product::create(create_input("", 100)).unwrap_err();
        assert!(err.field_errors().contains_key("name"));
    }

    #[test]
    fn test_create_rejects_name_over_100_chars() {
        let err = Product::create(create_input(&"x".repeat(101), 100)).unwrap_err();
        assert!(err.field_errors().contains_key("name"));
    }

    #[test]
    fn test_create_accepts_name_of_exactly_100_chars() {
        assert!(Product::create(create_input(&"x".repeat(100), 100)).is_ok());
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let err = Product::create(create_input("Coffee", -1)).unwrap_err();
        assert!(err.field_errors().contains_key("price"));
    }

    #[test]
    fn test_create_accepts_zero_price() {
        assert!(Product::create(create_input("Coffee", 0)).is_ok());
    }

    #[test]
    fn test_create_rejects_price_over_upper_bound() {
        let input = CreateProduct {
            name: "Coffee".to_string(),
            description: None,
            price: Decimal::new(100_000_000_000_000_000, 2),
            is_active: false,
        };
        assert!(Product::create(input).is_err());
    }

    #[test]
    fn test_empty_name_and_zero_price_is_single_field_failure() {
        // Zero price is valid; only the name should be reported.
        let err = Product::create(create_input("", 0)).unwrap_err();
        let fields = err.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn test_empty_name_and_negative_price_reports_both_fields() {
        let err = Product::create(create_input("", -5)).unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("price"));
    }

    #[test]
    fn test_apply_update_replaces_all_fields_and_keeps_id() {
        let mut product = Product::create(create_input("Coffee", 200)).unwrap();
        let id = product.id();

        product
            .apply_update(UpdateProduct {
                name: "Tea".to_string(),
                description: Some("Loose leaf".to_string()),
                price: Decimal::from(100),
                is_active: true,
            })
            .unwrap();

        assert_eq!(product.id(), id);
        assert_eq!(product.name(), "Tea");
        assert_eq!(product.description(), Some("Loose leaf"));
        assert_eq!(product.price(), Decimal::from(100));
        assert!(product.is_active());
    }

    #[test]
    fn test_apply_update_rejects_invalid_payload_without_mutation() {
        let mut product = Product::create(create_input("Coffee", 200)).unwrap();

        let result = product.apply_update(UpdateProduct {
            name: String::new(),
            description: None,
            price: Decimal::from(-1),
            is_active: false,
        });

        assert!(result.is_err());
        assert_eq!(product.name(), "Coffee");
        assert_eq!(product.price(), Decimal::from(200));
    }

    #[test]
    fn test_set_status_touches_only_the_flag() {
        let mut product = Product::create(create_input("Coffee", 200)).unwrap();
        product.set_status(true);
        assert!(product.is_active());
        assert_eq!(product.name(), "Coffee");
    }

    #[test]
    fn test_sort_field_parsing_is_case_insensitive() {
        let mut filter = ProductFilter::default();
        filter.sort_by = Some("PRICE".to_string());
        assert_eq!(filter.sort_field(), SortField::Price);

        filter.sort_by = Some("Name".to_string());
        assert_eq!(filter.sort_field(), SortField::Name);
    }

    #[test]
    fn test_sort_field_defaults_to_name_for_unknown_keys() {
        let mut filter = ProductFilter::default();
        filter.sort_by = Some("description".to_string());
        assert_eq!(filter.sort_field(), SortField::Name);

        filter.sort_by = None;
        assert_eq!(filter.sort_field(), SortField::Name);
    }

    #[test]
    fn test_page_clamping() {
        let mut filter = ProductFilter::default();
        filter.page = -3;
        filter.page_size = 0;
        assert_eq!(filter.effective_page(), 1);
        assert_eq!(filter.effective_page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn test_blank_name_filter_is_ignored() {
        let mut filter = ProductFilter::default();
        filter.name = Some("   ".to_string());
        assert_eq!(filter.name_fragment(), None);
    }
}
