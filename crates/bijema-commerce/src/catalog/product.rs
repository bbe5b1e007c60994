//! Product records as served by the catalog API.

use crate::ids::{ProductId, StoreId, UserId};
use crate::money::{major_units, Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer rating attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Stars, 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// List price before markdown.
    #[serde(with = "major_units", default)]
    pub mrp: Money,
    /// Selling price.
    #[serde(with = "major_units")]
    pub price: Money,
    /// Image URLs, first one is the card image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Category name used by the category filter.
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Store that sells this product.
    #[serde(default)]
    pub store_id: Option<StoreId>,
    #[serde(default)]
    pub rating: Vec<Rating>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create an in-stock product with the given price as both MRP and price.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            mrp: price,
            price,
            images: Vec::new(),
            category: category.into(),
            in_stock: true,
            store_id: None,
            rating: Vec::new(),
            created_at: None,
        }
    }

    /// Average star rating rounded to the nearest star; 0 when unrated.
    pub fn average_rating(&self) -> u8 {
        if self.rating.is_empty() {
            return 0;
        }
        let sum: u32 = self.rating.iter().map(|r| u32::from(r.rating)).sum();
        (sum as f64 / self.rating.len() as f64).round() as u8
    }

    /// Amount saved against the MRP, if the product is marked down.
    pub fn savings(&self) -> Option<Money> {
        if self.mrp.currency != self.price.currency || self.mrp <= self.price {
            return None;
        }
        Some(Money::new(
            self.mrp.amount_cents - self.price.amount_cents,
            self.price.currency,
        ))
    }

    /// Re-tag `price` and `mrp` with the storefront currency.
    pub fn in_currency(mut self, currency: Currency) -> Self {
        self.mrp = self.mrp.in_currency(currency);
        self.price = self.price.in_currency(currency);
        self
    }

    /// Card image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_from_catalog_json() {
        let json = r#"{
            "id": "prod_1",
            "name": "Enamel Sufuria",
            "mrp": 1500,
            "price": 1299.5,
            "images": ["sufuria.png"],
            "category": "Kitchen",
            "storeId": "store_1",
            "rating": [{"rating": 4}, {"rating": 5}],
            "createdAt": "2025-03-01T10:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id.as_str(), "prod_1");
        assert_eq!(product.price, Money::new(129950, Currency::KES));
        assert!(product.in_stock);
        assert_eq!(product.primary_image(), Some("sufuria.png"));
        assert_eq!(product.average_rating(), 5);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_product_savings() {
        let mut product = Product::new("p", "Mop", "Cleaning", Money::new(50000, Currency::KES));
        assert_eq!(product.savings(), None);

        product.mrp = Money::new(60000, Currency::KES);
        assert_eq!(product.savings(), Some(Money::new(10000, Currency::KES)));
    }

    #[test]
    fn test_product_in_currency() {
        let json = r#"{"id": "p1", "name": "Kettle", "mrp": 30, "price": 25.5, "category": "Kitchen"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        let product = product.in_currency(Currency::USD);

        assert_eq!(product.price, Money::new(2550, Currency::USD));
        assert_eq!(product.mrp, Money::new(3000, Currency::USD));
        assert_eq!(product.savings(), Some(Money::new(450, Currency::USD)));
    }

    #[test]
    fn test_unrated_product() {
        let product = Product::new("p", "Mop", "Cleaning", Money::new(50000, Currency::KES));
        assert_eq!(product.average_rating(), 0);
    }
}
