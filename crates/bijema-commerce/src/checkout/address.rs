//! Delivery addresses.

use crate::ids::{AddressId, UserId};
use serde::{Deserialize, Serialize};

/// A saved delivery address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Recipient name.
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

fn default_country() -> String {
    "Kenya".to_string()
}

impl Address {
    /// Create an address in the default country.
    pub fn new(
        id: impl Into<AddressId>,
        name: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            name: name.into(),
            email: None,
            street: street.into(),
            city: city.into(),
            state: None,
            zip: None,
            country: default_country(),
            phone: None,
        }
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.street.as_str(), self.city.as_str()];
        if let Some(state) = self.state.as_deref() {
            parts.push(state);
        }
        if let Some(zip) = self.zip.as_deref() {
            parts.push(zip);
        }
        parts.push(self.country.as_str());
        parts.join(", ")
    }
}
