use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Stored product as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub available: bool,
}

/// Create/update payload. Every field may be absent so that the validator,
/// not the deserializer, decides what is missing. `id` is accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl ProductInput {
    /// Fully populated input, handy for tests and seeding.
    pub fn new(name: impl Into<String>, description: Option<&str>, price: f64, available: bool) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            description: description.map(str::to_string),
            price: Some(price),
            available: Some(available),
        }
    }
}

/// Record content without identity; the only thing a store accepts on write.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub available: bool,
}

impl ProductDraft {
    pub fn with_id(self, id: Uuid) -> Product {
        Product { id, name: self.name, description: self.description, price: self.price, available: self.available }
    }
}

impl TryFrom<ProductInput> for ProductDraft {
    type Error = ServiceError;

    /// Only checks presence; business rules live in the validator.
    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        match (input.name, input.price, input.available) {
            (Some(name), Some(price), Some(available)) => Ok(Self { name, description: input.description, price, available }),
            (name, price, available) => {
                let missing: Vec<&str> = [("name", name.is_none()), ("price", price.is_none()), ("available", available.is_none())]
                    .into_iter()
                    .filter_map(|(field, absent)| absent.then_some(field))
                    .collect();
                Err(ServiceError::InvalidInput(format!("missing required field(s): {}", missing.join(", "))))
            }
        }
    }
}

impl From<models::product::Model> for Product {
    fn from(m: models::product::Model) -> Self {
        Self { id: m.id, name: m.name, description: m.description, price: m.price, available: m.available }
    }
}

impl From<Product> for models::product::Model {
    fn from(p: Product) -> Self {
        Self { id: p.id, name: p.name, description: p.description, price: p.price, available: p.available }
    }
}
