use serde::{Deserialize, Serialize};

use nadzor_core::{FieldErrors, ProductId, validate};

/// Country of origin, as named by the backend's country list.
///
/// The authoritative list of countries lives on the backend
/// (`GET /proizvodi/drzave`); the client treats the value as an opaque
/// token and only requires it to be present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Country(String);

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Country {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product record as exchanged with the backend.
///
/// The serial number is generated server-side; the client never sends one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(rename = "nazivProizvoda")]
    pub name: String,
    #[serde(rename = "proizvodjac")]
    pub manufacturer: String,
    #[serde(rename = "drzavaPorijekla")]
    pub country: Country,
    #[serde(rename = "opis", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Generated by the backend; read-only from the client's perspective,
    /// so it is parsed from responses but never serialized back.
    #[serde(rename = "serijskiBroj", skip_serializing, default)]
    pub serial_number: Option<String>,
}

/// Form input for creating or editing a product.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub name: String,
    pub manufacturer: String,
    pub country: String,
    pub description: String,
}

impl ProductDraft {
    /// Run all field checks; on success produce the wire record.
    pub fn validate(&self) -> Result<Product, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check("name", validate::required_text("name", &self.name));
        errors.check(
            "manufacturer",
            validate::required_text("manufacturer", &self.manufacturer),
        );
        errors.check("country", validate::required_text("country", &self.country));

        if !errors.is_empty() {
            return Err(errors);
        }

        let description = self.description.trim();
        Ok(Product {
            id: self.id,
            name: self.name.trim().to_string(),
            manufacturer: self.manufacturer.trim().to_string(),
            country: Country::new(self.country.trim()),
            description: (!description.is_empty()).then(|| description.to_string()),
            serial_number: None,
        })
    }
}
