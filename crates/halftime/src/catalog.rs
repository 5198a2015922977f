use indexmap::IndexMap;

use serde::{Deserialize, Serialize};

use serde_json::Value;

use crate::normalize::Record;

/// A software catalog channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CatalogChannel {
    /// Public beta seed.
    #[default]
    PublicSeed,
    /// Customer seed.
    CustomerSeed,
    /// Developer seed.
    DeveloperSeed,
    /// Production releases.
    Production,
}

impl CatalogChannel {
    /// Returns the catalog identifier of the channel.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::PublicSeed => "publicseed",
            Self::CustomerSeed => "customerseed",
            Self::DeveloperSeed => "seed",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for CatalogChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.identifier().fmt(f)
    }
}

/// A software catalog product.
///
/// Products are returned exactly as the catalog reports them. The product
/// identifier is the only field read by name, and it may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product_id: Option<String>,
    #[serde(flatten)]
    details: IndexMap<String, Value>,
}

impl CatalogProduct {
    /// Returns the product identifier.
    #[must_use]
    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    /// Returns the catalog field with the given name.
    #[must_use]
    pub fn detail(&self, name: &str) -> Option<&Value> {
        self.details.get(name)
    }

    /// Returns every catalog field other than the product identifier.
    #[must_use]
    pub const fn details(&self) -> &IndexMap<String, Value> {
        &self.details
    }
}

impl Record for CatalogProduct {
    const NAME: &'static str = "CatalogProduct";
}
