use std::borrow::Cow;
use std::future::Future;

use halftime::{CatalogChannel, CatalogProduct};

use crate::error::{Error, ErrorKind, Result};

/// Search criteria for a software catalog.
///
/// Unset criteria match every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    build_id: Option<Cow<'static, str>>,
    version: Option<Cow<'static, str>>,
    product_id: Option<Cow<'static, str>>,
    channel: CatalogChannel,
}

impl CatalogQuery {
    /// Creates a [`CatalogQuery`] on the default [`CatalogChannel`].
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches products with the given build identifier.
    #[must_use]
    #[inline]
    pub fn build_id(mut self, build_id: impl Into<Cow<'static, str>>) -> Self {
        self.build_id = Some(build_id.into());
        self
    }

    /// Matches products with the given version.
    #[must_use]
    #[inline]
    pub fn version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Matches the product with the given identifier.
    #[must_use]
    #[inline]
    pub fn product_id(mut self, product_id: impl Into<Cow<'static, str>>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Searches the given [`CatalogChannel`].
    #[must_use]
    pub const fn channel(mut self, channel: CatalogChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Returns the build identifier criterion.
    #[must_use]
    pub fn build_id_criterion(&self) -> Option<&str> {
        self.build_id.as_deref()
    }

    /// Returns the version criterion.
    #[must_use]
    pub fn version_criterion(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the product identifier criterion.
    #[must_use]
    pub fn product_id_criterion(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    /// Returns the searched [`CatalogChannel`].
    #[must_use]
    pub const fn searched_channel(&self) -> CatalogChannel {
        self.channel
    }
}

/// A software catalog.
///
/// The client returns the products of a catalog verbatim.
pub trait Catalog: Send + Sync {
    /// Lists every product of a [`CatalogChannel`].
    ///
    /// # Errors
    ///
    /// The catalog cannot be retrieved or parsed.
    fn products(
        &self,
        channel: CatalogChannel,
    ) -> impl Future<Output = Result<Vec<CatalogProduct>>> + Send;

    /// Lists the products matching a [`CatalogQuery`].
    ///
    /// # Errors
    ///
    /// The catalog cannot be retrieved or parsed.
    fn packages(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<Vec<CatalogProduct>>> + Send;
}

/// A [`Catalog`] placeholder used when no catalog has been configured.
///
/// Every lookup fails with [`ErrorKind::Catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoCatalog;

fn no_catalog() -> Error {
    Error::new(ErrorKind::Catalog, "No software catalog has been configured.")
}

impl Catalog for NoCatalog {
    async fn products(&self, _channel: CatalogChannel) -> Result<Vec<CatalogProduct>> {
        Err(no_catalog())
    }

    async fn packages(&self, _query: &CatalogQuery) -> Result<Vec<CatalogProduct>> {
        Err(no_catalog())
    }
}
