use halftime::{
    CatalogChannel, CatalogProduct, Device, Firmware, KeySet, OtaFirmware, Record, normalize,
    normalize_list,
};

use serde_json::Value;

use tracing::{debug, trace};

use crate::catalog::{Catalog, CatalogQuery, NoCatalog};
use crate::error::{Error, ErrorKind, Result};
use crate::operation::{Operation, PayloadShape};
use crate::transport::{HttpTransport, Payload, Transport};

fn unexpected_payload(operation: &Operation, found: PayloadShape) -> Error {
    Error::new(
        ErrorKind::UnexpectedPayload,
        format!(
            "`{}` expected a {:?} payload, found {found:?}",
            operation.path(),
            operation.shape()
        ),
    )
}

/// The non-blocking client.
///
/// Every operation is an `async` method: calling it returns a future which
/// performs no work until it is awaited. The future suspends only while the
/// [`Transport`] performs network I/O.
///
/// Operations are independent of each other. The client holds no cache and
/// no state between calls, so concurrent futures may complete in any order.
#[derive(Debug, Clone)]
pub struct Client<T, C = NoCatalog> {
    transport: T,
    catalog: C,
}

impl Default for Client<HttpTransport> {
    fn default() -> Self {
        Self::new(HttpTransport::new())
    }
}

impl<T: Transport> Client<T> {
    /// Creates a [`Client`] from a [`Transport`], without a software
    /// [`Catalog`].
    #[must_use]
    #[inline]
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            catalog: NoCatalog,
        }
    }
}

impl<T: Transport, C: Catalog> Client<T, C> {
    /// Sets the software [`Catalog`].
    #[must_use]
    #[inline]
    pub fn with_catalog<D: Catalog>(self, catalog: D) -> Client<T, D> {
        Client {
            transport: self.transport,
            catalog,
        }
    }

    /// Returns an immutable reference to the [`Transport`].
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns an immutable reference to the software [`Catalog`].
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Retrieves a [`Device`] and all of its firmwares.
    ///
    /// # Errors
    ///
    /// The transport fails or the payload does not describe a device.
    pub async fn device(&self, identifier: &str) -> Result<Device> {
        self.record(Operation::device(identifier)).await
    }

    /// Retrieves the [`Firmware`] with the given build for a device.
    ///
    /// # Errors
    ///
    /// The transport fails or the payload does not describe a firmware.
    pub async fn firmware(&self, identifier: &str, buildid: &str) -> Result<Firmware> {
        self.record(Operation::firmware(identifier, buildid)).await
    }

    /// Retrieves every [`Firmware`] with the given version.
    ///
    /// # Errors
    ///
    /// The transport fails or one of the firmwares cannot be normalized.
    pub async fn firmwares_by_version(&self, version: &str) -> Result<Vec<Firmware>> {
        self.records(Operation::firmwares_by_version(version)).await
    }

    /// Retrieves every [`KeySet`] known for a device.
    ///
    /// # Errors
    ///
    /// The transport fails or one of the key sets cannot be normalized.
    pub async fn device_keys(&self, identifier: &str) -> Result<Vec<KeySet>> {
        self.records(Operation::device_keys(identifier)).await
    }

    /// Retrieves the [`KeySet`] of a firmware build for a device.
    ///
    /// # Errors
    ///
    /// The transport fails or the payload does not describe a key set.
    pub async fn firmware_keys(&self, identifier: &str, buildid: &str) -> Result<KeySet> {
        self.record(Operation::firmware_keys(identifier, buildid))
            .await
    }

    /// Retrieves the [`OtaFirmware`] with the given build for a device.
    ///
    /// # Errors
    ///
    /// The transport fails or the payload does not describe an update.
    pub async fn ota(&self, identifier: &str, buildid: &str) -> Result<OtaFirmware> {
        self.record(Operation::ota(identifier, buildid)).await
    }

    /// Retrieves every [`OtaFirmware`] with the given version.
    ///
    /// # Errors
    ///
    /// The transport fails or one of the updates cannot be normalized.
    pub async fn otas_by_version(&self, version: &str) -> Result<Vec<OtaFirmware>> {
        self.records(Operation::otas_by_version(version)).await
    }

    /// Retrieves the plain-text documentation of an over-the-air update.
    ///
    /// # Errors
    ///
    /// The transport fails or does not return text.
    pub async fn ota_documentation(&self, identifier: &str, version: &str) -> Result<String> {
        let operation = Operation::ota_documentation(identifier, version);
        match self.fetch(&operation).await? {
            Payload::Text(text) => Ok(text),
            Payload::Json(_) => Err(unexpected_payload(&operation, PayloadShape::Json)),
        }
    }

    /// Lists every product of a software catalog channel.
    ///
    /// # Errors
    ///
    /// The catalog fails.
    pub async fn catalog_products(&self, channel: CatalogChannel) -> Result<Vec<CatalogProduct>> {
        debug!("Listing the `{channel}` catalog");
        self.catalog.products(channel).await
    }

    /// Lists the software catalog products matching a [`CatalogQuery`].
    ///
    /// # Errors
    ///
    /// The catalog fails.
    pub async fn query_catalog(&self, query: &CatalogQuery) -> Result<Vec<CatalogProduct>> {
        debug!("Querying the `{}` catalog", query.searched_channel());
        self.catalog.packages(query).await
    }

    async fn fetch(&self, operation: &Operation) -> Result<Payload> {
        debug!("Dispatching {} {}", operation.method(), operation.path());
        self.transport.fetch(operation).await
    }

    async fn json(&self, operation: &Operation) -> Result<Value> {
        match self.fetch(operation).await? {
            Payload::Json(value) => Ok(value),
            Payload::Text(_) => Err(unexpected_payload(operation, PayloadShape::Text)),
        }
    }

    async fn record<R: Record>(&self, operation: Operation) -> Result<R> {
        let value = self.json(&operation).await?;
        Ok(normalize(value)?)
    }

    async fn records<R: Record>(&self, operation: Operation) -> Result<Vec<R>> {
        let value = self.json(&operation).await?;
        let records = normalize_list(value)?;
        trace!("`{}` returned {} records", operation.path(), records.len());
        Ok(records)
    }
}
