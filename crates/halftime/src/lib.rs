//! `halftime` defines the records returned by a firmware metadata service and
//! the normalizer which builds them from decoded JSON payloads.
//!
//! The service describes device models, `IPSW` firmwares, over-the-air
//! updates and firmware decryption keys. Payloads arrive as untyped JSON
//! values. Every record declares its required and optional fields once, in
//! its `serde` derive, and the normalizer validates a payload against that
//! declaration before building the [`Record`].
//!
//! Timestamps are accepted only in the `YYYY-MM-DDTHH:MM:SSZ` format and are
//! always bound to UTC. Any other format is reported as a
//! [`NormalizationError`] naming the record and the field.
//!
//! Records are immutable values: their fields can only be read through
//! accessors, and they hold no reference to the client which fetched them.
//!
//! This crate performs no I/O and does not depend on any asynchronous
//! runtime. The `halftime-client` crate fetches the payloads.

#![deny(unsafe_code)]
#![deny(missing_docs)]

/// Software catalog products and channels.
pub mod catalog;
/// Device models and their board variants.
pub mod device;
/// Normalization errors.
pub mod error;
/// `IPSW` firmwares and over-the-air updates.
pub mod firmware;
/// Firmware decryption keys.
pub mod keys;
/// Construction of records from decoded JSON payloads.
pub mod normalize;
/// Timestamp canonicalization.
pub mod timestamp;

pub use catalog::{CatalogChannel, CatalogProduct};
pub use device::{Board, Device};
pub use error::{NormalizationCause, NormalizationError};
pub use firmware::{Firmware, OtaFirmware};
pub use keys::{Key, KeySet};
pub use normalize::{Record, normalize, normalize_list};
