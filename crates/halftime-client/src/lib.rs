//! `halftime-client` is a library for querying a firmware metadata service:
//! device models, `IPSW` firmwares, decryption keys and over-the-air updates,
//! plus the products of an operating system software catalog.
//!
//! Every operation is implemented once, as an `async` method of [`Client`].
//! The same operations are exposed through three facades sharing their
//! method names:
//!
//! - [`Client`] returns futures. Calling a method performs no work until the
//!   returned future is awaited on the caller's runtime.
//! - [`BlockingClient`] returns finished results, blocking the calling
//!   thread on a runtime owned by the client. The runtime is built on the
//!   first call and reused until the client is shut down.
//! - [`DualClient`] decides on every call. From inside an asynchronous
//!   runtime it returns a [`Call::Pending`] future, otherwise it blocks and
//!   returns [`Call::Ready`]. A [`Call`] can always be awaited.
//!
//! Payloads are fetched by a [`Transport`]. The default [`HttpTransport`]
//! contacts the public service over `HTTP`. Decoded payloads are
//! normalized into the typed records of the [`halftime`] crate, with every
//! timestamp bound to UTC.
//!
//! Failures are never retried, logged or swallowed: transport failures,
//! normalization failures and identifiers rejected by the service are all
//! returned to the caller as an [`Error`]. No timeout is enforced unless one
//! is configured on the transport.

#![deny(unsafe_code)]
#![deny(missing_docs)]

/// The blocking client.
pub mod blocking;
/// Software catalog interface.
pub mod catalog;
/// The non-blocking client.
pub mod client;
/// The client which picks the calling convention on every call.
pub mod dispatch;
/// Error management.
pub mod error;
/// The logical operations of the service.
pub mod operation;
/// Network transports.
pub mod transport;

mod macros;
mod scheduler;

pub use blocking::BlockingClient;
pub use catalog::{Catalog, CatalogQuery, NoCatalog};
pub use client::Client;
pub use dispatch::{Call, DualClient};
pub use error::{Error, ErrorKind, Result};
pub use operation::{Method, Operation, PayloadShape};
pub use transport::{DEFAULT_BASE_URL, HttpTransport, Payload, Transport};

pub use halftime;
