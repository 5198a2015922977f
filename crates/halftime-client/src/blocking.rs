use tokio::runtime::Runtime;

use crate::catalog::{Catalog, NoCatalog};
use crate::client::Client;
use crate::macros::{blocking_methods, for_each_operation};
use crate::scheduler::Scheduler;
use crate::transport::{HttpTransport, Transport};

/// The blocking client.
///
/// It exposes the same methods as [`Client`], each returning a finished
/// result instead of a future.
///
/// The first call builds a single-threaded runtime which is then reused by
/// every following call on this instance. The runtime is shut down by
/// [`BlockingClient::shutdown`] or when the client is dropped.
///
/// A call issued from inside an asynchronous runtime fails with
/// [`ErrorKind::Scheduler`](crate::ErrorKind::Scheduler); use [`Client`]
/// there. Any thread with an entered Tokio runtime context counts, including
/// [`tokio::task::spawn_blocking`] threads and code under
/// [`Runtime::enter`]. On those threads, drive the [`Client`] future with
/// [`Handle::block_on`](tokio::runtime::Handle::block_on) instead.
#[derive(Debug)]
pub struct BlockingClient<T, C = NoCatalog> {
    client: Client<T, C>,
    scheduler: Scheduler,
}

impl Default for BlockingClient<HttpTransport> {
    fn default() -> Self {
        Self::new(Client::default())
    }
}

impl<T: Transport, C: Catalog> BlockingClient<T, C> {
    /// Creates a [`BlockingClient`] wrapping a [`Client`].
    #[must_use]
    #[inline]
    pub fn new(client: Client<T, C>) -> Self {
        Self {
            client,
            scheduler: Scheduler::new(),
        }
    }

    /// Creates a [`BlockingClient`] whose runtime is built by the given
    /// function.
    ///
    /// The function is called at most once per client instance.
    #[must_use]
    #[inline]
    pub fn with_scheduler_builder<F>(client: Client<T, C>, builder: F) -> Self
    where
        F: Fn() -> std::io::Result<Runtime> + Send + Sync + 'static,
    {
        Self {
            client,
            scheduler: Scheduler::with_builder(Box::new(builder)),
        }
    }

    /// Returns an immutable reference to the wrapped [`Client`].
    #[must_use]
    pub const fn client(&self) -> &Client<T, C> {
        &self.client
    }

    /// Returns an immutable reference to the [`Transport`].
    #[must_use]
    pub const fn transport(&self) -> &T {
        self.client.transport()
    }

    /// Returns an immutable reference to the software [`Catalog`].
    #[must_use]
    pub const fn catalog(&self) -> &C {
        self.client.catalog()
    }

    /// Shuts down the [`BlockingClient`], stopping its runtime and releasing
    /// every resource created on it.
    #[inline]
    pub fn shutdown(self) {
        drop(self);
    }

    for_each_operation!(blocking_methods);
}
