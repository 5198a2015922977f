use std::future::{Future, IntoFuture};

use futures_util::future::{Either, Ready, ready};

use tokio::runtime::Runtime;

use tracing::debug;

use crate::catalog::{Catalog, NoCatalog};
use crate::client::Client;
use crate::error::Result;
use crate::macros::{dual_methods, for_each_operation};
use crate::scheduler::Scheduler;
use crate::transport::{HttpTransport, Transport};

/// The outcome of a [`DualClient`] call.
///
/// Both variants can be awaited, so asynchronous code can write
/// `client.device(id).await` without inspecting the variant.
#[must_use = "a pending call does nothing unless it is awaited"]
pub enum Call<F: Future> {
    /// The operation has not started yet. It runs when the future is
    /// awaited.
    Pending(F),
    /// The operation has already run to completion.
    Ready(F::Output),
}

impl<F: Future> std::fmt::Debug for Call<F>
where
    F::Output: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending(_) => f.write_str("Pending"),
            Self::Ready(output) => f.debug_tuple("Ready").field(output).finish(),
        }
    }
}

impl<F: Future> Call<F> {
    /// Checks whether the operation is still pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns the finished output.
    ///
    /// If [`None`], the call is pending and must be awaited.
    #[must_use]
    pub fn ready(self) -> Option<F::Output> {
        match self {
            Self::Ready(output) => Some(output),
            Self::Pending(_) => None,
        }
    }

    /// Returns the pending future.
    ///
    /// If [`None`], the operation has already finished.
    #[must_use]
    pub fn pending(self) -> Option<F> {
        match self {
            Self::Pending(future) => Some(future),
            Self::Ready(_) => None,
        }
    }
}

impl<F: Future> IntoFuture for Call<F> {
    type Output = F::Output;
    type IntoFuture = Either<F, Ready<F::Output>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Pending(future) => Either::Left(future),
            Self::Ready(output) => Either::Right(ready(output)),
        }
    }
}

/// A client which picks the calling convention on every call.
///
/// Every method checks, once per invocation, whether an asynchronous runtime
/// is driving the calling thread:
///
/// - If so, it returns the not-yet-started operation as [`Call::Pending`],
///   without blocking. The caller awaits it on its own runtime.
/// - Otherwise, it drives the operation to completion on a runtime owned by
///   this client and returns [`Call::Ready`].
///
/// The owned runtime is built on the first blocking call, reused for every
/// following one, and shut down when the client is dropped. Its worker keeps
/// serving the connections opened by blocking calls, so pending calls awaited
/// on the caller's runtime can reuse them.
///
/// A thread counts as driven by a runtime whenever a Tokio runtime context
/// is entered on it. This includes [`tokio::task::spawn_blocking`] threads
/// and code under [`Runtime::enter`]: there, calls are returned as
/// [`Call::Pending`] and can be driven with
/// [`Handle::block_on`](tokio::runtime::Handle::block_on).
#[derive(Debug)]
pub struct DualClient<T, C = NoCatalog> {
    client: Client<T, C>,
    scheduler: Scheduler,
}

impl Default for DualClient<HttpTransport> {
    fn default() -> Self {
        Self::new(Client::default())
    }
}

impl<T: Transport, C: Catalog> DualClient<T, C> {
    /// Creates a [`DualClient`] wrapping a [`Client`].
    #[must_use]
    #[inline]
    pub fn new(client: Client<T, C>) -> Self {
        Self {
            client,
            scheduler: Scheduler::new(),
        }
    }

    /// Creates a [`DualClient`] whose runtime is built by the given function.
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

    /// Shuts down the [`DualClient`], stopping its runtime, if any.
    #[inline]
    pub fn shutdown(self) {
        drop(self);
    }

    for_each_operation!(dual_methods);

    fn dispatch<F, O>(&self, future: F) -> Call<F>
    where
        F: Future<Output = Result<O>>,
    {
        if Scheduler::is_running() {
            debug!("Runtime detected, deferring the call");
            Call::Pending(future)
        } else {
            debug!("No runtime detected, blocking on the call");
            Call::Ready(self.scheduler.block_on(future))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::IntoFuture;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::runtime::{Builder, Handle};

    use crate::client::Client;
    use crate::error::ErrorKind;
    use crate::tests::{
        DEVICE_PAYLOAD, MockTransport, firmware_payload, init_logging, serve, service_router,
    };
    use crate::transport::HttpTransport;

    use super::{Call, DualClient};

    fn dual_client() -> DualClient<MockTransport> {
        init_logging();
        DualClient::new(Client::new(
            MockTransport::new()
                .with_json("/device/iPhone12,1", DEVICE_PAYLOAD)
                .with_value("/ipsw/iPhone12,1/19A346", firmware_payload("19A346")),
        ))
    }

    #[test]
    fn ready_outside_runtime() {
        let client = dual_client();

        let call = client.device("iPhone12,1");
        assert!(!call.is_pending());

        let device = call.ready().unwrap().unwrap();
        assert_eq!(device.name(), "iPhone 11");

        let error = client
            .firmware("iPhone12,1", "none")
            .ready()
            .unwrap()
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidParameter);
    }

    #[tokio::test]
    async fn pending_inside_runtime() {
        let client = dual_client();

        let call = client.device("iPhone12,1");
        assert!(call.is_pending());

        // Nothing runs until the call is awaited.
        assert!(client.transport().calls().is_empty());

        let device = call.await.unwrap();
        assert_eq!(device.identifier(), "iPhone12,1");
        assert_eq!(client.transport().calls(), ["/device/iPhone12,1"]);

        // Failures surface when the call is awaited.
        let call = client.firmware("iPhone12,1", "none");
        assert!(call.is_pending());
        assert_eq!(
            call.await.unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );
    }

    #[tokio::test]
    async fn dual_mode_equivalence() {
        // The blocking call runs on a thread with no runtime.
        let ready = std::thread::spawn(|| {
            let client = dual_client();
            client.firmware("iPhone12,1", "19A346").ready().unwrap()
        })
        .join()
        .unwrap()
        .unwrap();

        let client = dual_client();
        let pending = client.firmware("iPhone12,1", "19A346");
        assert!(pending.is_pending());

        assert_eq!(pending.await.unwrap(), ready);
    }

    #[test]
    fn blocking_then_pending_on_pooled_connections() {
        init_logging();
        let client = DualClient::new(Client::new(
            HttpTransport::new().base_url(serve(service_router())),
        ));

        // Opens a keep-alive connection on the owned runtime.
        let ready = client
            .firmware("iPhone12,1", "19A346")
            .ready()
            .unwrap()
            .unwrap();

        let runtime = Builder::new_multi_thread().enable_all().build().unwrap();
        let pending = runtime
            .block_on(async {
                let call = client.firmware("iPhone12,1", "19A346");
                assert!(call.is_pending());
                tokio::time::timeout(Duration::from_secs(5), call.into_future()).await
            })
            .expect("a pending call must not hang on a pooled connection")
            .unwrap();

        assert_eq!(pending, ready);

        let again = client
            .firmware("iPhone12,1", "19A346")
            .ready()
            .unwrap()
            .unwrap();
        assert_eq!(again, ready);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn blocking_pool_threads_receive_pending_calls() {
        let client = dual_client();

        let device = tokio::task::spawn_blocking(move || {
            let call = client.device("iPhone12,1");
            assert!(call.is_pending());
            Handle::current().block_on(call.into_future())
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(device.name(), "iPhone 11");
    }

    #[test]
    fn entered_runtime_receives_pending_calls() {
        let client = dual_client();
        let runtime = Builder::new_current_thread().enable_all().build().unwrap();

        let call = {
            let _guard = runtime.enter();
            client.device("iPhone12,1")
        };
        assert!(call.is_pending());

        let device = runtime.block_on(call.into_future()).unwrap();
        assert_eq!(device.identifier(), "iPhone12,1");

        // Once the guard is dropped, calls block again.
        assert!(!client.device("iPhone12,1").is_pending());
    }

    #[test]
    fn one_runtime_per_client() {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);

        let client = DualClient::with_scheduler_builder(
            Client::new(MockTransport::new().with_json("/device/iPhone12,1", DEVICE_PAYLOAD)),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Builder::new_current_thread().enable_all().build()
            },
        );

        assert!(client.device("iPhone12,1").ready().unwrap().is_ok());
        assert!(client.device("iPhone12,1").ready().unwrap().is_ok());

        assert_eq!(builds.load(Ordering::SeqCst), 1);

        client.shutdown();
    }

    #[test]
    fn call_accessors() {
        let ready: Call<std::future::Ready<u8>> = Call::Ready(3);
        assert_eq!(format!("{ready:?}"), "Ready(3)");
        assert_eq!(ready.ready(), Some(3));

        let pending = Call::Pending(std::future::ready(4_u8));
        assert_eq!(format!("{pending:?}"), "Pending");
        assert!(pending.pending().is_some());
    }

    #[test]
    fn ready_call_can_be_awaited() {
        let call: Call<std::future::Ready<u8>> = Call::Ready(5);

        let output = Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(async { call.await });

        assert_eq!(output, 5);
    }
}
