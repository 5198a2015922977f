use std::future::Future;
use std::sync::{Mutex, OnceLock, PoisonError};

use tokio::runtime::{Builder, Handle, Runtime};

use tracing::info;

use crate::error::{Error, ErrorKind, Result};

/// A function building the runtime which drives blocking calls.
pub(crate) type SchedulerBuilder = Box<dyn Fn() -> std::io::Result<Runtime> + Send + Sync>;

// A single worker keeps driving connections opened by blocking calls, so
// they remain usable by pending calls awaited on another runtime.
fn single_worker_runtime() -> std::io::Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("halftime-scheduler")
        .enable_all()
        .build()
}

/// The runtime owned by a blocking facade.
///
/// The runtime is built on the first blocking call and reused for every
/// following call, so resources created on it, such as pooled connections,
/// survive between calls. Its worker thread keeps those resources alive
/// between calls. It is shut down when the scheduler is dropped.
pub(crate) struct Scheduler {
    runtime: OnceLock<Runtime>,
    build_lock: Mutex<()>,
    builder: SchedulerBuilder,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("started", &self.runtime.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self::with_builder(Box::new(single_worker_runtime))
    }

    pub(crate) fn with_builder(builder: SchedulerBuilder) -> Self {
        Self {
            runtime: OnceLock::new(),
            build_lock: Mutex::new(()),
            builder,
        }
    }

    /// Checks whether an asynchronous runtime is driving the calling thread.
    ///
    /// Tokio only reports whether a runtime context is entered on the thread.
    /// Threads of the blocking pool, and code between `Runtime::enter` and
    /// the guard drop, are in a runtime context without being driven by it,
    /// and are reported as running too. Telling them apart from the root
    /// future of `Runtime::block_on` is not possible through the public API,
    /// and blocking there would panic.
    pub(crate) fn is_running() -> bool {
        Handle::try_current().is_ok()
    }

    /// Drives a future to completion on the owned runtime, blocking the
    /// calling thread.
    pub(crate) fn block_on<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        // Blocking here would stall the runtime which drives this thread.
        if Self::is_running() {
            return Err(Error::new(
                ErrorKind::Scheduler,
                "A blocking call cannot be issued from inside an asynchronous runtime.",
            ));
        }

        self.runtime()?.block_on(future)
    }

    fn runtime(&self) -> Result<&Runtime> {
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime);
        }

        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another thread may have built the runtime while this one waited.
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime);
        }

        let runtime = (self.builder)()?;
        info!("Scheduler started");

        Ok(self.runtime.get_or_init(|| runtime))
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            // Unlike a plain drop, this is allowed from asynchronous contexts.
            runtime.shutdown_background();
            info!("Scheduler shut down");
        }
    }
}
