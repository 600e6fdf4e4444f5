use crate::domain::{BoxError, EntryPatch, LogEntry};
use futures::future::BoxFuture;
use std::future::Future;

/// Outcome of one hook invocation: `Ok(Some(patch))` mutates the working
/// entry by shallow merge, `Ok(None)` passes it through unchanged, `Err`
/// is rerouted to the `on_error` event by the emission engine.
pub type HookResult = Result<Option<EntryPatch>, BoxError>;

/// A callback subscribed to one lifecycle event.
///
/// Hooks receive an owned snapshot of the working entry; they never observe
/// partially-mutated shared state. Implementations may suspend (perform
/// I/O); the pipeline awaits each hook before invoking the next one. There
/// is no timeout — a hook that never settles stalls the pipeline, so
/// long-running callbacks should be bounded externally (for example with
/// `tokio::time::timeout`).
pub trait Hook: Send + Sync {
    fn call(&self, entry: LogEntry) -> BoxFuture<'static, HookResult>;
}

/// Adapter turning a synchronous closure into a [`Hook`].
pub struct FnHook<F> {
    f: F,
}

impl<F> FnHook<F>
where
    F: Fn(&LogEntry) -> HookResult + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Hook for FnHook<F>
where
    F: Fn(&LogEntry) -> HookResult + Send + Sync,
{
    fn call(&self, entry: LogEntry) -> BoxFuture<'static, HookResult> {
        let result = (self.f)(&entry);
        Box::pin(futures::future::ready(result))
    }
}

/// Adapter turning an async closure (a function returning a future) into a
/// [`Hook`].
pub struct AsyncFnHook<F> {
    f: F,
}

impl<F, Fut> AsyncFnHook<F>
where
    F: Fn(LogEntry) -> Fut + Send + Sync,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> Hook for AsyncFnHook<F>
where
    F: Fn(LogEntry) -> Fut + Send + Sync,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    fn call(&self, entry: LogEntry) -> BoxFuture<'static, HookResult> {
        Box::pin((self.f)(entry))
    }
}
