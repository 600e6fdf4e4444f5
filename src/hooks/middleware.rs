use crate::domain::{BoxError, LogEntry};
use futures::future::BoxFuture;
use std::sync::Arc;

/// A chain-of-responsibility stage run once per processed entry.
///
/// Unlike hooks, all middleware observe and mutate the same working entry by
/// reference for the duration of the chain — middleware is meant for
/// side-effecting enrichment, hooks for observation and short-lived
/// mutation. Failures are not isolated: an `Err` propagates out of
/// `process` to its caller.
pub trait Middleware: Send + Sync {
    /// Handle the entry, calling `next.run(entry).await` to continue the
    /// chain. Returning without invoking `next` halts the chain silently;
    /// later middleware never run, and this is not an error.
    fn handle<'a>(
        &'a self,
        entry: &'a mut LogEntry,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

/// Continuation handed to each middleware.
///
/// `run` consumes the continuation, so invoking it more than once is a
/// compile error: the remainder of the chain runs at most once per stage.
pub struct Next<'a> {
    chain: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(chain: &'a [Arc<dyn Middleware>]) -> Self {
        Self { chain }
    }

    /// Invoke the rest of the chain on `entry`. A no-op returning `Ok(())`
    /// when no middleware remain.
    pub async fn run(self, entry: &mut LogEntry) -> Result<(), BoxError> {
        match self.chain.split_first() {
            Some((head, rest)) => head.handle(entry, Next { chain: rest }).await,
            None => Ok(()),
        }
    }
}

/// Whether a [`FnMiddleware`] continues the chain after its closure runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    Continue,
    Halt,
}

/// Adapter for the common synchronous middleware shape: mutate the entry,
/// then either continue or halt. Middleware that needs to run work after
/// the rest of the chain (or suspend) implements [`Middleware`] directly.
pub struct FnMiddleware<F> {
    f: F,
}

impl<F> FnMiddleware<F>
where
    F: Fn(&mut LogEntry) -> Result<Chain, BoxError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&mut LogEntry) -> Result<Chain, BoxError> + Send + Sync,
{
    fn handle<'a>(
        &'a self,
        entry: &'a mut LogEntry,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(async move {
            match (self.f)(&mut *entry)? {
                Chain::Continue => next.run(entry).await,
                Chain::Halt => Ok(()),
            }
        })
    }
}
