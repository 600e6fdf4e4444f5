//! Emission engine and pipeline orchestrator.
//!
//! `HookManager` owns the registration store and drives the two public
//! pipeline stages: `process` (before-hooks, then the middleware chain) and
//! `after_process` (after-hooks). Hook failures are isolated here; they are
//! rerouted to the `on_error` event and never reach the caller.

use super::event::HookEvent;
use super::hook::Hook;
use super::middleware::{Middleware, Next};
use super::registry::{
    DEFAULT_PRIORITY, HookRegistry, HookToken, MiddlewareToken, RegistrationId,
};
use crate::domain::{LogEntry, PipelineError};
use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Read-only snapshot of the registration store, plus the count of hook
/// failures swallowed during `on_error` emission (the one place where
/// rerouting would recurse and the failure is dropped instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub hooks: HashMap<HookEvent, usize>,
    pub middleware: usize,
    pub swallowed_errors: u64,
}

/// The hook & middleware pipeline.
///
/// One instance is typically constructed at startup by the logging façade
/// and shared via `Arc`; callers that need an isolated pipeline build their
/// own. There is no process-wide default instance.
///
/// Execution is sequentially asynchronous: within one `emit` or `process`
/// call, invocation *i + 1* never begins before invocation *i* settles.
/// Across calls, ordering is whatever order callers invoke them in.
pub struct HookManager {
    registry: RwLock<HookRegistry>,
    swallowed_errors: AtomicU64,
}

impl Default for HookManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HookManager {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(HookRegistry::new()),
            swallowed_errors: AtomicU64::new(0),
        }
    }

    /// Register a persistent hook at [`DEFAULT_PRIORITY`].
    pub fn on(&self, event: HookEvent, hook: Arc<dyn Hook>) -> HookToken {
        self.on_with_priority(event, hook, DEFAULT_PRIORITY)
    }

    /// Register a persistent hook. Higher priority fires first; ties fire in
    /// registration order.
    pub fn on_with_priority(&self, event: HookEvent, hook: Arc<dyn Hook>, priority: i32) -> HookToken {
        self.registry.write().insert_hook(event, hook, priority, false)
    }

    /// Register a hook that is removed after its first invocation attempt,
    /// whether the callback succeeds or fails.
    pub fn once(&self, event: HookEvent, hook: Arc<dyn Hook>) -> HookToken {
        self.once_with_priority(event, hook, DEFAULT_PRIORITY)
    }

    pub fn once_with_priority(&self, event: HookEvent, hook: Arc<dyn Hook>, priority: i32) -> HookToken {
        self.registry.write().insert_hook(event, hook, priority, true)
    }

    /// Remove the registration behind `token`. Safe to call twice; the
    /// second call returns `false`.
    pub fn remove_hook(&self, token: HookToken) -> bool {
        self.registry.write().remove_hook(token)
    }

    /// Remove the first registration for `event` holding this exact hook
    /// (`Arc` pointer equality). One instance per call.
    pub fn off(&self, event: HookEvent, hook: &Arc<dyn Hook>) -> bool {
        self.registry.write().remove_hook_by_ref(event, hook)
    }

    /// Register global middleware at [`DEFAULT_PRIORITY`].
    pub fn use_middleware(&self, middleware: Arc<dyn Middleware>) -> MiddlewareToken {
        self.use_middleware_with_priority(middleware, DEFAULT_PRIORITY)
    }

    pub fn use_middleware_with_priority(
        &self,
        middleware: Arc<dyn Middleware>,
        priority: i32,
    ) -> MiddlewareToken {
        self.registry.write().insert_middleware(middleware, priority)
    }

    pub fn remove_middleware(&self, token: MiddlewareToken) -> bool {
        self.registry.write().remove_middleware(token)
    }

    /// Remove all hooks for all events and all middleware. Previously
    /// registered callbacks never fire again; the swallowed-error counter
    /// is diagnostic history and survives.
    pub fn clear(&self) {
        self.registry.write().clear();
    }

    pub fn stats(&self) -> PipelineStats {
        let registry = self.registry.read();
        let mut hooks = HashMap::new();
        for event in HookEvent::ALL {
            hooks.insert(event, registry.hook_count(event));
        }
        PipelineStats {
            hooks,
            middleware: registry.middleware_count(),
            swallowed_errors: self.swallowed_errors.load(Ordering::Relaxed),
        }
    }

    /// Invoke every hook registered for `event`, in priority order, against
    /// a working copy of `entry`, and return the final copy.
    ///
    /// Callback failures never propagate: they are rerouted to an inline
    /// `on_error` emission carrying the stringified failure and the
    /// originating event, and the remaining hooks still run. A failure
    /// inside an `on_error` hook is swallowed (and counted) instead of
    /// rerouted again, so error storms terminate in bounded steps.
    pub async fn emit(&self, event: HookEvent, entry: &LogEntry) -> LogEntry {
        self.emit_boxed(event, entry).await
    }

    // Boxed so the on_error reroute can await the same function without an
    // infinitely-sized future type.
    fn emit_boxed<'a>(&'a self, event: HookEvent, entry: &'a LogEntry) -> BoxFuture<'a, LogEntry> {
        Box::pin(async move {
            // Snapshot under the lock, then release it before any await so
            // hooks can register or unregister hooks mid-emission.
            let snapshot = self.registry.read().hook_snapshot(event);

            let mut current = entry.clone();
            let mut fired_once: Vec<RegistrationId> = Vec::new();

            for registration in &snapshot {
                // A one-shot counts as fired even when its callback fails.
                if registration.once {
                    fired_once.push(registration.id);
                }

                match registration.hook.call(current.clone()).await {
                    Ok(Some(patch)) => current.apply(patch),
                    Ok(None) => {}
                    Err(err) => {
                        if event == HookEvent::OnError {
                            // Dead end: rerouting again would recurse.
                            self.swallowed_errors.fetch_add(1, Ordering::Relaxed);
                            tracing::warn!(
                                event = %event,
                                error = %err,
                                "Swallowed failure from on_error hook"
                            );
                        } else {
                            tracing::warn!(
                                event = %event,
                                error = %err,
                                "Hook failed; rerouting to on_error"
                            );
                            let mut error_entry = current.clone();
                            error_entry.error = Some(err.to_string());
                            error_entry.hook_event = Some(event);
                            let _ = self.emit_boxed(HookEvent::OnError, &error_entry).await;
                        }
                    }
                }
            }

            if !fired_once.is_empty() {
                self.registry.write().remove_hook_ids(event, &fired_once);
            }

            current
        })
    }

    /// Run the full pre-emission pipeline: `before_log` hooks, then the
    /// middleware chain over the resulting entry. The caller emits the
    /// returned entry to its sinks and then calls [`after_process`].
    ///
    /// Middleware failures propagate; a middleware that declines to call
    /// `next` halts the chain silently and the entry is returned as of its
    /// last mutation.
    ///
    /// [`after_process`]: HookManager::after_process
    pub async fn process(&self, entry: LogEntry) -> Result<LogEntry, PipelineError> {
        let mut current = self.emit(HookEvent::BeforeLog, &entry).await;

        let chain = self.registry.read().middleware_snapshot();
        if !chain.is_empty() {
            Next::new(&chain)
                .run(&mut current)
                .await
                .map_err(PipelineError::Middleware)?;
        }

        Ok(current)
    }

    /// Emit `after_log` for an entry that has already been written out.
    /// Observation only: hook return values are discarded since no further
    /// stage consumes them.
    pub async fn after_process(&self, entry: &LogEntry) {
        let _ = self.emit(HookEvent::AfterLog, entry).await;
    }
}
