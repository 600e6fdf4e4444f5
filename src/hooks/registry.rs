//! Registration store for hooks and middleware.
//!
//! Holds the per-event hook lists and the global middleware list, each kept
//! sorted descending by priority (stable on ties, so equal priorities fire
//! in registration order). Mutation happens only here; the emission engine
//! iterates over point-in-time snapshots.

use super::event::HookEvent;
use super::hook::Hook;
use super::middleware::Middleware;
use std::collections::HashMap;
use std::sync::Arc;

/// Priority assigned when the caller does not supply one.
pub const DEFAULT_PRIORITY: i32 = 50;

/// Unique identity of one registration. Ids are monotonic, so they double
/// as the stable tie-breaker: among equal priorities, lower id fires first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

/// Handle returned by `on`/`once`; removes exactly that registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookToken {
    pub(crate) event: HookEvent,
    pub(crate) id: RegistrationId,
}

impl HookToken {
    pub fn event(&self) -> HookEvent {
        self.event
    }
}

/// Handle returned by `use_middleware`; removes exactly that registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiddlewareToken {
    pub(crate) id: RegistrationId,
}

#[derive(Clone)]
pub(crate) struct HookRegistration {
    pub(crate) id: RegistrationId,
    pub(crate) priority: i32,
    pub(crate) once: bool,
    pub(crate) hook: Arc<dyn Hook>,
}

#[derive(Clone)]
pub(crate) struct MiddlewareRegistration {
    pub(crate) id: RegistrationId,
    pub(crate) priority: i32,
    pub(crate) middleware: Arc<dyn Middleware>,
}

pub(crate) struct HookRegistry {
    /// One bucket per event; buckets persist as empty lists after `clear`.
    hooks: HashMap<HookEvent, Vec<HookRegistration>>,
    middleware: Vec<MiddlewareRegistration>,
    next_id: u64,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HookRegistry {
    pub(crate) fn new() -> Self {
        let mut hooks = HashMap::new();
        for event in HookEvent::ALL {
            hooks.insert(event, Vec::new());
        }
        Self {
            hooks,
            middleware: Vec::new(),
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> RegistrationId {
        let id = RegistrationId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn insert_hook(
        &mut self,
        event: HookEvent,
        hook: Arc<dyn Hook>,
        priority: i32,
        once: bool,
    ) -> HookToken {
        let id = self.allocate_id();
        let bucket = self.hooks.entry(event).or_default();
        bucket.push(HookRegistration {
            id,
            priority,
            once,
            hook,
        });
        // Descending priority; id ascending keeps ties in registration order.
        bucket.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.0.cmp(&b.id.0)));

        tracing::debug!(
            event = %event,
            priority = priority,
            once = once,
            "Registered hook"
        );
        HookToken { event, id }
    }

    /// Remove by token. Idempotent: returns `false` when the registration is
    /// already gone.
    pub(crate) fn remove_hook(&mut self, token: HookToken) -> bool {
        let bucket = self.hooks.entry(token.event).or_default();
        let before = bucket.len();
        bucket.retain(|reg| reg.id != token.id);
        let removed = bucket.len() < before;
        if removed {
            tracing::debug!(event = %token.event, "Removed hook");
        }
        removed
    }

    /// Remove the first registration for `event` whose hook is pointer-equal
    /// to `hook`. If the same hook is registered twice, only one instance is
    /// removed per call; this is intended semantics, not a defect.
    pub(crate) fn remove_hook_by_ref(&mut self, event: HookEvent, hook: &Arc<dyn Hook>) -> bool {
        let bucket = self.hooks.entry(event).or_default();
        if let Some(pos) = bucket.iter().position(|reg| Arc::ptr_eq(&reg.hook, hook)) {
            bucket.remove(pos);
            tracing::debug!(event = %event, "Removed hook by reference");
            true
        } else {
            false
        }
    }

    /// Remove fired one-shot registrations. Deferred removal: the emission
    /// engine calls this after walking its snapshot, never while iterating.
    pub(crate) fn remove_hook_ids(&mut self, event: HookEvent, ids: &[RegistrationId]) {
        let bucket = self.hooks.entry(event).or_default();
        bucket.retain(|reg| !ids.contains(&reg.id));
    }

    pub(crate) fn insert_middleware(
        &mut self,
        middleware: Arc<dyn Middleware>,
        priority: i32,
    ) -> MiddlewareToken {
        let id = self.allocate_id();
        self.middleware.push(MiddlewareRegistration {
            id,
            priority,
            middleware,
        });
        self.middleware
            .sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.0.cmp(&b.id.0)));

        tracing::debug!(priority = priority, "Registered middleware");
        MiddlewareToken { id }
    }

    pub(crate) fn remove_middleware(&mut self, token: MiddlewareToken) -> bool {
        let before = self.middleware.len();
        self.middleware.retain(|reg| reg.id != token.id);
        let removed = self.middleware.len() < before;
        if removed {
            tracing::debug!("Removed middleware");
        }
        removed
    }

    /// Point-in-time copy of the sorted hook list for `event`.
    pub(crate) fn hook_snapshot(&self, event: HookEvent) -> Vec<HookRegistration> {
        self.hooks.get(&event).cloned().unwrap_or_default()
    }

    /// Point-in-time copy of the sorted middleware chain.
    pub(crate) fn middleware_snapshot(&self) -> Vec<Arc<dyn Middleware>> {
        self.middleware
            .iter()
            .map(|reg| reg.middleware.clone())
            .collect()
    }

    pub(crate) fn hook_count(&self, event: HookEvent) -> usize {
        self.hooks.get(&event).map_or(0, Vec::len)
    }

    pub(crate) fn middleware_count(&self) -> usize {
        self.middleware.len()
    }

    /// Remove all hooks for all events and all middleware. The three event
    /// buckets remain present as empty lists.
    pub(crate) fn clear(&mut self) {
        for bucket in self.hooks.values_mut() {
            bucket.clear();
        }
        self.middleware.clear();
        tracing::debug!("Cleared all hooks and middleware");
    }
}
