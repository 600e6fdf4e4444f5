//! The hook & middleware pipeline.
//!
//! Every log call routed through [`HookManager::process`] passes the
//! `before_log` hooks and the middleware chain before being emitted, and
//! the `after_log` hooks afterwards via [`HookManager::after_process`].
//! Hooks observe snapshot copies with failures isolated to the `on_error`
//! event; middleware share one working entry by reference and may veto the
//! rest of the chain by not invoking its continuation.

pub mod event;
pub mod hook;
pub mod manager;
pub mod middleware;
pub mod registry;

pub use event::HookEvent;
pub use hook::{AsyncFnHook, FnHook, Hook, HookResult};
pub use manager::{HookManager, PipelineStats};
pub use middleware::{Chain, FnMiddleware, Middleware, Next};
pub use registry::{DEFAULT_PRIORITY, HookToken, MiddlewareToken, RegistrationId};
