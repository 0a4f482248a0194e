//! The interception pipeline.
//!
//! [`InterceptPipeline`] owns the registered before guards and after hooks of
//! one router. Guards run **sequentially in registration order**:
//!
//! 1. No guards: the navigation proceeds immediately.
//! 2. A guard answering [`Proceed`](GuardOutcome::Proceed) hands over to the
//!    next guard; when the last one proceeds, the navigation proceeds.
//! 3. The first [`Redirect`](GuardOutcome::Redirect) wins; later guards do
//!    not run.
//! 4. A guard that never answers suspends the navigation forever.
//!
//! After hooks all run, in registration order, once the navigation is
//! allowed.

use crate::guards::{AfterHook, BeforeGuard, GuardOutcome};
use crate::request::NavigationRequest;
use crate::route::RouteDescriptor;
use crate::{debug_log, trace_log};
use std::fmt;
use std::sync::Arc;

/// Ordered before guards and after hooks.
#[derive(Clone, Default)]
pub struct InterceptPipeline {
    before: Vec<Arc<dyn BeforeGuard>>,
    after: Vec<Arc<dyn AfterHook>>,
}

impl InterceptPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a before guard.
    pub fn register_before<G: BeforeGuard>(&mut self, guard: G) {
        debug_log!("Registered before guard '{}'", guard.name());
        self.before.push(Arc::new(guard));
    }

    /// Append an after hook.
    pub fn register_after<H: AfterHook>(&mut self, hook: H) {
        debug_log!("Registered after hook '{}'", hook.name());
        self.after.push(Arc::new(hook));
    }

    /// Number of before guards.
    pub fn guard_count(&self) -> usize {
        self.before.len()
    }

    /// Number of after hooks.
    pub fn hook_count(&self) -> usize {
        self.after.len()
    }

    /// Return `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Run the before guards for `to`.
    pub async fn run(&self, to: &NavigationRequest, from: Option<&RouteDescriptor>) -> GuardOutcome {
        if self.before.is_empty() {
            trace_log!("No guards registered, '{}' proceeds", to.url);
            return GuardOutcome::Proceed;
        }

        for (index, guard) in self.before.iter().enumerate() {
            let outcome = guard.check(to, from).await;
            trace_log!(
                "Guard #{} '{}' → {:?} for '{}'",
                index,
                guard.name(),
                outcome,
                to.url
            );
            if outcome.is_redirect() {
                debug_log!("Guard '{}' redirected navigation to '{}'", guard.name(), to.url);
                return outcome;
            }
        }

        GuardOutcome::Proceed
    }

    /// Run every after hook for `to`.
    pub fn run_after(&self, to: &NavigationRequest, from: Option<&RouteDescriptor>) {
        for hook in &self.after {
            trace_log!("After hook '{}' for '{}'", hook.name(), to.url);
            hook.after(to, from);
        }
    }
}

impl fmt::Debug for InterceptPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptPipeline")
            .field(
                "before",
                &self.before.iter().map(|g| g.name()).collect::<Vec<_>>(),
            )
            .field(
                "after",
                &self.after.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
