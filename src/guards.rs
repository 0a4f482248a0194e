//! Global navigation guards.
//!
//! A **before guard** runs after the request has been merged and before the
//! host primitive is called. It answers with a [`GuardOutcome`] future:
//!
//! | Outcome | Effect |
//! |---------|--------|
//! | [`GuardOutcome::Proceed`] | hand over to the next guard, or navigate |
//! | [`GuardOutcome::Redirect`] | abandon this navigation and dispatch the [`RedirectSpec`] instead |
//! | never resolves | the navigation stays suspended forever |
//!
//! The last row is part of the contract: a guard blocks a navigation by not
//! answering. There is no timeout.
//!
//! An **after hook** runs once the guards let a navigation through, right
//! before the host primitive is called.
//!
//! # Creating guards
//!
//! | Approach | When to use |
//! |----------|-------------|
//! | Implement [`BeforeGuard`] | Full control, named |
//! | [`guard_fn`] | Closure returning a future |
//! | [`next_fn`] | Callback style: resolve a [`Next`] now or later |
//! | [`after_fn`] | Closure after hook |
//!
//! # Example
//!
//! ```
//! use miniapp_navigator::{guard_fn, next_fn, GuardOutcome, RedirectSpec};
//!
//! // Async closure: send anonymous users to the login page.
//! let logged_in = false;
//! let auth = guard_fn(move |to, _from| {
//!     let needs_login = to.name() == Some("orders") && !logged_in;
//!     async move {
//!         if needs_login {
//!             GuardOutcome::Redirect(RedirectSpec::redirect_to("login"))
//!         } else {
//!             GuardOutcome::Proceed
//!         }
//!     }
//! });
//!
//! // Callback style: the resolver may be moved elsewhere and resolved later.
//! let tracker = next_fn(|to, _from, next| {
//!     println!("leaving for {}", to.url);
//!     next.proceed();
//! });
//! # let _ = (auth, tracker);
//! ```

use crate::error::NavigationError;
use crate::options::{BackOptions, NavigationKind, NavigationTarget};
use crate::request::NavigationRequest;
use crate::route::RouteDescriptor;
use crate::{trace_log, warn_log};
use futures::channel::oneshot;
use futures::future::{self, BoxFuture};
use std::future::Future;

// ============================================================================
// GuardOutcome and RedirectSpec
// ============================================================================

/// How a before guard resolved a pending navigation.
#[derive(Debug, Clone)]
pub enum GuardOutcome {
    /// Let the navigation continue.
    Proceed,
    /// Perform a different navigation instead.
    Redirect(RedirectSpec),
}

impl GuardOutcome {
    /// Shorthand for `GuardOutcome::Redirect(spec)`.
    pub fn redirect(spec: RedirectSpec) -> Self {
        GuardOutcome::Redirect(spec)
    }

    /// Check if this outcome lets the navigation continue.
    pub fn is_proceed(&self) -> bool {
        matches!(self, GuardOutcome::Proceed)
    }

    /// Check if this outcome redirects.
    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardOutcome::Redirect(_))
    }
}

/// The kind of a redirect, either typed or named at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectKind {
    Known(NavigationKind),
    /// A host primitive name such as `"redirectTo"`, checked at dispatch.
    Named(String),
}

impl RedirectKind {
    /// Resolve to one of the five kinds.
    pub fn resolve(&self) -> Result<NavigationKind, NavigationError> {
        match self {
            RedirectKind::Known(kind) => Ok(*kind),
            RedirectKind::Named(name) => {
                name.parse()
                    .map_err(|_| NavigationError::UnrecognizedRedirectKind {
                        kind: name.clone(),
                    })
            }
        }
    }
}

/// What a redirect navigates with.
#[derive(Debug, Clone)]
pub enum RedirectOptions {
    Target(NavigationTarget),
    Back(BackOptions),
}

/// A navigation to perform instead of the one being guarded.
///
/// ```
/// use miniapp_navigator::{NavigationKind, RedirectSpec};
///
/// let spec = RedirectSpec::switch_tab("home");
/// assert_eq!(spec.kind().unwrap(), NavigationKind::SwitchTab);
///
/// let spec = RedirectSpec::named("openPopup", "home");
/// assert!(spec.kind().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RedirectSpec {
    pub kind: RedirectKind,
    pub options: RedirectOptions,
}

impl RedirectSpec {
    /// Redirect with a typed kind.
    pub fn new(kind: NavigationKind, target: impl Into<NavigationTarget>) -> Self {
        Self {
            kind: RedirectKind::Known(kind),
            options: RedirectOptions::Target(target.into()),
        }
    }

    /// Redirect with a kind given by its host name.
    pub fn named(kind: impl Into<String>, target: impl Into<NavigationTarget>) -> Self {
        Self {
            kind: RedirectKind::Named(kind.into()),
            options: RedirectOptions::Target(target.into()),
        }
    }

    /// Redirect with `navigateTo`, keeping the current page.
    pub fn navigate_to(target: impl Into<NavigationTarget>) -> Self {
        Self::new(NavigationKind::NavigateTo, target)
    }

    /// Redirect with `redirectTo`, replacing the current page.
    pub fn redirect_to(target: impl Into<NavigationTarget>) -> Self {
        Self::new(NavigationKind::RedirectTo, target)
    }

    /// Redirect to a tab page.
    pub fn switch_tab(target: impl Into<NavigationTarget>) -> Self {
        Self::new(NavigationKind::SwitchTab, target)
    }

    /// Redirect with `reLaunch`, closing every page.
    pub fn re_launch(target: impl Into<NavigationTarget>) -> Self {
        Self::new(NavigationKind::ReLaunch, target)
    }

    /// Go back instead.
    pub fn back(options: BackOptions) -> Self {
        Self {
            kind: RedirectKind::Known(NavigationKind::NavigateBack),
            options: RedirectOptions::Back(options),
        }
    }

    /// Resolve the redirect kind.
    pub fn kind(&self) -> Result<NavigationKind, NavigationError> {
        self.kind.resolve()
    }
}

// ============================================================================
// BeforeGuard trait
// ============================================================================

/// Future returned by a before guard.
pub type GuardFuture = BoxFuture<'static, GuardOutcome>;

/// A global guard consulted before every forward navigation.
///
/// `from` is `None` when the host page stack is empty.
///
/// # Example
///
/// ```
/// use miniapp_navigator::{BeforeGuard, GuardFuture, GuardOutcome, NavigationRequest, RedirectSpec, RouteDescriptor};
///
/// struct MaintenanceGuard {
///     enabled: bool,
/// }
///
/// impl BeforeGuard for MaintenanceGuard {
///     fn check(&self, _to: &NavigationRequest, _from: Option<&RouteDescriptor>) -> GuardFuture {
///         let enabled = self.enabled;
///         Box::pin(async move {
///             if enabled {
///                 GuardOutcome::Redirect(RedirectSpec::re_launch("maintenance"))
///             } else {
///                 GuardOutcome::Proceed
///             }
///         })
///     }
///
///     fn name(&self) -> &'static str {
///         "MaintenanceGuard"
///     }
/// }
/// ```
pub trait BeforeGuard: Send + Sync + 'static {
    /// Decide what happens to the navigation towards `to`.
    fn check(&self, to: &NavigationRequest, from: Option<&RouteDescriptor>) -> GuardFuture;

    /// Guard name for log lines.
    fn name(&self) -> &'static str {
        "BeforeGuard"
    }
}

// ============================================================================
// guard_fn helper
// ============================================================================

/// Create a guard from a closure returning a future.
pub const fn guard_fn<F, Fut>(f: F) -> FnGuard<F>
where
    F: Fn(&NavigationRequest, Option<&RouteDescriptor>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = GuardOutcome> + Send + 'static,
{
    FnGuard { f }
}

/// Guard created from a closure via [`guard_fn`].
pub struct FnGuard<F> {
    f: F,
}

impl<F, Fut> BeforeGuard for FnGuard<F>
where
    F: Fn(&NavigationRequest, Option<&RouteDescriptor>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = GuardOutcome> + Send + 'static,
{
    fn check(&self, to: &NavigationRequest, from: Option<&RouteDescriptor>) -> GuardFuture {
        Box::pin((self.f)(to, from))
    }
}

// ============================================================================
// Next resolver
// ============================================================================

/// One-shot resolver handed to callback-style guards.
///
/// Every method consumes the resolver, so a navigation is resolved at most
/// once. Dropping it unresolved leaves the navigation pending.
#[derive(Debug)]
pub struct Next {
    sender: oneshot::Sender<GuardOutcome>,
}

impl Next {
    /// Allow the navigation.
    pub fn proceed(self) {
        self.resolve(GuardOutcome::Proceed);
    }

    /// Redirect the navigation.
    pub fn redirect(self, spec: RedirectSpec) {
        self.resolve(GuardOutcome::Redirect(spec));
    }

    /// Resolve with an explicit outcome.
    pub fn resolve(self, outcome: GuardOutcome) {
        if self.sender.send(outcome).is_err() {
            trace_log!("Guard resolved after its navigation was dropped");
        }
    }
}

/// Create a callback-style guard. The closure receives a [`Next`] and must
/// resolve it to let the navigation continue.
///
/// ```
/// use miniapp_navigator::{next_fn, RedirectSpec};
///
/// let guard = next_fn(|to, from, next| {
///     if to.name() == Some("checkout") && from.is_none() {
///         next.redirect(RedirectSpec::re_launch("home"));
///     } else {
///         next.proceed();
///     }
/// });
/// # let _ = guard;
/// ```
pub const fn next_fn<F>(f: F) -> NextGuard<F>
where
    F: Fn(&NavigationRequest, Option<&RouteDescriptor>, Next) + Send + Sync + 'static,
{
    NextGuard { f }
}

/// Guard created from a callback via [`next_fn`].
pub struct NextGuard<F> {
    f: F,
}

impl<F> BeforeGuard for NextGuard<F>
where
    F: Fn(&NavigationRequest, Option<&RouteDescriptor>, Next) + Send + Sync + 'static,
{
    fn check(&self, to: &NavigationRequest, from: Option<&RouteDescriptor>) -> GuardFuture {
        let (sender, receiver) = oneshot::channel();
        (self.f)(to, from, Next { sender });

        let url = to.url.clone();
        Box::pin(async move {
            match receiver.await {
                Ok(outcome) => outcome,
                Err(oneshot::Canceled) => {
                    warn_log!("Guard dropped its resolver, navigation to '{}' stays blocked", url);
                    future::pending().await
                }
            }
        })
    }

    fn name(&self) -> &'static str {
        "NextGuard"
    }
}

// ============================================================================
// AfterHook
// ============================================================================

/// A global hook run after the guards allowed a navigation and before the
/// host primitive is called.
pub trait AfterHook: Send + Sync + 'static {
    fn after(&self, to: &NavigationRequest, from: Option<&RouteDescriptor>);

    /// Hook name for log lines.
    fn name(&self) -> &'static str {
        "AfterHook"
    }
}

/// Create an after hook from a closure.
///
/// ```
/// use miniapp_navigator::after_fn;
///
/// let hook = after_fn(|to, _from| println!("navigated to {}", to.url));
/// # let _ = hook;
/// ```
pub const fn after_fn<F>(f: F) -> FnAfterHook<F>
where
    F: Fn(&NavigationRequest, Option<&RouteDescriptor>) + Send + Sync + 'static,
{
    FnAfterHook { f }
}

/// After hook created from a closure via [`after_fn`].
pub struct FnAfterHook<F> {
    f: F,
}

impl<F> AfterHook for FnAfterHook<F>
where
    F: Fn(&NavigationRequest, Option<&RouteDescriptor>) + Send + Sync + 'static,
{
    fn after(&self, to: &NavigationRequest, from: Option<&RouteDescriptor>) {
        (self.f)(to, from);
    }
}

// ============================================================================
// Tests
// ============================================================================
