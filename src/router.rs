//! The navigation dispatcher.
//!
//! [`Router`] owns the route table, the interception pipeline and the host
//! handle. Every forward navigation goes through the same pipeline:
//!
//! 1. Merge the caller's target into a [`NavigationRequest`]
//!    (name → path, params → query string)
//! 2. Read the current route from the host page stack
//! 3. Run the before guards
//! 4. On [`Proceed`](GuardOutcome::Proceed): run the after hooks, then call the
//!    host primitive for the kind
//! 5. On [`Redirect`](GuardOutcome::Redirect): dispatch the redirect instead
//!
//! `navigate_back` skips all of it and calls the host directly.
//!
//! # Example
//!
//! ```
//! use miniapp_navigator::{BackOptions, NavigationHost, NavigationRequest, RouteDescriptor, Router};
//! # struct Host;
//! # impl NavigationHost for Host {
//! #     fn navigate_to(&self, _: &NavigationRequest) {}
//! #     fn redirect_to(&self, _: &NavigationRequest) {}
//! #     fn switch_tab(&self, _: &NavigationRequest) {}
//! #     fn re_launch(&self, _: &NavigationRequest) {}
//! #     fn navigate_back(&self, _: &BackOptions) {}
//! #     fn current_route(&self) -> Option<String> { Some("pages/home/home".into()) }
//! # }
//!
//! let router = Router::new(
//!     vec![
//!         RouteDescriptor::new("/pages/home/home").name("home"),
//!         RouteDescriptor::new("/pages/detail/detail").name("detail"),
//!     ],
//!     Host,
//! );
//!
//! let outcome = pollster::block_on(router.navigate_to("detail")).unwrap();
//! assert_eq!(outcome.url(), Some("/pages/detail/detail?"));
//! ```

use crate::error::{NavigationError, NavigationOutcome};
use crate::guards::{AfterHook, BeforeGuard, GuardOutcome, RedirectOptions};
use crate::host::{forward_primitive, NavigationHost};
use crate::intercept::InterceptPipeline;
use crate::options::{BackOptions, NavigationKind, NavigationTarget};
use crate::params::QueryParams;
use crate::request::NavigationRequest;
use crate::route::{normalize_path, LookupField, RouteDescriptor, RouteTable};
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use std::fmt;
use std::sync::Arc;

/// Maximum redirect depth to prevent infinite redirect loops.
pub const MAX_REDIRECT_DEPTH: usize = 5;

/// Route table, guards and host, wired together.
pub struct Router {
    table: RouteTable,
    pipeline: InterceptPipeline,
    host: Arc<dyn NavigationHost>,
}

impl Router {
    /// Create a router over `routes`, driving `host`.
    pub fn new<H: NavigationHost>(routes: impl IntoIterator<Item = RouteDescriptor>, host: H) -> Self {
        Self::from_table(RouteTable::new(routes), Arc::new(host))
    }

    /// Create a router from an existing table and a shared host.
    pub fn from_table(table: RouteTable, host: Arc<dyn NavigationHost>) -> Self {
        Self {
            table,
            pipeline: InterceptPipeline::new(),
            host,
        }
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// The registered guards and hooks.
    pub fn pipeline(&self) -> &InterceptPipeline {
        &self.pipeline
    }

    /// Look up a route by name or path.
    pub fn get_route(&self, key: &str, field: LookupField) -> Result<&RouteDescriptor, NavigationError> {
        self.table.lookup(key, field)
    }

    // ========================================================================
    // Guard registration
    // ========================================================================

    /// Register a global before guard. Guards run in registration order.
    pub fn before_each<G: BeforeGuard>(&mut self, guard: G) -> &mut Self {
        self.pipeline.register_before(guard);
        self
    }

    /// Register a global after hook. Hooks run in registration order.
    pub fn after_each<H: AfterHook>(&mut self, hook: H) -> &mut Self {
        self.pipeline.register_after(hook);
        self
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Keep the current page and open the target.
    pub async fn navigate_to(
        &self,
        target: impl Into<NavigationTarget>,
    ) -> Result<NavigationOutcome, NavigationError> {
        self.execute(NavigationKind::NavigateTo, target.into()).await
    }

    /// Close the current page and open the target.
    pub async fn redirect_to(
        &self,
        target: impl Into<NavigationTarget>,
    ) -> Result<NavigationOutcome, NavigationError> {
        self.execute(NavigationKind::RedirectTo, target.into()).await
    }

    /// Switch to a tab page.
    pub async fn switch_tab(
        &self,
        target: impl Into<NavigationTarget>,
    ) -> Result<NavigationOutcome, NavigationError> {
        self.execute(NavigationKind::SwitchTab, target.into()).await
    }

    /// Close every page and open the target.
    pub async fn re_launch(
        &self,
        target: impl Into<NavigationTarget>,
    ) -> Result<NavigationOutcome, NavigationError> {
        self.execute(NavigationKind::ReLaunch, target.into()).await
    }

    /// Pop pages. No merging, no guards: there is no target to intercept.
    pub fn navigate_back(&self, options: BackOptions) -> Result<NavigationOutcome, NavigationError> {
        info_log!("navigateBack (delta {})", options.delta);
        self.host.navigate_back(&options);
        Ok(NavigationOutcome::WentBack {
            delta: options.delta,
        })
    }

    /// Navigate with a kind chosen at runtime.
    pub async fn navigate(
        &self,
        kind: NavigationKind,
        target: impl Into<NavigationTarget>,
    ) -> Result<NavigationOutcome, NavigationError> {
        self.execute(kind, target.into()).await
    }

    /// Core dispatch loop: merge, guard, then either call the host or follow
    /// the redirect.
    async fn execute(
        &self,
        kind: NavigationKind,
        target: NavigationTarget,
    ) -> Result<NavigationOutcome, NavigationError> {
        let mut kind = kind;
        let mut target = target;
        let mut redirect_depth = 0;

        loop {
            if !kind.is_forward() {
                return self.navigate_back(BackOptions::default());
            }

            let to = self.resolve(kind, target)?;
            let from = self.current_route()?;
            info_log!(
                "{}: '{}' → '{}'",
                kind,
                from.as_ref().map_or("<empty>", |r| r.path.as_str()),
                to.url
            );

            let spec = match self.pipeline.run(&to, from.as_ref()).await {
                GuardOutcome::Proceed => {
                    self.pipeline.run_after(&to, from.as_ref());
                    return Ok(self.invoke(kind, &to));
                }
                GuardOutcome::Redirect(spec) => spec,
            };

            let next_kind = spec.kind().map_err(|err| {
                warn_log!("Guard redirected '{}' with {}", to.url, err);
                err
            })?;

            redirect_depth += 1;
            if redirect_depth > MAX_REDIRECT_DEPTH {
                error_log!(
                    "Redirect loop detected (depth {}) navigating to '{}'",
                    redirect_depth,
                    to.url
                );
                return Err(NavigationError::RedirectLoop {
                    depth: redirect_depth,
                    target: to.url,
                });
            }

            debug_log!("Guard redirecting '{}' via {}", to.url, next_kind);
            match (next_kind.is_forward(), spec.options) {
                (true, RedirectOptions::Target(next_target)) => {
                    kind = next_kind;
                    target = next_target;
                }
                (true, RedirectOptions::Back(_)) => {
                    return Err(NavigationError::InvalidRedirect { kind: next_kind });
                }
                (false, RedirectOptions::Back(options)) => return self.navigate_back(options),
                (false, RedirectOptions::Target(_)) => {
                    return self.navigate_back(BackOptions::default());
                }
            }
        }
    }

    /// Call the host primitive for `kind`.
    fn invoke(&self, kind: NavigationKind, request: &NavigationRequest) -> NavigationOutcome {
        if let Some(primitive) = forward_primitive(kind) {
            primitive(self.host.as_ref(), request);
        }
        info_log!("{} complete: '{}'", kind, request.url);
        NavigationOutcome::Navigated {
            kind,
            url: request.url.clone(),
        }
    }

    // ========================================================================
    // Option merging
    // ========================================================================

    /// Merge a target into a fully resolved request for `kind`.
    ///
    /// Fails with [`NavigationError::RouteNotFound`] before any guard or host
    /// call when the target does not exist.
    pub fn resolve(
        &self,
        kind: NavigationKind,
        target: NavigationTarget,
    ) -> Result<NavigationRequest, NavigationError> {
        match target {
            NavigationTarget::ByName { name, params } => {
                let route = self.table.lookup(&name, LookupField::Name)?;
                Ok(NavigationRequest::new(kind, route.clone(), params))
            }
            NavigationTarget::ByUrl { url, params } => {
                let (route, params) = self.resolve_url(&url, params)?;
                Ok(NavigationRequest::new(kind, route, params))
            }
            NavigationTarget::Options(options) => {
                let (route, params) = match (&options.name, &options.url) {
                    (Some(name), _) => (
                        self.table.lookup(name, LookupField::Name)?.clone(),
                        options.params,
                    ),
                    (None, Some(url)) => self.resolve_url(url, options.params)?,
                    (None, None) => return Err(NavigationError::MissingTarget),
                };

                let mut request = NavigationRequest::new(kind, route, params);
                request.animation_type = options.animation_type;
                request.animation_duration = options.animation_duration;
                request.events = options.events;
                request.callbacks = options.callbacks;
                Ok(request)
            }
        }
    }

    /// Resolve a literal path. A `?query` suffix is folded into the params,
    /// explicit params win on conflicts.
    fn resolve_url(
        &self,
        url: &str,
        params: QueryParams,
    ) -> Result<(RouteDescriptor, QueryParams), NavigationError> {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let route = self.table.lookup(&normalize_path(path), LookupField::Path)?;

        let mut merged = QueryParams::from_query_string(query);
        merged.merge(&params);
        Ok((route.clone(), merged))
    }

    /// The route on top of the host page stack, or `None` when it is empty.
    pub fn current_route(&self) -> Result<Option<RouteDescriptor>, NavigationError> {
        let Some(raw) = self.host.current_route() else {
            trace_log!("Host page stack is empty");
            return Ok(None);
        };
        let route = self.table.lookup(&normalize_path(&raw), LookupField::Path)?;
        Ok(Some(route.clone()))
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.len())
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
