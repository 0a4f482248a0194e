//! # miniapp-navigator
//!
//! Name/path based page navigation for mini-program front ends, with global
//! before/after guards.
//!
//! The crate wraps the host's five navigation primitives (`navigateTo`,
//! `redirectTo`, `switchTab`, `reLaunch`, `navigateBack`) behind a
//! [`Router`] that:
//!
//! - resolves route **names** to paths through a [`RouteTable`],
//! - serializes [`QueryParams`] into the url,
//! - runs registered [`BeforeGuard`]s that may allow, redirect, or block the
//!   navigation,
//! - runs [`AfterHook`]s, then calls the host primitive.
//!
//! # Quick start
//!
//! ```
//! use miniapp_navigator::{
//!     guard_fn, BackOptions, GuardOutcome, NavigationHost, NavigationRequest, QueryParams,
//!     RedirectSpec, RouteDescriptor, Router,
//! };
//!
//! struct Host;
//!
//! impl NavigationHost for Host {
//!     fn navigate_to(&self, request: &NavigationRequest) { println!("open {}", request.url); }
//!     fn redirect_to(&self, request: &NavigationRequest) { println!("replace {}", request.url); }
//!     fn switch_tab(&self, request: &NavigationRequest) { println!("tab {}", request.url); }
//!     fn re_launch(&self, request: &NavigationRequest) { println!("relaunch {}", request.url); }
//!     fn navigate_back(&self, options: &BackOptions) { println!("back {}", options.delta); }
//!     fn current_route(&self) -> Option<String> { Some("pages/home/home".into()) }
//! }
//!
//! let mut router = Router::new(
//!     vec![
//!         RouteDescriptor::new("/pages/home/home").name("home"),
//!         RouteDescriptor::new("/pages/login/login").name("login"),
//!         RouteDescriptor::new("/pages/orders/orders").name("orders"),
//!     ],
//!     Host,
//! );
//!
//! router.before_each(guard_fn(|to, _from| {
//!     let protected = to.name() == Some("orders");
//!     async move {
//!         if protected {
//!             GuardOutcome::Redirect(RedirectSpec::redirect_to("login"))
//!         } else {
//!             GuardOutcome::Proceed
//!         }
//!     }
//! }));
//!
//! let target = ("orders", QueryParams::new().with("page", 1));
//! let outcome = pollster::block_on(router.navigate_to(target)).unwrap();
//! assert_eq!(outcome.url(), Some("/pages/login/login?"));
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `log` | yes | Log through the `log` crate |
//! | `tracing` | no | Log through the `tracing` crate |

pub mod error;
pub mod global;
pub mod guards;
pub mod host;
pub mod intercept;
pub mod logging;
pub mod options;
pub mod params;
pub mod request;
pub mod route;
pub mod router;

pub use error::{NavigationError, NavigationOutcome};
pub use guards::{
    after_fn, guard_fn, next_fn, AfterHook, BeforeGuard, FnAfterHook, FnGuard, GuardFuture,
    GuardOutcome, Next, NextGuard, RedirectKind, RedirectOptions, RedirectSpec,
};
pub use host::{forward_primitive, HostPrimitive, NavigationHost};
pub use intercept::InterceptPipeline;
pub use options::{
    AnimationType, BackOptions, Callbacks, EventListeners, HostCallback, NavigateOptions,
    NavigationKind, NavigationTarget, UnknownKind,
};
pub use params::{ParamValue, QueryParams};
pub use request::NavigationRequest;
pub use route::{LookupField, RouteDescriptor, RouteTable};
pub use router::{Router, MAX_REDIRECT_DEPTH};
