//! Process-wide router access for framework glue.
//!
//! Page components in a mini-program cannot easily receive a router by
//! argument, so the application installs one instance at startup and reads it
//! back with [`router`]. Guards must be registered before installing: the
//! installed router is shared and immutable.
//!
//! ```ignore
//! use miniapp_navigator::{global, Router};
//!
//! let mut router = Router::new(routes, host);
//! router.before_each(auth_guard);
//! global::install_router(router)?;
//!
//! // later, from any page
//! global::router().unwrap().navigate_to("detail").await?;
//! ```

use crate::error::NavigationError;
use crate::info_log;
use crate::router::Router;
use once_cell::sync::OnceCell;

static ROUTER: OnceCell<Router> = OnceCell::new();

/// Install `router` as the process-wide instance.
///
/// Fails with [`NavigationError::AlreadyInstalled`] if one is already set.
pub fn install_router(router: Router) -> Result<&'static Router, NavigationError> {
    let installed = ROUTER
        .try_insert(router)
        .map_err(|_| NavigationError::AlreadyInstalled)?;
    info_log!("Router installed with {} routes", installed.routes().len());
    Ok(installed)
}

/// The installed router, if any.
pub fn router() -> Option<&'static Router> {
    ROUTER.get()
}
