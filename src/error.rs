//! Error handling for the navigator.
//!
//! - [`NavigationError`]: everything that can abort a navigation before the
//!   host is asked to move (unknown route, unknown redirect kind, redirect
//!   loop, bad configuration).
//! - [`NavigationOutcome`]: what the host was asked to do once a navigation
//!   made it through the guard pipeline.
//!
//! A guard that never resolves is **not** an error: the navigation future
//! simply stays pending.
//!
//! # Examples
//!
//! ```
//! use miniapp_navigator::{LookupField, NavigationError};
//!
//! let err = NavigationError::RouteNotFound {
//!     key: "profile".into(),
//!     field: LookupField::Name,
//! };
//! assert_eq!(err.to_string(), "No route with name 'profile'");
//! assert!(err.is_route_not_found());
//! ```

use crate::options::NavigationKind;
use crate::route::LookupField;
use std::fmt;

// ============================================================================
// NavigationError
// ============================================================================

/// Reasons a navigation call fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No route matched the lookup key.
    RouteNotFound { key: String, field: LookupField },

    /// A guard redirected with a type name that is not one of the five
    /// navigation kinds.
    UnrecognizedRedirectKind { kind: String },

    /// Structured options carried neither `name` nor `url`.
    MissingTarget,

    /// A guard redirected a forward kind with back options.
    InvalidRedirect { kind: NavigationKind },

    /// Guards kept redirecting past the allowed depth.
    RedirectLoop { depth: usize, target: String },

    /// The route configuration could not be parsed.
    InvalidConfig { message: String },

    /// [`install_router`](crate::global::install_router) was called twice.
    AlreadyInstalled,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::RouteNotFound { key, field } => {
                write!(f, "No route with {} '{}'", field, key)
            }
            NavigationError::UnrecognizedRedirectKind { kind } => {
                write!(f, "Unrecognized redirect type '{}'", kind)
            }
            NavigationError::MissingTarget => {
                write!(f, "Navigation options need a name or a url")
            }
            NavigationError::InvalidRedirect { kind } => {
                write!(f, "Redirect to {} cannot carry back options", kind)
            }
            NavigationError::RedirectLoop { depth, target } => {
                write!(f, "Redirect loop detected (depth {}): target '{}'", depth, target)
            }
            NavigationError::InvalidConfig { message } => {
                write!(f, "Invalid route configuration: {}", message)
            }
            NavigationError::AlreadyInstalled => {
                write!(f, "A router is already installed")
            }
        }
    }
}

impl std::error::Error for NavigationError {}

impl NavigationError {
    /// Check if this is a failed route lookup.
    pub fn is_route_not_found(&self) -> bool {
        matches!(self, NavigationError::RouteNotFound { .. })
    }

    /// Check if a guard redirected with an unknown type.
    pub fn is_unrecognized_redirect(&self) -> bool {
        matches!(self, NavigationError::UnrecognizedRedirectKind { .. })
    }
}

impl From<serde_json::Error> for NavigationError {
    fn from(err: serde_json::Error) -> Self {
        NavigationError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// NavigationOutcome
// ============================================================================

/// The host primitive a navigation ended up calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A forward primitive was called with the resolved url.
    Navigated { kind: NavigationKind, url: String },
    /// `navigateBack` was called.
    WentBack { delta: u32 },
}

impl NavigationOutcome {
    /// Check if a forward primitive ran.
    pub fn is_navigated(&self) -> bool {
        matches!(self, NavigationOutcome::Navigated { .. })
    }

    /// The kind of primitive that ran.
    pub fn kind(&self) -> NavigationKind {
        match self {
            NavigationOutcome::Navigated { kind, .. } => *kind,
            NavigationOutcome::WentBack { .. } => NavigationKind::NavigateBack,
        }
    }

    /// The url handed to the host, for forward navigations.
    pub fn url(&self) -> Option<&str> {
        match self {
            NavigationOutcome::Navigated { url, .. } => Some(url),
            NavigationOutcome::WentBack { .. } => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
