//! The merged, per-call navigation request.

use crate::options::{AnimationType, Callbacks, EventListeners, NavigationKind};
use crate::params::QueryParams;
use crate::route::RouteDescriptor;
use std::fmt;

/// A fully resolved navigation, built fresh for every dispatch.
///
/// Guards receive it as `to`, and the host primitive receives it unchanged.
/// `url` is always `route.path + "?" + params` serialized.
///
/// # Example
///
/// ```
/// use miniapp_navigator::{NavigationKind, NavigationRequest, QueryParams, RouteDescriptor};
///
/// let route = RouteDescriptor::new("/pages/home/home").name("home");
/// let request = NavigationRequest::new(
///     NavigationKind::NavigateTo,
///     route,
///     QueryParams::new().with("id", 1),
/// );
/// assert_eq!(request.url, "/pages/home/home?id=1");
/// assert_eq!(request.name(), Some("home"));
/// ```
#[derive(Clone)]
pub struct NavigationRequest {
    /// The primitive this request is meant for.
    pub kind: NavigationKind,
    /// The resolved target route.
    pub route: RouteDescriptor,
    /// Query parameters serialized into `url`.
    pub params: QueryParams,
    /// `route.path?query`, as handed to the host.
    pub url: String,
    pub animation_type: Option<AnimationType>,
    pub animation_duration: Option<u32>,
    pub events: EventListeners,
    pub callbacks: Callbacks,
}

impl NavigationRequest {
    /// Build a request and compute its url.
    pub fn new(kind: NavigationKind, route: RouteDescriptor, params: QueryParams) -> Self {
        let url = format!("{}?{}", route.path, params.to_query_string());
        Self {
            kind,
            route,
            params,
            url,
            animation_type: None,
            animation_duration: None,
            events: EventListeners::new(),
            callbacks: Callbacks::default(),
        }
    }

    /// Target route path, without the query.
    pub fn path(&self) -> &str {
        &self.route.path
    }

    /// Target route name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.route.name.as_deref()
    }
}

impl fmt::Debug for NavigationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationRequest")
            .field("kind", &self.kind)
            .field("url", &self.url)
            .field("route", &self.route)
            .field("animation_type", &self.animation_type)
            .field("animation_duration", &self.animation_duration)
            .finish_non_exhaustive()
    }
}
