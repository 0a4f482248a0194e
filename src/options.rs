//! Navigation kinds and caller-facing options.
//!
//! The navigation methods accept anything convertible into a
//! [`NavigationTarget`]:
//!
//! | Caller passes | Target |
//! |---|---|
//! | `"home"` (no `/`) | [`NavigationTarget::ByName`] |
//! | `"/pages/home/home"` | [`NavigationTarget::ByUrl`] |
//! | [`NavigateOptions`] | [`NavigationTarget::Options`] |
//!
//! Use [`NavigationTarget::parse`] to attach params to the string forms.
//!
//! ```
//! use miniapp_navigator::{NavigateOptions, NavigationTarget, QueryParams};
//!
//! let by_name = NavigationTarget::parse("home", QueryParams::new().with("id", 1));
//! assert!(matches!(by_name, NavigationTarget::ByName { .. }));
//!
//! let by_url: NavigationTarget = "/pages/home/home".into();
//! assert!(matches!(by_url, NavigationTarget::ByUrl { .. }));
//!
//! let options = NavigateOptions::name("home").param("id", 1).animation_duration(200);
//! assert!(matches!(NavigationTarget::from(&options), NavigationTarget::Options(_)));
//! ```

use crate::params::{ParamValue, QueryParams};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// ============================================================================
// NavigationKind
// ============================================================================

/// The five host navigation primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKind {
    /// Keep the current page and open a new one.
    NavigateTo,
    /// Close the current page and open a new one.
    RedirectTo,
    /// Jump to a tab bar page, closing all non-tab pages.
    SwitchTab,
    /// Close every page and open a new one.
    ReLaunch,
    /// Pop pages off the stack.
    NavigateBack,
}

impl NavigationKind {
    /// All kinds, in declaration order.
    pub const ALL: [NavigationKind; 5] = [
        NavigationKind::NavigateTo,
        NavigationKind::RedirectTo,
        NavigationKind::SwitchTab,
        NavigationKind::ReLaunch,
        NavigationKind::NavigateBack,
    ];

    /// The host's name for this primitive.
    pub fn as_str(self) -> &'static str {
        match self {
            NavigationKind::NavigateTo => "navigateTo",
            NavigationKind::RedirectTo => "redirectTo",
            NavigationKind::SwitchTab => "switchTab",
            NavigationKind::ReLaunch => "reLaunch",
            NavigationKind::NavigateBack => "navigateBack",
        }
    }

    /// `true` for every kind that opens a target page.
    pub fn is_forward(self) -> bool {
        !matches!(self, NavigationKind::NavigateBack)
    }
}

impl fmt::Display for NavigationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names none of the five kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown navigation kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for NavigationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NavigationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

// ============================================================================
// AnimationType
// ============================================================================

/// Window animation requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationType {
    Auto,
    None,
    SlideInRight,
    SlideInLeft,
    SlideInTop,
    SlideInBottom,
    FadeIn,
    ZoomOut,
    ZoomFadeOut,
    PopIn,
}

impl AnimationType {
    /// The host's name for this animation.
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationType::Auto => "auto",
            AnimationType::None => "none",
            AnimationType::SlideInRight => "slide-in-right",
            AnimationType::SlideInLeft => "slide-in-left",
            AnimationType::SlideInTop => "slide-in-top",
            AnimationType::SlideInBottom => "slide-in-bottom",
            AnimationType::FadeIn => "fade-in",
            AnimationType::ZoomOut => "zoom-out",
            AnimationType::ZoomFadeOut => "zoom-fade-out",
            AnimationType::PopIn => "pop-in",
        }
    }
}

impl fmt::Display for AnimationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Host callbacks
// ============================================================================

/// Callback invoked by the host with its (opaque) result object.
pub type HostCallback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Named listeners for data sent back by the opened page.
pub type EventListeners = BTreeMap<String, HostCallback>;

/// The `success` / `fail` / `complete` triple shared by every primitive.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub success: Option<HostCallback>,
    pub fail: Option<HostCallback>,
    pub complete: Option<HostCallback>,
}

impl Callbacks {
    /// Return `true` if no callback is set.
    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.fail.is_none() && self.complete.is_none()
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("success", &self.success.is_some())
            .field("fail", &self.fail.is_some())
            .field("complete", &self.complete.is_some())
            .finish()
    }
}

// ============================================================================
// NavigateOptions
// ============================================================================

/// Structured options for the forward navigation kinds.
///
/// `name` takes precedence over `url` when both are set.
///
/// # Example
///
/// ```
/// use miniapp_navigator::{AnimationType, NavigateOptions};
///
/// let options = NavigateOptions::name("goods")
///     .param("cid", 3)
///     .param("goodsId", "g-17")
///     .animation_type(AnimationType::SlideInRight)
///     .on_success(|_res| { /* talk to the opened page */ });
///
/// assert_eq!(options.params.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct NavigateOptions {
    pub name: Option<String>,
    pub url: Option<String>,
    pub params: QueryParams,
    pub animation_type: Option<AnimationType>,
    pub animation_duration: Option<u32>,
    pub events: EventListeners,
    pub callbacks: Callbacks,
}

impl NavigateOptions {
    /// Empty options; set a `name` or `url` before navigating.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options targeting a route name.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Options targeting a route path.
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Add one query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Replace all query parameters.
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Transition animation for the opened page.
    pub fn animation_type(mut self, animation: AnimationType) -> Self {
        self.animation_type = Some(animation);
        self
    }

    /// Animation duration in milliseconds.
    pub fn animation_duration(mut self, millis: u32) -> Self {
        self.animation_duration = Some(millis);
        self
    }

    /// Listen for an event emitted by the opened page.
    pub fn on_event<F>(mut self, event: impl Into<String>, listener: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.events.insert(event.into(), Arc::new(listener));
        self
    }

    /// Called by the host when the primitive succeeds.
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.callbacks.success = Some(Arc::new(callback));
        self
    }

    /// Called by the host when the primitive fails.
    pub fn on_fail<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.callbacks.fail = Some(Arc::new(callback));
        self
    }

    /// Called by the host after success or failure.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.callbacks.complete = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for NavigateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigateOptions")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("params", &self.params)
            .field("animation_type", &self.animation_type)
            .field("animation_duration", &self.animation_duration)
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

// ============================================================================
// BackOptions
// ============================================================================

/// Options for `navigateBack`.
#[derive(Clone, Debug)]
pub struct BackOptions {
    /// Number of pages to pop.
    pub delta: u32,
    pub animation_type: Option<AnimationType>,
    pub animation_duration: Option<u32>,
    pub callbacks: Callbacks,
}

impl Default for BackOptions {
    fn default() -> Self {
        Self {
            delta: 1,
            animation_type: None,
            animation_duration: None,
            callbacks: Callbacks::default(),
        }
    }
}

impl BackOptions {
    /// Pop one page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop `delta` pages.
    pub fn delta(delta: u32) -> Self {
        Self {
            delta,
            ..Self::default()
        }
    }

    /// Transition animation for the closing pages.
    pub fn animation_type(mut self, animation: AnimationType) -> Self {
        self.animation_type = Some(animation);
        self
    }

    /// Animation duration in milliseconds.
    pub fn animation_duration(mut self, millis: u32) -> Self {
        self.animation_duration = Some(millis);
        self
    }

    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.callbacks.success = Some(Arc::new(callback));
        self
    }

    pub fn on_fail<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.callbacks.fail = Some(Arc::new(callback));
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.callbacks.complete = Some(Arc::new(callback));
        self
    }
}

// ============================================================================
// NavigationTarget
// ============================================================================

/// Where a forward navigation should go.
#[derive(Clone, Debug)]
pub enum NavigationTarget {
    /// A route name plus query parameters.
    ByName { name: String, params: QueryParams },
    /// A literal route path plus query parameters.
    ByUrl { url: String, params: QueryParams },
    /// Fully structured options.
    Options(NavigateOptions),
}

impl NavigationTarget {
    /// Classify a bare string: without a `/` it is a route name, otherwise a
    /// path.
    pub fn parse(target: impl Into<String>, params: QueryParams) -> Self {
        let target = target.into();
        if target.contains('/') {
            NavigationTarget::ByUrl {
                url: target,
                params,
            }
        } else {
            NavigationTarget::ByName {
                name: target,
                params,
            }
        }
    }

    /// Short description used in log lines and loop errors.
    pub fn describe(&self) -> String {
        match self {
            NavigationTarget::ByName { name, .. } => name.clone(),
            NavigationTarget::ByUrl { url, .. } => url.clone(),
            NavigationTarget::Options(options) => options
                .name
                .clone()
                .or_else(|| options.url.clone())
                .unwrap_or_default(),
        }
    }
}

impl From<&str> for NavigationTarget {
    fn from(target: &str) -> Self {
        NavigationTarget::parse(target, QueryParams::new())
    }
}

impl From<String> for NavigationTarget {
    fn from(target: String) -> Self {
        NavigationTarget::parse(target, QueryParams::new())
    }
}

impl<S: Into<String>> From<(S, QueryParams)> for NavigationTarget {
    fn from((target, params): (S, QueryParams)) -> Self {
        NavigationTarget::parse(target, params)
    }
}

impl From<NavigateOptions> for NavigationTarget {
    fn from(options: NavigateOptions) -> Self {
        NavigationTarget::Options(options)
    }
}

impl From<&NavigateOptions> for NavigationTarget {
    fn from(options: &NavigateOptions) -> Self {
        NavigationTarget::Options(options.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
