//! The host capability the router drives.
//!
//! The mini-program runtime owns the real page stack. The router only needs
//! the five navigation primitives plus a way to read the top of the stack,
//! expressed by [`NavigationHost`].
//!
//! Forward kinds are dispatched through a closed table
//! ([`forward_primitive`]) instead of looking a primitive up by name.

use crate::options::{BackOptions, NavigationKind};
use crate::request::NavigationRequest;

/// Navigation primitives and page-stack introspection provided by the host.
///
/// # Example
///
/// ```
/// use miniapp_navigator::{BackOptions, NavigationHost, NavigationRequest};
///
/// struct ConsoleHost;
///
/// impl NavigationHost for ConsoleHost {
///     fn navigate_to(&self, request: &NavigationRequest) {
///         println!("navigateTo {}", request.url);
///     }
///     fn redirect_to(&self, request: &NavigationRequest) {
///         println!("redirectTo {}", request.url);
///     }
///     fn switch_tab(&self, request: &NavigationRequest) {
///         println!("switchTab {}", request.url);
///     }
///     fn re_launch(&self, request: &NavigationRequest) {
///         println!("reLaunch {}", request.url);
///     }
///     fn navigate_back(&self, options: &BackOptions) {
///         println!("navigateBack {}", options.delta);
///     }
///     fn current_route(&self) -> Option<String> {
///         Some("pages/home/home".into())
///     }
/// }
/// ```
pub trait NavigationHost: Send + Sync + 'static {
    /// Keep the current page and open `request.url`.
    fn navigate_to(&self, request: &NavigationRequest);

    /// Close the current page and open `request.url`.
    fn redirect_to(&self, request: &NavigationRequest);

    /// Switch to the tab page at `request.url`.
    fn switch_tab(&self, request: &NavigationRequest);

    /// Close all pages and open `request.url`.
    fn re_launch(&self, request: &NavigationRequest);

    /// Pop `options.delta` pages.
    fn navigate_back(&self, options: &BackOptions);

    /// Raw route of the page on top of the stack (e.g. `pages/home/home`,
    /// without a leading `/`), or `None` when the stack is empty.
    fn current_route(&self) -> Option<String>;
}

/// A forward host primitive.
pub type HostPrimitive = fn(&dyn NavigationHost, &NavigationRequest);

/// Map a kind to its host primitive. `NavigateBack` has none: it takes
/// [`BackOptions`] rather than a request.
pub fn forward_primitive(kind: NavigationKind) -> Option<HostPrimitive> {
    let primitive: HostPrimitive = match kind {
        NavigationKind::NavigateTo => navigate_to,
        NavigationKind::RedirectTo => redirect_to,
        NavigationKind::SwitchTab => switch_tab,
        NavigationKind::ReLaunch => re_launch,
        NavigationKind::NavigateBack => return None,
    };
    Some(primitive)
}

fn navigate_to(host: &dyn NavigationHost, request: &NavigationRequest) {
    host.navigate_to(request);
}

fn redirect_to(host: &dyn NavigationHost, request: &NavigationRequest) {
    host.redirect_to(request);
}

fn switch_tab(host: &dyn NavigationHost, request: &NavigationRequest) {
    host.switch_tab(request);
}

fn re_launch(host: &dyn NavigationHost, request: &NavigationRequest) {
    host.re_launch(request);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::QueryParams;
    use crate::route::RouteDescriptor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn push(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl NavigationHost for Recorder {
        fn navigate_to(&self, request: &NavigationRequest) {
            self.push(format!("navigateTo {}", request.url));
        }
        fn redirect_to(&self, request: &NavigationRequest) {
            self.push(format!("redirectTo {}", request.url));
        }
        fn switch_tab(&self, request: &NavigationRequest) {
            self.push(format!("switchTab {}", request.url));
        }
        fn re_launch(&self, request: &NavigationRequest) {
            self.push(format!("reLaunch {}", request.url));
        }
        fn navigate_back(&self, options: &BackOptions) {
            self.push(format!("navigateBack {}", options.delta));
        }
        fn current_route(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_table_maps_each_forward_kind() {
        let host = Recorder::default();
        for kind in NavigationKind::ALL.into_iter().filter(|k| k.is_forward()) {
            let request =
                NavigationRequest::new(kind, RouteDescriptor::new("/pages/a/a"), QueryParams::new());
            let primitive = forward_primitive(kind).unwrap();
            primitive(&host, &request);
        }

        assert_eq!(
            *host.calls.lock().unwrap(),
            vec![
                "navigateTo /pages/a/a?",
                "redirectTo /pages/a/a?",
                "switchTab /pages/a/a?",
                "reLaunch /pages/a/a?",
            ]
        );
    }

    #[test]
    fn test_back_has_no_forward_primitive() {
        assert!(forward_primitive(NavigationKind::NavigateBack).is_none());
    }
}
