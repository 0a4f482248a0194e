//! Test fixtures shared by the integration tests.
//!
//! Provides a recording host, a sample route table and assertion helpers.

#![allow(dead_code)]

use miniapp_navigator::*;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// One primitive call observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Forward { kind: NavigationKind, url: String },
    Back { delta: u32 },
}

impl HostCall {
    pub fn forward(kind: NavigationKind, url: &str) -> Self {
        HostCall::Forward {
            kind,
            url: url.to_string(),
        }
    }
}

/// Host double: records every primitive call and answers `current_route`
/// from a settable page stack top. Forward calls fire the request's
/// `success` and `complete` callbacks the way a real host would.
#[derive(Default)]
pub struct RecordingHost {
    top: Mutex<Option<String>>,
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn with_top(top: Option<&str>) -> Self {
        Self {
            top: Mutex::new(top.map(String::from)),
            calls: Mutex::default(),
        }
    }

    pub fn set_top(&self, top: Option<&str>) {
        *self.top.lock().unwrap() = top.map(String::from);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn forward(&self, kind: NavigationKind, request: &NavigationRequest) {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::forward(kind, &request.url));

        let response = json!({ "errMsg": format!("{}:ok", kind) });
        if let Some(success) = &request.callbacks.success {
            success(&response);
        }
        if let Some(complete) = &request.callbacks.complete {
            complete(&response);
        }
    }
}

impl NavigationHost for RecordingHost {
    fn navigate_to(&self, request: &NavigationRequest) {
        self.forward(NavigationKind::NavigateTo, request);
    }

    fn redirect_to(&self, request: &NavigationRequest) {
        self.forward(NavigationKind::RedirectTo, request);
    }

    fn switch_tab(&self, request: &NavigationRequest) {
        self.forward(NavigationKind::SwitchTab, request);
    }

    fn re_launch(&self, request: &NavigationRequest) {
        self.forward(NavigationKind::ReLaunch, request);
    }

    fn navigate_back(&self, options: &BackOptions) {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::Back { delta: options.delta });
    }

    fn current_route(&self) -> Option<String> {
        self.top.lock().unwrap().clone()
    }
}

/// Routes used across the integration tests.
pub fn sample_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new("/pages/home/home")
            .name("home")
            .style(json!({ "navigationBarTitleText": "Home" })),
        RouteDescriptor::new("/pages/login/login").name("login"),
        RouteDescriptor::new("/pages/detail/detail").name("detail"),
        RouteDescriptor::new("/pages/mine/mine").name("mine"),
        RouteDescriptor::new("/pages/about/about"),
    ]
}

/// A router over [`sample_routes`] whose host reports `top` as the current page.
pub fn router_on(top: Option<&str>) -> (Router, Arc<RecordingHost>) {
    let host = Arc::new(RecordingHost::with_top(top));
    let router = Router::from_table(RouteTable::new(sample_routes()), host.clone());
    (router, host)
}

/// Shared, ordered event log for guard/hook ordering assertions.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}
