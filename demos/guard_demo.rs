//! Global Guards Demo
//!
//! Simulates a mini-program page stack in the terminal and shows how a global
//! before guard redirects anonymous users to the login page, while an after
//! hook records page views.
//!
//! Run with `RUST_LOG=miniapp_navigator=debug cargo run --example guard_demo`.

use miniapp_navigator::{
    after_fn, next_fn, BackOptions, NavigateOptions, NavigationHost, NavigationRequest,
    QueryParams, RedirectSpec, RouteTable, Router,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Simulated host
// ============================================================================

/// Keeps a page stack of raw routes, like the real runtime does.
struct TerminalHost {
    stack: Mutex<Vec<String>>,
}

impl TerminalHost {
    fn new(first_page: &str) -> Self {
        Self {
            stack: Mutex::new(vec![first_page.to_string()]),
        }
    }

    fn open(&self, verb: &str, request: &NavigationRequest, keep: usize) {
        let mut stack = self.stack.lock().unwrap();
        let keep = keep.min(stack.len());
        stack.truncate(keep);
        stack.push(request.path().trim_start_matches('/').to_string());
        println!("[host] {:<10} {:<40} stack={:?}", verb, request.url, *stack);
    }
}

impl NavigationHost for TerminalHost {
    fn navigate_to(&self, request: &NavigationRequest) {
        let depth = self.stack.lock().unwrap().len();
        self.open("navigateTo", request, depth);
    }

    fn redirect_to(&self, request: &NavigationRequest) {
        let depth = self.stack.lock().unwrap().len();
        self.open("redirectTo", request, depth.saturating_sub(1));
    }

    fn switch_tab(&self, request: &NavigationRequest) {
        self.open("switchTab", request, 0);
    }

    fn re_launch(&self, request: &NavigationRequest) {
        self.open("reLaunch", request, 0);
    }

    fn navigate_back(&self, options: &BackOptions) {
        let mut stack = self.stack.lock().unwrap();
        let keep = stack.len().saturating_sub(options.delta as usize).max(1);
        stack.truncate(keep);
        println!("[host] navigateBack delta={} stack={:?}", options.delta, *stack);
    }

    fn current_route(&self) -> Option<String> {
        self.stack.lock().unwrap().last().cloned()
    }
}

// ============================================================================
// Main
// ============================================================================

const PAGES_JSON: &str = r#"{
    "pages": [
        { "path": "pages/home/home", "name": "home", "style": { "navigationBarTitleText": "Home" } },
        { "path": "pages/login/login", "name": "login" },
        { "path": "pages/orders/orders", "name": "orders" },
        { "path": "pages/mine/mine", "name": "mine" }
    ],
    "subPackages": [
        { "root": "shop", "pages": [{ "path": "goods/goods", "name": "goods" }] }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let table = RouteTable::from_pages_json(PAGES_JSON)?;
    let host = Arc::new(TerminalHost::new("pages/home/home"));
    let mut router = Router::from_table(table, host);

    let logged_in = Arc::new(AtomicBool::new(false));
    let session = logged_in.clone();
    router.before_each(next_fn(move |to, _from, next| {
        if to.name() == Some("orders") && !session.load(Ordering::SeqCst) {
            println!("[guard] '{}' needs a login", to.url);
            let back = QueryParams::new().with("redirect", to.url.clone());
            next.redirect(RedirectSpec::navigate_to(
                NavigateOptions::name("login").params(back),
            ));
        } else {
            next.proceed();
        }
    }));

    let views = Arc::new(Mutex::new(Vec::new()));
    let recorder = views.clone();
    router.after_each(after_fn(move |to, from| {
        recorder.lock().unwrap().push(format!(
            "{} -> {}",
            from.map_or("<none>", |r| r.path.as_str()),
            to.path()
        ));
    }));

    pollster::block_on(async {
        router
            .navigate_to(("goods", QueryParams::new().with("id", 42)))
            .await?;
        router.navigate_to("orders").await?;

        logged_in.store(true, Ordering::SeqCst);
        router.navigate_back(BackOptions::new())?;
        router.redirect_to("orders").await?;
        router.switch_tab("mine").await?;

        match router.navigate_to("settings").await {
            Ok(_) => println!("unexpected success"),
            Err(err) => println!("[error] {}", err),
        }
        Ok::<_, miniapp_navigator::NavigationError>(())
    })?;

    println!("\nPage views:");
    for view in views.lock().unwrap().iter() {
        println!("  {}", view);
    }

    Ok(())
}
