//! Integration tests for dispatch: option merging, host invocation and
//! redirects.

mod common;

use common::*;
use miniapp_navigator::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn test_string_form_serializes_params() {
    let (router, host) = router_on(Some("pages/home/home"));

    let target = NavigationTarget::parse("home", QueryParams::new().with("id", 1));
    let outcome = pollster::block_on(router.navigate_to(target)).unwrap();

    assert_eq!(outcome.url(), Some("/pages/home/home?id=1"));
    assert_eq!(
        host.calls(),
        vec![HostCall::forward(
            NavigationKind::NavigateTo,
            "/pages/home/home?id=1"
        )]
    );
}

#[test]
fn test_string_with_separator_is_a_path() {
    let (router, host) = router_on(Some("pages/home/home"));

    pollster::block_on(router.redirect_to("/pages/about/about")).unwrap();

    assert_eq!(
        host.calls(),
        vec![HostCall::forward(
            NavigationKind::RedirectTo,
            "/pages/about/about?"
        )]
    );
}

#[test]
fn test_structured_options_are_not_mutated() {
    let (router, host) = router_on(Some("pages/home/home"));
    let options = NavigateOptions::name("detail")
        .param("id", 1)
        .animation_duration(250);
    let before = format!("{:?}", options);

    pollster::block_on(router.navigate_to(&options)).unwrap();

    assert_eq!(format!("{:?}", options), before);
    assert!(options.url.is_none());
    assert_eq!(
        host.calls(),
        vec![HostCall::forward(
            NavigationKind::NavigateTo,
            "/pages/detail/detail?id=1"
        )]
    );
}

#[test]
fn test_options_callbacks_reach_the_host() {
    let (router, _host) = router_on(Some("pages/home/home"));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let success = seen.clone();
    let complete = seen.clone();

    let options = NavigateOptions::name("mine")
        .on_success(move |res| success.lock().unwrap().push(format!("success {}", res["errMsg"])))
        .on_complete(move |_| complete.lock().unwrap().push("complete".to_string()));

    pollster::block_on(router.switch_tab(options)).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["success \"switchTab:ok\"", "complete"]
    );
}

#[test]
fn test_unknown_name_fails_before_guards_and_host() {
    let (mut router, host) = router_on(Some("pages/home/home"));
    let guard_calls = Arc::new(AtomicUsize::new(0));
    let counter = guard_calls.clone();
    router.before_each(guard_fn(move |_to, _from| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { GuardOutcome::Proceed }
    }));

    let err = pollster::block_on(router.navigate_to("settings")).unwrap_err();

    assert_eq!(
        err,
        NavigationError::RouteNotFound {
            key: "settings".to_string(),
            field: LookupField::Name,
        }
    );
    assert_eq!(guard_calls.load(Ordering::SeqCst), 0);
    assert!(host.calls().is_empty());
}

#[test]
fn test_unknown_current_page_fails() {
    let (router, host) = router_on(Some("pages/gone/gone"));

    let err = pollster::block_on(router.navigate_to("detail")).unwrap_err();

    assert_eq!(
        err,
        NavigationError::RouteNotFound {
            key: "/pages/gone/gone".to_string(),
            field: LookupField::Path,
        }
    );
    assert!(host.calls().is_empty());
}

#[test]
fn test_no_guards_one_host_call() {
    let (router, host) = router_on(None);

    pollster::block_on(router.re_launch("home")).unwrap();

    assert_eq!(
        host.calls(),
        vec![HostCall::forward(NavigationKind::ReLaunch, "/pages/home/home?")]
    );
}

#[test]
fn test_proceed_runs_after_hook_before_host() {
    let (mut router, host) = router_on(Some("pages/home/home"));
    let log = event_log();

    let guard_log = log.clone();
    router.before_each(next_fn(move |to, from, next| {
        guard_log.lock().unwrap().push(format!(
            "before {} from {}",
            to.path(),
            from.map_or("-", |r| r.path.as_str())
        ));
        next.proceed();
    }));

    let after_log = log.clone();
    let observed_host = host.clone();
    router.after_each(after_fn(move |to, _from| {
        after_log
            .lock()
            .unwrap()
            .push(format!("after {} host calls {}", to.path(), observed_host.calls().len()));
    }));

    pollster::block_on(router.navigate_to("detail")).unwrap();

    assert_eq!(
        events(&log),
        vec![
            "before /pages/detail/detail from /pages/home/home",
            "after /pages/detail/detail host calls 0",
        ]
    );
    assert_eq!(host.calls().len(), 1);
}

#[test]
fn test_redirect_replaces_original_navigation() {
    let (mut router, host) = router_on(Some("pages/home/home"));
    router.before_each(next_fn(|to, _from, next| {
        if to.name() == Some("detail") {
            next.redirect(RedirectSpec::named("redirectTo", "login"));
        } else {
            next.proceed();
        }
    }));

    let outcome = pollster::block_on(router.navigate_to("detail")).unwrap();

    assert_eq!(
        outcome,
        NavigationOutcome::Navigated {
            kind: NavigationKind::RedirectTo,
            url: "/pages/login/login?".to_string(),
        }
    );
    assert_eq!(
        host.calls(),
        vec![HostCall::forward(
            NavigationKind::RedirectTo,
            "/pages/login/login?"
        )]
    );
}

#[test]
fn test_redirect_target_keeps_its_params() {
    let (mut router, host) = router_on(Some("pages/home/home"));
    router.before_each(guard_fn(|to, _from| {
        let redirect = (to.name() == Some("detail")).then(|| {
            RedirectSpec::redirect_to(
                NavigateOptions::name("login").param("back", to.url.clone()),
            )
        });
        async move { redirect.map_or(GuardOutcome::Proceed, GuardOutcome::Redirect) }
    }));

    pollster::block_on(router.navigate_to(("detail", QueryParams::new().with("id", 9)))).unwrap();

    assert_eq!(
        host.calls(),
        vec![HostCall::forward(
            NavigationKind::RedirectTo,
            "/pages/login/login?back=%2Fpages%2Fdetail%2Fdetail%3Fid%3D9"
        )]
    );
}

#[test]
fn test_unrecognized_redirect_kind_fails() {
    let (mut router, host) = router_on(Some("pages/home/home"));
    router.before_each(next_fn(|_to, _from, next| {
        next.redirect(RedirectSpec::named("openWindow", "login"));
    }));

    let err = pollster::block_on(router.navigate_to("detail")).unwrap_err();

    assert_eq!(
        err,
        NavigationError::UnrecognizedRedirectKind {
            kind: "openWindow".to_string()
        }
    );
    assert!(host.calls().is_empty());
}

#[test]
fn test_navigate_back_bypasses_guards() {
    let (mut router, host) = router_on(Some("pages/detail/detail"));
    let guard_calls = Arc::new(AtomicUsize::new(0));
    let counter = guard_calls.clone();
    router.before_each(next_fn(move |_to, _from, next| {
        counter.fetch_add(1, Ordering::SeqCst);
        next.proceed();
    }));
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let hook_counter = hook_calls.clone();
    router.after_each(after_fn(move |_to, _from| {
        hook_counter.fetch_add(1, Ordering::SeqCst);
    }));

    let outcome = router.navigate_back(BackOptions::delta(2)).unwrap();

    assert_eq!(outcome, NavigationOutcome::WentBack { delta: 2 });
    assert_eq!(host.calls(), vec![HostCall::Back { delta: 2 }]);
    assert_eq!(guard_calls.load(Ordering::SeqCst), 0);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_redirect_loop_is_bounded() {
    let (mut router, host) = router_on(Some("pages/home/home"));
    let guard_calls = Arc::new(AtomicUsize::new(0));
    let counter = guard_calls.clone();
    router.before_each(next_fn(move |_to, _from, next| {
        counter.fetch_add(1, Ordering::SeqCst);
        next.redirect(RedirectSpec::navigate_to("login"));
    }));

    let err = pollster::block_on(router.navigate_to("detail")).unwrap_err();

    assert!(matches!(err, NavigationError::RedirectLoop { .. }));
    assert_eq!(guard_calls.load(Ordering::SeqCst), MAX_REDIRECT_DEPTH + 1);
    assert!(host.calls().is_empty());
}

#[test]
fn test_redirects_up_to_the_limit_still_navigate() {
    let (mut router, host) = router_on(Some("pages/home/home"));
    let guard_calls = Arc::new(AtomicUsize::new(0));
    let counter = guard_calls.clone();
    router.before_each(next_fn(move |_to, _from, next| {
        if counter.fetch_add(1, Ordering::SeqCst) < MAX_REDIRECT_DEPTH {
            next.redirect(RedirectSpec::navigate_to("login"));
        } else {
            next.proceed();
        }
    }));

    let outcome = pollster::block_on(router.navigate_to("detail")).unwrap();

    assert_eq!(
        outcome,
        NavigationOutcome::Navigated {
            kind: NavigationKind::NavigateTo,
            url: "/pages/login/login?".to_string(),
        }
    );
    assert_eq!(guard_calls.load(Ordering::SeqCst), MAX_REDIRECT_DEPTH + 1);
    assert_eq!(
        host.calls(),
        vec![HostCall::forward(
            NavigationKind::NavigateTo,
            "/pages/login/login?"
        )]
    );
}

#[test]
fn test_named_back_redirect_ignores_forward_target() {
    let (mut router, host) = router_on(Some("pages/detail/detail"));
    router.before_each(next_fn(|_to, _from, next| {
        next.redirect(RedirectSpec::named("navigateBack", "login"));
    }));

    let outcome = pollster::block_on(router.navigate_to("detail")).unwrap();

    assert_eq!(outcome, NavigationOutcome::WentBack { delta: 1 });
    assert_eq!(host.calls(), vec![HostCall::Back { delta: 1 }]);
}

#[test]
fn test_empty_page_stack_gives_no_from() {
    let (mut router, host) = router_on(None);
    let log = event_log();
    let guard_log = log.clone();
    router.before_each(next_fn(move |_to, from, next| {
        guard_log
            .lock()
            .unwrap()
            .push(format!("from {:?}", from.map(|r| r.path.clone())));
        next.proceed();
    }));

    pollster::block_on(router.re_launch("home")).unwrap();

    assert_eq!(events(&log), vec!["from None"]);
    assert_eq!(host.calls().len(), 1);
}

#[test]
fn test_router_from_pages_json() {
    let table = RouteTable::from_pages_json(
        r#"{
            "pages": [
                { "path": "pages/home/home", "name": "home" },
                { "path": "pages/mine/mine", "name": "mine" }
            ],
            "subPackages": [
                { "root": "shop", "pages": [{ "path": "cart/cart", "name": "cart" }] }
            ]
        }"#,
    )
    .unwrap();
    let host = Arc::new(RecordingHost::with_top(Some("pages/home/home")));
    let router = Router::from_table(table, host.clone());

    pollster::block_on(router.navigate_to(("cart", QueryParams::new().with("sku", "x1")))).unwrap();

    assert_eq!(
        host.calls(),
        vec![HostCall::forward(
            NavigationKind::NavigateTo,
            "/shop/cart/cart?sku=x1"
        )]
    );
    assert_eq!(
        router.get_route("/shop/cart/cart", LookupField::Path).unwrap().name.as_deref(),
        Some("cart")
    );
}
