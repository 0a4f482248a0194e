//! Process-wide router installation. Kept in its own test binary because the
//! installed instance lives for the whole process.

mod common;

use common::*;
use miniapp_navigator::global::{install_router, router};
use miniapp_navigator::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_install_once_then_navigate() {
    assert!(router().is_none());

    let (mut first, host) = router_on(Some("pages/home/home"));
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counter = hook_calls.clone();
    first.after_each(after_fn(move |_to, _from| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let installed = install_router(first).unwrap();
    assert_eq!(installed.pipeline().hook_count(), 1);

    let (second, _) = router_on(None);
    assert_eq!(
        install_router(second).unwrap_err(),
        NavigationError::AlreadyInstalled
    );

    let global = router().unwrap();
    pollster::block_on(global.navigate_to("detail")).unwrap();
    assert_eq!(
        host.calls(),
        vec![HostCall::forward(
            NavigationKind::NavigateTo,
            "/pages/detail/detail?"
        )]
    );
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
}
