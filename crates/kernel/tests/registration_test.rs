#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end registration tests.
//!
//! Runs the full pipeline (processor, validator, transformer, registry)
//! against the in-memory router.

use navgraph_kernel::RouteError;
use navgraph_kernel::menu::{AccessMode, MenuProcessor, StaticMenuSource, collapse_empty};
use navgraph_kernel::routes::{ComponentHandle, LiveRouter, MemoryRouter};
use navgraph_test_utils::{
    admin_menu, menu_from_json, menu_names, test_iframes, test_menu, test_registry,
};

fn roles(list: &[&str]) -> Vec<String> {
    list.iter().map(|r| r.to_string()).collect()
}

#[test]
fn test_admin_menu_without_roles() {
    let menus = MenuProcessor::new(AccessMode::Frontend)
        .process(&admin_menu(), &[])
        .unwrap();
    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();
    let mut registry = test_registry();

    let added = registry.register(&router, &menus, &mut iframes).unwrap();

    assert_eq!(added, 4);
    assert!(router.has_route("Console"));
    assert!(router.has_route("About"));
    assert!(router.has_route("Docs"));
    assert!(router.has_route("Github"));
    assert!(!router.has_route("System"));
    assert!(!router.has_route("User"));
}

#[test]
fn test_admin_menu_with_super_role() {
    let menus = MenuProcessor::new(AccessMode::Frontend)
        .process(&admin_menu(), &roles(&["R_SUPER"]))
        .unwrap();
    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();

    let added = test_registry()
        .register(&router, &menus, &mut iframes)
        .unwrap();

    assert_eq!(added, 5);
    assert!(router.has_route("User"));
    assert!(router.has_route("Role"));
    // The stub without a component was collapsed away.
    assert!(!router.has_route("Pending"));

    let user = router.find_path("/system/user").unwrap();
    assert_eq!(
        user.component,
        Some(ComponentHandle::View {
            module: "/src/views/system/user/index.vue".to_string()
        })
    );
}

#[test]
fn test_directory_scenario_is_not_wrapped() {
    let tree = vec![
        test_menu("Dashboard", "/dashboard")
            .layout()
            .children(vec![
                test_menu("Console", "console")
                    .component("/dashboard/console")
                    .build(),
            ])
            .build(),
    ];
    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();
    test_registry().register(&router, &tree, &mut iframes).unwrap();

    let routes = router.routes();
    assert_eq!(routes.len(), 1);
    let dashboard = &routes[0];
    assert!(!dashboard.is_first_level_wrapped);
    assert_eq!(dashboard.name.as_deref(), Some("Dashboard"));
    assert_eq!(dashboard.path, "/dashboard");
    assert_eq!(dashboard.children[0].path, "/dashboard/console");
}

#[test]
fn test_first_level_leaf_gets_exactly_one_wrapper() {
    let menus = MenuProcessor::default().process(&admin_menu(), &[]).unwrap();
    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();
    test_registry().register(&router, &menus, &mut iframes).unwrap();

    let wrappers: Vec<_> = router
        .routes()
        .into_iter()
        .filter(|r| r.children.iter().any(|c| c.name.as_deref() == Some("About")))
        .collect();
    assert_eq!(wrappers.len(), 1);

    let wrapper = &wrappers[0];
    assert!(wrapper.is_first_level_wrapped);
    assert_eq!(wrapper.component, Some(ComponentHandle::Layout));
    assert_eq!(wrapper.children.len(), 1);
    assert_eq!(wrapper.children[0].path, "/about");
    assert!(wrapper.children[0].meta.is_first_level);
}

#[test]
fn test_directory_emptied_by_role_filter_stays_unwrapped() {
    let tree = vec![
        test_menu("System", "/system")
            .layout()
            .children(vec![
                test_menu("User", "user")
                    .component("/system/user")
                    .roles(&["R_SUPER"])
                    .build(),
            ])
            .build(),
    ];
    let menus = MenuProcessor::new(AccessMode::Frontend)
        .process(&tree, &[])
        .unwrap();
    assert!(menus[0].children.as_ref().is_some_and(Vec::is_empty));

    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();
    test_registry().register(&router, &menus, &mut iframes).unwrap();

    let routes = router.routes();
    assert_eq!(routes.len(), 1);
    let system = &routes[0];
    assert!(!system.is_first_level_wrapped);
    assert_eq!(system.name.as_deref(), Some("System"));
    assert_eq!(system.path, "/system");
    assert_eq!(system.component, Some(ComponentHandle::Layout));
    assert!(!system.meta.is_first_level);
    assert!(system.children.is_empty());
}

#[test]
fn test_link_only_leaf_is_registered_unwrapped() {
    let tree = vec![test_menu("Doc", "").link("https://x").build()];
    assert_eq!(collapse_empty(&tree).len(), 1);

    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();
    test_registry().register(&router, &tree, &mut iframes).unwrap();

    let routes = router.routes();
    assert_eq!(routes.len(), 1);
    assert!(!routes[0].is_first_level_wrapped);
    assert_eq!(routes[0].name.as_deref(), Some("Doc"));
    assert_eq!(routes[0].component, None);
}

#[test]
fn test_repeated_registration_adds_nothing() {
    let menus = MenuProcessor::default().process(&admin_menu(), &[]).unwrap();
    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();
    let mut registry = test_registry();

    registry.register(&router, &menus, &mut iframes).unwrap();
    let before = router.routes();
    assert_eq!(registry.register(&router, &menus, &mut iframes).unwrap(), 0);
    assert_eq!(router.routes(), before);
}

#[test]
fn test_nested_layout_aborts_registration() {
    let tree = vec![
        test_menu("System", "/system")
            .layout()
            .children(vec![
                test_menu("Inner", "/system/inner")
                    .layout()
                    .children(vec![test_menu("Page", "page").component("/page").build()])
                    .build(),
            ])
            .build(),
    ];
    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();
    let mut registry = test_registry();

    let err = registry.register(&router, &tree, &mut iframes).unwrap_err();
    match err {
        RouteError::Validation { errors } => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("Inner"));
            assert!(errors[0].contains("/system/inner"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(router.is_empty());
    assert!(!registry.is_registered());
}

#[test]
fn test_backend_menu_json() {
    let json = r#"[
        {"id": 1, "name": "Dashboard", "path": "/dashboard", "component": "/index/index",
         "meta": {"title": "Dashboard"},
         "children": [
            {"id": 2, "name": "Console", "path": "console", "component": "/dashboard/console",
             "meta": {"title": "Console", "roles": ["R_SUPER"]}}
         ]},
        {"id": 3, "name": "Empty", "path": "/empty", "component": "", "meta": {"title": "Empty"}}
    ]"#;
    let raw = menu_from_json(json).unwrap();

    // Backend mode trusts the backend's role decisions.
    let menus = MenuProcessor::new(AccessMode::Backend).process(&raw, &[]).unwrap();
    assert_eq!(menu_names(&menus), vec!["Dashboard", "Console"]);

    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();
    test_registry().register(&router, &menus, &mut iframes).unwrap();

    let dashboard = router.find_path("/dashboard").unwrap();
    assert_eq!(dashboard.id, Some(1));
    assert_eq!(dashboard.component, Some(ComponentHandle::Layout));
}

#[tokio::test]
async fn test_register_from_source() {
    let source = StaticMenuSource::new(admin_menu());
    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();
    let mut registry = test_registry();

    let added = registry
        .register_from_source(&router, &source, &roles(&["R_SUPER"]), &mut iframes)
        .await
        .unwrap();
    assert_eq!(added, 5);

    let again = registry
        .register_from_source(&router, &source, &roles(&["R_SUPER"]), &mut iframes)
        .await
        .unwrap();
    assert_eq!(again, 0);
}

#[tokio::test]
async fn test_empty_source_is_an_error() {
    let source = StaticMenuSource::new(vec![test_menu("Stub", "/stub").build()]);
    let router = MemoryRouter::new();
    let (mut iframes, _store) = test_iframes();

    let err = test_registry()
        .register_from_source(&router, &source, &[], &mut iframes)
        .await
        .unwrap_err();
    assert!(matches!(err, RouteError::EmptyMenu));
}
