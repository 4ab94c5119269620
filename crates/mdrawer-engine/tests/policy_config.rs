#![forbid(unsafe_code)]

//! Policy-as-data loading.
//!
//! Run:
//!   cargo test -p mdrawer-engine --features policy-config --test policy_config

use std::io::Write;

use mdrawer_core::{Edge, LayoutMode, Size};
use mdrawer_engine::{ConfigError, Coordinator, DrawerConfig, DrawerPolicy};

const SCREEN: Size = Size::new(375.0, 812.0);

#[test]
fn empty_toml_is_default_policy() {
    let policy = DrawerPolicy::from_toml_str("").unwrap();
    assert_eq!(policy, DrawerPolicy::default());
}

#[test]
fn toml_mounts_edges_with_overrides() {
    let policy = DrawerPolicy::from_toml_str(
        r#"
        layout = "sidebar-layout"
        base_z_index = 50

        [defaults]
        animation_speed = 0.8

        [edges.left]
        hitbox_size = 30.0

        [edges.bottom]
        "#,
    )
    .unwrap();

    assert_eq!(policy.layout, LayoutMode::SidebarLayout);
    let coordinator = Coordinator::from_policy(&policy, SCREEN).unwrap();
    assert!(coordinator.is_mounted(Edge::Left));
    assert!(coordinator.is_mounted(Edge::Bottom));
    assert!(!coordinator.is_mounted(Edge::Top));

    let left = coordinator.config(Edge::Left).unwrap();
    assert_eq!(left.hitbox_size, 30.0);
    assert_eq!(left.animation_speed, 0.8);
    assert_eq!(left.snap_open_threshold, 0.3);
    assert_eq!(coordinator.z_index_of(Edge::Left), 50);
    assert_eq!(coordinator.layout(), LayoutMode::SidebarLayout);
}

#[test]
fn json_policy_loads() {
    let policy = DrawerPolicy::from_json_str(
        r#"{ "layout": "corner-aware", "edges": { "top": { "snap_open_threshold": 0.5 } } }"#,
    )
    .unwrap();
    assert_eq!(policy.layout, LayoutMode::CornerAware);
    assert_eq!(
        policy.mounted()[Edge::Top],
        Some(DrawerConfig::default().with_snap_open_threshold(0.5))
    );
}

#[test]
fn invalid_values_are_rejected() {
    let err = DrawerPolicy::from_toml_str(
        r#"
        [edges.right]
        snap_close_threshold = 1.5
        "#,
    )
    .unwrap_err();
    match err {
        ConfigError::Invalid(problems) => {
            assert_eq!(problems.len(), 1);
            assert!(problems[0].contains("snap_close_threshold"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn malformed_documents_report_format() {
    assert!(matches!(
        DrawerPolicy::from_toml_str("layout = 3"),
        Err(ConfigError::Toml(_))
    ));
    assert!(matches!(
        DrawerPolicy::from_json_str("{ layout"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        DrawerPolicy::from_toml_str(r#"layout = "diagonal""#),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn file_round_trip() {
    let policy = DrawerPolicy {
        layout: LayoutMode::HeaderFooterLayout,
        ..DrawerPolicy::default()
    };
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(policy.to_toml_string().unwrap().as_bytes())
        .unwrap();

    let loaded = DrawerPolicy::from_toml_file(file.path()).unwrap();
    assert_eq!(loaded, policy);
}

#[test]
fn missing_file_is_io_error() {
    let err = DrawerPolicy::from_toml_file("/nonexistent/drawers.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(err.to_string().starts_with("failed to read policy file"));
}
