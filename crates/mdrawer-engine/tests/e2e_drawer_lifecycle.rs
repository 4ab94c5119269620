#![forbid(unsafe_code)]

//! End-to-end drawer lifecycle scenarios.
//!
//! Drives a coordinator the way a host would (pointer events, imperative
//! commands, frame ticks) and checks the observable state after each step.
//!
//! Run:
//!   cargo test -p mdrawer-engine --test e2e_drawer_lifecycle

use std::thread;
use std::time::Duration;

use mdrawer_core::event::PointerEvent;
use mdrawer_core::{Edge, LayoutMode, Point, Rect, Size, Translation};
use mdrawer_engine::{
    Authority, Coordinator, DragRefusal, DrawerConfig, DrawerRuntime, ExternalSettler,
    GestureOutcome, Route, SettleDriver, SettleEvent, SettleTicket,
};

const PHONE: Size = Size::new(375.0, 812.0);
const FRAME: Duration = Duration::from_millis(16);

fn mounted(edges: &[Edge]) -> Coordinator {
    let mut coordinator = Coordinator::new(PHONE);
    for &edge in edges {
        coordinator
            .mount(edge, DrawerConfig::default())
            .expect("default config is valid");
    }
    coordinator
}

fn settle_all<S: SettleDriver>(coordinator: &mut Coordinator<S>) {
    for _ in 0..2000 {
        coordinator.advance(FRAME);
        if Edge::ALL
            .iter()
            .all(|&edge| coordinator.authority(edge) == Authority::Static)
        {
            return;
        }
    }
    panic!("settle never completed");
}

// ============================================================================
// Primary drag
// ============================================================================

#[test]
fn left_drawer_drag_open_scenario() {
    let mut coordinator = mounted(&[Edge::Left]);

    let edge = coordinator.begin_drag(Point::new(10.0, 400.0)).unwrap();
    assert_eq!(edge, Edge::Left);
    assert_eq!(coordinator.active_drawer(), Some(Edge::Left));
    assert_eq!(coordinator.authority(Edge::Left), Authority::Gesture);

    let live = coordinator.drag_to(Translation::new(150.0, 0.0)).unwrap();
    assert!((live - 0.625).abs() < 1e-12);

    let target = coordinator.end_drag(Translation::new(150.0, 0.0));
    assert_eq!(target, Some(1.0));
    assert!(coordinator.is_open(Edge::Left));
    assert_eq!(coordinator.authority(Edge::Left), Authority::Spring);
    assert_eq!(coordinator.active_drawer(), None);

    settle_all(&mut coordinator);
    assert_eq!(coordinator.authority(Edge::Left), Authority::Static);
    assert!(coordinator.is_open(Edge::Left));
    assert_eq!(coordinator.progress(Edge::Left), 1.0);
    assert_eq!(coordinator.open_order(), &[Edge::Left]);
}

#[test]
fn short_drag_snaps_back_closed() {
    let mut coordinator = mounted(&[Edge::Bottom]);

    coordinator.begin_drag(Point::new(200.0, 800.0)).unwrap();
    coordinator.drag_to(Translation::new(0.0, -48.0));
    assert_eq!(coordinator.end_drag(Translation::new(0.0, -48.0)), Some(0.0));
    assert!(!coordinator.is_open(Edge::Bottom));

    settle_all(&mut coordinator);
    assert_eq!(coordinator.progress(Edge::Bottom), 0.0);
    assert!(coordinator.open_order().is_empty());
}

#[test]
fn pointer_down_on_second_edge_is_excluded() {
    let mut coordinator = mounted(&[Edge::Left, Edge::Right]);

    coordinator.begin_drag(Point::new(10.0, 400.0)).unwrap();
    let refused = coordinator.begin_drag(Point::new(360.0, 400.0));

    assert_eq!(refused, Err(DragRefusal::AnotherDrawerActive(Edge::Left)));
    assert_eq!(coordinator.active_drawer(), Some(Edge::Left));
    assert_eq!(coordinator.authority(Edge::Right), Authority::Static);
    assert_eq!(coordinator.open_order(), &[Edge::Left]);
}

#[test]
fn drag_on_already_open_edge_can_reclose() {
    let mut coordinator = mounted(&[Edge::Left]);
    coordinator.open(Edge::Left);

    coordinator.begin_drag(Point::new(10.0, 400.0)).unwrap();
    // Barely moving an open drawer's opening drag snaps it closed.
    assert_eq!(coordinator.end_drag(Translation::new(5.0, 0.0)), Some(0.0));
    settle_all(&mut coordinator);
    assert!(!coordinator.is_open(Edge::Left));
    assert!(coordinator.open_order().is_empty());
}

// ============================================================================
// Snapping and commands
// ============================================================================

#[test]
fn snap_is_idempotent() {
    let mut coordinator = mounted(&[Edge::Top]);

    assert_eq!(coordinator.snap(Edge::Top, 0.9), Some(1.0));
    assert_eq!(coordinator.snap(Edge::Top, 0.9), Some(1.0));
    assert_eq!(coordinator.open_order(), &[Edge::Top]);

    settle_all(&mut coordinator);
    assert_eq!(coordinator.open_order(), &[Edge::Top]);
    assert_eq!(coordinator.progress(Edge::Top), 1.0);
}

#[test]
fn z_order_follows_opening_sequence() {
    let mut coordinator = mounted(&Edge::ALL);

    for edge in [Edge::Left, Edge::Top, Edge::Right] {
        coordinator.open(edge);
    }
    let z = |c: &Coordinator, e| c.z_index_of(e);
    assert!(z(&coordinator, Edge::Right) > z(&coordinator, Edge::Top));
    assert!(z(&coordinator, Edge::Top) > z(&coordinator, Edge::Left));

    coordinator.open(Edge::Left);
    let max = Edge::ALL
        .iter()
        .map(|&edge| coordinator.z_index_of(edge))
        .max()
        .unwrap();
    assert_eq!(coordinator.z_index_of(Edge::Left), max);
    assert_eq!(coordinator.z_index_of(Edge::Bottom), 1000);
}

#[test]
fn open_close_round_trip_leaves_nothing_armed() {
    let mut coordinator = mounted(&[Edge::Right]);

    coordinator.open(Edge::Right);
    assert!(coordinator.is_open(Edge::Right));
    coordinator.close(Edge::Right);

    assert!(!coordinator.is_open(Edge::Right));
    assert!(coordinator.open_order().is_empty());
    assert_eq!(coordinator.progress(Edge::Right), 0.0);
    assert_eq!(coordinator.driver().running_count(), 0);
    assert_eq!(coordinator.advance(FRAME), 0);
}

#[test]
fn animated_reversal_mid_settle() {
    let mut coordinator = mounted(&[Edge::Left]);
    coordinator.open_animated(Edge::Left);
    for _ in 0..5 {
        coordinator.advance(FRAME);
    }
    let midway = coordinator.progress(Edge::Left);
    assert!(midway > 0.0 && midway < 1.0);

    coordinator.close_animated(Edge::Left);
    assert!(!coordinator.is_open(Edge::Left));
    // Still listed until the close settle lands.
    assert_eq!(coordinator.open_order(), &[Edge::Left]);

    settle_all(&mut coordinator);
    assert_eq!(coordinator.progress(Edge::Left), 0.0);
    assert!(coordinator.open_order().is_empty());
}

#[test]
fn layout_modes_change_dimensions() {
    let mut coordinator = mounted(&Edge::ALL).with_layout(LayoutMode::CornerAware);
    assert_eq!(coordinator.dimensions(Edge::Left), Size::new(480.0, 332.0));
    assert_eq!(coordinator.dimensions(Edge::Top).width, 0.0);

    coordinator.set_layout(LayoutMode::Fullscreen);
    assert_eq!(coordinator.dimensions(Edge::Left), Size::new(480.0, 812.0));
    assert_eq!(coordinator.dimensions(Edge::Top), Size::new(375.0, 480.0));

    coordinator.set_screen_size(Size::new(1024.0, 768.0));
    assert_eq!(coordinator.dimensions(Edge::Top), Size::new(1024.0, 480.0));
}

// ============================================================================
// Close drag
// ============================================================================

#[test]
fn close_drag_below_threshold_stays_open() {
    let mut coordinator = mounted(&[Edge::Top]);
    coordinator.open(Edge::Top);

    coordinator.begin_close_drag(Edge::Top).unwrap();
    let live = coordinator.close_drag_to(Edge::Top, Translation::new(0.0, -120.0));
    assert_eq!(live, Some(0.5));
    assert_eq!(
        coordinator.end_close_drag(Edge::Top, Translation::new(0.0, -120.0)),
        Some(1.0)
    );

    settle_all(&mut coordinator);
    assert!(coordinator.is_open(Edge::Top));
    assert_eq!(coordinator.progress(Edge::Top), 1.0);
}

#[test]
fn close_drag_runs_alongside_primary_drag() {
    let mut coordinator = mounted(&[Edge::Left, Edge::Right]);
    coordinator.open(Edge::Right);

    coordinator.begin_drag(Point::new(10.0, 400.0)).unwrap();
    coordinator.begin_close_drag(Edge::Right).unwrap();

    coordinator.drag_to(Translation::new(240.0, 0.0));
    coordinator.close_drag_to(Edge::Right, Translation::new(240.0, 0.0));
    assert_eq!(coordinator.progress(Edge::Left), 1.0);
    assert_eq!(coordinator.progress(Edge::Right), 0.0);

    coordinator.end_close_drag(Edge::Right, Translation::new(240.0, 0.0));
    coordinator.end_drag(Translation::new(240.0, 0.0));
    settle_all(&mut coordinator);
    assert_eq!(coordinator.open_order(), &[Edge::Left]);
}

// ============================================================================
// Lifecycle edges
// ============================================================================

#[test]
fn unmount_during_settle_leaves_no_stuck_authority() {
    let mut coordinator = mounted(&[Edge::Bottom]);
    coordinator.open_animated(Edge::Bottom);
    coordinator.advance(FRAME);

    let config = coordinator.unmount(Edge::Bottom);
    assert_eq!(config, Some(DrawerConfig::default()));
    assert_eq!(coordinator.authority(Edge::Bottom), Authority::Static);
    assert!(!coordinator.is_open(Edge::Bottom));
    assert!(coordinator.open_order().is_empty());
    assert_eq!(coordinator.advance(FRAME), 0);

    // Remounting starts fresh.
    coordinator.mount(Edge::Bottom, DrawerConfig::default()).unwrap();
    assert!(coordinator.begin_drag(Point::new(100.0, 800.0)).is_ok());
}

#[test]
fn external_driver_reports_are_ticket_checked() {
    let mut coordinator = Coordinator::with_driver(PHONE, ExternalSettler::new());
    coordinator.mount(Edge::Left, DrawerConfig::default()).unwrap();

    coordinator.open_animated(Edge::Left);
    coordinator.close_animated(Edge::Left);
    let started = coordinator.driver_mut().take_started();
    assert_eq!(started.len(), 2);
    let (first, second) = (started[0], started[1]);
    assert_eq!(second.to, 0.0);

    // Superseded animation finishing late must not flip authority.
    assert!(!coordinator.apply_settle(SettleEvent::Complete {
        edge: Edge::Left,
        ticket: first.ticket,
        finished: true,
    }));
    assert_eq!(coordinator.authority(Edge::Left), Authority::Spring);

    assert!(coordinator.apply_settle(SettleEvent::Progress {
        edge: Edge::Left,
        ticket: second.ticket,
        value: 0.2,
    }));
    assert!(coordinator.apply_settle(SettleEvent::Complete {
        edge: Edge::Left,
        ticket: second.ticket,
        finished: true,
    }));
    assert_eq!(coordinator.authority(Edge::Left), Authority::Static);
    assert_eq!(coordinator.progress(Edge::Left), 0.0);
    assert!(coordinator.open_order().is_empty());
}

#[test]
fn interrupted_settle_keeps_open_order() {
    let mut coordinator = Coordinator::with_driver(PHONE, ExternalSettler::new());
    coordinator.mount(Edge::Right, DrawerConfig::default()).unwrap();
    coordinator.open(Edge::Right);
    coordinator.close_animated(Edge::Right);
    let request = coordinator.driver().pending(Edge::Right).unwrap();

    coordinator.apply_settle(SettleEvent::Progress {
        edge: Edge::Right,
        ticket: request.ticket,
        value: 0.4,
    });
    coordinator.apply_settle(SettleEvent::Complete {
        edge: Edge::Right,
        ticket: request.ticket,
        finished: false,
    });

    assert_eq!(coordinator.authority(Edge::Right), Authority::Static);
    assert_eq!(coordinator.progress(Edge::Right), 0.4);
    assert_eq!(coordinator.open_order(), &[Edge::Right]);
    assert_eq!(request.ticket, SettleTicket(1));
}

#[test]
fn render_handle_reads_from_another_thread() {
    let mut coordinator = mounted(&[Edge::Right]);
    let handle = coordinator.render_handle(Edge::Right);
    coordinator.open(Edge::Right);

    let transform = thread::spawn(move || handle.transform()).join().unwrap();
    assert_eq!(transform.translate_x, 240.0);
    assert_eq!(transform.translate_y, 0.0);
}

#[test]
fn render_handle_detaches_with_coordinator() {
    let coordinator = mounted(&[Edge::Left]);
    let handle = coordinator.render_handle(Edge::Left);
    drop(coordinator);
    assert!(handle.try_transform().is_err());
}

// ============================================================================
// Runtime glue
// ============================================================================

#[test]
fn runtime_close_gesture_on_measured_panel() {
    let mut runtime = DrawerRuntime::new(mounted(&[Edge::Left, Edge::Bottom]));
    runtime.coordinator_mut().open(Edge::Bottom);
    runtime.handle(mdrawer_core::event::Event::Measured {
        edge: Edge::Bottom,
        bounds: Rect::new(0.0, 572.0, 375.0, 240.0),
    });

    // Inside the bottom panel but also inside the left hitbox: panel wins.
    let began = runtime.handle(PointerEvent::down(20.0, 700.0).into());
    assert_eq!(began, Some(GestureOutcome::Began(Route::Close(Edge::Bottom))));

    runtime.handle(PointerEvent::moved(0.0, 200.0).into());
    let end = runtime.handle(PointerEvent::released(0.0, 200.0).into());
    assert_eq!(
        end,
        Some(GestureOutcome::Committed {
            route: Route::Close(Edge::Bottom),
            target: 0.0
        })
    );

    for _ in 0..2000 {
        runtime.tick(FRAME);
    }
    assert!(runtime.coordinator().open_order().is_empty());
    assert_eq!(runtime.coordinator().active_drawer(), None);
}

#[test]
fn runtime_second_touch_cannot_steal_primary_drag() {
    let mut runtime = DrawerRuntime::new(mounted(&[Edge::Left, Edge::Right]));
    runtime.handle(PointerEvent::down(10.0, 400.0).into());
    runtime.handle(PointerEvent::moved(100.0, 0.0).into());

    let second = runtime.handle(PointerEvent::down(350.0, 400.0).into());
    assert_eq!(
        second,
        Some(GestureOutcome::Refused(DragRefusal::AnotherDrawerActive(
            Edge::Left
        )))
    );
    let coordinator = runtime.coordinator();
    assert_eq!(coordinator.active_drawer(), Some(Edge::Left));
    assert_eq!(coordinator.authority(Edge::Right), Authority::Static);
    assert_eq!(coordinator.progress(Edge::Right), 0.0);
    assert_eq!(coordinator.open_order(), &[Edge::Left]);
}

#[test]
fn runtime_closes_unmeasured_open_drawer() {
    let mut runtime = DrawerRuntime::new(mounted(&[Edge::Left]));
    runtime.coordinator_mut().open(Edge::Left);

    let began = runtime.handle(PointerEvent::down(100.0, 400.0).into());
    assert_eq!(began, Some(GestureOutcome::Began(Route::Close(Edge::Left))));
    runtime.handle(PointerEvent::moved(-200.0, 0.0).into());
    let end = runtime.handle(PointerEvent::released(-200.0, 0.0).into());
    assert_eq!(
        end,
        Some(GestureOutcome::Committed {
            route: Route::Close(Edge::Left),
            target: 0.0
        })
    );

    for _ in 0..2000 {
        runtime.tick(FRAME);
    }
    assert_eq!(runtime.coordinator().progress(Edge::Left), 0.0);
    assert!(runtime.coordinator().open_order().is_empty());
}
