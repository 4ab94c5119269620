#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use mdrawer_core::event::{Event, PointerEvent};
use mdrawer_core::{Edge, Rect, Size};
use mdrawer_engine::{Authority, Coordinator, DrawerConfig, DrawerRuntime, Route};

const SCREEN: Size = Size::new(375.0, 812.0);

fuzz_target!(|data: &[u8]| {
    // First byte picks which edges are mounted.
    let Some((&mask, ops)) = data.split_first() else {
        return;
    };

    let mut coordinator = Coordinator::new(SCREEN);
    for (bit, edge) in Edge::ALL.into_iter().enumerate() {
        if mask & (1 << bit) != 0 {
            let _ = coordinator.mount(edge, DrawerConfig::default());
        }
    }
    let mut runtime = DrawerRuntime::new(coordinator);

    for chunk in ops.chunks(3) {
        let [kind, a, b] = [chunk[0], *chunk.get(1).unwrap_or(&0), *chunk.get(2).unwrap_or(&0)];
        let x = f64::from(a) / 255.0 * SCREEN.width;
        let y = f64::from(b) / 255.0 * SCREEN.height;
        let dx = (f64::from(a) - 128.0) * 4.0;
        let dy = (f64::from(b) - 128.0) * 4.0;

        match kind % 8 {
            0 => {
                let held = match runtime.gestures().route() {
                    Some(Route::Primary(edge)) => Some(edge),
                    _ => None,
                };
                runtime.handle(PointerEvent::down(x, y).into());
                if let Some(edge) = held {
                    assert_eq!(runtime.coordinator().active_drawer(), Some(edge));
                }
            }
            1 | 2 => {
                runtime.handle(PointerEvent::moved(dx, dy).into());
            }
            3 => {
                runtime.handle(PointerEvent::released(dx, dy).into());
            }
            4 => {
                runtime.handle(PointerEvent::failed(dx, dy).into());
            }
            5 => {
                runtime.handle(PointerEvent::Cancel.into());
            }
            6 => {
                let edge = Edge::ALL[usize::from(a % 4)];
                let panel = runtime.coordinator().dimensions(edge);
                runtime.handle(Event::Measured {
                    edge,
                    bounds: Rect::new(0.0, 0.0, panel.width / 2.0, panel.height),
                });
            }
            _ => {
                runtime.tick(Duration::from_millis(u64::from(a % 64)));
            }
        }

        let coordinator = runtime.coordinator();
        for edge in Edge::ALL {
            let p = coordinator.progress(edge);
            assert!((0.0..=1.0).contains(&p), "{edge} progress {p} out of range");
        }
        let order = coordinator.open_order();
        for (i, edge) in order.iter().enumerate() {
            assert!(!order[i + 1..].contains(edge), "duplicate {edge} in {order:?}");
        }
        if let Some(active) = coordinator.active_drawer() {
            assert_eq!(coordinator.authority(active), Authority::Gesture);
        }
    }

    // Releasing input and running frames always returns to rest.
    runtime.cancel_interaction();
    for _ in 0..400 {
        runtime.tick(Duration::from_millis(16));
    }
    for edge in Edge::ALL {
        assert_eq!(runtime.coordinator().authority(edge), Authority::Static);
    }
});
