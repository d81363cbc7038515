// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret placement from a touch on rendered math.
//!
//! Models a one-line expression `x + 1` as three glyph boxes inside an input
//! box and asks where a caret should go for a few touch points. The math input
//! also tracks taps outside itself to decide when to dismiss the keypad.
//!
//! Run:
//! - `cargo run -p understory_demos --example cursor_probe`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_keypad_gesture::dismiss::DismissTracker;
use understory_node_registry::probe::{
    ContentSpan, CursorProbe, PointProbe, ProbeConfig, ProbeHit,
};

struct Expression {
    line: Rect,
    glyphs: Vec<(&'static str, Rect)>,
}

impl PointProbe for Expression {
    type Id = &'static str;

    fn probe(&self, point: Point) -> Option<ProbeHit<Self::Id>> {
        if let Some((id, _)) = self.glyphs.iter().find(|(_, r)| r.contains(point)) {
            return Some(ProbeHit::Leaf(*id));
        }
        self.line.contains(point).then_some(ProbeHit::Container("line"))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let container = Rect::new(0.0, 0.0, 300.0, 60.0);
    let expr = Expression {
        line: Rect::new(10.0, 20.0, 100.0, 44.0),
        glyphs: vec![
            ("x", Rect::new(10.0, 20.0, 30.0, 44.0)),
            ("+", Rect::new(40.0, 20.0, 60.0, 44.0)),
            ("1", Rect::new(70.0, 20.0, 90.0, 44.0)),
        ],
    };
    let content = ContentSpan {
        left: 10.0,
        right: 90.0,
    };

    let probe = CursorProbe::new(ProbeConfig::default());
    for touch in [
        Point::new(50.0, 30.0),
        Point::new(80.0, 5.0),
        Point::new(35.0, 58.0),
        Point::new(250.0, 30.0),
        Point::new(2.0, 50.0),
    ] {
        let placement = probe.place(&expr, container, Some(content), touch);
        println!("touch at {touch:?} -> {placement:?}");
    }
    println!(
        "empty input -> {:?}",
        probe.place(&expr, container, None, Point::new(50.0, 30.0))
    );

    // Dragging the cursor handle from below the field towards its right edge.
    for finger in [Point::new(40.0, 70.0), Point::new(90.0, 75.0), Point::new(140.0, 80.0)] {
        let handle = probe.handle_position(container, finger, 24.0);
        let placement = probe.place_from_handle(&expr, container, Some(content), finger);
        println!("handle drag at {finger:?} -> handle {handle:?}, caret {placement:?}");
    }

    let mut dismiss = DismissTracker::default();
    dismiss.set_keypad_bounds(Some(Rect::new(0.0, 400.0, 320.0, 640.0)));
    dismiss.on_touch_start(&[Point::new(150.0, 200.0)], true, false);
    println!("tap on page blurs input: {}", dismiss.on_touch_end(true));
    dismiss.on_touch_start(&[Point::new(150.0, 200.0)], true, false);
    dismiss.on_touch_move(Point::new(150.0, 260.0));
    println!("scroll on page blurs input: {}", dismiss.on_touch_end(true));
    dismiss.on_touch_start(&[Point::new(150.0, 500.0)], true, false);
    println!("tap on keypad blurs input: {}", dismiss.on_touch_end(true));
}
