use std::cell::RefCell;
use std::rc::Rc;

use scroll_pager::{BounceDirection, EdgeInsets, PagerOptions, RelativeControlPoint};
use scroll_pager_adapter::{PagingController, ScrollSurface};

#[derive(Debug, Default)]
struct Sheet {
    offset: f64,
    insets: EdgeInsets,
}

impl ScrollSurface for Sheet {
    fn offset(&self) -> f64 {
        self.offset
    }

    fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    fn content_height(&self) -> f64 {
        1_600.0
    }

    fn set_insets(&mut self, insets: EdgeInsets) {
        self.insets = insets;
    }

    fn flash_scroll_indicators(&mut self) {
        println!("  (indicators flashed)");
    }
}

fn main() {
    // Example: a bottom sheet with three resting positions.
    //
    // An adapter would:
    // - forward resize and drag events from its scroll view
    // - call scheduler().tick(now_ms) from its display refresh callback
    // - apply the controller's decision to its native deceleration target
    let sheet = Rc::new(RefCell::new(Sheet::default()));
    let options = PagerOptions::default().with_preferred_frame_rate(60);
    let controller = PagingController::new(&sheet, options);
    controller.on_resize(800.0);

    let points = vec![
        RelativeControlPoint::bottom(0.0).with_bounce(BounceDirection::None),
        RelativeControlPoint::bottom(200.0),
        RelativeControlPoint::top(104.0),
    ];
    controller
        .configure_with(points, 1, false, |ok| println!("peeking: {ok}"))
        .expect("valid control points");
    println!(
        "points={:?} offset={} insets={:?}",
        controller
            .absolute_control_points()
            .iter()
            .map(|p| p.value)
            .collect::<Vec<_>>(),
        sheet.borrow().offset,
        sheet.borrow().insets,
    );

    // The user drags up past the peeking point and flings.
    controller.on_drag_begin();
    sheet.borrow_mut().offset = -520.0;
    let decision = controller.on_drag_end(1.2, -150.0);
    println!("release decision={decision:?}");

    let mut now_ms = 0u64;
    while controller.scheduler().has_pending_work() {
        controller.scheduler().tick(now_ms);
        if now_ms.is_multiple_of(64) {
            println!("t={now_ms} offset={:.1}", sheet.borrow().offset);
        }
        now_ms += 16;
    }
    println!(
        "settled: anchor={:?} offset={} insets={:?}",
        controller.current_anchor_index(),
        sheet.borrow().offset,
        sheet.borrow().insets,
    );

    // Collapse the sheet programmatically.
    controller
        .anchor_with(0, true, |ok| println!("collapsed: {ok}"))
        .expect("known control point");
    while controller.scheduler().has_pending_work() {
        controller.scheduler().tick(now_ms);
        now_ms += 16;
    }
    println!(
        "done: anchor={:?} offset={}",
        controller.current_anchor_index(),
        sheet.borrow().offset
    );
}
