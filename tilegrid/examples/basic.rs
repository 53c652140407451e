use tilegrid::{GridLayout, GridOptions, VisibilityTracker, build_page_controls};

fn main() {
    let mut layout = GridLayout::new(GridOptions::new(180.0, 260.0, 12.0));
    let reflow = layout.reflow(1000.0, 250);
    println!("geometry={:?} columns_changed={}", reflow.geometry, reflow.columns_changed);
    println!("content_height={}", layout.content_height());

    let mut tracker = VisibilityTracker::new();
    tracker.reset(layout.item_count(), |_| {});

    let viewport = tilegrid::Bounds::new(0.0, 0.0, 1000.0, 700.0);
    let mut rendered = 0;
    tracker.initialize(viewport, |i| layout.tile_bounds(i), |_| rendered += 1);
    println!("visible_range={:?} rendered={rendered}", tracker.visible_range());

    // Jump far down; the tracker re-seeds instead of walking every row.
    let viewport = tilegrid::Bounds::new(0.0, 5000.0, 1000.0, 700.0);
    tracker.full_scan(viewport, |i| layout.tile_bounds(i), |_| {});
    println!("after jump: visible_range={:?}", tracker.visible_range());

    println!("page controls (5 of 12): {:?}", build_page_controls(5, 12));
}
