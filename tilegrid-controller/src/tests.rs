use crate::*;

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tilegrid::{GridOptions, PageControl, VisibleRange};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Popular,
    Recent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    Attach(usize, ItemId),
    Detach(usize, ItemId),
}

/// Records attach/detach calls and checks they alternate per index.
#[derive(Default)]
struct Recorder {
    attached: BTreeSet<usize>,
    events: Vec<Event>,
}

impl Recorder {
    fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl TileRenderer<String> for Recorder {
    fn attach(&mut self, index: usize, item: &Item<String>) {
        assert!(self.attached.insert(index), "tile {index} attached twice");
        self.events.push(Event::Attach(index, item.id));
    }

    fn detach(&mut self, index: usize, item: &Item<String>) {
        assert!(self.attached.remove(&index), "tile {index} detached while not attached");
        self.events.push(Event::Detach(index, item.id));
    }
}

fn items(first_id: i64, count: usize) -> Vec<Item<String>> {
    (0..count)
        .map(|i| {
            let id = first_id + i as i64;
            Item::new(id, format!("https://posters.test/{id}.jpg"))
        })
        .collect()
}

// 100x150 tiles with a 10px gap: width 430 fits 4 columns, width 210 fits 2. Row pitch 160.
fn options() -> ControllerOptions<()> {
    ControllerOptions::new(GridOptions::new(100.0, 150.0, 10.0))
}

fn controller() -> GridController<Mode, String> {
    GridController::new(Mode::Popular, options())
}

fn range(first_index: usize, last_index: usize) -> Option<VisibleRange> {
    Some(VisibleRange {
        first_index,
        last_index,
    })
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

/// 40 items, 4 columns, viewport 300 high, first scan done.
fn settled_40() -> (GridController<Mode, String>, Recorder) {
    let mut c = controller();
    let mut r = Recorder::default();
    c.on_resize(430.0, 300.0, 0, &mut r);
    c.on_reload(items(1000, 40), 3, &mut r);
    c.tick(0, &mut r);
    (c, r)
}

#[test]
fn empty_reload_has_no_rows_and_nothing_rendered() {
    let mut c = controller();
    let mut r = Recorder::default();
    c.on_resize(430.0, 300.0, 0, &mut r);
    c.on_reload(Vec::new(), 0, &mut r);
    assert!(!c.is_initialize_pending());

    assert_eq!(c.tick(16, &mut r), None);
    assert_eq!(c.layout().rows(), 0);
    assert_eq!(c.layout().columns(), 4);
    assert_eq!(c.visible_range(), None);
    assert_eq!(c.rendered_count(), 0);
    assert!(c.paginator().controls().is_empty());
    assert!(r.events.is_empty());
}

#[test]
fn first_scan_waits_for_layout_and_a_tick() {
    let mut c = controller();
    let mut r = Recorder::default();

    c.on_reload(items(1, 40), 1, &mut r);
    assert!(c.is_initialize_pending());
    assert!(c.tiles().iter().all(|t| !t.visible && t.cell.is_none()));

    // No width yet: nothing to scan against.
    c.tick(0, &mut r);
    assert!(c.is_initialize_pending());
    assert!(r.events.is_empty());

    // Bounds are committed on resize, the scan still waits for the next tick.
    c.on_resize(430.0, 300.0, 0, &mut r);
    assert!(c.tiles().iter().all(|t| t.visible));
    assert_eq!(c.layout().rows(), 10);
    assert!(r.events.is_empty());

    c.tick(16, &mut r);
    assert!(!c.is_initialize_pending());
    assert_eq!(c.visible_range(), range(0, 7));
    let attached: Vec<usize> = r.attached.iter().copied().collect();
    assert_eq!(attached, (0..8).collect::<Vec<_>>());
    assert!(c.tiles()[..8].iter().all(|t| t.rendered));
    assert!(c.tiles()[8..].iter().all(|t| !t.rendered));
}

#[test]
fn scroll_then_resize_keeps_the_rendered_set_on_screen() {
    let (mut c, mut r) = settled_40();
    r.take();

    // content 1590, viewport 300: position 0.5 puts the top at 645
    c.on_scroll(0.5, 0, &mut r);
    assert_eq!(c.visible_range(), range(16, 23));
    assert!(approx(c.viewport().y, 645.0));
    let events = r.take();
    for i in 0..8 {
        assert!(events.contains(&Event::Detach(i, ItemId(1000 + i as i64))));
    }
    for i in 16..24 {
        assert!(events.contains(&Event::Attach(i, ItemId(1000 + i as i64))));
    }

    // Two columns, 20 rows: content 3190, top at 1445 shows rows 9 and 10.
    let reflow = c.on_resize(210.0, 300.0, 0, &mut r);
    assert!(reflow.columns_changed);
    assert_eq!(c.layout().columns(), 2);
    assert_eq!(c.tile(18).and_then(|t| t.cell), Some(tilegrid::Cell { col: 0, row: 9 }));
    assert_eq!(c.visible_range(), range(18, 21));
    let attached: Vec<usize> = r.attached.iter().copied().collect();
    assert_eq!(attached, vec![18, 19, 20, 21]);
    for i in 0..c.tiles().len() {
        assert_eq!(c.tiles()[i].rendered, (18..=21).contains(&i), "tile {i}");
    }
}

#[test]
fn tiny_widths_are_skipped_without_touching_tiles() {
    let (mut c, mut r) = settled_40();
    r.take();
    let before: Vec<_> = c.tiles().iter().map(|t| t.bounds).collect();

    let reflow = c.on_resize(0.0, 300.0, 0, &mut r);
    assert!(reflow.skipped);
    assert_eq!(c.layout().columns(), 4);
    let after: Vec<_> = c.tiles().iter().map(|t| t.bounds).collect();
    assert_eq!(before, after);
    assert_eq!(c.visible_range(), range(0, 7));
    assert!(r.events.is_empty());
}

#[test]
fn reload_detaches_the_old_set_and_scrolls_to_top() {
    let (mut c, mut r) = settled_40();
    c.on_scroll(0.5, 0, &mut r);
    r.take();

    c.on_reload(items(5000, 12), 3, &mut r);
    let events = r.take();
    assert_eq!(events.len(), 8);
    for i in 16..24 {
        assert!(events.contains(&Event::Detach(i, ItemId(1000 + i as i64))));
    }
    assert_eq!(c.rendered_count(), 0);
    assert_eq!(c.scroll_position(), 0.0);
    assert_eq!(c.layout().rows(), 3);
    assert_eq!(c.index_of(ItemId(5003)), Some(3));
    assert_eq!(c.index_of(ItemId(1003)), None);

    c.tick(16, &mut r);
    assert_eq!(c.visible_range(), range(0, 7));
    assert!(
        r.take()
            .iter()
            .all(|e| matches!(e, Event::Attach(i, id) if id.0 == 5000 + *i as i64))
    );
}

#[test]
fn wheel_gestures_animate_and_scan_each_frame() {
    let (mut c, mut r) = settled_40();

    // One notch down: 150 / 1590 of the range.
    assert!(c.on_wheel(-120.0, 0));
    let target = 150.0 / 1590.0;
    assert!(approx(c.smooth_scroll().target(), target));

    let mid = c.tick(50, &mut r);
    assert!(mid.is_some_and(|p| approx(p, target / 2.0)));
    let end = c.tick(100, &mut r);
    assert!(end.is_some_and(|p| approx(p, target)));
    assert_eq!(c.tick(116, &mut r), None);

    // top ~121.7: rows 0..=2 intersect
    assert_eq!(c.visible_range(), range(0, 11));

    assert!(!c.on_wheel(0.0, 200));
}

#[test]
fn wheel_is_ignored_before_anything_is_laid_out() {
    let mut c = controller();
    assert!(!c.on_wheel(-120.0, 0));
    assert!(!c.smooth_scroll().is_animating());
}

#[test]
fn rendered_tiles_fade_in() {
    let (mut c, mut r) = settled_40();
    assert_eq!(c.tile_opacity(0), 0.0);
    c.tick(100, &mut r);
    assert!(approx(c.tile_opacity(0), 0.5));
    c.tick(400, &mut r);
    assert_eq!(c.tile_opacity(0), 1.0);
    assert_eq!(c.tile_opacity(39), 0.0);
}

#[test]
fn tiles_shown_by_scroll_or_resize_fade_in_from_that_event() {
    let (mut c, mut r) = settled_40();
    c.tick(5_000, &mut r);

    c.on_scroll(1.0, 10_000, &mut r);
    assert_eq!(c.visible_range(), range(32, 39));
    assert_eq!(c.tile(32).and_then(|t| t.rendered_at_ms), Some(10_000));
    assert_eq!(c.tile_opacity(32), 0.0);
    c.tick(10_100, &mut r);
    assert!(approx(c.tile_opacity(32), 0.5));

    c.on_scroll(0.0, 15_000, &mut r);
    assert_eq!(c.visible_range(), range(0, 7));

    // Six columns: rows 0 and 1 now hold tiles 0..=11.
    c.on_resize(650.0, 300.0, 20_000, &mut r);
    assert_eq!(c.visible_range(), range(0, 11));
    assert_eq!(c.tile(8).and_then(|t| t.rendered_at_ms), Some(20_000));
    assert_eq!(c.tile_opacity(8), 0.0);
    assert_eq!(c.tile(0).and_then(|t| t.rendered_at_ms), Some(15_000));
    assert_eq!(c.tile_opacity(0), 1.0);
}

#[test]
fn overlays_are_looked_up_once_per_population() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let options = ControllerOptions::new(GridOptions::new(100.0, 150.0, 10.0))
        .with_overlay_lookup(Some(move |id: ItemId| {
            counter.fetch_add(1, Ordering::Relaxed);
            (id.0 % 2 == 0).then_some("favourite")
        }));
    let mut c: GridController<Mode, String, &'static str> =
        GridController::new(Mode::Popular, options);
    let mut r = Recorder::default();

    c.on_resize(430.0, 300.0, 0, &mut r);
    c.on_reload(items(10, 20), 1, &mut r);
    c.tick(0, &mut r);
    c.on_scroll(1.0, 0, &mut r);
    c.on_resize(210.0, 300.0, 0, &mut r);
    assert_eq!(calls.load(Ordering::Relaxed), 20);

    assert_eq!(c.tile(0).and_then(|t| t.overlay), Some("favourite"));
    assert_eq!(c.tile(1).and_then(|t| t.overlay), None);
    assert_eq!(c.tile_for_id(ItemId(12)).map(|t| t.index), Some(2));

    c.on_reload(items(100, 5), 1, &mut r);
    assert_eq!(calls.load(Ordering::Relaxed), 25);
}

#[test]
fn duplicate_ids_resolve_to_the_first_tile() {
    let mut c = controller();
    let mut r = Recorder::default();
    let mut list = items(1, 3);
    list.push(Item::new(2, "dup".to_string()));
    c.on_reload(list, 1, &mut r);
    assert_eq!(c.tiles().len(), 4);
    assert_eq!(c.index_of(ItemId(2)), Some(1));
}

#[test]
fn reload_guard_serializes_page_changes() {
    let (mut c, mut r) = settled_40();
    assert_eq!(c.paginator().total_pages(), 3);

    let ticket = c.select_page(2).unwrap();
    assert_eq!(ticket.page, 2);
    assert_eq!(ticket.mode, Mode::Popular);
    assert!(c.is_loading());
    assert!(c.on_page_selected(3).is_none());
    assert!(c.request_reload(Mode::Recent, 1).is_none());

    let page = CatalogPage {
        items: items(2000, 40),
        total_pages: 3,
    };
    c.complete_reload(ReloadOutcome::new(ticket, Ok(page)), &mut r)
        .unwrap();
    assert_eq!(c.paginator().selected_page(), 2);
    assert_eq!(c.items()[0].id, ItemId(2000));

    // Still held while the loading transition plays.
    assert!(c.is_loading());
    assert!(c.on_page_selected(3).is_none());
    assert!(c.loading_transition_finished());
    assert!(c.on_page_selected(2).is_none());
    assert!(!c.loading_transition_finished());
    assert!(!c.is_loading());

    let ticket = c.request_reload(Mode::Recent, 1).unwrap();
    let page = CatalogPage {
        items: items(3000, 4),
        total_pages: 1,
    };
    c.complete_reload(ReloadOutcome::new(ticket, Ok(page)), &mut r)
        .unwrap();
    assert_eq!(*c.mode(), Mode::Recent);
    assert_eq!(c.paginator().pages(), tilegrid::PageSet::new(1, 1));
}

#[test]
fn selecting_the_current_or_a_missing_page_does_nothing() {
    let (mut c, _r) = settled_40();
    assert!(c.select_page(1).is_none());
    assert!(c.on_page_selected(1).is_none());
    assert!(c.on_page_selected(0).is_none());
    assert!(c.on_page_selected(4).is_none());
    assert!(!c.is_loading());
}

#[test]
fn jump_input_commits_one_reload() {
    let (mut c, _r) = settled_40();
    c.on_reload(items(1, 40), 10, &mut NullRenderer);
    assert!(c.paginator_mut().activate_ellipsis(tilegrid::EllipsisSide::High));
    for ch in "999".chars() {
        assert!(c.paginator_mut().push_char(ch));
    }
    assert!(matches!(
        c.paginator().controls().get(2),
        Some(PageControl::Input { text, .. }) if text == "999"
    ));

    let ticket = c.commit_page_input().unwrap();
    assert_eq!(ticket.page, 10);
    assert!(c.commit_page_input().is_none());
}

#[test]
fn failed_fetch_keeps_contents_and_releases_the_guard() {
    let (mut c, mut r) = settled_40();
    r.take();

    let ticket = c.on_page_selected(3).unwrap();
    let err: BoxError = Box::new(std::io::Error::other("catalog offline"));
    let res = c.complete_reload(ReloadOutcome::new(ticket, Err(err)), &mut r);
    assert!(matches!(res, Err(ReloadError::Fetch(_))));
    assert!(res.unwrap_err().to_string().contains("catalog offline"));

    assert!(!c.is_loading());
    assert_eq!(c.items().len(), 40);
    assert_eq!(c.paginator().selected_page(), 1);
    assert_eq!(c.visible_range(), range(0, 7));
    assert!(r.events.is_empty());
    assert!(c.on_page_selected(3).is_some());
}

#[test]
fn outcomes_must_match_the_reload_in_flight() {
    let (mut c, mut r) = settled_40();

    let empty = || CatalogPage {
        items: Vec::<Item<String>>::new(),
        total_pages: 1,
    };
    let first = c.on_page_selected(2).unwrap();
    let stale = first.clone();
    let err: BoxError = Box::new(std::io::Error::other("timeout"));
    assert!(
        c.complete_reload(ReloadOutcome::new(first, Err(err)), &mut r)
            .is_err()
    );

    assert!(matches!(
        c.complete_reload(ReloadOutcome::new(stale.clone(), Ok(empty())), &mut r),
        Err(ReloadError::NotInFlight)
    ));

    let second = c.on_page_selected(2).unwrap();
    assert_eq!(second.generation(), stale.generation() + 1);
    assert!(matches!(
        c.complete_reload(ReloadOutcome::new(stale, Ok(empty())), &mut r),
        Err(ReloadError::StaleTicket { expected, got }) if expected == got + 1
    ));
    assert!(c.is_loading());
    assert_eq!(c.items().len(), 40);

    c.complete_reload(ReloadOutcome::new(second, Ok(empty())), &mut r)
        .unwrap();
    assert!(c.items().is_empty());
}

#[test]
fn snapshot_restores_scroll_pages_and_filters() {
    let (mut c, mut r) = settled_40();
    c.on_scroll(0.5, 0, &mut r);
    assert!(c.toggle_filters());
    let snap = c.snapshot();
    assert_eq!(snap.pages, tilegrid::PageSet::new(1, 3));
    assert!(snap.view.filters_open);

    let mut restored = controller();
    let mut r2 = Recorder::default();
    restored.on_resize(430.0, 300.0, 0, &mut r2);
    restored.on_reload(items(1000, 40), 3, &mut r2);
    restored.restore_snapshot(snap, 0, &mut r2);
    restored.tick(0, &mut r2);

    assert!(approx(restored.scroll_position(), 0.5));
    assert!(restored.view_state().filters_open);
    assert_eq!(restored.visible_range(), range(16, 23));
    let attached: Vec<usize> = r2.attached.iter().copied().collect();
    assert_eq!(attached, (16..24).collect::<Vec<_>>());
}

#[derive(Debug, thiserror::Error)]
#[error("page {0} is out of range")]
struct OutOfRange(u32);

struct MemoryCatalog {
    pages: u32,
    per_page: usize,
}

impl Catalog<Mode, String> for MemoryCatalog {
    type Error = OutOfRange;

    fn fetch_page(
        &self,
        _mode: &Mode,
        page: u32,
    ) -> impl Future<Output = Result<CatalogPage<String>, OutOfRange>> + Send {
        let result = if page == 0 || page > self.pages {
            Err(OutOfRange(page))
        } else {
            let first = (page as usize - 1) * self.per_page;
            Ok(CatalogPage {
                items: items(first as i64, self.per_page),
                total_pages: self.pages,
            })
        };
        async move { result }
    }
}

#[tokio::test]
async fn fetches_are_marshalled_back_to_the_ui_loop() {
    let catalog = Arc::new(MemoryCatalog {
        pages: 4,
        per_page: 12,
    });
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let mut c = controller();
    let mut r = Recorder::default();
    c.on_resize(430.0, 300.0, 0, &mut r);

    for page in [1u32, 9] {
        let ticket = c.request_reload(Mode::Popular, page).unwrap();
        let catalog = Arc::clone(&catalog);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = fetch(&*catalog, ticket).await;
            let _ = tx.send(outcome);
        });

        let outcome = rx.recv().await.unwrap();
        let res = c.complete_reload(outcome, &mut r);
        if page == 1 {
            res.unwrap();
            assert!(c.loading_transition_finished());
        } else {
            let err = res.unwrap_err();
            assert_eq!(err.to_string(), "catalog fetch failed: page 9 is out of range");
            assert!(!c.is_loading());
        }
    }

    assert_eq!(c.items().len(), 12);
    assert_eq!(c.paginator().pages(), tilegrid::PageSet::new(1, 4));
    c.tick(0, &mut r);
    assert_eq!(c.visible_range(), range(0, 7));
}
