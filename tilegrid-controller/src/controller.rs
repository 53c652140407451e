use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tilegrid::{
    Bounds, GridLayout, PageSet, Paginator, Reflow, ScrollState, SmoothScroll, VisibilityChange,
    VisibilityTracker, VisibleRange,
};

use crate::{
    ControllerOptions, Item, ItemId, ReloadError, ReloadOutcome, ReloadTicket, Tile, TileRenderer,
};

/// Per-view UI state that is not derived from the data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewState {
    pub filters_open: bool,
}

/// What a view needs to come back where the user left it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewSnapshot {
    pub scroll: ScrollState,
    pub pages: PageSet,
    pub view: ViewState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReloadPhase {
    Idle,
    Fetching { generation: u64 },
    /// Data applied, the loading transition is still playing.
    Settling,
}

/// Composition root for one grid view.
///
/// Owns the layout, visibility tracker, smooth scroll and paginator for a single content view,
/// plus the tile arena (tile `i` is bound to item `i`). It holds no UI objects. Adapters drive
/// it from their event loop:
/// - `on_resize` / `on_scroll` / `on_wheel` when UI events occur
/// - `tick(now_ms)` every frame, which also runs the deferred post-reload scan
/// - `request_reload` / `on_page_selected` to get a [`ReloadTicket`], then
///   `complete_reload` with the fetched [`ReloadOutcome`]
///
/// Payload attach/detach goes through the [`TileRenderer`] passed to each call.
#[derive(Debug)]
pub struct GridController<M, P, O = ()> {
    options: ControllerOptions<O>,
    mode: M,
    layout: GridLayout,
    tracker: VisibilityTracker,
    paginator: Paginator,
    scroll: SmoothScroll,
    items: Vec<Item<P>>,
    tiles: Vec<Tile<O>>,
    by_id: HashMap<ItemId, usize>,
    viewport_height: f32,
    pending_initialize: bool,
    phase: ReloadPhase,
    generation: u64,
    view: ViewState,
    now_ms: u64,
    changes: Vec<VisibilityChange>,
}

impl<M: Clone, P, O> GridController<M, P, O> {
    pub fn new(mode: M, options: ControllerOptions<O>) -> Self {
        Self {
            layout: GridLayout::new(options.grid),
            scroll: SmoothScroll::new(options.scroll),
            options,
            mode,
            tracker: VisibilityTracker::new(),
            paginator: Paginator::default(),
            items: Vec::new(),
            tiles: Vec::new(),
            by_id: HashMap::new(),
            viewport_height: 0.0,
            pending_initialize: false,
            phase: ReloadPhase::Idle,
            generation: 0,
            view: ViewState::default(),
            now_ms: 0,
            changes: Vec::new(),
        }
    }

    pub fn options(&self) -> &ControllerOptions<O> {
        &self.options
    }

    /// The query mode of the data currently shown.
    pub fn mode(&self) -> &M {
        &self.mode
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// For ellipsis activation and typing. Page changes should go through
    /// [`GridController::select_page`] / [`GridController::commit_page_input`].
    pub fn paginator_mut(&mut self) -> &mut Paginator {
        &mut self.paginator
    }

    pub fn smooth_scroll(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn scroll_position(&self) -> f32 {
        self.scroll.position()
    }

    pub fn items(&self) -> &[Item<P>] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item<P>> {
        self.items.get(index)
    }

    pub fn tiles(&self) -> &[Tile<O>] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile<O>> {
        self.tiles.get(index)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn tile_for_id(&self, id: ItemId) -> Option<&Tile<O>> {
        self.tiles.get(self.index_of(id)?)
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.tracker.visible_range()
    }

    pub fn rendered_count(&self) -> usize {
        self.tracker.rendered_count()
    }

    /// Payload opacity of a tile at the time of the last event, following the configured fade-in.
    pub fn tile_opacity(&self, index: usize) -> f32 {
        self.tiles
            .get(index)
            .map_or(0.0, |t| t.opacity(self.now_ms, self.options.grid.fade_in_ms))
    }

    /// `true` between a reload and the tick that runs its first scan.
    pub fn is_initialize_pending(&self) -> bool {
        self.pending_initialize
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    /// Flips the filter panel and returns whether it is now open.
    pub fn toggle_filters(&mut self) -> bool {
        self.view.filters_open = !self.view.filters_open;
        self.view.filters_open
    }

    pub fn set_filters_open(&mut self, open: bool) {
        self.view.filters_open = open;
    }

    /// The viewport in content space, derived from the normalized scroll position.
    pub fn viewport(&self) -> Bounds {
        let scrollable = (self.layout.content_height() - self.viewport_height).max(0.0);
        Bounds::new(
            0.0,
            self.scroll.position() * scrollable,
            self.layout.container_width(),
            self.viewport_height,
        )
    }

    /// Replaces the data set.
    ///
    /// Tiles still rendered from the previous set are detached first. Overlays are looked up
    /// once per new tile, cells and bounds are assigned, and the scroll position snaps back to
    /// the top. The first visibility scan is deferred to the next [`GridController::tick`] so
    /// it runs against committed bounds.
    pub fn on_reload(
        &mut self,
        items: Vec<Item<P>>,
        total_pages: u32,
        renderer: &mut impl TileRenderer<P>,
    ) {
        let changes = &mut self.changes;
        self.tracker.clear(|c| changes.push(c));
        self.apply_changes(renderer);

        self.by_id.clear();
        self.by_id.reserve(items.len());
        for (i, item) in items.iter().enumerate() {
            match self.by_id.entry(item.id) {
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
                Entry::Occupied(_) => {
                    cwarn!(id = item.id.0, index = i, "GridController::on_reload: duplicate id");
                }
            }
        }

        let options = &self.options;
        self.tiles = items
            .iter()
            .enumerate()
            .map(|(i, item)| Tile::new(i, options.lookup_overlay(item.id)))
            .collect();
        self.items = items;

        let count = self.items.len();
        let changes = &mut self.changes;
        self.tracker.reset(count, |c| changes.push(c));
        debug_assert!(self.changes.is_empty());
        self.changes.clear();

        self.layout.set_item_count(count);
        self.assign_layout();
        self.scroll.reset_to(0.0);

        let selected = self.paginator.selected_page();
        self.paginator.set_pages(selected, total_pages);
        self.pending_initialize = count > 0;
        cdebug!(count, total_pages, "GridController::on_reload");
    }

    /// The container was resized.
    ///
    /// Transient tiny widths are skipped by the layout; the scan still runs for the new height.
    /// Tiles that come into view start their fade-in at `now_ms`.
    pub fn on_resize(
        &mut self,
        width: f32,
        height: f32,
        now_ms: u64,
        renderer: &mut impl TileRenderer<P>,
    ) -> Reflow {
        self.now_ms = now_ms;
        self.viewport_height = if height.is_finite() {
            height.max(0.0)
        } else {
            0.0
        };

        let reflow = self.layout.reflow(width, self.items.len());
        if !reflow.skipped {
            if reflow.columns_changed {
                ctrace!(
                    columns = self.layout.columns(),
                    "GridController::on_resize reassigning cells"
                );
            }
            self.assign_layout();
        }
        self.scan(renderer);
        reflow
    }

    /// The UI scroll container moved (scrollbar drag, keyboard, programmatic).
    ///
    /// Any running smooth-scroll transition is dropped.
    pub fn on_scroll(&mut self, position: f32, now_ms: u64, renderer: &mut impl TileRenderer<P>) {
        self.now_ms = now_ms;
        self.scroll.reset_to(position);
        self.scan(renderer);
    }

    /// Feeds a raw wheel event into the smooth scroll. Returns `false` when it was ignored.
    pub fn on_wheel(&mut self, delta_y: f32, now_ms: u64) -> bool {
        self.scroll
            .on_wheel(delta_y, self.layout.content_height(), now_ms)
    }

    /// Advances time.
    ///
    /// Runs a pending post-reload scan once the layout has real bounds, then steps the
    /// smooth-scroll transition. Returns the new position for the UI scroll container while a
    /// transition is running.
    pub fn tick(&mut self, now_ms: u64, renderer: &mut impl TileRenderer<P>) -> Option<f32> {
        self.now_ms = now_ms;
        if self.pending_initialize {
            self.try_initialize(renderer);
        }
        let position = self.scroll.tick(now_ms)?;
        self.scan(renderer);
        Some(position)
    }

    pub fn is_loading(&self) -> bool {
        self.phase != ReloadPhase::Idle
    }

    /// Asks for a reload. Returns `None` while another one is outstanding.
    pub fn request_reload(&mut self, mode: M, page: u32) -> Option<ReloadTicket<M>> {
        if self.phase != ReloadPhase::Idle {
            cdebug!(page, "GridController::request_reload ignored: reload outstanding");
            return None;
        }
        self.generation += 1;
        self.phase = ReloadPhase::Fetching {
            generation: self.generation,
        };
        cdebug!(generation = self.generation, page, "GridController::request_reload");
        Some(ReloadTicket::new(self.generation, mode, page.max(1)))
    }

    /// A page was chosen in the selector. Reloads the current mode at that page.
    ///
    /// The selected page and pages outside `1..=total_pages` are ignored.
    pub fn on_page_selected(&mut self, page: u32) -> Option<ReloadTicket<M>> {
        if page == 0
            || page > self.paginator.total_pages()
            || page == self.paginator.selected_page()
        {
            return None;
        }
        self.request_reload(self.mode.clone(), page)
    }

    /// A numbered page button was clicked.
    pub fn select_page(&mut self, page: u32) -> Option<ReloadTicket<M>> {
        let page = self.paginator.select(page)?;
        self.on_page_selected(page)
    }

    /// The jump input was committed (enter or focus loss).
    pub fn commit_page_input(&mut self) -> Option<ReloadTicket<M>> {
        let page = self.paginator.commit()?;
        self.on_page_selected(page)
    }

    /// Applies a fetched page.
    ///
    /// On success the data set is replaced, the selector moves to the ticket's page and the
    /// guard stays held until [`GridController::loading_transition_finished`]. On failure the
    /// previous contents stay and the guard is released immediately.
    pub fn complete_reload(
        &mut self,
        outcome: ReloadOutcome<M, P>,
        renderer: &mut impl TileRenderer<P>,
    ) -> Result<(), ReloadError> {
        let ReloadOutcome { ticket, result } = outcome;
        match self.phase {
            ReloadPhase::Fetching { generation } if generation == ticket.generation() => {}
            ReloadPhase::Fetching { generation } => {
                cwarn!(
                    expected = generation,
                    got = ticket.generation(),
                    "GridController::complete_reload: stale ticket"
                );
                return Err(ReloadError::StaleTicket {
                    expected: generation,
                    got: ticket.generation(),
                });
            }
            ReloadPhase::Idle | ReloadPhase::Settling => return Err(ReloadError::NotInFlight),
        }

        match result {
            Ok(page) => {
                let total_pages = page.total_pages;
                self.on_reload(page.items, total_pages, renderer);
                self.paginator.set_pages(ticket.page, total_pages);
                self.mode = ticket.mode;
                self.phase = ReloadPhase::Settling;
                Ok(())
            }
            Err(err) => {
                cwarn!(error = %err, "GridController::complete_reload: fetch failed");
                self.phase = ReloadPhase::Idle;
                Err(ReloadError::Fetch(err))
            }
        }
    }

    /// The post-reload loading transition finished; releases the reload guard.
    pub fn loading_transition_finished(&mut self) -> bool {
        if self.phase != ReloadPhase::Settling {
            return false;
        }
        self.phase = ReloadPhase::Idle;
        true
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            scroll: self.scroll.state(),
            pages: self.paginator.pages(),
            view: self.view,
        }
    }

    /// Restores a [`ViewSnapshot`] without animating.
    pub fn restore_snapshot(
        &mut self,
        snapshot: ViewSnapshot,
        now_ms: u64,
        renderer: &mut impl TileRenderer<P>,
    ) {
        self.now_ms = now_ms;
        self.scroll.reset_to(snapshot.scroll.current_position);
        self.paginator
            .set_pages(snapshot.pages.selected_page, snapshot.pages.total_pages);
        self.view = snapshot.view;
        self.scan(renderer);
    }

    fn assign_layout(&mut self) {
        let layout = &self.layout;
        for tile in &mut self.tiles {
            tile.cell = layout.cell_for(tile.index);
            tile.bounds = layout.tile_bounds(tile.index);
            tile.visible = tile.bounds.is_some();
        }
    }

    fn is_laid_out(&self) -> bool {
        self.viewport_height > 0.0 && self.tiles.first().is_some_and(|t| t.visible)
    }

    fn try_initialize(&mut self, renderer: &mut impl TileRenderer<P>) {
        if !self.is_laid_out() {
            ctrace!("GridController::tick: initialize deferred, no bounds yet");
            return;
        }
        self.pending_initialize = false;
        let viewport = self.viewport();
        let tiles = &self.tiles;
        let changes = &mut self.changes;
        self.tracker
            .initialize(viewport, |i| tiles.get(i).and_then(|t| t.bounds), |c| {
                changes.push(c)
            });
        self.apply_changes(renderer);
    }

    fn scan(&mut self, renderer: &mut impl TileRenderer<P>) {
        if self.pending_initialize {
            return;
        }
        let viewport = self.viewport();
        let tiles = &self.tiles;
        let changes = &mut self.changes;
        self.tracker
            .full_scan(viewport, |i| tiles.get(i).and_then(|t| t.bounds), |c| {
                changes.push(c)
            });
        self.apply_changes(renderer);
    }

    fn apply_changes(&mut self, renderer: &mut impl TileRenderer<P>) {
        let now_ms = self.now_ms;
        for change in self.changes.drain(..) {
            let index = change.index();
            let (Some(tile), Some(item)) = (self.tiles.get_mut(index), self.items.get(index)) else {
                cwarn!(index, "GridController: render change for unknown tile");
                continue;
            };
            match change {
                VisibilityChange::Rendered(_) => {
                    tile.rendered = true;
                    tile.rendered_at_ms = Some(now_ms);
                    renderer.attach(index, item);
                }
                VisibilityChange::Unrendered(_) => {
                    tile.rendered = false;
                    tile.rendered_at_ms = None;
                    renderer.detach(index, item);
                }
            }
        }
    }
}
