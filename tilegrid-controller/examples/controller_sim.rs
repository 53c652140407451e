use std::future::Future;

use tilegrid::GridOptions;
use tilegrid_controller::{
    Catalog, CatalogPage, ControllerOptions, GridController, Item, ItemId, TileRenderer, fetch,
};

#[derive(Clone, Debug)]
enum Mode {
    Movies,
}

#[derive(Debug, thiserror::Error)]
#[error("catalog offline")]
struct Offline;

struct StaticCatalog;

impl Catalog<Mode, String> for StaticCatalog {
    type Error = Offline;

    fn fetch_page(
        &self,
        _mode: &Mode,
        page: u32,
    ) -> impl Future<Output = Result<CatalogPage<String>, Offline>> + Send {
        let result = if page > 5 {
            Err(Offline)
        } else {
            let base = i64::from(page) * 100;
            Ok(CatalogPage {
                items: (0..60)
                    .map(|i| Item::new(base + i, format!("poster-{}.jpg", base + i)))
                    .collect(),
                total_pages: 5,
            })
        };
        async move { result }
    }
}

struct PrintRenderer;

impl TileRenderer<String> for PrintRenderer {
    fn attach(&mut self, index: usize, item: &Item<String>) {
        println!("  attach #{index} {}", item.payload);
    }

    fn detach(&mut self, index: usize, item: &Item<String>) {
        println!("  detach #{index} {}", item.payload);
    }
}

/// Polls a future that never pends, standing in for the adapter's executor.
fn block_on<F: Future>(fut: F) -> F::Output {
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
            return out;
        }
    }
}

fn main() {
    let options = ControllerOptions::new(GridOptions::new(180.0, 260.0, 12.0))
        .with_overlay_lookup(Some(|id: ItemId| (id.0 % 7 == 0).then_some("watched")));
    let mut c = GridController::new(Mode::Movies, options);
    let mut r = PrintRenderer;

    c.on_resize(800.0, 600.0, 0, &mut r);
    let Some(ticket) = c.request_reload(Mode::Movies, 1) else {
        return;
    };
    let outcome = block_on(fetch(&StaticCatalog, ticket));
    if let Err(err) = c.complete_reload(outcome, &mut r) {
        println!("reload failed: {err}");
        return;
    }
    c.loading_transition_finished();

    println!("first frame:");
    c.tick(0, &mut r);
    println!("visible_range={:?}", c.visible_range());

    println!("wheel down:");
    c.on_wheel(-120.0, 16);
    let mut now = 16;
    while let Some(pos) = c.tick(now, &mut r) {
        println!("  position={pos:.3}");
        now += 16;
    }

    println!("narrow window:");
    c.on_resize(400.0, 600.0, now, &mut r);
    println!("columns={} visible_range={:?}", c.layout().columns(), c.visible_range());

    println!("page controls: {:?}", c.paginator().controls());
    if let Some(ticket) = c.select_page(9) {
        let outcome = block_on(fetch(&StaticCatalog, ticket));
        println!("page 9: {:?}", c.complete_reload(outcome, &mut r).err());
    } else {
        println!("page 9 is not selectable");
    }
}
