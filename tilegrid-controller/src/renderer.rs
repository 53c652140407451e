use crate::Item;

/// Sink for the expensive part of a tile.
///
/// The controller calls `attach` when a tile scrolls into view and `detach` when it leaves or
/// its data set is replaced. Calls for one index always alternate.
pub trait TileRenderer<P> {
    fn attach(&mut self, index: usize, item: &Item<P>);
    fn detach(&mut self, index: usize, item: &Item<P>);
}

impl<P, R: TileRenderer<P> + ?Sized> TileRenderer<P> for &mut R {
    fn attach(&mut self, index: usize, item: &Item<P>) {
        (**self).attach(index, item);
    }

    fn detach(&mut self, index: usize, item: &Item<P>) {
        (**self).detach(index, item);
    }
}

/// A renderer that draws nothing, for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl<P> TileRenderer<P> for NullRenderer {
    fn attach(&mut self, _index: usize, _item: &Item<P>) {}

    fn detach(&mut self, _index: usize, _item: &Item<P>) {}
}
