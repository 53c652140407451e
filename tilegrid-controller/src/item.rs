/// Identifier of an item, unique within one result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub i64);

/// One entry of a result set.
///
/// `payload` is whatever the renderer needs to draw the expensive part of a tile (typically an
/// image URL). The controller never looks inside it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<P> {
    pub id: ItemId,
    pub payload: P,
}

impl<P> Item<P> {
    pub fn new(id: i64, payload: P) -> Self {
        Self {
            id: ItemId(id),
            payload,
        }
    }
}

/// A fetched page: the items to show plus the page count of the whole result set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogPage<P> {
    pub items: Vec<Item<P>>,
    pub total_pages: u32,
}
