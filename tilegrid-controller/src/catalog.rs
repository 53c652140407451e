use std::error::Error;
use std::future::Future;

use crate::CatalogPage;

pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// The data source behind a grid view.
///
/// `M` is the query mode (category, filter set, sort order...) and pages are 1-based.
/// Implementations run off the UI thread; results come back through [`fetch`] as a
/// [`ReloadOutcome`] for [`crate::GridController::complete_reload`].
pub trait Catalog<M, P> {
    type Error: Error + Send + Sync + 'static;

    fn fetch_page(
        &self,
        mode: &M,
        page: u32,
    ) -> impl Future<Output = Result<CatalogPage<P>, Self::Error>> + Send;
}

/// Permission to run one reload, handed out by the controller's reload guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReloadTicket<M> {
    generation: u64,
    pub mode: M,
    pub page: u32,
}

impl<M> ReloadTicket<M> {
    pub(crate) fn new(generation: u64, mode: M, page: u32) -> Self {
        Self {
            generation,
            mode,
            page,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A finished fetch, ready to be marshalled back to the UI loop.
#[derive(Debug)]
pub struct ReloadOutcome<M, P> {
    pub ticket: ReloadTicket<M>,
    pub result: Result<CatalogPage<P>, BoxError>,
}

impl<M, P> ReloadOutcome<M, P> {
    pub fn new(ticket: ReloadTicket<M>, result: Result<CatalogPage<P>, BoxError>) -> Self {
        Self { ticket, result }
    }
}

/// Runs the fetch a ticket stands for.
///
/// Never touches controller state, so it can run on any executor.
pub async fn fetch<C, M, P>(catalog: &C, ticket: ReloadTicket<M>) -> ReloadOutcome<M, P>
where
    C: Catalog<M, P> + ?Sized,
{
    let result = catalog
        .fetch_page(&ticket.mode, ticket.page)
        .await
        .map_err(|e| Box::new(e) as BoxError);
    ReloadOutcome { ticket, result }
}
