use crate::BoxError;

/// Why a fetched page could not be applied.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// The catalog failed. The previous contents stay on screen and the guard is released.
    #[error("catalog fetch failed: {0}")]
    Fetch(#[source] BoxError),

    #[error("no reload is in flight")]
    NotInFlight,

    /// The outcome belongs to a reload other than the one in flight.
    #[error("reload ticket {got} does not match the in-flight reload {expected}")]
    StaleTicket { expected: u64, got: u64 },
}
