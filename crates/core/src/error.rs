use chrono::NaiveDate;

/// Every way a planning operation can fail.
///
/// Store operations return these synchronously and never leave the input
/// state half-updated: the caller keeps its previous value on `Err`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// End before start, or longer than `MAX_TRIP_DAYS`.
    #[error(
        "invalid date range {start}..{end}: end must not precede start and a trip spans at most {} days",
        crate::time::MAX_TRIP_DAYS
    )]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid amount: {amount} (must be a finite number >= 0)")]
    InvalidAmount { amount: f64 },

    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Persisted blob could not be decoded. `load_all` recovers from this by
    /// substituting an empty collection.
    #[error("malformed saved itineraries: {0}")]
    MalformedStorage(String),

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("saved itinerary id already exists: {0}")]
    DuplicateId(String),

    #[error("unknown destination id: {0}")]
    UnknownDestination(String),
}

impl PlanError {
    pub(crate) fn day_index(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            what: "day",
            index,
            len,
        }
    }

    pub(crate) fn destination_index(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            what: "destination",
            index,
            len,
        }
    }

    /// Folds an anyhow chain from a storage backend into a single variant.
    pub(crate) fn persistence(err: &anyhow::Error) -> Self {
        Self::Persistence(format!("{err:#}"))
    }
}

pub(crate) fn validate_amount(amount: f64) -> Result<f64, PlanError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(PlanError::InvalidAmount { amount })
    }
}
