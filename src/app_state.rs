//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, RwLock};

use crate::{Error, dashboard::DatedAmount, timezone::get_local_offset};

/// The record list shared between the loader and the page handlers.
///
/// `None` means the list has not been loaded (yet). It stays `None` if the
/// fetch fails.
pub type SharedRecords = Arc<RwLock<Option<Vec<DatedAmount>>>>;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The records fetched from the backend.
    pub records: SharedRecords,
}

impl AppState {
    /// Create a new [AppState] with no records loaded.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            records: Arc::new(RwLock::new(None)),
        })
    }
}
