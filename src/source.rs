//! Loading the record list from the backend.
//!
//! The list is fetched exactly once, when the server starts. There is no
//! retry: if the fetch fails the dashboard stays empty until the server is
//! restarted.

use reqwest::Client;
use serde::Deserialize;

use crate::{
    Error,
    app_state::SharedRecords,
    dashboard::{DatedAmount, count_invalid_dates},
};

/// The backend URL, taken from the `DATA_URL` environment variable when the
/// crate was built.
pub const BUILD_DATA_URL: Option<&str> = option_env!("DATA_URL");

/// The JSON body returned by the backend.
#[derive(Debug, Deserialize)]
struct RecordListResponse {
    /// A missing or `null` list is treated as "nothing loaded".
    #[serde(default)]
    list: Option<Vec<DatedAmount>>,
}

/// Fetches the record list from a backend URL.
#[derive(Debug, Clone)]
pub struct RecordSource {
    client: Client,
    url: String,
}

impl RecordSource {
    /// Create a source that fetches from `url`.
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_owned(),
        }
    }

    /// Create a source for the backend URL set at build time.
    ///
    /// # Errors
    /// Returns [Error::MissingDataUrl] if `DATA_URL` was not set when the crate was built.
    pub fn from_build_config() -> Result<Self, Error> {
        BUILD_DATA_URL.map(Self::new).ok_or(Error::MissingDataUrl)
    }

    /// The URL the records are fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the record list.
    ///
    /// Returns `Ok(None)` if the response does not contain a list.
    ///
    /// # Errors
    /// Returns [Error::FetchFailed] if the request fails or the backend
    /// responds with an error status, and [Error::InvalidResponse] if the
    /// body is not a valid record list.
    pub async fn fetch_records(&self) -> Result<Option<Vec<DatedAmount>>, Error> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let payload: RecordListResponse = serde_json::from_slice(&body)
            .map_err(|error| Error::InvalidResponse(error.to_string()))?;

        Ok(payload.list)
    }
}

/// Fetch the record list from `source` and store it in `records`.
///
/// Failures are logged and leave `records` untouched.
pub async fn load_records(source: &RecordSource, records: &SharedRecords) {
    tracing::info!("Fetching records from {}", source.url());

    let list = match source.fetch_records().await {
        Ok(Some(list)) => list,
        Ok(None) => {
            tracing::warn!(
                "The response from {} did not contain a record list",
                source.url()
            );
            return;
        }
        Err(error) => {
            tracing::error!("Could not load records: {error}");
            return;
        }
    };

    let record_count = list.len();
    let invalid_count = count_invalid_dates(&list);
    if invalid_count > 0 {
        tracing::warn!(
            "{invalid_count} of {record_count} records have a date that could not be parsed"
        );
    }

    match records.write() {
        Ok(mut records) => {
            *records = Some(list);
            tracing::info!("Loaded {record_count} records");
        }
        Err(error) => tracing::error!("could not acquire the records lock: {error}"),
    }
}
