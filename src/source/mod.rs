//! Record model and the remote data source the view reads from.
//!
//! [`RecordSource`] is the seam between the view and the network; the binary
//! plugs in [`HttpSource`], tests plug in scripted sources.
use std::time::Duration;

use serde::Deserialize;

use crate::error::FetchError;

/// Endpoint used when no `--url` is given.
pub const DEFAULT_URL: &str = "https://jsonplaceholder.typicode.com/users";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Address {
    pub city: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Company {
    pub name: String,
}

/// One user entity as returned by the endpoint. Extra JSON fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

/// Something that can fetch the full record collection in one call.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError>;

    /// Human-readable location, shown in the header bar.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Plain `GET` against a fixed URL: no auth, no extra headers, no query.
#[derive(Debug, Clone)]
pub struct HttpSource {
    settings: HttpSettings,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(settings: HttpSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::transport(err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl RecordSource for HttpSource {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        tracing::debug!(url = %self.settings.url, "requesting records");
        let response = self
            .client
            .get(&self.settings.url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.settings.url, status = status.as_u16(), "non-success status");
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Vec<Record>>()
            .await
            .map_err(map_reqwest_error)
    }

    fn describe(&self) -> String {
        self.settings.url.clone()
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::transport("timeout");
    }
    if err.is_decode() {
        return FetchError::decode(err.to_string());
    }
    FetchError::transport(err.to_string())
}
