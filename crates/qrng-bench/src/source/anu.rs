//! ANU Quantum Random Numbers API client.
//!
//! One `GET {url}?length=<bytes>&type=uint8` per call. The legacy JSON API
//! answers with
//!
//! ```json
//! {"type": "uint8", "length": 2, "data": [255, 0], "success": true}
//! ```
//!
//! and caps `length` at 1024 values per request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::BitGenerator;
use crate::bits::{BitString, bytes_for_bits};
use crate::error::{GeneratorError, GeneratorResult};

pub const NAME: &str = "Remote ANU API";

/// Public ANU endpoint.
pub const ANU_URL: &str = "https://qrng.anu.edu.au/API/jsonI.php";

/// Request timeout used by [`AnuSource::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Most `uint8` values the API returns per request.
pub const MAX_BYTES_PER_REQUEST: usize = 1024;

#[derive(Debug, Deserialize)]
struct AnuResponse {
    data: Vec<u8>,
    #[serde(default)]
    success: Option<bool>,
}

/// Remote quantum generator backed by the ANU API. No retries.
pub struct AnuSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl std::fmt::Debug for AnuSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnuSource")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl AnuSource {
    /// Client for the public endpoint with the default timeout.
    pub fn new() -> GeneratorResult<Self> {
        Self::with_endpoint(ANU_URL, DEFAULT_TIMEOUT)
    }

    /// Client for a custom endpoint (useful for testing).
    pub fn with_endpoint(url: impl Into<String>, timeout: Duration) -> GeneratorResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn transport_error(&self, err: reqwest::Error) -> GeneratorError {
        if err.is_timeout() {
            GeneratorError::Timeout(self.timeout)
        } else {
            GeneratorError::Request(err)
        }
    }

    /// Fetch `num_bytes` unsigned bytes.
    #[instrument(skip(self))]
    async fn fetch_bytes(&self, num_bytes: usize) -> GeneratorResult<Vec<u8>> {
        let length = num_bytes.to_string();
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[("length", length.as_str()), ("type", "uint8")])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        let parsed: AnuResponse = serde_json::from_slice(&body)
            .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;

        if parsed.success == Some(false) {
            return Err(GeneratorError::ApiReportedFailure);
        }
        debug!("received {} bytes", parsed.data.len());
        Ok(parsed.data)
    }
}

#[async_trait]
impl BitGenerator for AnuSource {
    fn name(&self) -> &str {
        NAME
    }

    #[instrument(skip(self), fields(source = NAME))]
    async fn generate_bits(&self, num_bits: usize) -> GeneratorResult<BitString> {
        let num_bytes = bytes_for_bits(num_bits);
        if num_bytes > MAX_BYTES_PER_REQUEST {
            return Err(GeneratorError::TooManyBits {
                requested: num_bits,
                limit: MAX_BYTES_PER_REQUEST * 8 - 1,
            });
        }

        let data = self.fetch_bytes(num_bytes).await?;
        BitString::from_bytes(&data, num_bits).ok_or(GeneratorError::ShortResponse {
            expected: num_bytes,
            got: data.len(),
        })
    }
}
