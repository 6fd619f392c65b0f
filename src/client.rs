//! openFDA API client.
//!
//! Low-level HTTP client that handles transport, timeouts, and bounded
//! retry. The paginated search operation is implemented via the `List`
//! trait on the clearance model.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FdaError, Result};

const DEFAULT_API_URL: &str = "https://api.fda.gov";
const USER_AGENT: &str = concat!(
    "fda510k/",
    env!("CARGO_PKG_VERSION"),
    " (+https://api.fda.gov)"
);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;
/// Backoff starts here and doubles per attempt, capped at [`MAX_BACKOFF`].
const INITIAL_BACKOFF: Duration = Duration::from_millis(200);
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Low-level openFDA API client.
///
/// Holds the base URL, an optional API key, and the retry policy for
/// transient failures. Search operations are implemented via the
/// `List` trait on [`DeviceClearance`](crate::DeviceClearance).
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use openfda_510k::FdaClient;
///
/// # fn example() -> openfda_510k::Result<()> {
/// // Create from environment variables
/// let client = FdaClient::from_env()?;
///
/// // Or configure manually
/// let client = FdaClient::new("https://api.fda.gov")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FdaClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: Option<String>,
}

impl std::fmt::Debug for FdaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FdaClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl FdaClient {
    /// Create a client from environment variables.
    ///
    /// Uses `OPENFDA_API_URL` for the base URL (defaults to
    /// `https://api.fda.gov`) and `OPENFDA_API_KEY` for an optional API
    /// key. openFDA works without a key at a lower rate limit.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENFDA_API_URL` is set to an invalid URL.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("OPENFDA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = env::var("OPENFDA_API_KEY").ok().filter(|k| !k.is_empty());

        Self::with_api_key(&base_url, api_key)
    }

    /// Create a new client for the given base URL without an API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_api_key(base_url, None)
    }

    /// Create a new client with an optional API key.
    ///
    /// The key is appended to every request as the `api_key` query
    /// parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_api_key(base_url: &str, api_key: Option<String>) -> Result<Self> {
        // Ensure base URL ends with / so join() keeps the last segment
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FdaError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request with query parameters.
    ///
    /// Transient failures (connect/timeout errors, HTTP 429 and 5xx) are
    /// retried up to [`MAX_RETRIES`] times with exponential backoff; a
    /// 429 honors the `Retry-After` header when it is parseable. Any
    /// other non-success status is terminal.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;
        let mut attempt = 0;

        loop {
            let mut request = self.http.get(url.clone()).query(query);
            if let Some(ref key) = self.api_key {
                request = request.query(&[("api_key", key.as_str())]);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response);
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = Self::retry_after_secs(&response);
                        if attempt < MAX_RETRIES {
                            let delay = retry_after
                                .map(Duration::from_secs)
                                .unwrap_or_else(|| Self::backoff_delay(attempt));
                            tracing::warn!(
                                "rate limited (429), attempt {}/{}, retrying in {:?}",
                                attempt + 1,
                                MAX_RETRIES + 1,
                                delay
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                            continue;
                        }
                        return Err(FdaError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                    }

                    if status.is_server_error() && attempt < MAX_RETRIES {
                        let delay = Self::backoff_delay(attempt);
                        tracing::warn!(
                            "request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            MAX_RETRIES + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(Self::api_error(response, status).await);
                }
                Err(e) => {
                    if (e.is_timeout() || e.is_connect()) && attempt < MAX_RETRIES {
                        let delay = Self::backoff_delay(attempt);
                        tracing::warn!(
                            "connection error, attempt {}/{}, retrying in {:?}",
                            attempt + 1,
                            MAX_RETRIES + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(FdaError::Http(e));
                }
            }
        }
    }

    /// Exponential backoff delay for the given zero-based attempt.
    fn backoff_delay(attempt: u32) -> Duration {
        let delay = INITIAL_BACKOFF * 2u32.saturating_pow(attempt);
        delay.min(MAX_BACKOFF)
    }

    fn retry_after_secs(response: &Response) -> Option<u64> {
        response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }

    /// Convert a terminal non-success response into an error, pulling
    /// the code and message out of the openFDA error envelope when
    /// present.
    async fn api_error(response: Response, status: StatusCode) -> FdaError {
        let body = response.text().await.unwrap_or_default();

        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            return FdaError::Api {
                status: status.as_u16(),
                code: Some(envelope.error.code),
                message: envelope.error.message,
            };
        }

        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        };
        FdaError::Api {
            status: status.as_u16(),
            code: None,
            message,
        }
    }
}

/// openFDA error body: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}
