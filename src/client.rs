use std::env;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{AskRequest, AskResponse, NewsResponse};

/// Base URL used when neither an explicit URL nor `FINSIGHT_BASE_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

/// Environment variable consulted for the backend base URL.
pub const BASE_URL_ENV: &str = "FINSIGHT_BASE_URL";

const ASK_QUESTION_PATH: &str = "ask-question";
const GET_NEWS_PATH: &str = "get_news";

/// Client for the assistant backend.
///
/// No timeout is applied unless one is configured; a hung request stays
/// pending until the backend answers or the connection drops.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Option<Duration>,
}

impl AssistantClient {
    /// Create a new client.
    ///
    /// The base URL is read from the FINSIGHT_BASE_URL environment variable,
    /// falling back to [`DEFAULT_BASE_URL`].
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = normalize_base_url(&base_url)?;

        let mut builder = ReqwestClient::builder().default_headers(default_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Ask the backend a question.
    ///
    /// The body is decoded whatever the HTTP status: the backend reports
    /// rejected questions as `{"error": ...}` with a 400.
    pub async fn ask_question(&self, query: &str) -> Result<AskResponse> {
        let url = self.endpoint(ASK_QUESTION_PATH)?;
        tracing::debug!(%url, query_len = query.len(), "asking question");
        let request = self.client.post(url).json(&AskRequest::new(query));
        self.execute(request, |response: &AskResponse| {
            response.answer.is_some() || response.error.is_some()
        })
        .await
    }

    /// Fetch the current headlines.
    ///
    /// The body is decoded whatever the HTTP status: the backend reports
    /// "no news" as `{"error": ...}` with a 400.
    pub async fn get_news(&self) -> Result<NewsResponse> {
        let url = self.endpoint(GET_NEWS_PATH)?;
        tracing::debug!(%url, "fetching news");
        self.execute(self.client.get(url), |_: &NewsResponse| true)
            .await
    }

    /// Send a request and decode its JSON body.
    ///
    /// A body that decodes and satisfies `meaningful` is returned even on a
    /// non-success status.  Otherwise a non-success status becomes an error
    /// for that status, and a success status with an undecodable body becomes
    /// a serialization error.
    async fn execute<T, F>(&self, request: RequestBuilder, meaningful: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.execute_inner(request, meaningful).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if let Err(err) = &result {
            CLIENT_REQUEST_ERRORS.click();
            tracing::warn!(error = %err, "backend request failed");
        }
        result
    }

    async fn execute_inner<T, F>(&self, request: RequestBuilder, meaningful: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::http_client(
                format!("Failed to read response: {}", e),
                Some(Box::new(e)),
            )
        })?;

        match serde_json::from_str::<T>(&body) {
            Ok(value) if status.is_success() || meaningful(&value) => Ok(value),
            _ if !status.is_success() => Err(error_for_status(status, &body)),
            Ok(value) => Ok(value),
            Err(e) => Err(Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )),
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                self.timeout.map(|t| t.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }
}

/// Create and return default headers for backend requests.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Parse a base URL, making sure its path ends in `/` so endpoints are
/// appended rather than substituted for the last segment.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(Error::url(format!("not a base URL: {raw}"), None));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Map a non-success status without a usable body to an error.
fn error_for_status(status: StatusCode, body: &str) -> Error {
    let body = body.trim();
    let message = if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    } else {
        body.to_string()
    };
    match status.as_u16() {
        400 => Error::bad_request(message),
        408 | 504 => Error::timeout(message, None),
        code => Error::api(code, message),
    }
}
