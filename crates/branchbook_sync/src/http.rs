//! HTTP client abstraction.
//!
//! The remote blob endpoint is a plain GET/POST pair, so the client trait
//! stays minimal. Implement [`HttpClient`] to plug in a different HTTP
//! library or a test double; a reqwest-backed implementation ships behind
//! the `http-client` feature.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

/// A raw HTTP response: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure, before any HTTP status exists.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    /// The device has no network path.
    #[error("offline")]
    Offline,
    /// The request could not complete.
    #[error("connection failed: {0}")]
    Connect(String),
}

/// Minimal HTTP client contract for the sync path.
///
/// Timeouts are not the client's concern; the remote client wraps each
/// call in its own deadline and aborts the future when it expires.
pub trait HttpClient: Send + Sync {
    /// Reports whether a network path is currently available. Checked
    /// before every attempt so offline devices fail fast.
    fn is_online(&self) -> bool {
        true
    }

    /// Sends a GET request.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;

    /// Sends a POST request with a JSON body.
    fn post(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<C: HttpClient> HttpClient for std::sync::Arc<C> {
    fn is_online(&self) -> bool {
        (**self).is_online()
    }

    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).get(url)
    }

    fn post(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).post(url, body)
    }
}

/// A scriptable HTTP client for tests.
///
/// Responses are consumed from per-method queues; an empty queue behaves
/// like an empty remote (GET answers 404, POST answers 200 and records the
/// body).
#[derive(Debug)]
pub struct MockHttpClient {
    online: AtomicBool,
    latency: Mutex<Option<Duration>>,
    get_queue: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    post_queue: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    posts: Mutex<Vec<(String, String)>>,
}

impl MockHttpClient {
    /// Creates an online mock with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self {
            online: AtomicBool::new(true),
            latency: Mutex::new(None),
            get_queue: Mutex::new(VecDeque::new()),
            post_queue: Mutex::new(VecDeque::new()),
            posts: Mutex::new(Vec::new()),
        }
    }

    /// Sets the online flag.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Adds artificial latency before every response.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = Some(latency);
    }

    /// Queues the next GET result.
    pub fn enqueue_get(&self, result: Result<HttpResponse, HttpError>) {
        self.get_queue.lock().push_back(result);
    }

    /// Queues the next POST result.
    pub fn enqueue_post(&self, result: Result<HttpResponse, HttpError>) {
        self.post_queue.lock().push_back(result);
    }

    /// All POSTed `(url, body)` pairs, in order.
    pub fn posted(&self) -> Vec<(String, String)> {
        self.posts.lock().clone()
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for MockHttpClient {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn get(&self, _url: &str) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        async move {
            if !self.is_online() {
                return Err(HttpError::Offline);
            }
            self.simulate_latency().await;
            self.get_queue
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::new(404, "")))
        }
    }

    fn post(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        async move {
            if !self.is_online() {
                return Err(HttpError::Offline);
            }
            self.simulate_latency().await;
            self.posts.lock().push((url.to_string(), body));
            self.post_queue
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::new(200, "")))
        }
    }
}

/// reqwest-backed HTTP client.
#[cfg(feature = "http-client")]
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

#[cfg(feature = "http-client")]
impl ReqwestClient {
    /// Creates a client with reqwest defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, HttpError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Connect(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(feature = "http-client")]
impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        async move {
            let response = self
                .inner
                .get(url)
                .send()
                .await
                .map_err(|e| HttpError::Connect(e.to_string()))?;
            Self::read(response).await
        }
    }

    fn post(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        async move {
            let response = self
                .inner
                .post(url)
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .map_err(|e| HttpError::Connect(e.to_string()))?;
            Self::read(response).await
        }
    }
}
