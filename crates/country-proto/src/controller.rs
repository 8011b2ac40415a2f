//! SearchController — debounced country search bound to a [`Surface`].
//!
//! Flow: input event → debounce timer → GET → [`classify`] → render or notify.
//!
//! Every issued search takes a sequence number. A response that comes back
//! after a newer search was issued is dropped without touching the output, so
//! a slow stale answer can never overwrite a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::classify::{classify, is_truthy, QueryResult};
use crate::config::{SearchConfig, SearchOptions};
use crate::debounce::Debouncer;
use crate::error::{ApiError, ConfigError};
use crate::notify::{LogNotifier, NoticeKind, Notifier};
use crate::render::{DumpRenderer, Renderer};
use crate::surface::Surface;

pub const NOT_FOUND_MESSAGE: &str = "Oops, there is no country with that name";
pub const TOO_MANY_MESSAGE: &str = "Too many matches found. Please enter a more specific name.";

pub struct SearchController {
    shared: Arc<Shared>,
    debouncer: Debouncer,
    delay: Duration,
    listener: Option<JoinHandle<()>>,
}

/// State reachable from the listener and from in-flight searches.
struct Shared {
    config: SearchConfig,
    http: reqwest::Client,
    surface: Arc<dyn Surface>,
    renderer: Arc<dyn Renderer>,
    notifier: Arc<dyn Notifier>,
    /// Sequence number of the most recently issued search.
    issued: AtomicU64,
}

impl SearchController {
    /// Build a controller and bind it to the surface's input.
    ///
    /// Fails only when `base_url` is blank. A surface without an input for
    /// the configured selector is accepted; the controller then never
    /// searches on its own. Must be called from within a tokio runtime.
    pub fn new(
        base_url: &str,
        options: SearchOptions,
        surface: Arc<dyn Surface>,
    ) -> Result<Self, ConfigError> {
        Self::with_client(base_url, options, surface, reqwest::Client::new())
    }

    /// Like [`SearchController::new`] with a caller-built HTTP client.
    pub fn with_client(
        base_url: &str,
        options: SearchOptions,
        surface: Arc<dyn Surface>,
        http: reqwest::Client,
    ) -> Result<Self, ConfigError> {
        let config = SearchConfig::resolve(base_url, &options)?;
        let delay = config.debounce_delay;
        let renderer = options
            .renderer
            .unwrap_or_else(|| Arc::new(DumpRenderer));
        let notifier = options
            .notifier
            .unwrap_or_else(|| Arc::new(LogNotifier));

        info!(
            "search controller: base={} limit={} delay={}ms",
            config.base_url,
            config.list_limit,
            delay.as_millis()
        );

        let mut controller = Self {
            shared: Arc::new(Shared {
                config,
                http,
                surface,
                renderer,
                notifier,
                issued: AtomicU64::new(0),
            }),
            debouncer: Debouncer::new(),
            delay,
            listener: None,
        };
        controller.attach_listener();
        Ok(controller)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.shared.config
    }

    pub fn debounce_delay(&self) -> Duration {
        self.delay
    }

    /// Change the debounce window. An unchanged delay is a no-op; otherwise
    /// the pending timer and the input subscription are dropped and a fresh
    /// listener is attached.
    pub fn set_debounce_delay(&mut self, delay: Duration) {
        if delay == self.delay {
            return;
        }
        debug!(
            "debounce delay {}ms -> {}ms",
            self.delay.as_millis(),
            delay.as_millis()
        );
        self.delay = delay;
        self.attach_listener();
    }

    /// Whether an input listener is attached.
    pub fn is_listening(&self) -> bool {
        self.listener.as_ref().is_some_and(|l| !l.is_finished())
    }

    /// Whether a debounced search is waiting for its window to close.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn notify(&self, kind: NoticeKind, message: &str) {
        self.shared.notify(kind, message);
    }

    /// Empty both output regions.
    pub fn clear_output(&self) {
        self.shared.clear_output();
    }

    /// Run one search now, skipping the debounce window.
    ///
    /// Returns the dispatched result, or `None` when the input was blank or
    /// the response was superseded by a newer search.
    pub async fn search(&self, raw: &str) -> Option<QueryResult> {
        self.shared.search(raw).await
    }

    fn attach_listener(&mut self) {
        self.detach_listener();

        let selector = &self.shared.config.input_selector;
        let Some(mut events) = self.shared.surface.subscribe_input(selector) else {
            debug!("no input matches {}; searches are disabled", selector);
            return;
        };

        let shared = Arc::clone(&self.shared);
        let debouncer = self.debouncer.clone();
        let delay = self.delay;
        self.listener = Some(tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(value) => {
                        let shared = Arc::clone(&shared);
                        debouncer.arm(delay, async move {
                            shared.search(&value).await;
                        });
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("input listener lagged by {} events", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            debug!("input closed; listener exiting");
        }));
    }

    fn detach_listener(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
        self.debouncer.cancel();
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.detach_listener();
    }
}

impl Shared {
    async fn search(&self, raw: &str) -> Option<QueryResult> {
        // Blank input counts as a search too, so late answers can't refill
        // output the user just cleared.
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let query = raw.trim();
        if query.is_empty() {
            self.clear_output();
            return None;
        }

        let url = self.config.query_url(query);
        debug!("search #{}: GET {}", seq, url);

        let result = match self.fetch(&url).await {
            Ok(data) => classify(data, self.config.list_limit),
            Err(e) => QueryResult::Error(e),
        };

        let latest = self.issued.load(Ordering::SeqCst);
        if latest != seq {
            debug!("search #{}: dropped, #{} is newer", seq, latest);
            return None;
        }

        debug!("search #{}: {}", seq, result.label());
        self.dispatch(&result);
        Some(result)
    }

    /// GET and decode. Error-shaped bodies are returned as data so the
    /// classifier can tell not-found from other failures; everything else
    /// that isn't a successful JSON answer becomes an [`ApiError`].
    async fn fetch(&self, url: &str) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(data) if status.is_success() => Ok(data),
            Ok(data) if data.get("status").is_some_and(is_truthy) => Ok(data),
            Ok(data) => {
                let message = data
                    .get("message")
                    .and_then(Value::as_str)
                    .or(status.canonical_reason())
                    .unwrap_or("Request failed");
                Err(ApiError::new(Some(status.as_u16()), message))
            }
            Err(e) if status.is_success() => {
                Err(ApiError::transport(format!("Invalid response body: {}", e)))
            }
            Err(_) => Err(ApiError::new(
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("Request failed"),
            )),
        }
    }

    fn dispatch(&self, result: &QueryResult) {
        self.clear_output();
        match result {
            QueryResult::Single(record) => {
                let content = self.renderer.render_detail(record);
                self.surface
                    .write_region(&self.config.detail_selector, content);
            }
            QueryResult::List(records) => {
                let content = self.renderer.render_list(records);
                self.surface.write_region(&self.config.list_selector, content);
            }
            QueryResult::TooMany { count } => {
                debug!("{} matches over limit {}", count, self.config.list_limit);
                self.notify(NoticeKind::Info, TOO_MANY_MESSAGE);
            }
            QueryResult::NotFound => self.notify(NoticeKind::Failure, NOT_FOUND_MESSAGE),
            QueryResult::Error(e) => self.notify(NoticeKind::Failure, &e.to_string()),
        }
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notifier.notify(kind, message);
    }

    fn clear_output(&self) {
        self.surface
            .write_region(&self.config.detail_selector, String::new());
        self.surface
            .write_region(&self.config.list_selector, String::new());
    }
}
