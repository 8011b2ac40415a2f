#![allow(dead_code)]

//! A surface that records everything the controller does to it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use country_proto::{
    CountryRecord, InputEvents, NoticeKind, Notifier, Renderer, SearchController, SearchOptions,
    Surface,
};
use tokio::sync::broadcast;

pub const INPUT: &str = "#search-box";
pub const LIST: &str = ".country-list";
pub const DETAIL: &str = ".country-info";

/// One observable outcome of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Detail(String),
    List(Vec<String>),
    Notice(NoticeKind, String),
}

pub struct Recorder {
    input: Option<broadcast::Sender<String>>,
    subscriptions: AtomicUsize,
    regions: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
    outcomes: Mutex<Vec<Outcome>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        let (tx, _) = broadcast::channel(64);
        Arc::new(Self::with_input(Some(tx)))
    }

    /// A surface with no input field at all.
    pub fn without_input() -> Arc<Self> {
        Arc::new(Self::with_input(None))
    }

    fn with_input(input: Option<broadcast::Sender<String>>) -> Self {
        Self {
            input,
            subscriptions: AtomicUsize::new(0),
            regions: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            outcomes: Mutex::new(Vec::new()),
        }
    }

    /// Simulate the field's value changing to `text`.
    pub fn type_text(&self, text: &str) {
        if let Some(tx) = &self.input {
            let _ = tx.send(text.to_string());
        }
    }

    pub fn subscriptions(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    pub fn region(&self, selector: &str) -> String {
        self.regions
            .lock()
            .unwrap()
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.lock().unwrap().clone()
    }

    pub fn take_outcomes(&self) -> Vec<Outcome> {
        std::mem::take(&mut *self.outcomes.lock().unwrap())
    }

    fn record(&self, outcome: Outcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }
}

impl Surface for Recorder {
    fn subscribe_input(&self, selector: &str) -> Option<InputEvents> {
        if selector != INPUT {
            return None;
        }
        let tx = self.input.as_ref()?;
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        Some(tx.subscribe())
    }

    fn write_region(&self, selector: &str, content: String) {
        self.writes
            .lock()
            .unwrap()
            .push((selector.to_string(), content.clone()));
        self.regions
            .lock()
            .unwrap()
            .insert(selector.to_string(), content);
    }
}

impl Notifier for Recorder {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.record(Outcome::Notice(kind, message.to_string()));
    }
}

impl Renderer for Recorder {
    fn render_detail(&self, record: &CountryRecord) -> String {
        let name = record.common_name().unwrap_or_default().to_string();
        self.record(Outcome::Detail(name.clone()));
        format!("detail:{}", name)
    }

    fn render_list(&self, records: &[CountryRecord]) -> String {
        let names: Vec<String> = records
            .iter()
            .map(|r| r.common_name().unwrap_or_default().to_string())
            .collect();
        self.record(Outcome::List(names.clone()));
        format!("list:{}", names.len())
    }
}

/// A controller wired to `recorder` for every collaborator role.
pub fn controller(base_url: &str, recorder: &Arc<Recorder>, delay_ms: u64) -> SearchController {
    let options = SearchOptions::new()
        .list_limit(10)
        .debounce_delay(Duration::from_millis(delay_ms))
        .notifier(recorder.clone())
        .renderer(recorder.clone());
    SearchController::new(base_url, options, recorder.clone()).expect("valid config")
}

/// Poll `cond` every 10ms until it holds or `timeout` passes.
pub async fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}
