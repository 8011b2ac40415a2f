//! Terminal implementations of the controller's UI boundary.
//!
//! The controller calls these from its own tasks, so nothing here touches the
//! terminal directly: region writes and notices are posted to the App's
//! message channel and applied on the next loop turn.

use country_proto::config::{DEFAULT_DETAIL_SELECTOR, DEFAULT_INPUT_SELECTOR, DEFAULT_LIST_SELECTOR};
use country_proto::{InputEvents, LogNotifier, NoticeKind, Notifier, Surface};
use tokio::sync::{broadcast, mpsc};
use tracing::warn;

use crate::app::AppMessage;

/// Which output pane a region selector maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    List,
    Detail,
}

pub struct TuiSurface {
    input: broadcast::Sender<String>,
    tx: mpsc::Sender<AppMessage>,
}

impl TuiSurface {
    pub fn new(input: broadcast::Sender<String>, tx: mpsc::Sender<AppMessage>) -> Self {
        Self { input, tx }
    }

    fn region(selector: &str) -> Option<Region> {
        match selector {
            DEFAULT_LIST_SELECTOR => Some(Region::List),
            DEFAULT_DETAIL_SELECTOR => Some(Region::Detail),
            _ => None,
        }
    }
}

impl Surface for TuiSurface {
    fn subscribe_input(&self, selector: &str) -> Option<InputEvents> {
        (selector == DEFAULT_INPUT_SELECTOR).then(|| self.input.subscribe())
    }

    fn write_region(&self, selector: &str, content: String) {
        let Some(region) = Self::region(selector) else {
            warn!("no pane for region {}", selector);
            return;
        };
        if let Err(e) = self.tx.try_send(AppMessage::Region(region, content)) {
            warn!("dropping {:?} update: {}", region, e);
        }
    }
}

/// Shows notices as toasts, and keeps a copy in the log.
pub struct ToastNotifier {
    tx: mpsc::Sender<AppMessage>,
}

impl ToastNotifier {
    pub fn new(tx: mpsc::Sender<AppMessage>) -> Self {
        Self { tx }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        LogNotifier.notify(kind, message);
        if let Err(e) = self
            .tx
            .try_send(AppMessage::Notice(kind, message.to_string()))
        {
            warn!("dropping notice: {}", e);
        }
    }
}
