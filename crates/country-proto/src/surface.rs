//! Surface — the UI boundary the controller binds to.
//!
//! A surface owns the input field and the two output regions. Both are
//! addressed by selector strings so the host decides what they map to.

use tokio::sync::broadcast;

/// Stream of text-change events. Each item is the field's full current value.
pub type InputEvents = broadcast::Receiver<String>;

pub trait Surface: Send + Sync {
    /// Subscribe to the input matched by `selector`, or `None` when the
    /// surface has no such input. Every call returns a fresh subscription;
    /// dropping it unsubscribes.
    fn subscribe_input(&self, selector: &str) -> Option<InputEvents>;

    /// Replace the content of the region matched by `selector`.
    /// An empty string clears it.
    fn write_region(&self, selector: &str, content: String);
}
