//! Country lookup core: a debounced search controller over the REST
//! Countries API, response classification, and the renderer / notifier /
//! surface capabilities a front end plugs into.

pub mod classify;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod notify;
pub mod platform;
pub mod record;
pub mod render;
pub mod surface;

pub use classify::{classify, QueryResult};
pub use config::{Config, SearchConfig, SearchOptions};
pub use controller::SearchController;
pub use error::{ApiError, ConfigError};
pub use notify::{LogNotifier, NoticeKind, Notifier};
pub use record::CountryRecord;
pub use render::{DumpRenderer, Renderer};
pub use surface::{InputEvents, Surface};
