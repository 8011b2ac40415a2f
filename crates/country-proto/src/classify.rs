//! Response classification — decides what a decoded API body means.

use serde_json::Value;

use crate::error::ApiError;
use crate::record::CountryRecord;

/// Outcome of one resolved search. Exactly one variant holds per search.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Exactly one match: show its details.
    Single(CountryRecord),
    /// Up to `limit` matches (also the empty array): show them as a list.
    List(Vec<CountryRecord>),
    /// More matches than the list limit allows.
    TooMany { count: usize },
    /// The API's `{status: 404, message: "Not Found"}` answer.
    NotFound,
    /// Any other error-shaped body, or a transport failure.
    Error(ApiError),
}

impl QueryResult {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::List(_) => "list",
            Self::TooMany { .. } => "too-many",
            Self::NotFound => "not-found",
            Self::Error(_) => "error",
        }
    }
}

/// Classify a decoded body against the list limit.
///
/// The not-found check is deliberately narrower than "any error status": only
/// a 404 carrying the exact message `Not Found` counts.
pub fn classify(data: Value, limit: usize) -> QueryResult {
    if is_not_found(&data) {
        return QueryResult::NotFound;
    }
    if data.get("status").is_some_and(is_truthy) {
        return QueryResult::Error(ApiError::from_body(&data));
    }

    match data {
        Value::Array(mut items) => match items.len() {
            1 => QueryResult::Single(CountryRecord::new(items.remove(0))),
            n if n <= limit => {
                QueryResult::List(items.into_iter().map(CountryRecord::new).collect())
            }
            n => QueryResult::TooMany { count: n },
        },
        _ => QueryResult::Error(ApiError::transport("Unexpected response shape")),
    }
}

fn is_not_found(data: &Value) -> bool {
    let status_404 = match data.get("status") {
        Some(Value::Number(n)) => n.as_f64() == Some(404.0),
        Some(Value::String(s)) => s.trim() == "404",
        _ => false,
    };
    status_404 && data.get("message").and_then(Value::as_str) == Some("Not Found")
}

/// Loose truthiness for the `status` field: a non-zero number, a non-empty
/// string, `true`, or any array/object.
pub(crate) fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
