#![allow(dead_code)]

//! A stand-in for the REST Countries `/name/{query}` endpoint.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

#[derive(Clone)]
struct MockState {
    replies: Arc<HashMap<String, Reply>>,
    hits: Arc<Mutex<Vec<String>>>,
}

pub struct MockApi {
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
    server: JoinHandle<()>,
}

impl MockApi {
    /// Start the mock on an ephemeral port with the canned replies below.
    pub async fn start() -> Self {
        let replies = canned_replies();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            replies: Arc::new(replies),
            hits: hits.clone(),
        };

        let app = Router::new()
            .route("/name/:query", get(lookup))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock API should bind");
        let addr = listener.local_addr().expect("bound address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock API serve");
        });

        Self {
            base_url: format!("http://{}/name/", addr),
            hits,
            server,
        }
    }

    /// Every request seen so far, as `/name/{query}?{raw query}`.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.lock().unwrap().len()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn lookup(
    State(state): State<MockState>,
    Path(query): Path<String>,
    RawQuery(raw): RawQuery,
) -> Response {
    let seen = match raw {
        Some(q) => format!("/name/{}?{}", query, q),
        None => format!("/name/{}", query),
    };
    state.hits.lock().unwrap().push(seen);

    let reply = state
        .replies
        .get(&query)
        .cloned()
        .unwrap_or_else(not_found);
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

pub fn country(name: &str) -> Value {
    json!({
        "name": {"common": name, "official": format!("Republic of {}", name)},
        "capital": [format!("{} City", name)],
        "population": 1000,
        "flags": {"png": format!("https://flags.example/{}.png", name), "svg": ""},
        "languages": {"eng": "English"}
    })
}

fn countries(prefix: &str, n: usize) -> Value {
    Value::Array((1..=n).map(|i| country(&format!("{} {}", prefix, i))).collect())
}

fn ok(body: Value) -> Reply {
    Reply {
        status: StatusCode::OK,
        body: body.to_string(),
        delay: None,
    }
}

fn not_found() -> Reply {
    Reply {
        status: StatusCode::NOT_FOUND,
        body: json!({"status": 404, "message": "Not Found"}).to_string(),
        delay: None,
    }
}

fn canned_replies() -> HashMap<String, Reply> {
    let mut replies = HashMap::new();
    replies.insert("fra".to_string(), ok(json!([country("France")])));
    replies.insert("united".to_string(), ok(countries("United", 3)));
    replies.insert("ten".to_string(), ok(countries("Ten", 10)));
    replies.insert("land".to_string(), ok(countries("Land", 11)));
    replies.insert("south africa".to_string(), ok(json!([country("South Africa")])));
    replies.insert("zzz".to_string(), not_found());
    replies.insert(
        "boom".to_string(),
        Reply {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({"status": 500, "message": "X"}).to_string(),
            delay: None,
        },
    );
    replies.insert(
        "teapot".to_string(),
        Reply {
            status: StatusCode::IM_A_TEAPOT,
            body: "short and stout".to_string(),
            delay: None,
        },
    );
    replies.insert(
        "slow".to_string(),
        Reply {
            delay: Some(Duration::from_millis(400)),
            ..ok(json!([country("Slowland")]))
        },
    );
    replies.insert("fast".to_string(), ok(json!([country("Fastland")])));
    replies
}
