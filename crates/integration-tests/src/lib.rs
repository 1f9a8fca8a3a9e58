//! Integration tests for PawCart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pawcart-integration-tests
//! ```
//!
//! Tests run against [`StubServer`], an axum server bound to an ephemeral
//! port on `127.0.0.1`, so no external network access is needed.
//!
//! # Stub Routes
//!
//! - `GET /image` - `{ "message": "<url>", "status": "success" }`
//! - `GET /image/empty` - `{ "message": "" }`
//! - `GET /image/slow` - answers after [`SLOW_DELAY`]
//! - `GET /missing` - 404
//! - `GET /not-json` - 200 with a plain text body
//! - `POST /echo` - 201 echoing the body back with an `id`
//! - `POST /echo/fail` - 500 with a text body
//! - `POST /echo/fail-empty` - 500 with an empty body
//! - `POST /echo/slow` - answers after [`SLOW_DELAY`]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// Image URL returned by `GET /image`.
pub const STUB_IMAGE_URL: &str = "https://images.dog.ceo/breeds/beagle/n02088364_11136.jpg";

/// Delay of the slow routes; far above the timeouts tests use.
pub const SLOW_DELAY: Duration = Duration::from_secs(5);

/// Bodies received by `POST /echo`.
#[derive(Debug, Clone, Default)]
pub struct EchoLog {
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl EchoLog {
    fn push(&self, body: Value) {
        self.bodies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(body);
    }

    /// Everything received so far, oldest first.
    #[must_use]
    pub fn bodies(&self) -> Vec<Value> {
        self.bodies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A local server answering the routes listed in the crate docs.
pub struct StubServer {
    addr: SocketAddr,
    echo_log: EchoLog,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns error if the listener cannot be bound.
    pub async fn spawn() -> std::io::Result<Self> {
        let echo_log = EchoLog::default();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = routes(echo_log.clone());
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            echo_log,
            handle,
        })
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Absolute URL for `path`, parsed.
    ///
    /// # Errors
    ///
    /// Returns error if `path` does not form a valid URL.
    pub fn parsed_url(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.url(path))
    }

    /// Bodies received by `POST /echo`.
    #[must_use]
    pub const fn echo_log(&self) -> &EchoLog {
        &self.echo_log
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn routes(echo_log: EchoLog) -> Router {
    Router::new()
        .route("/image", get(image))
        .route("/image/empty", get(empty_image))
        .route("/image/slow", get(slow_image))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/not-json", get(|| async { "definitely not json" }))
        .route("/echo", post(echo))
        .route(
            "/echo/fail",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route(
            "/echo/fail-empty",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route("/echo/slow", post(slow_echo))
        .with_state(echo_log)
}

async fn image() -> Json<Value> {
    Json(json!({ "message": STUB_IMAGE_URL, "status": "success" }))
}

async fn empty_image() -> Json<Value> {
    Json(json!({ "message": "", "status": "success" }))
}

async fn slow_image() -> Json<Value> {
    tokio::time::sleep(SLOW_DELAY).await;
    image().await
}

async fn echo(State(log): State<EchoLog>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    log.push(body.clone());

    let mut response = body;
    if let Value::Object(map) = &mut response {
        map.insert("id".to_string(), json!(101));
    }
    (StatusCode::CREATED, Json(response))
}

async fn slow_echo(Json(body): Json<Value>) -> Json<Value> {
    tokio::time::sleep(SLOW_DELAY).await;
    Json(body)
}
