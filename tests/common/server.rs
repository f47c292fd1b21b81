//! Test server lifecycle management

use axum::{routing::post, Json, Router};
use http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use trends_dashboard::analysis::HttpAnalysisClient;
use trends_dashboard::server::{make_app, RequestsLoggingLevel, ServerConfig};
use trends_dashboard::session::SessionStore;

const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// What the fake analysis service answers to every request.
#[derive(Clone)]
pub enum UpstreamReply {
    /// `200` with the strategy wrapped in the service envelope. The received
    /// request is echoed back under the strategy's `echo_request` key.
    Strategy(Value),
    /// Non-200 status with a `{"message": ...}` body.
    Error(StatusCode, &'static str),
    /// Answers only after the given delay.
    Slow(Duration, Value),
}

async fn serve_upstream(reply: UpstreamReply) -> String {
    let app = Router::new().route(
        "/analyze-shorts",
        post(move |Json(request): Json<Value>| {
            let reply = reply.clone();
            async move {
                let strategy = match reply {
                    UpstreamReply::Error(status, message) => {
                        return (status, Json(json!({ "message": message })));
                    }
                    UpstreamReply::Slow(delay, strategy) => {
                        tokio::time::sleep(delay).await;
                        strategy
                    }
                    UpstreamReply::Strategy(strategy) => strategy,
                };
                let mut strategy = strategy;
                if let Some(map) = strategy.as_object_mut() {
                    map.insert("echo_request".to_string(), request);
                }
                (
                    StatusCode::OK,
                    Json(json!({ "data": { "marketing_strategy": strategy } })),
                )
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream port");
    let port = listener.local_addr().expect("No upstream address").port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Upstream failed");
    });
    format!("http://127.0.0.1:{}", port)
}

/// Dashboard server backed by a fake analysis service.
///
/// When dropped, the dashboard server shuts down.
pub struct TestServer {
    pub base_url: String,
    pub sessions: Arc<SessionStore>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn(reply: UpstreamReply) -> Self {
        Self::spawn_with_timeout(reply, 30).await
    }

    pub async fn spawn_with_timeout(reply: UpstreamReply, analysis_timeout_sec: u64) -> Self {
        let upstream_url = serve_upstream(reply).await;
        let analysis_service = Arc::new(
            HttpAnalysisClient::new(upstream_url, analysis_timeout_sec)
                .expect("Failed to build analysis client"),
        );
        let sessions = Arc::new(SessionStore::new());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, analysis_service, sessions.clone()).expect("Failed to build app");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            sessions,
            _shutdown_tx: Some(shutdown_tx),
        };
        server.wait_for_ready().await;
        server
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Client that keeps the session cookie between requests.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build reqwest client")
    }

    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);
        while start.elapsed() < timeout {
            if let Ok(response) = client.get(self.url("/")).send().await {
                if response.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Server did not become ready within {:?}", timeout);
    }
}
