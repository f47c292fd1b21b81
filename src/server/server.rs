use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use super::http_layers::{http_cache, log_requests};
#[cfg(feature = "slowdown")]
use super::http_layers::slowdown_request;
use super::metrics::{self, metrics_handler};
use super::session::DashboardSession;
use super::state::{GuardedAnalysisService, GuardedSessionStore, ServerState};
use super::ServerConfig;
use crate::analysis::{AnalysisError, AnalyzeRequest, VideoRecord};
use crate::dashboard::DashboardView;
use crate::session::{SessionError, SessionStore};
use crate::video_metrics::VideoMetrics;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub analysis_service: String,
    pub active_sessions: usize,
}

#[derive(Serialize, Debug)]
struct ErrorBody {
    pub message: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
        .into_response()
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

fn analysis_outcome(err: &AnalysisError) -> &'static str {
    match err {
        AnalysisError::Connection(_) => "connection_error",
        AnalysisError::Timeout => "timeout",
        AnalysisError::Api { .. } => "api_error",
        AnalysisError::InvalidResponse(_) => "invalid_response",
    }
}

async fn home(State(state): State<ServerState>) -> Response {
    let active_sessions = match state.sessions.len() {
        Ok(count) => count,
        Err(err) => {
            error!("Could not count sessions: {}", err);
            metrics::record_error("session_store", "/");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        analysis_service: state.analysis_service.base_url().to_owned(),
        active_sessions,
    };
    Json(stats).into_response()
}

fn refresh_active_sessions(sessions: &SessionStore) {
    match sessions.len() {
        Ok(count) => metrics::set_active_sessions(count),
        Err(err) => warn!("Could not count sessions: {}", err),
    }
}

async fn post_analysis(
    session: DashboardSession,
    State(state): State<ServerState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    if let Err(reason) = request.validate() {
        return error_response(StatusCode::BAD_REQUEST, reason);
    }

    // Dropping `in_flight` (failure or a cancelled request) releases the session.
    let in_flight = match state.sessions.start(&session.token) {
        Ok(in_flight) => in_flight,
        Err(SessionError::AlreadyInFlight) => {
            return (
                session.response_headers(),
                error_response(
                    StatusCode::CONFLICT,
                    SessionError::AlreadyInFlight.to_string(),
                ),
            )
                .into_response();
        }
        Err(err) => {
            error!("Could not start analysis: {}", err);
            metrics::record_error("session_store", "/v1/analysis");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    refresh_active_sessions(&state.sessions);

    info!(
        content_type = ?request.content_type,
        region_code = %request.region_code,
        "Starting analysis"
    );
    let start = Instant::now();
    let result = state.analysis_service.analyze(&request).await;
    let elapsed = start.elapsed();

    let payload = match result {
        Ok(payload) => payload,
        Err(err) => {
            warn!("Analysis failed after {}ms: {}", elapsed.as_millis(), err);
            metrics::record_analysis(analysis_outcome(&err), elapsed);
            metrics::record_error("upstream", "/v1/analysis");
            drop(in_flight);
            refresh_active_sessions(&state.sessions);
            return (
                session.response_headers(),
                error_response(StatusCode::BAD_GATEWAY, err.to_string()),
            )
                .into_response();
        }
    };
    metrics::record_analysis("success", elapsed);
    info!(
        "Analysis completed in {}ms with {} analyzed videos",
        elapsed.as_millis(),
        payload.analyzed_videos().len()
    );

    let stored = match in_flight.complete(request, payload) {
        Ok(stored) => stored,
        Err(err) => {
            error!("Could not store analysis: {}", err);
            metrics::record_error("session_store", "/v1/analysis");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let view = DashboardView::build(&stored.payload, &mut rand::rng());
    (session.response_headers(), Json(view)).into_response()
}

async fn get_analysis(
    session: DashboardSession,
    State(sessions): State<GuardedSessionStore>,
) -> Response {
    match sessions.last_analysis(&session.token) {
        Ok(Some(stored)) => {
            let view = DashboardView::build(&stored.payload, &mut rand::rng());
            Json(view).into_response()
        }
        Ok(None) => error_response(StatusCode::NOT_FOUND, "No analysis for this session"),
        Err(err) => {
            error!("Could not read analysis: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_raw_analysis(
    session: DashboardSession,
    State(sessions): State<GuardedSessionStore>,
) -> Response {
    match sessions.last_analysis(&session.token) {
        Ok(Some(stored)) => Json(stored).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "No analysis for this session"),
        Err(err) => {
            error!("Could not read analysis: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn post_video_metrics(Json(record): Json<VideoRecord>) -> Response {
    match record.statistics.as_ref() {
        Some(stats) => Json(VideoMetrics::derive(stats, &mut rand::rng())).into_response(),
        None => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Video {} has no statistics", record.video_id),
        ),
    }
}

impl ServerState {
    fn new(
        config: ServerConfig,
        analysis_service: GuardedAnalysisService,
        sessions: GuardedSessionStore,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            sessions,
            analysis_service,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    analysis_service: GuardedAnalysisService,
    sessions: GuardedSessionStore,
) -> Result<Router> {
    let state = ServerState::new(config.clone(), analysis_service, sessions);

    let analysis_routes: Router = Router::new()
        .route("/", post(post_analysis))
        .route("/", get(get_analysis))
        .route("/raw", get(get_raw_analysis))
        .with_state(state.clone());

    let metrics_routes: Router = Router::new()
        .route("/video", post(post_video_metrics))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ));

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/v1/analysis", analysis_routes)
        .nest("/v1/metrics", metrics_routes);

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(
    config: ServerConfig,
    analysis_service: GuardedAnalysisService,
) -> Result<()> {
    let sessions = Arc::new(SessionStore::new());
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, analysis_service, sessions)?;

    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;
    info!("Serving metrics on port {}", metrics_port);
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server stopped: {}", err);
        }
    });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
