mod rate_limit;

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use admissions_assistant::AdmissionsAssistant;
use admissions_core::ChatInput;
use admissions_observability::{AppMetrics, MetricsSnapshot};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

pub use crate::rate_limit::IpRateLimiter;

const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;
const DEFAULT_BIND: &str = "0.0.0.0:5000";
const DEFAULT_STATIC_ROOT: &str = "static";
const DEFAULT_RATE_LIMIT_WINDOW_SECONDS: u64 = 60;
const DEFAULT_RATE_LIMIT_MAX: usize = 60;
const WELCOME_TEXT: &str = "Welcome! Go to /chatbot to chat with Strathmore AI Assistant 🎓";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub static_root: PathBuf,
    pub allowed_origins: Vec<String>,
    pub rate_limit_window: Duration,
    pub rate_limit_max: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 5000)),
            static_root: PathBuf::from(DEFAULT_STATIC_ROOT),
            allowed_origins: default_allowed_origins(),
            rate_limit_window: Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECONDS),
            rate_limit_max: DEFAULT_RATE_LIMIT_MAX,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let bind = env::var("ADMISSIONS_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("ADMISSIONS_BIND is not a socket address: {bind}"))?;

        let static_root = env::var("ADMISSIONS_STATIC_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_ROOT));

        let allowed_origins = env::var("ADMISSIONS_ALLOWED_ORIGINS")
            .ok()
            .map(|value| parse_origins(&value))
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(default_allowed_origins);

        let rate_limit_window = Duration::from_secs(
            env::var("ADMISSIONS_RATE_LIMIT_WINDOW_SECONDS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECONDS),
        );
        let rate_limit_max = env::var("ADMISSIONS_RATE_LIMIT_MAX")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_MAX);

        Ok(Self {
            bind,
            static_root,
            allowed_origins,
            rate_limit_window,
            rate_limit_max,
        })
    }

    pub fn with_static_root(mut self, static_root: impl Into<PathBuf>) -> Self {
        self.static_root = static_root.into();
        self
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub assistant: Arc<AdmissionsAssistant>,
    pub metrics: Arc<AppMetrics>,
    pub limiter: IpRateLimiter,
    pub allowed_origins: Arc<Vec<String>>,
    pub chat_page: PathBuf,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    catalog_size: usize,
    metrics: MetricsSnapshot,
}

pub fn build_app(config: &ApiConfig) -> Router {
    let metrics = AppMetrics::shared();
    let assistant = Arc::new(AdmissionsAssistant::new(metrics.clone()));

    let index = config.static_root.join("index.html");
    if !index.is_file() {
        tracing::warn!(path = %index.display(), "chat UI not found, /chatbot will return 404");
    }

    let state = ApiState {
        assistant,
        metrics,
        limiter: IpRateLimiter::new(config.rate_limit_window, config.rate_limit_max),
        allowed_origins: Arc::new(config.allowed_origins.clone()),
        chat_page: index,
    };

    build_router(state)
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/favicon.ico", get(favicon))
        .route_service("/chatbot", ServeFile::new(&state.chat_page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

async fn home() -> &'static str {
    WELCOME_TEXT
}

async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        catalog_size: state.assistant.catalog().len(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn chat(
    State(state): State<ApiState>,
    payload: Result<Json<ChatInput>, JsonRejection>,
) -> Response {
    // Malformed JSON is answered like an empty message; body read failures
    // such as the size limit keep their own status.
    let input = match payload {
        Ok(Json(input)) => input,
        Err(
            rejection @ (JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_)),
        ) => {
            tracing::debug!(error = %rejection.body_text(), "chat body not readable as a message");
            ChatInput::default()
        }
        Err(rejection) => {
            tracing::warn!(status = %rejection.status(), error = %rejection.body_text(), "chat body rejected");
            return rejection.into_response();
        }
    };

    let reply = state.assistant.handle_chat(input);
    (StatusCode::OK, Json(reply)).into_response()
}

fn default_allowed_origins() -> Vec<String> {
    parse_origins("http://localhost:5000,http://127.0.0.1:5000")
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let ip = request_ip(&request);
    if !state.limiter.allow(&ip) {
        tracing::warn!(ip = %ip, "chat rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "rate_limited",
                "message": "rate limit exceeded for this IP"
            })),
        )
            .into_response();
    }

    next.run(request).await
}

fn is_public_endpoint(path: &str) -> bool {
    matches!(path, "/" | "/health" | "/chatbot" | "/favicon.ico")
}

fn request_ip(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .split(',')
                .next()
                .unwrap_or("unknown")
                .trim()
                .to_string()
        })
        .unwrap_or_else(|| "local".to_string())
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(
            "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; frame-ancestors 'none'; base-uri 'none'",
        ),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::{is_public_endpoint, parse_origins, request_ip};
    use axum::body::Body;
    use axum::http::Request;

    #[test]
    fn forwarded_for_uses_first_hop() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_ip(&request), "203.0.113.7");

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(request_ip(&request), "local");
    }

    #[test]
    fn origins_are_trimmed() {
        assert_eq!(
            parse_origins(" https://admissions.example/ ,,http://localhost:5000"),
            vec!["https://admissions.example", "http://localhost:5000"]
        );
    }

    #[test]
    fn only_chat_is_rate_limited() {
        assert!(is_public_endpoint("/health"));
        assert!(!is_public_endpoint("/chat"));
    }
}
