//! HTTP gateway for A.R.I.S.E.
//!
//! Exposes the conversational endpoints, a health check and the chat web
//! page. All requests share one [`Session`] behind an async mutex, so
//! messages are handled one at a time.
//!
//! Built on Axum.

pub mod api;
pub mod frontend;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, response::Json, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use arise_agent::Session;
use arise_config::{AppConfig, GatewayConfig};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub session: Mutex<Session>,
}

pub type SharedState = Arc<GatewayState>;

impl GatewayState {
    pub fn shared(session: Session) -> SharedState {
        Arc::new(Self {
            session: Mutex::new(session),
        })
    }
}

/// CORS from `allowed_origins`; an empty list allows any origin.
fn cors_layer(config: &GatewayConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// The site at `/` and `/assets/*`: the configured directory, or the
/// embedded chat page.
fn site_router(config: &GatewayConfig) -> Router {
    match &config.static_dir {
        Some(dir) => Router::new()
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .nest_service("/assets", ServeDir::new(dir.join("assets"))),
        None => frontend::frontend_router(),
    }
}

/// Build the full router.
pub fn build_router(state: SharedState, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::api_router(state))
        .merge(site_router(config))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors_layer(config))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Compute the document context, then share the session.
pub async fn prepare(session: Session) -> SharedState {
    let context = session.context().get_context().await;
    info!(chars = context.chars().count(), "Document context ready");
    GatewayState::shared(session)
}

/// Start the gateway HTTP server. The document context is loaded before
/// the listener binds.
pub async fn start(config: &AppConfig, session: Session) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let app = build_router(prepare(session).await, &config.gateway);

    info!(addr = %addr, static_dir = ?config.gateway.static_dir, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arise_agent::{backend_for, build_session};
    use arise_core::error::ProviderError;
    use arise_core::message::Message;
    use arise_core::provider::{Provider, ProviderRequest, ProviderResponse};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use tower::ServiceExt;

    struct CannedProvider {
        replies: std::sync::Mutex<VecDeque<String>>,
    }

    #[async_trait::async_trait]
    impl Provider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            let next = self.replies.lock().unwrap().pop_front();
            match next {
                Some(text) => Ok(ProviderResponse {
                    message: Message::assistant(text),
                    usage: None,
                    model: "canned-model".into(),
                }),
                None => Err(ProviderError::Network("no more replies".into())),
            }
        }
    }

    async fn app_with(replies: &[&str], gateway: GatewayConfig) -> Router {
        let mut config = AppConfig::default();
        config.documents.dir = "/nonexistent/arise-docs".into();
        let provider = Arc::new(CannedProvider {
            replies: std::sync::Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        });
        let session = build_session(&config, backend_for(&config, provider, "canned-model"))
            .await
            .unwrap();
        build_router(GatewayState::shared(session), &gateway)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = app_with(&[], GatewayConfig::default()).await;
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn chat_flow_history_and_reset() {
        let app = app_with(&["A trait defines shared behavior."], GatewayConfig::default()).await;

        let (status, body) = call(&app, "POST", "/chat", Some(json!({"message": "hello"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "greeting_handler");

        let (_, body) = call(&app, "POST", "/chat", Some(json!({"message": "what is a trait"}))).await;
        assert_eq!(body["response"], "A trait defines shared behavior.");
        assert_eq!(body["source"], "model");

        let (_, history) = call(&app, "GET", "/get_history", None).await;
        let turns = history.as_array().unwrap();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0]["speaker"], "user");
        assert_eq!(turns[0]["text"], "hello");
        assert_eq!(turns[3]["speaker"], "assistant");

        let (status, body) = call(&app, "POST", "/new_chat", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "message": "New chat started. A.R.I.S.E is ready!"}));

        let (_, history) = call(&app, "GET", "/get_history", None).await;
        assert_eq!(history, json!([]));
    }

    #[tokio::test]
    async fn blank_message_is_400() {
        let app = app_with(&[], GatewayConfig::default()).await;
        for body in [json!({"message": "   "}), json!({})] {
            let (status, body) = call(&app, "POST", "/chat", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"error": "No message provided", "kind": "empty_input"}));
        }
    }

    #[tokio::test]
    async fn unreadable_chat_body_is_400_with_kind() {
        let app = app_with(&[], GatewayConfig::default()).await;
        let requests = [
            Request::post("/chat").body(Body::from(r#"{"message":"hi"}"#)).unwrap(),
            Request::post("/chat")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        ];
        for req in requests {
            let response = app.clone().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["kind"], "invalid_request");
            assert!(body["error"].as_str().unwrap().starts_with("Invalid request: "));
        }
    }

    #[tokio::test]
    async fn backend_failure_is_500() {
        let app = app_with(&[], GatewayConfig::default()).await;
        let (status, body) = call(&app, "POST", "/chat", Some(json!({"message": "explain closures"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["kind"], "backend_failure");

        let (_, history) = call(&app, "GET", "/get_history", None).await;
        assert_eq!(history, json!([]));
    }

    #[tokio::test]
    async fn summarize_and_suggest_defaults() {
        let app = app_with(&[], GatewayConfig::default()).await;
        let (_, body) = call(&app, "GET", "/summarize", None).await;
        assert_eq!(
            body["summary"],
            "There's nothing to summarize yet, A.R.I.S.E is waiting for your questions."
        );
        let (_, body) = call(&app, "GET", "/suggest_reply", None).await;
        assert_eq!(body["suggestion"], "How can A.R.I.S.E assist you today?");
    }

    #[tokio::test]
    async fn serves_configured_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>portfolio</html>").unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets").join("site.css"), "body{}").unwrap();

        let gateway = GatewayConfig {
            static_dir: Some(dir.path().to_path_buf()),
            ..GatewayConfig::default()
        };
        let app = app_with(&[], gateway).await;

        let req = Request::builder().uri("/assets/site.css").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"body{}");

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let body = app.oneshot(req).await.unwrap().into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<html>portfolio</html>");
    }

    #[tokio::test]
    async fn prepare_loads_context_before_serving() {
        let docs = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("cv.md"), "Vazeer knows Rust.").unwrap();
        let mut config = AppConfig::default();
        config.documents.dir = docs.path().to_path_buf();
        let provider = Arc::new(CannedProvider {
            replies: std::sync::Mutex::new(VecDeque::from(["Skills: Rust".to_string()])),
        });
        let session = build_session(&config, backend_for(&config, provider, "canned-model"))
            .await
            .unwrap();
        assert!(!session.context().is_loaded());

        let state = prepare(session).await;
        let session = state.session.lock().await;
        assert!(session.context().is_loaded());
        assert_eq!(session.context().get_context().await, "Skills: Rust");
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let gateway = GatewayConfig {
            allowed_origins: vec!["https://vazeer.dev".into(), "bad\norigin".into()],
            ..GatewayConfig::default()
        };
        // Building must not panic on the invalid entry.
        let _ = cors_layer(&gateway);
    }
}
