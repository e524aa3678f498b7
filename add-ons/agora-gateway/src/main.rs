//! Axum-based API gateway: entry point for the Agora campaign backend.
//! Config-driven via CoreConfig.

use agora_agents::build_registry;
use agora_core::{
    error_envelope, ok_envelope, AgentContext, AgentError, AnalyticsEmitter, BotProfile,
    ChatSession, CoreConfig, CredentialStore, Dispatcher, Responder, Role, RowFetcher,
    SimulatedResponder, StaticRows, SystemClock, TracingEmitter,
};
use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[agora-gateway] .env no cargado: {} (usando entorno del sistema)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::load().expect("cargar configuración");

    let rows: Arc<dyn RowFetcher> = Arc::new(StaticRows::demo());
    let registry = build_registry(rows).expect("registro de agentes completo");
    let analytics = Arc::new(TracingEmitter::new());
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(registry),
        Arc::clone(&analytics) as Arc<dyn AnalyticsEmitter>,
        Duration::from_secs(config.handler_timeout_secs),
    ));

    let credentials = Arc::new(CredentialStore::new());
    let (total, valid) = credentials.diagnose();
    tracing::info!(total, valid, "tabla de credenciales demo lista");

    let responder: Arc<dyn Responder> = Arc::new(SimulatedResponder::new(
        Arc::new(SystemClock),
        Duration::from_millis(config.chat_delay_ms),
    ));

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let app = router(AppState {
        dispatcher,
        credentials,
        responder,
    })
    .layer(cors);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, app = %config.app_name, "agora-gateway escuchando");
    axum::serve(
        tokio::net::TcpListener::bind(addr).await.unwrap(),
        app,
    )
    .await
    .unwrap();
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dispatcher: Arc<Dispatcher>,
    pub(crate) credentials: Arc<CredentialStore>,
    pub(crate) responder: Arc<dyn Responder>,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/agent/:role", post(agent_action))
        .route("/api/auth/login", post(login))
        .route("/api/auth/repair", post(repair_credentials))
        .route("/api/auth/credentials", get(list_credentials))
        .route("/api/chat", post(chat))
        .with_state(state)
}

async fn root() -> &'static str {
    "API de Agora corriendo."
}

async fn agent_action(
    State(state): State<AppState>,
    Path(role): Path<String>,
    body: Option<Json<Value>>,
) -> (StatusCode, Json<Value>) {
    let Some(role) = Role::parse(&role) else {
        let err = AgentError::UnknownRole(role);
        return (StatusCode::BAD_REQUEST, Json(error_envelope(&err)));
    };
    let body = body.map(|Json(v)| v).unwrap_or_else(|| json!({}));
    let ctx = AgentContext::default();
    match state.dispatcher.dispatch_value(&ctx, role, &body).await {
        Ok(data) => (StatusCode::OK, Json(ok_envelope(data))),
        Err(e) => (StatusCode::BAD_REQUEST, Json(error_envelope(&e))),
    }
}

#[derive(serde::Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    if !state.credentials.validate(&req.email, &req.password) {
        let err = AgentError::Validation("Credenciales inválidas.".to_string());
        return (StatusCode::UNAUTHORIZED, Json(error_envelope(&err)));
    }
    match state.credentials.credential_by_email(&req.email) {
        Some(cred) => (
            StatusCode::OK,
            Json(ok_envelope(json!({
                "email": cred.email,
                "name": cred.name,
                "role": cred.role,
                "territory": cred.territory,
            }))),
        ),
        None => {
            let err = AgentError::Upstream("credencial no encontrada".to_string());
            (StatusCode::UNAUTHORIZED, Json(error_envelope(&err)))
        }
    }
}

async fn repair_credentials(State(state): State<AppState>) -> Json<Value> {
    let repaired = state.credentials.repair();
    Json(ok_envelope(json!({ "repaired": repaired })))
}

async fn list_credentials(State(state): State<AppState>) -> Json<Value> {
    let credentials = state.credentials.all();
    Json(ok_envelope(json!({ "credentials": &*credentials })))
}

#[derive(serde::Deserialize)]
struct ChatRequest {
    #[serde(default)]
    role: Option<String>,
    message: String,
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<Value>) {
    // Unknown or absent roles fall through to the general persona.
    let role = req.role.as_deref().and_then(Role::parse);
    let profile = BotProfile::for_role(role);
    let mut session = ChatSession::new(profile, role, Arc::clone(&state.responder));
    match session.send(&req.message).await {
        Ok(reply) => {
            let profile = session.profile();
            (
                StatusCode::OK,
                Json(ok_envelope(json!({
                    "reply": reply.text,
                    "bot": {
                        "id": profile.id,
                        "name": profile.name,
                        "title": profile.title,
                    },
                }))),
            )
        }
        Err(e) => (StatusCode::BAD_REQUEST, Json(error_envelope(&e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::{FixedClock, NoopEmitter, RoleAgent};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state(now: &str) -> AppState {
        let rows: Arc<dyn RowFetcher> = Arc::new(StaticRows::demo());
        let registry = build_registry(rows).unwrap();
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::new(registry),
            Arc::new(TracingEmitter::new()),
            Duration::from_secs(2),
        ));
        let responder: Arc<dyn Responder> = Arc::new(SimulatedResponder::new(
            Arc::new(FixedClock(now.to_string())),
            Duration::ZERO,
        ));
        AppState {
            dispatcher,
            credentials: Arc::new(CredentialStore::new()),
            responder,
        }
    }

    fn test_app(now: &str) -> Router {
        router(test_state(now))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap()
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_liveness() {
        let res = test_app("10:00")
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_all_role_action_pairs_return_ok() {
        let pairs: &[(&str, &[&str])] = &[
            ("candidato", &["get_team", "send_message", "get_reports"]),
            ("master", &["manage_users", "run_automation", "get_audit"]),
            ("lider", &["get_network", "send_team_message"]),
            ("publicidad", &["generate_copy", "get_stats"]),
            ("votante", &["get_location", "receive_message"]),
            ("desarrollador", &["system_audit", "get_logs", "admin_tools"]),
        ];
        for (role, actions) in pairs {
            for action in *actions {
                let app = test_app("10:00");
                let res = app
                    .oneshot(post_json(
                        &format!("/api/agent/{role}"),
                        &json!({ "action": action }),
                    ))
                    .await
                    .unwrap();
                assert_eq!(res.status(), StatusCode::OK, "{role}/{action}");
                let body = body_json(res).await;
                assert_eq!(body["status"], "ok", "{role}/{action}: {body}");
            }
        }
    }

    #[tokio::test]
    async fn test_votante_get_location_end_to_end() {
        let res = test_app("10:00")
            .oneshot(post_json(
                "/api/agent/votante",
                &json!({ "action": "get_location" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(
            body,
            json!({ "status": "ok", "location": "Ubicación estándar." })
        );
    }

    #[tokio::test]
    async fn test_unknown_action_for_votante() {
        let res = test_app("10:00")
            .oneshot(post_json(
                "/api/agent/votante",
                &json!({ "action": "unknown_action" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "Acción no reconocida para votante.");
    }

    #[tokio::test]
    async fn test_unknown_role_is_rejected() {
        let res = test_app("10:00")
            .oneshot(post_json("/api/agent/no_such_role", &json!({ "action": "x" })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "Rol no reconocido: no_such_role.");
    }

    #[tokio::test]
    async fn test_missing_action_is_a_validation_error() {
        let res = test_app("10:00")
            .oneshot(post_json("/api/agent/votante", &json!({})))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "Falta el campo 'action' en la solicitud.");
    }

    #[tokio::test]
    async fn test_user_config_override_and_falsy_fallback() {
        // Empty array override: the default team from the backing table wins.
        let res = test_app("10:00")
            .oneshot(post_json(
                "/api/agent/candidato",
                &json!({ "action": "get_team", "userConfig": { "team": [] } }),
            ))
            .await
            .unwrap();
        let body = body_json(res).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["team"].as_array().unwrap().len(), 2);

        // Non-empty override wins.
        let res = test_app("10:00")
            .oneshot(post_json(
                "/api/agent/candidato",
                &json!({
                    "action": "get_team",
                    "userConfig": { "team": [{ "id": 9, "name": "Equipo propio" }] }
                }),
            ))
            .await
            .unwrap();
        let body = body_json(res).await;
        assert_eq!(body["team"], json!([{ "id": 9, "name": "Equipo propio" }]));
    }

    #[tokio::test]
    async fn test_login_success() {
        let res = test_app("10:00")
            .oneshot(post_json(
                "/api/auth/login",
                &json!({ "email": "dev@demo.com", "password": "12345678" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["role"], "desarrollador");
        assert_eq!(body["territory"], "Nacional");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let res = test_app("10:00")
            .oneshot(post_json(
                "/api/auth/login",
                &json!({ "email": "dev@demo.com", "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_repair_endpoint_is_idempotent() {
        let app = test_app("10:00");
        for _ in 0..2 {
            let res = app
                .clone()
                .oneshot(post_json("/api/auth/repair", &json!({})))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            let body = body_json(res).await;
            assert_eq!(body["repaired"], 0);
        }
    }

    #[tokio::test]
    async fn test_credentials_listing() {
        let res = test_app("10:00")
            .oneshot(
                Request::builder()
                    .uri("/api/auth/credentials")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["credentials"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_chat_reply_when_active() {
        let res = test_app("10:00")
            .oneshot(post_json(
                "/api/chat",
                &json!({ "role": "votante", "message": "hola" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["bot"]["name"], "SupportBot");
        assert!(!body["reply"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_unavailable_outside_hours() {
        let res = test_app("23:30")
            .oneshot(post_json(
                "/api/chat",
                &json!({ "role": "votante", "message": "hola" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        let reply = body["reply"].as_str().unwrap();
        assert!(reply.contains("SupportBot"));
        assert!(reply.contains("09:00 - 19:00"));
    }

    #[tokio::test]
    async fn test_chat_unknown_role_uses_the_general_persona() {
        let res = test_app("10:00")
            .oneshot(post_json(
                "/api/chat",
                &json!({ "role": "marciano", "message": "hola" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["bot"]["name"], "InfoBot");
    }

    struct SlowAgent;

    #[async_trait::async_trait]
    impl RoleAgent for SlowAgent {
        fn role(&self) -> Role {
            Role::Votante
        }

        fn actions(&self) -> &'static [&'static str] {
            &["get_location"]
        }

        async fn handle(
            &self,
            _ctx: &AgentContext,
            _action: &str,
            _payload: Option<&Value>,
            _user_config: Option<&Value>,
        ) -> Result<Value, AgentError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(json!({}))
        }
    }

    #[tokio::test]
    async fn test_slow_handler_is_bounded() {
        let rows: Arc<dyn RowFetcher> = Arc::new(StaticRows::demo());
        let mut registry = build_registry(rows).unwrap();
        registry.register(Arc::new(SlowAgent));
        let state = AppState {
            dispatcher: Arc::new(Dispatcher::new(
                Arc::new(registry),
                Arc::new(NoopEmitter),
                Duration::from_millis(20),
            )),
            credentials: Arc::new(CredentialStore::new()),
            responder: Arc::new(SimulatedResponder::new(
                Arc::new(FixedClock("10:00".to_string())),
                Duration::ZERO,
            )),
        };
        let res = router(state)
            .oneshot(post_json(
                "/api/agent/votante",
                &json!({ "action": "get_location" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["status"], "error");
        assert_eq!(
            body["error"],
            "La acción excedió el tiempo máximo de ejecución."
        );
    }
}
