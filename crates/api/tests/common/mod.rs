use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use arte_educa_api::config::ServerConfig;
use arte_educa_api::router::build_app_router;
use arte_educa_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Actor header sets
// ---------------------------------------------------------------------------

/// Header set identifying the acting user. `None` fields are not sent.
///
/// Values must stay visible-ASCII: they travel as HTTP header values.
#[derive(Debug, Clone, Default)]
pub struct ActorHeaders {
    pub role: Option<&'static str>,
    pub email: Option<String>,
    pub cre: Option<String>,
    pub inep: Option<String>,
}

pub fn professor(email: &str) -> ActorHeaders {
    ActorHeaders {
        role: Some("professor"),
        email: Some(email.to_string()),
        ..Default::default()
    }
}

pub fn gestor(inep: &str) -> ActorHeaders {
    ActorHeaders {
        role: Some("gestor"),
        email: Some("gestor@escola.go.gov.br".to_string()),
        inep: Some(inep.to_string()),
        ..Default::default()
    }
}

pub fn articulador(cre: &str) -> ActorHeaders {
    ActorHeaders {
        role: Some("articulador"),
        email: Some("articulador@cre.go.gov.br".to_string()),
        cre: Some(cre.to_string()),
        ..Default::default()
    }
}

pub fn admin() -> ActorHeaders {
    ActorHeaders {
        role: Some("admin"),
        email: Some("admin@seduc.go.gov.br".to_string()),
        ..Default::default()
    }
}

pub fn anonymous() -> ActorHeaders {
    ActorHeaders::default()
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

/// Send a request through the router with the given actor headers and an
/// optional JSON body.
pub async fn request(
    app: Router,
    method: Method,
    uri: &str,
    actor: &ActorHeaders,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = actor.role {
        builder = builder.header("x-actor-role", role);
    }
    if let Some(email) = &actor.email {
        builder = builder.header("x-actor-email", email);
    }
    if let Some(cre) = &actor.cre {
        builder = builder.header("x-actor-cre", cre);
    }
    if let Some(inep) = &actor.inep {
        builder = builder.header("x-actor-inep", inep);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, actor: &ActorHeaders) -> Response {
    request(app, Method::GET, uri, actor, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    actor: &ActorHeaders,
    body: serde_json::Value,
) -> Response {
    request(app, Method::POST, uri, actor, Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    actor: &ActorHeaders,
    body: serde_json::Value,
) -> Response {
    request(app, Method::PUT, uri, actor, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str, actor: &ActorHeaders) -> Response {
    request(app, Method::POST, uri, actor, None).await
}

pub async fn delete(app: Router, uri: &str, actor: &ActorHeaders) -> Response {
    request(app, Method::DELETE, uri, actor, None).await
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Domain fixtures
// ---------------------------------------------------------------------------

/// The professor who owns the fixture projects.
pub const PROFESSOR_EMAIL: &str = "maria.silva@escola.go.gov.br";

/// School and regional identifiers shared by the fixture content. ASCII
/// only, because the same values travel in `x-actor-*` headers.
pub const INEP: &str = "52041234";
pub const CRE: &str = "Rio Verde";

/// A content payload that passes the full submission validation.
pub fn conteudo_completo() -> serde_json::Value {
    serde_json::json!({
        "identificacao": {
            "cre": CRE,
            "municipio": "Rio Verde",
            "unidadeEducacional": "Escola Estadual Rio Verde",
            "inep": INEP,
            "professor": {
                "nome": "Maria Silva",
                "cpf": "529.982.247-25",
                "email": PROFESSOR_EMAIL
            }
        },
        "quadroHorario": {
            "modulacaoPrincipal": [
                {"horario": "08:00 - 09:00", "segunda": true}
            ]
        },
        "projeto": {
            "introducao": "Introducao",
            "justificativa": "Justificativa",
            "objetivoGeral": "Objetivo geral",
            "objetivosEspecificos": "Objetivo especifico",
            "metodologia": "Metodologia",
            "avaliacao": "Avaliacao continua"
        },
        "cronograma": {
            "acoes": [{"acao": "Ensaios", "marco": true}]
        }
    })
}

/// Drive a fresh project to `enviado` over the API and return its record.
pub async fn criar_projeto_enviado(pool: &PgPool) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/projetos",
        &professor(PROFESSOR_EMAIL),
        serde_json::json!({
            "tipoProjeto": "teatro",
            "conteudo": conteudo_completo(),
            "action": "submit"
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
