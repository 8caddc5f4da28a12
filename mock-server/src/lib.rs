use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: String,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: "success".to_string(),
            message: String::new(),
            data,
        }
    }

    pub fn failure(code: &str, message: &str, data: T) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            data,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct App {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct Login {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct DebugInput {
    pub query: String,
}

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn first_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    20
}

pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Deserialize)]
pub struct LargeQuery {
    pub kib: usize,
}

#[derive(Deserialize)]
pub struct SlowQuery {
    pub ms: u64,
}

pub struct Store {
    sessions: RwLock<HashMap<String, Profile>>,
    apps: Vec<App>,
}

pub type Db = Arc<Store>;

pub fn app() -> Router {
    let apps = (1..=5)
        .map(|n| App {
            id: Uuid::new_v4(),
            name: format!("app-{n}"),
        })
        .collect();
    let db: Db = Arc::new(Store {
        sessions: RwLock::new(HashMap::new()),
        apps,
    });
    Router::new()
        .route("/ping", get(ping))
        .route("/echo", post(echo))
        .route("/apps", get(list_apps))
        .route("/apps/{id}/debug", post(debug_app))
        .route("/validate", post(validate))
        .route("/login", post(login))
        .route("/account", get(account))
        .route("/redirect", get(redirect))
        .route("/slow", get(slow))
        .route("/large", get(large))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn ping(RawQuery(query): RawQuery) -> Json<Envelope<Value>> {
    Json(Envelope::success(json!({ "query": query })))
}

async fn echo(Json(body): Json<Value>) -> Json<Envelope<Value>> {
    Json(Envelope::success(body))
}

async fn list_apps(State(db): State<Db>, Query(page): Query<PageQuery>) -> Json<Envelope<Value>> {
    let page_size = page.page_size.clamp(1, MAX_PAGE_SIZE);
    let total_record = db.apps.len() as u64;
    let total_page = total_record.div_ceil(page_size);
    let skip = usize::try_from(page.page.saturating_sub(1).saturating_mul(page_size)).unwrap_or(usize::MAX);
    let take = usize::try_from(page_size).unwrap_or(usize::MAX);
    let list: Vec<App> = db.apps.iter().skip(skip).take(take).cloned().collect();
    Json(Envelope::success(json!({
        "list": list,
        "paginator": {
            "total_page": total_page,
            "total_record": total_record,
            "current_page": page.page,
            "page_size": page_size,
        }
    })))
}

async fn debug_app(Path(id): Path<Uuid>, Json(input): Json<DebugInput>) -> Json<Envelope<Value>> {
    Json(Envelope::success(json!({
        "content": format!("[{id}] {}", input.query),
    })))
}

async fn validate(Json(body): Json<Value>) -> (StatusCode, Json<Envelope<Value>>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(Envelope::failure("validate_error", "bad input", body)),
    )
}

async fn login(State(db): State<Db>, Json(input): Json<Login>) -> impl IntoResponse {
    let token = Uuid::new_v4().to_string();
    let profile = Profile {
        name: input.name,
        email: input.email,
        avatar: String::new(),
    };
    db.sessions.write().await.insert(token.clone(), profile.clone());
    tracing::info!(email = %profile.email, "session created");
    (
        [(header::SET_COOKIE, format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly"))],
        Json(Envelope::success(profile)),
    )
}

async fn account(State(db): State<Db>, headers: HeaderMap) -> Response {
    let sessions = db.sessions.read().await;
    match session_token(&headers).and_then(|token| sessions.get(&token)) {
        Some(profile) => Json(Envelope::success(profile.clone())).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(Envelope::failure("unauthorized", "login required", Value::Null)),
        )
            .into_response(),
    }
}

async fn redirect() -> Redirect {
    Redirect::temporary("/ping?from=redirect")
}

async fn slow(Query(query): Query<SlowQuery>) -> Json<Envelope<Value>> {
    tokio::time::sleep(Duration::from_millis(query.ms)).await;
    Json(Envelope::success(json!({ "slept_ms": query.ms })))
}

async fn large(Query(query): Query<LargeQuery>) -> Json<Envelope<Value>> {
    Json(Envelope::success(json!({ "content": "x".repeat(query.kib * 1024) })))
}

/// Pull the session token out of the `Cookie` header, if any.
fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn success_envelope_serializes_to_wire_shape() {
        let json = serde_json::to_value(Envelope::success(json!({"content": "hi"}))).unwrap();
        assert_eq!(json["code"], "success");
        assert_eq!(json["message"], "");
        assert_eq!(json["data"]["content"], "hi");
    }

    #[test]
    fn page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
    }

    #[test]
    fn login_rejects_missing_email() {
        let result: Result<Login, _> = serde_json::from_str(r#"{"name":"Ling"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn session_token_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=abc; lang=en"));
        assert_eq!(session_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn session_token_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(session_token(&headers).is_none());
        assert!(session_token(&HeaderMap::new()).is_none());
    }
}
