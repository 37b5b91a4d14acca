use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path as AxumPath, RawQuery, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use foundation::ids::ViewId;
use scene::selection::SelectionState;
use scene::svg::render_scene;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use web::query::encode;
use web::{
    error_page, page_shell, Dashboard, DashboardConfig, QueryLinks, SelectionQuery, Shell,
    PAGE_TITLE,
};

use crate::settings::Settings;

/// Outcome of the startup load. A failed load is kept so every request can
/// report it.
pub enum Loaded {
    Ready(Dashboard),
    Failed(String),
}

#[derive(Clone)]
pub struct AppState {
    loaded: Arc<Loaded>,
    max_age: u32,
}

impl AppState {
    pub fn load(settings: &Settings) -> Self {
        let loaded = DashboardConfig::load_optional(settings.config.as_deref())
            .map_err(|e| e.to_string())
            .and_then(|config| {
                Dashboard::open(&settings.data_root, &config).map_err(|e| e.to_string())
            });
        let loaded = match loaded {
            Ok(dashboard) => {
                info!(fingerprint = %dashboard.fingerprint(), "dashboard ready");
                Loaded::Ready(dashboard)
            }
            Err(reason) => {
                error!(root = %settings.data_root.display(), "data unavailable: {reason}");
                Loaded::Failed(reason)
            }
        };
        Self::new(loaded, settings.max_age)
    }

    pub fn new(loaded: Loaded, max_age: u32) -> Self {
        Self {
            loaded: Arc::new(loaded),
            max_age,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(get_page))
        .route("/views/:container", get(get_view))
        .route("/api/summary", get(get_summary))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<AppState>) -> Response {
    match state.loaded.as_ref() {
        Loaded::Ready(_) => (StatusCode::OK, "ok").into_response(),
        Loaded::Failed(_) => (StatusCode::SERVICE_UNAVAILABLE, "data unavailable").into_response(),
    }
}

async fn get_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let dashboard = match state.loaded.as_ref() {
        Loaded::Ready(d) => d,
        Loaded::Failed(reason) => return unavailable_page(reason),
    };
    let query = SelectionQuery::parse(query.as_deref().unwrap_or(""));
    let mut session = dashboard.session_for(&query);
    let tag = etag(
        dashboard.fingerprint(),
        "page",
        session.selection(),
        query.page_width(),
    );
    if matches_etag(&headers, &tag) {
        return not_modified(&tag);
    }

    let page = session.render_all();
    let links = QueryLinks::new("/", session.selection().clone(), query.page_width());
    let html = page_shell(
        &page,
        &Shell {
            title: PAGE_TITLE,
            selection: session.selection(),
            links: &links,
            form_action: Some("/"),
        },
    );
    debug!(revision = session.revision(), views = page.len(), "page rendered");
    respond(StatusCode::OK, HTML, Some(&tag), state.max_age, html)
}

async fn get_view(
    State(state): State<AppState>,
    AxumPath(container): AxumPath<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let dashboard = match state.loaded.as_ref() {
        Loaded::Ready(d) => d,
        Loaded::Failed(reason) => return unavailable_page(reason),
    };
    let Some(view) = ViewId::from_container_id(&container) else {
        return (StatusCode::NOT_FOUND, format!("unknown container {container}")).into_response();
    };
    let query = SelectionQuery::parse(query.as_deref().unwrap_or(""));
    let session = dashboard.session_for(&query);
    let tag = etag(
        dashboard.fingerprint(),
        view.container_id(),
        session.selection(),
        query.page_width(),
    );
    if matches_etag(&headers, &tag) {
        return not_modified(&tag);
    }

    let scene = session.render_view(view);
    let links = QueryLinks::new("/", session.selection().clone(), query.page_width());
    respond(
        StatusCode::OK,
        HTML,
        Some(&tag),
        state.max_age,
        render_scene(&scene, &links),
    )
}

async fn get_summary(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let dashboard = match state.loaded.as_ref() {
        Loaded::Ready(d) => d,
        Loaded::Failed(reason) => {
            let body = json!({ "error": "data unavailable", "reason": reason });
            return respond(
                StatusCode::SERVICE_UNAVAILABLE,
                JSON,
                None,
                0,
                body.to_string(),
            );
        }
    };
    let tag = etag(
        dashboard.fingerprint(),
        "summary",
        dashboard.default_selection(),
        None,
    );
    if matches_etag(&headers, &tag) {
        return not_modified(&tag);
    }
    match serde_json::to_string(&dashboard.summary()) {
        Ok(body) => respond(StatusCode::OK, JSON, Some(&tag), state.max_age, body),
        Err(err) => {
            error!("summary serialization failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "summary error").into_response()
        }
    }
}

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";

/// Strong validator over the dataset content, the resource and the
/// normalized selection.
fn etag(fingerprint: &str, resource: &str, selection: &SelectionState, width: Option<f64>) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(fingerprint.as_bytes());
    hasher.update(b"\0");
    hasher.update(resource.as_bytes());
    hasher.update(b"\0");
    hasher.update(encode(selection, width).as_bytes());
    let hex = hasher.finalize().to_hex();
    format!("\"{}\"", &hex.as_str()[..32])
}

fn matches_etag(headers: &HeaderMap, tag: &str) -> bool {
    headers
        .get(http::header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            v.split(',')
                .map(str::trim)
                .any(|candidate| candidate == tag || candidate == "*")
        })
}

fn not_modified(tag: &str) -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(tag) {
        headers.insert(http::header::ETAG, v);
    }
    (StatusCode::NOT_MODIFIED, headers).into_response()
}

fn unavailable_page(reason: &str) -> Response {
    respond(
        StatusCode::SERVICE_UNAVAILABLE,
        HTML,
        None,
        0,
        error_page(PAGE_TITLE, reason),
    )
}

fn respond(
    status: StatusCode,
    content_type: &'static str,
    tag: Option<&str>,
    max_age: u32,
    body: String,
) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static(content_type),
    );
    if let Some(v) = tag.and_then(|t| HeaderValue::from_str(t).ok()) {
        headers.insert(http::header::ETAG, v);
    }
    let cache = if status.is_success() {
        format!("public, max-age={max_age}")
    } else {
        "no-store".to_string()
    };
    if let Ok(v) = HeaderValue::from_str(&cache) {
        headers.insert(http::header::CACHE_CONTROL, v);
    }
    (status, headers, Body::from(body)).into_response()
}
