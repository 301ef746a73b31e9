//! HTTP transport - maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` - `{ "ok": true, "commands": [...] }`.
//! - `POST /recipes/:id/upvote`, `POST /recipes/:id/downvote` - vote on the open recipe.
//! - `POST /:command` - dispatch a command, body = JSON input.
//! - `GET /uploads/:key` - serve an uploaded image.
//!
//! The session id travels in the `x-session-id` header. A session is stored
//! once a command leaves something in it (a user or an open recipe) and the
//! response then carries its id. Signing out ends the session.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use super::{Service, ServiceError};
use crate::app::RecipeBox;
use crate::document::DocumentStore;
use crate::session::{Session, SessionStore};

pub const SESSION_HEADER: &str = "x-session-id";

struct HttpState<S> {
    service: Arc<Service<RecipeBox<S>>>,
    sessions: SessionStore,
}

impl<S> Clone for HttpState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Build an axum `Router` that dispatches commands via the given service.
pub fn router<S: DocumentStore + 'static>(
    service: Arc<Service<RecipeBox<S>>>,
    sessions: SessionStore,
) -> Router {
    Router::new()
        .route("/health", get(health_handler::<S>))
        .route("/recipes/:id/upvote", post(upvote_handler::<S>))
        .route("/recipes/:id/downvote", post(downvote_handler::<S>))
        .route("/uploads/:key", get(upload_handler::<S>))
        .route("/:command", post(command_handler::<S>))
        .with_state(HttpState { service, sessions })
}

/// Serve the service at `addr` until `shutdown` resolves.
pub async fn serve<S, F>(
    service: Arc<Service<RecipeBox<S>>>,
    sessions: SessionStore,
    addr: &str,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: DocumentStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service, sessions);
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

async fn health_handler<S: DocumentStore + 'static>(
    State(state): State<HttpState<S>>,
) -> impl IntoResponse {
    Json(json!({ "ok": true, "commands": state.service.commands() }))
}

async fn command_handler<S: DocumentStore + 'static>(
    State(state): State<HttpState<S>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> Response {
    dispatch_blocking(state, headers, command, input).await
}

async fn upvote_handler<S: DocumentStore + 'static>(
    State(state): State<HttpState<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    dispatch_blocking(state, headers, "recipe.upvote".into(), json!({ "id": id })).await
}

async fn downvote_handler<S: DocumentStore + 'static>(
    State(state): State<HttpState<S>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    dispatch_blocking(state, headers, "recipe.downvote".into(), json!({ "id": id })).await
}

async fn upload_handler<S: DocumentStore + 'static>(
    State(state): State<HttpState<S>>,
    Path(key): Path<String>,
) -> Response {
    match state.service.app().objects().fetch(&key) {
        Ok(Some(bytes)) => (
            StatusCode::OK,
            [(CONTENT_TYPE, content_type(&key))],
            bytes,
        )
            .into_response(),
        Ok(None) => error_response(&ServiceError::NotFound(key)),
        Err(err) => error_response(&ServiceError::from(err)),
    }
}

/// Media type for an uploaded object, from its file extension.
fn content_type(key: &str) -> &'static str {
    let extension = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Run a command on the blocking pool; password hashing can take a while.
async fn dispatch_blocking<S: DocumentStore + 'static>(
    state: HttpState<S>,
    headers: HeaderMap,
    command: String,
    input: Value,
) -> Response {
    let task = tokio::task::spawn_blocking(move || dispatch(&state, &headers, &command, input));
    match task.await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "command task failed");
            error_response(&ServiceError::Storage(err.to_string()))
        }
    }
}

fn dispatch<S: DocumentStore + 'static>(
    state: &HttpState<S>,
    headers: &HeaderMap,
    command: &str,
    input: Value,
) -> Response {
    let (known_id, mut session) = match load_session(&state.sessions, headers) {
        Ok(loaded) => loaded,
        Err(err) => return error_response(&err),
    };

    let result = state.service.dispatch(command, input, &mut session);

    let session_id = match persist_session(&state.sessions, known_id, session) {
        Ok(id) => id,
        Err(err) => {
            warn!(error = %err, "failed to persist session");
            return error_response(&err);
        }
    };

    let mut response = match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => error_response(&err),
    };
    if let Some(value) = session_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

/// Resume the session named by the request header, or start an unsaved one.
fn load_session(
    sessions: &SessionStore,
    headers: &HeaderMap,
) -> Result<(Option<String>, Session), ServiceError> {
    let requested = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Some(id) = requested {
        if let Some(session) = sessions.load(id)? {
            return Ok((Some(id.to_string()), session));
        }
    }
    Ok((None, Session::new()))
}

/// Keep a session only while it holds something.
///
/// Empty sessions are never stored, and a session emptied by the command
/// (sign-out) is removed. Returns the id the client should send next.
fn persist_session(
    sessions: &SessionStore,
    known_id: Option<String>,
    session: Session,
) -> Result<Option<String>, ServiceError> {
    match (known_id, session.is_empty()) {
        (Some(id), true) => {
            sessions.remove(&id)?;
            debug!(session = %id, "session ended");
            Ok(None)
        }
        (Some(id), false) => {
            sessions.save(&id, session)?;
            Ok(Some(id))
        }
        (None, true) => Ok(None),
        (None, false) => Ok(Some(sessions.create(session)?)),
    }
}

fn error_response(err: &ServiceError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
