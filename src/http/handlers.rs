use super::state::AppState;
use crate::error::Error;
use crate::generation::{GenerateRequest, GenerateResponse};
use crate::session::{
    CallStatus, SessionConfig, SessionController, SessionHandle, SessionMode, SessionSnapshot,
    TranscriptEntry,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Generate,
    Interview,
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(rename = "type")]
    pub kind: SessionKind,

    /// Display name, used when the `users` collection has no record for `user_id`
    #[serde(default)]
    pub user_name: Option<String>,

    pub user_id: String,

    /// Interview to conduct (interview sessions only)
    pub interview_id: Option<String>,

    /// Existing feedback to overwrite after the call
    pub feedback_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub success: bool,
    pub data: &'static str,
}

fn error_response(status: StatusCode, error: impl ToString) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

fn error_status(e: Error) -> Response {
    match e {
        Error::InvalidState(_) => error_response(StatusCode::CONFLICT, e),
        Error::NotFound(_) => error_response(StatusCode::NOT_FOUND, e),
        _ => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

async fn find_session(state: &AppState, session_id: &str) -> Option<SessionHandle> {
    let sessions = state.sessions.read().await;
    sessions.get(session_id).cloned()
}

fn session_not_found(session_id: &str) -> Response {
    error_status(Error::NotFound(format!("session {}", session_id)))
}

/// The stored user profile wins over a name supplied with the request
async fn resolve_user_name(
    state: &AppState,
    user_id: &str,
    requested: Option<String>,
) -> Result<String, Response> {
    match state.store.get_user(user_id).await {
        Ok(Some(user)) => Ok(user.name),
        Ok(None) => requested.filter(|n| !n.trim().is_empty()).ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("user_name is required: no user record for {}", user_id),
            )
        }),
        Err(e) => {
            error!("Failed to load user {}: {}", user_id, e);
            Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
        }
    }
}

/// Drop a session once its post-call work is done and the retention window has passed
///
/// A new call placed during the window keeps the session alive until that
/// call's dispatch completes too.
fn expire_when_done(state: AppState, handle: SessionHandle) {
    tokio::spawn(async move {
        loop {
            if handle.wait_for_dispatch().await.is_err() {
                return;
            }
            tokio::time::sleep(state.session_retention).await;

            let snapshot = handle.snapshot();
            if snapshot.status != CallStatus::Finished || !snapshot.dispatch_complete {
                debug!("Session {} is in use again, keeping it", handle.session_id());
                continue;
            }

            let removed = state.sessions.write().await.remove(handle.session_id());
            if removed.is_some() {
                handle.shutdown().await;
                info!("Session {} expired", handle.session_id());
            }
            return;
        }
    });
}

// ============================================================================
// Question generation
// ============================================================================

/// GET /generate-questions
/// Static liveness payload
pub async fn generate_questions_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            success: true,
            data: "Thank you!",
        }),
    )
}

/// POST /generate-questions
/// Generate an interview's questions and store it
pub async fn generate_questions(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!("Rejected generation request: {}", rejection);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerateResponse::failed(rejection.body_text())),
            );
        }
    };

    match state.generator.generate(&req).await {
        Ok(id) => (StatusCode::OK, Json(GenerateResponse::created(id))),
        Err(e) => {
            error!("Error in POST /generate-questions: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerateResponse::failed(e)),
            )
        }
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// POST /sessions
/// Create a session controller with its own voice connection
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    let user_name = match resolve_user_name(&state, &req.user_id, req.user_name).await {
        Ok(name) => name,
        Err(response) => return response,
    };

    let mode = match req.kind {
        SessionKind::Generate => SessionMode::Generate {
            user_name,
            user_id: req.user_id,
        },
        SessionKind::Interview => {
            let Some(interview_id) = req.interview_id else {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "interview_id is required for interview sessions",
                );
            };

            let interview = match state.store.require_interview(&interview_id).await {
                Ok(interview) => interview,
                Err(e) => {
                    error!("Failed to load interview {}: {}", interview_id, e);
                    return error_status(e);
                }
            };

            SessionMode::Interview {
                user_name,
                user_id: req.user_id,
                interview_id,
                feedback_id: req.feedback_id,
                questions: interview.questions,
            }
        }
    };

    let mut config = SessionConfig::new(mode);
    config.workflow_id = state.workflow_id.clone();
    config.interviewer = state.interviewer.clone();
    let session_id = config.session_id.clone();

    let (voice, events) = match state.voice.connect(&session_id).await {
        Ok(connection) => connection,
        Err(e) => {
            error!("Failed to connect voice client: {}", e);
            return error_response(StatusCode::BAD_GATEWAY, e);
        }
    };

    let handle = SessionController::spawn(config, voice, events, state.dispatcher.clone());
    let snapshot = handle.snapshot();

    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id.clone(), handle.clone());
    }
    expire_when_done(state, handle);

    info!("Session {} created", session_id);

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            snapshot,
        }),
    )
        .into_response()
}

/// POST /sessions/:session_id/call
pub async fn call_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(session) = find_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    match session.call().await {
        Ok(()) => (StatusCode::OK, Json(session.snapshot())).into_response(),
        Err(e) => error_status(e),
    }
}

/// POST /sessions/:session_id/disconnect
pub async fn disconnect_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(session) = find_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    match session.disconnect().await {
        Ok(()) => (StatusCode::OK, Json(session.snapshot())).into_response(),
        Err(e) => error_status(e),
    }
}

/// GET /sessions/:session_id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(session) => (StatusCode::OK, Json(session.snapshot())).into_response(),
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/transcript
pub async fn get_session_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match find_session(&state, &session_id).await {
        Some(session) => {
            let transcript: Vec<TranscriptEntry> = session.transcript();
            (StatusCode::OK, Json(transcript)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// DELETE /sessions/:session_id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match session {
        Some(session) => {
            session.shutdown().await;
            info!("Session {} removed", session_id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => session_not_found(&session_id),
    }
}

// ============================================================================
// Stored documents
// ============================================================================

/// GET /interviews/:interview_id
pub async fn get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> impl IntoResponse {
    match state.store.require_interview(&interview_id).await {
        Ok(interview) => (StatusCode::OK, Json(interview)).into_response(),
        Err(e @ Error::NotFound(_)) => error_status(e),
        Err(e) => {
            error!("Failed to load interview {}: {}", interview_id, e);
            error_status(e)
        }
    }
}

/// GET /feedback/:feedback_id
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(feedback_id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_feedback(&feedback_id).await {
        Ok(Some(feedback)) => (StatusCode::OK, Json(feedback)).into_response(),
        Ok(None) => error_status(Error::NotFound(format!("feedback {}", feedback_id))),
        Err(e) => {
            error!("Failed to load feedback {}: {}", feedback_id, e);
            error_status(e)
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
