//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{
    BookingOptionsResponse, BookingResponse, ChatRequest, ChatResponse, ErrorResponse,
    StatusResponse, SuccessResponse,
};
use super::AppState;
use crate::booking::{BookingError, BookingForm, Doctor, TimeSlot};
use crate::chat::{ChatError, Outcome, MAX_MESSAGE_CHARS};
use crate::session::{SessionNotFound, SessionSnapshot};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_page))
        .route("/assets/*path", get(serve_static))
        // Chat availability
        .route("/api/status", get(get_status))
        .route("/api/booking/options", get(booking_options))
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id/reset", post(reset_session))
        .route("/api/sessions/:id/end", post(end_session))
        // User actions
        .route("/api/sessions/:id/chat", post(send_chat))
        .route("/api/sessions/:id/booking", post(submit_booking))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - chat page not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Status
// ============================================================

async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let response = match &state.chat {
        Ok(controller) => StatusResponse {
            chat_enabled: true,
            model: Some(controller.model_id().to_string()),
            notice: None,
            max_message_chars: MAX_MESSAGE_CHARS,
        },
        Err(e) => StatusResponse {
            chat_enabled: false,
            model: None,
            notice: Some(e.to_string()),
            max_message_chars: MAX_MESSAGE_CHARS,
        },
    };
    Json(response)
}

async fn booking_options() -> Json<BookingOptionsResponse> {
    Json(BookingOptionsResponse {
        doctors: Doctor::ALL.iter().map(|d| d.label()).collect(),
        times: TimeSlot::ALL.iter().map(|t| t.label()).collect(),
    })
}

// ============================================================
// Session Lifecycle
// ============================================================

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionSnapshot>) {
    let handle = state.sessions.create().await;
    let snapshot = handle.lock().await.snapshot(handle.id());
    (StatusCode::CREATED, Json(snapshot))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = state.sessions.get(&id).await?;
    let snapshot = handle.lock().await.snapshot(&id);
    Ok(Json(snapshot))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = state.sessions.get(&id).await?;
    let mut session = handle.lock().await;
    session.reset();
    tracing::info!(session_id = %id, "Session reset");
    Ok(Json(session.snapshot(&id)))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.sessions.end(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Chat
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload?;
    if req.text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::BadRequest(format!(
            "Message is longer than {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let controller = state
        .chat
        .as_ref()
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;

    let handle = state.sessions.get(&id).await?;
    // Held across the remote call: one exchange at a time per session
    let mut session = handle.lock().await;

    let outcome = controller
        .handle_message(&mut session, &req.text)
        .await
        .map_err(|e| {
            let ChatError::GenerationFailed(inner) = &e;
            tracing::warn!(
                session_id = %id,
                kind = inner.kind.as_str(),
                error = %inner.message,
                "Exchange failed, session unchanged"
            );
            AppError::BadGateway(
                "Sorry, I could not get a reply right now. Please try again.".to_string(),
            )
        })?;

    if outcome == Outcome::Exchanged && session.show_form() {
        tracing::debug!(session_id = %id, "Booking form visible");
    }

    Ok(Json(ChatResponse {
        session: session.snapshot(&id),
        ignored: outcome == Outcome::Ignored,
    }))
}

// ============================================================
// Booking
// ============================================================

async fn submit_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookingForm>, JsonRejection>,
) -> Result<Json<BookingResponse>, AppError> {
    let Json(form) = payload?;
    state.sessions.get(&id).await?;

    let confirmation = form.submit()?;
    tracing::info!(
        session_id = %id,
        doctor = confirmation.doctor.label(),
        time = confirmation.preferred_time.label(),
        "Booking confirmed"
    );

    Ok(Json(BookingResponse {
        summary: confirmation.summary(),
        confirmation,
    }))
}

async fn get_version() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Unprocessable(String),
    BadGateway(String),
    ServiceUnavailable(String),
}

impl From<SessionNotFound> for AppError {
    fn from(e: SessionNotFound) -> Self {
        AppError::NotFound(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        AppError::Unprocessable(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
