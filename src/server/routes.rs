//! HTTP routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::error::QuizError;
use crate::models::normalize_language;
use crate::protocol::{
    CheckRequest, CheckResponse, ErrorResponse, QuizQuery, QuizResponse, INVALID_REQUEST,
};

use super::state::AppState;
use super::ws::ws_handler;

/// Build the service router.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/quiz", get(get_quiz))
        .route("/api/quiz/check", post(check_answers))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_quiz(
    State(state): State<AppState>,
    Query(query): Query<QuizQuery>,
) -> Result<Json<QuizResponse>, QuizError> {
    let language = normalize_language(&query.language);
    let questions = state.quiz(&language).await?;
    info!(%language, count = questions.len(), "served quiz");

    Ok(Json(QuizResponse::new(language, questions)))
}

async fn check_answers(
    State(state): State<AppState>,
    request: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return invalid_request(rejection),
    };

    let language = normalize_language(&request.language);
    match state.check(&language, &request.answers).await {
        Ok(result) => {
            info!(
                %language,
                score = result.score,
                total = result.total,
                "checked answers"
            );
            Json(CheckResponse::from(result)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

fn invalid_request(rejection: JsonRejection) -> Response {
    debug!(error = %rejection, "rejected check request");

    let body = ErrorResponse {
        success: false,
        error: INVALID_REQUEST.to_string(),
        message: rejection.body_text(),
        available_languages: None,
    };
    (rejection.status(), Json(body)).into_response()
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        let status = if self.is_caller_error() {
            debug!(kind = self.kind(), error = %self, "rejected request");
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self, "question store unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
