//! HTTP routes for the unicorn API.
//!
//! Handlers extract path, query and body, call into `UnicornService`, and
//! turn the result into JSON. Errors become `{"error": "..."}` bodies with
//! the matching status code.
//!
//! | Method | Path               | Success                         |
//! |--------|--------------------|---------------------------------|
//! | GET    | `/`                | 200 status message              |
//! | GET    | `/unicorns`        | 200 filtered records            |
//! | GET    | `/unicorns/{name}` | 200 record                      |
//! | POST   | `/unicorns`        | 201 created record              |
//! | PUT    | `/unicorns/{name}` | 200 updated record              |
//! | DELETE | `/unicorns/{name}` | 200 confirmation + removed record |

use std::path::Path;

use axum::{
    Json, Router,
    extract::{
        Path as UrlPath, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::query::RawCriteria;
use crate::service::{ApiError, UnicornService};
use crate::store::{RawFields, StoreError};
use crate::types::Unicorn;

/// Build the application router.
///
/// Paths that match no route are served from `static_directory`.
pub fn router(service: UnicornService, static_directory: &Path) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/unicorns", get(list_unicorns).post(create_unicorn))
        .route(
            "/unicorns/{name}",
            get(get_unicorn).put(update_unicorn).delete(delete_unicorn),
        )
        .fallback_service(ServeDir::new(static_directory))
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize)]
struct MessageBody {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct DeleteBody {
    message: &'static str,
    unicorn: Unicorn,
}

fn path_name(path: Result<UrlPath<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|UrlPath(name)| name)
        .map_err(|e| ApiError::InvalidPath(e.body_text()))
}

async fn root() -> Json<MessageBody> {
    Json(MessageBody {
        message: "Unicorn API is running!",
    })
}

async fn list_unicorns(
    State(service): State<UnicornService>,
    Query(criteria): Query<RawCriteria>,
) -> Result<Json<Vec<Unicorn>>, ApiError> {
    Ok(Json(service.search(&criteria)?))
}

async fn get_unicorn(
    State(service): State<UnicornService>,
    path: Result<UrlPath<String>, PathRejection>,
) -> Result<Json<Unicorn>, ApiError> {
    let name = path_name(path)?;
    Ok(Json(service.get(&name)?))
}

async fn create_unicorn(
    State(service): State<UnicornService>,
    payload: Result<Json<RawFields>, JsonRejection>,
) -> Result<(StatusCode, Json<Unicorn>), ApiError> {
    let Json(fields) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    Ok((StatusCode::CREATED, Json(service.create(&fields)?)))
}

async fn update_unicorn(
    State(service): State<UnicornService>,
    path: Result<UrlPath<String>, PathRejection>,
    payload: Result<Json<RawFields>, JsonRejection>,
) -> Result<Json<Unicorn>, ApiError> {
    let name = path_name(path)?;
    let Json(fields) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    Ok(Json(service.update(&name, &fields)?))
}

async fn delete_unicorn(
    State(service): State<UnicornService>,
    path: Result<UrlPath<String>, PathRejection>,
) -> Result<Json<DeleteBody>, ApiError> {
    let name = path_name(path)?;
    let unicorn = service.delete(&name)?;
    Ok(Json(DeleteBody {
        message: "Unicorn deleted successfully",
        unicorn,
    }))
}

impl ApiError {
    /// Status code and client-facing message for this error.
    #[must_use]
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Store(StoreError::Validation(e)) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Store(StoreError::Conflict { .. }) => (
                StatusCode::CONFLICT,
                "Unicorn with this name already exists".to_string(),
            ),
            Self::Store(StoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Unicorn not found".to_string())
            }
            Self::InvalidBody(_) => (StatusCode::BAD_REQUEST, "Invalid data format".to_string()),
            Self::InvalidPath(_) => (StatusCode::BAD_REQUEST, "Invalid unicorn name".to_string()),
            Self::LockPoisoned => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        } else {
            tracing::warn!("Request rejected: {self}");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
