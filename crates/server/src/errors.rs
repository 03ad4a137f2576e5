use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use service::errors::ServiceError;
use tracing::{debug, error};

pub const CAFE_NOT_FOUND: &str = "Sorry a cafe with that id was not found in the database";
pub const NO_CAFES: &str = "Sorry, there are no cafes in the database";
pub const FORBIDDEN: &str = "Sorry, that's not allowed make sure you have the correct api key";

/// JSON error reply: a status code plus an `{"error": ...}` body.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl JsonApiError {
    /// `{"error": {title: detail}}`
    pub fn new(status: StatusCode, title: &str, detail: impl Into<String>) -> Self {
        let mut inner = serde_json::Map::new();
        inner.insert(title.to_string(), Value::String(detail.into()));
        Self { status, body: json!({ "error": inner }) }
    }

    /// `{"error": message}`
    pub fn plain(status: StatusCode, message: &str) -> Self {
        Self { status, body: json!({ "error": message }) }
    }

    /// Extractor failure, keeping the status axum picked.
    fn rejected(status: StatusCode, detail: String) -> Self {
        debug!(%status, %detail, "request rejected");
        Self::new(status, status.canonical_reason().unwrap_or("Bad Request"), detail)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", CAFE_NOT_FOUND),
            ServiceError::EmptyCollection(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", NO_CAFES),
            ServiceError::Forbidden => Self::plain(StatusCode::FORBIDDEN, FORBIDDEN),
            ServiceError::DuplicateName(name) => Self::new(
                StatusCode::CONFLICT,
                "Conflict",
                format!("Sorry, a cafe named {name} already exists"),
            ),
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, "Bad Request", msg),
            ServiceError::Db(msg) => {
                error!(error = %msg, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", "Sorry, something went wrong")
            }
        }
    }
}

/// A path segment that is not a cafe id names no cafe.
impl From<PathRejection> for JsonApiError {
    fn from(e: PathRejection) -> Self {
        debug!(detail = %e.body_text(), "cafe id not parsable");
        Self::new(StatusCode::NOT_FOUND, "Not Found", CAFE_NOT_FOUND)
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(e: QueryRejection) -> Self {
        Self::rejected(e.status(), e.body_text())
    }
}

impl From<FormRejection> for JsonApiError {
    fn from(e: FormRejection) -> Self {
        Self::rejected(e.status(), e.body_text())
    }
}

impl From<MultipartRejection> for JsonApiError {
    fn from(e: MultipartRejection) -> Self {
        Self::rejected(e.status(), e.body_text())
    }
}

impl From<MultipartError> for JsonApiError {
    fn from(e: MultipartError) -> Self {
        Self::rejected(e.status(), e.body_text())
    }
}
