use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use service::ServiceError;
use tracing::error;

/// JSON error envelope: `{"error": "...", "details": ...}`; `details` is omitted when empty.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, details: Option<Value>) -> Self {
        Self { status, error: error.into(), details }
    }

    /// Map a service failure to a response. `invalid_label` names validation
    /// failures for the operation, e.g. "Invalid gift item".
    pub fn from_service(e: ServiceError, invalid_label: &str) -> Self {
        match e {
            ServiceError::Validation(violations) => Self::new(
                StatusCode::BAD_REQUEST,
                invalid_label,
                serde_json::to_value(&violations).ok(),
            ),
            ServiceError::BadRequest(msg) => Self::new(StatusCode::BAD_REQUEST, msg, None),
            ServiceError::MalformedBody(msg) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid JSON body", Some(Value::String(msg)))
            }
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg, None),
            ServiceError::Storage(msg) => {
                error!(error = %msg, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: &self.error, details: self.details.as_ref() };
        (self.status, Json(body)).into_response()
    }
}

/// Metric label for a failed operation.
pub fn outcome_label(e: &ServiceError) -> &'static str {
    match e {
        ServiceError::Validation(_) => "validation",
        ServiceError::BadRequest(_) | ServiceError::MalformedBody(_) => "bad_request",
        ServiceError::NotFound(_) => "not_found",
        ServiceError::Storage(_) => "storage",
    }
}
