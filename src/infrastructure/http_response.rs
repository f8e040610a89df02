// HTTP rendering of service errors
use crate::application::error::SampleServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::error::Error;
use tracing::error;

/// Body sent for server-side failures; details go to the log only
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl SampleServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SampleServiceError::SampleColumnNotFound { .. } => StatusCode::BAD_REQUEST,
            SampleServiceError::SampleNotFound { .. }
            | SampleServiceError::WashFrequencyUnavailable { .. } => StatusCode::NOT_FOUND,
            SampleServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A JSON string body with the given status, the error shape the dashboard reads
pub fn json_message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(message)).into_response()
}

impl IntoResponse for SampleServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("{}", self);
            let mut current = self.source();
            while let Some(source) = current {
                error!("Caused by: {}", source);
                current = source.source();
            }
            return json_message_response(status, INTERNAL_ERROR_MESSAGE);
        }

        json_message_response(status, &self.to_string())
    }
}
