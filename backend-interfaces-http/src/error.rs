use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, warn};

use crate::views;

#[derive(Debug)]
pub enum HttpError {
    /// The request body never arrived intact (too large, connection dropped).
    Rejected(StatusCode, String),
    Internal(String),
}

impl From<backend_application::AppError> for HttpError {
    fn from(value: backend_application::AppError) -> Self {
        match value {
            backend_application::AppError::Internal(err) => HttpError::Internal(format!("{err:#}")),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Rejected(status, detail) => {
                warn!(status = status.as_u16(), "request body rejected: {}", detail);
                (status, "The submitted form could not be read. Nothing was recorded.")
            }
            HttpError::Internal(detail) => {
                error!("request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while handling this request.",
                )
            }
        };
        // Details stay in the logs; the page only names the status.
        let page = views::error_page(status, message);
        (status, Html(page)).into_response()
    }
}
