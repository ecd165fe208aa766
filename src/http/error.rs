use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::alerts::AlertError;

impl IntoResponse for AlertError {
    fn into_response(self) -> Response {
        let status = match self {
            AlertError::DisplayClosed => StatusCode::SERVICE_UNAVAILABLE,
            AlertError::FeedUnavailable(_) => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}
