use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Catch-all handler error: the cause goes to the operator log, the user
/// gets a generic line and a 500. Expected outcomes (bad input, missing
/// movie, refused login) never take this path, they flash and redirect.
pub struct AppError(anyhow::Error);

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong on our side").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
