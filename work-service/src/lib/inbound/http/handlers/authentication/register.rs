use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::users::NewUserRequest;
use crate::inbound::http::handlers::users::UserResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::router::AppState;

/// Self-registration. Any `is_admin` in the body is ignored.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewUserRequest>,
) -> Result<ApiSuccess<UserResponse>, ApiError> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}
