use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::users::NewUserRequest;
use crate::inbound::http::handlers::users::UserResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<NewUserRequest>,
) -> Result<ApiSuccess<UserResponse>, ApiError> {
    let command = body.try_into_command()?;

    state
        .user_service
        .create_user(&current.principal(), command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}
