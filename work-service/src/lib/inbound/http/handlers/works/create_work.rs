use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::works::CreateWorkRequest;
use crate::inbound::http::handlers::works::WorkResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Create a work owned by the caller.
pub async fn create_work(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<CreateWorkRequest>,
) -> Result<ApiSuccess<WorkResponse>, ApiError> {
    create(state, current, body, false).await
}

/// Create a work for `user_id`, defaulting to the calling admin.
pub async fn admin_create_work(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<CreateWorkRequest>,
) -> Result<ApiSuccess<WorkResponse>, ApiError> {
    create(state, current, body, true).await
}

async fn create(
    state: AppState,
    current: AuthenticatedUser,
    body: CreateWorkRequest,
    accept_owner: bool,
) -> Result<ApiSuccess<WorkResponse>, ApiError> {
    let command = body.try_into_command(accept_owner)?;

    state
        .work_service
        .create_work(&current.principal(), command)
        .await
        .map_err(ApiError::from)
        .map(|ref work| ApiSuccess::new(StatusCode::CREATED, work.into()))
}
