use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::users::UserResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PaginationParams;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Query(params): Query<PaginationParams>,
) -> Result<ApiSuccess<Vec<UserResponse>>, ApiError> {
    let users = state
        .user_service
        .list_users(&current.principal(), params.into())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        users.iter().map(UserResponse::from).collect(),
    ))
}
