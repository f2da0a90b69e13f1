use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::work::models::WorkScope;
use crate::inbound::http::handlers::works::WorkResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PaginationParams;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// The caller's own works, admins included.
pub async fn list_works(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Query(params): Query<PaginationParams>,
) -> Result<ApiSuccess<Vec<WorkResponse>>, ApiError> {
    list(state, current, WorkScope::Owned, params).await
}

/// Every work in the store.
pub async fn admin_list_works(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Query(params): Query<PaginationParams>,
) -> Result<ApiSuccess<Vec<WorkResponse>>, ApiError> {
    list(state, current, WorkScope::All, params).await
}

async fn list(
    state: AppState,
    current: AuthenticatedUser,
    scope: WorkScope,
    params: PaginationParams,
) -> Result<ApiSuccess<Vec<WorkResponse>>, ApiError> {
    let works = state
        .work_service
        .list_works(&current.principal(), scope, params.into())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        works.iter().map(WorkResponse::from).collect(),
    ))
}
