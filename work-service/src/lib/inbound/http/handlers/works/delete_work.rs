use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::works::parse_work_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageResponse;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_work(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let work_id = parse_work_id(&id)?;

    state
        .work_service
        .delete_work(&current.principal(), &work_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn admin_delete_work(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    let work_id = parse_work_id(&id)?;

    state
        .work_service
        .delete_work(&current.principal(), &work_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponse {
            message: "Work deleted".to_string(),
        },
    ))
}
