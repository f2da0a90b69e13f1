use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::works::parse_work_id;
use crate::inbound::http::handlers::works::UpdateWorkRequest;
use crate::inbound::http::handlers::works::WorkResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_work(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateWorkRequest>,
) -> Result<ApiSuccess<WorkResponse>, ApiError> {
    let work_id = parse_work_id(&id)?;
    let command = req.try_into_command()?;

    state
        .work_service
        .update_work(&current.principal(), &work_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref work| ApiSuccess::new(StatusCode::OK, work.into()))
}
