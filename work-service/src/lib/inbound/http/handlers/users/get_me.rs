use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::users::UserResponse;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn get_me(
    Extension(current): Extension<AuthenticatedUser>,
) -> ApiSuccess<UserResponse> {
    ApiSuccess::new(StatusCode::OK, (&current.0).into())
}
