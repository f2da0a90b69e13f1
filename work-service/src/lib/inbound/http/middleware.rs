use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::access::policy::can;
use crate::domain::access::policy::Action;
use crate::domain::access::policy::Principal;
use crate::domain::access::policy::Resource;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Request extension holding the active user resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn principal(&self) -> Principal {
        Principal::from(&self.0)
    }
}

/// Resolves `Authorization: Bearer <token>` into an [`AuthenticatedUser`].
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?.to_owned();

    let user = state
        .auth_service
        .authenticate(&token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    tracing::debug!(user_id = %user.id, "Request authenticated");
    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

/// Gate for the `/admin` surface. Must run after [`authenticate`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    let principal = req
        .extensions()
        .get::<AuthenticatedUser>()
        .map(AuthenticatedUser::principal)
        .ok_or_else(|| not_authenticated().into_response())?;

    if !can(&principal, Action::Read, Resource::AdminConsole) {
        tracing::warn!(principal = %principal.id, "Non-admin request to admin surface");
        return Err(
            ApiError::Forbidden("Administrator privileges required".to_string()).into_response(),
        );
    }

    Ok(next.run(req).await)
}

fn not_authenticated() -> ApiError {
    ApiError::Unauthorized("Not authenticated".to_string())
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| not_authenticated().into_response())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| not_authenticated().into_response())?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| not_authenticated().into_response())
}
