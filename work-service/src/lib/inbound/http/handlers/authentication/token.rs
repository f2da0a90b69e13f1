use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FormBody;
use crate::inbound::http::router::AppState;

/// OAuth2 password-grant style form. The employee number may be sent as
/// `username` or `identifier`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    #[serde(alias = "identifier")]
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

pub async fn token(
    State(state): State<AppState>,
    FormBody(form): FormBody<TokenRequest>,
) -> Result<ApiSuccess<TokenResponse>, ApiError> {
    let token = state
        .auth_service
        .login(&form.username, &form.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponse {
            access_token: token.access_token,
            token_type: "bearer",
            expires_in: token.expires_in,
        },
    ))
}
