use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::authentication::errors::AuthError;
use crate::domain::pagination::Pagination;
use crate::user::errors::UserError;
use crate::work::errors::WorkError;

pub mod authentication;
pub mod health;
pub mod users;
pub mod works;

/// Successful response: status code plus the JSON payload as-is.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }

    pub fn status(&self) -> StatusCode {
        self.0
    }

    pub fn data(&self) -> &T {
        &self.1 .0
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// JSON body extractor whose rejections render as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// URL-encoded form extractor whose rejections render as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct FormBody<T>(pub T);

/// Body of delete confirmations on the admin surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `?skip=&limit=` on list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Pagination::new(params.skip, params.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity {
        message: String,
        field: Option<String>,
    },
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn validation(message: String, field: Option<&'static str>) -> Self {
        ApiError::UnprocessableEntity {
            message,
            field: field.map(str::to_string),
        }
    }

    fn rejected_body(status: StatusCode, message: String) -> Self {
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let field = missing_field(&message);
            ApiError::UnprocessableEntity { message, field }
        } else {
            ApiError::BadRequest(message)
        }
    }

    fn internal(err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "Request failed with internal error");
        ApiError::InternalServerError("Internal server error".to_string())
    }
}

/// Name of the field in a serde "missing field `name`" message.
fn missing_field(message: &str) -> Option<String> {
    let (_, rest) = message.split_once("missing field `")?;
    let (field, _) = rest.split_once('`')?;
    Some(field.to_string())
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected_body(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::rejected_body(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, field) = match self {
            ApiError::UnprocessableEntity { message, field } => (message, field),
            ApiError::InternalServerError(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg) => (msg, None),
        };

        let mut response = (
            status,
            Json(ApiErrorBody {
                status_code: status.as_u16(),
                message,
                field,
            }),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        let field = err.field();
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmployeeNumberAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            UserError::CannotDeleteSelf | UserError::CannotDemoteSelf => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::InvalidUserId(_)
            | UserError::InvalidEmployeeNumber(_)
            | UserError::InvalidFirstName(_)
            | UserError::InvalidLastName(_)
            | UserError::InvalidContact(_)
            | UserError::Password(auth::PasswordError::EmptyPassword) => {
                ApiError::validation(err.to_string(), field)
            }
            UserError::Password(_) | UserError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<WorkError> for ApiError {
    fn from(err: WorkError) -> Self {
        let field = err.field();
        match err {
            WorkError::NotFound(_) => ApiError::NotFound(err.to_string()),
            WorkError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            WorkError::WorkNumberAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            WorkError::InvalidWorkId(_)
            | WorkError::InvalidWorkNumber(_)
            | WorkError::InvalidTitle(_)
            | WorkError::InvalidStatus(_)
            | WorkError::OwnerNotFound(_) => ApiError::validation(err.to_string(), field),
            WorkError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::InactiveUser => ApiError::BadRequest(err.to_string()),
            AuthError::TokenIssuance(_) => ApiError::internal(err),
            AuthError::User(e) => e.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
