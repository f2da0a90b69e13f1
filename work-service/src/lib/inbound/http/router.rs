use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authentication::register::register;
use super::handlers::authentication::token::token;
use super::handlers::health::health;
use super::handlers::users::create_user::create_user;
use super::handlers::users::delete_user::delete_user;
use super::handlers::users::get_me::get_me;
use super::handlers::users::get_user::get_user;
use super::handlers::users::list_users::list_users;
use super::handlers::users::update_me::update_me;
use super::handlers::users::update_user::update_user;
use super::handlers::works::create_work::admin_create_work;
use super::handlers::works::create_work::create_work;
use super::handlers::works::delete_work::admin_delete_work;
use super::handlers::works::delete_work::delete_work;
use super::handlers::works::get_work::get_work;
use super::handlers::works::list_works::admin_list_works;
use super::handlers::works::list_works::list_works;
use super::handlers::works::update_work::update_work;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::authentication::ports::AuthServicePort;
use crate::user::ports::UserServicePort;
use crate::work::ports::WorkServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub work_service: Arc<dyn WorkServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    work_service: Arc<dyn WorkServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        work_service,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/token", post(token));

    let admin_routes = Router::new()
        .route("/admin/users", get(list_users).post(create_user))
        .route(
            "/admin/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/admin/works", get(admin_list_works).post(admin_create_work))
        .route(
            "/admin/works/:work_id",
            get(get_work).put(update_work).delete(admin_delete_work),
        )
        .route_layer(middleware::from_fn(require_admin));

    let protected_routes = Router::new()
        .route("/users/me", get(get_me).put(update_me))
        .route("/works", get(list_works).post(create_work))
        .route(
            "/works/:work_id",
            get(get_work).put(update_work).delete(delete_work),
        )
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
