#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use work_service::authentication::service::AuthService;
use work_service::domain::user::models::BootstrapAdmin;
use work_service::domain::user::models::Contact;
use work_service::domain::user::models::EmployeeNumber;
use work_service::domain::user::models::PersonName;
use work_service::inbound::http::router::create_router;
use work_service::outbound::repositories::InMemoryStore;
use work_service::user::ports::UserServicePort;
use work_service::user::service::UserService;
use work_service::work::service::WorkService;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMPLOYEE_NUMBER: &str = "00admin";
pub const ADMIN_PASSWORD: &str = "gestor";

/// Throwaway PostgreSQL database with migrations applied.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a fresh database on the server named by `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is not set, so callers can skip.
    pub async fn new() -> Option<Self> {
        let admin_url = std::env::var("DATABASE_URL").ok()?;
        let db_name = format!(
            "test_work_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;
                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::new());
        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            chrono::Duration::minutes(30),
        ));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&store),
            Arc::clone(&authenticator),
        ));
        user_service
            .ensure_admin(BootstrapAdmin {
                employee_number: EmployeeNumber::new(ADMIN_EMPLOYEE_NUMBER.to_string()).unwrap(),
                first_name: PersonName::new("Gestor".to_string()).unwrap(),
                last_name: PersonName::new("Sistema".to_string()).unwrap(),
                contact: Contact::new("gestor@sistema.com".to_string()).unwrap(),
                password: ADMIN_PASSWORD.to_string(),
            })
            .await
            .expect("Failed to bootstrap admin");

        let router = create_router(
            Arc::new(AuthService::new(Arc::clone(&store), authenticator)),
            user_service,
            Arc::new(WorkService::new(store)),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return its public view.
    pub async fn register(&self, employee_number: &str, password: &str) -> Value {
        let response = self
            .post("/auth/register")
            .json(&json!({
                "employee_number": employee_number,
                "first_name": "Test",
                "last_name": "User",
                "contact": format!("{}@example.com", employee_number.to_lowercase()),
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Exchange credentials for the raw token response.
    pub async fn login(&self, employee_number: &str, password: &str) -> reqwest::Response {
        self.post("/auth/token")
            .form(&[("username", employee_number), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the bearer token, asserting success.
    pub async fn token(&self, employee_number: &str, password: &str) -> String {
        let response = self.login(employee_number, password).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token(ADMIN_EMPLOYEE_NUMBER, ADMIN_PASSWORD).await
    }

    /// Register and log in, returning `(user view, token)`.
    pub async fn user_with_token(&self, employee_number: &str, password: &str) -> (Value, String) {
        let user = self.register(employee_number, password).await;
        let token = self.token(employee_number, password).await;
        (user, token)
    }

    /// Create a work through `/works` and return its view.
    pub async fn create_work(&self, token: &str, work_number: &str) -> Value {
        let response = self
            .post_authenticated("/works", token)
            .json(&json!({
                "work_number": work_number,
                "title": format!("Work {}", work_number),
                "description": "Integration test work"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}
