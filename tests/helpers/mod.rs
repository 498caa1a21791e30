#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use rollcall::config::{
    Config, DatabaseConfig, IdentityConfig, ObservabilityConfig, ServerConfig,
};
use rollcall_attendance::ActivityPolicy;
use rollcall_shared::{FixedClock, Identity, Role, State};
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;

/// 2026-01-25 18:00 UTC
pub const NOW: i64 = 1_769_364_000;
pub const HOUR: i64 = 3600;

pub struct TestApp {
    pub router: Router,
    pub state: State,
    pub clock: FixedClock,
    pub config: Config,
    _dir: TempDir,
}

pub fn test_config(url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
            request_timeout_secs: 10,
        },
        database: DatabaseConfig {
            url,
            max_connections: 4,
            acquire_timeout_secs: 5,
            busy_timeout_ms: 5000,
        },
        identity: IdentityConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            issuer: "rollcall-auth".to_owned(),
            audience: "rollcall".to_owned(),
        },
        activity: ActivityPolicy::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let config = test_config(format!("sqlite:{}", dir.child("rollcall.db").display()));

    let write_pool = rollcall::create_write_pool(&config.database).await?;
    rollcall::db::run_migrations(&write_pool).await?;
    let read_pool = rollcall::create_read_pool(&config.database).await?;

    let clock = FixedClock::new(NOW);
    let state = State::new(read_pool, write_pool).with_clock(clock.clone());
    let router = rollcall::router(rollcall::AppState::new(config.clone(), state.clone()));

    Ok(TestApp {
        router,
        state,
        clock,
        config,
        _dir: dir,
    })
}

impl TestApp {
    pub fn token(&self, email: &str, name: Option<&str>) -> String {
        rollcall::auth::generate_token(&self.config.identity, email, name, 3600)
            .expect("token")
    }

    /// Registers an officer member and returns a token for them.
    pub async fn officer(&self, email: &str) -> anyhow::Result<String> {
        rollcall_member::Command(self.state.clone())
            .register(&Identity::new(email, Some("Officer".to_owned())), Role::Officer)
            .await?;

        Ok(self.token(email, Some("Officer")))
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, value))
    }

    /// Creates an event with a check-in window through the officer API.
    pub async fn create_event(
        &self,
        officer_token: &str,
        title: &str,
        code: &str,
        opens_at: i64,
        closes_at: i64,
    ) -> anyhow::Result<String> {
        let (status, body) = self
            .request(
                Method::POST,
                "/events",
                Some(officer_token),
                Some(serde_json::json!({
                    "title": title,
                    "accessCode": code,
                    "opensAt": opens_at,
                    "closesAt": closes_at,
                })),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        Ok(body["id"].as_str().unwrap_or_default().to_owned())
    }

    pub async fn check_in(
        &self,
        token: &str,
        event_id: &str,
        code: &str,
    ) -> anyhow::Result<(StatusCode, Value)> {
        self.request(
            Method::POST,
            "/events/check-in",
            Some(token),
            Some(serde_json::json!({ "eventId": event_id, "accessCode": code })),
        )
        .await
    }
}
