#![allow(dead_code)]

use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::web;
use sea_orm::ConnectOptions;
use tempfile::TempDir;

use quillpress::config::{EnvConfig, MailConfig};
use quillpress::context::AppContext;
use quillpress::db::service::DatabaseService;
use quillpress::utils::flash::Flash;

pub mod client;

pub struct TestContext {
    pub ctx: web::Data<AppContext>,
    _static_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> TestContext {
        let static_dir = tempfile::tempdir().expect("Failed to create static dir");

        // in-memory sqlite exercises the same SeaORM code paths as postgres;
        // one connection so every query sees the same database
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = DatabaseService::connect(options)
            .await
            .expect("Failed to initialize database");

        let config = test_config(static_dir.path().to_str().expect("non-utf8 temp path"));
        let ctx = AppContext::assemble(config, db).expect("Failed to assemble context");

        TestContext {
            ctx: web::Data::new(ctx),
            _static_dir: static_dir,
        }
    }
}

pub fn test_config(static_dir: &str) -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "sqlite::memory:".to_string(),
        secret_key: "test-secret".to_string(),
        base_url: "http://localhost:8080".to_string(),
        static_dir: static_dir.to_string(),
        templates_dir: format!("{}/templates", env!("CARGO_MANIFEST_DIR")),
        mail: MailConfig {
            api_key: "test".to_string(),
            // nothing listens here; dispatch failures are logged and swallowed
            endpoint: "http://127.0.0.1:9/emails".to_string(),
            sender: "noreply@test.local".to_string(),
        },
    }
}

pub fn location_of<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn flash_of<B>(resp: &ServiceResponse<B>) -> Option<Flash> {
    let cookie = resp.response().cookies().find(|c| c.name() == "flash")?;
    let decoded = urlencoding::decode(cookie.value()).ok()?;
    serde_json::from_str(&decoded).ok()
}

pub fn session_cookie_of<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.value().to_string())
}

/// Hand-rolled multipart body for the account form.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

// Test data helpers
pub mod test_data {
    use quillpress::types::forms::RegisterForm;

    pub fn sample_registration() -> RegisterForm {
        RegisterForm {
            username: "corey".to_string(),
            email: "corey@example.com".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        }
    }

    pub fn registration_for(username: &str, email: &str) -> RegisterForm {
        RegisterForm {
            username: username.to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        }
    }
}
