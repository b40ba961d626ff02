use std::path::Path;

use actix_web::{HttpRequest, HttpResponse};
use tera::Tera;

use crate::config::EnvConfig;
use crate::db::service::DatabaseService;
use crate::types::error::AppError;
use crate::utils::flash;
use crate::utils::mail::Mailer;
use crate::utils::session::SessionManager;
use crate::utils::token::ResetTokenSigner;
use crate::utils::upload::UploadStore;

/// Everything a handler needs, constructed once in `main` and shared through
/// `web::Data`. No process-wide statics.
pub struct AppContext {
    pub config: EnvConfig,
    pub db: DatabaseService,
    pub templates: Tera,
    pub sessions: SessionManager,
    pub reset_tokens: ResetTokenSigner,
    pub mailer: Mailer,
    pub uploads: UploadStore,
}

impl AppContext {
    pub async fn build(config: EnvConfig) -> Result<Self, AppError> {
        let db = DatabaseService::new(&config.db_url).await?;
        Self::assemble(config, db)
    }

    /// Wires the services around an already-connected database. Split out so
    /// tests can hand in an in-memory connection.
    pub fn assemble(config: EnvConfig, db: DatabaseService) -> Result<Self, AppError> {
        let templates = Tera::new(&format!("{}/**/*.html", config.templates_dir))?;
        let sessions = SessionManager::new(&config.secret_key);
        let reset_tokens = ResetTokenSigner::new(&config.secret_key);
        let mailer = Mailer::new(&config.mail)?;
        let uploads = UploadStore::new(Path::new(&config.static_dir).join("profile_pics"))?;

        Ok(AppContext {
            config,
            db,
            templates,
            sessions,
            reset_tokens,
            mailer,
            uploads,
        })
    }

    /// The session's user, if the cookie checks out and the row still
    /// exists. For pages that merely adapt to a login rather than require
    /// one.
    pub async fn current_user(&self, req: &HttpRequest) -> Option<entity::user::Model> {
        let user_id = self.sessions.user_id(req)?;
        self.db.get_user_by_id(&user_id).await.ok()
    }

    /// Renders a template with the ambient bits every page expects: the
    /// pending flash message (consumed here) and a `current_user` slot.
    pub fn render(
        &self,
        req: &HttpRequest,
        template: &str,
        mut context: tera::Context,
    ) -> Result<HttpResponse, AppError> {
        if context.get("current_user").is_none() {
            context.insert("current_user", &Option::<entity::user::Model>::None);
        }
        if context.get("errors").is_none() {
            context.insert("errors", &Vec::<String>::new());
        }
        let pending = flash::take(req);
        context.insert("flash", &pending);

        let body = self.templates.render(template, &context)?;
        let mut response = HttpResponse::Ok();
        response.content_type("text/html; charset=utf-8");
        if pending.is_some() {
            response.cookie(flash::removal());
        }
        Ok(response.body(body))
    }
}
