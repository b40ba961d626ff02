use actix_web::cookie::Cookie;
use actix_web::{web, App};
use uuid::Uuid;

use quillpress::context::AppContext;
use quillpress::db::user::NewUser;
use quillpress::utils::password;

pub struct TestClient {
    pub ctx: web::Data<AppContext>,
}

impl TestClient {
    pub fn new(ctx: web::Data<AppContext>) -> Self {
        TestClient { ctx }
    }

    #[allow(dead_code)]
    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.ctx.clone())
            .configure(quillpress::routes::configure_routes)
    }

    #[allow(dead_code)]
    pub async fn create_test_user(&self, username: &str, email: &str, plaintext: &str) -> Uuid {
        let digest = password::hash(plaintext).expect("Failed to hash password");
        self.ctx
            .db
            .create_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: digest,
            })
            .await
            .expect("Failed to create user")
    }

    #[allow(dead_code)]
    pub fn session_cookie(&self, user_id: Uuid) -> Cookie<'static> {
        self.ctx
            .sessions
            .issue(user_id, false)
            .expect("Failed to issue session cookie")
    }
}
