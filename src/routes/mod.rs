use actix_web::web;

pub mod health;
pub mod home;
pub mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home);
    cfg.service(health::health);
    cfg.service(user::logout::logout);
    cfg.service(
        web::scope("/register")
            .service(user::register::page)
            .service(user::register::submit),
    );
    cfg.service(
        web::scope("/login")
            .service(user::login::page)
            .service(user::login::submit),
    );
    cfg.service(
        web::scope("/account")
            .service(user::account::page)
            .service(user::account::submit),
    );
    cfg.service(web::scope("/user").service(user::posts::listing));
    cfg.service(
        web::scope("/reset_password")
            .service(user::reset::request_page)
            .service(user::reset::request_submit)
            .service(user::reset::token_page)
            .service(user::reset::token_submit),
    );
}
