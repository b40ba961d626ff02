use actix_files::Files;
use actix_web::{web, App, HttpServer};

use quillpress::config::EnvConfig;
use quillpress::context::AppContext;
use quillpress::routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);
    let static_dir = config.static_dir.clone();

    let context = AppContext::build(config)
        .await
        .expect("Failed to initialize application context");
    let context = web::Data::new(context);

    tracing::info!("starting server on {addr}");

    HttpServer::new(move || {
        App::new()
            .app_data(context.clone())
            .service(Files::new("/static", static_dir.clone()))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
