use actix_web::{get, web, HttpRequest, HttpResponse};
use tera::Context;

use crate::context::AppContext;
use crate::types::error::AppError;
use crate::types::page::PageQuery;

#[get("/")]
pub async fn home(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let posts = ctx.db.recent_posts(query.number()).await?;

    let mut tctx = Context::new();
    tctx.insert("title", "Home");
    tctx.insert("posts", &posts);
    if let Some(viewer) = ctx.current_user(&req).await {
        tctx.insert("current_user", &viewer);
    }
    ctx.render(&req, "home.html", tctx)
}
