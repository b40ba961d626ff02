use actix_web::{get, web, HttpRequest, HttpResponse};
use tera::Context;

use crate::context::AppContext;
use crate::types::error::AppError;
use crate::types::page::PageQuery;

/// Public listing of one author's posts, newest first, five per page.
/// Unknown usernames are a plain 404.
#[get("/{username}")]
pub async fn listing(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    let author = ctx.db.get_user_by_username(&username).await?;
    let posts = ctx.db.posts_by_author(&author, query.number()).await?;

    let mut tctx = Context::new();
    tctx.insert("title", "User Posts");
    tctx.insert("author", &author);
    tctx.insert("posts", &posts);
    if let Some(viewer) = ctx.current_user(&req).await {
        tctx.insert("current_user", &viewer);
    }
    ctx.render(&req, "user_posts.html", tctx)
}
