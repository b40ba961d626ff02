use actix_web::{get, http::header, web, HttpResponse};

use crate::context::AppContext;
use crate::utils::flash;

/// Unconditional and idempotent: there is no server-side state to tear
/// down, only the cookie to drop.
#[get("/logout")]
pub async fn logout(ctx: web::Data<AppContext>) -> HttpResponse {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, "/"));
    builder.cookie(ctx.sessions.clear());
    builder.cookie(flash::cookie("success", "You have been logged out."));
    builder.finish()
}
