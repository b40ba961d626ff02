use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tera::Context;

use crate::context::AppContext;
use crate::types::error::AppError;
use crate::types::forms::LoginForm;
use crate::utils::webutils::{redirect, safe_next};
use crate::utils::{flash, password};

// One message for both failure modes; whether the email exists is not
// something the response may reveal.
const FAILURE_MESSAGE: &str = "Login unsuccessful. Please check email and password.";

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[get("")]
pub async fn page(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    query: web::Query<NextQuery>,
) -> Result<HttpResponse, AppError> {
    if ctx.sessions.user_id(&req).is_some() {
        return Ok(redirect("/"));
    }
    render_form(&ctx, &req, &LoginForm::default(), query.next.as_deref(), &[])
}

#[post("")]
pub async fn submit(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    if ctx.sessions.user_id(&req).is_some() {
        return Ok(redirect("/"));
    }

    let form = form.into_inner();
    let user = ctx.db.find_user_by_email(&form.email).await?;
    let verified = match &user {
        Some(user) => password::verify(&user.password_hash, &form.password),
        None => {
            // cost-equivalent work so a missing account is not observable
            // through response timing
            let _ = password::hash(&form.password);
            false
        }
    };

    if let (Some(user), true) = (user, verified) {
        let cookie = ctx.sessions.issue(user.id, form.remember())?;
        let target = query
            .next
            .as_deref()
            .and_then(safe_next)
            .unwrap_or_else(|| "/".to_string());

        let mut builder = HttpResponse::SeeOther();
        builder.insert_header((header::LOCATION, target));
        builder.cookie(cookie);
        builder.cookie(flash::cookie(
            "success",
            &format!("Login successful. Welcome {}!", user.username),
        ));
        return Ok(builder.finish());
    }

    let errors = vec![FAILURE_MESSAGE.to_string()];
    render_form(&ctx, &req, &form, query.next.as_deref(), &errors)
}

fn render_form(
    ctx: &AppContext,
    req: &HttpRequest,
    form: &LoginForm,
    next: Option<&str>,
    errors: &[String],
) -> Result<HttpResponse, AppError> {
    let mut tctx = Context::new();
    tctx.insert("title", "Login");
    tctx.insert("form", form);
    tctx.insert("next", &next);
    tctx.insert("errors", errors);
    ctx.render(req, "login.html", tctx)
}
