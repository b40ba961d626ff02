use actix_web::{get, post, web, HttpRequest, HttpResponse};
use tera::Context;
use tracing::warn;
use uuid::Uuid;

use crate::context::AppContext;
use crate::types::error::AppError;
use crate::types::forms::{RequestResetForm, ResetPasswordForm};
use crate::utils::password;
use crate::utils::webutils::{flash_redirect, redirect};

const INVALID_TOKEN_MESSAGE: &str = "That is an invalid or expired token.";

// Shown whether or not the address matched; account existence is not
// something this flow may reveal.
const REQUEST_SENT_MESSAGE: &str =
    "An email has been sent with instructions to reset your password.";

#[get("")]
pub async fn request_page(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    if ctx.sessions.user_id(&req).is_some() {
        return Ok(redirect("/"));
    }
    render_request_form(&ctx, &req, &RequestResetForm::default(), &[])
}

#[post("")]
pub async fn request_submit(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    form: web::Form<RequestResetForm>,
) -> Result<HttpResponse, AppError> {
    if ctx.sessions.user_id(&req).is_some() {
        return Ok(redirect("/"));
    }

    let form = form.into_inner();
    let errors = form.validate();
    if !errors.is_empty() {
        return render_request_form(&ctx, &req, &form, &errors);
    }

    let user = ctx.db.find_user_by_email(&form.email).await?;

    // Token issuance happens on both paths so the lookup outcome does not
    // shift the response timing; the mail leaves on a detached task for the
    // same reason.
    let token = ctx
        .reset_tokens
        .issue(user.as_ref().map(|u| u.id).unwrap_or_else(Uuid::new_v4))?;

    if let Some(user) = user {
        let link = format!("{}/reset_password/{}", ctx.config.base_url, token);
        let mailer = ctx.mailer.clone();
        let to = user.email.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_password_reset(&to, &link).await {
                warn!("password reset mail failed: {e}");
            }
        });
    }

    Ok(flash_redirect("/login", "info", REQUEST_SENT_MESSAGE))
}

#[get("/{token}")]
pub async fn token_page(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    if ctx.sessions.user_id(&req).is_some() {
        return Ok(redirect("/"));
    }
    if resolve_token(&ctx, &path).await.is_none() {
        return Ok(invalid_token_redirect());
    }
    render_reset_form(&ctx, &req, &[])
}

#[post("/{token}")]
pub async fn token_submit(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    form: web::Form<ResetPasswordForm>,
) -> Result<HttpResponse, AppError> {
    if ctx.sessions.user_id(&req).is_some() {
        return Ok(redirect("/"));
    }
    let Some(user_id) = resolve_token(&ctx, &path).await else {
        return Ok(invalid_token_redirect());
    };

    let form = form.into_inner();
    let errors = form.validate();
    if !errors.is_empty() {
        return render_reset_form(&ctx, &req, &errors);
    }

    let digest = password::hash(&form.password)?;
    ctx.db.set_password(user_id, digest).await?;

    Ok(flash_redirect(
        "/login",
        "success",
        "Your password has been updated! You can now log in.",
    ))
}

/// A token is only good if its signature, audience and expiry check out AND
/// the user it names still exists.
async fn resolve_token(ctx: &AppContext, token: &str) -> Option<Uuid> {
    let user_id = ctx.reset_tokens.verify(token)?;
    ctx.db.get_user_by_id(&user_id).await.ok()?;
    Some(user_id)
}

fn invalid_token_redirect() -> HttpResponse {
    flash_redirect("/reset_password", "warning", INVALID_TOKEN_MESSAGE)
}

fn render_request_form(
    ctx: &AppContext,
    req: &HttpRequest,
    form: &RequestResetForm,
    errors: &[String],
) -> Result<HttpResponse, AppError> {
    let mut tctx = Context::new();
    tctx.insert("title", "Reset Password");
    tctx.insert("form", form);
    tctx.insert("errors", errors);
    ctx.render(req, "reset_request.html", tctx)
}

fn render_reset_form(
    ctx: &AppContext,
    req: &HttpRequest,
    errors: &[String],
) -> Result<HttpResponse, AppError> {
    let mut tctx = Context::new();
    tctx.insert("title", "Reset Password");
    tctx.insert("errors", errors);
    ctx.render(req, "reset_token.html", tctx)
}
