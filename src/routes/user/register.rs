use actix_web::{get, post, web, HttpRequest, HttpResponse};
use tera::Context;

use crate::context::AppContext;
use crate::db::user::NewUser;
use crate::types::error::AppError;
use crate::types::forms::RegisterForm;
use crate::utils::password;
use crate::utils::webutils::{flash_redirect, redirect};

#[get("")]
pub async fn page(req: HttpRequest, ctx: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    if ctx.sessions.user_id(&req).is_some() {
        return Ok(redirect("/"));
    }
    render_form(&ctx, &req, &RegisterForm::default(), &[])
}

#[post("")]
pub async fn submit(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    if ctx.sessions.user_id(&req).is_some() {
        return Ok(redirect("/"));
    }

    let form = form.into_inner();
    let mut errors = form.validate();
    if errors.is_empty() {
        if ctx.db.username_taken(&form.username).await? {
            errors.push("That username is taken. Please choose a different one.".to_string());
        }
        if ctx.db.email_taken(&form.email).await? {
            errors.push("That email is taken. Please choose a different one.".to_string());
        }
    }
    if !errors.is_empty() {
        return render_form(&ctx, &req, &form, &errors);
    }

    let digest = password::hash(&form.password)?;
    match ctx
        .db
        .create_user(NewUser {
            username: form.username.clone(),
            email: form.email.clone(),
            password_hash: digest,
        })
        .await
    {
        Ok(_) => {}
        // lost the race inside the transaction
        Err(AppError::AlreadyExists) => {
            let errors = vec!["That username or email is taken.".to_string()];
            return render_form(&ctx, &req, &form, &errors);
        }
        Err(e) => return Err(e),
    }

    Ok(flash_redirect(
        "/login",
        "success",
        &format!("Account created for {}! You can now log in.", form.username),
    ))
}

fn render_form(
    ctx: &AppContext,
    req: &HttpRequest,
    form: &RegisterForm,
    errors: &[String],
) -> Result<HttpResponse, AppError> {
    let mut tctx = Context::new();
    tctx.insert("title", "Registration");
    tctx.insert("form", form);
    tctx.insert("errors", errors);
    ctx.render(req, "register.html", tctx)
}
