use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use tera::Context;

use crate::context::AppContext;
use crate::types::error::AppError;
use crate::types::forms::{validate_email, validate_username};
use crate::utils::session::AuthedUser;
use crate::utils::webutils::flash_redirect;

#[derive(MultipartForm)]
pub struct AccountForm {
    pub username: Text<String>,
    pub email: Text<String>,
    #[multipart(limit = "5MB")]
    pub picture: Option<TempFile>,
}

#[get("")]
pub async fn page(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    user: AuthedUser,
) -> Result<HttpResponse, AppError> {
    let AuthedUser(user) = user;
    render_form(&ctx, &req, &user, &user.username, &user.email, &[])
}

#[post("")]
pub async fn submit(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    user: AuthedUser,
    form: MultipartForm<AccountForm>,
) -> Result<HttpResponse, AppError> {
    let AuthedUser(user) = user;
    let AccountForm {
        username,
        email,
        picture,
    } = form.into_inner();
    let username = username.into_inner();
    let email = email.into_inner();

    let mut errors = validate_username(&username);
    errors.extend(validate_email(&email));

    // an empty file part means the field was left blank
    let picture = picture.filter(|p| p.size > 0);
    let mut image_file = None;
    if errors.is_empty() {
        if let Some(picture) = &picture {
            match ctx.uploads.save_picture(picture) {
                Ok(filename) => image_file = Some(filename),
                Err(AppError::Validation(message)) => errors.push(message),
                Err(e) => return Err(e),
            }
        }
    }

    if errors.is_empty() {
        match ctx
            .db
            .update_profile(user.id, username.clone(), email.clone(), image_file)
            .await
        {
            Ok(()) => {
                return Ok(flash_redirect(
                    "/account",
                    "success",
                    "Your account has been updated!",
                ))
            }
            Err(AppError::AlreadyExists) => {
                errors.push("That username or email is already in use.".to_string());
            }
            Err(e) => return Err(e),
        }
    }

    render_form(&ctx, &req, &user, &username, &email, &errors)
}

fn render_form(
    ctx: &AppContext,
    req: &HttpRequest,
    user: &entity::user::Model,
    username: &str,
    email: &str,
    errors: &[String],
) -> Result<HttpResponse, AppError> {
    let mut tctx = Context::new();
    tctx.insert("title", "Account");
    tctx.insert("current_user", user);
    tctx.insert("username", username);
    tctx.insert("email", email);
    tctx.insert(
        "image_url",
        &format!("/static/profile_pics/{}", user.image_file),
    );
    tctx.insert("errors", errors);
    ctx.render(req, "account.html", tctx)
}
