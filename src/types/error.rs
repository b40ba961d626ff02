use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::utils::flash;

#[derive(Debug, Error)]
pub enum AppError {
    // standard web stuffs
    #[error("already exists")]
    AlreadyExists,
    #[error("not found")]
    NotFound,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("login required")]
    AuthRequired { next: String },

    // infra things
    #[error(transparent)]
    Db(DbErr),
    #[error(transparent)]
    Template(#[from] tera::Error),
    #[error("mail error: {0}")]
    Mail(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::from_db(e)
    }
}

impl AppError {
    fn from_db(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(_) => AppError::NotFound,
            _ => AppError::Db(err),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::NotFound => "Page Not Found",
            Self::AlreadyExists | Self::Validation(_) | Self::BadRequest(_) => "Bad Request",
            Self::AuthRequired { .. } => "Login Required",
            Self::Db(_) | Self::Template(_) | Self::Mail(_) | Self::Internal(_) => {
                "Something Went Wrong"
            }
        }
    }
}

// Every surfaced failure is an HTML page or a redirect; the auth negative is
// always a redirect back through the login form with the original target
// preserved.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::AuthRequired { .. } => StatusCode::SEE_OTHER,
            Self::Db(_) | Self::Template(_) | Self::Mail(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::AuthRequired { next } => {
                let location = format!("/login?next={}", urlencoding::encode(next));
                HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, location))
                    .cookie(flash::cookie("info", "Please log in to access this page."))
                    .finish()
            }
            _ => {
                let status = self.status_code();
                HttpResponse::build(status)
                    .content_type("text/html; charset=utf-8")
                    .body(error_page(status, self.title()))
            }
        }
    }
}

fn error_page(status: StatusCode, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{code} {title}</title></head>\n\
         <body><h1>{code} {title}</h1><p><a href=\"/\">Back to the home page</a></p></body>\n</html>\n",
        code = status.as_u16(),
        title = title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_folds_into_not_found() {
        let err: AppError = DbErr::RecordNotFound("user does not exist".into()).into();
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_required_redirects_through_login() {
        let err = AppError::AuthRequired {
            next: "/account".into(),
        };
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(location, "/login?next=%2Faccount");
    }
}
