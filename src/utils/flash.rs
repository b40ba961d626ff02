//! One-shot notices carried across a redirect in a cookie. The render
//! helper reads the cookie into the template context and queues its removal
//! so a message is shown exactly once.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: String,
    pub message: String,
}

pub fn cookie(level: &str, message: &str) -> Cookie<'static> {
    let payload = serde_json::to_string(&Flash {
        level: level.to_string(),
        message: message.to_string(),
    })
    .unwrap_or_default();
    Cookie::build(FLASH_COOKIE, urlencoding::encode(&payload).into_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn take(req: &HttpRequest) -> Option<Flash> {
    let raw = req.cookie(FLASH_COOKIE)?;
    let decoded = urlencoding::decode(raw.value()).ok()?;
    serde_json::from_str(&decoded).ok()
}

pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn roundtrip_through_cookie() {
        let set = cookie("success", "Account created for corey! You can now log in.");
        let req = TestRequest::default().cookie(set).to_http_request();
        let flash = take(&req).expect("flash missing");
        assert_eq!(flash.level, "success");
        assert_eq!(
            flash.message,
            "Account created for corey! You can now log in."
        );
    }

    #[test]
    fn absent_or_mangled_cookie_is_none() {
        let req = TestRequest::default().to_http_request();
        assert!(take(&req).is_none());

        let mangled = Cookie::build(FLASH_COOKIE, "%7Bnope").finish();
        let req = TestRequest::default().cookie(mangled).to_http_request();
        assert!(take(&req).is_none());
    }
}
