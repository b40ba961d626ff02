use actix_web::{http::header, HttpResponse};

use crate::utils::flash;

/// Sanitizes a post-login redirect target. Only same-site relative paths
/// survive; absolute URLs, protocol-relative tricks and backslash variants
/// are all dropped.
pub fn safe_next(input: &str) -> Option<String> {
    let decoded = urlencoding::decode(input).ok()?.into_owned();
    if decoded.starts_with('/') && !decoded.starts_with("//") && !decoded.contains('\\') {
        Some(decoded)
    } else {
        None
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

pub fn flash_redirect(location: &str, level: &str, message: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .cookie(flash::cookie(level, message))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_pass() {
        assert_eq!(safe_next("/account"), Some("/account".to_string()));
        assert_eq!(
            safe_next("%2Fuser%2Fcorey%3Fpage%3D2"),
            Some("/user/corey?page=2".to_string())
        );
    }

    #[test]
    fn offsite_targets_are_dropped() {
        assert_eq!(safe_next("https://evil.example"), None);
        assert_eq!(safe_next("//evil.example"), None);
        assert_eq!(safe_next("%2F%2Fevil.example"), None);
        assert_eq!(safe_next("/\\evil.example"), None);
        assert_eq!(safe_next("account"), None);
    }
}
