use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::AppContext;
use crate::types::error::AppError;

pub const SESSION_COOKIE: &str = "session";

const AUDIENCE: &str = "session";
const REMEMBER_DAYS: i64 = 30;
const DEFAULT_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: Uuid,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Stateless session tracking: a signed claim in an HttpOnly cookie. There
/// is nothing to look up or clean up server-side; logout just drops the
/// cookie.
#[derive(Clone)]
pub struct SessionManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionManager {
    pub fn new(secret: &str) -> Self {
        SessionManager {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// A remembered session survives browser restarts for thirty days;
    /// otherwise the cookie dies with the browser and the claim after
    /// twelve hours, whichever comes first.
    pub fn issue(&self, user_id: Uuid, remember: bool) -> Result<Cookie<'static>, AppError> {
        let now = Utc::now();
        let ttl = if remember {
            Duration::days(REMEMBER_DAYS)
        } else {
            Duration::hours(DEFAULT_HOURS)
        };
        let claims = SessionClaims {
            sub: user_id,
            aud: AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("session signing failed: {e}")))?;

        let mut builder = Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        if remember {
            builder = builder.max_age(CookieDuration::days(REMEMBER_DAYS));
        }
        Ok(builder.finish())
    }

    /// Fails closed on a missing cookie, bad signature, wrong audience or
    /// elapsed expiry.
    pub fn user_id(&self, req: &HttpRequest) -> Option<Uuid> {
        let cookie = req.cookie(SESSION_COOKIE)?;
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[AUDIENCE]);
        decode::<SessionClaims>(cookie.value(), &self.decoding, &validation)
            .ok()
            .map(|data| data.claims.sub)
    }

    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// Extractor for pages that require a login. Resolves the session cookie to
/// a full user row; anything short of that bounces the request to the login
/// form with the original path captured in `next`.
pub struct AuthedUser(pub entity::user::Model);

impl FromRequest for AuthedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let ctx = req
                .app_data::<web::Data<AppContext>>()
                .ok_or_else(|| AppError::Internal("application context not configured".into()))?;
            let user_id = ctx.sessions.user_id(&req).ok_or_else(|| AppError::AuthRequired {
                next: req.path().to_string(),
            })?;
            match ctx.db.get_user_by_id(&user_id).await {
                Ok(user) => Ok(AuthedUser(user)),
                // a stale claim for a row that no longer exists
                Err(_) => Err(AppError::AuthRequired {
                    next: req.path().to_string(),
                }),
            }
        })
    }
}
