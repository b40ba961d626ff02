use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::AppError;

pub const RESET_TOKEN_TTL_MINUTES: i64 = 30;

// Reset tokens and session cookies share the server secret; the audience
// claim keeps one from ever passing as the other.
const AUDIENCE: &str = "password-reset";

#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    sub: Uuid,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Signs and checks self-contained password-reset tokens. Pure over the
/// secret: nothing is stored server-side and there is no revocation list.
pub struct ResetTokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl ResetTokenSigner {
    pub fn new(secret: &str) -> Self {
        ResetTokenSigner {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now())
    }

    /// The issue instant is embedded in the token and expiry is measured
    /// from it.
    pub fn issue_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let claims = ResetClaims {
            sub: user_id,
            aud: AUDIENCE.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::minutes(RESET_TOKEN_TTL_MINUTES)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
    }

    /// Fails closed: a bad signature, wrong audience, malformed payload or
    /// elapsed expiry all come back `None`.
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[AUDIENCE]);
        decode::<ResetClaims>(token, &self.decoding, &validation)
            .ok()
            .map(|data| data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_the_same_user() {
        let signer = ResetTokenSigner::new("test-secret");
        let user_id = Uuid::new_v4();
        let token = signer.issue(user_id).expect("issuing failed");
        assert_eq!(signer.verify(&token), Some(user_id));
    }

    #[test]
    fn expired_token_fails_closed() {
        let signer = ResetTokenSigner::new("test-secret");
        let user_id = Uuid::new_v4();
        let issued = Utc::now() - Duration::minutes(RESET_TOKEN_TTL_MINUTES + 1);
        let token = signer.issue_at(user_id, issued).expect("issuing failed");
        assert_eq!(signer.verify(&token), None);
    }

    #[test]
    fn other_secret_fails_closed() {
        let signer = ResetTokenSigner::new("test-secret");
        let other = ResetTokenSigner::new("rotated-secret");
        let token = signer.issue(Uuid::new_v4()).expect("issuing failed");
        assert_eq!(other.verify(&token), None);
    }

    #[test]
    fn garbage_fails_closed() {
        let signer = ResetTokenSigner::new("test-secret");
        assert_eq!(signer.verify("definitely.not.ajwt"), None);
        assert_eq!(signer.verify(""), None);
    }
}
