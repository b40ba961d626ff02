use serde::Serialize;

/// Wire payload for the Resend-compatible `/emails` endpoint.
#[derive(Debug, Serialize)]
pub struct SendEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
}
