use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A post joined with its author's username, the shape every listing
/// template consumes.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: String,
    pub posted_at: DateTime<Utc>,
}

impl PostView {
    pub fn from_model(post: entity::post::Model, author: String) -> Self {
        PostView {
            id: post.id,
            title: post.title,
            body: post.body,
            author,
            posted_at: post.posted_at,
        }
    }
}
