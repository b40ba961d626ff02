use chrono::Utc;
use entity::post::{ActiveModel as PostActive, Column, Entity as Post};
use entity::user::Model as UserModel;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::db::service::DatabaseService;
use crate::types::error::AppError;
use crate::types::page::Page;
use crate::types::post::PostView;

pub const POSTS_PER_PAGE: u64 = 5;

impl DatabaseService {
    /// One page of an author's posts, newest first. Pages past the end are
    /// empty rather than an error.
    pub async fn posts_by_author(
        &self,
        author: &UserModel,
        page: u64,
    ) -> Result<Page<PostView>, AppError> {
        let page = page.max(1);
        let paginator = Post::find()
            .filter(Column::AuthorId.eq(author.id))
            .order_by_desc(Column::PostedAt)
            .paginate(&self.connection, POSTS_PER_PAGE);

        let totals = paginator.num_items_and_pages().await?;
        let items = paginator
            .fetch_page(page - 1)
            .await?
            .into_iter()
            .map(|post| PostView::from_model(post, author.username.clone()))
            .collect();

        Ok(Page::new(
            items,
            page,
            POSTS_PER_PAGE,
            totals.number_of_items,
            totals.number_of_pages,
        ))
    }

    /// The landing-page feed: every author, newest first.
    pub async fn recent_posts(&self, page: u64) -> Result<Page<PostView>, AppError> {
        let page = page.max(1);
        let paginator = Post::find()
            .find_also_related(entity::user::Entity)
            .order_by_desc(Column::PostedAt)
            .paginate(&self.connection, POSTS_PER_PAGE);

        let totals = paginator.num_items_and_pages().await?;
        let items = paginator
            .fetch_page(page - 1)
            .await?
            .into_iter()
            .map(|(post, author)| {
                let username = author.map(|a| a.username).unwrap_or_default();
                PostView::from_model(post, username)
            })
            .collect();

        Ok(Page::new(
            items,
            page,
            POSTS_PER_PAGE,
            totals.number_of_items,
            totals.number_of_pages,
        ))
    }

    pub async fn create_post(
        &self,
        author_id: Uuid,
        title: String,
        body: String,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        Post::insert(PostActive {
            id: Set(id),
            title: Set(title),
            body: Set(body),
            author_id: Set(author_id),
            posted_at: Set(Utc::now()),
        })
        .exec(&self.connection)
        .await?;
        Ok(id)
    }
}
