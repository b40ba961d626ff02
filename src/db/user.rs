use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::db::service::DatabaseService;
use crate::types::error::AppError;

pub const DEFAULT_IMAGE: &str = "default.jpg";

pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl DatabaseService {
    pub async fn email_taken(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .count(&self.connection)
            .await?
            > 0)
    }

    pub async fn username_taken(&self, username: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .count(&self.connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("user does not exist".into()))?)
    }

    /// Login and reset-request lookups: absence is an ordinary negative
    /// result, not an error.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .one(&self.connection)
            .await?)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .one(&self.connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("user does not exist".into()))?)
    }

    /// Registration. Uniqueness is re-checked inside the transaction so two
    /// racing signups cannot both pass the form-level check.
    pub async fn create_user(&self, payload: NewUser) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let txn = self.connection.begin().await?;

        let email_clash = User::find()
            .filter(Column::Email.eq(payload.email.as_str()))
            .count(&txn)
            .await?
            > 0;
        let username_clash = User::find()
            .filter(Column::Username.eq(payload.username.as_str()))
            .count(&txn)
            .await?
            > 0;
        if email_clash || username_clash {
            txn.rollback().await?;
            return Err(AppError::AlreadyExists);
        }

        User::insert(UserActive {
            id: Set(id),
            username: Set(payload.username),
            email: Set(payload.email),
            password_hash: Set(payload.password_hash),
            image_file: Set(DEFAULT_IMAGE.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&txn)
        .await?;

        txn.commit().await?;
        Ok(id)
    }

    /// Profile update. `image_file` only changes when a new picture landed;
    /// username and email always do. Uniqueness against other rows is
    /// checked in the same transaction as the write.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        username: String,
        email: String,
        image_file: Option<String>,
    ) -> Result<(), AppError> {
        let txn = self.connection.begin().await?;

        let email_clash = User::find()
            .filter(Column::Email.eq(email.as_str()))
            .filter(Column::Id.ne(user_id))
            .count(&txn)
            .await?
            > 0;
        let username_clash = User::find()
            .filter(Column::Username.eq(username.as_str()))
            .filter(Column::Id.ne(user_id))
            .count(&txn)
            .await?
            > 0;
        if email_clash || username_clash {
            txn.rollback().await?;
            return Err(AppError::AlreadyExists);
        }

        let user = User::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("user does not exist".into()))?;
        let mut am: UserActive = user.into();
        am.username = Set(username);
        am.email = Set(email);
        if let Some(filename) = image_file {
            am.image_file = Set(filename);
        }
        am.updated_at = Set(Utc::now());
        am.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn set_password(&self, user_id: Uuid, password_hash: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.password_hash = Set(password_hash);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.connection).await.map(|_| ())?)
    }
}
