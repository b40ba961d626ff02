use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::types::error::AppError;

/// Owns the ORM connection pool. Query methods hang off this type from the
/// sibling modules; schema migrations run once on connect.
#[derive(Clone)]
pub struct DatabaseService {
    pub(crate) connection: DatabaseConnection,
}

impl DatabaseService {
    pub async fn new(url: &str) -> Result<Self, AppError> {
        let mut options = ConnectOptions::new(url);
        options.sqlx_logging(false);
        Self::connect(options).await
    }

    pub async fn connect(options: impl Into<ConnectOptions>) -> Result<Self, AppError> {
        info!("connecting to database");
        let connection = Database::connect(options).await?;
        info!("running migrations");
        Migrator::up(&connection, None).await?;
        info!("database ready");
        Ok(Self { connection })
    }
}
