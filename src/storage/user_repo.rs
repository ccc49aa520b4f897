use crate::domain::user::User;
use crate::error::{AppError, Result};
use crate::storage::UNIQUE_VIOLATION;
use crate::storage::records::UserRecord;
use sqlx::PgConnection;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct UserRepository {}

impl UserRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Inserts a new user with a freshly generated id.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if the username is already taken.
    /// Returns `AppError::Database` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn create(&self, conn: &mut PgConnection, username: &str) -> Result<User> {
        let result = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, username)
            VALUES ($1, $2)
            RETURNING id, username
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .fetch_one(conn)
        .await;

        match result {
            Ok(record) => Ok(record.into()),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(AppError::validation("username already taken"))
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    /// Looks up a user by id.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn find_by_id(&self, conn: &mut PgConnection, id: Uuid) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(record.map(Into::into))
    }
}
