use crate::domain::exercise::Exercise;
use crate::error::{AppError, Result};
use crate::storage::FOREIGN_KEY_VIOLATION;
use crate::storage::records::ExerciseRecord;
use sqlx::PgConnection;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct ExerciseRepository {}

impl ExerciseRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Appends an entry to the end of a user's log.
    ///
    /// A single insert guarded by the foreign key, so concurrent appends for
    /// the same user never overwrite each other.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the user does not exist.
    /// Returns `AppError::Database` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, exercise))]
    pub(crate) async fn append(&self, conn: &mut PgConnection, user_id: Uuid, exercise: &Exercise) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO exercises (user_id, description, duration, date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(&exercise.description)
        .bind(exercise.duration)
        .bind(exercise.date)
        .execute(conn)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
                Err(AppError::NotFound)
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    /// Fetches a user's log in the order entries were appended.
    ///
    /// `limit` keeps only the first entries; `None` returns the whole log.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn fetch_for_user(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<Exercise>> {
        // LIMIT NULL is LIMIT ALL in Postgres
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT description, duration, date
            FROM exercises
            WHERE user_id = $1
            ORDER BY id ASC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
