use crate::domain::exercise::{Exercise, ExerciseLog, LogQuery};
use crate::error::{AppError, Result};
use crate::storage::DbPool;
use crate::storage::exercise_repo::ExerciseRepository;
use crate::storage::user_repo::UserRepository;
use opentelemetry::{global, metrics::Counter};
use uuid::Uuid;

#[derive(Clone, Debug)]
struct ExerciseMetrics {
    exercises_logged_total: Counter<u64>,
}

impl ExerciseMetrics {
    fn new() -> Self {
        let meter = global::meter("exercise-tracker");
        Self {
            exercises_logged_total: meter
                .u64_counter("exercises_logged_total")
                .with_description("Total number of exercise entries appended")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExerciseService {
    pool: DbPool,
    user_repo: UserRepository,
    exercise_repo: ExerciseRepository,
    metrics: ExerciseMetrics,
}

impl ExerciseService {
    #[must_use]
    pub fn new(pool: DbPool, user_repo: UserRepository, exercise_repo: ExerciseRepository) -> Self {
        Self { pool, user_repo, exercise_repo, metrics: ExerciseMetrics::new() }
    }

    /// Appends an entry to an existing user's log. Unknown users are not
    /// created.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the user does not exist.
    /// Returns `AppError::Database` if the database operation fails.
    #[tracing::instrument(skip(self, exercise), fields(user_id = %user_id), err(level = "warn"))]
    pub async fn add_exercise(&self, user_id: Uuid, exercise: Exercise) -> Result<Exercise> {
        let mut conn = self.pool.acquire().await?;
        self.exercise_repo.append(&mut conn, user_id, &exercise).await?;

        tracing::debug!(date = %exercise.date, "Exercise appended");
        self.metrics.exercises_logged_total.add(1, &[]);

        Ok(exercise)
    }

    /// Reads a user's log narrowed by `query`.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the user does not exist.
    /// Returns `AppError::Database` if the database operation fails.
    #[tracing::instrument(skip(self), fields(user_id = %user_id), err(level = "warn"))]
    pub async fn fetch_log(&self, user_id: Uuid, query: LogQuery) -> Result<ExerciseLog> {
        let mut conn = self.pool.acquire().await?;
        let user = self.user_repo.find_by_id(&mut conn, user_id).await?.ok_or(AppError::NotFound)?;

        let limit = query.limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));
        let entries = self.exercise_repo.fetch_for_user(&mut conn, user_id, limit).await?;

        Ok(ExerciseLog { user, entries: query.apply(entries) })
    }
}
