use crate::domain::user::User;
use crate::error::Result;
use crate::storage::DbPool;
use crate::storage::user_repo::UserRepository;
use opentelemetry::{global, metrics::Counter};

#[derive(Clone, Debug)]
struct UserMetrics {
    users_created_total: Counter<u64>,
}

impl UserMetrics {
    fn new() -> Self {
        let meter = global::meter("exercise-tracker");
        Self {
            users_created_total: meter
                .u64_counter("users_created_total")
                .with_description("Total number of users created")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UserService {
    pool: DbPool,
    repo: UserRepository,
    metrics: UserMetrics,
}

impl UserService {
    #[must_use]
    pub fn new(pool: DbPool, repo: UserRepository) -> Self {
        Self { pool, repo, metrics: UserMetrics::new() }
    }

    /// Creates a user with an empty log.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if the username is already taken.
    /// Returns `AppError::Database` if the database operation fails.
    #[tracing::instrument(skip(self), fields(user_id = tracing::field::Empty), err(level = "warn"))]
    pub async fn create_user(&self, username: &str) -> Result<User> {
        let mut conn = self.pool.acquire().await?;
        let user = self.repo.create(&mut conn, username).await?;

        tracing::Span::current().record("user_id", tracing::field::display(user.id));
        tracing::info!("User created");
        self.metrics.users_created_total.add(1, &[]);

        Ok(user)
    }
}
