use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::users::model::User;

/// Failures surfaced by a user store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("storage error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return StoreError::NotFound;
        }
        if err
            .as_database_error()
            .map_or(false, |db| db.is_unique_violation())
        {
            return StoreError::DuplicateEmail;
        }
        StoreError::Backend(err.to_string())
    }
}

/// Fields needed to persist a brand-new user. The password arrives already
/// hashed; roles always start empty.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

/// Persistence boundary for user records. Uniqueness of emails is delegated
/// to the backing store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user with a generated id and empty roles.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// All users, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Fetch one user; `None` when the id is unknown.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Fetch one user by email (login and duplicate checks).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Persist the full record under its id and return the stored row.
    async fn update(&self, user: &User) -> Result<User, StoreError>;

    /// Remove a record.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, roles, password_hash)
            VALUES ($1, $2, $3, $4, '{}', $5)
            RETURNING id, first_name, last_name, email, phone, roles, password_hash, created_at
            "#,
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.phone)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, phone, roles, password_hash, created_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, phone, roles, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, phone, roles, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        // fetch_one turns the missing-row case into RowNotFound -> NotFound.
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, phone = $5,
                roles = $6, password_hash = $7
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, roles, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.roles)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
