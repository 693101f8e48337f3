use crate::users::repo_types::User;
use sqlx::PgPool;

impl User {
    /// Find a user by email. Callers normalize the email first.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, age, password_hash, is_admin, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a credential account. Returns `None` when a user with that
    /// email already exists; insert and existence check are one atomic
    /// statement, so concurrent sign-ups for the same email cannot both win.
    pub async fn create_if_absent(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        age: i32,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, age)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, username, email, age, password_hash, is_admin, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(age)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a minimal record for a first OAuth sign-in: email and username
    /// only, no password, age left to the column default. Returns `None`
    /// when the email is already bound to a record.
    pub async fn create_from_oauth(
        db: &PgPool,
        username: &str,
        email: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, username, email, age, password_hash, is_admin, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Apply `{password_hash, age}` as a partial update keyed by username.
    /// Returns the updated row, or `None` when no user matched.
    pub async fn set_password_and_age(
        db: &PgPool,
        username: &str,
        password_hash: &str,
        age: i32,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET password_hash = $2, age = $3
            WHERE username = $1
            RETURNING id, username, email, age, password_hash, is_admin, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(age)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
