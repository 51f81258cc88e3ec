use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::models::UserRecord;
use crate::server::error::Error;

const UNIQUE_VIOLATION: &str = "23505";

/// Fetch the record for a user. Absence is the "new user" signal, not an
/// error; connectivity and query failures surface as `Error::Store`.
pub async fn get(pool: &PgPool, id: &str) -> Result<Option<UserRecord>, Error> {
    let record = sqlx::query_as::<_, UserRecord>(
        "SELECT id, status, starttime, count, heard_a_joke FROM records WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Create the record for a first-time user: one joke already delivered.
pub async fn insert(pool: &PgPool, id: &str, start_time: DateTime<Utc>) -> Result<(), Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO records (id, status, starttime, count, heard_a_joke)
        VALUES ($1, 1, $2, 1, TRUE)
        "#,
    )
    .bind(id)
    .bind(start_time)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Err(Error::DuplicateKey(id.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Count one more delivered joke
pub async fn increment_count(pool: &PgPool, id: &str) -> Result<(), Error> {
    let result = sqlx::query("UPDATE records SET count = count + 1, heard_a_joke = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(id.to_string()));
    }

    Ok(())
}

/// Start the 24-hour cooldown timer
pub async fn apply_cooldown(pool: &PgPool, id: &str, start_time: DateTime<Utc>) -> Result<(), Error> {
    sqlx::query("UPDATE records SET status = -1, count = 0, starttime = $2 WHERE id = $1")
        .bind(id)
        .bind(start_time)
        .execute(pool)
        .await?;

    Ok(())
}

/// Lift an expired cooldown
pub async fn clear_cooldown(pool: &PgPool, id: &str) -> Result<(), Error> {
    sqlx::query("UPDATE records SET status = 0, count = 0 WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Zero out quota state on an explicit "reset" request
pub async fn reset(pool: &PgPool, id: &str) -> Result<(), Error> {
    sqlx::query("UPDATE records SET status = 0, count = 0, heard_a_joke = FALSE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
