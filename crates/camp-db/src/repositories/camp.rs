use sqlx::{Executor, Postgres};

use crate::models::Camp;

pub async fn list<'e, E>(executor: E) -> Result<Vec<Camp>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, location
            FROM camps
            ORDER BY name
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, camp_id: i32) -> Result<Option<Camp>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, location
            FROM camps
            WHERE id = $1
        "#,
    )
    .bind(camp_id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(executor: E, name: &str, location: &str) -> Result<Camp, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO camps (name, location)
            VALUES ($1, $2)
            RETURNING id, name, location
        "#,
    )
    .bind(name)
    .bind(location)
    .fetch_one(executor)
    .await
}

/// Partial update; `None` keeps the stored value
pub async fn update<'e, E>(
    executor: E,
    camp_id: i32,
    name: Option<&str>,
    location: Option<&str>,
) -> Result<Option<Camp>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE camps
            SET name = COALESCE($2, name),
                location = COALESCE($3, location)
            WHERE id = $1
            RETURNING id, name, location
        "#,
    )
    .bind(camp_id)
    .bind(name)
    .bind(location)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, camp_id: i32) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM camps WHERE id = $1
        "#,
    )
    .bind(camp_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*) FROM camps
        "#,
    )
    .fetch_one(executor)
    .await
}
