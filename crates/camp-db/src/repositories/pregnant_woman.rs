use sqlx::{Executor, Postgres};

use crate::models::{NewPregnantWoman, PregnantWoman};

pub async fn list<'e, E>(executor: E) -> Result<Vec<PregnantWoman>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, full_name, id_number, health_status, pregnancy_month,
                   spouse_name, spouse_id, health_notes, camp_id, created_at
            FROM pregnant_women
            ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(
    executor: E,
    woman_id: i32,
) -> Result<Option<PregnantWoman>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, full_name, id_number, health_status, pregnancy_month,
                   spouse_name, spouse_id, health_notes, camp_id, created_at
            FROM pregnant_women
            WHERE id = $1
        "#,
    )
    .bind(woman_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_id_for_update<'e, E>(
    executor: E,
    woman_id: i32,
) -> Result<Option<PregnantWoman>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, full_name, id_number, health_status, pregnancy_month,
                   spouse_name, spouse_id, health_notes, camp_id, created_at
            FROM pregnant_women
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(woman_id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(
    executor: E,
    woman: &NewPregnantWoman,
) -> Result<PregnantWoman, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO pregnant_women (
                full_name, id_number, health_status, pregnancy_month,
                spouse_name, spouse_id, health_notes, camp_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, full_name, id_number, health_status, pregnancy_month,
                      spouse_name, spouse_id, health_notes, camp_id, created_at
        "#,
    )
    .bind(&woman.full_name)
    .bind(&woman.id_number)
    .bind(&woman.health_status)
    .bind(woman.pregnancy_month)
    .bind(&woman.spouse_name)
    .bind(&woman.spouse_id)
    .bind(&woman.health_notes)
    .bind(woman.camp_id)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E>(
    executor: E,
    woman_id: i32,
    woman: &NewPregnantWoman,
) -> Result<Option<PregnantWoman>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE pregnant_women
            SET full_name = $2,
                id_number = $3,
                health_status = $4,
                pregnancy_month = $5,
                spouse_name = $6,
                spouse_id = $7,
                health_notes = $8,
                camp_id = $9
            WHERE id = $1
            RETURNING id, full_name, id_number, health_status, pregnancy_month,
                      spouse_name, spouse_id, health_notes, camp_id, created_at
        "#,
    )
    .bind(woman_id)
    .bind(&woman.full_name)
    .bind(&woman.id_number)
    .bind(&woman.health_status)
    .bind(woman.pregnancy_month)
    .bind(&woman.spouse_name)
    .bind(&woman.spouse_id)
    .bind(&woman.health_notes)
    .bind(woman.camp_id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, woman_id: i32) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM pregnant_women WHERE id = $1
        "#,
    )
    .bind(woman_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Household lookup: matches the husband's ID as well as the woman's own ID
pub async fn lookup_by_spouse_id<'e, E>(
    executor: E,
    spouse_id: &str,
) -> Result<Vec<PregnantWoman>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, full_name, id_number, health_status, pregnancy_month,
                   spouse_name, spouse_id, health_notes, camp_id, created_at
            FROM pregnant_women
            WHERE spouse_id = $1 OR id_number = $1
            ORDER BY id
        "#,
    )
    .bind(spouse_id)
    .fetch_all(executor)
    .await
}
