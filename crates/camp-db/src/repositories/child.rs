use sqlx::{Executor, Postgres};

use crate::models::{Child, NewChild};

pub async fn list<'e, E>(executor: E) -> Result<Vec<Child>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, full_name, id_number, date_of_birth, gender, health_status,
                   father_name, father_id, mother_name, mother_id, is_breastfeeding,
                   health_notes, camp_id, created_at
            FROM children
            ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, child_id: i32) -> Result<Option<Child>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, full_name, id_number, date_of_birth, gender, health_status,
                   father_name, father_id, mother_name, mother_id, is_breastfeeding,
                   health_notes, camp_id, created_at
            FROM children
            WHERE id = $1
        "#,
    )
    .bind(child_id)
    .fetch_optional(executor)
    .await
}

/// Same as [`find_by_id`] but locks the row until the transaction ends
pub async fn find_by_id_for_update<'e, E>(
    executor: E,
    child_id: i32,
) -> Result<Option<Child>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, full_name, id_number, date_of_birth, gender, health_status,
                   father_name, father_id, mother_name, mother_id, is_breastfeeding,
                   health_notes, camp_id, created_at
            FROM children
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(child_id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e, E>(executor: E, child: &NewChild) -> Result<Child, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO children (
                full_name, id_number, date_of_birth, gender, health_status,
                father_name, father_id, mother_name, mother_id, is_breastfeeding,
                health_notes, camp_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, full_name, id_number, date_of_birth, gender, health_status,
                      father_name, father_id, mother_name, mother_id, is_breastfeeding,
                      health_notes, camp_id, created_at
        "#,
    )
    .bind(&child.full_name)
    .bind(&child.id_number)
    .bind(&child.date_of_birth)
    .bind(&child.gender)
    .bind(&child.health_status)
    .bind(&child.father_name)
    .bind(&child.father_id)
    .bind(&child.mother_name)
    .bind(&child.mother_id)
    .bind(child.is_breastfeeding)
    .bind(&child.health_notes)
    .bind(child.camp_id)
    .fetch_one(executor)
    .await
}

/// Overwrite every mutable column of a child
pub async fn update<'e, E>(
    executor: E,
    child_id: i32,
    child: &NewChild,
) -> Result<Option<Child>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE children
            SET full_name = $2,
                id_number = $3,
                date_of_birth = $4,
                gender = $5,
                health_status = $6,
                father_name = $7,
                father_id = $8,
                mother_name = $9,
                mother_id = $10,
                is_breastfeeding = $11,
                health_notes = $12,
                camp_id = $13
            WHERE id = $1
            RETURNING id, full_name, id_number, date_of_birth, gender, health_status,
                      father_name, father_id, mother_name, mother_id, is_breastfeeding,
                      health_notes, camp_id, created_at
        "#,
    )
    .bind(child_id)
    .bind(&child.full_name)
    .bind(&child.id_number)
    .bind(&child.date_of_birth)
    .bind(&child.gender)
    .bind(&child.health_status)
    .bind(&child.father_name)
    .bind(&child.father_id)
    .bind(&child.mother_name)
    .bind(&child.mother_id)
    .bind(child.is_breastfeeding)
    .bind(&child.health_notes)
    .bind(child.camp_id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, child_id: i32) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM children WHERE id = $1
        "#,
    )
    .bind(child_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Household lookup: every child whose father or mother carries `parent_id`
pub async fn lookup_by_parent_id<'e, E>(
    executor: E,
    parent_id: &str,
) -> Result<Vec<Child>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, full_name, id_number, date_of_birth, gender, health_status,
                   father_name, father_id, mother_name, mother_id, is_breastfeeding,
                   health_notes, camp_id, created_at
            FROM children
            WHERE father_id = $1 OR mother_id = $1
            ORDER BY date_of_birth, id
        "#,
    )
    .bind(parent_id)
    .fetch_all(executor)
    .await
}
