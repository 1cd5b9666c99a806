use sqlx::{Executor, Postgres};

use crate::models::{DashboardTotals, GenderCount, MonthCount, StatusCount};

/// Headline counts. `total_mothers` counts breastfeeding children
pub async fn totals<'e, E>(executor: E) -> Result<DashboardTotals, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                (SELECT COUNT(*) FROM children) AS total_children,
                (SELECT COUNT(*) FROM pregnant_women) AS total_pregnant_women,
                (SELECT COUNT(*) FROM camps) AS total_camps,
                (SELECT COUNT(*) FROM children WHERE is_breastfeeding) AS total_mothers
        "#,
    )
    .fetch_one(executor)
    .await
}

pub async fn children_by_gender<'e, E>(executor: E) -> Result<Vec<GenderCount>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT gender, COUNT(*) AS count
            FROM children
            GROUP BY gender
            ORDER BY gender
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn pregnant_women_by_month<'e, E>(executor: E) -> Result<Vec<MonthCount>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT pregnancy_month AS month, COUNT(*) AS count
            FROM pregnant_women
            GROUP BY pregnancy_month
            ORDER BY pregnancy_month
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn children_health_statuses<'e, E>(executor: E) -> Result<Vec<StatusCount>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT health_status AS status, COUNT(*) AS count
            FROM children
            GROUP BY health_status
            ORDER BY count DESC, health_status
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn pregnant_women_health_statuses<'e, E>(
    executor: E,
) -> Result<Vec<StatusCount>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT health_status AS status, COUNT(*) AS count
            FROM pregnant_women
            GROUP BY health_status
            ORDER BY count DESC, health_status
        "#,
    )
    .fetch_all(executor)
    .await
}
