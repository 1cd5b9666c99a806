use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use camp_db::repositories::{
    camp as camp_repo, child as child_repo, pregnant_woman as woman_repo,
    setting as setting_repo,
};
use camp_sheet::{
    CHILD_COLUMNS, Column, Locale, PREGNANT_WOMAN_COLUMNS, SheetRow, read_rows, write_sheet,
};

use super::{
    model::{ImportRequest, ImportSummary, LocaleQuery, request_body_limit},
    rows::{CampIndex, child_cells, child_payload, pregnant_woman_cells, pregnant_woman_payload},
};
use crate::{
    ApiState,
    admin::settings::DEFAULT_LANGUAGE_KEY,
    auth::AuthUser,
    child::{model::ChildPayload, routes::DUPLICATE_CHILD},
    error::ApiError,
    extract::ApiJson,
    metrics::record_import,
    middleware::rate_limit,
    pregnant_woman::{model::PregnantWomanPayload, routes::DUPLICATE_WOMAN},
};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn routes(max_import_bytes: usize) -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    let import_routes = Router::new()
        .route("/api/bulk/children/import", post(import_children))
        .route("/api/bulk/pregnant-women/import", post(import_pregnant_women))
        .layer(DefaultBodyLimit::max(request_body_limit(max_import_bytes)));

    let export_routes = Router::new()
        .route("/api/bulk/children/export", get(export_children))
        .route("/api/bulk/children/template", get(children_template))
        .route("/api/bulk/pregnant-women/export", get(export_pregnant_women))
        .route("/api/bulk/pregnant-women/template", get(pregnant_women_template));

    Router::new()
        .merge(import_routes)
        .merge(export_routes)
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_REPLENISH_MS,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

/// Requested locale, else the `default_language` setting, else Arabic
async fn resolve_locale(state: &ApiState, query: &LocaleQuery) -> Result<Locale, ApiError> {
    if let Some(locale) = query.parse()? {
        return Ok(locale);
    }

    let configured = setting_repo::get(&state.pool, DEFAULT_LANGUAGE_KEY).await?;
    Ok(configured
        .and_then(|value| value.parse().ok())
        .unwrap_or_default())
}

/// Decode the upload and parse the workbook off the async runtime
async fn read_upload(
    state: &ApiState,
    request: &ImportRequest,
    columns: &'static [Column],
) -> Result<Vec<SheetRow>, ApiError> {
    let bytes = request.decode(state.max_import_bytes)?;
    let rows = tokio::task::spawn_blocking(move || read_rows(&bytes, columns))
        .await
        .map_err(ApiError::internal)??;
    Ok(rows)
}

fn xlsx_attachment(file_name: &'static str, bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
}

async fn import_children(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<ImportRequest>,
) -> Result<Json<ImportSummary>, ApiError> {
    let rows = read_upload(&state, &request, CHILD_COLUMNS).await?;
    let camps = CampIndex::new(camp_repo::list(&state.pool).await?);

    let mut summary = ImportSummary::default();
    for row in &rows {
        let new_child = match child_payload(row, &camps).and_then(ChildPayload::into_new_child) {
            Ok(new_child) => new_child,
            Err(err) => {
                summary.record_failure(row.number, &err);
                continue;
            }
        };

        match child_repo::create(&state.pool, &new_child).await {
            Ok(_) => summary.success += 1,
            Err(err) => match ApiError::from_write(err, DUPLICATE_CHILD) {
                ApiError::Database(err) => return Err(ApiError::Database(err)),
                err => summary.record_failure(row.number, &err),
            },
        }
    }

    record_import("children", summary.success, summary.failed);
    tracing::info!(
        file_name = %request.file_name,
        imported = summary.success,
        failed = summary.failed,
        "Children imported"
    );
    Ok(Json(summary))
}

async fn import_pregnant_women(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<ImportRequest>,
) -> Result<Json<ImportSummary>, ApiError> {
    let rows = read_upload(&state, &request, PREGNANT_WOMAN_COLUMNS).await?;
    let camps = CampIndex::new(camp_repo::list(&state.pool).await?);

    let mut summary = ImportSummary::default();
    for row in &rows {
        let new_woman = match pregnant_woman_payload(row, &camps)
            .and_then(PregnantWomanPayload::into_new_pregnant_woman)
        {
            Ok(new_woman) => new_woman,
            Err(err) => {
                summary.record_failure(row.number, &err);
                continue;
            }
        };

        match woman_repo::create(&state.pool, &new_woman).await {
            Ok(_) => summary.success += 1,
            Err(err) => match ApiError::from_write(err, DUPLICATE_WOMAN) {
                ApiError::Database(err) => return Err(ApiError::Database(err)),
                err => summary.record_failure(row.number, &err),
            },
        }
    }

    record_import("pregnant_women", summary.success, summary.failed);
    tracing::info!(
        file_name = %request.file_name,
        imported = summary.success,
        failed = summary.failed,
        "Pregnant women imported"
    );
    Ok(Json(summary))
}

async fn export_children(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<LocaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let locale = resolve_locale(&state, &query).await?;
    let (children, camps) = tokio::try_join!(
        child_repo::list(&state.pool),
        camp_repo::list(&state.pool)
    )?;

    let camps = CampIndex::new(camps);
    let rows: Vec<_> = children
        .into_iter()
        .map(|child| child_cells(child, &camps, locale))
        .collect();
    let bytes = write_sheet("Children", CHILD_COLUMNS, locale, &rows)?;

    Ok(xlsx_attachment("children.xlsx", bytes))
}

async fn export_pregnant_women(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<LocaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let locale = resolve_locale(&state, &query).await?;
    let (women, camps) = tokio::try_join!(
        woman_repo::list(&state.pool),
        camp_repo::list(&state.pool)
    )?;

    let camps = CampIndex::new(camps);
    let rows: Vec<_> = women
        .into_iter()
        .map(|woman| pregnant_woman_cells(woman, &camps))
        .collect();
    let bytes = write_sheet("Pregnant Women", PREGNANT_WOMAN_COLUMNS, locale, &rows)?;

    Ok(xlsx_attachment("pregnant-women.xlsx", bytes))
}

async fn children_template(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<LocaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let locale = resolve_locale(&state, &query).await?;
    let bytes = write_sheet("Children", CHILD_COLUMNS, locale, &[])?;
    Ok(xlsx_attachment("children-template.xlsx", bytes))
}

async fn pregnant_women_template(
    _auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<LocaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let locale = resolve_locale(&state, &query).await?;
    let bytes = write_sheet("Pregnant Women", PREGNANT_WOMAN_COLUMNS, locale, &[])?;
    Ok(xlsx_attachment("pregnant-women-template.xlsx", bytes))
}
