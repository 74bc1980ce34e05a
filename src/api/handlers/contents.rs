/*
 * Responsibility
 * - GET /contents/ (一覧 + 検索), GET /contents/{content_id}
 * - query/path の検証 → ContentRepo 呼び出し
 */
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use uuid::Uuid;

use crate::{
    api::dto::contents::ContentSearchParams, domain::content::ContentItem, error::AppError,
    state::AppState,
};

pub async fn search_contents(
    State(state): State<AppState>,
    params: Result<Query<ContentSearchParams>, QueryRejection>,
) -> Result<Json<Vec<ContentItem>>, AppError> {
    let Query(params) = params?;
    let filter = params.into_filter()?;

    let items = state.contents.search(&filter).await?;
    tracing::debug!(count = items.len(), "content search");

    Ok(Json(items))
}

pub async fn get_content(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Result<Json<ContentItem>, AppError> {
    let content_id = Uuid::parse_str(&content_id)
        .map_err(|_| AppError::bad_request("INVALID_CONTENT_ID", "invalid content id"))?;

    let item = state
        .contents
        .get(content_id)
        .await?
        .ok_or(AppError::not_found("content"))?;

    Ok(Json(item))
}
