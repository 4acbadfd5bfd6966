use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::list::{
    ListQuery, PageState, Projection, SortDirection, SortState, SummaryContext, DEFAULT_PAGE_SIZE,
};
use serde_json::json;
use std::collections::HashMap;

use crate::domain::collection::Collection;
use crate::domain::service;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

// ============================================================================
// Query parameters
// ============================================================================

/// Зарезервированные параметры; остальные ключи считаются фильтрами
const RESERVED_PARAMS: [&str; 5] = ["search", "sort", "direction", "page", "page_size"];

fn parse_number(params: &HashMap<String, String>, key: &str, default: usize) -> Result<usize, ApiError> {
    match params.get(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ApiError::BadRequest(format!("{} must be a positive integer", key))),
        _ => Ok(default),
    }
}

/// Параметры строки запроса -> состояние списка
///
/// `?search=ан&status=approved&sort=startDate&direction=desc&page=2&page_size=10`
pub fn list_query_from_params(params: &HashMap<String, String>) -> Result<ListQuery, ApiError> {
    let mut query = ListQuery::new();

    for (key, value) in params {
        if !RESERVED_PARAMS.contains(&key.as_str()) {
            query.filter.set(key.as_str(), value.as_str());
        }
    }

    if let Some(search) = params.get("search") {
        query.search = search.clone();
    }

    if let Some(field) = params.get("sort").filter(|f| !f.trim().is_empty()) {
        let direction = match params.get("direction") {
            Some(code) if !code.trim().is_empty() => SortDirection::from_code(code.trim())
                .ok_or_else(|| ApiError::BadRequest(format!("unknown sort direction: {}", code)))?,
            _ => SortDirection::Ascending,
        };
        query.sort = Some(SortState::new(field.trim(), direction));
    }

    query.page = PageState::new(
        parse_number(params, "page", 1)?,
        parse_number(params, "page_size", DEFAULT_PAGE_SIZE)?,
    );
    Ok(query)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/<collection>
pub async fn list_all<T: Collection>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError> {
    Ok(Json(service::list_all::<T>(&state.db).await?))
}

/// GET /api/<collection>/:id
pub async fn get_by_id<T: Collection>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError> {
    Ok(Json(service::get_by_id::<T>(&state.db, &id).await?))
}

/// POST /api/<collection>
pub async fn create<T: Collection>(
    State(state): State<AppState>,
    body: Result<Json<T>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let record = json_body(body)?;
    let created = service::create(&state.db, record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/<collection>/:id
pub async fn replace<T: Collection>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, ApiError> {
    let record = json_body(body)?;
    Ok(Json(service::replace(&state.db, &id, record).await?))
}

/// PATCH /api/<collection>/:id
pub async fn patch<T: Collection>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<T::Patch>, JsonRejection>,
) -> Result<Json<T>, ApiError> {
    let patch = json_body(body)?;
    Ok(Json(service::patch::<T>(&state.db, &id, patch).await?))
}

/// DELETE /api/<collection>/:id
pub async fn delete<T: Collection>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service::delete::<T>(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/<collection>/list
pub async fn list_page<T: Collection>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Projection<T>>, ApiError> {
    let query = list_query_from_params(&params)?;
    Ok(Json(service::list_page::<T>(&state.db, &query).await?))
}

/// GET /api/<collection>/summary
pub async fn summary<T: Collection>(
    State(state): State<AppState>,
) -> Result<Json<T::Snapshot>, ApiError> {
    let context = SummaryContext::current();
    Ok(Json(service::summary::<T>(&state.db, &context).await?))
}

/// GET /api/<collection>/export.csv
pub async fn export_csv<T: Collection>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let query = list_query_from_params(&params)?;
    let content = service::export_csv::<T>(&state.db, &query).await?;
    let disposition = format!("attachment; filename=\"{}.csv\"", T::collection_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    )
        .into_response())
}

/// POST /api/<collection>/testdata
pub async fn insert_test_data<T: Collection>(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let inserted = service::insert_test_data::<T>(&state.db).await?;
    Ok(Json(json!({ "inserted": inserted })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_params_give_default_query() {
        let query = list_query_from_params(&HashMap::new()).unwrap();
        assert_eq!(query, ListQuery::new());
    }

    #[test]
    fn test_params_to_query() {
        let query = list_query_from_params(&params(&[
            ("search", "ан"),
            ("status", "approved"),
            ("department", "ИТ"),
            ("sort", "startDate"),
            ("direction", "desc"),
            ("page", "2"),
            ("page_size", "10"),
        ]))
        .unwrap();

        assert_eq!(query.search, "ан");
        assert_eq!(query.filter.get("status"), "approved");
        assert_eq!(query.filter.get("department"), "ИТ");
        assert_eq!(query.filter.get("sort"), "all");
        assert_eq!(query.sort, Some(SortState::descending("startDate")));
        assert_eq!(query.page, PageState::new(2, 10));
    }

    #[test]
    fn test_bad_params_are_rejected() {
        assert!(matches!(
            list_query_from_params(&params(&[("page", "two")])),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            list_query_from_params(&params(&[("sort", "name"), ("direction", "up")])),
            Err(ApiError::BadRequest(_))
        ));
    }
}
