use async_trait::async_trait;
use contracts::domain::common::RecordId;
use contracts::shared::error::ListError;
use contracts::shared::list::ListRecord;
use gloo_net::http::{Request, Response};
use std::marker::PhantomData;

use super::RecordRepository;
use crate::shared::api_utils::api_base;

/// Коллекция на REST backend: /api/<collection>[/<id>]
pub struct RestRepository<T> {
    base_url: String,
    _record: PhantomData<T>,
}

impl<T: ListRecord> RestRepository<T> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            _record: PhantomData,
        }
    }

    /// Адрес backend из `API_BASE_URL` или из адреса страницы
    pub fn from_env() -> Self {
        Self::new(api_base())
    }

    pub fn collection_url(&self) -> String {
        format!("{}/api/{}", self.base_url, T::collection_name())
    }

    pub fn record_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id.as_str()))
    }
}

/// Текст ошибки из тела ответа: поле `detail` или `error`, иначе сам текст, иначе статус
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["detail", "error"] {
            if let Some(message) = value.get(field).and_then(|v| v.as_str()) {
                if !message.trim().is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        body.trim().to_string()
    }
}

/// Неуспешный ответ -> ошибка списка; 404 и 409 по записи -> `NotFound` и `Duplicate`
pub fn error_for_status(status: u16, body: &str, id: Option<&RecordId>) -> ListError {
    match (status, id) {
        (404, Some(id)) => ListError::not_found(id),
        (409, Some(id)) => ListError::duplicate(id),
        _ => ListError::network(Some(status), error_message(status, body)),
    }
}

fn transport_error(e: gloo_net::Error) -> ListError {
    ListError::network(None, e.to_string())
}

async fn check(response: Response, id: Option<&RecordId>) -> Result<Response, ListError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(error_for_status(status, &body, id))
}

async fn read_json<T: ListRecord>(response: Response) -> Result<T, ListError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ListError::network(None, format!("invalid response: {}", e)))
}

#[async_trait(?Send)]
impl<T: ListRecord> RecordRepository<T> for RestRepository<T> {
    async fn list(&self) -> Result<Vec<T>, ListError> {
        let response = Request::get(&self.collection_url())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport_error)?;
        let response = check(response, None).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| ListError::network(None, format!("invalid response: {}", e)))
    }

    async fn create(&self, record: &T) -> Result<T, ListError> {
        let response = Request::post(&self.collection_url())
            .json(record)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        read_json(check(response, Some(record.id())).await?).await
    }

    async fn update(&self, record: &T) -> Result<T, ListError> {
        let response = Request::put(&self.record_url(record.id()))
            .json(record)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?;
        read_json(check(response, Some(record.id())).await?).await
    }

    async fn remove(&self, id: &RecordId) -> Result<(), ListError> {
        let response = Request::delete(&self.record_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        check(response, Some(id)).await?;
        Ok(())
    }
}
