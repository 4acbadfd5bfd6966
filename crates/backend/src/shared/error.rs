use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::error::ListError;
use contracts::shared::validation::ValidationErrors;
use serde_json::json;
use thiserror::Error;

/// Ошибка обработчика REST API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Запись не найдена: {0}")]
    NotFound(String),

    #[error("Ошибка валидации: {0}")]
    Validation(ValidationErrors),

    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    #[error("Запись уже существует: {0}")]
    Conflict(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<ListError> for ApiError {
    fn from(e: ListError) -> Self {
        match e {
            ListError::NotFound { id } => ApiError::NotFound(id.to_string()),
            ListError::Validation(errors) => ApiError::Validation(errors),
            ListError::Duplicate { id } => ApiError::Conflict(id.to_string()),
            other => ApiError::Internal(anyhow::anyhow!(other)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(errors) => json!({
                "error": self.to_string(),
                "fields": errors,
            }),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                json!({ "error": self.to_string() })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::RecordId;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("db")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_list_error_conversion() {
        let e: ApiError = ListError::not_found(&RecordId::new("lr-404")).into();
        assert!(matches!(e, ApiError::NotFound(ref id) if id == "lr-404"));

        let mut errors = ValidationErrors::new();
        errors.add("employee", "Поле обязательно");
        let e: ApiError = ListError::Validation(errors).into();
        assert_eq!(e.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let e: ApiError = ListError::duplicate(&RecordId::new("lr-1")).into();
        assert_eq!(e.status(), StatusCode::CONFLICT);

        let e: ApiError = ListError::persistence("disk").into();
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_response_status() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Поле обязательно");
        let response = ApiError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
