// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Item {0} não encontrado")]
    ItemNotFound(Uuid),

    #[error("Campo desconhecido: {0}")]
    UnknownField(String),

    #[error("Paginação inativa")]
    PaginacaoInactive,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Converte o erro de domínio na resposta HTTP, com a mensagem no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();

        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            let code = e.message.as_deref().unwrap_or(&*e.code);
                            store.translate(lang, &format!("validation.{code}"), &[])
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: store.translate(lang, "validation", &[]),
                    details: Some(Value::Object(details)),
                }
            }
            AppError::ItemNotFound(id) => ApiError {
                status: StatusCode::NOT_FOUND,
                error: store.translate(lang, "item_not_found", &[("id", id.to_string().as_str())]),
                details: None,
            },
            AppError::UnknownField(field) => ApiError {
                status: StatusCode::BAD_REQUEST,
                error: store.translate(lang, "unknown_field", &[("field", field.as_str())]),
                details: None,
            },
            AppError::PaginacaoInactive => ApiError {
                status: StatusCode::CONFLICT,
                error: store.translate(lang, "paginacao_inactive", &[]),
                details: None,
            },
            // Banco e erros inesperados viram 500; o detalhe só vai para o log.
            e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: store.translate(lang, "internal", &[]),
                    details: None,
                }
            }
        }
    }
}

/// Resposta de erro já traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "required"))]
        field: String,
    }

    #[test]
    fn not_found_is_localized() {
        let store = I18nStore::new();
        let id = Uuid::nil();

        let pt = AppError::ItemNotFound(id).to_api_error(&Locale("pt".into()), &store);
        assert_eq!(pt.status, StatusCode::NOT_FOUND);
        assert!(pt.error.contains("não encontrado"));
        assert!(pt.error.contains(&id.to_string()));

        let en = AppError::ItemNotFound(id).to_api_error(&Locale("en".into()), &store);
        assert!(en.error.contains("not found"));
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let store = I18nStore::new();
        let errors = Payload { field: String::new() }.validate().unwrap_err();

        let api = AppError::ValidationError(errors).to_api_error(&Locale("pt".into()), &store);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.unwrap();
        assert_eq!(details["field"][0], json!("Campo obrigatório."));
    }

    #[test]
    fn paginacao_inactive_is_a_conflict() {
        let api = AppError::PaginacaoInactive.to_api_error(&Locale("en".into()), &I18nStore::new());
        assert_eq!(api.status, StatusCode::CONFLICT);
    }
}
