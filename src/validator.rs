use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use escola_core::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs the payload's validation rules.
///
/// Every failing rule is reported: the rejection is a 400 whose `msg` lists the
/// field messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
            "O cabeçalho 'Content-Type: application/json' é obrigatório"
        )),
        JsonRejection::JsonDataError(err) => {
            tracing::debug!(error = %err.body_text(), "Rejected request body");
            AppError::bad_request(anyhow!("Tipo de campo inválido na requisição"))
        }
        other => {
            tracing::debug!(error = %other.body_text(), "Rejected request body");
            AppError::bad_request(anyhow!("Corpo da requisição inválido"))
        }
    }
}
