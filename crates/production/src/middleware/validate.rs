use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use shared::errors::{HttpError, validation_messages};
use tracing::warn;
use validator::Validate;

/// JSON body extractor that validates the payload before the handler runs.
///
/// Every rejection, malformed JSON and a wrong content type included, is
/// answered with `400` and the usual error body.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                warn!("⚠️ Rejected request body: {}", rejection.body_text());
                HttpError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
            })?;

        value.validate().map_err(|errors| {
            let messages = validation_messages(&errors);
            warn!("⚠️ Request validation failed: {:?}", messages);
            HttpError::BadRequest(format!("Validation failed: {}", messages.join("; ")))
        })?;

        Ok(Self(value))
    }
}
