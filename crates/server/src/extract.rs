use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json, RequestExt,
};
use serde::de::DeserializeOwned;

use crate::ApiError;

/// Decodes a request body as JSON or urlencoded form data depending on the
/// Content-Type header. The original API accepted both encodings on its
/// POST endpoints
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send + 'static,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        let value = if content_type.starts_with(mime::APPLICATION_JSON.as_ref()) {
            let Json(value) = req
                .extract::<Json<T>, _>()
                .await
                .map_err(|e| ApiError::MalformedPayload(e.to_string()))?;
            value
        } else {
            let Form(value) = req
                .extract::<Form<T>, _>()
                .await
                .map_err(|e| ApiError::MalformedPayload(e.to_string()))?;
            value
        };

        Ok(FormOrJson(value))
    }
}
