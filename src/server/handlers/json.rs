use async_trait::async_trait;
use axum::body::HttpBody;
use axum::extract::{rejection::JsonRejection, FromRequest, Json, RequestParts};
use axum::BoxError;
use serde::de::DeserializeOwned;

use crate::error::{invalid_input_error, Error};

/// `Json` whose rejection is an invalid-input `Error`, so malformed bodies
/// answer 400 with the usual `{"code", "error"}` payload.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, B> FromRequest<B> for JsonBody<T>
where
    T: DeserializeOwned,
    B: HttpBody + Send,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req)
            .await
            .map_err(|rejection| invalid_input_error(describe(&rejection)))?;

        Ok(Self(value))
    }
}

/// The rejection's summary followed by its causes, which name the field.
fn describe(rejection: &JsonRejection) -> String {
    let mut message = rejection.to_string();
    let mut source = std::error::Error::source(rejection);

    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}
