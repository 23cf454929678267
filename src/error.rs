use axum::extract::multipart::MultipartError;
use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

/// Crate-wide error. Codes below 100 are server-side failures, codes from
/// 100 up are caller-correctable.
#[derive(Debug, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct Error {
    pub code: i32,
    pub message: String,
}

pub const CONFIGURATION: i32 = 1;
pub const DATABASE: i32 = 2;
pub const TRANSPORT: i32 = 3;
pub const UPSTREAM: i32 = 4;
pub const UNEXPECTED: i32 = 5;
pub const MALFORMED_PAYLOAD: i32 = 6;
pub const INVALID_INPUT: i32 = 100;
pub const NOT_FOUND: i32 = 101;
pub const ADDRESS_RESOLUTION: i32 = 102;
pub const INSUFFICIENT_WAYPOINTS: i32 = 103;
pub const NO_ROUTE: i32 = 104;

impl Error {
    pub fn is_client_error(&self) -> bool {
        self.code >= INVALID_INPUT
    }

    fn status(&self) -> StatusCode {
        match self.code {
            NOT_FOUND => StatusCode::NOT_FOUND,
            c if c >= INVALID_INPUT => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        malformed_payload_error(format!("invalid JSON: {}", err))
    }
}

impl From<MultipartError> for Error {
    fn from(err: MultipartError) -> Self {
        invalid_input_error(format!("invalid multipart body: {}", err))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = self.code, "{}", self.message);
        }

        let body = Json(json!({
            "code": self.code,
            "error": self.message,
        }));

        (status, body).into_response()
    }
}

pub fn configuration_error(name: &str) -> Error {
    Error {
        code: CONFIGURATION,
        message: format!("{} is not configured", name),
    }
}

pub fn invalid_configuration_error(message: impl Into<String>) -> Error {
    Error {
        code: CONFIGURATION,
        message: message.into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: CONFIGURATION,
        message: format!("environment variable error: {}", err),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!("database error: {:?}", err);

    Error {
        code: DATABASE,
        message: "database error".into(),
    }
}

/// The request URL is dropped: some providers take their key as a query
/// parameter.
pub fn reqwest_error(err: reqwest::Error) -> Error {
    let err = err.without_url();
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        format!("request failed: {}", err)
    };

    Error {
        code: TRANSPORT,
        message,
    }
}

pub fn upstream_error(service: &str, status: u16, body: &str) -> Error {
    Error {
        code: UPSTREAM,
        message: format!("{} returned status {}: {}", service, status, body),
    }
}

pub fn unexpected_error(message: impl Into<String>) -> Error {
    Error {
        code: UNEXPECTED,
        message: message.into(),
    }
}

pub fn malformed_payload_error(message: impl Into<String>) -> Error {
    Error {
        code: MALFORMED_PAYLOAD,
        message: message.into(),
    }
}

pub fn invalid_input_error(message: impl Into<String>) -> Error {
    Error {
        code: INVALID_INPUT,
        message: message.into(),
    }
}

pub fn not_found_error(collection: &str, id: &str) -> Error {
    Error {
        code: NOT_FOUND,
        message: format!("no {} record with id {}", collection, id),
    }
}

pub fn address_resolution_error(address: &str) -> Error {
    Error {
        code: ADDRESS_RESOLUTION,
        message: format!("could not resolve address: {}", address),
    }
}

pub fn insufficient_waypoints_error(count: usize) -> Error {
    Error {
        code: INSUFFICIENT_WAYPOINTS,
        message: format!("a route needs at least 2 valid waypoints, got {}", count),
    }
}

pub fn no_route_error(message: Option<String>) -> Error {
    Error {
        code: NO_ROUTE,
        message: message.unwrap_or_else(|| "no route found between the given points".into()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::body::HttpBody;

    pub(crate) async fn response_body(response: impl IntoResponse) -> serde_json::Value {
        let mut body = response.into_response().into_body();
        let bytes = body.data().await.unwrap().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            address_resolution_error("Rua X").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(no_route_error(None).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            insufficient_waypoints_error(1).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            not_found_error("routes", "x").status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn server_errors_map_to_500() {
        assert_eq!(
            configuration_error("GEMINI_API_KEY").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            upstream_error("gemini", 503, "busy").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            malformed_payload_error("no candidates").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_error_embeds_status_and_body() {
        let err = upstream_error("openrouteservice", 403, "Access to this API has been disallowed");

        assert_eq!(err.code, UPSTREAM);
        assert!(err.message.contains("403"));
        assert!(err.message.contains("disallowed"));
    }

    #[tokio::test]
    async fn transport_errors_hide_the_request_url() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/geocode/v1/json?q=Rua+X&key=SECRET-KEY-123")
            .send()
            .await
            .unwrap_err();

        let err = Error::from(err);
        assert_eq!(err.code, TRANSPORT);
        assert!(!err.message.contains("SECRET-KEY-123"));

        let body = response_body(err).await;
        assert_eq!(body["code"], TRANSPORT);
        assert!(!body["error"].as_str().unwrap().contains("SECRET-KEY-123"));
    }

    #[test]
    fn address_resolution_names_the_address() {
        let err = address_resolution_error("xqzv plm 99");

        assert!(err.message.ends_with("xqzv plm 99"));
        assert!(err.is_client_error());
    }

    #[test]
    fn no_route_falls_back_to_generic_message() {
        assert_eq!(
            no_route_error(None).message,
            "no route found between the given points"
        );
        assert_eq!(
            no_route_error(Some("Could not find routable point".into())).message,
            "Could not find routable point"
        );
    }
}
