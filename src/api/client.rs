use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::config::ClientConfig;

/// API error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Unauthorized - please log in")]
    Unauthorized,
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

const CSRF_HEADER: &str = "X-CSRFToken";

/// API client for the account AJAX endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Create a client for the configured origin, picking up the CSRF cookie
    pub fn new(config: &ClientConfig) -> Self {
        let csrf_token = document_cookies()
            .and_then(|cookies| cookie_value(&cookies, &config.csrf_cookie_name));

        Self::with_token(&config.api_url, csrf_token)
    }

    pub fn with_token(base_url: &str, csrf_token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request and deserialize the response
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = Request::get(&self.url(path))
            .credentials(web_sys::RequestCredentials::Include) // Send cookies
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make a GET request, only caring that the server answered
    pub async fn get_discarding(&self, path: &str) -> Result<(), ApiError> {
        let response = Request::get(&self.url(path))
            .credentials(web_sys::RequestCredentials::Include)
            .send()
            .await?;

        log::debug!("GET {} answered {}", path, response.status());
        Ok(())
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .with_csrf(Request::post(&self.url(path)))
            .credentials(web_sys::RequestCredentials::Include)
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await?;

        self.handle_response(response).await
    }

    fn with_csrf(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.csrf_token {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        decode_reply(status, &body)
    }
}

/// Decode a reply body, whatever its status. The account endpoints answer
/// rejections as JSON, sometimes with a 4xx status.
pub fn decode_reply<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let parse_error = match serde_json::from_str(body) {
        Ok(reply) => return Ok(reply),
        Err(e) => e,
    };

    match status {
        401 | 403 => Err(ApiError::Unauthorized),
        200..=299 => Err(ApiError::Deserialization(parse_error.to_string())),
        _ => Err(ApiError::Http {
            status,
            message: body.to_string(),
        }),
    }
}

/// Find a cookie by name in a `document.cookie` string
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn document_cookies() -> Option<String> {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .and_then(|d| d.cookie().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn document_cookies() -> Option<String> {
    None
}
