use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::error::DatabaseError;

pub const PREFER_REPRESENTATION: &str = "return=representation";
pub const PREFER_MINIMAL: &str = "return=minimal";

/// PostgREST error payload, as returned for rejected statements.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

/// One store session. Each instance owns its own HTTP connection pool, so a
/// client built per request is never shared with another request.
#[derive(Debug)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
}

impl SupabaseClient {
    pub fn connect(config: &AppConfig) -> Result<Self, DatabaseError> {
        if !config.is_configured() {
            return Err(DatabaseError::Connection(
                "database is not configured (SUPABASE_URL / SUPABASE_SERVICE_KEY)".to_string(),
            ));
        }

        let client = Client::builder()
            .default_headers(Self::default_headers(&config.supabase_service_key)?)
            .build()
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
        })
    }

    fn default_headers(service_key: &str) -> Result<HeaderMap, DatabaseError> {
        let invalid_key = |_| DatabaseError::Connection("service key is not a valid header value".to_string());

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(service_key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", service_key)).map_err(invalid_key)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Headers asking PostgREST how much of the written rows to send back.
    pub fn prefer(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static(value));
        headers
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, DatabaseError>
    where T: DeserializeOwned {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(&self, method: Method, path: &str,
                                         body: Option<Value>, headers: Option<HeaderMap>)
                                         -> Result<T, DatabaseError>
    where T: DeserializeOwned {
        let response = self.send(method, path, body, headers).await?;

        response.json::<T>()
            .await
            .map_err(|e| DatabaseError::Decode(format!("{}: {}", path, e)))
    }

    /// Runs a statement whose response body is not needed (`Prefer: return=minimal`).
    pub async fn execute(&self, method: Method, path: &str,
                         body: Option<Value>, headers: Option<HeaderMap>)
                         -> Result<(), DatabaseError> {
        self.send(method, path, body, headers).await?;
        Ok(())
    }

    async fn send(&self, method: Method, path: &str,
                  body: Option<Value>, headers: Option<HeaderMap>)
                  -> Result<Response, DatabaseError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, &url);

        if let Some(extra) = headers {
            req = req.headers(extra);
        }

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send()
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text()
                .await
                .map_err(|e| DatabaseError::Connection(e.to_string()))?;
            error!("Database error ({}): {}", status, error_text);

            return Err(classify(status, &error_text));
        }

        Ok(response)
    }
}

fn classify(status: StatusCode, body: &str) -> DatabaseError {
    let (code, message) = match serde_json::from_str::<PostgrestError>(body) {
        Ok(PostgrestError { code, message: Some(message), details }) => {
            let message = match details {
                Some(details) if !details.is_empty() => format!("{} ({})", message, details),
                _ => message,
            };
            (code, message)
        }
        Ok(PostgrestError { code, .. }) => (code, body.to_string()),
        Err(_) => (None, body.to_string()),
    };

    match status.as_u16() {
        401 | 403 => DatabaseError::Auth(message),
        400..=499 => DatabaseError::Rejected {
            status: status.as_u16(),
            code,
            message,
        },
        _ => DatabaseError::Unavailable {
            status: status.as_u16(),
            message,
        },
    }
}
