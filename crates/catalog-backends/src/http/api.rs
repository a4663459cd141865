use crate::error::BackendError;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Join a base URL and a path segment with exactly one slash
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_matches('/'))
}

async fn send(request: RequestBuilder, url: &str) -> Result<Response, BackendError> {
    request.send().await.map_err(|source| {
        warn!("Request to {} failed: {}", url, source);
        BackendError::Http {
            url: url.to_string(),
            source,
        }
    })
}

async fn check_status(response: Response, url: &str) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, BackendError> {
    let bytes = response.bytes().await.map_err(|source| BackendError::Http {
        url: url.to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::decode(format!("response from {}", url), e))
}

pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, BackendError> {
    debug!("GET {}", url);
    let response = send(client.get(url), url).await?;
    let response = check_status(response, url).await?;
    read_json(response, url).await
}

/// GET that maps 404 to `None`
pub async fn get_json_opt<T: DeserializeOwned>(client: &Client, url: &str) -> Result<Option<T>, BackendError> {
    debug!("GET {}", url);
    let response = send(client.get(url), url).await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let response = check_status(response, url).await?;
    read_json(response, url).await.map(Some)
}

pub async fn post_json<B, T>(client: &Client, url: &str, body: &B) -> Result<T, BackendError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    debug!("POST {}", url);
    let response = send(client.post(url).json(body), url).await?;
    let response = check_status(response, url).await?;
    read_json(response, url).await
}

pub async fn put_json<B, T>(client: &Client, url: &str, body: &B) -> Result<T, BackendError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    debug!("PUT {}", url);
    let response = send(client.put(url).json(body), url).await?;
    let response = check_status(response, url).await?;
    read_json(response, url).await
}

/// PUT whose response may be empty (204 or zero-length 200)
pub async fn put_json_opt(client: &Client, url: &str, body: &Value) -> Result<Option<Value>, BackendError> {
    debug!("PUT {}", url);
    let response = send(client.put(url).json(body), url).await?;
    let response = check_status(response, url).await?;
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let bytes = response.bytes().await.map_err(|source| BackendError::Http {
        url: url.to_string(),
        source,
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| BackendError::decode(format!("response from {}", url), e))
}

pub async fn delete(client: &Client, url: &str) -> Result<StatusCode, BackendError> {
    debug!("DELETE {}", url);
    let response = send(client.delete(url), url).await?;
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(status);
    }
    check_status(response, url).await.map(|r| r.status())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://localhost:3000", "movies"), "http://localhost:3000/movies");
        assert_eq!(join_url("http://localhost:3000/", "/movies/"), "http://localhost:3000/movies");
        assert_eq!(join_url("http://host/api/", "favorites"), "http://host/api/favorites");
    }
}
