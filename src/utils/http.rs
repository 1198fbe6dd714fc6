// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::error::Result;
use crate::models::ApiConfig;

/// Create a configured asynchronous HTTP client for the content API.
pub fn create_async_client(config: &ApiConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Run `future`, failing with a timeout error if it takes longer than `secs`.
pub async fn with_timeout<T, F>(context: &str, secs: u64, future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    match tokio::time::timeout(Duration::from_secs(secs), future).await {
        Ok(result) => result,
        Err(_) => Err(crate::error::AppError::timeout(context, secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_create_client_from_defaults() {
        assert!(create_async_client(&ApiConfig::default()).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expires() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, AppError>(1)
        };
        let result = with_timeout("slow", 10, slow).await;
        assert!(matches!(result, Err(AppError::Timeout { secs: 10, .. })));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_through() {
        let fast = async { Ok::<_, AppError>(7) };
        assert_eq!(with_timeout("fast", 10, fast).await.unwrap(), 7);
    }
}
