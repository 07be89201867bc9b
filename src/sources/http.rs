use crate::config::SourceConfig;
use crate::sources::error::SourceError;
use log::{debug, info, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// Thin wrapper around a configured `reqwest` client that maps every failure
/// into a [`SourceError`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }

    async fn send(&self, url: &str, query: &[(&str, String)]) -> Result<Response, SourceError> {
        info!("Requesting {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| SourceError::NetworkRequest(url.to_string(), e))?;

        match response.error_for_status() {
            Ok(resp) => Ok(resp),
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                Err(match e.status() {
                    Some(status) => SourceError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    },
                    None => SourceError::NetworkRequest(url.to_string(), e),
                })
            }
        }
    }

    pub async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, SourceError> {
        let body = self
            .send(url, query)
            .await?
            .text()
            .await
            .map_err(|e| SourceError::NetworkRequest(url.to_string(), e))?;
        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let body = self.get_text(url, query).await?;
        parse_json(&body, url)
    }
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str, url: &str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|source| SourceError::JsonParse {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request on a local port with `response`.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/data", addr)
    }

    // local server, so bypass any proxy from the environment
    fn fetcher() -> HttpFetcher {
        let client = Client::builder()
            .no_proxy()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap();
        HttpFetcher { client }
    }

    #[tokio::test]
    async fn test_error_status_is_http_status() {
        let url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        match fetcher().get_text(&url, &[]).await {
            Err(SourceError::HttpStatus {
                url: failed,
                status,
                ..
            }) => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(failed, url);
            }
            other => panic!("expected an HTTP status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        #[derive(Debug, Deserialize)]
        struct Payload {
            data: Vec<u32>,
        }

        let url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 16\r\nconnection: close\r\n\r\n{\"data\": [1, 2]}",
        )
        .await;
        let payload: Payload = fetcher().get_json(&url, &[]).await.unwrap();
        assert_eq!(payload.data, vec![1, 2]);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let result = parse_json::<Vec<u32>>("<html>", "https://example.org");
        assert!(matches!(result, Err(SourceError::JsonParse { .. })));
    }
}
