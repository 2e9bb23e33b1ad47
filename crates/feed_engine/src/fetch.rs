use std::time::Duration;

use feed_core::{Page, Query};
use futures_util::StreamExt;
use url::Url;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Root of the search service; `/items` is appended to it.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Parameters of one `GET /items` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: Query,
    pub offset: usize,
    pub limit: usize,
}

#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPageFetcher {
    settings: FetchSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestPageFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let endpoint = items_endpoint(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    /// Full request URL for `request`. The `q` parameter is omitted for the empty query.
    pub fn page_url(&self, request: &PageRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("offset", &request.offset.to_string())
                .append_pair("limit", &request.limit.to_string());
            if !request.query.is_empty() {
                pairs.append_pair("q", request.query.as_str());
            }
        }
        url
    }
}

fn items_endpoint(base_url: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::new(FailureKind::InvalidUrl, "base url cannot have a path"))?
        .pop_if_empty()
        .push("items");
    url.set_query(None);
    Ok(url)
}

#[async_trait::async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, FetchError> {
        let url = self.page_url(request);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice::<Page>(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(base_url: &str) -> ReqwestPageFetcher {
        ReqwestPageFetcher::new(FetchSettings {
            base_url: base_url.to_string(),
            ..FetchSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn url_carries_offset_limit_and_query() {
        let request = PageRequest {
            query: Query::new("Mock Post #4"),
            offset: 40,
            limit: 20,
        };
        let url = fetcher("http://localhost:3000").page_url(&request);
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/items?offset=40&limit=20&q=mock+post+%234"
        );
    }

    #[test]
    fn url_omits_empty_query_and_keeps_base_path() {
        let request = PageRequest {
            query: Query::default(),
            offset: 0,
            limit: 20,
        };
        let url = fetcher("http://localhost:3000/api/").page_url(&request);
        assert_eq!(url.as_str(), "http://localhost:3000/api/items?offset=0&limit=20");
    }

    #[test]
    fn rejects_unusable_base_url() {
        let err = ReqwestPageFetcher::new(FetchSettings {
            base_url: "not a url".to_string(),
            ..FetchSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
