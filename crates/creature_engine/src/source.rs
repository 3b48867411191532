use std::time::Duration;

use creature_logging::{creature_debug, creature_info};
use futures_util::future::try_join_all;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;

use crate::wire::{DetailResponse, ListResponse};
use crate::{CreatureRecord, FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound for any single response body.
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Remote catalog that hands out creatures a page at a time.
///
/// Stateless per call. A page shorter than `limit` (including empty) is a
/// valid answer.
#[async_trait::async_trait]
pub trait PagingSource: Send + Sync {
    async fn fetch_page(&self, offset: u64, limit: u32)
        -> Result<Vec<CreatureRecord>, FetchError>;
}

/// Paging source backed by the PokeAPI REST endpoints.
///
/// One page is the list endpoint followed by one detail request per entry,
/// issued concurrently. The page fails as a whole if any request fails.
#[derive(Debug, Clone)]
pub struct PokeApiSource {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl PokeApiSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn list_url(&self, offset: u64, limit: u32) -> Result<reqwest::Url, FetchError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let mut url = reqwest::Url::parse(&format!("{base}/pokemon"))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: reqwest::Url) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{status} for {url}"),
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

        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, format!("{url}: {err}")))
    }
}

#[async_trait::async_trait]
impl PagingSource for PokeApiSource {
    async fn fetch_page(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<CreatureRecord>, FetchError> {
        let list_url = self.list_url(offset, limit)?;
        let list: ListResponse = self.get_json(list_url).await?;
        creature_debug!(
            "List offset={} limit={} returned {} entries",
            offset,
            limit,
            list.results.len()
        );

        let details = list.results.into_iter().map(|entry| async move {
            let url = reqwest::Url::parse(&entry.url)
                .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
            let detail: DetailResponse = self.get_json(url).await?;
            Ok::<_, FetchError>(CreatureRecord::from(detail))
        });
        let records = try_join_all(details).await?;

        creature_info!("Fetched {} creatures at offset {}", records.len(), offset);
        Ok(records)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_url_carries_offset_and_limit() {
        let source = PokeApiSource::new(FetchSettings {
            base_url: "https://example.com/api/v2/".to_string(),
            ..FetchSettings::default()
        })
        .unwrap();
        let url = source.list_url(40, 20).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/v2/pokemon?offset=40&limit=20"
        );
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let source = PokeApiSource::new(FetchSettings {
            base_url: "not a url".to_string(),
            ..FetchSettings::default()
        })
        .unwrap();
        let err = source.list_url(0, 20).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
