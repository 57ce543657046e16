use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use super::config::{endpoint_url, prepare_headers, HOME_TIMELINE_PATH, PUBLISH_PATH};
use super::parsing::{decode_item, decode_page};
use super::TimelineSource;
use crate::utils::app_config::AppConfig;
use crate::utils::errors::TimelineError;
use crate::utils::reqwest_client::init_client;
use crate::utils::timeline_item::TimelineItem;

/// Oldest id the home timeline is requested from; the API rejects 0.
const SINCE_ID: &str = "1";

pub struct HttpTimelineSource {
    base_url: String,
    access_token: String,
    page_size: u32,
    client: Arc<Client>,
}

impl HttpTimelineSource {
    pub fn new(base_url: &str, access_token: &str, page_size: u32, client: Arc<Client>) -> Self {
        Self {
            base_url: base_url.to_string(),
            access_token: access_token.to_string(),
            page_size,
            client,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let client = init_client(config.request_timeout());
        Self::new(config.api_url(), config.access_token(), config.page_size(), client)
    }

    async fn get_page(&self, params: &[(&str, String)]) -> Result<Vec<TimelineItem>, TimelineError> {
        let url = endpoint_url(&self.base_url, HOME_TIMELINE_PATH);
        log::debug!("[get_page] GET {} params: {:?}", &url, params);
        let request = self.client.get(&url).query(params);
        let body = self.send(request, &url).await?;
        decode_page(&body)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Vec<u8>, TimelineError> {
        let headers = prepare_headers(&self.access_token)?;
        let response = request.headers(headers).send().await.map_err(|e| {
            log::error!("[send] Failed to send the request to {}: {:?}", url, e);
            TimelineError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let cause = match response.text().await {
                Ok(text) if !text.is_empty() => text,
                _ => status.canonical_reason().unwrap_or("request failed").to_string(),
            };
            log::error!("[send] Request to {} failed with status: {}, body: {}", url, status, &cause);
            return Err(TimelineError::Network {
                status_code: Some(status.as_u16()),
                cause,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            log::error!("[send] Unable to read response body from {}: {:?}", url, e);
            TimelineError::from(e)
        })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TimelineSource for HttpTimelineSource {
    async fn fetch_home(&self) -> Result<Vec<TimelineItem>, TimelineError> {
        let params = [
            ("count", self.page_size.to_string()),
            ("since_id", SINCE_ID.to_string()),
        ];
        let items = self.get_page(&params).await?;
        log::info!("[fetch_home] Fetched {} items", items.len());
        Ok(items)
    }

    async fn fetch_older_than(&self, cursor_id: u64) -> Result<Vec<TimelineItem>, TimelineError> {
        // max_id is inclusive on the server, the cursor is exclusive
        let max_id = match cursor_id.checked_sub(1) {
            Some(max_id) => max_id,
            None => {
                log::debug!("[fetch_older_than] Cursor is 0, nothing older to fetch");
                return Ok(Vec::new());
            }
        };
        let params = [
            ("count", self.page_size.to_string()),
            ("max_id", max_id.to_string()),
        ];
        let items = self.get_page(&params).await?;
        log::info!("[fetch_older_than] Fetched {} items older than {}", items.len(), cursor_id);
        Ok(items)
    }

    async fn publish(&self, body: &str) -> Result<TimelineItem, TimelineError> {
        let url = endpoint_url(&self.base_url, PUBLISH_PATH);
        log::debug!("[publish] POST {}", &url);
        let request = self.client.post(&url).form(&[("status", body)]);
        let response_body = self.send(request, &url).await?;
        let item = decode_item(&response_body)?;
        log::info!("[publish] Published item {}", item.id());
        Ok(item)
    }
}
