//! Paginated collection fetch against the Canvas REST API.

use std::time::Duration;

use reqwest::header::LINK;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::FeedConfig;
use crate::error::FeedResult;
use crate::pagination::next_link;

/// Bytes of an error body kept in the log.
const ERROR_BODY_LOG_LIMIT: usize = 500;

/// Authenticated client for one Canvas instance.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct CanvasClient {
    http: reqwest::Client,
    access_token: String,
    max_pages: usize,
}

impl CanvasClient {
    pub fn new(config: &FeedConfig) -> FeedResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("assignfeed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(CanvasClient {
            http,
            access_token: config.access_token.clone(),
            max_pages: config.max_pages,
        })
    }

    /// GET `start_url` and every page after it, following `Link: <..>; rel="next"`.
    ///
    /// Never fails: a transport error, non-success status or undecodable
    /// body ends pagination and the items gathered so far are returned.
    /// Items keep server order, first page first.
    pub async fn fetch_all<T: DeserializeOwned>(&self, start_url: Url) -> Vec<T> {
        let mut items: Vec<T> = Vec::new();
        let mut next = Some(start_url);
        let mut page = 0usize;

        while let Some(url) = next.take() {
            if page == self.max_pages {
                tracing::warn!(
                    max_pages = self.max_pages,
                    %url,
                    "Page limit reached, not following further links"
                );
                break;
            }
            page += 1;

            tracing::debug!(page, %url, "Requesting page");

            let response = match self
                .http
                .get(url.clone())
                .bearer_auth(&self.access_token)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(page, error = %e, kept = items.len(), "Request failed, returning partial results");
                    break;
                }
            };

            let status = response.status();
            tracing::info!(page, %status, "Response received");

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let body: String = body.chars().take(ERROR_BODY_LOG_LIMIT).collect();
                tracing::warn!(page, %status, %body, kept = items.len(), "Error response, returning partial results");
                break;
            }

            let link = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_link)
                .map(str::to_owned);

            let page_items: Vec<T> = match response.json().await {
                Ok(page_items) => page_items,
                Err(e) => {
                    tracing::warn!(page, error = %e, kept = items.len(), "Undecodable page, returning partial results");
                    break;
                }
            };

            tracing::info!(page, count = page_items.len(), "Received items");
            items.extend(page_items);

            next = link.and_then(|link| match url.join(&link) {
                Ok(next_url) => Some(next_url),
                Err(e) => {
                    tracing::warn!(%link, error = %e, "Ignoring unparseable next link");
                    None
                }
            });
        }

        tracing::info!(total = items.len(), pages = page, "Collection fetched");
        items
    }
}
