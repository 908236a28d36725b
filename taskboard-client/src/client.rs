//! HTTP client for the task board API.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use taskboard::card::AddCard;
use taskboard::{BoardListing, Card, CardFilter, CardId, CardPatch};

/// Default server URL.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// How long the startup health probe may take before the server is
/// considered unreachable.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    deleted: Card,
}

/// Extract a human-readable message from a JSON error body.
///
/// Tries `error`, then `message`, then falls back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    body.to_string()
}

/// Build the query string for a card listing.
fn filter_query(filter: &CardFilter) -> String {
    let mut params = Vec::new();
    if let Some(column) = &filter.column {
        params.push(format!("column={}", urlencoding::encode(column.as_str())));
    }
    if let Some(assignee) = &filter.assignee {
        params.push(format!("assignee={}", urlencoding::encode(assignee)));
    }
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

/// The remote operations a sync session relies on.
#[async_trait]
pub trait RemoteBoard: Send + Sync {
    /// Succeeds only when the server answers the health check with 2xx
    async fn health(&self) -> Result<()>;

    /// Columns and cards
    async fn fetch_board(&self) -> Result<BoardListing>;

    async fn fetch_cards(&self) -> Result<Vec<Card>> {
        Ok(self.fetch_board().await?.cards)
    }

    async fn create(&self, card: &AddCard) -> Result<Card>;

    async fn update(&self, id: &CardId, patch: &CardPatch) -> Result<Card>;

    async fn delete(&self, id: &CardId) -> Result<Card>;

    /// Overwrite the whole card collection
    async fn replace_all(&self, cards: &[Card]) -> Result<()>;
}

/// Client for the task board HTTP API.
#[derive(Debug, Clone)]
pub struct BoardClient {
    client: Client,
    base_url: String,
    probe_timeout: Duration,
}

impl Default for BoardClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl BoardClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn cards_url(&self) -> String {
        format!("{}/api/cards", self.base_url)
    }

    fn card_url(&self, id: &CardId) -> String {
        format!(
            "{}/api/cards/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }

    /// Map an HTTP response to a `ClientError` based on status code.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);

        match status_code {
            400 => Err(ClientError::Validation(message)),
            404 => Err(ClientError::NotFound(message)),
            _ => Err(ClientError::Api {
                status: status_code,
                message,
            }),
        }
    }

    /// Check the server's health endpoint.
    pub async fn health_status(&self) -> Result<HealthStatus> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(self.probe_timeout)
            .send()
            .await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// List cards, optionally filtered by column and assignee.
    pub async fn list_cards(&self, filter: &CardFilter) -> Result<BoardListing> {
        let url = format!("{}{}", self.cards_url(), filter_query(filter));
        let response = self.client.get(url).send().await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch one card.
    pub async fn get_card(&self, id: &CardId) -> Result<Card> {
        let response = self.client.get(self.card_url(id)).send().await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Create a card; the server assigns the id.
    pub async fn create_card(&self, card: &AddCard) -> Result<Card> {
        let response = self.client.post(self.cards_url()).json(card).send().await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Apply a partial update.
    pub async fn update_card(&self, id: &CardId, patch: &CardPatch) -> Result<Card> {
        let response = self
            .client
            .patch(self.card_url(id))
            .json(patch)
            .send()
            .await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Delete a card, returning the removed card.
    pub async fn delete_card(&self, id: &CardId) -> Result<Card> {
        let response = self.client.delete(self.card_url(id)).send().await?;
        let response = self.check_response(response).await?;
        let body: DeleteResponse = response.json().await?;
        Ok(body.deleted)
    }

    /// Replace the server's whole card collection.
    pub async fn replace_cards(&self, cards: &[Card]) -> Result<()> {
        let response = self
            .client
            .put(self.cards_url())
            .json(&serde_json::json!({ "cards": cards }))
            .send()
            .await?;
        self.check_response(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteBoard for BoardClient {
    async fn health(&self) -> Result<()> {
        self.health_status().await.map(|_| ())
    }

    async fn fetch_board(&self) -> Result<BoardListing> {
        self.list_cards(&CardFilter::default()).await
    }

    async fn create(&self, card: &AddCard) -> Result<Card> {
        self.create_card(card).await
    }

    async fn update(&self, id: &CardId, patch: &CardPatch) -> Result<Card> {
        self.update_card(id, patch).await
    }

    async fn delete(&self, id: &CardId) -> Result<Card> {
        self.delete_card(id).await
    }

    async fn replace_all(&self, cards: &[Card]) -> Result<()> {
        self.replace_cards(cards).await
    }
}
