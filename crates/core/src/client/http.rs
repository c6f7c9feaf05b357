//! reqwest-backed ticket store client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{ClientError, TicketApi};
use crate::config::ClientConfig;
use crate::ticket::{NewTicket, Ticket, TicketUpdate};

/// Error body returned by the ticket store.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the ticket store.
#[derive(Debug, Clone)]
pub struct HttpTicketClient {
    client: Client,
    base_url: String,
}

impl HttpTicketClient {
    /// Create a new client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        if config.base_url.is_empty() {
            return Err(ClientError::NotConfigured(
                "base_url is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a response into a decoded body, or an error carrying the store's message.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }
}

fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::HttpError(e)
    }
}

#[async_trait]
impl TicketApi for HttpTicketClient {
    async fn list_tickets(&self) -> Result<Vec<Ticket>, ClientError> {
        let url = self.url("/tickets");
        debug!("Fetching tickets from {}", url);

        let response = self.client.get(&url).send().await.map_err(send_error)?;
        let tickets: Vec<Ticket> = Self::decode(response).await?;

        debug!(count = tickets.len(), "Fetched tickets");
        Ok(tickets)
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, ClientError> {
        let url = self.url("/ticket");
        debug!(title = %ticket.title, "Creating ticket");

        let response = self
            .client
            .post(&url)
            .json(ticket)
            .send()
            .await
            .map_err(send_error)?;

        Self::decode(response).await
    }

    async fn update_ticket(&self, update: &TicketUpdate) -> Result<Ticket, ClientError> {
        let url = self.url(&format!("/ticket/{}", urlencoding::encode(&update.id)));
        debug!(ticket_id = %update.id, status = %update.status, "Updating ticket");

        let response = self
            .client
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(send_error)?;

        Self::decode(response).await
    }
}
