//! Mock ticket API for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use uuid::Uuid;

use crate::client::{ClientError, TicketApi};
use crate::ticket::{NewTicket, Ticket, TicketStatus, TicketUpdate};

/// Mock implementation of the TicketApi trait.
///
/// Behaves like a small in-memory ticket store and provides controllable
/// behavior for testing:
/// - Seed the tickets the "server" holds
/// - Track create/update requests for assertions
/// - Simulate failures
/// - Hold list/create responses until the test releases them
///
/// # Example
///
/// ```rust,ignore
/// use helpdesk_core::testing::{MockTicketApi, fixtures};
///
/// let api = MockTicketApi::with_tickets(fixtures::mixed_tickets());
///
/// // Next call fails
/// api.fail_next("store unavailable").await;
/// assert!(api.list_tickets().await.is_err());
///
/// // Hold the next list until released with an explicit payload
/// let release = api.hold_next_list().await;
/// release.send(vec![]).unwrap();
/// ```
#[derive(Debug)]
pub struct MockTicketApi {
    /// Tickets the mock store holds, in insertion order.
    tickets: Arc<RwLock<Vec<Ticket>>>,
    /// Recorded create requests.
    creates: Arc<RwLock<Vec<NewTicket>>>,
    /// Recorded update requests.
    updates: Arc<RwLock<Vec<TicketUpdate>>>,
    /// Number of list calls received.
    list_calls: Arc<RwLock<usize>>,
    /// Number of create calls received.
    create_calls: Arc<RwLock<usize>>,
    /// If set, the next operation will fail with this message.
    next_error: Arc<RwLock<Option<String>>>,
    /// Pending list gates; each list call consumes one and answers with its payload.
    list_gates: Arc<RwLock<VecDeque<oneshot::Receiver<Vec<Ticket>>>>>,
    /// Pending create gates; each create call waits for one to fire.
    create_gates: Arc<RwLock<VecDeque<oneshot::Receiver<()>>>>,
}

impl Default for MockTicketApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTicketApi {
    /// Create a mock holding no tickets.
    pub fn new() -> Self {
        Self::with_tickets(Vec::new())
    }

    /// Create a mock pre-populated with tickets.
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets: Arc::new(RwLock::new(tickets)),
            creates: Arc::new(RwLock::new(Vec::new())),
            updates: Arc::new(RwLock::new(Vec::new())),
            list_calls: Arc::new(RwLock::new(0)),
            create_calls: Arc::new(RwLock::new(0)),
            next_error: Arc::new(RwLock::new(None)),
            list_gates: Arc::new(RwLock::new(VecDeque::new())),
            create_gates: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Replace the tickets the mock store holds.
    pub async fn set_tickets(&self, tickets: Vec<Ticket>) {
        *self.tickets.write().await = tickets;
    }

    /// Make the next operation fail with a 500 carrying `message`.
    pub async fn fail_next(&self, message: impl Into<String>) {
        *self.next_error.write().await = Some(message.into());
    }

    /// Hold the next list call until the returned sender delivers its result.
    ///
    /// Gates are consumed in call order. Dropping the sender makes the held
    /// call fail with a timeout.
    pub async fn hold_next_list(&self) -> oneshot::Sender<Vec<Ticket>> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.write().await.push_back(rx);
        tx
    }

    /// Hold the next create call until the returned sender fires.
    pub async fn hold_next_create(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.create_gates.write().await.push_back(rx);
        tx
    }

    // ========================================================================
    // Assertions
    // ========================================================================

    pub async fn recorded_creates(&self) -> Vec<NewTicket> {
        self.creates.read().await.clone()
    }

    pub async fn recorded_updates(&self) -> Vec<TicketUpdate> {
        self.updates.read().await.clone()
    }

    pub async fn list_call_count(&self) -> usize {
        *self.list_calls.read().await
    }

    pub async fn create_call_count(&self) -> usize {
        *self.create_calls.read().await
    }

    /// Yield until at least `n` list calls have been received.
    pub async fn wait_for_list_calls(&self, n: usize) {
        while self.list_call_count().await < n {
            tokio::task::yield_now().await;
        }
    }

    /// Yield until at least `n` create calls have been received.
    pub async fn wait_for_create_calls(&self, n: usize) {
        while self.create_call_count().await < n {
            tokio::task::yield_now().await;
        }
    }

    async fn take_error(&self) -> Option<ClientError> {
        self.next_error
            .write()
            .await
            .take()
            .map(|message| ClientError::ApiError {
                status: 500,
                message,
            })
    }
}

#[async_trait]
impl TicketApi for MockTicketApi {
    async fn list_tickets(&self) -> Result<Vec<Ticket>, ClientError> {
        let gate = self.list_gates.write().await.pop_front();
        *self.list_calls.write().await += 1;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        match gate {
            Some(rx) => rx.await.map_err(|_| ClientError::Timeout),
            None => Ok(self.tickets.read().await.clone()),
        }
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, ClientError> {
        let gate = self.create_gates.write().await.pop_front();
        *self.create_calls.write().await += 1;
        self.creates.write().await.push(ticket.clone());

        if let Some(rx) = gate {
            rx.await.map_err(|_| ClientError::Timeout)?;
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let now = Utc::now();
        let created = Ticket {
            id: Uuid::new_v4().simple().to_string(),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            contact_info: ticket.contact_info.clone(),
            status: TicketStatus::TicketCreated,
            created_at: now,
            updated_at: now,
        };
        self.tickets.write().await.push(created.clone());

        Ok(created)
    }

    async fn update_ticket(&self, update: &TicketUpdate) -> Result<Ticket, ClientError> {
        self.updates.write().await.push(update.clone());

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let mut tickets = self.tickets.write().await;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == update.id)
            .ok_or_else(|| ClientError::ApiError {
                status: 404,
                message: "Ticket not found".to_string(),
            })?;

        ticket.title = update.title.clone();
        ticket.description = update.description.clone();
        ticket.contact_info = update.contact_info.clone();
        ticket.status = update.status;
        ticket.updated_at = Utc::now().max(ticket.created_at);

        Ok(ticket.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_list_returns_seeded_tickets() {
        let api = MockTicketApi::with_tickets(fixtures::mixed_tickets());
        let tickets = api.list_tickets().await.unwrap();
        assert_eq!(tickets, fixtures::mixed_tickets());
        assert_eq!(api.list_call_count().await, 1);
    }

    #[tokio::test]
    async fn test_fail_next_only_fails_once() {
        let api = MockTicketApi::new();
        api.fail_next("nope").await;

        assert!(matches!(
            api.list_tickets().await,
            Err(ClientError::ApiError { status: 500, .. })
        ));
        assert!(api.list_tickets().await.is_ok());
    }

    #[tokio::test]
    async fn test_held_list_answers_with_released_payload() {
        let api = MockTicketApi::with_tickets(fixtures::mixed_tickets());
        let release = api.hold_next_list().await;

        let payload = vec![fixtures::ticket("x", "held", TicketStatus::Pending)];
        release.send(payload.clone()).unwrap();

        assert_eq!(api.list_tickets().await.unwrap(), payload);
    }

    #[tokio::test]
    async fn test_dropped_gate_times_out() {
        let api = MockTicketApi::new();
        drop(api.hold_next_list().await);

        assert!(matches!(api.list_tickets().await, Err(ClientError::Timeout)));
    }
}
