//! Ticket table session: the cached ticket collection plus its view state.
//!
//! The session is the only owner of the cache and of the sort/filter state.
//! Everything shown is derived from both on demand, so the display can never
//! drift from the cache.

mod notifier;

pub use notifier::{LogNotifier, Notice, NoticeLevel, Notifier};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::client::{ClientError, TicketApi};
use crate::ticket::{NewTicket, Ticket, TicketStatus, TicketUpdate};
use crate::view::{SortKey, SortSpec, TicketRow, TicketView};

const TICKET_CREATED_TEXT: &str = "Ticket created successfully";
const TICKET_UPDATED_TEXT: &str = "Ticket updated successfully";
const CREATE_FAILED_TEXT: &str = "Failed to create ticket";
const UPDATE_FAILED_TEXT: &str = "Failed to update ticket";

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched collection replaced the cache.
    Applied { count: usize },
    /// A fetch started later had already been applied; this result was dropped.
    Stale,
}

#[derive(Debug, Default)]
struct SessionState {
    tickets: Vec<Ticket>,
    view: TicketView,
    /// Sequence number of the fetch the cache currently holds (0 = none).
    applied_seq: u64,
}

/// Resets the in-flight create flag when the request settles.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// View-model behind the ticket table.
pub struct TicketSession {
    api: Arc<dyn TicketApi>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<SessionState>,
    fetch_seq: AtomicU64,
    creating: AtomicBool,
}

impl std::fmt::Debug for TicketSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketSession")
            .field("api", &"<api>")
            .field("notifier", &"<notifier>")
            .field("fetch_seq", &self.fetch_seq)
            .field("creating", &self.creating)
            .finish()
    }
}

impl TicketSession {
    /// Create a session with an empty cache and no sort or filter.
    pub fn new(api: Arc<dyn TicketApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: RwLock::new(SessionState::default()),
            fetch_seq: AtomicU64::new(0),
            creating: AtomicBool::new(false),
        }
    }

    // ------------------------------------------------------------------------
    // Cache
    // ------------------------------------------------------------------------

    /// Fetch the full ticket list and install it as the cache.
    ///
    /// Each call takes a sequence number when it starts. A result is applied
    /// only if no later-started fetch has been applied already, so the cache
    /// always reflects the most recently initiated successful fetch. On
    /// failure the cache is left as it was.
    pub async fn refresh(&self) -> Result<RefreshOutcome, ClientError> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, "Fetching tickets");

        let tickets = match self.api.list_tickets().await {
            Ok(tickets) => tickets,
            Err(e) => {
                error!(seq, "Failed to fetch tickets: {}", e);
                return Err(e);
            }
        };

        let mut state = self.state.write().await;
        if seq <= state.applied_seq {
            debug!(
                seq,
                applied = state.applied_seq,
                "Discarding stale ticket fetch"
            );
            return Ok(RefreshOutcome::Stale);
        }

        let count = tickets.len();
        state.tickets = tickets;
        state.applied_seq = seq;
        debug!(seq, count, "Ticket cache replaced");

        Ok(RefreshOutcome::Applied { count })
    }

    /// Snapshot of the cached tickets in fetch order.
    pub async fn tickets(&self) -> Vec<Ticket> {
        self.state.read().await.tickets.clone()
    }

    // ------------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------------

    pub async fn toggle_sort(&self, key: SortKey) -> SortSpec {
        self.state.write().await.view.toggle_sort(key)
    }

    /// Returns whether `status` is selected after the toggle.
    pub async fn toggle_status_filter(&self, status: TicketStatus) -> bool {
        self.state.write().await.view.toggle_status_filter(status)
    }

    /// Copy of the current sort and filter state.
    pub async fn view(&self) -> TicketView {
        self.state.read().await.view.clone()
    }

    /// Tickets as currently displayed.
    pub async fn displayed(&self) -> Vec<Ticket> {
        let state = self.state.read().await;
        state
            .view
            .project(&state.tickets)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Rendered rows for the current display.
    pub async fn rows(&self) -> Vec<TicketRow> {
        let state = self.state.read().await;
        state
            .view
            .project(&state.tickets)
            .into_iter()
            .map(TicketRow::from_ticket)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Submit a new ticket.
    ///
    /// On success the user is notified, `on_created` runs once the notice is
    /// acknowledged, and the list is refreshed. On failure the error is logged
    /// and shown, and `on_created` never runs.
    ///
    /// Returns `Ok(None)` without sending anything if another create is still
    /// in flight.
    pub async fn create_ticket<F>(
        &self,
        draft: NewTicket,
        on_created: F,
    ) -> Result<Option<Ticket>, ClientError>
    where
        F: FnOnce(&Ticket) + Send,
    {
        if self.creating.swap(true, Ordering::SeqCst) {
            warn!("Ticket creation already in progress, ignoring submission");
            return Ok(None);
        }

        let result = {
            let _in_flight = InFlight(&self.creating);
            self.api.create_ticket(&draft).await
        };

        let ticket = match result {
            Ok(ticket) => ticket,
            Err(e) => {
                error!("Failed to create ticket: {}", e);
                self.notifier.notify(Notice::error(CREATE_FAILED_TEXT)).await;
                return Err(e);
            }
        };

        info!(ticket_id = %ticket.id, "Ticket created");
        self.notifier.notify(Notice::success(TICKET_CREATED_TEXT)).await;
        on_created(&ticket);
        self.refresh_after_mutation().await;

        Ok(Some(ticket))
    }

    /// Submit edits to an existing ticket.
    ///
    /// The draft is stamped with the current time before sending. Success and
    /// failure are handled as in [`TicketSession::create_ticket`].
    pub async fn update_ticket<F>(
        &self,
        update: TicketUpdate,
        on_updated: F,
    ) -> Result<Ticket, ClientError>
    where
        F: FnOnce(&Ticket) + Send,
    {
        let update = update.touch();

        let ticket = match self.api.update_ticket(&update).await {
            Ok(ticket) => ticket,
            Err(e) => {
                error!(ticket_id = %update.id, "Failed to update ticket: {}", e);
                self.notifier.notify(Notice::error(UPDATE_FAILED_TEXT)).await;
                return Err(e);
            }
        };

        info!(ticket_id = %ticket.id, status = %ticket.status, "Ticket updated");
        self.notifier.notify(Notice::success(TICKET_UPDATED_TEXT)).await;
        on_updated(&ticket);
        self.refresh_after_mutation().await;

        Ok(ticket)
    }

    /// A failed follow-up fetch is already logged and leaves stale data
    /// visible; it does not undo the mutation.
    async fn refresh_after_mutation(&self) {
        let _ = self.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockTicketApi, RecordingNotifier};
    use std::sync::Mutex;

    fn session_with(api: &Arc<MockTicketApi>, notifier: &Arc<RecordingNotifier>) -> TicketSession {
        TicketSession::new(
            Arc::clone(api) as Arc<dyn TicketApi>,
            Arc::clone(notifier) as Arc<dyn Notifier>,
        )
    }

    #[tokio::test]
    async fn test_refresh_replaces_cache() {
        let api = Arc::new(MockTicketApi::with_tickets(fixtures::mixed_tickets()));
        let notifier = Arc::new(RecordingNotifier::new());
        let session = session_with(&api, &notifier);

        assert!(session.tickets().await.is_empty());

        let outcome = session.refresh().await.unwrap();
        assert_eq!(
            outcome,
            RefreshOutcome::Applied {
                count: fixtures::mixed_tickets().len()
            }
        );
        assert_eq!(session.tickets().await, fixtures::mixed_tickets());
    }

    #[tokio::test]
    async fn test_refresh_replaces_cache_wholesale() {
        let api = Arc::new(MockTicketApi::with_tickets(fixtures::mixed_tickets()));
        let notifier = Arc::new(RecordingNotifier::new());
        let session = session_with(&api, &notifier);
        session.refresh().await.unwrap();

        let remaining = vec![fixtures::ticket("t9", "Only one", TicketStatus::Pending)];
        api.set_tickets(remaining.clone()).await;

        assert_eq!(
            session.refresh().await.unwrap(),
            RefreshOutcome::Applied { count: 1 }
        );
        assert_eq!(session.tickets().await, remaining);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_cache() {
        let api = Arc::new(MockTicketApi::with_tickets(fixtures::mixed_tickets()));
        let notifier = Arc::new(RecordingNotifier::new());
        let session = session_with(&api, &notifier);
        session.refresh().await.unwrap();

        api.fail_next("store unavailable").await;
        let result = session.refresh().await;

        assert!(result.is_err());
        assert_eq!(session.tickets().await, fixtures::mixed_tickets());
        // Fetch failures are logged only.
        assert!(notifier.notices().await.is_empty());
    }

    #[tokio::test]
    async fn test_displayed_follows_view_state() {
        let api = Arc::new(MockTicketApi::with_tickets(vec![
            fixtures::ticket("b", "B", TicketStatus::Pending),
            fixtures::ticket("a", "A", TicketStatus::Resolved),
        ]));
        let notifier = Arc::new(RecordingNotifier::new());
        let session = session_with(&api, &notifier);
        session.refresh().await.unwrap();

        let titles = |tickets: Vec<Ticket>| -> Vec<String> {
            tickets.into_iter().map(|t| t.title).collect()
        };

        session.toggle_sort(SortKey::Title).await;
        assert_eq!(titles(session.displayed().await), vec!["A", "B"]);

        session.toggle_sort(SortKey::Title).await;
        assert_eq!(titles(session.displayed().await), vec!["B", "A"]);

        assert!(session.toggle_status_filter(TicketStatus::Pending).await);
        assert_eq!(titles(session.displayed().await), vec!["B"]);

        let rows = session.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, vec!["B".to_string()]);
    }

    #[tokio::test]
    async fn test_view_survives_refresh() {
        let api = Arc::new(MockTicketApi::with_tickets(fixtures::mixed_tickets()));
        let notifier = Arc::new(RecordingNotifier::new());
        let session = session_with(&api, &notifier);

        session.toggle_sort(SortKey::Status).await;
        session.toggle_status_filter(TicketStatus::Accepted).await;
        session.refresh().await.unwrap();

        let view = session.view().await;
        assert_eq!(view.sort(), Some(SortSpec::ascending(SortKey::Status)));
        assert!(view.filter().contains(TicketStatus::Accepted));
        assert!(session
            .displayed()
            .await
            .iter()
            .all(|t| t.status == TicketStatus::Accepted));
    }

    #[tokio::test]
    async fn test_later_fetch_wins_over_slower_earlier_fetch() {
        let api = Arc::new(MockTicketApi::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = Arc::new(session_with(&api, &notifier));

        let release_first = api.hold_next_list().await;
        let release_second = api.hold_next_list().await;

        let first = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.refresh().await }
        });
        api.wait_for_list_calls(1).await;

        let second = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.refresh().await }
        });
        api.wait_for_list_calls(2).await;

        let newer = vec![fixtures::ticket("new", "newer", TicketStatus::Pending)];
        let older = vec![fixtures::ticket("old", "older", TicketStatus::Pending)];

        release_second.send(newer.clone()).unwrap();
        assert_eq!(
            second.await.unwrap().unwrap(),
            RefreshOutcome::Applied { count: 1 }
        );

        release_first.send(older).unwrap();
        assert_eq!(first.await.unwrap().unwrap(), RefreshOutcome::Stale);

        assert_eq!(session.tickets().await, newer);
    }

    #[tokio::test]
    async fn test_earlier_fetch_applies_when_later_one_fails() {
        let api = Arc::new(MockTicketApi::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = Arc::new(session_with(&api, &notifier));

        let release_first = api.hold_next_list().await;

        let first = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.refresh().await }
        });
        api.wait_for_list_calls(1).await;

        api.fail_next("connection reset").await;
        assert!(session.refresh().await.is_err());

        let tickets = vec![fixtures::ticket("1", "only", TicketStatus::Accepted)];
        release_first.send(tickets.clone()).unwrap();
        assert_eq!(
            first.await.unwrap().unwrap(),
            RefreshOutcome::Applied { count: 1 }
        );
        assert_eq!(session.tickets().await, tickets);
    }

    #[tokio::test]
    async fn test_create_then_fetch_contains_new_ticket() {
        let api = Arc::new(MockTicketApi::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = session_with(&api, &notifier);

        let closed = Mutex::new(None);
        let created = session
            .create_ticket(
                NewTicket::new("Laptop", "Screen flickers", "carol@example.com"),
                |ticket| *closed.lock().unwrap() = Some(ticket.id.clone()),
            )
            .await
            .unwrap()
            .expect("create should not be ignored");

        assert!(!created.id.is_empty());
        assert_eq!(created.status, TicketStatus::TicketCreated);
        assert_eq!(closed.lock().unwrap().as_deref(), Some(created.id.as_str()));

        // The follow-up refresh already ran.
        let cached = session.tickets().await;
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, created.id);
        assert_eq!(cached[0].status, TicketStatus::TicketCreated);

        assert_eq!(
            notifier.notices().await,
            vec![Notice::success("Ticket created successfully")]
        );
    }

    #[tokio::test]
    async fn test_create_failure_notifies_and_skips_continuation() {
        let api = Arc::new(MockTicketApi::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = session_with(&api, &notifier);

        api.fail_next("boom").await;
        let mut ran = false;
        let result = session
            .create_ticket(NewTicket::new("t", "d", "c"), |_| ran = true)
            .await;

        assert!(result.is_err());
        assert!(!ran);
        assert_eq!(
            notifier.notices().await,
            vec![Notice::error("Failed to create ticket")]
        );
        assert_eq!(api.list_call_count().await, 0);

        // The in-flight guard was released.
        let retry = session
            .create_ticket(NewTicket::new("t", "d", "c"), |_| {})
            .await
            .unwrap();
        assert!(retry.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_create_is_ignored_while_in_flight() {
        let api = Arc::new(MockTicketApi::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = Arc::new(session_with(&api, &notifier));

        let release = api.hold_next_create().await;
        let first = tokio::spawn({
            let session = Arc::clone(&session);
            async move {
                session
                    .create_ticket(NewTicket::new("first", "d", "c"), |_| {})
                    .await
            }
        });
        api.wait_for_create_calls(1).await;

        let second = session
            .create_ticket(NewTicket::new("second", "d", "c"), |_| {})
            .await
            .unwrap();
        assert!(second.is_none());

        release.send(()).unwrap();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.unwrap().title, "first");
        assert_eq!(api.recorded_creates().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_sends_edits_and_refreshes() {
        let original = fixtures::ticket("t1", "Printer", TicketStatus::TicketCreated);
        let api = Arc::new(MockTicketApi::with_tickets(vec![original.clone()]));
        let notifier = Arc::new(RecordingNotifier::new());
        let session = session_with(&api, &notifier);
        session.refresh().await.unwrap();

        let mut closed = false;
        let updated = session
            .update_ticket(
                TicketUpdate::from_ticket(&original).with_status(TicketStatus::Resolved),
                |_| closed = true,
            )
            .await
            .unwrap();

        assert!(closed);
        assert_eq!(updated.status, TicketStatus::Resolved);
        assert_eq!(updated.created_at, original.created_at);

        let sent = api.recorded_updates().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, "t1");
        assert!(sent[0].updated_at >= original.updated_at);

        assert_eq!(session.tickets().await[0].status, TicketStatus::Resolved);
        assert_eq!(
            notifier.notices().await,
            vec![Notice::success("Ticket updated successfully")]
        );
    }

    #[tokio::test]
    async fn test_update_failure_notifies() {
        let api = Arc::new(MockTicketApi::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = session_with(&api, &notifier);

        let ticket = fixtures::ticket("missing", "Ghost", TicketStatus::Pending);
        let result = session
            .update_ticket(TicketUpdate::from_ticket(&ticket), |_| {})
            .await;

        assert!(matches!(
            result,
            Err(ClientError::ApiError { status: 404, .. })
        ));
        assert_eq!(
            notifier.notices().await,
            vec![Notice::error("Failed to update ticket")]
        );
    }
}
