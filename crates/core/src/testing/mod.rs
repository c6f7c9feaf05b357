//! Testing utilities and mock implementations.
//!
//! Provides a mock [`TicketApi`](crate::client::TicketApi), a recording
//! [`Notifier`](crate::session::Notifier) and ticket fixtures, so sessions can
//! be exercised without a running ticket store.
//!
//! # Example
//!
//! ```rust,ignore
//! use helpdesk_core::testing::{fixtures, MockTicketApi, RecordingNotifier};
//!
//! let api = Arc::new(MockTicketApi::with_tickets(fixtures::mixed_tickets()));
//! let notifier = Arc::new(RecordingNotifier::new());
//! let session = TicketSession::new(api.clone(), notifier.clone());
//! ```

mod mock_ticket_api;
mod recording_notifier;

pub use mock_ticket_api::MockTicketApi;
pub use recording_notifier::RecordingNotifier;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::ticket::{Ticket, TicketStatus};

    /// Reference time all fixture timestamps are derived from.
    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    /// Create a test ticket with reasonable defaults.
    pub fn ticket(id: &str, title: &str, status: TicketStatus) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("Details for {}", title),
            contact_info: "user@example.com".to_string(),
            status,
            created_at: base_time(),
            updated_at: base_time(),
        }
    }

    /// Create a test ticket created `minutes` after [`base_time`].
    pub fn ticket_created_at(id: &str, title: &str, minutes: i64) -> Ticket {
        let at = base_time() + Duration::minutes(minutes);
        Ticket {
            created_at: at,
            updated_at: at,
            ..ticket(id, title, TicketStatus::TicketCreated)
        }
    }

    /// A varied collection with duplicate titles and statuses, for sort and
    /// filter checks.
    pub fn mixed_tickets() -> Vec<Ticket> {
        let mut tickets = vec![
            ticket_created_at("t1", "VPN down", 50),
            ticket_created_at("t2", "Printer jammed", 10),
            ticket_created_at("t3", "Badge reader", 40),
            ticket_created_at("t4", "Printer jammed", 30),
            ticket_created_at("t5", "Email bounce", 20),
            ticket_created_at("t6", "Badge reader", 60),
            ticket_created_at("t7", "Wi-Fi slow", 0),
        ];

        let statuses = [
            TicketStatus::Pending,
            TicketStatus::Resolved,
            TicketStatus::Pending,
            TicketStatus::Accepted,
            TicketStatus::TicketCreated,
            TicketStatus::Rejected,
            TicketStatus::Accepted,
        ];
        let contacts = [
            "zoe@example.com",
            "amy@example.com",
            "amy@example.com",
            "",
            "max@example.com",
            "bob@example.com",
            "amy@example.com",
        ];

        for (i, t) in tickets.iter_mut().enumerate() {
            t.status = statuses[i];
            t.contact_info = contacts[i].to_string();
            t.updated_at = t.created_at + Duration::minutes((i as i64 * 7) % 11);
        }

        tickets
    }
}
