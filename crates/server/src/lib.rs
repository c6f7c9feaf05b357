//! Reference JSON-over-HTTP ticket store.

pub mod api;
pub mod state;
