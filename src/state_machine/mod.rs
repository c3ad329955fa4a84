// State machine module for party and guest status
//
// Statuses are persisted as plain strings; these types give them a closed set of
// values and a single place that decides which transitions are legal.

pub mod errors;
pub mod events;
pub mod states;
pub mod transitions;

// Re-export main types for convenient access
pub use errors::{StateMachineError, StateMachineResult};
pub use events::{GuestEvent, PartyEvent};
pub use states::{GuestStatus, PartyStatus};
pub use transitions::{next_guest_status, next_party_status};
