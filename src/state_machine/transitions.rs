//! Transition tables for party and guest status.
//!
//! Both machines are tiny and one-directional: a party only ever goes
//! `active -> closed`, and a guest only ever leaves `pending`.

use super::errors::{invalid_transition, StateMachineResult};
use super::events::{GuestEvent, PartyEvent};
use super::states::{GuestStatus, PartyStatus};

/// Resolve the next party status for `event`, or fail if the transition is not allowed.
pub fn next_party_status(current: PartyStatus, event: PartyEvent) -> StateMachineResult<PartyStatus> {
    match (current, event) {
        (PartyStatus::Active, PartyEvent::Close) => Ok(PartyStatus::Closed),
        (from, event) => Err(invalid_transition(from, event.event_type())),
    }
}

/// Resolve the next guest status for `event`, or fail if the transition is not allowed.
pub fn next_guest_status(current: GuestStatus, event: GuestEvent) -> StateMachineResult<GuestStatus> {
    match (current, event) {
        (GuestStatus::Pending, GuestEvent::Approve) => Ok(GuestStatus::Approved),
        (GuestStatus::Pending, GuestEvent::Reject) => Ok(GuestStatus::Rejected),
        (from, event) => Err(invalid_transition(from, event.event_type())),
    }
}
