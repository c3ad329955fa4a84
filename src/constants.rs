//! # System Constants
//!
//! Fixed values that define the operational boundaries of a vote party:
//! the scoring scale, the party code alphabet, and the event names used in
//! structured logs.

// Re-export state types for convenience
pub use crate::state_machine::{GuestStatus, PartyStatus};

/// Point values a ballot must award, highest first. Each value is used exactly once.
pub const POINT_VALUES: [u8; 10] = [12, 10, 8, 7, 6, 5, 4, 3, 2, 1];

/// Symbols a party code is drawn from. Excludes the ambiguous glyphs 0, O, 1, I and L.
pub const PARTY_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Length of a public party code.
pub const PARTY_CODE_LENGTH: usize = 6;

/// Default number of code draws before party creation gives up.
pub const DEFAULT_MAX_CODE_ATTEMPTS: u32 = 10;

/// Profile username length bounds (inclusive).
pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 30;

/// Operation names emitted in structured logs
pub mod events {
    // Party lifecycle
    pub const PARTY_CREATED: &str = "party.created";
    pub const PARTY_DELETED: &str = "party.deleted";
    pub const PARTY_CLOSED: &str = "party.closed";

    // Guest workflow
    pub const GUEST_JOINED: &str = "guest.joined";
    pub const GUEST_APPROVED: &str = "guest.approved";
    pub const GUEST_REJECTED: &str = "guest.rejected";
    pub const GUEST_REMOVED: &str = "guest.removed";

    // Voting
    pub const VOTE_SUBMITTED: &str = "vote.submitted";
    pub const VOTE_UPDATED: &str = "vote.updated";
    pub const RESULTS_COMPUTED: &str = "results.computed";

    // Profiles
    pub const PROFILE_UPSERTED: &str = "profile.upserted";
}
