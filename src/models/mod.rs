//! Domain records for parties, guests, ballots and the act catalog.

pub mod act;
pub mod event_type;
pub mod guest;
pub mod party;
pub mod profile;
pub mod results;
pub mod vote;

// Re-export core models for easy access
pub use act::Act;
pub use event_type::EventType;
pub use guest::Guest;
pub use party::{CreatePartyRequest, Party, PublicPartyView};
pub use profile::{validate_profile_username, UserProfile};
pub use results::{PartyResults, VoteResult};
pub use vote::{SubmitVoteRequest, Vote, VoteMap};
