//! # Services
//!
//! Domain operations over the store contracts. Each service is cheap to clone and
//! holds only `Arc` handles to its collaborators.

pub mod authorization;
pub mod guest_service;
pub mod party_code;
pub mod party_service;
pub mod profile_service;
pub mod results;
pub mod vote_service;

pub use guest_service::GuestService;
pub use party_code::{PartyCodeGenerator, RandomCodeGenerator};
pub use party_service::PartyService;
pub use profile_service::ProfileService;
pub use results::{assign_competition_ranks, rank_results, tally_points};
pub use vote_service::VoteService;
