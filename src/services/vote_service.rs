use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::authorization::{ensure_caller_may_access, ensure_may_act_for_guest};
use super::party_service::PartyService;
use super::results::build_party_results;
use crate::catalog::ActCatalog;
use crate::constants::events;
use crate::error::{Result, ServiceError, StoreError};
use crate::identity::CallerIdentity;
use crate::models::{Party, PartyResults, SubmitVoteRequest, Vote, VoteMap};
use crate::store::{GuestStore, PartyStore, VoteStore};

/// Ballot submission, correction and the closed-party scoreboard.
#[derive(Clone)]
pub struct VoteService {
    votes: Arc<dyn VoteStore>,
    guests: Arc<dyn GuestStore>,
    catalog: Arc<dyn ActCatalog>,
    party_service: PartyService,
}

impl fmt::Debug for VoteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoteService").finish_non_exhaustive()
    }
}

impl VoteService {
    pub fn new(
        votes: Arc<dyn VoteStore>,
        parties: Arc<dyn PartyStore>,
        guests: Arc<dyn GuestStore>,
        catalog: Arc<dyn ActCatalog>,
    ) -> Self {
        Self {
            votes,
            guests,
            catalog,
            party_service: PartyService::new(parties),
        }
    }

    /// Record a guest's first ballot for the party.
    ///
    /// Check order: party exists, party active, caller, guest approved in this
    /// party, act membership, no earlier ballot, ballot shape.
    pub async fn submit_vote(
        &self,
        caller: &CallerIdentity,
        party_id: Uuid,
        request: SubmitVoteRequest,
    ) -> Result<Vote> {
        let party = self
            .check_ballot_preconditions(caller, party_id, &request)
            .await?;

        if self
            .votes
            .get_by_guest_and_party(request.guest_id, party_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::VoteAlreadyExists);
        }

        request.votes.validate_shape()?;

        let vote = Vote::new(request.guest_id, party.id, request.votes);
        match self.votes.create(&vote).await {
            Ok(()) => {}
            Err(StoreError::Conflict { .. }) => return Err(ServiceError::VoteAlreadyExists),
            Err(e) => return Err(e.into()),
        }

        info!(
            event = events::VOTE_SUBMITTED,
            party_id = %party_id,
            guest_id = %vote.guest_id,
            vote_id = %vote.id,
            "Vote submitted"
        );
        Ok(vote)
    }

    /// Replace the ballot a guest already cast, while the party is still active
    pub async fn update_vote(
        &self,
        caller: &CallerIdentity,
        party_id: Uuid,
        request: SubmitVoteRequest,
    ) -> Result<Vote> {
        self.check_ballot_preconditions(caller, party_id, &request)
            .await?;

        let mut vote = self
            .votes
            .get_by_guest_and_party(request.guest_id, party_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        request.votes.validate_shape()?;
        vote.votes = request.votes;

        self.votes.update(&vote).await?;

        info!(
            event = events::VOTE_UPDATED,
            party_id = %party_id,
            guest_id = %vote.guest_id,
            vote_id = %vote.id,
            "Vote updated"
        );
        Ok(vote)
    }

    pub async fn get_votes(
        &self,
        caller: &CallerIdentity,
        party_id: Uuid,
        guest_id: Uuid,
    ) -> Result<Vote> {
        let party = self.party_service.load(party_id).await?;
        ensure_may_act_for_guest(&party, caller, guest_id)?;

        let vote = self
            .votes
            .get_by_guest_and_party(guest_id, party_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        debug!(party_id = %party_id, guest_id = %guest_id, "Fetched vote");
        Ok(vote)
    }

    /// Close voting; same rules as [`PartyService::close_party`]
    pub async fn end_voting(&self, caller: &CallerIdentity, party_id: Uuid) -> Result<Party> {
        self.party_service.close_party(caller, party_id).await
    }

    /// Scoreboard for a closed party
    pub async fn get_results(
        &self,
        caller: &CallerIdentity,
        party_id: Uuid,
    ) -> Result<PartyResults> {
        let party = self.party_service.load(party_id).await?;
        ensure_caller_may_access(&party, caller)?;

        if party.status.accepts_votes() {
            return Err(ServiceError::VotingNotEnded);
        }

        let votes = self.votes.list_by_party(party_id).await?;
        let acts = self.catalog.list_acts(Some(party.event_type)).await?;
        let results = build_party_results(&party, &acts, &votes);

        info!(
            event = events::RESULTS_COMPUTED,
            party_id = %party_id,
            total_voters = results.total_voters,
            act_count = results.results.len(),
            "Results computed"
        );
        Ok(results)
    }

    async fn check_ballot_preconditions(
        &self,
        caller: &CallerIdentity,
        party_id: Uuid,
        request: &SubmitVoteRequest,
    ) -> Result<Party> {
        let party = self.party_service.load(party_id).await?;

        if !party.status.accepts_votes() {
            return Err(ServiceError::PartyClosed);
        }

        ensure_may_act_for_guest(&party, caller, request.guest_id)?;

        let guest = self
            .guests
            .get_by_id(request.guest_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        if !guest.is_approved_in(party_id) {
            debug!(guest_id = %guest.id, status = %guest.status, "Guest may not vote");
            return Err(ServiceError::GuestNotApproved);
        }

        self.ensure_acts_in_catalog(&party, &request.votes).await?;
        Ok(party)
    }

    async fn ensure_acts_in_catalog(&self, party: &Party, votes: &VoteMap) -> Result<()> {
        let acts = self.catalog.list_acts(Some(party.event_type)).await?;
        let known: HashSet<&str> = acts.iter().map(|act| act.id.as_str()).collect();

        match votes.act_ids().find(|id| !known.contains(id)) {
            Some(unknown) => Err(ServiceError::InvalidVotes(format!(
                "act '{unknown}' is not part of {}",
                party.event_type
            ))),
            None => Ok(()),
        }
    }
}
