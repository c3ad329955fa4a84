//! End-to-end walks through a watch party using only the public services.

mod common;

use common::*;
use vote_party_core::identity::CallerIdentity;
use vote_party_core::models::{CreatePartyRequest, EventType, SubmitVoteRequest, VoteMap};
use vote_party_core::{GuestStatus, PartyStatus, ServiceError};

#[tokio::test]
async fn test_complete_party_flow() {
    let system = in_memory_system();

    let party = system
        .parties()
        .create_party(ADMIN, CreatePartyRequest::new("Watch Party", EventType::Grandfinal))
        .await
        .unwrap();
    assert_eq!(party.code.len(), 6);
    assert_eq!(party.status, PartyStatus::Active);

    let alice = system
        .guests()
        .join_party(&party.code, "Alice")
        .await
        .unwrap();
    assert_eq!(alice.status, GuestStatus::Pending);

    let alice = system
        .guests()
        .approve_guest(ADMIN, party.id, alice.id)
        .await
        .unwrap();
    assert_eq!(alice.status, GuestStatus::Approved);

    let status = system
        .guests()
        .get_guest_status(&party.code, alice.id)
        .await
        .unwrap();
    assert_eq!(status.status, GuestStatus::Approved);

    let vote = system
        .votes()
        .submit_vote(
            &CallerIdentity::Guest(alice.id),
            party.id,
            SubmitVoteRequest {
                guest_id: alice.id,
                votes: ballot(EventType::Grandfinal, 4),
            },
        )
        .await
        .unwrap();
    assert_eq!(vote.votes.get(12), Some("gf-4"));

    let closed = system
        .votes()
        .end_voting(&CallerIdentity::admin(ADMIN), party.id)
        .await
        .unwrap();
    assert_eq!(closed.status, PartyStatus::Closed);

    let results = system
        .votes()
        .get_results(&CallerIdentity::admin(ADMIN), party.id)
        .await
        .unwrap();
    assert_eq!(results.total_voters, 1);
    assert_eq!(results.party_name, "Watch Party");
    assert_eq!(results.results.len(), 12);

    let top = &results.results[0];
    assert_eq!(top.act_id, "gf-4");
    assert_eq!(top.total_points, 12);
    assert_eq!(top.rank, 1);
}

#[tokio::test]
async fn test_unapproved_guests_always_get_guest_not_approved() {
    let built = PartyBuilder::new()
        .with_guest("Pending", GuestStatus::Pending)
        .with_guest("Rejected", GuestStatus::Rejected)
        .build()
        .await;

    let ballots = [
        VoteMap::new(),
        ballot(EventType::Grandfinal, 1),
        ballot(EventType::Semifinal1, 1),
    ];

    for username in ["Pending", "Rejected"] {
        for votes in ballots.clone() {
            let result = built
                .system
                .votes()
                .submit_vote(
                    &CallerIdentity::Anonymous,
                    built.party.id,
                    built.ballot_request(username, votes),
                )
                .await;
            assert_eq!(result, Err(ServiceError::GuestNotApproved), "{username}");
        }
    }
}

#[tokio::test]
async fn test_closed_party_rejects_every_ballot_with_party_closed() {
    let built = PartyBuilder::new()
        .with_guest("Approved", GuestStatus::Approved)
        .with_guest("Pending", GuestStatus::Pending)
        .build()
        .await;

    built
        .system
        .votes()
        .submit_vote(
            &CallerIdentity::Anonymous,
            built.party.id,
            built.ballot_request("Approved", ballot(EventType::Grandfinal, 1)),
        )
        .await
        .unwrap();
    built.close().await;

    for username in ["Approved", "Pending"] {
        for votes in [VoteMap::new(), ballot(EventType::Grandfinal, 2)] {
            let submit = built
                .system
                .votes()
                .submit_vote(
                    &CallerIdentity::Anonymous,
                    built.party.id,
                    built.ballot_request(username, votes.clone()),
                )
                .await;
            assert_eq!(submit, Err(ServiceError::PartyClosed));

            let update = built
                .system
                .votes()
                .update_vote(
                    &CallerIdentity::Anonymous,
                    built.party.id,
                    built.ballot_request(username, votes),
                )
                .await;
            assert_eq!(update, Err(ServiceError::PartyClosed));
        }
    }
}

#[tokio::test]
async fn test_results_on_active_party_are_not_available() {
    let built = PartyBuilder::new()
        .with_guest("A", GuestStatus::Approved)
        .with_guest("B", GuestStatus::Approved)
        .with_guest("C", GuestStatus::Approved)
        .build()
        .await;

    for (offset, username) in ["A", "B", "C"].into_iter().enumerate() {
        built
            .system
            .votes()
            .submit_vote(
                &built.owner(),
                built.party.id,
                built.ballot_request(username, ballot(EventType::Grandfinal, offset as u32 + 1)),
            )
            .await
            .unwrap();
    }

    for caller in [built.owner(), CallerIdentity::Anonymous] {
        assert_eq!(
            built.system.votes().get_results(&caller, built.party.id).await,
            Err(ServiceError::VotingNotEnded)
        );
    }
}

#[tokio::test]
async fn test_usernames_are_unique_per_party_only() {
    let first = PartyBuilder::new().build().await;
    let second = PartyBuilder::new()
        .with_name("Second Party")
        .build_in(first.system.clone())
        .await;

    first
        .system
        .guests()
        .join_party(&first.party.code, "Alice")
        .await
        .unwrap();

    assert_eq!(
        first
            .system
            .guests()
            .join_party(&first.party.code, "Alice")
            .await,
        Err(ServiceError::DuplicateUsername)
    );

    let other = first
        .system
        .guests()
        .join_party(&second.party.code, "Alice")
        .await
        .unwrap();
    assert_eq!(other.party_id, second.party.id);
}

#[tokio::test]
async fn test_tied_scoreboard() {
    let built = PartyBuilder::new()
        .with_event_type(EventType::Semifinal1)
        .with_guest("A", GuestStatus::Approved)
        .with_guest("B", GuestStatus::Approved)
        .build()
        .await;

    // A ranks sf1-1..sf1-10; B shifts everything by one so sf1-1 gets a single point
    for (username, first) in [("A", 1), ("B", 2)] {
        built
            .system
            .votes()
            .submit_vote(
                &CallerIdentity::Anonymous,
                built.party.id,
                built.ballot_request(username, ballot(EventType::Semifinal1, first)),
            )
            .await
            .unwrap();
    }
    built.close().await;

    let results = built
        .system
        .votes()
        .get_results(&CallerIdentity::Anonymous, built.party.id)
        .await
        .unwrap();
    assert_eq!(results.total_voters, 2);

    let table: Vec<(&str, u32, u32)> = results
        .results
        .iter()
        .map(|r| (r.act_id.as_str(), r.total_points, r.rank))
        .collect();
    assert_eq!(
        table,
        vec![
            ("sf1-2", 22, 1),
            ("sf1-3", 18, 2),
            ("sf1-4", 15, 3),
            ("sf1-1", 13, 4),
            ("sf1-5", 13, 4),
            ("sf1-6", 11, 6),
            ("sf1-7", 9, 7),
            ("sf1-8", 7, 8),
            ("sf1-9", 5, 9),
            ("sf1-10", 3, 10),
        ]
    );
}
