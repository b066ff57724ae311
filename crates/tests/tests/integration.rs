// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Result};
use cipherstat_aggregator::{
    GetAuditProof, GetCounters, GetDataSubmission, GetStats, GetVoteSubmission, LedgerCounters,
    StatsError, SubmitData, SubmitProof, SubmitVote, VerifyProof,
};
use cipherstat_events::{DataSubmitted, StatsEvent, VoteSubmitted};
use cipherstat_fhe::{AlgebraError, MockCoprocessor, SharedAlgebra};
use cipherstat_node_builder::StatsNodeBuilder;
use cipherstat_test_helpers::{
    create_shared_rng_from_u64, with_tracing, FaultyAlgebra, NodeHistory, Plain, TestNode,
    TEST_START_TIME,
};
use cipherstat_utils::{ArcBytes, U256};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn plain(count: u64, sum: u64, alert: bool) -> Option<Plain> {
    Some(Plain { count, sum, alert })
}

#[actix::test]
async fn test_data_then_vote_end_to_end() -> Result<()> {
    let _guard = with_tracing("info");
    let node = TestNode::start(1).await?;

    assert_eq!(node.decrypted().await?, None);

    assert_eq!(node.data(40).await?, U256::from(1));
    assert_eq!(node.data(30).await?, U256::from(2));
    assert_eq!(node.data(35).await?, U256::from(3));
    assert_eq!(node.decrypted().await?, plain(3, 105, true));

    assert_eq!(node.vote(5).await?, U256::from(1));
    assert_eq!(node.decrypted().await?, plain(4, 110, true));

    let history = NodeHistory::take(&node, 8).await?;
    assert_eq!(
        history.event_types(),
        vec![
            "StatsUpdated",
            "DataSubmitted",
            "StatsUpdated",
            "DataSubmitted",
            "StatsUpdated",
            "DataSubmitted",
            "StatsUpdated",
            "VoteSubmitted",
        ]
    );
    Ok(())
}

#[actix::test]
async fn test_single_vote_on_fresh_node() -> Result<()> {
    let node = TestNode::start(2).await?;
    assert_eq!(node.vote(50).await?, U256::from(1));
    assert_eq!(node.decrypted().await?, plain(1, 50, false));
    assert_eq!(
        node.aggregator().send(GetCounters).await?,
        LedgerCounters {
            data: U256::ZERO,
            votes: U256::from(1)
        }
    );
    Ok(())
}

#[actix::test]
async fn test_concurrent_submissions_initialize_exactly_once() -> Result<()> {
    let node = TestNode::start(3).await?;

    // Queue every submission before awaiting any of them
    let mut data = vec![];
    let mut votes = vec![];
    for _ in 0..25 {
        let value = node.coprocessor().encrypt(1)?;
        data.push(node.aggregator().send(SubmitData { value }));
        let choice = node.coprocessor().encrypt(1)?;
        votes.push(node.aggregator().send(SubmitVote { choice }));
    }

    let mut data_ids = vec![];
    for request in data {
        data_ids.push(request.await??);
    }
    for request in votes {
        request.await??;
    }

    assert_eq!(node.decrypted().await?, plain(50, 50, false));
    let counters = node.aggregator().send(GetCounters).await?;
    assert_eq!(counters.data, U256::from(25));
    assert_eq!(counters.votes, U256::from(25));

    let expected: Vec<U256> = (1..=25u64).map(U256::from).collect();
    assert_eq!(data_ids, expected);
    Ok(())
}

#[actix::test]
async fn test_threshold_is_recomputed_on_every_submission() -> Result<()> {
    let node = TestNode::start(4).await?;
    for _ in 0..9 {
        node.data(11).await?;
        let Some(current) = node.decrypted().await? else {
            bail!("aggregate should be initialized");
        };
        assert!(!current.alert, "alert raised early at sum {}", current.sum);
    }
    assert_eq!(node.decrypted().await?, plain(9, 99, false));
    node.vote(1).await?;
    assert_eq!(node.decrypted().await?, plain(10, 100, true));
    Ok(())
}

#[actix::test]
async fn test_custom_threshold() -> Result<()> {
    let node = TestNode::start_with(5, |b| b.with_threshold(10)).await?;
    node.data(9).await?;
    assert_eq!(node.decrypted().await?, plain(1, 9, false));
    node.data(1).await?;
    assert_eq!(node.decrypted().await?, plain(2, 10, true));
    Ok(())
}

#[actix::test]
async fn test_ledger_records_carry_clock_timestamps() -> Result<()> {
    let node = TestNode::start(6).await?;
    node.data(1).await?;
    node.clock().advance(60);
    node.vote(2).await?;
    // The clock is opaque to the ledger and may move backwards
    node.clock().set(5);
    node.data(3).await?;

    let first = node
        .aggregator()
        .send(GetDataSubmission(U256::from(1)))
        .await??;
    let vote = node
        .aggregator()
        .send(GetVoteSubmission(U256::from(1)))
        .await??;
    let third = node
        .aggregator()
        .send(GetDataSubmission(U256::from(2)))
        .await??;

    assert_eq!(first.map(|r| r.timestamp), Some(U256::from(TEST_START_TIME)));
    assert_eq!(vote.map(|r| r.timestamp), Some(U256::from(TEST_START_TIME + 60)));
    assert_eq!(third.map(|r| r.timestamp), Some(U256::from(5)));

    let history = NodeHistory::take(&node, 6).await?;
    let submitted: Vec<StatsEvent> = history
        .iter()
        .filter(|e| !matches!(e, StatsEvent::StatsUpdated { .. }))
        .cloned()
        .collect();
    assert_eq!(
        submitted,
        vec![
            StatsEvent::from(DataSubmitted {
                id: U256::from(1),
                timestamp: U256::from(TEST_START_TIME)
            }),
            StatsEvent::from(VoteSubmitted {
                id: U256::from(1),
                timestamp: U256::from(TEST_START_TIME + 60)
            }),
            StatsEvent::from(DataSubmitted {
                id: U256::from(2),
                timestamp: U256::from(5)
            }),
        ]
    );
    Ok(())
}

#[actix::test]
async fn test_fault_after_partial_fold_commits_nothing() -> Result<()> {
    let cop = Arc::new(MockCoprocessor::new(create_shared_rng_from_u64(7))?);
    let faulty = Arc::new(FaultyAlgebra::new(cop.clone()));
    let algebra: SharedAlgebra = faulty.clone();
    let node = TestNode::start_with(7, |b| b.with_coprocessor(cop).with_algebra(algebra)).await?;

    node.data(60).await?;
    NodeHistory::take(&node, 2).await?;

    faulty.fail_comparisons(true);
    let result = node.try_data(50).await?;
    assert!(matches!(
        result,
        Err(StatsError::Adapter(AlgebraError::Unavailable(_)))
    ));
    assert!(node.try_vote(50).await?.is_err());

    assert_eq!(node.decrypted().await?, plain(1, 60, false));
    assert_eq!(
        node.aggregator().send(GetCounters).await?,
        LedgerCounters {
            data: U256::from(1),
            votes: U256::ZERO
        }
    );
    assert_eq!(
        node.aggregator()
            .send(GetDataSubmission(U256::from(2)))
            .await??,
        None
    );
    sleep(Duration::from_millis(1)).await;
    assert!(NodeHistory::get(&node).await?.is_empty());

    faulty.fail_comparisons(false);
    assert_eq!(node.data(40).await?, U256::from(2));
    assert_eq!(node.decrypted().await?, plain(2, 100, true));
    Ok(())
}

#[actix::test]
async fn test_proof_lifecycle_through_the_node() -> Result<()> {
    let node = TestNode::start(8).await?;
    let id = node.data(105).await?;
    NodeHistory::take(&node, 2).await?;

    let verify = |cleartexts: &'static [u8]| VerifyProof {
        data_id: id,
        cleartexts: ArcBytes::from_bytes(cleartexts.to_vec()),
    };

    assert!(matches!(
        node.audit().send(verify(b"105")).await?,
        Err(StatsError::ProofNotFound(missing)) if missing == id
    ));
    assert!(node.audit().send(GetAuditProof(id)).await??.is_empty());

    let first = node.coprocessor().prove(id, b"105");
    node.audit()
        .send(SubmitProof {
            data_id: id,
            proof: ArcBytes::from_bytes(first.clone()),
        })
        .await?;
    assert!(node.audit().send(verify(b"105")).await??);
    assert!(!node.audit().send(verify(b"104")).await??);

    // Resubmission replaces the stored proof
    let second = node.coprocessor().prove(id, b"104");
    node.audit()
        .send(SubmitProof {
            data_id: id,
            proof: ArcBytes::from_bytes(second.clone()),
        })
        .await?;
    assert!(!node.audit().send(verify(b"105")).await??);
    assert!(node.audit().send(verify(b"104")).await??);
    assert_eq!(
        node.audit().send(GetAuditProof(id)).await??.extract_bytes(),
        second
    );

    let history = NodeHistory::take(&node, 2).await?;
    assert_eq!(history.event_types(), vec!["AuditVerified", "AuditVerified"]);
    Ok(())
}

#[actix::test]
async fn test_repeated_notifications_all_arrive() -> Result<()> {
    let node = TestNode::start(9).await?;
    node.data(1).await?;
    node.data(2).await?;
    for proof in [b"first".to_vec(), b"second".to_vec()] {
        node.audit()
            .send(SubmitProof {
                data_id: U256::from(1),
                proof: ArcBytes::from_bytes(proof),
            })
            .await?;
    }

    let history = NodeHistory::take(&node, 6).await?;
    assert_eq!(history.filter_by_event_type("StatsUpdated").len(), 2);
    assert_eq!(history.filter_by_event_type("DataSubmitted").len(), 2);
    assert_eq!(history.filter_by_event_type("AuditVerified").len(), 2);
    sleep(Duration::from_millis(1)).await;
    assert!(NodeHistory::get(&node).await?.is_empty());
    Ok(())
}

#[actix::test]
async fn test_sled_backed_node_restores_everything() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db_file = dir.path().join("db");
    let cop = Arc::new(MockCoprocessor::new(create_shared_rng_from_u64(11))?);

    let node = TestNode::start_with(11, |b| {
        b.with_sled_store(db_file.clone())
            .with_coprocessor(cop.clone())
    })
    .await?;
    node.data(70).await?;
    node.vote(30).await?;
    let proof = cop.prove(U256::from(1), b"100");
    node.audit()
        .send(SubmitProof {
            data_id: U256::from(1),
            proof: ArcBytes::from_bytes(proof),
        })
        .await?;
    // Reads queue behind the pending writes on the store actor
    node.audit().send(GetAuditProof(U256::from(1))).await??;
    node.aggregator()
        .send(GetVoteSubmission(U256::from(1)))
        .await??;

    let restarted = TestNode::start_with(12, |b| {
        b.with_sled_store(db_file.clone())
            .with_coprocessor(cop.clone())
    })
    .await?;
    assert_eq!(restarted.decrypted().await?, plain(2, 100, true));
    assert_eq!(restarted.data(1).await?, U256::from(2));
    assert!(restarted
        .aggregator()
        .send(GetVoteSubmission(U256::from(1)))
        .await??
        .is_some());
    assert!(
        restarted
            .audit()
            .send(VerifyProof {
                data_id: U256::from(1),
                cleartexts: ArcBytes::from_bytes(b"100".to_vec()),
            })
            .await??
    );
    Ok(())
}

#[actix::test]
async fn test_nodes_on_a_shared_bus_publish_to_the_same_history() -> Result<()> {
    let first = TestNode::start(13).await?;
    let second = StatsNodeBuilder::new(create_shared_rng_from_u64(14))
        .with_source_bus(first.bus())
        .build()
        .await?;

    let value = second.coprocessor().encrypt(4)?;
    second.aggregator().send(SubmitData { value }).await??;

    let history = NodeHistory::take(&first, 2).await?;
    assert_eq!(history.event_types(), vec!["StatsUpdated", "DataSubmitted"]);
    // The first node's aggregate is untouched
    assert_eq!(first.decrypted().await?, None);
    Ok(())
}

fn sum_in_order(seed: u64, values: &[u64]) -> Result<u64> {
    let values = values.to_vec();
    actix::System::new().block_on(async move {
        let node = TestNode::start(seed).await?;
        for value in values {
            node.data(value).await?;
        }
        let stats = node.aggregator().send(GetStats).await?;
        Ok::<_, anyhow::Error>(cipherstat_fhe::Decryptor::decrypt(
            node.coprocessor(),
            &stats.sum,
        )?)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_submission_order_does_not_change_the_sum(
        values in proptest::collection::vec(0u64..1_000_000, 1..6),
        seed in any::<u64>(),
    ) {
        let mut reversed = values.clone();
        reversed.reverse();
        let forward = sum_in_order(seed, &values).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let backward = sum_in_order(seed.wrapping_add(1), &reversed).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward, values.iter().sum::<u64>());
    }
}
