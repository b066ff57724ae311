// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Context, Result};
use cipherstat_aggregator::{GetCounters, GetStats, SubmitData, SubmitProof, SubmitVote, VerifyProof};
use cipherstat_config::AppConfig;
use cipherstat_fhe::Decryptor;
use cipherstat_node_builder::{StatsNodeBuilder, StatsNodeHandle};
use cipherstat_utils::{create_shared_rng, create_shared_rng_from_u64, ArcBytes, U256};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// A replay script. Steps run in order against a single node.
///
/// ```yaml
/// steps:
///   - data: 40
///   - vote: 5
///   - proof: { data_id: 1, cleartexts: "45" }
///   - verify: { data_id: 1, cleartexts: "45" }
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Encrypt and submit a data value
    Data(u64),
    /// Encrypt and submit a vote
    Vote(u64),
    Proof(ProofStep),
    Verify(VerifyStep),
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProofStep {
    pub data_id: u64,
    /// Generate a valid proof over these cleartexts
    #[serde(default)]
    pub cleartexts: Option<String>,
    /// Store these raw proof bytes instead
    #[serde(default)]
    pub hex: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VerifyStep {
    pub data_id: u64,
    pub cleartexts: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Verification {
    pub data_id: u64,
    pub cleartexts: String,
    pub result: String,
}

/// Decrypted view of the node after a replay. Aggregate fields are empty when nothing was
/// aggregated.
#[derive(Debug, Serialize, PartialEq)]
pub struct ReplayReport {
    pub data_submissions: String,
    pub vote_submissions: String,
    pub count: Option<u64>,
    pub sum: Option<u64>,
    pub threshold_alert: Option<bool>,
    pub failures: Vec<String>,
    pub verifications: Vec<Verification>,
}

pub fn parse_script(source: &str) -> Result<Script> {
    serde_yaml::from_str(source).context("Could not parse replay script")
}

fn proof_bytes(node: &StatsNodeHandle, step: &ProofStep) -> Result<Vec<u8>> {
    match (&step.hex, &step.cleartexts) {
        (Some(raw), _) => hex::decode(raw.trim_start_matches("0x"))
            .with_context(|| format!("proof for data {} is not valid hex", step.data_id)),
        (None, Some(cleartexts)) => Ok(node
            .coprocessor()
            .prove(U256::from(step.data_id), cleartexts.as_bytes())),
        (None, None) => bail!(
            "proof for data {} needs either `cleartexts` or `hex`",
            step.data_id
        ),
    }
}

/// Apply every step to the node and decrypt the result
pub async fn run(node: &StatsNodeHandle, script: Script) -> Result<ReplayReport> {
    let mut failures = vec![];
    let mut verifications = vec![];

    for step in script.steps {
        match step {
            Step::Data(plain) => {
                let value = node.coprocessor().encrypt(plain)?;
                match node.aggregator().send(SubmitData { value }).await? {
                    Ok(id) => info!(%id, "data submitted"),
                    Err(e) => {
                        warn!("data submission failed: {e}");
                        failures.push(e.to_string());
                    }
                }
            }
            Step::Vote(plain) => {
                let choice = node.coprocessor().encrypt(plain)?;
                match node.aggregator().send(SubmitVote { choice }).await? {
                    Ok(id) => info!(%id, "vote submitted"),
                    Err(e) => {
                        warn!("vote submission failed: {e}");
                        failures.push(e.to_string());
                    }
                }
            }
            Step::Proof(step) => {
                let proof = match proof_bytes(node, &step) {
                    Ok(proof) => proof,
                    Err(e) => {
                        warn!("proof step skipped: {e:#}");
                        failures.push(format!("{e:#}"));
                        continue;
                    }
                };
                node.audit()
                    .send(SubmitProof {
                        data_id: U256::from(step.data_id),
                        proof: ArcBytes::from_bytes(proof),
                    })
                    .await?;
            }
            Step::Verify(step) => {
                let result = node
                    .audit()
                    .send(VerifyProof {
                        data_id: U256::from(step.data_id),
                        cleartexts: ArcBytes::from_bytes(step.cleartexts.as_bytes().to_vec()),
                    })
                    .await?;
                let result = match result {
                    Ok(true) => "verified".to_string(),
                    Ok(false) => "rejected".to_string(),
                    Err(e) => format!("error: {e}"),
                };
                verifications.push(Verification {
                    data_id: step.data_id,
                    cleartexts: step.cleartexts,
                    result,
                });
            }
        }
    }

    let counters = node.aggregator().send(GetCounters).await?;
    let stats = node.aggregator().send(GetStats).await?;
    let cop = node.coprocessor();
    let (count, sum, threshold_alert) = if stats.is_initialized(node.algebra.as_ref()) {
        (
            Some(cop.decrypt(&stats.count)?),
            Some(cop.decrypt(&stats.sum)?),
            Some(cop.decrypt_bool(&stats.threshold_alert)?),
        )
    } else {
        (None, None, None)
    };

    Ok(ReplayReport {
        data_submissions: counters.data.to_string(),
        vote_submissions: counters.votes.to_string(),
        count,
        sum,
        threshold_alert,
        failures,
        verifications,
    })
}

pub async fn execute(config: &AppConfig, script_path: &Path, seed: Option<u64>) -> Result<()> {
    let source = std::fs::read_to_string(script_path)
        .with_context(|| format!("Could not read script {}", script_path.display()))?;
    let script = parse_script(&source)?;

    let rng = seed
        .map(create_shared_rng_from_u64)
        .unwrap_or_else(create_shared_rng);

    // Mock handles only live as long as the coprocessor so replays never touch the sled db
    let node = StatsNodeBuilder::new(rng)
        .with_name(&config.name())
        .with_threshold(config.threshold())
        .build()
        .await?;

    let report = run(&node, script).await?;
    print!("{}", serde_yaml::to_string(&report)?);
    Ok(())
}
