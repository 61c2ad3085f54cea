//! # Canonical Specification Model
//!
//! The format-neutral pivot for conversion. Every concrete format can
//! export its full field set into a [`CanonicalSpec`] and import one
//! back, so converting between any two formats is a snapshot from the
//! source followed by an apply on the target.
//!
//! The model follows the granular per-feature philosophy: activations
//! are a map from [`Feature`] to block height, never grouped fork
//! blocks. A format with grouped blocks expands them on export and must
//! collapse them on import, failing when the granular heights cannot be
//! expressed in its grouping.
//!
//! Hex quantities that the core never interprets (genesis difficulty,
//! gas limit, account balances) are carried as their `0x`-prefixed
//! string form to avoid lossy numeric round trips.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::feature::Feature;

/// The complete, format-neutral field set of a chain specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalSpec {
    /// Human-readable chain name. Parity-style specs require one;
    /// geth-style genesis documents have none.
    pub name: Option<String>,
    /// The EIP-155 chain identifier.
    pub chain_id: Option<u64>,
    /// The devp2p network identifier, when it differs from the chain id.
    pub network_id: Option<u64>,
    /// Consensus engine and its parameters.
    pub engine: Engine,
    /// Feature activation triggers, keyed by feature.
    pub activations: BTreeMap<Feature, u64>,
    /// The DAO hard fork, if this chain took a side.
    pub dao_fork: Option<DaoFork>,
    /// Genesis header fields.
    pub genesis: GenesisHeader,
    /// Genesis allocation, keyed by account address. Opaque to the core.
    pub alloc: BTreeMap<String, Value>,
}

impl CanonicalSpec {
    /// Record an activation trigger.
    pub fn activate(&mut self, feature: Feature, height: u64) {
        self.activations.insert(feature, height);
    }

    /// Record the same activation height for a group of triggers, the
    /// way grouped fork blocks expand.
    pub fn activate_group(&mut self, features: &[Feature], height: u64) {
        for feature in features {
            self.activations.insert(*feature, height);
        }
    }

    /// The recorded activation height for a feature, if any.
    pub fn activation(&self, feature: Feature) -> Option<u64> {
        self.activations.get(&feature).copied()
    }

    /// Every height at which a protocol rule changes: all activation
    /// triggers plus the DAO fork block. Unordered and possibly
    /// duplicated; the inspector normalizes.
    pub fn fork_heights(&self) -> Vec<u64> {
        let mut heights: Vec<u64> = self.activations.values().copied().collect();
        if let Some(dao) = &self.dao_fork {
            heights.push(dao.block);
        }
        heights
    }
}

/// Consensus engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Proof-of-work.
    Ethash(EthashParams),
    /// Proof-of-authority.
    Clique(CliqueParams),
    /// The specification does not name an engine.
    #[default]
    Unspecified,
}

/// Ethash parameters the supported formats exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EthashParams {
    /// Minimum difficulty, as a `0x` hex quantity.
    pub minimum_difficulty: Option<String>,
    /// Difficulty adjustment duration limit, as a `0x` hex quantity.
    pub duration_limit: Option<String>,
    /// ECIP-1010 difficulty bomb pause length in blocks.
    pub ecip1010_length: Option<u64>,
    /// ECIP-1017 monetary policy era length in blocks.
    pub ecip1017_era_rounds: Option<u64>,
}

/// Clique proof-of-authority parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueParams {
    /// Seconds between blocks.
    pub period: u64,
    /// Checkpoint interval in blocks.
    pub epoch: u64,
}

/// The DAO hard fork stance of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoFork {
    /// Activation block height.
    pub block: u64,
    /// Whether the chain applied the irregular state change (true for
    /// foundation-lineage chains, false for classic-lineage chains that
    /// merely record the split point).
    pub support: bool,
}

/// Genesis block header fields, hex quantities carried verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenesisHeader {
    pub nonce: Option<String>,
    pub timestamp: Option<String>,
    pub extra_data: Option<String>,
    pub gas_limit: Option<String>,
    pub difficulty: Option<String>,
    pub mix_hash: Option<String>,
    pub coinbase: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_group_records_every_member() {
        let mut spec = CanonicalSpec::default();
        spec.activate_group(&[Feature::Eip2, Feature::Eip7], 1_150_000);
        assert_eq!(spec.activation(Feature::Eip2), Some(1_150_000));
        assert_eq!(spec.activation(Feature::Eip7), Some(1_150_000));
        assert_eq!(spec.activation(Feature::Eip150), None);
    }

    #[test]
    fn fork_heights_include_the_dao_block() {
        let mut spec = CanonicalSpec::default();
        spec.activate(Feature::Eip150, 2_463_000);
        spec.dao_fork = Some(DaoFork {
            block: 1_920_000,
            support: true,
        });
        let mut heights = spec.fork_heights();
        heights.sort_unstable();
        assert_eq!(heights, vec![1_920_000, 2_463_000]);
    }

    #[test]
    fn default_engine_is_unspecified() {
        assert_eq!(CanonicalSpec::default().engine, Engine::Unspecified);
    }

    #[test]
    fn serde_round_trip() {
        let mut spec = CanonicalSpec::default();
        spec.name = Some("morden".to_string());
        spec.chain_id = Some(62);
        spec.engine = Engine::Ethash(EthashParams {
            minimum_difficulty: Some("0x20000".to_string()),
            ..EthashParams::default()
        });
        spec.activate(Feature::Eip2, 0);

        let json = serde_json::to_string(&spec).unwrap();
        let back: CanonicalSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
