//! # The geth Format
//!
//! The go-ethereum genesis document: a `config` object of grouped fork
//! blocks (`homesteadBlock`, `byzantiumBlock`, ...) next to the genesis
//! header fields and the allocation table.
//!
//! Grouped blocks expand into granular triggers on export. On import the
//! granular schedule must collapse back: every member of a group present
//! at one height, or the whole group absent. Classic-lineage schedules
//! split Spurious Dragon across two upgrades and carry ECIPs, so they do
//! not collapse; converting them to this format fails.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use echainspec_core::{
    CanonicalSpec, CliqueParams, Configurator, DaoFork, Engine, EthashParams, Feature,
    GenesisHeader, SpecError, SpecFormat,
};

use crate::groups;

/// Registry name of this format.
pub const FORMAT_NAME: &str = "geth";

/// A go-ethereum genesis document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GethGenesis {
    #[serde(default)]
    pub config: GethChainConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alloc: BTreeMap<String, Value>,
    /// Fields this tool does not interpret (parentHash, number, ...),
    /// carried through verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The `config` object: grouped fork blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GethChainConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homestead_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dao_fork_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dao_fork_support: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip150_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip155_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip158_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byzantium_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constantinople_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub petersburg_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub istanbul_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muir_glacier_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub berlin_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub london_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_glacier_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gray_glacier_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethash: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clique: Option<CliqueConfig>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Clique engine block, shared by the geth and multigeth layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueConfig {
    #[serde(default)]
    pub period: u64,
    #[serde(default)]
    pub epoch: u64,
}

/// Collapse a fork group back to a single block number.
///
/// Returns `None` when no member is scheduled, the shared height when
/// all members are scheduled together, and an error otherwise.
fn group_block(spec: &CanonicalSpec, group: &[Feature]) -> Result<Option<u64>, SpecError> {
    let present: Vec<(Feature, u64)> = group
        .iter()
        .filter_map(|f| spec.activation(*f).map(|h| (*f, h)))
        .collect();

    let Some(&(first, height)) = present.first() else {
        return Ok(None);
    };

    if let Some(&(differing, _)) = present.iter().find(|(_, h)| *h != height) {
        return Err(SpecError::UnsupportedConversion {
            feature: differing.name().to_string(),
            format: FORMAT_NAME,
        });
    }

    if present.len() < group.len() {
        let missing = group
            .iter()
            .find(|f| spec.activation(**f).is_none())
            .map(|f| f.name())
            .unwrap_or("?");
        return Err(SpecError::UnsupportedConversion {
            feature: format!("{} without {missing}", first.name()),
            format: FORMAT_NAME,
        });
    }

    Ok(Some(height))
}

impl Configurator for GethGenesis {
    fn format(&self) -> &'static str {
        FORMAT_NAME
    }

    fn chain_name(&self) -> Option<String> {
        None
    }

    fn chain_id(&self) -> Option<u64> {
        self.config.chain_id
    }

    fn fork_heights(&self) -> Vec<u64> {
        self.snapshot().fork_heights()
    }

    fn eip_triggers(&self) -> Vec<(Feature, u64)> {
        self.snapshot().activations.into_iter().collect()
    }

    fn snapshot(&self) -> CanonicalSpec {
        let c = &self.config;
        let mut spec = CanonicalSpec::default();
        spec.chain_id = c.chain_id;

        spec.engine = if let Some(clique) = c.clique {
            Engine::Clique(CliqueParams {
                period: clique.period,
                epoch: clique.epoch,
            })
        } else if c.ethash.is_some() {
            Engine::Ethash(EthashParams::default())
        } else {
            Engine::Unspecified
        };

        if let Some(h) = c.homestead_block {
            spec.activate_group(groups::HOMESTEAD, h);
        }
        if let Some(h) = c.eip150_block {
            spec.activate(Feature::Eip150, h);
        }
        if let Some(h) = c.eip155_block {
            spec.activate(Feature::Eip155, h);
        }
        if let Some(h) = c.eip158_block {
            spec.activate_group(groups::SPURIOUS_DRAGON, h);
        }
        if let Some(h) = c.byzantium_block {
            spec.activate_group(groups::BYZANTIUM, h);
        }
        if let Some(h) = c.constantinople_block {
            spec.activate_group(groups::CONSTANTINOPLE, h);
            // EIP-1283 only counts when Petersburg never retired it.
            if c.petersburg_block.is_none() {
                spec.activate(Feature::Eip1283, h);
            }
        }
        if let Some(h) = c.istanbul_block {
            spec.activate_group(groups::ISTANBUL, h);
        }
        if let Some(h) = c.muir_glacier_block {
            spec.activate(Feature::Eip2384, h);
        }
        if let Some(h) = c.berlin_block {
            spec.activate_group(groups::BERLIN, h);
        }
        if let Some(h) = c.london_block {
            spec.activate_group(groups::LONDON, h);
        }
        if let Some(h) = c.arrow_glacier_block {
            spec.activate(Feature::Eip4345, h);
        }
        if let Some(h) = c.gray_glacier_block {
            spec.activate(Feature::Eip5133, h);
        }

        spec.dao_fork = c.dao_fork_block.map(|block| DaoFork {
            block,
            support: c.dao_fork_support.unwrap_or(false),
        });

        spec.genesis = GenesisHeader {
            nonce: self.nonce.clone(),
            timestamp: self.timestamp.clone(),
            extra_data: self.extra_data.clone(),
            gas_limit: self.gas_limit.clone(),
            difficulty: self.difficulty.clone(),
            mix_hash: self.mix_hash.clone(),
            coinbase: self.coinbase.clone(),
        };
        spec.alloc = self.alloc.clone();
        spec
    }

    fn apply(&mut self, spec: &CanonicalSpec) -> Result<(), SpecError> {
        for feature in [Feature::Ecip1010, Feature::Ecip1017, Feature::Ecip1041] {
            if spec.activation(feature).is_some() {
                return Err(SpecError::UnsupportedConversion {
                    feature: feature.name().to_string(),
                    format: FORMAT_NAME,
                });
            }
        }

        let mut config = GethChainConfig {
            chain_id: spec.chain_id,
            homestead_block: group_block(spec, groups::HOMESTEAD)?,
            eip150_block: spec.activation(Feature::Eip150),
            eip155_block: spec.activation(Feature::Eip155),
            eip158_block: group_block(spec, groups::SPURIOUS_DRAGON)?,
            byzantium_block: group_block(spec, groups::BYZANTIUM)?,
            constantinople_block: group_block(spec, groups::CONSTANTINOPLE)?,
            istanbul_block: group_block(spec, groups::ISTANBUL)?,
            muir_glacier_block: spec.activation(Feature::Eip2384),
            berlin_block: group_block(spec, groups::BERLIN)?,
            london_block: group_block(spec, groups::LONDON)?,
            arrow_glacier_block: spec.activation(Feature::Eip4345),
            gray_glacier_block: spec.activation(Feature::Eip5133),
            ..GethChainConfig::default()
        };

        // A Constantinople schedule without EIP-1283 collapses to
        // Petersburg at the same block; with it at the same height the
        // Petersburg retirement never happened.
        match (config.constantinople_block, spec.activation(Feature::Eip1283)) {
            (Some(c), None) => config.petersburg_block = Some(c),
            (Some(c), Some(h)) if h == c => {}
            (None, None) => {}
            (_, Some(_)) => {
                return Err(SpecError::UnsupportedConversion {
                    feature: Feature::Eip1283.name().to_string(),
                    format: FORMAT_NAME,
                });
            }
        }

        if let Some(dao) = spec.dao_fork {
            config.dao_fork_block = Some(dao.block);
            config.dao_fork_support = Some(dao.support);
        }

        match &spec.engine {
            Engine::Ethash(params) => {
                if params.ecip1010_length.is_some() {
                    return Err(SpecError::UnsupportedConversion {
                        feature: Feature::Ecip1010.name().to_string(),
                        format: FORMAT_NAME,
                    });
                }
                if params.ecip1017_era_rounds.is_some() {
                    return Err(SpecError::UnsupportedConversion {
                        feature: Feature::Ecip1017.name().to_string(),
                        format: FORMAT_NAME,
                    });
                }
                config.ethash = Some(serde_json::json!({}));
            }
            Engine::Clique(params) => {
                config.clique = Some(CliqueConfig {
                    period: params.period,
                    epoch: params.epoch,
                });
            }
            Engine::Unspecified => {}
        }

        self.config = config;
        self.nonce = spec.genesis.nonce.clone();
        self.timestamp = spec.genesis.timestamp.clone();
        self.extra_data = spec.genesis.extra_data.clone();
        self.gas_limit = spec.genesis.gas_limit.clone();
        self.difficulty = spec.genesis.difficulty.clone();
        self.mix_hash = spec.genesis.mix_hash.clone();
        self.coinbase = spec.genesis.coinbase.clone();
        self.alloc = spec.alloc.clone();
        self.extra.clear();
        Ok(())
    }

    fn to_pretty_json(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Prototype registered under `"geth"`.
pub struct GethFormat;

impl SpecFormat for GethFormat {
    fn name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Configurator>, SpecError> {
        let genesis: GethGenesis =
            serde_json::from_slice(bytes).map_err(|e| SpecError::InvalidInput {
                format: FORMAT_NAME,
                reason: e.to_string(),
            })?;
        Ok(Box::new(genesis))
    }

    fn blank(&self) -> Box<dyn Configurator> {
        Box::new(GethGenesis::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET: &str = r#"{
        "config": {
            "chainId": 1,
            "homesteadBlock": 1150000,
            "daoForkBlock": 1920000,
            "daoForkSupport": true,
            "eip150Block": 2463000,
            "eip155Block": 2675000,
            "eip158Block": 2675000,
            "byzantiumBlock": 4370000,
            "constantinopleBlock": 7280000,
            "petersburgBlock": 7280000,
            "istanbulBlock": 9069000,
            "muirGlacierBlock": 9200000,
            "berlinBlock": 12244000,
            "londonBlock": 12965000,
            "ethash": {}
        },
        "nonce": "0x0000000000000042",
        "difficulty": "0x400000000",
        "gasLimit": "0x1388",
        "alloc": {}
    }"#;

    #[test]
    fn parses_a_mainnet_style_document() {
        let genesis = GethFormat.parse(MAINNET.as_bytes()).unwrap();
        assert_eq!(genesis.chain_id(), Some(1));
        assert_eq!(genesis.chain_name(), None);

        let triggers = genesis.eip_triggers();
        assert!(triggers.contains(&(Feature::Eip2, 1_150_000)));
        assert!(triggers.contains(&(Feature::Eip658, 4_370_000)));
        assert!(triggers.contains(&(Feature::Eip1559, 12_965_000)));
        // Petersburg at the Constantinople block retires EIP-1283.
        assert!(!triggers.iter().any(|(f, _)| *f == Feature::Eip1283));
    }

    #[test]
    fn dao_block_appears_in_fork_heights() {
        let genesis = GethFormat.parse(MAINNET.as_bytes()).unwrap();
        assert!(genesis.fork_heights().contains(&1_920_000));
    }

    #[test]
    fn serialize_then_parse_round_trips() {
        let parsed: GethGenesis = serde_json::from_str(MAINNET).unwrap();
        let json = parsed.to_pretty_json().unwrap();
        let back: GethGenesis = serde_json::from_slice(json.as_bytes()).unwrap();
        assert_eq!(back, parsed);
    }

    #[test]
    fn unknown_fields_survive_the_round_trip() {
        let with_extra = r#"{"config": {"chainId": 5}, "parentHash": "0x00", "number": "0x0"}"#;
        let parsed: GethGenesis = serde_json::from_str(with_extra).unwrap();
        assert_eq!(parsed.extra.len(), 2);
        let json = serde_json::to_string(&parsed).unwrap();
        assert!(json.contains("parentHash"));
    }

    #[test]
    fn snapshot_and_apply_are_inverse_for_collapsible_schedules() {
        let parsed: GethGenesis = serde_json::from_str(MAINNET).unwrap();
        let mut rebuilt = GethGenesis::default();
        rebuilt.apply(&parsed.snapshot()).unwrap();
        assert_eq!(rebuilt.config, parsed.config);
    }

    #[test]
    fn apply_rejects_a_split_spurious_dragon() {
        let mut spec = CanonicalSpec::default();
        spec.activate(Feature::Eip160, 3_000_000);
        spec.activate(Feature::Eip161abc, 8_772_000);
        spec.activate(Feature::Eip161d, 8_772_000);
        spec.activate(Feature::Eip170, 8_772_000);

        let err = GethGenesis::default().apply(&spec).unwrap_err();
        assert!(matches!(err, SpecError::UnsupportedConversion { .. }));
    }

    #[test]
    fn apply_rejects_a_partial_group() {
        let mut spec = CanonicalSpec::default();
        spec.activate(Feature::Eip100, 4_370_000);

        let err = GethGenesis::default().apply(&spec).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("geth"), "unexpected message: {message}");
    }

    #[test]
    fn apply_rejects_ecips() {
        let mut spec = CanonicalSpec::default();
        spec.activate(Feature::Ecip1017, 5_000_000);

        let err = GethGenesis::default().apply(&spec).unwrap_err();
        assert!(matches!(
            err,
            SpecError::UnsupportedConversion { format: "geth", .. }
        ));
    }

    #[test]
    fn empty_document_is_implausibly_empty() {
        let genesis = GethFormat.parse(b"{}").unwrap();
        assert_eq!(genesis.chain_id(), None);
        assert!(genesis.fork_heights().is_empty());
    }

    #[test]
    fn malformed_bytes_fail_with_invalid_input() {
        let err = GethFormat.parse(b"[1, 2").err().unwrap();
        assert!(matches!(
            err,
            SpecError::InvalidInput { format: "geth", .. }
        ));
    }
}
