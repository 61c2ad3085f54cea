//! # The multigeth Format
//!
//! A genesis document whose `config` object schedules every feature
//! individually instead of by grouped fork blocks, which is what lets it
//! describe classic-lineage chains that activated half of an upgrade at
//! one height and the rest later. It also carries the ECIP fields
//! (monetary policy eras, difficulty bomb pause and disposal) that the
//! grouped layout has no room for.
//!
//! This layout maps 1:1 onto the canonical model, so importing never
//! fails: multigeth is the target every source converts into cleanly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use echainspec_core::{
    CanonicalSpec, CliqueParams, Configurator, DaoFork, Engine, EthashParams, Feature,
    GenesisHeader, SpecError, SpecFormat,
};

use crate::geth::CliqueConfig;

/// Registry name of this format.
pub const FORMAT_NAME: &str = "multigeth";

/// A multigeth genesis document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiGethGenesis {
    #[serde(default)]
    pub config: MultiGethChainConfig,
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
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The granular `config` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiGethChainConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    // Homestead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip2_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip7_f_block: Option<u64>,

    // Tangerine Whistle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip150_block: Option<u64>,

    // Spurious Dragon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip155_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip160_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip161abc_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip161d_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip170_f_block: Option<u64>,

    // Byzantium
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip100_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip140_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip198_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip211_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip212_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip213_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip214_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip649_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip658_f_block: Option<u64>,

    // Constantinople
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip145_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip1014_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip1052_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip1234_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip1283_f_block: Option<u64>,

    // Istanbul
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip152_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip1108_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip1344_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip1884_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip2028_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip2200_f_block: Option<u64>,

    // Difficulty bomb delays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip2384_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip4345_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip5133_f_block: Option<u64>,

    // Berlin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip2565_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip2718_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip2929_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip2930_f_block: Option<u64>,

    // London
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip1559_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip3198_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip3529_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip3541_f_block: Option<u64>,

    // Ethereum Classic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecip1010_pause_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecip1010_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecip1017_f_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecip1017_era_rounds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposal_block: Option<u64>,

    // DAO
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dao_fork_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dao_fork_support: Option<bool>,

    // Engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethash: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clique: Option<CliqueConfig>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MultiGethChainConfig {
    /// The granular field carrying a feature's activation, if any.
    fn activation_of(&self, feature: Feature) -> Option<u64> {
        match feature {
            Feature::Eip2 => self.eip2_f_block,
            Feature::Eip7 => self.eip7_f_block,
            Feature::Eip150 => self.eip150_block,
            Feature::Eip155 => self.eip155_block,
            Feature::Eip160 => self.eip160_f_block,
            Feature::Eip161abc => self.eip161abc_f_block,
            Feature::Eip161d => self.eip161d_f_block,
            Feature::Eip170 => self.eip170_f_block,
            Feature::Eip100 => self.eip100_f_block,
            Feature::Eip140 => self.eip140_f_block,
            Feature::Eip198 => self.eip198_f_block,
            Feature::Eip211 => self.eip211_f_block,
            Feature::Eip212 => self.eip212_f_block,
            Feature::Eip213 => self.eip213_f_block,
            Feature::Eip214 => self.eip214_f_block,
            Feature::Eip649 => self.eip649_f_block,
            Feature::Eip658 => self.eip658_f_block,
            Feature::Eip145 => self.eip145_f_block,
            Feature::Eip1014 => self.eip1014_f_block,
            Feature::Eip1052 => self.eip1052_f_block,
            Feature::Eip1234 => self.eip1234_f_block,
            Feature::Eip1283 => self.eip1283_f_block,
            Feature::Eip152 => self.eip152_f_block,
            Feature::Eip1108 => self.eip1108_f_block,
            Feature::Eip1344 => self.eip1344_f_block,
            Feature::Eip1884 => self.eip1884_f_block,
            Feature::Eip2028 => self.eip2028_f_block,
            Feature::Eip2200 => self.eip2200_f_block,
            Feature::Eip2384 => self.eip2384_f_block,
            Feature::Eip2565 => self.eip2565_f_block,
            Feature::Eip2718 => self.eip2718_f_block,
            Feature::Eip2929 => self.eip2929_f_block,
            Feature::Eip2930 => self.eip2930_f_block,
            Feature::Eip1559 => self.eip1559_f_block,
            Feature::Eip3198 => self.eip3198_f_block,
            Feature::Eip3529 => self.eip3529_f_block,
            Feature::Eip3541 => self.eip3541_f_block,
            Feature::Eip4345 => self.eip4345_f_block,
            Feature::Eip5133 => self.eip5133_f_block,
            Feature::Ecip1010 => self.ecip1010_pause_block,
            Feature::Ecip1017 => self.ecip1017_f_block,
            Feature::Ecip1041 => self.disposal_block,
        }
    }

    /// Write a feature's activation into its granular field.
    fn set_activation(&mut self, feature: Feature, height: u64) {
        let slot = match feature {
            Feature::Eip2 => &mut self.eip2_f_block,
            Feature::Eip7 => &mut self.eip7_f_block,
            Feature::Eip150 => &mut self.eip150_block,
            Feature::Eip155 => &mut self.eip155_block,
            Feature::Eip160 => &mut self.eip160_f_block,
            Feature::Eip161abc => &mut self.eip161abc_f_block,
            Feature::Eip161d => &mut self.eip161d_f_block,
            Feature::Eip170 => &mut self.eip170_f_block,
            Feature::Eip100 => &mut self.eip100_f_block,
            Feature::Eip140 => &mut self.eip140_f_block,
            Feature::Eip198 => &mut self.eip198_f_block,
            Feature::Eip211 => &mut self.eip211_f_block,
            Feature::Eip212 => &mut self.eip212_f_block,
            Feature::Eip213 => &mut self.eip213_f_block,
            Feature::Eip214 => &mut self.eip214_f_block,
            Feature::Eip649 => &mut self.eip649_f_block,
            Feature::Eip658 => &mut self.eip658_f_block,
            Feature::Eip145 => &mut self.eip145_f_block,
            Feature::Eip1014 => &mut self.eip1014_f_block,
            Feature::Eip1052 => &mut self.eip1052_f_block,
            Feature::Eip1234 => &mut self.eip1234_f_block,
            Feature::Eip1283 => &mut self.eip1283_f_block,
            Feature::Eip152 => &mut self.eip152_f_block,
            Feature::Eip1108 => &mut self.eip1108_f_block,
            Feature::Eip1344 => &mut self.eip1344_f_block,
            Feature::Eip1884 => &mut self.eip1884_f_block,
            Feature::Eip2028 => &mut self.eip2028_f_block,
            Feature::Eip2200 => &mut self.eip2200_f_block,
            Feature::Eip2384 => &mut self.eip2384_f_block,
            Feature::Eip2565 => &mut self.eip2565_f_block,
            Feature::Eip2718 => &mut self.eip2718_f_block,
            Feature::Eip2929 => &mut self.eip2929_f_block,
            Feature::Eip2930 => &mut self.eip2930_f_block,
            Feature::Eip1559 => &mut self.eip1559_f_block,
            Feature::Eip3198 => &mut self.eip3198_f_block,
            Feature::Eip3529 => &mut self.eip3529_f_block,
            Feature::Eip3541 => &mut self.eip3541_f_block,
            Feature::Eip4345 => &mut self.eip4345_f_block,
            Feature::Eip5133 => &mut self.eip5133_f_block,
            Feature::Ecip1010 => &mut self.ecip1010_pause_block,
            Feature::Ecip1017 => &mut self.ecip1017_f_block,
            Feature::Ecip1041 => &mut self.disposal_block,
        };
        *slot = Some(height);
    }
}

impl MultiGethGenesis {
    /// Rebuild this document from a canonical model. Infallible: the
    /// granular layout represents everything the model can hold.
    pub fn from_canonical(spec: &CanonicalSpec) -> Self {
        let mut config = MultiGethChainConfig {
            network_id: spec.network_id,
            chain_id: spec.chain_id,
            ..MultiGethChainConfig::default()
        };

        for (feature, height) in &spec.activations {
            config.set_activation(*feature, *height);
        }

        if let Some(dao) = spec.dao_fork {
            config.dao_fork_block = Some(dao.block);
            config.dao_fork_support = Some(dao.support);
        }

        match &spec.engine {
            Engine::Ethash(params) => {
                config.ethash = Some(serde_json::json!({}));
                config.ecip1010_length = params.ecip1010_length;
                config.ecip1017_era_rounds = params.ecip1017_era_rounds;
            }
            Engine::Clique(params) => {
                config.clique = Some(CliqueConfig {
                    period: params.period,
                    epoch: params.epoch,
                });
            }
            Engine::Unspecified => {}
        }

        MultiGethGenesis {
            config,
            nonce: spec.genesis.nonce.clone(),
            timestamp: spec.genesis.timestamp.clone(),
            extra_data: spec.genesis.extra_data.clone(),
            gas_limit: spec.genesis.gas_limit.clone(),
            difficulty: spec.genesis.difficulty.clone(),
            mix_hash: spec.genesis.mix_hash.clone(),
            coinbase: spec.genesis.coinbase.clone(),
            alloc: spec.alloc.clone(),
            extra: BTreeMap::new(),
        }
    }
}

impl Configurator for MultiGethGenesis {
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
        spec.network_id = c.network_id;

        for feature in Feature::ALL {
            if let Some(height) = c.activation_of(*feature) {
                spec.activate(*feature, height);
            }
        }

        spec.engine = if let Some(clique) = c.clique {
            Engine::Clique(CliqueParams {
                period: clique.period,
                epoch: clique.epoch,
            })
        } else if c.ethash.is_some() {
            Engine::Ethash(EthashParams {
                ecip1010_length: c.ecip1010_length,
                ecip1017_era_rounds: c.ecip1017_era_rounds,
                ..EthashParams::default()
            })
        } else {
            Engine::Unspecified
        };

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
        *self = MultiGethGenesis::from_canonical(spec);
        Ok(())
    }

    fn to_pretty_json(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Prototype registered under `"multigeth"`.
pub struct MultiGethFormat;

impl SpecFormat for MultiGethFormat {
    fn name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Configurator>, SpecError> {
        let genesis: MultiGethGenesis =
            serde_json::from_slice(bytes).map_err(|e| SpecError::InvalidInput {
                format: FORMAT_NAME,
                reason: e.to_string(),
            })?;
        Ok(Box::new(genesis))
    }

    fn blank(&self) -> Box<dyn Configurator> {
        Box::new(MultiGethGenesis::default())
    }
}
