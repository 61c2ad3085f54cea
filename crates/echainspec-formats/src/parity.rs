//! # The parity Format
//!
//! The parity/OpenEthereum specification layout: a named chain with an
//! `engine` object, a `params` table of hex-quantity feature
//! transitions, a structured `genesis` block, and an `accounts` table
//! that doubles as the genesis allocation and the precompile registry.
//!
//! Activation mapping differs from the geth lineage in three ways:
//!
//! - Homestead, EIP-100b, the DAO fork, the ECIP fields, and the
//!   difficulty bomb delays live inside the engine params, not the
//!   chain params.
//! - Precompile activations (modexp, the alt_bn128 trio, blake2_f) are
//!   builtin accounts with an `activate_at` height.
//! - Bomb-delay EIPs are written into `difficultyBombDelays` on import
//!   but are not read back as named triggers; that direction is lossy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use echainspec_core::{
    CanonicalSpec, CliqueParams, Configurator, DaoFork, Engine, EthashParams, Feature,
    GenesisHeader, SpecError, SpecFormat,
};

use crate::num;

/// Registry name of this format.
pub const FORMAT_NAME: &str = "parity";

/// Name given to conversion targets whose source carries no chain name.
const UNNAMED_CHAIN: &str = "custom";

/// Beneficiary of the DAO hardfork irregular state change.
const DAO_BENEFICIARY: &str = "0xbf4ed7b27f1d666546e30d74d50d173d20bca754";

const ECRECOVER_ADDRESS: &str = "0x0000000000000000000000000000000000000001";
const SHA256_ADDRESS: &str = "0x0000000000000000000000000000000000000002";
const RIPEMD160_ADDRESS: &str = "0x0000000000000000000000000000000000000003";
const IDENTITY_ADDRESS: &str = "0x0000000000000000000000000000000000000004";
const MODEXP_ADDRESS: &str = "0x0000000000000000000000000000000000000005";
const BN128_ADD_ADDRESS: &str = "0x0000000000000000000000000000000000000006";
const BN128_MUL_ADDRESS: &str = "0x0000000000000000000000000000000000000007";
const BN128_PAIRING_ADDRESS: &str = "0x0000000000000000000000000000000000000008";
const BLAKE2F_ADDRESS: &str = "0x0000000000000000000000000000000000000009";

/// Extra difficulty bomb delay introduced by each delay EIP.
const BOMB_DELAYS: &[(Feature, u64)] = &[
    (Feature::Eip649, 3_000_000),
    (Feature::Eip1234, 2_000_000),
    (Feature::Eip2384, 4_000_000),
    (Feature::Eip4345, 1_700_000),
    (Feature::Eip5133, 700_000),
];

/// A parity chain specification document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParitySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "dataDir", skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(default, skip_serializing_if = "ParityEngine::is_empty")]
    pub engine: ParityEngine,
    #[serde(default)]
    pub params: ParityParams,
    #[serde(default)]
    pub genesis: ParityGenesis,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub accounts: BTreeMap<String, ParityAccount>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The engine object. Exactly one variant is populated in practice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParityEngine {
    #[serde(
        default,
        rename = "Ethash",
        alias = "ethash",
        skip_serializing_if = "Option::is_none"
    )]
    pub ethash: Option<ParityEthash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clique: Option<ParityClique>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ParityEngine {
    fn is_empty(&self) -> bool {
        self.ethash.is_none() && self.clique.is_none() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParityEthash {
    #[serde(default)]
    pub params: ParityEthashParams,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityEthashParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_limit: Option<String>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub homestead_transition: Option<u64>,
    #[serde(
        default,
        rename = "eip100bTransition",
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip100b_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub dao_hardfork_transition: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dao_hardfork_beneficiary: Option<String>,
    #[serde(
        default,
        with = "num::quantity_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub difficulty_bomb_delays: BTreeMap<u64, u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub bomb_defuse_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub ecip1010_pause_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub ecip1010_continue_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub ecip1017_era_rounds: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParityClique {
    #[serde(default)]
    pub params: ParityCliqueParams,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityCliqueParams {
    #[serde(default)]
    pub period: u64,
    #[serde(default)]
    pub epoch: u64,
}

/// The chain `params` table. Every transition is a hex quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityParams {
    #[serde(
        default,
        rename = "networkID",
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_id: Option<u64>,
    #[serde(
        default,
        rename = "chainID",
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub chain_id: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_code_size: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_code_size_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip150_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip155_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip160_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip161abc_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip161d_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip140_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip211_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip214_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip658_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip145_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip1014_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip1052_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip1283_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip1108_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip1344_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip1884_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip2028_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip2200_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip2565_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip2718_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip2929_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip2930_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip1559_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip3198_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip3529_transition: Option<u64>,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub eip3541_transition: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityGenesis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seal: Option<ParitySeal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParitySeal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethereum: Option<ParityEthereumSeal>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParityEthereumSeal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix_hash: Option<String>,
}

/// An entry in the `accounts` table: allocation, precompile, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParityAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtin: Option<ParityBuiltin>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A precompiled contract registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParityBuiltin {
    pub name: String,
    #[serde(
        default,
        with = "num::opt_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub activate_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Value>,
}

impl ParityBuiltin {
    fn new(name: &str, activate_at: Option<u64>, pricing: Value) -> Self {
        Self {
            name: name.to_string(),
            activate_at,
            pricing: Some(pricing),
        }
    }
}

impl ParitySpec {
    fn insert_builtin(&mut self, address: &str, builtin: ParityBuiltin) {
        self.accounts
            .entry(address.to_string())
            .or_default()
            .builtin = Some(builtin);
    }
}

impl Configurator for ParitySpec {
    fn format(&self) -> &'static str {
        FORMAT_NAME
    }

    fn chain_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn chain_id(&self) -> Option<u64> {
        self.params.chain_id
    }

    fn fork_heights(&self) -> Vec<u64> {
        self.snapshot().fork_heights()
    }

    fn eip_triggers(&self) -> Vec<(Feature, u64)> {
        self.snapshot().activations.into_iter().collect()
    }

    fn snapshot(&self) -> CanonicalSpec {
        let p = &self.params;
        let mut spec = CanonicalSpec::default();
        spec.name = self.name.clone();
        spec.chain_id = p.chain_id;
        spec.network_id = p.network_id;

        if let Some(ethash) = &self.engine.ethash {
            let ep = &ethash.params;
            if let Some(h) = ep.homestead_transition {
                spec.activate(Feature::Eip2, h);
                spec.activate(Feature::Eip7, h);
            }
            if let Some(h) = ep.eip100b_transition {
                spec.activate(Feature::Eip100, h);
            }
            if let Some(block) = ep.dao_hardfork_transition {
                spec.dao_fork = Some(DaoFork {
                    block,
                    support: true,
                });
            }
            if let Some(h) = ep.ecip1010_pause_transition {
                spec.activate(Feature::Ecip1010, h);
            }
            if let Some(h) = ep.bomb_defuse_transition {
                spec.activate(Feature::Ecip1041, h);
            }
            if let Some(rounds) = ep.ecip1017_era_rounds {
                // The first era boundary is where the reward schedule
                // first changes.
                spec.activate(Feature::Ecip1017, rounds);
            }
            spec.engine = Engine::Ethash(EthashParams {
                minimum_difficulty: ep.minimum_difficulty.clone(),
                duration_limit: ep.duration_limit.clone(),
                ecip1010_length: match (ep.ecip1010_pause_transition, ep.ecip1010_continue_transition) {
                    (Some(pause), Some(resume)) => Some(resume.saturating_sub(pause)),
                    _ => None,
                },
                ecip1017_era_rounds: ep.ecip1017_era_rounds,
            });
        } else if let Some(clique) = &self.engine.clique {
            spec.engine = Engine::Clique(CliqueParams {
                period: clique.params.period,
                epoch: clique.params.epoch,
            });
        }

        let transitions: &[(Option<u64>, Feature)] = &[
            (p.eip150_transition, Feature::Eip150),
            (p.eip155_transition, Feature::Eip155),
            (p.eip160_transition, Feature::Eip160),
            (p.eip161abc_transition, Feature::Eip161abc),
            (p.eip161d_transition, Feature::Eip161d),
            (p.max_code_size_transition, Feature::Eip170),
            (p.eip140_transition, Feature::Eip140),
            (p.eip211_transition, Feature::Eip211),
            (p.eip214_transition, Feature::Eip214),
            (p.eip658_transition, Feature::Eip658),
            (p.eip145_transition, Feature::Eip145),
            (p.eip1014_transition, Feature::Eip1014),
            (p.eip1052_transition, Feature::Eip1052),
            (p.eip1283_transition, Feature::Eip1283),
            (p.eip1108_transition, Feature::Eip1108),
            (p.eip1344_transition, Feature::Eip1344),
            (p.eip1884_transition, Feature::Eip1884),
            (p.eip2028_transition, Feature::Eip2028),
            (p.eip2200_transition, Feature::Eip2200),
            (p.eip2565_transition, Feature::Eip2565),
            (p.eip2718_transition, Feature::Eip2718),
            (p.eip2929_transition, Feature::Eip2929),
            (p.eip2930_transition, Feature::Eip2930),
            (p.eip1559_transition, Feature::Eip1559),
            (p.eip3198_transition, Feature::Eip3198),
            (p.eip3529_transition, Feature::Eip3529),
            (p.eip3541_transition, Feature::Eip3541),
        ];
        for (transition, feature) in transitions {
            if let Some(h) = transition {
                spec.activate(*feature, *h);
            }
        }

        for account in self.accounts.values() {
            let Some(builtin) = &account.builtin else {
                continue;
            };
            let Some(h) = builtin.activate_at else {
                continue;
            };
            let feature = match builtin.name.as_str() {
                "modexp" => Some(Feature::Eip198),
                "alt_bn128_add" | "alt_bn128_mul" => Some(Feature::Eip213),
                "alt_bn128_pairing" => Some(Feature::Eip212),
                "blake2_f" => Some(Feature::Eip152),
                _ => None,
            };
            if let Some(feature) = feature {
                spec.activate(feature, h);
            }
        }

        spec.genesis = GenesisHeader {
            nonce: self
                .genesis
                .seal
                .as_ref()
                .and_then(|s| s.ethereum.as_ref())
                .and_then(|e| e.nonce.clone()),
            mix_hash: self
                .genesis
                .seal
                .as_ref()
                .and_then(|s| s.ethereum.as_ref())
                .and_then(|e| e.mix_hash.clone()),
            timestamp: self.genesis.timestamp.clone(),
            extra_data: self.genesis.extra_data.clone(),
            gas_limit: self.genesis.gas_limit.clone(),
            difficulty: self.genesis.difficulty.clone(),
            coinbase: self.genesis.author.clone(),
        };

        for (address, account) in &self.accounts {
            if let Some(balance) = &account.balance {
                let mut entry = serde_json::Map::new();
                entry.insert("balance".to_string(), Value::String(balance.clone()));
                if let Some(nonce) = &account.nonce {
                    entry.insert("nonce".to_string(), Value::String(nonce.clone()));
                }
                spec.alloc.insert(address.clone(), Value::Object(entry));
            }
        }
        spec
    }

    fn apply(&mut self, spec: &CanonicalSpec) -> Result<(), SpecError> {
        let homestead = spec.activation(Feature::Eip2);
        if spec.activation(Feature::Eip7) != homestead {
            return Err(SpecError::UnsupportedConversion {
                feature: Feature::Eip7.name().to_string(),
                format: FORMAT_NAME,
            });
        }

        let mut out = ParitySpec {
            name: Some(
                spec.name
                    .clone()
                    .unwrap_or_else(|| UNNAMED_CHAIN.to_string()),
            ),
            ..ParitySpec::default()
        };

        out.params = ParityParams {
            network_id: spec.network_id.or(spec.chain_id),
            chain_id: spec.chain_id,
            eip150_transition: spec.activation(Feature::Eip150),
            eip155_transition: spec.activation(Feature::Eip155),
            eip160_transition: spec.activation(Feature::Eip160),
            eip161abc_transition: spec.activation(Feature::Eip161abc),
            eip161d_transition: spec.activation(Feature::Eip161d),
            max_code_size_transition: spec.activation(Feature::Eip170),
            max_code_size: spec.activation(Feature::Eip170).map(|_| 0x6000),
            eip140_transition: spec.activation(Feature::Eip140),
            eip211_transition: spec.activation(Feature::Eip211),
            eip214_transition: spec.activation(Feature::Eip214),
            eip658_transition: spec.activation(Feature::Eip658),
            eip145_transition: spec.activation(Feature::Eip145),
            eip1014_transition: spec.activation(Feature::Eip1014),
            eip1052_transition: spec.activation(Feature::Eip1052),
            eip1283_transition: spec.activation(Feature::Eip1283),
            eip1108_transition: spec.activation(Feature::Eip1108),
            eip1344_transition: spec.activation(Feature::Eip1344),
            eip1884_transition: spec.activation(Feature::Eip1884),
            eip2028_transition: spec.activation(Feature::Eip2028),
            eip2200_transition: spec.activation(Feature::Eip2200),
            eip2565_transition: spec.activation(Feature::Eip2565),
            eip2718_transition: spec.activation(Feature::Eip2718),
            eip2929_transition: spec.activation(Feature::Eip2929),
            eip2930_transition: spec.activation(Feature::Eip2930),
            eip1559_transition: spec.activation(Feature::Eip1559),
            eip3198_transition: spec.activation(Feature::Eip3198),
            eip3529_transition: spec.activation(Feature::Eip3529),
            eip3541_transition: spec.activation(Feature::Eip3541),
            ..ParityParams::default()
        };

        match &spec.engine {
            Engine::Ethash(params) => {
                let mut ep = ParityEthashParams {
                    minimum_difficulty: params.minimum_difficulty.clone(),
                    duration_limit: params.duration_limit.clone(),
                    homestead_transition: homestead,
                    eip100b_transition: spec.activation(Feature::Eip100),
                    ecip1010_pause_transition: spec.activation(Feature::Ecip1010),
                    ecip1010_continue_transition: match (
                        spec.activation(Feature::Ecip1010),
                        params.ecip1010_length,
                    ) {
                        (Some(pause), Some(length)) => Some(pause + length),
                        _ => None,
                    },
                    ecip1017_era_rounds: params
                        .ecip1017_era_rounds
                        .or_else(|| spec.activation(Feature::Ecip1017)),
                    bomb_defuse_transition: spec.activation(Feature::Ecip1041),
                    ..ParityEthashParams::default()
                };
                for (feature, delay) in BOMB_DELAYS {
                    if let Some(h) = spec.activation(*feature) {
                        ep.difficulty_bomb_delays.insert(h, *delay);
                    }
                }
                if let Some(dao) = spec.dao_fork {
                    if dao.support {
                        ep.dao_hardfork_transition = Some(dao.block);
                        ep.dao_hardfork_beneficiary = Some(DAO_BENEFICIARY.to_string());
                    }
                }
                out.engine.ethash = Some(ParityEthash { params: ep });
            }
            Engine::Clique(params) => {
                out.engine.clique = Some(ParityClique {
                    params: ParityCliqueParams {
                        period: params.period,
                        epoch: params.epoch,
                    },
                });
            }
            Engine::Unspecified => {}
        }

        out.genesis = ParityGenesis {
            seal: Some(ParitySeal {
                ethereum: Some(ParityEthereumSeal {
                    nonce: spec.genesis.nonce.clone(),
                    mix_hash: spec.genesis.mix_hash.clone(),
                }),
                extra: BTreeMap::new(),
            }),
            difficulty: spec.genesis.difficulty.clone(),
            author: spec.genesis.coinbase.clone(),
            timestamp: spec.genesis.timestamp.clone(),
            gas_limit: spec.genesis.gas_limit.clone(),
            extra_data: spec.genesis.extra_data.clone(),
            extra: BTreeMap::new(),
        };

        for (address, value) in &spec.alloc {
            let balance = match value {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => map
                    .get("balance")
                    .and_then(|b| b.as_str())
                    .map(str::to_string),
                _ => None,
            };
            let account = out.accounts.entry(address.clone()).or_default();
            account.balance = balance;
            if let Some(nonce) = value.get("nonce").and_then(|n| n.as_str()) {
                account.nonce = Some(nonce.to_string());
            }
        }

        out.insert_builtin(
            ECRECOVER_ADDRESS,
            ParityBuiltin::new(
                "ecrecover",
                None,
                json!({"linear": {"base": 3000, "word": 0}}),
            ),
        );
        out.insert_builtin(
            SHA256_ADDRESS,
            ParityBuiltin::new("sha256", None, json!({"linear": {"base": 60, "word": 12}})),
        );
        out.insert_builtin(
            RIPEMD160_ADDRESS,
            ParityBuiltin::new(
                "ripemd160",
                None,
                json!({"linear": {"base": 600, "word": 120}}),
            ),
        );
        out.insert_builtin(
            IDENTITY_ADDRESS,
            ParityBuiltin::new("identity", None, json!({"linear": {"base": 15, "word": 3}})),
        );
        if let Some(h) = spec.activation(Feature::Eip198) {
            out.insert_builtin(
                MODEXP_ADDRESS,
                ParityBuiltin::new("modexp", Some(h), json!({"modexp": {"divisor": 20}})),
            );
        }
        if let Some(h) = spec.activation(Feature::Eip213) {
            out.insert_builtin(
                BN128_ADD_ADDRESS,
                ParityBuiltin::new(
                    "alt_bn128_add",
                    Some(h),
                    json!({"linear": {"base": 500, "word": 0}}),
                ),
            );
            out.insert_builtin(
                BN128_MUL_ADDRESS,
                ParityBuiltin::new(
                    "alt_bn128_mul",
                    Some(h),
                    json!({"linear": {"base": 40000, "word": 0}}),
                ),
            );
        }
        if let Some(h) = spec.activation(Feature::Eip212) {
            out.insert_builtin(
                BN128_PAIRING_ADDRESS,
                ParityBuiltin::new(
                    "alt_bn128_pairing",
                    Some(h),
                    json!({"alt_bn128_pairing": {"base": 100000, "pair": 80000}}),
                ),
            );
        }
        if let Some(h) = spec.activation(Feature::Eip152) {
            out.insert_builtin(
                BLAKE2F_ADDRESS,
                ParityBuiltin::new("blake2_f", Some(h), json!({"blake2_f": {"gas_per_round": 1}})),
            );
        }

        *self = out;
        Ok(())
    }

    fn to_pretty_json(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Prototype registered under `"parity"`.
pub struct ParityFormat;

impl SpecFormat for ParityFormat {
    fn name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Configurator>, SpecError> {
        let spec: ParitySpec =
            serde_json::from_slice(bytes).map_err(|e| SpecError::InvalidInput {
                format: FORMAT_NAME,
                reason: e.to_string(),
            })?;
        Ok(Box::new(spec))
    }

    fn blank(&self) -> Box<dyn Configurator> {
        Box::new(ParitySpec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MORDEN_STYLE: &str = r#"{
        "name": "Morden",
        "engine": {
            "Ethash": {
                "params": {
                    "minimumDifficulty": "0x20000",
                    "durationLimit": "0xd",
                    "homesteadTransition": "0x789b0",
                    "eip100bTransition": "0x85d9a0",
                    "ecip1010PauseTransition": "0x2dc6c0",
                    "ecip1010ContinueTransition": "0x4c4b40",
                    "ecip1017EraRounds": "0x1e8480",
                    "bombDefuseTransition": "0x5a06e0"
                }
            }
        },
        "params": {
            "networkID": "0x2",
            "chainID": "0x3e",
            "eip150Transition": "0x1b34",
            "eip155Transition": "0x1b34",
            "eip160Transition": "0x1b34",
            "eip161abcTransition": "0x85d9a0",
            "eip161dTransition": "0x85d9a0",
            "maxCodeSizeTransition": "0x85d9a0",
            "maxCodeSize": "0x6000",
            "eip140Transition": "0x85d9a0",
            "eip211Transition": "0x85d9a0",
            "eip214Transition": "0x85d9a0",
            "eip658Transition": "0x85d9a0"
        },
        "genesis": {
            "seal": {
                "ethereum": {
                    "nonce": "0x00006d6f7264656e",
                    "mixHash": "0x0000000000000000000000000000000000000000000000000000000000000000"
                }
            },
            "difficulty": "0x20000",
            "gasLimit": "0x2fefd8"
        },
        "accounts": {
            "0x0000000000000000000000000000000000000005": {
                "builtin": {
                    "name": "modexp",
                    "activate_at": "0x85d9a0",
                    "pricing": {"modexp": {"divisor": 20}}
                }
            },
            "0x102e61f5d8f9bc71d0ad4a084df4e65e05ce0e1c": {
                "balance": "0x153d102c"
            }
        }
    }"#;

    #[test]
    fn parses_engine_level_activations() {
        let spec = ParityFormat.parse(MORDEN_STYLE.as_bytes()).unwrap();
        assert_eq!(spec.chain_name(), Some("Morden".to_string()));
        assert_eq!(spec.chain_id(), Some(62));

        let triggers = spec.eip_triggers();
        assert!(triggers.contains(&(Feature::Eip2, 0x789b0)));
        assert!(triggers.contains(&(Feature::Eip7, 0x789b0)));
        assert!(triggers.contains(&(Feature::Eip100, 0x85d9a0)));
        assert!(triggers.contains(&(Feature::Ecip1041, 0x5a06e0)));
    }

    #[test]
    fn builtin_accounts_become_triggers() {
        let spec = ParityFormat.parse(MORDEN_STYLE.as_bytes()).unwrap();
        let triggers = spec.eip_triggers();
        assert!(triggers.contains(&(Feature::Eip198, 0x85d9a0)));
    }

    #[test]
    fn ecip1010_length_is_derived_from_the_transition_pair() {
        let parsed: ParitySpec = serde_json::from_str(MORDEN_STYLE).unwrap();
        match parsed.snapshot().engine {
            Engine::Ethash(params) => {
                assert_eq!(params.ecip1010_length, Some(0x4c4b40 - 0x2dc6c0));
                assert_eq!(params.ecip1017_era_rounds, Some(0x1e8480));
            }
            other => panic!("expected ethash engine, got {other:?}"),
        }
    }

    #[test]
    fn balances_land_in_the_alloc() {
        let parsed: ParitySpec = serde_json::from_str(MORDEN_STYLE).unwrap();
        let snapshot = parsed.snapshot();
        let account = &snapshot.alloc["0x102e61f5d8f9bc71d0ad4a084df4e65e05ce0e1c"];
        assert_eq!(account["balance"], "0x153d102c");
        // Builtin-only accounts are protocol configuration, not allocation.
        assert!(!snapshot
            .alloc
            .contains_key("0x0000000000000000000000000000000000000005"));
    }

    #[test]
    fn serialize_then_parse_round_trips() {
        let parsed: ParitySpec = serde_json::from_str(MORDEN_STYLE).unwrap();
        let json = parsed.to_pretty_json().unwrap();
        let back: ParitySpec = serde_json::from_slice(json.as_bytes()).unwrap();
        assert_eq!(back, parsed);
    }

    #[test]
    fn apply_writes_builtins_and_bomb_delays() {
        let mut canonical = CanonicalSpec::default();
        canonical.chain_id = Some(1);
        canonical.engine = Engine::Ethash(EthashParams::default());
        canonical.activate(Feature::Eip198, 4_370_000);
        canonical.activate(Feature::Eip212, 4_370_000);
        canonical.activate(Feature::Eip213, 4_370_000);
        canonical.activate(Feature::Eip649, 4_370_000);
        canonical.activate(Feature::Eip1234, 7_280_000);

        let mut spec = ParitySpec::default();
        spec.apply(&canonical).unwrap();

        let modexp = spec.accounts[MODEXP_ADDRESS].builtin.as_ref().unwrap();
        assert_eq!(modexp.activate_at, Some(4_370_000));

        let ethash = spec.engine.ethash.as_ref().unwrap();
        assert_eq!(
            ethash.params.difficulty_bomb_delays.get(&4_370_000),
            Some(&3_000_000)
        );
        assert_eq!(
            ethash.params.difficulty_bomb_delays.get(&7_280_000),
            Some(&2_000_000)
        );
    }

    #[test]
    fn apply_synthesizes_a_name_for_nameless_sources() {
        let mut canonical = CanonicalSpec::default();
        canonical.chain_id = Some(1);

        let mut spec = ParitySpec::default();
        spec.apply(&canonical).unwrap();
        assert_eq!(spec.name.as_deref(), Some("custom"));
    }

    #[test]
    fn apply_rejects_a_split_homestead() {
        let mut canonical = CanonicalSpec::default();
        canonical.engine = Engine::Ethash(EthashParams::default());
        canonical.activate(Feature::Eip2, 1_150_000);
        canonical.activate(Feature::Eip7, 1_150_001);

        let err = ParitySpec::default().apply(&canonical).unwrap_err();
        assert!(matches!(
            err,
            SpecError::UnsupportedConversion {
                format: "parity",
                ..
            }
        ));
    }

    #[test]
    fn dao_oppose_is_not_written() {
        let mut canonical = CanonicalSpec::default();
        canonical.engine = Engine::Ethash(EthashParams::default());
        canonical.dao_fork = Some(DaoFork {
            block: 1_920_000,
            support: false,
        });

        let mut spec = ParitySpec::default();
        spec.apply(&canonical).unwrap();
        let ethash = spec.engine.ethash.as_ref().unwrap();
        assert_eq!(ethash.params.dao_hardfork_transition, None);
    }

    #[test]
    fn malformed_bytes_fail_with_invalid_input() {
        let err = ParityFormat.parse(b"::").err().unwrap();
        assert!(matches!(
            err,
            SpecError::InvalidInput {
                format: "parity",
                ..
            }
        ));
    }
}
