//! # Built-in Default Networks
//!
//! Canonical fork schedules for the well-known public and test
//! networks, constructed fresh on every lookup as multigeth documents
//! (the only layout that can hold every schedule here, classic-lineage
//! included). Genesis allocations are not embedded; a default carries
//! chain identity, engine parameters, the activation schedule, and the
//! genesis header.

use echainspec_core::{
    CanonicalSpec, CliqueParams, Configurator, DaoFork, Engine, EthashParams, Feature,
    GenesisHeader,
};

use crate::groups;
use crate::multigeth::MultiGethGenesis;

const ZERO_HASH: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";
const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

fn mainnet_ethash() -> Engine {
    Engine::Ethash(EthashParams {
        minimum_difficulty: Some("0x20000".to_string()),
        duration_limit: Some("0xd".to_string()),
        ..EthashParams::default()
    })
}

fn frontier_genesis() -> GenesisHeader {
    GenesisHeader {
        nonce: Some("0x0000000000000042".to_string()),
        timestamp: Some("0x0".to_string()),
        extra_data: Some(
            "0x11bbe8db4e347b4e8c937c1c8370e4b5ed33adb3db69cbdb7a38e1e50b1b82fa".to_string(),
        ),
        gas_limit: Some("0x1388".to_string()),
        difficulty: Some("0x400000000".to_string()),
        mix_hash: Some(ZERO_HASH.to_string()),
        coinbase: Some(ZERO_ADDRESS.to_string()),
    }
}

/// The Ethereum mainnet (foundation) schedule.
pub fn foundation() -> Box<dyn Configurator> {
    let mut spec = CanonicalSpec::default();
    spec.chain_id = Some(1);
    spec.network_id = Some(1);
    spec.engine = mainnet_ethash();
    spec.genesis = frontier_genesis();

    spec.activate_group(groups::HOMESTEAD, 1_150_000);
    spec.dao_fork = Some(DaoFork {
        block: 1_920_000,
        support: true,
    });
    spec.activate(Feature::Eip150, 2_463_000);
    spec.activate(Feature::Eip155, 2_675_000);
    spec.activate_group(groups::SPURIOUS_DRAGON, 2_675_000);
    spec.activate_group(groups::BYZANTIUM, 4_370_000);
    spec.activate_group(groups::CONSTANTINOPLE, 7_280_000);
    spec.activate_group(groups::ISTANBUL, 9_069_000);
    spec.activate(Feature::Eip2384, 9_200_000);
    spec.activate_group(groups::BERLIN, 12_244_000);
    spec.activate_group(groups::LONDON, 12_965_000);
    spec.activate(Feature::Eip4345, 13_773_000);
    spec.activate(Feature::Eip5133, 15_050_000);

    Box::new(MultiGethGenesis::from_canonical(&spec))
}

/// The Ethereum Classic mainnet schedule.
pub fn classic() -> Box<dyn Configurator> {
    let mut spec = CanonicalSpec::default();
    spec.chain_id = Some(61);
    spec.network_id = Some(1);
    spec.engine = Engine::Ethash(EthashParams {
        minimum_difficulty: Some("0x20000".to_string()),
        duration_limit: Some("0xd".to_string()),
        ecip1010_length: Some(2_000_000),
        ecip1017_era_rounds: Some(5_000_000),
    });
    spec.genesis = frontier_genesis();

    spec.activate_group(groups::HOMESTEAD, 1_150_000);
    // The split point is recorded; the irregular state change is not.
    spec.dao_fork = Some(DaoFork {
        block: 1_920_000,
        support: false,
    });
    spec.activate(Feature::Eip150, 2_500_000);
    // Die Hard
    spec.activate(Feature::Eip155, 3_000_000);
    spec.activate(Feature::Eip160, 3_000_000);
    spec.activate(Feature::Ecip1010, 3_000_000);
    // Gotham / the defuse
    spec.activate(Feature::Ecip1017, 5_000_000);
    spec.activate(Feature::Ecip1041, 5_900_000);
    // Atlantis: Byzantium minus the bomb delay, plus the outstanding
    // Spurious Dragon state-trie rules.
    spec.activate(Feature::Eip161abc, 8_772_000);
    spec.activate(Feature::Eip161d, 8_772_000);
    spec.activate(Feature::Eip170, 8_772_000);
    spec.activate_group(
        &[
            Feature::Eip100,
            Feature::Eip140,
            Feature::Eip198,
            Feature::Eip211,
            Feature::Eip212,
            Feature::Eip213,
            Feature::Eip214,
            Feature::Eip658,
        ],
        8_772_000,
    );
    // Agharta
    spec.activate_group(
        &[Feature::Eip145, Feature::Eip1014, Feature::Eip1052],
        9_573_000,
    );
    // Phoenix
    spec.activate_group(groups::ISTANBUL, 10_500_839);
    // Magneto
    spec.activate_group(groups::BERLIN, 13_189_133);
    // Mystique: London without the fee market.
    spec.activate(Feature::Eip3529, 14_525_000);
    spec.activate(Feature::Eip3541, 14_525_000);

    Box::new(MultiGethGenesis::from_canonical(&spec))
}

/// The Mordor classic test network schedule.
pub fn mordor() -> Box<dyn Configurator> {
    let mut spec = CanonicalSpec::default();
    spec.chain_id = Some(63);
    spec.network_id = Some(7);
    spec.engine = Engine::Ethash(EthashParams {
        minimum_difficulty: Some("0x20000".to_string()),
        duration_limit: Some("0xd".to_string()),
        ecip1017_era_rounds: Some(2_000_000),
        ..EthashParams::default()
    });
    spec.genesis = GenesisHeader {
        nonce: Some("0x0".to_string()),
        timestamp: Some("0x5d9676db".to_string()),
        extra_data: Some("0x".to_string()),
        gas_limit: Some("0x2fefd8".to_string()),
        difficulty: Some("0x20000".to_string()),
        mix_hash: Some(ZERO_HASH.to_string()),
        coinbase: Some(ZERO_ADDRESS.to_string()),
    };

    // Launched at Atlantis rules.
    spec.activate_group(groups::HOMESTEAD, 0);
    spec.activate(Feature::Eip150, 0);
    spec.activate(Feature::Eip155, 0);
    spec.activate_group(groups::SPURIOUS_DRAGON, 0);
    spec.activate_group(
        &[
            Feature::Eip100,
            Feature::Eip140,
            Feature::Eip198,
            Feature::Eip211,
            Feature::Eip212,
            Feature::Eip213,
            Feature::Eip214,
            Feature::Eip658,
        ],
        0,
    );
    spec.activate(Feature::Ecip1041, 0);
    spec.activate(Feature::Ecip1017, 2_000_000);
    // Agharta
    spec.activate_group(
        &[Feature::Eip145, Feature::Eip1014, Feature::Eip1052],
        301_243,
    );
    // Phoenix
    spec.activate_group(groups::ISTANBUL, 999_983);
    // Magneto
    spec.activate_group(groups::BERLIN, 3_985_893);
    // Mystique
    spec.activate(Feature::Eip3529, 5_520_226);
    spec.activate(Feature::Eip3541, 5_520_226);

    Box::new(MultiGethGenesis::from_canonical(&spec))
}

/// The Kotti classic proof-of-authority test network schedule.
pub fn kotti() -> Box<dyn Configurator> {
    let mut spec = CanonicalSpec::default();
    spec.chain_id = Some(6);
    spec.network_id = Some(6);
    spec.engine = Engine::Clique(CliqueParams {
        period: 15,
        epoch: 30_000,
    });
    spec.genesis = GenesisHeader {
        nonce: Some("0x0".to_string()),
        timestamp: Some("0x0".to_string()),
        extra_data: Some("0x".to_string()),
        gas_limit: Some("0x1388".to_string()),
        difficulty: Some("0x1".to_string()),
        mix_hash: Some(ZERO_HASH.to_string()),
        coinbase: Some(ZERO_ADDRESS.to_string()),
    };

    spec.activate_group(groups::HOMESTEAD, 0);
    spec.activate(Feature::Eip150, 0);
    spec.activate(Feature::Eip155, 0);
    spec.activate(Feature::Eip160, 0);
    // Atlantis
    spec.activate(Feature::Eip161abc, 716_617);
    spec.activate(Feature::Eip161d, 716_617);
    spec.activate(Feature::Eip170, 716_617);
    spec.activate_group(
        &[
            Feature::Eip100,
            Feature::Eip140,
            Feature::Eip198,
            Feature::Eip211,
            Feature::Eip212,
            Feature::Eip213,
            Feature::Eip214,
            Feature::Eip658,
        ],
        716_617,
    );
    // Agharta
    spec.activate_group(
        &[Feature::Eip145, Feature::Eip1014, Feature::Eip1052],
        1_705_549,
    );
    // Phoenix
    spec.activate_group(groups::ISTANBUL, 2_200_013);
    // Magneto
    spec.activate_group(groups::BERLIN, 4_368_634);
    // Mystique
    spec.activate(Feature::Eip3529, 5_578_000);
    spec.activate(Feature::Eip3541, 5_578_000);

    Box::new(MultiGethGenesis::from_canonical(&spec))
}

/// The Ropsten test network schedule.
pub fn ropsten() -> Box<dyn Configurator> {
    let mut spec = CanonicalSpec::default();
    spec.chain_id = Some(3);
    spec.network_id = Some(3);
    spec.engine = mainnet_ethash();
    spec.genesis = GenesisHeader {
        nonce: Some("0x0000000000000042".to_string()),
        timestamp: Some("0x0".to_string()),
        extra_data: Some(
            "0x3535353535353535353535353535353535353535353535353535353535353535".to_string(),
        ),
        gas_limit: Some("0x1000000".to_string()),
        difficulty: Some("0x100000".to_string()),
        mix_hash: Some(ZERO_HASH.to_string()),
        coinbase: Some(ZERO_ADDRESS.to_string()),
    };

    spec.activate_group(groups::HOMESTEAD, 0);
    spec.activate(Feature::Eip150, 0);
    spec.activate(Feature::Eip155, 10);
    spec.activate_group(groups::SPURIOUS_DRAGON, 10);
    spec.activate_group(groups::BYZANTIUM, 1_700_000);
    spec.activate_group(groups::CONSTANTINOPLE, 4_230_000);
    spec.activate_group(groups::ISTANBUL, 6_485_846);
    spec.activate(Feature::Eip2384, 7_117_117);
    spec.activate_group(groups::BERLIN, 9_812_189);
    spec.activate_group(groups::LONDON, 10_499_401);

    Box::new(MultiGethGenesis::from_canonical(&spec))
}

/// The Rinkeby proof-of-authority test network schedule.
pub fn rinkeby() -> Box<dyn Configurator> {
    let mut spec = CanonicalSpec::default();
    spec.chain_id = Some(4);
    spec.network_id = Some(4);
    spec.engine = Engine::Clique(CliqueParams {
        period: 15,
        epoch: 30_000,
    });
    spec.genesis = GenesisHeader {
        nonce: Some("0x0".to_string()),
        timestamp: Some("0x58ee40ba".to_string()),
        extra_data: Some("0x".to_string()),
        gas_limit: Some("0x47b760".to_string()),
        difficulty: Some("0x1".to_string()),
        mix_hash: Some(ZERO_HASH.to_string()),
        coinbase: Some(ZERO_ADDRESS.to_string()),
    };

    spec.activate_group(groups::HOMESTEAD, 1);
    spec.activate(Feature::Eip150, 2);
    spec.activate(Feature::Eip155, 3);
    spec.activate_group(groups::SPURIOUS_DRAGON, 3);
    spec.activate_group(groups::BYZANTIUM, 1_035_301);
    spec.activate_group(groups::CONSTANTINOPLE, 3_660_663);
    spec.activate_group(groups::ISTANBUL, 5_435_345);
    spec.activate_group(groups::BERLIN, 8_290_928);
    spec.activate_group(groups::LONDON, 8_897_988);

    Box::new(MultiGethGenesis::from_canonical(&spec))
}

/// The Goerli proof-of-authority test network schedule.
pub fn goerli() -> Box<dyn Configurator> {
    let mut spec = CanonicalSpec::default();
    spec.chain_id = Some(5);
    spec.network_id = Some(5);
    spec.engine = Engine::Clique(CliqueParams {
        period: 15,
        epoch: 30_000,
    });
    spec.genesis = GenesisHeader {
        nonce: Some("0x0".to_string()),
        timestamp: Some("0x5c51a607".to_string()),
        extra_data: Some("0x".to_string()),
        gas_limit: Some("0xa00000".to_string()),
        difficulty: Some("0x1".to_string()),
        mix_hash: Some(ZERO_HASH.to_string()),
        coinbase: Some(ZERO_ADDRESS.to_string()),
    };

    spec.activate_group(groups::HOMESTEAD, 0);
    spec.activate(Feature::Eip150, 0);
    spec.activate(Feature::Eip155, 0);
    spec.activate_group(groups::SPURIOUS_DRAGON, 0);
    spec.activate_group(groups::BYZANTIUM, 0);
    spec.activate_group(groups::CONSTANTINOPLE, 0);
    spec.activate_group(groups::ISTANBUL, 1_561_651);
    spec.activate_group(groups::BERLIN, 4_460_644);
    spec.activate_group(groups::LONDON, 5_062_605);

    Box::new(MultiGethGenesis::from_canonical(&spec))
}
