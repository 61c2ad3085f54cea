//! # Fork Groupings
//!
//! The named protocol upgrades that geth-style configurations schedule
//! as a single block number each. Grouped formats expand these into
//! granular triggers on export and collapse them back on import; a
//! schedule whose granular heights disagree inside one group cannot be
//! collapsed and fails conversion.

use echainspec_core::Feature;

/// Homestead: EIP-2 plus the DELEGATECALL opcode.
pub const HOMESTEAD: &[Feature] = &[Feature::Eip2, Feature::Eip7];

/// Spurious Dragon's `eip158Block` umbrella: replay-independent state
/// clearing and the contract code size limit. EIP-155 has its own block
/// in geth configurations and is not part of this group.
pub const SPURIOUS_DRAGON: &[Feature] = &[
    Feature::Eip160,
    Feature::Eip161abc,
    Feature::Eip161d,
    Feature::Eip170,
];

/// Byzantium.
pub const BYZANTIUM: &[Feature] = &[
    Feature::Eip100,
    Feature::Eip140,
    Feature::Eip198,
    Feature::Eip211,
    Feature::Eip212,
    Feature::Eip213,
    Feature::Eip214,
    Feature::Eip649,
    Feature::Eip658,
];

/// Constantinople, without EIP-1283 (handled separately because
/// Petersburg retired it).
pub const CONSTANTINOPLE: &[Feature] = &[
    Feature::Eip145,
    Feature::Eip1014,
    Feature::Eip1052,
    Feature::Eip1234,
];

/// Istanbul.
pub const ISTANBUL: &[Feature] = &[
    Feature::Eip152,
    Feature::Eip1108,
    Feature::Eip1344,
    Feature::Eip1884,
    Feature::Eip2028,
    Feature::Eip2200,
];

/// Berlin.
pub const BERLIN: &[Feature] = &[
    Feature::Eip2565,
    Feature::Eip2718,
    Feature::Eip2929,
    Feature::Eip2930,
];

/// London.
pub const LONDON: &[Feature] = &[
    Feature::Eip1559,
    Feature::Eip3198,
    Feature::Eip3529,
    Feature::Eip3541,
];
