//! # Feature Activation Catalog
//!
//! Every named activation trigger the toolchain understands: the EIPs
//! that client configurations schedule individually, plus the ECIPs used
//! by Ethereum Classic networks. A chain specification maps a subset of
//! these to block heights; the inspector prints them and the validator
//! checks their internal consistency.
//!
//! The catalog is deliberately a plain enum rather than per-fork
//! groupings: grouped formats (geth-style "byzantiumBlock") expand into
//! these granular triggers when exported, and collapse back when
//! imported, which is where conversion gains and loses precision.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named protocol feature with a block-height activation trigger.
///
/// Variants are declared in activation-era order; `Ord` follows the
/// declaration order and is only used for map keys, never for output
/// ordering (the inspector sorts by height, then by [`Feature::name`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    // Homestead
    Eip2,
    Eip7,
    // Tangerine Whistle
    Eip150,
    // Spurious Dragon
    Eip155,
    Eip160,
    Eip161abc,
    Eip161d,
    Eip170,
    // Byzantium
    Eip100,
    Eip140,
    Eip198,
    Eip211,
    Eip212,
    Eip213,
    Eip214,
    Eip649,
    Eip658,
    // Constantinople
    Eip145,
    Eip1014,
    Eip1052,
    Eip1234,
    Eip1283,
    // Istanbul
    Eip152,
    Eip1108,
    Eip1344,
    Eip1884,
    Eip2028,
    Eip2200,
    // Muir Glacier
    Eip2384,
    // Berlin
    Eip2565,
    Eip2718,
    Eip2929,
    Eip2930,
    // London
    Eip1559,
    Eip3198,
    Eip3529,
    Eip3541,
    // Arrow Glacier
    Eip4345,
    // Gray Glacier
    Eip5133,
    // Ethereum Classic
    Ecip1010,
    Ecip1017,
    Ecip1041,
}

impl Feature {
    /// All catalog entries, in declaration order.
    pub const ALL: &'static [Feature] = &[
        Feature::Eip2,
        Feature::Eip7,
        Feature::Eip150,
        Feature::Eip155,
        Feature::Eip160,
        Feature::Eip161abc,
        Feature::Eip161d,
        Feature::Eip170,
        Feature::Eip100,
        Feature::Eip140,
        Feature::Eip198,
        Feature::Eip211,
        Feature::Eip212,
        Feature::Eip213,
        Feature::Eip214,
        Feature::Eip649,
        Feature::Eip658,
        Feature::Eip145,
        Feature::Eip1014,
        Feature::Eip1052,
        Feature::Eip1234,
        Feature::Eip1283,
        Feature::Eip152,
        Feature::Eip1108,
        Feature::Eip1344,
        Feature::Eip1884,
        Feature::Eip2028,
        Feature::Eip2200,
        Feature::Eip2384,
        Feature::Eip2565,
        Feature::Eip2718,
        Feature::Eip2929,
        Feature::Eip2930,
        Feature::Eip1559,
        Feature::Eip3198,
        Feature::Eip3529,
        Feature::Eip3541,
        Feature::Eip4345,
        Feature::Eip5133,
        Feature::Ecip1010,
        Feature::Ecip1017,
        Feature::Ecip1041,
    ];

    /// The stable lowercase name printed by `ips` and used in error
    /// messages, e.g. `"eip2"`, `"eip161abc"`, `"ecip1017"`.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Eip2 => "eip2",
            Feature::Eip7 => "eip7",
            Feature::Eip150 => "eip150",
            Feature::Eip155 => "eip155",
            Feature::Eip160 => "eip160",
            Feature::Eip161abc => "eip161abc",
            Feature::Eip161d => "eip161d",
            Feature::Eip170 => "eip170",
            Feature::Eip100 => "eip100",
            Feature::Eip140 => "eip140",
            Feature::Eip198 => "eip198",
            Feature::Eip211 => "eip211",
            Feature::Eip212 => "eip212",
            Feature::Eip213 => "eip213",
            Feature::Eip214 => "eip214",
            Feature::Eip649 => "eip649",
            Feature::Eip658 => "eip658",
            Feature::Eip145 => "eip145",
            Feature::Eip1014 => "eip1014",
            Feature::Eip1052 => "eip1052",
            Feature::Eip1234 => "eip1234",
            Feature::Eip1283 => "eip1283",
            Feature::Eip152 => "eip152",
            Feature::Eip1108 => "eip1108",
            Feature::Eip1344 => "eip1344",
            Feature::Eip1884 => "eip1884",
            Feature::Eip2028 => "eip2028",
            Feature::Eip2200 => "eip2200",
            Feature::Eip2384 => "eip2384",
            Feature::Eip2565 => "eip2565",
            Feature::Eip2718 => "eip2718",
            Feature::Eip2929 => "eip2929",
            Feature::Eip2930 => "eip2930",
            Feature::Eip1559 => "eip1559",
            Feature::Eip3198 => "eip3198",
            Feature::Eip3529 => "eip3529",
            Feature::Eip3541 => "eip3541",
            Feature::Eip4345 => "eip4345",
            Feature::Eip5133 => "eip5133",
            Feature::Ecip1010 => "ecip1010",
            Feature::Ecip1017 => "ecip1017",
            Feature::Ecip1041 => "ecip1041",
        }
    }

    /// Features that must already be active when this one activates.
    ///
    /// These are hard protocol dependencies, not fork groupings: typed
    /// transactions (EIP-2718) are a prerequisite for access-list and
    /// fee-market transactions, and the BASEFEE opcode is meaningless
    /// without the fee market itself.
    pub fn requires(self) -> &'static [Feature] {
        match self {
            Feature::Eip7 => &[Feature::Eip2],
            Feature::Eip161d => &[Feature::Eip161abc],
            Feature::Eip2930 => &[Feature::Eip2718],
            Feature::Eip1559 => &[Feature::Eip2718],
            Feature::Eip3198 => &[Feature::Eip1559],
            _ => &[],
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| format!("unknown feature name: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names.len(), Feature::ALL.len());
    }

    #[test]
    fn from_str_round_trips_every_name() {
        for feature in Feature::ALL {
            let parsed: Feature = feature.name().parse().unwrap();
            assert_eq!(parsed, *feature);
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("eip9999".parse::<Feature>().is_err());
        assert!("".parse::<Feature>().is_err());
    }

    #[test]
    fn requirements_reference_catalog_entries() {
        for feature in Feature::ALL {
            for dep in feature.requires() {
                assert!(Feature::ALL.contains(dep));
                assert_ne!(dep, feature, "{feature} requires itself");
            }
        }
    }

    #[test]
    fn serde_uses_the_printed_name() {
        let json = serde_json::to_string(&Feature::Eip161abc).unwrap();
        assert_eq!(json, "\"eip161abc\"");
        let back: Feature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Feature::Eip161abc);
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Feature::Ecip1041.to_string(), "ecip1041");
    }
}
