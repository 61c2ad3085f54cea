//! # Specification Inspection
//!
//! Derived views over a resolved specification: the ordered fork
//! schedule, the named activation triggers, and the point-in-time
//! consistency check.
//!
//! Formats expose their schedules in whatever order their internal
//! representation yields. Everything here sorts and deduplicates
//! explicitly before returning, so the output is deterministic no
//! matter which format produced the instance.

use std::collections::{BTreeMap, BTreeSet};

use crate::configurator::Configurator;
use crate::feature::Feature;

/// The specification's fork-activation heights, strictly ascending with
/// no duplicates.
pub fn forks(spec: &dyn Configurator) -> Vec<u64> {
    let mut heights = spec.fork_heights();
    heights.sort_unstable();
    heights.dedup();
    heights
}

/// All feature-activation triggers, sorted by height ascending and then
/// by feature name, with exact duplicates removed.
///
/// Conflicting entries (same feature, different heights) are both kept;
/// [`validate`] is where conflicts are judged.
pub fn ips(spec: &dyn Configurator) -> Vec<(Feature, u64)> {
    let mut triggers = spec.eip_triggers();
    triggers.sort_by(|(fa, ha), (fb, hb)| ha.cmp(hb).then_with(|| fa.name().cmp(fb.name())));
    triggers.dedup();
    triggers
}

/// Point-in-time consistency of the specification at `height`.
///
/// Returns false when:
///
/// - some feature is activated at two different heights and the earlier
///   activation is at or below `height`, or
/// - some trigger at or below `height` names a required predecessor
///   that is absent, or that activates only after the trigger itself.
///
/// Never raises; callers translate the boolean into an exit code.
pub fn validate(spec: &dyn Configurator, height: u64) -> bool {
    let mut activations: BTreeMap<Feature, BTreeSet<u64>> = BTreeMap::new();
    for (feature, at) in spec.eip_triggers() {
        activations.entry(feature).or_default().insert(at);
    }

    for (feature, heights) in &activations {
        if heights.len() > 1 {
            let Some(&earliest) = heights.iter().next() else {
                continue;
            };
            if earliest <= height {
                tracing::debug!(
                    feature = feature.name(),
                    heights = ?heights,
                    "conflicting activation heights"
                );
                return false;
            }
        }
    }

    for (feature, heights) in &activations {
        let Some(&at) = heights.iter().next() else {
            continue;
        };
        if at > height {
            continue;
        }
        for required in feature.requires() {
            match activations.get(required).and_then(|set| set.iter().next()) {
                None => {
                    tracing::debug!(
                        feature = feature.name(),
                        missing = required.name(),
                        "required predecessor is not scheduled"
                    );
                    return false;
                }
                Some(&required_at) if required_at > at => {
                    tracing::debug!(
                        feature = feature.name(),
                        required = required.name(),
                        "required predecessor activates too late"
                    );
                    return false;
                }
                Some(_) => {}
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalSpec;
    use crate::error::SpecError;
    use proptest::prelude::*;

    /// Inspection test double with raw, unnormalized schedules.
    struct RawSpec {
        heights: Vec<u64>,
        triggers: Vec<(Feature, u64)>,
    }

    impl Configurator for RawSpec {
        fn format(&self) -> &'static str {
            "raw"
        }
        fn chain_name(&self) -> Option<String> {
            None
        }
        fn chain_id(&self) -> Option<u64> {
            None
        }
        fn fork_heights(&self) -> Vec<u64> {
            self.heights.clone()
        }
        fn eip_triggers(&self) -> Vec<(Feature, u64)> {
            self.triggers.clone()
        }
        fn snapshot(&self) -> CanonicalSpec {
            CanonicalSpec::default()
        }
        fn apply(&mut self, _spec: &CanonicalSpec) -> Result<(), SpecError> {
            Ok(())
        }
        fn to_pretty_json(&self) -> Result<String, SpecError> {
            Ok("{}".to_string())
        }
    }

    #[test]
    fn forks_sorts_and_dedups_out_of_order_input() {
        let spec = RawSpec {
            heights: vec![3_000_000, 1_150_000, 3_000_000, 2_500_000],
            triggers: vec![],
        };
        assert_eq!(forks(&spec), vec![1_150_000, 2_500_000, 3_000_000]);
    }

    #[test]
    fn ips_orders_by_height_then_name() {
        let spec = RawSpec {
            heights: vec![],
            triggers: vec![
                (Feature::Eip7, 1_150_000),
                (Feature::Eip150, 2_463_000),
                (Feature::Eip2, 1_150_000),
            ],
        };
        assert_eq!(
            ips(&spec),
            vec![
                (Feature::Eip2, 1_150_000),
                (Feature::Eip7, 1_150_000),
                (Feature::Eip150, 2_463_000),
            ]
        );
    }

    #[test]
    fn ips_drops_exact_duplicates_but_keeps_conflicts() {
        let spec = RawSpec {
            heights: vec![],
            triggers: vec![
                (Feature::Eip155, 3_000_000),
                (Feature::Eip155, 3_000_000),
                (Feature::Eip155, 2_675_000),
            ],
        };
        assert_eq!(
            ips(&spec),
            vec![(Feature::Eip155, 2_675_000), (Feature::Eip155, 3_000_000)]
        );
    }

    #[test]
    fn validate_accepts_a_well_formed_schedule() {
        let spec = RawSpec {
            heights: vec![],
            triggers: vec![
                (Feature::Eip2, 1_150_000),
                (Feature::Eip7, 1_150_000),
                (Feature::Eip2718, 12_244_000),
                (Feature::Eip1559, 12_965_000),
                (Feature::Eip3198, 12_965_000),
            ],
        };
        assert!(validate(&spec, 0));
        assert!(validate(&spec, 12_965_000));
        assert!(validate(&spec, u64::MAX));
    }

    #[test]
    fn validate_rejects_a_missing_predecessor() {
        // Fee market scheduled without typed transactions anywhere.
        let spec = RawSpec {
            heights: vec![],
            triggers: vec![(Feature::Eip1559, 12_965_000)],
        };
        assert!(!validate(&spec, 12_965_000));
        // Below the activation the schedule is not yet in effect.
        assert!(validate(&spec, 12_964_999));
    }

    #[test]
    fn validate_rejects_a_predecessor_scheduled_too_late() {
        let spec = RawSpec {
            heights: vec![],
            triggers: vec![
                (Feature::Eip1559, 100),
                (Feature::Eip2718, 200),
            ],
        };
        assert!(!validate(&spec, 100));
    }

    #[test]
    fn validate_rejects_conflicting_heights_once_the_earlier_is_reached() {
        let spec = RawSpec {
            heights: vec![],
            triggers: vec![
                (Feature::Eip155, 2_675_000),
                (Feature::Eip155, 3_000_000),
            ],
        };
        assert!(validate(&spec, 2_674_999));
        assert!(!validate(&spec, 2_675_000));
        assert!(!validate(&spec, 5_000_000));
    }

    #[test]
    fn validate_ignores_duplicate_entries_at_the_same_height() {
        let spec = RawSpec {
            heights: vec![],
            triggers: vec![
                (Feature::Eip150, 2_463_000),
                (Feature::Eip150, 2_463_000),
            ],
        };
        assert!(validate(&spec, u64::MAX));
    }

    proptest! {
        #[test]
        fn forks_is_always_strictly_ascending(heights in proptest::collection::vec(any::<u64>(), 0..64)) {
            let spec = RawSpec { heights, triggers: vec![] };
            let ordered = forks(&spec);
            prop_assert!(ordered.windows(2).all(|pair| pair[0] < pair[1]));
        }

        #[test]
        fn ips_is_stable_across_repeated_calls(
            raw in proptest::collection::vec((0usize..Feature::ALL.len(), any::<u64>()), 0..64)
        ) {
            let triggers: Vec<(Feature, u64)> = raw
                .into_iter()
                .map(|(index, height)| (Feature::ALL[index], height))
                .collect();
            let spec = RawSpec { heights: vec![], triggers };
            let first = ips(&spec);
            let second = ips(&spec);
            prop_assert_eq!(&first, &second);
            prop_assert!(
                first.windows(2).all(|pair| {
                    pair[0].1 < pair[1].1
                        || (pair[0].1 == pair[1].1 && pair[0].0.name() <= pair[1].0.name())
                }),
                "ips output must be non-decreasing"
            );
        }
    }
}
