//! # The Configurator Capability Contract
//!
//! The one interface every client-specific chain specification format
//! implements. The detector, the inspector, the converter, and the CLI
//! are all written against `dyn Configurator` and `dyn SpecFormat`;
//! none of them name a concrete format type.
//!
//! There is no inheritance hierarchy anywhere: each format is a plain
//! struct mirroring its on-disk JSON schema, and the registry dispatches
//! over the registered variants polymorphically.

use crate::canonical::CanonicalSpec;
use crate::error::SpecError;
use crate::feature::Feature;

/// An abstract chain specification.
///
/// Implementations expose the chain's identity and activation schedule,
/// and take part in conversion through [`snapshot`](Configurator::snapshot)
/// and [`apply`](Configurator::apply). Accessors returning collections
/// make no ordering or uniqueness promises; the inspector normalizes.
pub trait Configurator {
    /// Registry name of the format this instance belongs to.
    fn format(&self) -> &'static str;

    /// Human-readable chain name, for formats that carry one.
    fn chain_name(&self) -> Option<String>;

    /// The EIP-155 chain identifier, if present.
    fn chain_id(&self) -> Option<u64>;

    /// Every block height at which any protocol rule changes, in the
    /// format's own order. Duplicates are allowed.
    fn fork_heights(&self) -> Vec<u64>;

    /// Named feature-activation pairs, in the format's own order.
    /// Duplicates and conflicting entries are allowed; the validator
    /// detects conflicts.
    fn eip_triggers(&self) -> Vec<(Feature, u64)>;

    /// Export the complete field set into the canonical model.
    fn snapshot(&self) -> CanonicalSpec;

    /// Import a canonical model, overwriting this instance's fields.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnsupportedConversion`] for any canonical
    /// field this format has no safe or lossless representation for.
    fn apply(&mut self, spec: &CanonicalSpec) -> Result<(), SpecError>;

    /// Serialize this instance in its own on-disk schema, pretty-printed.
    fn to_pretty_json(&self) -> Result<String, SpecError>;
}

/// A format prototype held by the format registry.
///
/// One value per supported client format; [`parse`](SpecFormat::parse)
/// and [`blank`](SpecFormat::blank) always produce fresh instances, so a
/// registry can be consulted any number of times without cross-run
/// contamination.
pub trait SpecFormat: Send + Sync {
    /// Unique registry name, e.g. `"geth"`.
    fn name(&self) -> &'static str;

    /// Populate a fresh instance from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidInput`] naming this format when the
    /// bytes do not parse under its schema.
    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Configurator>, SpecError>;

    /// A fresh, empty instance to be used as a conversion target.
    fn blank(&self) -> Box<dyn Configurator>;
}
