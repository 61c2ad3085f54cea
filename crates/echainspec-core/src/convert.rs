//! # Conversion Facade
//!
//! Structural translation between two chain specification formats. The
//! facade itself is one call: snapshot the source into the canonical
//! model, apply the result to the target. All per-format mapping rules
//! live in the formats' `snapshot`/`apply` implementations; this module
//! only defines the call contract and surfaces their errors.

use crate::configurator::Configurator;
use crate::error::SpecError;

/// Map every field of `source` that has a corresponding representation
/// into `target`, mutating `target` in place.
///
/// # Errors
///
/// Returns [`SpecError::UnsupportedConversion`] when a source field has
/// no safe or lossless representation in the target format. The target
/// must not be used after a failed conversion; it may be partially
/// written.
pub fn convert(source: &dyn Configurator, target: &mut dyn Configurator) -> Result<(), SpecError> {
    let snapshot = source.snapshot();
    tracing::debug!(
        from = source.format(),
        to = target.format(),
        activations = snapshot.activations.len(),
        "converting chainspec"
    );
    target.apply(&snapshot)
}
