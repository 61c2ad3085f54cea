//! # Trial-Based Format Detection
//!
//! Resolves raw bytes to a single populated [`Configurator`], either
//! under a declared format name or by trying every registered format.
//!
//! Guess mode iterates the registry in sorted name order, so detection
//! over identical bytes and an identical format set always picks the
//! same winner. When more than one format would accept the input, the
//! first in that order silently wins; there is no ambiguity error. This
//! is a known limitation: a multigeth document is also a syntactically
//! valid geth document, so in guess mode it resolves as geth. Declare
//! the format to override.

use crate::configurator::Configurator;
use crate::error::SpecError;
use crate::registry::FormatRegistry;

/// Resolve `bytes` to a populated specification.
///
/// With `declared` set, only that format is attempted and its parse
/// error is surfaced as-is. Without it, every registered format is
/// tried in sorted name order and the first that parses *and* passes a
/// minimal plausibility check wins.
///
/// # Errors
///
/// - [`SpecError::UnknownFormat`] when `declared` names no registered
///   format.
/// - [`SpecError::InvalidInput`] when the declared format rejects the
///   bytes.
/// - [`SpecError::NoFormatDetected`] when guess mode exhausts every
///   candidate. Per-candidate failures are swallowed (logged at debug).
pub fn detect(
    registry: &FormatRegistry,
    bytes: &[u8],
    declared: Option<&str>,
) -> Result<Box<dyn Configurator>, SpecError> {
    if let Some(name) = declared {
        return registry.lookup(name)?.parse(bytes);
    }

    for name in registry.names() {
        let format = registry.lookup(name)?;
        match format.parse(bytes) {
            Ok(spec) if is_plausible(spec.as_ref()) => {
                tracing::debug!(format = name, "guess mode detected format");
                return Ok(spec);
            }
            Ok(_) => {
                tracing::debug!(format = name, "parsed but implausibly empty, skipping");
            }
            Err(e) => {
                tracing::debug!(format = name, error = %e, "candidate rejected input");
            }
        }
    }

    Err(SpecError::NoFormatDetected)
}

/// Minimal semantic sanity check for guess mode: a parsed candidate
/// only wins if it exposes some chain identity or a non-empty fork
/// schedule. This rejects the degenerate case where a permissive schema
/// accepts unrelated JSON as an all-empty specification.
fn is_plausible(spec: &dyn Configurator) -> bool {
    spec.chain_name().is_some_and(|name| !name.is_empty())
        || spec.chain_id().is_some()
        || !spec.fork_heights().is_empty()
}
