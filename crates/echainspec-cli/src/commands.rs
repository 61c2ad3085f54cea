//! # Command Handlers
//!
//! Pure renderers for each subcommand: they take the resolved
//! specification and return what should be printed, leaving the
//! printing (and exit-code translation) to `main`. Either a handler
//! returns a complete result or it fails; nothing is emitted halfway.

use echainspec_core::{convert, inspect, Configurator, FormatRegistry, SpecError};

/// The default action: the resolved specification, pretty-printed in
/// its own format, or converted into `output_format` first.
///
/// # Errors
///
/// Returns [`SpecError::UnknownFormat`] for an unregistered output
/// format and [`SpecError::UnsupportedConversion`] when the conversion
/// cannot represent the source.
pub fn print_or_convert(
    spec: &dyn Configurator,
    output_format: Option<&str>,
    formats: &FormatRegistry,
) -> Result<String, SpecError> {
    match output_format {
        None => spec.to_pretty_json(),
        Some(name) => {
            let format = formats.lookup(name)?;
            let mut target = format.blank();
            convert(spec, target.as_mut())?;
            target.to_pretty_json()
        }
    }
}

/// Lines for `forks`: ascending heights, one per line.
pub fn fork_lines(spec: &dyn Configurator) -> Vec<String> {
    inspect::forks(spec)
        .into_iter()
        .map(|height| height.to_string())
        .collect()
}

/// Lines for `ips`: `<name> <height>` pairs in the inspector's order.
pub fn ips_lines(spec: &dyn Configurator) -> Vec<String> {
    inspect::ips(spec)
        .into_iter()
        .map(|(feature, height)| format!("{feature} {height}"))
        .collect()
}

/// The `validate` command: consistency at `height` as a result, so the
/// caller maps it straight onto the process exit code.
///
/// # Errors
///
/// Returns [`SpecError::ValidationFailed`] when the specification is
/// inconsistent at `height`.
pub fn check_consistency(spec: &dyn Configurator, height: u64) -> Result<(), SpecError> {
    if inspect::validate(spec, height) {
        Ok(())
    } else {
        Err(SpecError::ValidationFailed { height })
    }
}
