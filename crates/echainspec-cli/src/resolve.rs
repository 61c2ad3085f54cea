//! # Specification Resolution
//!
//! Turns the global flags into exactly one resolved specification per
//! invocation. Precedence, first match wins:
//!
//! 1. `--default <chain>`: look the name up in the default registry.
//!    An empty value is an error, not a fallthrough.
//! 2. Otherwise read raw bytes from `--file` or standard input and run
//!    the format detector, declared or guess mode.
//!
//! The resolved value is returned to the caller and passed into one
//! command handler; nothing here is stored in process-wide state, so
//! repeated invocations (and tests) cannot observe each other.

use std::io::Read;
use std::path::Path;

use echainspec_core::{detect, Configurator, DefaultRegistry, FormatRegistry, SpecError};

/// The global flags that feed resolution.
#[derive(Debug, Default)]
pub struct ResolveOptions<'a> {
    /// `--default`: a built-in chain name.
    pub default_chain: Option<&'a str>,
    /// `--inputf`: a declared input format; guess mode when absent.
    pub input_format: Option<&'a str>,
    /// `--file`: input path; standard input when absent.
    pub file: Option<&'a Path>,
}

/// Resolve the one specification this invocation operates on.
///
/// # Errors
///
/// - [`SpecError::MissingChainSpec`] when `--default` is present but
///   empty.
/// - [`SpecError::UnknownDefault`] for an unregistered default name.
/// - Any detector error for the input-bytes path.
pub fn resolve_spec(
    formats: &FormatRegistry,
    defaults: &DefaultRegistry,
    options: &ResolveOptions<'_>,
    stdin: &mut dyn Read,
) -> Result<Box<dyn Configurator>, SpecError> {
    if let Some(name) = options.default_chain {
        if name.is_empty() {
            return Err(SpecError::MissingChainSpec);
        }
        tracing::debug!(chain = name, "resolving built-in default");
        return defaults.lookup(name);
    }

    let bytes = read_input(options.file, stdin)?;
    tracing::debug!(
        bytes = bytes.len(),
        declared = options.input_format.unwrap_or("<guess>"),
        "resolving from input data"
    );
    detect(formats, &bytes, options.input_format)
}

fn read_input(file: Option<&Path>, stdin: &mut dyn Read) -> Result<Vec<u8>, SpecError> {
    match file {
        Some(path) => Ok(std::fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            stdin.read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}
