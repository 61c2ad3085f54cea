//! # Error Types
//!
//! The failure taxonomy for the whole toolchain. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Every failure surfaces immediately to the caller: there is no retry
//! and no partial-success output. The one deliberate exception is guess
//! mode detection, where per-candidate parse failures are swallowed and
//! only the aggregate [`SpecError::NoFormatDetected`] is reported.

use thiserror::Error;

/// Top-level error type for chain specification handling.
#[derive(Error, Debug)]
pub enum SpecError {
    /// A format name was given that no registered format matches.
    #[error("unknown chainspec format: {name}")]
    UnknownFormat {
        /// The name as the user supplied it.
        name: String,
    },

    /// A default chain name was given that no built-in default matches.
    #[error("no default chainspec found for name: {name}")]
    UnknownDefault {
        /// The name as the user supplied it.
        name: String,
    },

    /// Guess-mode detection exhausted every registered format.
    #[error("could not read given chainspec: no registered format accepts the input")]
    NoFormatDetected,

    /// Input failed to parse under a specific format.
    #[error("invalid {format} chainspec: {reason}")]
    InvalidInput {
        /// Registry name of the format that rejected the input.
        format: &'static str,
        /// The underlying parse failure.
        reason: String,
    },

    /// Neither a default name nor any input data was supplied.
    #[error("missing chainspec data")]
    MissingChainSpec,

    /// A source field has no safe or lossless representation in the
    /// target format.
    #[error("cannot represent {feature} in {format} format")]
    UnsupportedConversion {
        /// The field or activation trigger that cannot be mapped.
        feature: String,
        /// Registry name of the target format.
        format: &'static str,
    },

    /// The consistency check at a specific height came back negative.
    #[error("chainspec is inconsistent at block {height}")]
    ValidationFailed {
        /// The block height that was queried.
        height: u64,
    },

    /// IO error reading input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error while printing a specification.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_format() {
        let err = SpecError::UnknownFormat {
            name: "aleth".to_string(),
        };
        assert_eq!(err.to_string(), "unknown chainspec format: aleth");
    }

    #[test]
    fn display_names_the_unconvertible_feature() {
        let err = SpecError::UnsupportedConversion {
            feature: "ecip1017".to_string(),
            format: "geth",
        };
        assert_eq!(err.to_string(), "cannot represent ecip1017 in geth format");
    }

    #[test]
    fn io_errors_wrap_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err = SpecError::from(io);
        assert!(matches!(err, SpecError::Io(_)));
    }
}
