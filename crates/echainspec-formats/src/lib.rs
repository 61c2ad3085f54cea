//! # echainspec-formats - Client Format Implementations
//!
//! The concrete chain specification layouts the toolchain understands,
//! each one a serde model of its client's on-disk JSON schema with a
//! [`Configurator`] implementation on top:
//!
//! - [`geth`]: go-ethereum genesis documents with grouped fork blocks.
//! - [`multigeth`]: granular per-feature schedules, ECIPs included.
//! - [`parity`]: named specs with hex-quantity transitions, engine
//!   params, and builtin-account precompiles.
//!
//! [`defaults`] holds the built-in network schedules, and the two
//! registry builders here are the only way the rest of the workspace
//! obtains formats: built once at startup, read-only afterwards.

pub mod defaults;
pub mod geth;
pub mod groups;
pub mod multigeth;
mod num;
pub mod parity;

use echainspec_core::{Configurator, DefaultRegistry, FormatRegistry};

pub use geth::GethFormat;
pub use multigeth::MultiGethFormat;
pub use parity::ParityFormat;

/// The registry of every supported client format.
pub fn format_registry() -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(Box::new(GethFormat));
    registry.register(Box::new(MultiGethFormat));
    registry.register(Box::new(ParityFormat));
    registry
}

/// The registry of built-in default networks.
pub fn default_registry() -> DefaultRegistry {
    let mut registry = DefaultRegistry::new();
    registry.register("classic", defaults::classic);
    registry.register("foundation", defaults::foundation);
    registry.register("goerli", defaults::goerli);
    registry.register("kotti", defaults::kotti);
    registry.register("mordor", defaults::mordor);
    registry.register("rinkeby", defaults::rinkeby);
    registry.register("ropsten", defaults::ropsten);
    registry
}

/// Convenience: a default network as a boxed configurator, for tests
/// and embedding callers.
pub fn default_chain(name: &str) -> Option<Box<dyn Configurator>> {
    default_registry().lookup(name).ok()
}
