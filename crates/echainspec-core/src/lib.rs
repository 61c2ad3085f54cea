//! # echainspec-core - Chain Specification Abstractions
//!
//! This crate is the foundation of the echainspec toolchain. It defines
//! everything the rest of the workspace is written against:
//!
//! 1. **The `Configurator` capability contract.** Every client-specific
//!    chain specification format implements this one trait, so the
//!    detector, the inspector, and the converter never see a concrete
//!    format type.
//!
//! 2. **The canonical model.** `CanonicalSpec` is the pivot every format
//!    can export into and import from. Conversion between any two formats
//!    is snapshot-then-apply through this model.
//!
//! 3. **Name-keyed registries.** Formats and built-in default chains are
//!    held in read-only, `BTreeMap`-backed registries so every
//!    enumeration the user sees is sorted and deterministic.
//!
//! 4. **Trial-based detection.** Unlabeled input is resolved to a single
//!    populated `Configurator` by trying each registered format in sorted
//!    name order.
//!
//! ## Crate Policy
//!
//! - No dependencies on other echainspec crates (this is the leaf).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Anything that reaches user-visible output is explicitly sorted.

pub mod canonical;
pub mod configurator;
pub mod convert;
pub mod detect;
pub mod error;
pub mod feature;
pub mod inspect;
pub mod registry;

// Re-export primary types for ergonomic imports.
pub use canonical::{CanonicalSpec, CliqueParams, DaoFork, Engine, EthashParams, GenesisHeader};
pub use configurator::{Configurator, SpecFormat};
pub use convert::convert;
pub use detect::detect;
pub use error::SpecError;
pub use feature::Feature;
pub use registry::{DefaultRegistry, FormatRegistry};
