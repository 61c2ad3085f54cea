//! # Format and Default Registries
//!
//! Name-keyed, read-only lookup tables built once at process start. The
//! format registry maps a format name to its [`SpecFormat`] prototype;
//! the default registry maps a canonical chain name to a constructor
//! producing a freshly populated [`Configurator`].
//!
//! Both are backed by `BTreeMap`, so every enumeration is sorted without
//! an explicit sort at the call site. Defaults are constructors rather
//! than stored instances: each lookup builds a new value, so no
//! invocation can observe state left behind by a previous one.

use std::collections::BTreeMap;

use crate::configurator::{Configurator, SpecFormat};
use crate::error::SpecError;

/// Registry of supported chain specification formats.
#[derive(Default)]
pub struct FormatRegistry {
    formats: BTreeMap<&'static str, Box<dyn SpecFormat>>,
}

impl FormatRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a format prototype under its own name.
    ///
    /// Names must be unique; a later registration with the same name
    /// replaces the earlier one. The built-in registry builders never
    /// register a name twice.
    pub fn register(&mut self, format: Box<dyn SpecFormat>) {
        self.formats.insert(format.name(), format);
    }

    /// Look up a format by name.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnknownFormat`] when no format is registered
    /// under `name`.
    pub fn lookup(&self, name: &str) -> Result<&dyn SpecFormat, SpecError> {
        self.formats
            .get(name)
            .map(|format| format.as_ref())
            .ok_or_else(|| SpecError::UnknownFormat {
                name: name.to_string(),
            })
    }

    /// All registered format names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.formats.keys().copied().collect()
    }

    /// Number of registered formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

/// Constructor for a built-in default chain specification.
pub type DefaultBuilder = fn() -> Box<dyn Configurator>;

/// Registry of built-in default chain specifications.
#[derive(Default)]
pub struct DefaultRegistry {
    defaults: BTreeMap<&'static str, DefaultBuilder>,
}

impl DefaultRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a default chain under a canonical name.
    pub fn register(&mut self, name: &'static str, builder: DefaultBuilder) {
        self.defaults.insert(name, builder);
    }

    /// Build a fresh instance of the named default.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnknownDefault`] when no default is
    /// registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<Box<dyn Configurator>, SpecError> {
        self.defaults
            .get(name)
            .map(|builder| builder())
            .ok_or_else(|| SpecError::UnknownDefault {
                name: name.to_string(),
            })
    }

    /// All registered default names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.defaults.keys().copied().collect()
    }

    /// Number of registered defaults.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalSpec;
    use crate::feature::Feature;

    struct ToySpec(CanonicalSpec);

    impl Configurator for ToySpec {
        fn format(&self) -> &'static str {
            "toy"
        }
        fn chain_name(&self) -> Option<String> {
            self.0.name.clone()
        }
        fn chain_id(&self) -> Option<u64> {
            self.0.chain_id
        }
        fn fork_heights(&self) -> Vec<u64> {
            self.0.fork_heights()
        }
        fn eip_triggers(&self) -> Vec<(Feature, u64)> {
            self.0.activations.iter().map(|(f, h)| (*f, *h)).collect()
        }
        fn snapshot(&self) -> CanonicalSpec {
            self.0.clone()
        }
        fn apply(&mut self, spec: &CanonicalSpec) -> Result<(), SpecError> {
            self.0 = spec.clone();
            Ok(())
        }
        fn to_pretty_json(&self) -> Result<String, SpecError> {
            Ok(serde_json::to_string_pretty(&self.0)?)
        }
    }

    struct ToyFormat(&'static str);

    impl SpecFormat for ToyFormat {
        fn name(&self) -> &'static str {
            self.0
        }
        fn parse(&self, bytes: &[u8]) -> Result<Box<dyn Configurator>, SpecError> {
            let spec: CanonicalSpec =
                serde_json::from_slice(bytes).map_err(|e| SpecError::InvalidInput {
                    format: self.0,
                    reason: e.to_string(),
                })?;
            Ok(Box::new(ToySpec(spec)))
        }
        fn blank(&self) -> Box<dyn Configurator> {
            Box::new(ToySpec(CanonicalSpec::default()))
        }
    }

    #[test]
    fn lookup_unknown_format_fails() {
        let registry = FormatRegistry::new();
        let err = registry.lookup("parity").err().unwrap();
        assert!(matches!(err, SpecError::UnknownFormat { name } if name == "parity"));
    }

    #[test]
    fn names_are_sorted_regardless_of_registration_order() {
        let mut registry = FormatRegistry::new();
        registry.register(Box::new(ToyFormat("parity")));
        registry.register(Box::new(ToyFormat("geth")));
        registry.register(Box::new(ToyFormat("multigeth")));
        assert_eq!(registry.names(), vec!["geth", "multigeth", "parity"]);
    }

    #[test]
    fn default_lookup_builds_a_fresh_instance_each_time() {
        let mut registry = DefaultRegistry::new();
        registry.register("classic", || {
            let mut spec = CanonicalSpec::default();
            spec.chain_id = Some(61);
            Box::new(ToySpec(spec))
        });

        let first = registry.lookup("classic").unwrap();
        let second = registry.lookup("classic").unwrap();
        assert_eq!(first.chain_id(), Some(61));
        assert_eq!(second.chain_id(), Some(61));
        // Distinct heap instances, not a shared global.
        assert_ne!(
            &*first as *const dyn Configurator as *const u8,
            &*second as *const dyn Configurator as *const u8,
        );
    }

    #[test]
    fn default_lookup_unknown_name_fails() {
        let registry = DefaultRegistry::new();
        let err = registry.lookup("not-a-chain").err().unwrap();
        assert!(matches!(err, SpecError::UnknownDefault { name } if name == "not-a-chain"));
    }

    #[test]
    fn empty_registries_report_empty() {
        assert!(FormatRegistry::new().is_empty());
        assert!(DefaultRegistry::new().is_empty());
        assert_eq!(FormatRegistry::new().names(), Vec::<&str>::new());
    }
}
