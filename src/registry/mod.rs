// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Algorithm descriptors and the process-wide registry.
//!
//! An [`AlgorithmDescriptor`] is the uniform wrapper that turns a concrete
//! digest or KDF implementation into a dispatchable unit: identity
//! (canonical name, numeric identifier, aliases) plus a closed
//! [`AlgorithmKind`] carrying the algorithm's static properties and entry
//! points. Descriptors are immutable and live for the life of the process.
//!
//! The registry is populated exactly once, behind a one-time-init barrier,
//! and is read-only afterwards: concurrent lookups from any number of
//! threads are safe without locking.

use once_cell::sync::Lazy;

use super::*;

/// The supported algorithm families.
///
/// The set of families is closed at compile time; open-ended dispatch
/// exists only at the engine boundary inside [`KdfSpec`].
pub enum AlgorithmKind {
    /// A message digest, constructed by the digest generator.
    Digest(DigestSpec),
    /// A key-derivation function with its engine factory.
    Kdf(KdfSpec),
}

/// Factory entry point for one KDF family member.
pub struct KdfSpec {
    /// Creates a fresh engine in its unconfigured state.
    pub new_engine: fn() -> Box<dyn KdfEngine>,
}

/// Immutable metadata and entry points for one registered algorithm.
pub struct AlgorithmDescriptor {
    /// Canonical name, matched case-insensitively.
    pub name: &'static str,
    /// Numeric identifier, unique within the registry.
    pub id: u32,
    /// Alternate names resolving to this descriptor.
    pub aliases: &'static [&'static str],
    /// Algorithm family and entry points.
    pub kind: AlgorithmKind,
}

impl AlgorithmDescriptor {
    /// Returns true if this descriptor is a message digest.
    pub fn is_digest(&self) -> bool {
        matches!(self.kind, AlgorithmKind::Digest(_))
    }

    /// Returns true if this descriptor is a key-derivation function.
    pub fn is_kdf(&self) -> bool {
        matches!(self.kind, AlgorithmKind::Kdf(_))
    }

    fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    fn validate(&self) -> Result<(), CryptoError> {
        if self.name.is_empty() {
            return Err(CryptoError::IncompleteDescriptor);
        }
        if let AlgorithmKind::Digest(spec) = &self.kind {
            if spec.block_size == 0 || spec.digest_size == 0 {
                return Err(CryptoError::IncompleteDescriptor);
            }
        }
        Ok(())
    }
}

/// Name/identifier lookup table of algorithm descriptors.
///
/// Writable only during initialization; the global instance behind
/// [`registry`] is immutable after first use.
pub struct Registry {
    algorithms: Vec<AlgorithmDescriptor>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    /// Registers a descriptor.
    ///
    /// # Errors
    ///
    /// - `CryptoError::IncompleteDescriptor` if the descriptor is
    ///   structurally incomplete (empty name, zero digest sizes)
    /// - `CryptoError::DuplicateAlgorithmName` if the canonical name or an
    ///   alias collides with an already-registered algorithm
    /// - `CryptoError::DuplicateAlgorithmId` if the numeric identifier is
    ///   already taken
    pub fn register(&mut self, descriptor: AlgorithmDescriptor) -> Result<(), CryptoError> {
        descriptor.validate()?;
        for existing in &self.algorithms {
            if existing.id == descriptor.id {
                return Err(CryptoError::DuplicateAlgorithmId);
            }
            if existing.matches_name(descriptor.name)
                || descriptor.aliases.iter().any(|a| existing.matches_name(a))
            {
                return Err(CryptoError::DuplicateAlgorithmName);
            }
        }
        tracing::debug!(name = descriptor.name, id = descriptor.id, "registered algorithm");
        self.algorithms.push(descriptor);
        Ok(())
    }

    /// Resolves a descriptor by canonical name or alias, case-insensitively.
    pub fn resolve(&self, name: &str) -> Option<&AlgorithmDescriptor> {
        self.algorithms.iter().find(|d| d.matches_name(name))
    }

    /// Resolves a descriptor by numeric identifier.
    pub fn resolve_id(&self, id: u32) -> Option<&AlgorithmDescriptor> {
        self.algorithms.iter().find(|d| d.id == id)
    }

    /// Iterates over all registered descriptors.
    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.algorithms.iter()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let mut reg = Registry::new();
    // Built-in registration cannot collide; a failure here is a programming
    // error in the builtin tables.
    digest::register_builtin_digests(&mut reg).expect("builtin digest registration");
    kdf::register_builtin_kdfs(&mut reg).expect("builtin KDF registration");
    tracing::debug!(count = reg.algorithms.len(), "registry initialized");
    reg
});

/// Returns the process-wide registry, initializing it on first use.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Resolves a built-in descriptor by name or alias.
pub fn resolve(name: &str) -> Result<&'static AlgorithmDescriptor, CryptoError> {
    registry().resolve(name).ok_or(CryptoError::UnknownAlgorithm)
}

/// Resolves a built-in descriptor by numeric identifier.
pub fn resolve_id(id: u32) -> Result<&'static AlgorithmDescriptor, CryptoError> {
    registry()
        .resolve_id(id)
        .ok_or(CryptoError::UnknownAlgorithm)
}
