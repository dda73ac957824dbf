// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Pluggable message-digest and key-derivation framework.
//!
//! This crate provides a fixed dispatch core that invokes independently
//! implemented digest and KDF algorithms through one uniform contract:
//!
//! - **Registry**: resolves an algorithm name, alias, or numeric identifier
//!   to an immutable [`AlgorithmDescriptor`]
//! - **Parameter protocol**: typed key/value configuration exchanged with a
//!   context, without per-algorithm API surface
//! - **Digests**: SHA-1 and the SHA-2 family, streaming or one-shot
//! - **KDF engines**: PBKDF2, HKDF, single-step KDF (hash/HMAC/KMAC),
//!   SSH-transport KDF, ANSI X9.63, ANSI X9.42, scrypt, TLS1-PRF
//!
//! # Usage
//!
//! A caller resolves a descriptor by name, obtains a [`Context`], configures
//! it through [`Param`] batches, and invokes the algorithm-specific
//! operation (`update`/`finish` for digests, `derive` for KDFs).
//!
//! # Thread Safety
//!
//! The registry is populated once and read-only thereafter; concurrent
//! lookups are safe. Contexts are not thread-safe and must not be shared;
//! create one context per concurrent operation.

mod context;
mod digest;
mod kdf;
mod params;
mod primitive;
mod registry;
mod secret;

pub use context::*;
pub use digest::*;
pub use kdf::*;
pub use params::*;
pub use primitive::*;
pub use registry::*;
pub use secret::*;
use thiserror::Error;

/// Comprehensive error type for all framework operations.
///
/// Every failure is recoverable at the call level: a failed parameter set
/// or derivation leaves the context in its prior configured state, and no
/// output buffer is written on any failure path.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CryptoError {
    // Parameter protocol errors
    /// A parameter key is not recognized by an algorithm in strict mode.
    #[error("parameter key not recognized")]
    ParamUnknownKey,
    /// A parameter value has the wrong type for its key.
    #[error("parameter type mismatch")]
    ParamTypeMismatch,
    /// A parameter value has an unacceptable size.
    #[error("parameter size mismatch")]
    ParamSizeMismatch,
    /// A parameter required by the operation has not been set.
    #[error("required parameter missing")]
    ParamMissing,

    // Derivation policy errors
    /// Salt or iteration count is below the minimum-strength policy.
    #[error("parameters below minimum strength policy")]
    WeakParameters,
    /// Requested output length is outside the algorithm's representable range.
    #[error("invalid output length")]
    InvalidLength,
    /// Structurally invalid composite input (e.g. bad algorithm identifier).
    #[error("invalid parameters")]
    InvalidParameters,
    /// Memory-hard cost parameters exceed the configured memory bound.
    #[error("memory cost exceeds configured bound")]
    ResourceExceeded,

    // Collaborator and resource errors
    /// The underlying hash/MAC primitive rejected its input.
    #[error("primitive operation failed")]
    PrimitiveError,
    /// Resource allocation failed.
    #[error("resource allocation failed")]
    ResourceError,

    // Registry errors
    /// An algorithm with the same canonical name or alias is already registered.
    #[error("algorithm name already registered")]
    DuplicateAlgorithmName,
    /// An algorithm with the same numeric identifier is already registered.
    #[error("algorithm identifier already registered")]
    DuplicateAlgorithmId,
    /// The descriptor is structurally incomplete (empty name, zero sizes).
    #[error("algorithm descriptor incomplete")]
    IncompleteDescriptor,
    /// No registered algorithm matches the given name or identifier.
    #[error("unknown algorithm")]
    UnknownAlgorithm,

    // Dispatch errors
    /// The operation is not supported by this algorithm kind
    /// (e.g. `derive` on a digest context).
    #[error("operation not supported by this algorithm")]
    WrongOperation,
}
