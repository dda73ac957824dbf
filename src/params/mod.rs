// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Typed parameter protocol.
//!
//! Every algorithm context is configured and queried through batches of
//! [`Param`] descriptors instead of per-algorithm methods. A context
//! advertises, as two separate schemas, which keys it accepts for setting
//! and which it accepts for getting.
//!
//! # Atomicity
//!
//! A `set_params` batch is all-or-nothing: engines stage the incoming
//! values locally, validate the whole batch, and only then commit. A type,
//! size, or policy failure anywhere in the batch leaves every previously
//! accepted key unchanged.
//!
//! # Unknown keys
//!
//! By convention unknown keys are silently ignored (forward
//! compatibility). An algorithm may instead declare strict mode for a
//! parameter hook, in which case an unknown key fails the whole call with
//! [`CryptoError::ParamUnknownKey`]. All KDF engines in this crate are
//! permissive; the single strict user is the legacy SHA-1 `ssl3-ms`
//! parameter.

use super::*;

/// Well-known parameter keys.
///
/// These names form the de-facto configuration surface of the built-in
/// algorithms; conformance vectors are driven through them. Each engine
/// documents which keys it accepts.
pub mod key {
    /// Password input (octet string).
    pub const PASSWORD: &str = "pass";
    /// Salt (octet string).
    pub const SALT: &str = "salt";
    /// Iteration count (unsigned).
    pub const ITERATIONS: &str = "iter";
    /// PBKDF2 compatibility flag (unsigned, 0 or 1).
    pub const PKCS5: &str = "pkcs5";
    /// Digest selection by name (UTF-8 string).
    pub const DIGEST: &str = "digest";
    /// Primary secret/keying material (octet string).
    pub const KEY: &str = "key";
    /// Context/info string (octet string, may accumulate across calls).
    pub const INFO: &str = "info";
    /// HKDF phase selection (UTF-8 string).
    pub const MODE: &str = "mode";
    /// MAC selection by name (UTF-8 string).
    pub const MAC: &str = "mac";
    /// Per-block MAC output size for KMAC mixing (unsigned).
    pub const MAC_SIZE: &str = "mac-size";
    /// scrypt CPU/memory cost (unsigned, power of two).
    pub const SCRYPT_N: &str = "n";
    /// scrypt block size (unsigned).
    pub const SCRYPT_R: &str = "r";
    /// scrypt parallelism (unsigned).
    pub const SCRYPT_P: &str = "p";
    /// scrypt working-set bound in bytes (unsigned).
    pub const MAXMEM: &str = "maxmem-bytes";
    /// SSH exchange hash (octet string).
    pub const XCGHASH: &str = "xcghash";
    /// SSH session identifier (octet string).
    pub const SESSION_ID: &str = "session-id";
    /// SSH derived-key role, a single letter `A`-`F` (UTF-8 string).
    pub const TYPE: &str = "type";
    /// X9.42 key-wrap algorithm identifier by name (UTF-8 string).
    pub const CEK_ALG: &str = "cekalg";
    /// TLS PRF secret (octet string).
    pub const SECRET: &str = "secret";
    /// TLS PRF seed fragment (octet string, accumulates across calls).
    pub const SEED: &str = "seed";
    /// Legacy SSL3 master-secret transcript injection (octet string).
    pub const SSL3_MS: &str = "ssl3-ms";
    /// Maximum producible output size under the current configuration
    /// (unsigned, gettable).
    pub const SIZE: &str = "size";
}

/// Type tag of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Arbitrary byte string.
    OctetString,
    /// Unsigned integer.
    Uint,
    /// Signed integer.
    Int,
    /// UTF-8 string.
    Utf8,
    /// Boolean.
    Bool,
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Arbitrary byte string.
    OctetString(Vec<u8>),
    /// Unsigned integer.
    Uint(u64),
    /// Signed integer.
    Int(i64),
    /// UTF-8 string.
    Utf8(String),
    /// Boolean.
    Bool(bool),
}

impl ParamValue {
    /// Returns the type tag of this value.
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::OctetString(_) => ParamType::OctetString,
            ParamValue::Uint(_) => ParamType::Uint,
            ParamValue::Int(_) => ParamType::Int,
            ParamValue::Utf8(_) => ParamType::Utf8,
            ParamValue::Bool(_) => ParamType::Bool,
        }
    }

    /// Borrows the value as an octet string.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::ParamTypeMismatch` for any other value type.
    pub fn as_octets(&self) -> Result<&[u8], CryptoError> {
        match self {
            ParamValue::OctetString(v) => Ok(v),
            _ => Err(CryptoError::ParamTypeMismatch),
        }
    }

    /// Reads the value as an unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::ParamTypeMismatch` for any other value type.
    pub fn as_uint(&self) -> Result<u64, CryptoError> {
        match self {
            ParamValue::Uint(v) => Ok(*v),
            _ => Err(CryptoError::ParamTypeMismatch),
        }
    }

    /// Borrows the value as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::ParamTypeMismatch` for any other value type.
    pub fn as_utf8(&self) -> Result<&str, CryptoError> {
        match self {
            ParamValue::Utf8(v) => Ok(v),
            _ => Err(CryptoError::ParamTypeMismatch),
        }
    }
}

/// One (key, value) pair exchanged with a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter key, one of the [`key`] catalogue entries.
    pub key: &'static str,
    /// Typed value.
    pub value: ParamValue,
}

impl Param {
    /// Convenience constructor for an octet-string parameter.
    pub fn octets(key: &'static str, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key,
            value: ParamValue::OctetString(value.into()),
        }
    }

    /// Convenience constructor for an unsigned-integer parameter.
    pub fn uint(key: &'static str, value: u64) -> Self {
        Self {
            key,
            value: ParamValue::Uint(value),
        }
    }

    /// Convenience constructor for a UTF-8 string parameter.
    pub fn utf8(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: ParamValue::Utf8(value.into()),
        }
    }
}

/// One (key, type) entry of a settable or gettable schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSchema {
    /// Parameter key.
    pub key: &'static str,
    /// Expected value type.
    pub ty: ParamType,
}

impl ParamSchema {
    /// Creates a schema entry.
    pub const fn new(key: &'static str, ty: ParamType) -> Self {
        Self { key, ty }
    }
}
