// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key-derivation engines.
//!
//! One state machine per derivation algorithm, each implementing
//! [`KdfEngine`]. Engines move through `New -> Configured -> Derived`:
//! configuration accumulates across repeated `set_params` calls, `derive`
//! validates the full accumulated configuration before producing any
//! output, and a failed validation leaves the engine in its prior
//! configured state so the caller can correct and retry. A successful
//! `derive` does not consume the configuration; further derivations with
//! the same or augmented configuration are independent.
//!
//! All engines use permissive unknown-key handling: keys they do not
//! recognize are silently ignored.

use super::*;

mod hkdf;
mod pbkdf2;
mod scrypt;
mod sshkdf;
mod sskdf;
mod tls1_prf;
mod x942;
mod x963;

pub use hkdf::HkdfMode;
pub use sshkdf::SshKeyRole;

pub(crate) use pbkdf2::pbkdf2_derive;

/// Uniform engine contract consumed by the context manager.
///
/// Engines buffer validated parameter values and commit atomically per
/// `set_params` batch; `derive` writes no output on any failure path.
pub trait KdfEngine: Send {
    /// Keys and types this engine accepts for setting.
    fn settable_params(&self) -> &'static [ParamSchema];

    /// Keys and types this engine accepts for getting.
    fn gettable_params(&self) -> &'static [ParamSchema] {
        KDF_GETTABLE
    }

    /// Applies a parameter batch, all-or-nothing.
    fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError>;

    /// Reads one gettable parameter under the current configuration.
    fn get_param(&self, param_key: &str) -> Result<ParamValue, CryptoError>;

    /// Runs the derivation, producing exactly `out_len` bytes.
    fn derive(&mut self, out_len: usize) -> Result<SecretBytes, CryptoError>;

    /// Discards all configured parameters, scrubbing secrets.
    fn reset(&mut self);
}

/// Gettable schema shared by every engine.
pub(crate) static KDF_GETTABLE: &[ParamSchema] = &[ParamSchema::new(key::SIZE, ParamType::Uint)];

/// Accumulation limit for streamed `info`/`seed` fragments.
pub(crate) const MAX_INFO_LEN: usize = 1024;

/// Resolves a digest-selection parameter value.
pub(crate) fn parse_digest(value: &ParamValue) -> Result<HashAlg, CryptoError> {
    HashAlg::by_name(value.as_utf8()?).ok_or(CryptoError::InvalidParameters)
}

/// Computes the counter-mode block count for `out_len` bytes of `block`-byte
/// output, rejecting counts a 32-bit counter cannot represent.
pub(crate) fn counter_blocks(out_len: usize, block: usize) -> Result<u32, CryptoError> {
    if out_len == 0 || block == 0 {
        return Err(CryptoError::InvalidLength);
    }
    let blocks = (out_len as u64).div_ceil(block as u64);
    u32::try_from(blocks).map_err(|_| CryptoError::InvalidLength)
}

/// Registers the built-in KDF family.
pub(crate) fn register_builtin_kdfs(reg: &mut Registry) -> Result<(), CryptoError> {
    let entries: [(&'static str, u32, &'static [&'static str], fn() -> Box<dyn KdfEngine>); 8] = [
        ("TLS1-PRF", 1021, &[], tls1_prf::new_engine),
        ("HKDF", 1036, &[], hkdf::new_engine),
        ("PBKDF2", 69, &["id-pbkdf2"], pbkdf2::new_engine),
        ("SCRYPT", 973, &["id-scrypt"], scrypt::new_engine),
        ("SSKDF", 1204, &[], sskdf::new_engine),
        ("SSHKDF", 1203, &[], sshkdf::new_engine),
        ("X963KDF", 1206, &["X9.63"], x963::new_engine),
        ("X942KDF", 1207, &["X9.42"], x942::new_engine),
    ];
    for (name, id, aliases, new_engine) in entries {
        reg.register(AlgorithmDescriptor {
            name,
            id,
            aliases,
            kind: AlgorithmKind::Kdf(KdfSpec { new_engine }),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
