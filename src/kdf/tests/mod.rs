// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::unwrap_used)]

mod testvectors;

mod pbkdf2_tests;
mod sshkdf_tests;
mod x963_tests;

use super::*;
pub(crate) use testvectors::*;

/// Creates a fresh context for a registered KDF.
fn kdf_context(name: &str) -> Context {
    Context::new(resolve(name).unwrap()).unwrap()
}

/// One-shot derivation helper: configure in a single batch, then derive.
fn derive_once(name: &str, params: &[Param], out_len: usize) -> Result<SecretBytes, CryptoError> {
    let mut ctx = kdf_context(name);
    ctx.set_params(params)?;
    ctx.derive(out_len)
}
