// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Primitive adapter over externally supplied hash and MAC primitives.
//!
//! This module is a thin interface over the RustCrypto implementations of
//! the SHA family, HMAC, and KMAC. It forwards bytes without validation;
//! failures from the underlying primitive surface as
//! [`CryptoError::PrimitiveError`]. Everything above this module (digest
//! descriptors, KDF engines) consumes primitives exclusively through it.
//!
//! # Supported Primitives
//!
//! - Digests: SHA-1, SHA-224, SHA-256, SHA-384, SHA-512, SHA-512/224,
//!   SHA-512/256
//! - HMAC over any supported digest
//! - KMAC128 / KMAC256 built on cSHAKE with NIST SP 800-185 framing

use hmac::{Mac, SimpleHmac};
use sha1::Sha1;
use sha2::digest::core_api::BlockSizeUser;
use sha2::digest::Digest;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{CShake128, CShake128Core, CShake256, CShake256Core};

use super::*;

/// cSHAKE128 rate in bytes; the PRF input block size of KMAC128.
pub const KMAC128_BLOCK_SIZE: usize = 168;
/// cSHAKE256 rate in bytes; the PRF input block size of KMAC256.
pub const KMAC256_BLOCK_SIZE: usize = 136;

/// Supported fixed-output digest primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlg {
    /// SHA-1 (legacy; kept for compatibility vectors).
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
    /// SHA-512/224.
    Sha512_224,
    /// SHA-512/256.
    Sha512_256,
}

impl HashAlg {
    /// Resolves a digest by name, case-insensitively.
    ///
    /// Accepts the canonical lowercase names (`sha256`) and the dashed
    /// spellings (`sha-256`, `sha512-224`).
    pub fn by_name(name: &str) -> Option<Self> {
        let n = name.to_ascii_lowercase();
        match n.as_str() {
            "sha1" | "sha-1" => Some(HashAlg::Sha1),
            "sha224" | "sha-224" => Some(HashAlg::Sha224),
            "sha256" | "sha-256" => Some(HashAlg::Sha256),
            "sha384" | "sha-384" => Some(HashAlg::Sha384),
            "sha512" | "sha-512" => Some(HashAlg::Sha512),
            "sha512-224" | "sha-512/224" | "sha512/224" => Some(HashAlg::Sha512_224),
            "sha512-256" | "sha-512/256" | "sha512/256" => Some(HashAlg::Sha512_256),
            _ => None,
        }
    }

    /// Returns the input block size in bytes.
    pub fn block_size(self) -> usize {
        match self {
            HashAlg::Sha1 | HashAlg::Sha224 | HashAlg::Sha256 => 64,
            _ => 128,
        }
    }

    /// Returns the digest output size in bytes.
    pub fn output_size(self) -> usize {
        match self {
            HashAlg::Sha1 => 20,
            HashAlg::Sha224 | HashAlg::Sha512_224 => 28,
            HashAlg::Sha256 | HashAlg::Sha512_256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }

    /// Initializes a streaming state for this digest.
    pub fn init(self) -> HashState {
        match self {
            HashAlg::Sha1 => HashState::Sha1(Sha1::new()),
            HashAlg::Sha224 => HashState::Sha224(Sha224::new()),
            HashAlg::Sha256 => HashState::Sha256(Sha256::new()),
            HashAlg::Sha384 => HashState::Sha384(Sha384::new()),
            HashAlg::Sha512 => HashState::Sha512(Sha512::new()),
            HashAlg::Sha512_224 => HashState::Sha512_224(Sha512_224::new()),
            HashAlg::Sha512_256 => HashState::Sha512_256(Sha512_256::new()),
        }
    }

    /// One-shot digest over the concatenation of `parts`.
    pub fn compute(self, parts: &[&[u8]]) -> Vec<u8> {
        let mut state = self.init();
        for part in parts {
            state.update(part);
        }
        state.finish()
    }
}

/// Running compression state of a streaming digest operation.
pub enum HashState {
    /// SHA-1 state.
    Sha1(Sha1),
    /// SHA-224 state.
    Sha224(Sha224),
    /// SHA-256 state.
    Sha256(Sha256),
    /// SHA-384 state.
    Sha384(Sha384),
    /// SHA-512 state.
    Sha512(Sha512),
    /// SHA-512/224 state.
    Sha512_224(Sha512_224),
    /// SHA-512/256 state.
    Sha512_256(Sha512_256),
}

impl HashState {
    /// Absorbs a chunk of input.
    pub fn update(&mut self, data: &[u8]) {
        match self {
            HashState::Sha1(s) => Digest::update(s, data),
            HashState::Sha224(s) => Digest::update(s, data),
            HashState::Sha256(s) => Digest::update(s, data),
            HashState::Sha384(s) => Digest::update(s, data),
            HashState::Sha512(s) => Digest::update(s, data),
            HashState::Sha512_224(s) => Digest::update(s, data),
            HashState::Sha512_256(s) => Digest::update(s, data),
        }
    }

    /// Finalizes the state and returns the digest.
    pub fn finish(self) -> Vec<u8> {
        match self {
            HashState::Sha1(s) => s.finalize().to_vec(),
            HashState::Sha224(s) => s.finalize().to_vec(),
            HashState::Sha256(s) => s.finalize().to_vec(),
            HashState::Sha384(s) => s.finalize().to_vec(),
            HashState::Sha512(s) => s.finalize().to_vec(),
            HashState::Sha512_224(s) => s.finalize().to_vec(),
            HashState::Sha512_256(s) => s.finalize().to_vec(),
        }
    }
}

/// One-shot HMAC over the concatenation of `parts`.
///
/// Keys of any length are accepted per the HMAC specification.
///
/// # Errors
///
/// Returns `CryptoError::PrimitiveError` if the underlying MAC rejects
/// its key.
pub fn hmac(alg: HashAlg, hmac_key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, CryptoError> {
    match alg {
        HashAlg::Sha1 => hmac_one::<Sha1>(hmac_key, parts),
        HashAlg::Sha224 => hmac_one::<Sha224>(hmac_key, parts),
        HashAlg::Sha256 => hmac_one::<Sha256>(hmac_key, parts),
        HashAlg::Sha384 => hmac_one::<Sha384>(hmac_key, parts),
        HashAlg::Sha512 => hmac_one::<Sha512>(hmac_key, parts),
        HashAlg::Sha512_224 => hmac_one::<Sha512_224>(hmac_key, parts),
        HashAlg::Sha512_256 => hmac_one::<Sha512_256>(hmac_key, parts),
    }
}

fn hmac_one<D>(hmac_key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, CryptoError>
where
    D: Digest + BlockSizeUser + Clone,
{
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(hmac_key)
        .map_err(|_| CryptoError::PrimitiveError)?;
    for part in parts {
        Mac::update(&mut mac, part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}

/// KMAC security strength selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KmacAlg {
    /// KMAC128 (cSHAKE128, 168-byte rate).
    Kmac128,
    /// KMAC256 (cSHAKE256, 136-byte rate).
    Kmac256,
}

impl KmacAlg {
    /// Returns the PRF input block size (the cSHAKE rate) in bytes.
    pub fn block_size(self) -> usize {
        match self {
            KmacAlg::Kmac128 => KMAC128_BLOCK_SIZE,
            KmacAlg::Kmac256 => KMAC256_BLOCK_SIZE,
        }
    }

    /// Computes `KMAC(key, parts..., out_len bytes, custom)` per
    /// NIST SP 800-185.
    ///
    /// The input is framed as
    /// `bytepad(encode_string(key), rate) || X || right_encode(out_len * 8)`
    /// and absorbed by cSHAKE with function name `"KMAC"`.
    pub fn compute(
        self,
        mac_key: &[u8],
        custom: &[u8],
        parts: &[&[u8]],
        out_len: usize,
    ) -> Vec<u8> {
        let mut out = vec![0u8; out_len];
        let header = bytepad(&encode_string(mac_key), self.block_size());
        let trailer = right_encode(out_len as u64 * 8);
        match self {
            KmacAlg::Kmac128 => {
                let core = CShake128Core::new_with_function_name(b"KMAC", custom);
                let mut xof = CShake128::from_core(core);
                xof.update(&header);
                for part in parts {
                    xof.update(part);
                }
                xof.update(&trailer);
                xof.finalize_xof().read(&mut out);
            }
            KmacAlg::Kmac256 => {
                let core = CShake256Core::new_with_function_name(b"KMAC", custom);
                let mut xof = CShake256::from_core(core);
                xof.update(&header);
                for part in parts {
                    xof.update(part);
                }
                xof.update(&trailer);
                xof.finalize_xof().read(&mut out);
            }
        }
        out
    }
}

// SP 800-185 string-encoding helpers. Values are limited to u64 here,
// far beyond any input this crate produces.

fn left_encode(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count().min(7);
    let mut out = Vec::with_capacity(9 - skip);
    out.push((8 - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
    out
}

fn right_encode(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count().min(7);
    let mut out = Vec::with_capacity(9 - skip);
    out.extend_from_slice(&bytes[skip..]);
    out.push((8 - skip) as u8);
    out
}

fn encode_string(s: &[u8]) -> Vec<u8> {
    let mut out = left_encode(s.len() as u64 * 8);
    out.extend_from_slice(s);
    out
}

fn bytepad(x: &[u8], w: usize) -> Vec<u8> {
    let mut out = left_encode(w as u64);
    out.extend_from_slice(x);
    let rem = out.len() % w;
    if rem != 0 {
        out.resize(out.len() + (w - rem), 0);
    }
    out
}
