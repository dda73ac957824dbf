// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod conformance_vectors;
mod rfc_test_vectors;

pub(crate) use conformance_vectors::*;
pub(crate) use rfc_test_vectors::*;

/// PBKDF2 test vector structure.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2TestVector {
    pub password: &'static [u8],
    pub salt: &'static [u8],
    pub iterations: u64,
    pub digest: &'static str,
    pub expected: &'static [u8],
}

/// HKDF test vector structure.
#[derive(Debug, Clone, Copy)]
pub struct HkdfTestVector {
    pub ikm: &'static [u8],
    pub salt: &'static [u8],
    pub info: &'static [u8],
    pub digest: &'static str,
    pub prk: &'static [u8],
    pub expected: &'static [u8],
}

/// Single-step KDF test vector structure, covering the hash and keyed
/// auxiliary functions.
#[derive(Debug, Clone, Copy)]
pub struct SskdfTestVector {
    pub mac: Option<&'static str>,
    pub digest: Option<&'static str>,
    pub secret: &'static [u8],
    pub info: &'static [u8],
    pub salt: Option<&'static [u8]>,
    pub mac_size: Option<u64>,
    pub expected: &'static [u8],
}

/// SSH KDF test vector structure.
#[derive(Debug, Clone, Copy)]
pub struct SshkdfTestVector {
    pub digest: &'static str,
    pub shared_secret: &'static [u8],
    pub exchange_hash: &'static [u8],
    pub session_id: &'static [u8],
    pub role: &'static str,
    pub expected: &'static [u8],
}

/// Counter-mode KDF (X9.63) test vector structure.
#[derive(Debug, Clone, Copy)]
pub struct X963TestVector {
    pub digest: &'static str,
    pub secret: &'static [u8],
    pub shared_info: &'static [u8],
    pub expected: &'static [u8],
}

/// X9.42 test vector structure.
#[derive(Debug, Clone, Copy)]
pub struct X942TestVector {
    pub digest: &'static str,
    pub secret: &'static [u8],
    pub cek_alg: &'static str,
    pub expected: &'static [u8],
}

/// scrypt test vector structure.
#[derive(Debug, Clone, Copy)]
pub struct ScryptTestVector {
    pub password: &'static [u8],
    pub salt: &'static [u8],
    pub n: u64,
    pub r: u64,
    pub p: u64,
    pub expected: &'static [u8],
}

/// TLS1-PRF test vector structure.
#[derive(Debug, Clone, Copy)]
pub struct TlsPrfTestVector {
    pub digest: &'static str,
    pub secret: &'static [u8],
    pub seed: &'static [u8],
    pub expected: &'static [u8],
}
