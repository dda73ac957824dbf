// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! scrypt (RFC 7914) engine.
//!
//! Memory-hard password-based derivation: an outer PBKDF2 pass (HMAC-SHA256,
//! one iteration) produces `p` blocks of `128 * r` bytes, each block is
//! mixed through `ROMix` with an `N`-entry scratch table, and a final
//! PBKDF2 pass over the mixed blocks produces the output.
//!
//! The scratch table dominates memory use; a configurable ceiling
//! (default 32 MiB) bounds the total allocation before any work begins.

use zeroize::Zeroize;

use super::*;

pub(crate) fn new_engine() -> Box<dyn KdfEngine> {
    Box::new(ScryptEngine::new())
}

const DEFAULT_MAXMEM: u64 = 32 * 1024 * 1024;

struct ScryptEngine {
    password: Option<SecretBytes>,
    salt: Option<Vec<u8>>,
    n: u64,
    r: u64,
    p: u64,
    maxmem: u64,
}

static SETTABLE: &[ParamSchema] = &[
    ParamSchema::new(key::PASSWORD, ParamType::OctetString),
    ParamSchema::new(key::SALT, ParamType::OctetString),
    ParamSchema::new(key::SCRYPT_N, ParamType::Uint),
    ParamSchema::new(key::SCRYPT_R, ParamType::Uint),
    ParamSchema::new(key::SCRYPT_P, ParamType::Uint),
    ParamSchema::new(key::MAXMEM, ParamType::Uint),
];

impl ScryptEngine {
    fn new() -> Self {
        Self {
            password: None,
            salt: None,
            n: 0,
            r: 8,
            p: 1,
            maxmem: DEFAULT_MAXMEM,
        }
    }
}

fn validate_cost(n: u64, r: u64, p: u64) -> Result<(), CryptoError> {
    if n < 2 || !n.is_power_of_two() {
        return Err(CryptoError::InvalidParameters);
    }
    if r == 0 || p == 0 {
        return Err(CryptoError::InvalidParameters);
    }
    // r * p < 2^30 keeps the PBKDF2 output within its counter range.
    if r.checked_mul(p).map_or(true, |rp| rp >= 1 << 30) {
        return Err(CryptoError::InvalidParameters);
    }
    // N < 2^(128 * r / 8) so every scratch index is reachable.
    if 16 * r < 64 && n >= 1u64 << (16 * r) {
        return Err(CryptoError::InvalidParameters);
    }
    Ok(())
}

impl KdfEngine for ScryptEngine {
    fn settable_params(&self) -> &'static [ParamSchema] {
        SETTABLE
    }

    fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        let mut password = None;
        let mut salt = None;
        let mut n = None;
        let mut r = None;
        let mut p = None;
        let mut maxmem = None;
        for param in params {
            match param.key {
                key::PASSWORD => password = Some(SecretBytes::from_bytes(param.value.as_octets()?)),
                key::SALT => salt = Some(param.value.as_octets()?.to_vec()),
                key::SCRYPT_N => n = Some(param.value.as_uint()?),
                key::SCRYPT_R => r = Some(param.value.as_uint()?),
                key::SCRYPT_P => p = Some(param.value.as_uint()?),
                key::MAXMEM => maxmem = Some(param.value.as_uint()?),
                _ => {}
            }
        }
        validate_cost(
            n.unwrap_or(self.n.max(2)),
            r.unwrap_or(self.r),
            p.unwrap_or(self.p),
        )?;
        if let Some(v) = maxmem {
            if v == 0 {
                return Err(CryptoError::InvalidParameters);
            }
            self.maxmem = v;
        }
        if let Some(v) = password {
            self.password = Some(v);
        }
        if let Some(v) = salt {
            self.salt = Some(v);
        }
        if let Some(v) = n {
            self.n = v;
        }
        if let Some(v) = r {
            self.r = v;
        }
        if let Some(v) = p {
            self.p = v;
        }
        Ok(())
    }

    fn get_param(&self, param_key: &str) -> Result<ParamValue, CryptoError> {
        match param_key {
            key::SIZE => Ok(ParamValue::Uint(u64::MAX)),
            _ => Err(CryptoError::ParamUnknownKey),
        }
    }

    fn derive(&mut self, out_len: usize) -> Result<SecretBytes, CryptoError> {
        let password = self.password.as_ref().ok_or(CryptoError::ParamMissing)?;
        let salt = self.salt.as_ref().ok_or(CryptoError::ParamMissing)?;
        if self.n == 0 {
            return Err(CryptoError::ParamMissing);
        }
        validate_cost(self.n, self.r, self.p)?;
        if out_len == 0 {
            return Err(CryptoError::InvalidLength);
        }
        let (n, r, p) = (self.n, self.r, self.p);
        // Scratch table (N blocks) + working blocks (p) + two temporaries.
        let required = 128u64
            .checked_mul(r)
            .and_then(|br| br.checked_mul(n + p + 2))
            .ok_or(CryptoError::ResourceExceeded)?;
        if required > self.maxmem {
            return Err(CryptoError::ResourceExceeded);
        }
        let block_len = 128 * r as usize;
        let mut blocks = pbkdf2_derive(
            HashAlg::Sha256,
            password.as_bytes(),
            salt,
            1,
            p as usize * block_len,
        )?;
        for chunk in blocks.chunks_mut(block_len) {
            romix(chunk, n as usize, r as usize);
        }
        let out = pbkdf2_derive(HashAlg::Sha256, password.as_bytes(), &blocks, 1, out_len)?;
        blocks.zeroize();
        Ok(SecretBytes::from_vec(out))
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// `ROMix` over one `128 * r`-byte block with an `n`-entry scratch table.
fn romix(block: &mut [u8], n: usize, r: usize) {
    let words = block_to_words(block);
    let mut x = words;
    let mut scratch = Vec::with_capacity(n);
    for _ in 0..n {
        scratch.push(x.clone());
        block_mix(&mut x, r);
    }
    for _ in 0..n {
        let j = integerify(&x, r) % n;
        for (xw, sw) in x.iter_mut().zip(&scratch[j]) {
            *xw ^= sw;
        }
        block_mix(&mut x, r);
    }
    words_to_block(&x, block);
    for entry in &mut scratch {
        entry.zeroize();
    }
    x.zeroize();
}

/// `BlockMix_salsa20/8`: shuffles the `2r` 64-byte sub-blocks through the
/// Salsa20/8 core, even outputs first, then odd.
fn block_mix(x: &mut [u32], r: usize) {
    let mut t: [u32; 16] = x[(2 * r - 1) * 16..].try_into().unwrap();
    let mut y = vec![0u32; x.len()];
    for i in 0..2 * r {
        for (tw, xw) in t.iter_mut().zip(&x[i * 16..(i + 1) * 16]) {
            *tw ^= xw;
        }
        salsa20_8(&mut t);
        let dst = if i % 2 == 0 { i / 2 } else { r + i / 2 };
        y[dst * 16..(dst + 1) * 16].copy_from_slice(&t);
    }
    x.copy_from_slice(&y);
    y.zeroize();
    t.zeroize();
}

/// Interprets the last 64-byte sub-block as a little-endian integer.
fn integerify(x: &[u32], r: usize) -> usize {
    x[(2 * r - 1) * 16] as usize
}

fn block_to_words(block: &[u8]) -> Vec<u32> {
    block
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
        .collect()
}

fn words_to_block(words: &[u32], block: &mut [u8]) {
    for (chunk, word) in block.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

/// The Salsa20/8 core permutation (RFC 7914, section 3).
fn salsa20_8(b: &mut [u32; 16]) {
    let input = *b;
    for _ in 0..4 {
        // Column round.
        b[4] ^= b[0].wrapping_add(b[12]).rotate_left(7);
        b[8] ^= b[4].wrapping_add(b[0]).rotate_left(9);
        b[12] ^= b[8].wrapping_add(b[4]).rotate_left(13);
        b[0] ^= b[12].wrapping_add(b[8]).rotate_left(18);
        b[9] ^= b[5].wrapping_add(b[1]).rotate_left(7);
        b[13] ^= b[9].wrapping_add(b[5]).rotate_left(9);
        b[1] ^= b[13].wrapping_add(b[9]).rotate_left(13);
        b[5] ^= b[1].wrapping_add(b[13]).rotate_left(18);
        b[14] ^= b[10].wrapping_add(b[6]).rotate_left(7);
        b[2] ^= b[14].wrapping_add(b[10]).rotate_left(9);
        b[6] ^= b[2].wrapping_add(b[14]).rotate_left(13);
        b[10] ^= b[6].wrapping_add(b[2]).rotate_left(18);
        b[3] ^= b[15].wrapping_add(b[11]).rotate_left(7);
        b[7] ^= b[3].wrapping_add(b[15]).rotate_left(9);
        b[11] ^= b[7].wrapping_add(b[3]).rotate_left(13);
        b[15] ^= b[11].wrapping_add(b[7]).rotate_left(18);
        // Row round.
        b[1] ^= b[0].wrapping_add(b[3]).rotate_left(7);
        b[2] ^= b[1].wrapping_add(b[0]).rotate_left(9);
        b[3] ^= b[2].wrapping_add(b[1]).rotate_left(13);
        b[0] ^= b[3].wrapping_add(b[2]).rotate_left(18);
        b[6] ^= b[5].wrapping_add(b[4]).rotate_left(7);
        b[7] ^= b[6].wrapping_add(b[5]).rotate_left(9);
        b[4] ^= b[7].wrapping_add(b[6]).rotate_left(13);
        b[5] ^= b[4].wrapping_add(b[7]).rotate_left(18);
        b[11] ^= b[10].wrapping_add(b[9]).rotate_left(7);
        b[8] ^= b[11].wrapping_add(b[10]).rotate_left(9);
        b[9] ^= b[8].wrapping_add(b[11]).rotate_left(13);
        b[10] ^= b[9].wrapping_add(b[8]).rotate_left(18);
        b[12] ^= b[15].wrapping_add(b[14]).rotate_left(7);
        b[13] ^= b[12].wrapping_add(b[15]).rotate_left(9);
        b[14] ^= b[13].wrapping_add(b[12]).rotate_left(13);
        b[15] ^= b[14].wrapping_add(b[13]).rotate_left(18);
    }
    for (bw, iw) in b.iter_mut().zip(&input) {
        *bw = bw.wrapping_add(*iw);
    }
}
