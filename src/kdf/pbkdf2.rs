// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! PBKDF2 (RFC 8018) engine.
//!
//! Iterated-HMAC password-based derivation. Standard mode enforces the
//! minimum-strength policy (salt >= 128 bits, iterations >= 1000, output
//! >= 112 bits); the `pkcs5` compatibility flag relaxes the minimums for
//! interoperability with legacy test vectors. Weak values are rejected
//! both when set and again when deriving, because the flag may change
//! between the two calls.

use zeroize::Zeroize;

use super::*;

const MIN_SALT_LEN: usize = 128 / 8;
const MIN_ITERATIONS: u64 = 1000;
const MIN_KEY_BITS: usize = 112;
const DEFAULT_ITERATIONS: u64 = 2048;

pub(crate) fn new_engine() -> Box<dyn KdfEngine> {
    Box::new(Pbkdf2Engine::new())
}

struct Pbkdf2Engine {
    password: Option<SecretBytes>,
    salt: Option<Vec<u8>>,
    iterations: u64,
    digest: HashAlg,
    compat: bool,
}

static SETTABLE: &[ParamSchema] = &[
    ParamSchema::new(key::PASSWORD, ParamType::OctetString),
    ParamSchema::new(key::SALT, ParamType::OctetString),
    ParamSchema::new(key::ITERATIONS, ParamType::Uint),
    ParamSchema::new(key::DIGEST, ParamType::Utf8),
    ParamSchema::new(key::PKCS5, ParamType::Uint),
];

impl Pbkdf2Engine {
    fn new() -> Self {
        Self {
            password: None,
            salt: None,
            iterations: DEFAULT_ITERATIONS,
            digest: HashAlg::Sha1,
            compat: false,
        }
    }
}

impl KdfEngine for Pbkdf2Engine {
    fn settable_params(&self) -> &'static [ParamSchema] {
        SETTABLE
    }

    fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        let mut password = None;
        let mut salt = None;
        let mut iterations = None;
        let mut digest = None;
        let mut compat = None;
        for param in params {
            match param.key {
                key::PASSWORD => password = Some(SecretBytes::from_bytes(param.value.as_octets()?)),
                key::SALT => salt = Some(param.value.as_octets()?.to_vec()),
                key::ITERATIONS => iterations = Some(param.value.as_uint()?),
                key::DIGEST => digest = Some(parse_digest(&param.value)?),
                key::PKCS5 => compat = Some(param.value.as_uint()? != 0),
                _ => {}
            }
        }
        if let Some(iter) = iterations {
            if iter == 0 {
                return Err(CryptoError::InvalidParameters);
            }
        }
        // Policy checks apply with the flag value this batch establishes.
        let effective_compat = compat.unwrap_or(self.compat);
        if !effective_compat {
            if let Some(salt) = &salt {
                if salt.len() < MIN_SALT_LEN {
                    return Err(CryptoError::WeakParameters);
                }
            }
            if let Some(iter) = iterations {
                if iter < MIN_ITERATIONS {
                    return Err(CryptoError::WeakParameters);
                }
            }
        }
        if let Some(v) = compat {
            self.compat = v;
        }
        if let Some(v) = password {
            self.password = Some(v);
        }
        if let Some(v) = salt {
            self.salt = Some(v);
        }
        if let Some(v) = iterations {
            self.iterations = v;
        }
        if let Some(v) = digest {
            self.digest = v;
        }
        Ok(())
    }

    fn get_param(&self, param_key: &str) -> Result<ParamValue, CryptoError> {
        match param_key {
            key::SIZE => {
                let max = u64::from(u32::MAX) * self.digest.output_size() as u64;
                Ok(ParamValue::Uint(max))
            }
            _ => Err(CryptoError::ParamUnknownKey),
        }
    }

    fn derive(&mut self, out_len: usize) -> Result<SecretBytes, CryptoError> {
        let password = self.password.as_ref().ok_or(CryptoError::ParamMissing)?;
        let salt = self.salt.as_ref().ok_or(CryptoError::ParamMissing)?;
        if out_len == 0 {
            return Err(CryptoError::InvalidLength);
        }
        // Re-validate the stored values: the compatibility flag may have
        // been turned off after a weak salt or count was accepted.
        if !self.compat {
            if salt.len() < MIN_SALT_LEN || self.iterations < MIN_ITERATIONS {
                return Err(CryptoError::WeakParameters);
            }
            if out_len * 8 < MIN_KEY_BITS {
                return Err(CryptoError::InvalidLength);
            }
        }
        let max = u64::from(u32::MAX) as u128 * self.digest.output_size() as u128;
        if out_len as u128 > max {
            return Err(CryptoError::InvalidLength);
        }
        let out = pbkdf2_derive(
            self.digest,
            password.as_bytes(),
            salt,
            self.iterations,
            out_len,
        )?;
        Ok(SecretBytes::from_vec(out))
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Core PBKDF2 loop, shared with the scrypt engine's outer passes.
///
/// Derives `out_len` bytes as the concatenation of XOR-accumulated
/// iterated-HMAC blocks, `T_i = F(password, salt, iterations, i)` with the
/// block index as a 4-byte big-endian suffix of the salt.
pub(crate) fn pbkdf2_derive(
    alg: HashAlg,
    password: &[u8],
    salt: &[u8],
    iterations: u64,
    out_len: usize,
) -> Result<Vec<u8>, CryptoError> {
    let h = alg.output_size();
    let blocks = counter_blocks(out_len, h)?;
    let mut out = Vec::with_capacity(blocks as usize * h);
    for block_index in 1..=blocks {
        let mut round = hmac(alg, password, &[salt, &block_index.to_be_bytes()])?;
        let mut acc = round.clone();
        for _ in 1..iterations {
            let next = hmac(alg, password, &[&round])?;
            round.zeroize();
            round = next;
            for (a, r) in acc.iter_mut().zip(&round) {
                *a ^= r;
            }
        }
        out.extend_from_slice(&acc);
        round.zeroize();
        acc.zeroize();
    }
    out.truncate(out_len);
    Ok(out)
}
