// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! TLS 1.2 pseudorandom function (RFC 5246, section 5) engine.
//!
//! Runs `P_hash` over a single negotiated digest. The label is part of the
//! seed here; callers pass `label || seed` as the seed material, appending
//! fragments across calls.

use super::*;

pub(crate) fn new_engine() -> Box<dyn KdfEngine> {
    Box::new(Tls1PrfEngine::new())
}

struct Tls1PrfEngine {
    digest: Option<HashAlg>,
    secret: Option<SecretBytes>,
    seed: Vec<u8>,
}

static SETTABLE: &[ParamSchema] = &[
    ParamSchema::new(key::DIGEST, ParamType::Utf8),
    ParamSchema::new(key::SECRET, ParamType::OctetString),
    ParamSchema::new(key::SEED, ParamType::OctetString),
];

impl Tls1PrfEngine {
    fn new() -> Self {
        Self {
            digest: None,
            secret: None,
            seed: Vec::new(),
        }
    }
}

impl KdfEngine for Tls1PrfEngine {
    fn settable_params(&self) -> &'static [ParamSchema] {
        SETTABLE
    }

    fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        let mut digest = None;
        let mut secret = None;
        let mut seed_parts: Vec<&[u8]> = Vec::new();
        for param in params {
            match param.key {
                key::DIGEST => digest = Some(parse_digest(&param.value)?),
                key::SECRET => secret = Some(SecretBytes::from_bytes(param.value.as_octets()?)),
                key::SEED => seed_parts.push(param.value.as_octets()?),
                _ => {}
            }
        }
        let appended: usize = seed_parts.iter().map(|p| p.len()).sum();
        if self.seed.len() + appended > MAX_INFO_LEN {
            return Err(CryptoError::ParamSizeMismatch);
        }
        if let Some(v) = digest {
            self.digest = Some(v);
        }
        if let Some(v) = secret {
            self.secret = Some(v);
        }
        for part in seed_parts {
            self.seed.extend_from_slice(part);
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
        let alg = self.digest.ok_or(CryptoError::ParamMissing)?;
        let secret = self.secret.as_ref().ok_or(CryptoError::ParamMissing)?;
        if out_len == 0 {
            return Err(CryptoError::InvalidLength);
        }
        p_hash(alg, secret.as_bytes(), &self.seed, out_len)
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// `P_hash(secret, seed)`: HMAC chaining with `A(i) = HMAC(secret, A(i-1))`,
/// `A(0) = seed`, output blocks `HMAC(secret, A(i) || seed)`.
fn p_hash(
    alg: HashAlg,
    secret: &[u8],
    seed: &[u8],
    out_len: usize,
) -> Result<SecretBytes, CryptoError> {
    let h = alg.output_size();
    let blocks = counter_blocks(out_len, h)?;
    let mut a = SecretBytes::from_vec(hmac(alg, secret, &[seed])?);
    let mut out = SecretBytes::new();
    for _ in 0..blocks {
        let block = hmac(alg, secret, &[a.as_bytes(), seed])?;
        out.extend_from_slice(&block);
        a = SecretBytes::from_vec(hmac(alg, secret, &[a.as_bytes()])?);
    }
    out.truncate(out_len);
    Ok(out)
}
