// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! ANSI X9.63 KDF engine.
//!
//! Counter-mode derivation for elliptic-curve schemes: each output block
//! is `HASH(Z || counter_be32 || SharedInfo)` with the counter starting
//! at one.

use super::*;

pub(crate) fn new_engine() -> Box<dyn KdfEngine> {
    Box::new(X963Engine::new())
}

struct X963Engine {
    digest: Option<HashAlg>,
    secret: Option<SecretBytes>,
    shared_info: Vec<u8>,
}

static SETTABLE: &[ParamSchema] = &[
    ParamSchema::new(key::DIGEST, ParamType::Utf8),
    ParamSchema::new(key::KEY, ParamType::OctetString),
    ParamSchema::new(key::SECRET, ParamType::OctetString),
    ParamSchema::new(key::INFO, ParamType::OctetString),
];

impl X963Engine {
    fn new() -> Self {
        Self {
            digest: None,
            secret: None,
            shared_info: Vec::new(),
        }
    }
}

impl KdfEngine for X963Engine {
    fn settable_params(&self) -> &'static [ParamSchema] {
        SETTABLE
    }

    fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        let mut digest = None;
        let mut secret = None;
        let mut shared_info = None;
        for param in params {
            match param.key {
                key::DIGEST => digest = Some(parse_digest(&param.value)?),
                key::KEY | key::SECRET => {
                    secret = Some(SecretBytes::from_bytes(param.value.as_octets()?));
                }
                key::INFO => shared_info = Some(param.value.as_octets()?.to_vec()),
                _ => {}
            }
        }
        if let Some(v) = digest {
            self.digest = Some(v);
        }
        if let Some(v) = secret {
            self.secret = Some(v);
        }
        if let Some(v) = shared_info {
            self.shared_info = v;
        }
        Ok(())
    }

    fn get_param(&self, param_key: &str) -> Result<ParamValue, CryptoError> {
        match param_key {
            key::SIZE => {
                let alg = self.digest.ok_or(CryptoError::ParamMissing)?;
                Ok(ParamValue::Uint(
                    u64::from(u32::MAX) * alg.output_size() as u64,
                ))
            }
            _ => Err(CryptoError::ParamUnknownKey),
        }
    }

    fn derive(&mut self, out_len: usize) -> Result<SecretBytes, CryptoError> {
        let alg = self.digest.ok_or(CryptoError::ParamMissing)?;
        let secret = self.secret.as_ref().ok_or(CryptoError::ParamMissing)?;
        if out_len == 0 {
            return Err(CryptoError::InvalidLength);
        }
        let blocks = counter_blocks(out_len, alg.output_size())?;
        let mut out = SecretBytes::new();
        for counter in 1..=blocks {
            let block = alg.compute(&[
                secret.as_bytes(),
                &counter.to_be_bytes(),
                &self.shared_info,
            ]);
            out.extend_from_slice(&block);
        }
        out.truncate(out_len);
        Ok(out)
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
