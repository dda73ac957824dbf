// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Single-step KDF (NIST SP 800-56C, one-step) engine.
//!
//! Counter-mode derivation over a shared secret `Z` with an auxiliary
//! function selected at configuration time: a bare hash (the default), an
//! HMAC keyed by the salt, or a KMAC keyed by the salt with the
//! customization string `"KDF"`. Each block hashes
//! `counter_be32 || Z || info` (hash mode) or MACs `counter_be32 || Z ||
//! info` (MAC modes).

use super::*;

pub(crate) fn new_engine() -> Box<dyn KdfEngine> {
    Box::new(SskdfEngine::new())
}

const KMAC_CUSTOM: &[u8] = b"KDF";

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuxFunction {
    Hash,
    Hmac,
    Kmac(KmacAlg),
}

struct SskdfEngine {
    aux: AuxFunction,
    digest: Option<HashAlg>,
    secret: Option<SecretBytes>,
    info: Vec<u8>,
    salt: Option<Vec<u8>>,
    mac_size: Option<usize>,
}

static SETTABLE: &[ParamSchema] = &[
    ParamSchema::new(key::DIGEST, ParamType::Utf8),
    ParamSchema::new(key::MAC, ParamType::Utf8),
    ParamSchema::new(key::KEY, ParamType::OctetString),
    ParamSchema::new(key::SECRET, ParamType::OctetString),
    ParamSchema::new(key::SALT, ParamType::OctetString),
    ParamSchema::new(key::INFO, ParamType::OctetString),
    ParamSchema::new(key::MAC_SIZE, ParamType::Uint),
];

impl SskdfEngine {
    fn new() -> Self {
        Self {
            aux: AuxFunction::Hash,
            digest: None,
            secret: None,
            info: Vec::new(),
            salt: None,
            mac_size: None,
        }
    }

    /// MAC key for the keyed modes: the salt, or the mode's default string
    /// of zeros (HMAC: digest block size; KMAC: sponge rate).
    fn mac_key(&self, default_len: usize) -> Vec<u8> {
        match &self.salt {
            Some(salt) => salt.clone(),
            None => vec![0u8; default_len],
        }
    }
}

fn parse_aux(name: &str) -> Result<AuxFunction, CryptoError> {
    match name {
        "HMAC" => Ok(AuxFunction::Hmac),
        "KMAC" | "KMAC128" | "KMAC-128" => Ok(AuxFunction::Kmac(KmacAlg::Kmac128)),
        "KMAC256" | "KMAC-256" => Ok(AuxFunction::Kmac(KmacAlg::Kmac256)),
        _ => Err(CryptoError::InvalidParameters),
    }
}

impl KdfEngine for SskdfEngine {
    fn settable_params(&self) -> &'static [ParamSchema] {
        SETTABLE
    }

    fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        let mut aux = None;
        let mut digest = None;
        let mut secret = None;
        let mut info_parts: Vec<&[u8]> = Vec::new();
        let mut salt = None;
        let mut mac_size = None;
        for param in params {
            match param.key {
                key::MAC => aux = Some(parse_aux(param.value.as_utf8()?)?),
                key::DIGEST => digest = Some(parse_digest(&param.value)?),
                key::KEY | key::SECRET => {
                    secret = Some(SecretBytes::from_bytes(param.value.as_octets()?));
                }
                key::INFO => info_parts.push(param.value.as_octets()?),
                key::SALT => salt = Some(param.value.as_octets()?.to_vec()),
                key::MAC_SIZE => {
                    let size = param.value.as_uint()?;
                    if size == 0 {
                        return Err(CryptoError::InvalidParameters);
                    }
                    mac_size =
                        Some(usize::try_from(size).map_err(|_| CryptoError::InvalidParameters)?);
                }
                _ => {}
            }
        }
        let appended: usize = info_parts.iter().map(|p| p.len()).sum();
        if self.info.len() + appended > MAX_INFO_LEN {
            return Err(CryptoError::ParamSizeMismatch);
        }
        if let Some(v) = aux {
            self.aux = v;
        }
        if let Some(v) = digest {
            self.digest = Some(v);
        }
        if let Some(v) = secret {
            self.secret = Some(v);
        }
        for part in info_parts {
            self.info.extend_from_slice(part);
        }
        if let Some(v) = salt {
            self.salt = Some(v);
        }
        if let Some(v) = mac_size {
            self.mac_size = Some(v);
        }
        Ok(())
    }

    fn get_param(&self, param_key: &str) -> Result<ParamValue, CryptoError> {
        match param_key {
            key::SIZE => {
                let block = match self.aux {
                    AuxFunction::Kmac(_) => match self.mac_size {
                        Some(size) => size as u64,
                        // Unbounded until a MAC size pins the block length.
                        None => return Ok(ParamValue::Uint(u64::MAX)),
                    },
                    _ => {
                        let alg = self.digest.ok_or(CryptoError::ParamMissing)?;
                        alg.output_size() as u64
                    }
                };
                Ok(ParamValue::Uint(u64::from(u32::MAX) * block))
            }
            _ => Err(CryptoError::ParamUnknownKey),
        }
    }

    fn derive(&mut self, out_len: usize) -> Result<SecretBytes, CryptoError> {
        let secret = self.secret.as_ref().ok_or(CryptoError::ParamMissing)?;
        if out_len == 0 {
            return Err(CryptoError::InvalidLength);
        }
        match self.aux {
            AuxFunction::Hash => {
                let alg = self.digest.ok_or(CryptoError::ParamMissing)?;
                let blocks = counter_blocks(out_len, alg.output_size())?;
                let mut out = SecretBytes::new();
                for counter in 1..=blocks {
                    let block = alg.compute(&[
                        &counter.to_be_bytes(),
                        secret.as_bytes(),
                        &self.info,
                    ]);
                    out.extend_from_slice(&block);
                }
                out.truncate(out_len);
                Ok(out)
            }
            AuxFunction::Hmac => {
                let alg = self.digest.ok_or(CryptoError::ParamMissing)?;
                let mac_key = self.mac_key(alg.block_size());
                let blocks = counter_blocks(out_len, alg.output_size())?;
                let mut out = SecretBytes::new();
                for counter in 1..=blocks {
                    let block = hmac(
                        alg,
                        &mac_key,
                        &[&counter.to_be_bytes(), secret.as_bytes(), &self.info],
                    )?;
                    out.extend_from_slice(&block);
                }
                out.truncate(out_len);
                Ok(out)
            }
            AuxFunction::Kmac(kmac) => {
                let mac_key = self.mac_key(kmac.block_size());
                // Default MAC size: produce the whole request in one block.
                let block_len = self.mac_size.unwrap_or(out_len);
                let blocks = counter_blocks(out_len, block_len)?;
                let mut out = SecretBytes::new();
                for counter in 1..=blocks {
                    let block = kmac.compute(
                        &mac_key,
                        KMAC_CUSTOM,
                        &[&counter.to_be_bytes(), secret.as_bytes(), &self.info],
                        block_len,
                    );
                    out.extend_from_slice(&block);
                }
                out.truncate(out_len);
                Ok(out)
            }
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
