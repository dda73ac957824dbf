// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! HKDF (RFC 5869) engine.

use super::*;

pub(crate) fn new_engine() -> Box<dyn KdfEngine> {
    Box::new(HkdfEngine::new())
}

/// Which stages of extract-then-expand the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HkdfMode {
    /// Extract a pseudorandom key, then expand it (the default).
    ExtractAndExpand,
    /// Extract only; output is the pseudorandom key itself.
    ExtractOnly,
    /// Expand only; the input key material is used as the pseudorandom key.
    ExpandOnly,
}

impl HkdfMode {
    fn by_name(name: &str) -> Option<Self> {
        match name {
            "EXTRACT_AND_EXPAND" => Some(Self::ExtractAndExpand),
            "EXTRACT_ONLY" => Some(Self::ExtractOnly),
            "EXPAND_ONLY" => Some(Self::ExpandOnly),
            _ => None,
        }
    }
}

struct HkdfEngine {
    digest: Option<HashAlg>,
    key: Option<SecretBytes>,
    salt: Vec<u8>,
    info: Vec<u8>,
    mode: HkdfMode,
}

static SETTABLE: &[ParamSchema] = &[
    ParamSchema::new(key::DIGEST, ParamType::Utf8),
    ParamSchema::new(key::KEY, ParamType::OctetString),
    ParamSchema::new(key::SALT, ParamType::OctetString),
    ParamSchema::new(key::INFO, ParamType::OctetString),
    ParamSchema::new(key::MODE, ParamType::Utf8),
];

impl HkdfEngine {
    fn new() -> Self {
        Self {
            digest: None,
            key: None,
            salt: Vec::new(),
            info: Vec::new(),
            mode: HkdfMode::ExtractAndExpand,
        }
    }
}

impl KdfEngine for HkdfEngine {
    fn settable_params(&self) -> &'static [ParamSchema] {
        SETTABLE
    }

    fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        let mut digest = None;
        let mut ikm = None;
        let mut salt = None;
        let mut info_parts: Vec<&[u8]> = Vec::new();
        let mut mode = None;
        for param in params {
            match param.key {
                key::DIGEST => digest = Some(parse_digest(&param.value)?),
                key::KEY => ikm = Some(SecretBytes::from_bytes(param.value.as_octets()?)),
                key::SALT => salt = Some(param.value.as_octets()?.to_vec()),
                // `info` fragments append; repeats within one batch append
                // in order.
                key::INFO => info_parts.push(param.value.as_octets()?),
                key::MODE => {
                    mode = Some(
                        HkdfMode::by_name(param.value.as_utf8()?)
                            .ok_or(CryptoError::InvalidParameters)?,
                    );
                }
                _ => {}
            }
        }
        let appended: usize = info_parts.iter().map(|p| p.len()).sum();
        if self.info.len() + appended > MAX_INFO_LEN {
            return Err(CryptoError::ParamSizeMismatch);
        }
        if let Some(v) = digest {
            self.digest = Some(v);
        }
        if let Some(v) = ikm {
            self.key = Some(v);
        }
        if let Some(v) = salt {
            self.salt = v;
        }
        for part in info_parts {
            self.info.extend_from_slice(part);
        }
        if let Some(v) = mode {
            self.mode = v;
        }
        Ok(())
    }

    fn get_param(&self, param_key: &str) -> Result<ParamValue, CryptoError> {
        match param_key {
            key::SIZE => {
                let alg = self.digest.ok_or(CryptoError::ParamMissing)?;
                let h = alg.output_size() as u64;
                let max = match self.mode {
                    HkdfMode::ExtractOnly => h,
                    _ => 255 * h,
                };
                Ok(ParamValue::Uint(max))
            }
            _ => Err(CryptoError::ParamUnknownKey),
        }
    }

    fn derive(&mut self, out_len: usize) -> Result<SecretBytes, CryptoError> {
        let alg = self.digest.ok_or(CryptoError::ParamMissing)?;
        let ikm = self.key.as_ref().ok_or(CryptoError::ParamMissing)?;
        let h = alg.output_size();
        if out_len == 0 {
            return Err(CryptoError::InvalidLength);
        }
        match self.mode {
            HkdfMode::ExtractAndExpand => {
                let prk = extract(alg, &self.salt, ikm.as_bytes())?;
                expand(alg, prk.as_bytes(), &self.info, out_len)
            }
            HkdfMode::ExtractOnly => {
                // The pseudorandom key has exactly one valid size.
                if out_len != h {
                    return Err(CryptoError::InvalidLength);
                }
                extract(alg, &self.salt, ikm.as_bytes())
            }
            HkdfMode::ExpandOnly => {
                if ikm.len() < h {
                    return Err(CryptoError::InvalidParameters);
                }
                expand(alg, ikm.as_bytes(), &self.info, out_len)
            }
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

fn extract(alg: HashAlg, salt: &[u8], ikm: &[u8]) -> Result<SecretBytes, CryptoError> {
    // An absent salt defaults to a string of zeros of hash length.
    let zeros;
    let salt = if salt.is_empty() {
        zeros = vec![0u8; alg.output_size()];
        &zeros
    } else {
        salt
    };
    Ok(SecretBytes::from_vec(hmac(alg, salt, &[ikm])?))
}

fn expand(
    alg: HashAlg,
    prk: &[u8],
    info: &[u8],
    out_len: usize,
) -> Result<SecretBytes, CryptoError> {
    let h = alg.output_size();
    if out_len > 255 * h {
        return Err(CryptoError::InvalidLength);
    }
    let blocks = counter_blocks(out_len, h)?;
    let mut out = SecretBytes::new();
    let mut block = SecretBytes::new();
    for i in 1..=blocks as u8 {
        let next = hmac(alg, prk, &[block.as_bytes(), info, &[i]])?;
        block = SecretBytes::from_vec(next);
        out.extend_from_slice(block.as_bytes());
    }
    out.truncate(out_len);
    Ok(out)
}
