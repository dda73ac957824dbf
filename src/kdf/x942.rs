// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! ANSI X9.42 KDF engine (RFC 2631 profile).
//!
//! Counter-mode derivation for Diffie-Hellman key agreement. Each output
//! block is `HASH(Z || OtherInfo)` where `OtherInfo` is the DER-encoded
//! structure carrying the key-wrap algorithm identifier, the block
//! counter, and the requested key length in bits:
//!
//! ```text
//! SEQUENCE {
//!     SEQUENCE { OID cek-algorithm, OCTET STRING (4) counter_be32 }
//!     [2] { OCTET STRING (4) keybits_be32 }
//! }
//! ```

use super::*;

pub(crate) fn new_engine() -> Box<dyn KdfEngine> {
    Box::new(X942Engine::new())
}

/// Key-wrap algorithms with registered content-encryption-key OIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WrapAlg {
    Cms3DesWrap,
    CmsRc2Wrap,
    Aes128Wrap,
    Aes192Wrap,
    Aes256Wrap,
}

impl WrapAlg {
    fn by_name(name: &str) -> Option<Self> {
        match name {
            "CMS3DESwrap" | "id-smime-alg-CMS3DESwrap" => Some(Self::Cms3DesWrap),
            "CMSRC2wrap" | "id-smime-alg-CMSRC2wrap" => Some(Self::CmsRc2Wrap),
            "AES128-WRAP" | "id-aes128-wrap" => Some(Self::Aes128Wrap),
            "AES192-WRAP" | "id-aes192-wrap" => Some(Self::Aes192Wrap),
            "AES256-WRAP" | "id-aes256-wrap" => Some(Self::Aes256Wrap),
            _ => None,
        }
    }

    /// The algorithm's OID, pre-encoded as a complete DER TLV.
    fn oid_der(self) -> &'static [u8] {
        match self {
            Self::Cms3DesWrap => &[
                0x06, 0x0b, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x10, 0x03, 0x06,
            ],
            Self::CmsRc2Wrap => &[
                0x06, 0x0b, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x10, 0x03, 0x07,
            ],
            Self::Aes128Wrap => &[0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x05],
            Self::Aes192Wrap => &[0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x19],
            Self::Aes256Wrap => &[0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x2d],
        }
    }
}

struct X942Engine {
    digest: Option<HashAlg>,
    secret: Option<SecretBytes>,
    wrap_alg: Option<WrapAlg>,
}

static SETTABLE: &[ParamSchema] = &[
    ParamSchema::new(key::DIGEST, ParamType::Utf8),
    ParamSchema::new(key::KEY, ParamType::OctetString),
    ParamSchema::new(key::SECRET, ParamType::OctetString),
    ParamSchema::new(key::CEK_ALG, ParamType::Utf8),
];

impl X942Engine {
    fn new() -> Self {
        Self {
            digest: None,
            secret: None,
            wrap_alg: None,
        }
    }
}

impl KdfEngine for X942Engine {
    fn settable_params(&self) -> &'static [ParamSchema] {
        SETTABLE
    }

    fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        let mut digest = None;
        let mut secret = None;
        let mut wrap_alg = None;
        for param in params {
            match param.key {
                key::DIGEST => digest = Some(parse_digest(&param.value)?),
                key::KEY | key::SECRET => {
                    secret = Some(SecretBytes::from_bytes(param.value.as_octets()?));
                }
                key::CEK_ALG => {
                    wrap_alg = Some(
                        WrapAlg::by_name(param.value.as_utf8()?)
                            .ok_or(CryptoError::InvalidParameters)?,
                    );
                }
                _ => {}
            }
        }
        if let Some(v) = digest {
            self.digest = Some(v);
        }
        if let Some(v) = secret {
            self.secret = Some(v);
        }
        if let Some(v) = wrap_alg {
            self.wrap_alg = Some(v);
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
        let wrap_alg = self.wrap_alg.ok_or(CryptoError::ParamMissing)?;
        if out_len == 0 {
            return Err(CryptoError::InvalidLength);
        }
        let keybits = u32::try_from(out_len)
            .ok()
            .and_then(|n| n.checked_mul(8))
            .ok_or(CryptoError::InvalidLength)?;
        let blocks = counter_blocks(out_len, alg.output_size())?;
        let mut out = SecretBytes::new();
        for counter in 1..=blocks {
            let other_info = encode_other_info(wrap_alg, counter, keybits)?;
            let block = alg.compute(&[secret.as_bytes(), &other_info]);
            out.extend_from_slice(&block);
        }
        out.truncate(out_len);
        Ok(out)
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Encodes the RFC 2631 `OtherInfo` structure for one counter value.
///
/// All component lengths are small and fixed, so single-byte DER lengths
/// always suffice.
fn encode_other_info(
    wrap_alg: WrapAlg,
    counter: u32,
    keybits: u32,
) -> Result<Vec<u8>, CryptoError> {
    let oid = wrap_alg.oid_der();
    let ka_len = oid.len() + 6;
    let inner_len = ka_len + 2 + 8;
    if inner_len > 0x7f {
        return Err(CryptoError::InvalidParameters);
    }
    let mut out = Vec::with_capacity(inner_len + 2);
    out.push(0x30);
    out.push(inner_len as u8);
    // keyInfo: SEQUENCE { OID, OCTET STRING counter }
    out.push(0x30);
    out.push(ka_len as u8);
    out.extend_from_slice(oid);
    out.push(0x04);
    out.push(0x04);
    out.extend_from_slice(&counter.to_be_bytes());
    // suppPubInfo [2]: OCTET STRING keybits
    out.push(0xa2);
    out.push(0x06);
    out.push(0x04);
    out.push(0x04);
    out.extend_from_slice(&keybits.to_be_bytes());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_info_matches_rfc2631_layout() {
        let encoded = encode_other_info(WrapAlg::Cms3DesWrap, 1, 192).unwrap();
        let expected = [
            0x30, 0x1d, 0x30, 0x13, 0x06, 0x0b, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09,
            0x10, 0x03, 0x06, 0x04, 0x04, 0x00, 0x00, 0x00, 0x01, 0xa2, 0x06, 0x04, 0x04, 0x00,
            0x00, 0x00, 0xc0,
        ];
        assert_eq!(encoded, expected);
    }
}
