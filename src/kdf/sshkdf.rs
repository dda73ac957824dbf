// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! SSH key-derivation (RFC 4253, section 7.2) engine.
//!
//! Derives one of the six transport keys from the shared secret `K`, the
//! exchange hash `H`, and the session identifier:
//!
//! ```text
//! K1     = HASH(K || H || role || session_id)
//! K(n+1) = HASH(K || H || K1 || ... || Kn)
//! ```
//!
//! The shared secret is passed already encoded as an SSH `mpint`, exactly
//! as it entered the exchange-hash computation.

use super::*;

pub(crate) fn new_engine() -> Box<dyn KdfEngine> {
    Box::new(SshkdfEngine::new())
}

/// The six transport keys of RFC 4253, selected by their type letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SshKeyRole {
    /// `A`: initial IV, client to server.
    InitialIvClientToServer,
    /// `B`: initial IV, server to client.
    InitialIvServerToClient,
    /// `C`: encryption key, client to server.
    EncryptionClientToServer,
    /// `D`: encryption key, server to client.
    EncryptionServerToClient,
    /// `E`: integrity key, client to server.
    IntegrityClientToServer,
    /// `F`: integrity key, server to client.
    IntegrityServerToClient,
}

impl SshKeyRole {
    fn from_letter(letter: u8) -> Option<Self> {
        match letter {
            b'A' => Some(Self::InitialIvClientToServer),
            b'B' => Some(Self::InitialIvServerToClient),
            b'C' => Some(Self::EncryptionClientToServer),
            b'D' => Some(Self::EncryptionServerToClient),
            b'E' => Some(Self::IntegrityClientToServer),
            b'F' => Some(Self::IntegrityServerToClient),
            _ => None,
        }
    }

    fn letter(self) -> u8 {
        match self {
            Self::InitialIvClientToServer => b'A',
            Self::InitialIvServerToClient => b'B',
            Self::EncryptionClientToServer => b'C',
            Self::EncryptionServerToClient => b'D',
            Self::IntegrityClientToServer => b'E',
            Self::IntegrityServerToClient => b'F',
        }
    }
}

struct SshkdfEngine {
    digest: Option<HashAlg>,
    shared_secret: Option<SecretBytes>,
    exchange_hash: Vec<u8>,
    session_id: Vec<u8>,
    role: Option<SshKeyRole>,
}

static SETTABLE: &[ParamSchema] = &[
    ParamSchema::new(key::DIGEST, ParamType::Utf8),
    ParamSchema::new(key::KEY, ParamType::OctetString),
    ParamSchema::new(key::XCGHASH, ParamType::OctetString),
    ParamSchema::new(key::SESSION_ID, ParamType::OctetString),
    ParamSchema::new(key::TYPE, ParamType::Utf8),
];

impl SshkdfEngine {
    fn new() -> Self {
        Self {
            digest: None,
            shared_secret: None,
            exchange_hash: Vec::new(),
            session_id: Vec::new(),
            role: None,
        }
    }
}

impl KdfEngine for SshkdfEngine {
    fn settable_params(&self) -> &'static [ParamSchema] {
        SETTABLE
    }

    fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        let mut digest = None;
        let mut shared_secret = None;
        let mut exchange_hash = None;
        let mut session_id = None;
        let mut role = None;
        for param in params {
            match param.key {
                key::DIGEST => digest = Some(parse_digest(&param.value)?),
                key::KEY => {
                    shared_secret = Some(SecretBytes::from_bytes(param.value.as_octets()?));
                }
                key::XCGHASH => exchange_hash = Some(param.value.as_octets()?.to_vec()),
                key::SESSION_ID => session_id = Some(param.value.as_octets()?.to_vec()),
                key::TYPE => {
                    let s = param.value.as_utf8()?;
                    let letter = match s.as_bytes() {
                        [letter] => *letter,
                        _ => return Err(CryptoError::InvalidParameters),
                    };
                    role = Some(
                        SshKeyRole::from_letter(letter).ok_or(CryptoError::InvalidParameters)?,
                    );
                }
                _ => {}
            }
        }
        if let Some(v) = digest {
            self.digest = Some(v);
        }
        if let Some(v) = shared_secret {
            self.shared_secret = Some(v);
        }
        if let Some(v) = exchange_hash {
            self.exchange_hash = v;
        }
        if let Some(v) = session_id {
            self.session_id = v;
        }
        if let Some(v) = role {
            self.role = Some(v);
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
        let shared_secret = self.shared_secret.as_ref().ok_or(CryptoError::ParamMissing)?;
        let role = self.role.ok_or(CryptoError::ParamMissing)?;
        if self.exchange_hash.is_empty() || self.session_id.is_empty() {
            return Err(CryptoError::ParamMissing);
        }
        if out_len == 0 {
            return Err(CryptoError::InvalidLength);
        }
        let mut out = SecretBytes::from_vec(alg.compute(&[
            shared_secret.as_bytes(),
            &self.exchange_hash,
            &[role.letter()],
            &self.session_id,
        ]));
        // Extension rounds hash the whole accumulated output so far.
        while out.len() < out_len {
            let block = alg.compute(&[
                shared_secret.as_bytes(),
                &self.exchange_hash,
                out.as_bytes(),
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
