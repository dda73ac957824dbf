// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Message-digest descriptors and the digest construction generator.
//!
//! All digest descriptors are produced by one parameterized constructor,
//! [`make_digest`], which takes a primitive adapter and the algorithm
//! constants and returns a full descriptor whose streaming operations
//! delegate directly to the adapter. Digests accept arbitrary-length input
//! and always succeed barring resource exhaustion.
//!
//! One legacy extension point is supported: a digest may declare exactly
//! one extra settable parameter with strict-mode key checking. The only
//! user is SHA-1's `ssl3-ms` parameter, which injects externally supplied
//! transcript material into the running state for the legacy SSL3
//! master-secret computation (the surrounding protocol shim is external
//! to this crate). All other digests advertise an empty settable schema.

use super::*;

/// Flag: the algorithm's canonical identifier is omitted from composite
/// signature encodings.
pub const DIGEST_FLAG_ALGID_ABSENT: u32 = 0x0001;

/// Static properties and primitive binding of one digest algorithm.
pub struct DigestSpec {
    /// Primitive backing this digest.
    pub alg: HashAlg,
    /// Input block size in bytes.
    pub block_size: usize,
    /// Native output size in bytes.
    pub digest_size: usize,
    /// Algorithm property flags.
    pub flags: u32,
    /// Optional legacy extra-parameter hook.
    pub extra: Option<&'static DigestParamHook>,
}

/// Legacy extra-parameter extension point for a digest.
///
/// At most one hook per digest; the hook owns the digest's settable
/// schema and its unknown-key policy.
pub struct DigestParamHook {
    /// The settable schema this hook accepts.
    pub settable: &'static [ParamSchema],
    /// Strict mode: unknown keys fail the whole call instead of being
    /// ignored.
    pub strict: bool,
    /// Applies one validated parameter to the running state.
    pub apply: fn(&mut HashState, &Param) -> Result<(), CryptoError>,
}

/// Builds a digest descriptor from a primitive adapter and the algorithm
/// constants.
///
/// This replaces per-algorithm constructed variants: every built-in digest
/// is one call to this function with different constants.
#[allow(clippy::too_many_arguments)]
pub fn make_digest(
    name: &'static str,
    id: u32,
    aliases: &'static [&'static str],
    alg: HashAlg,
    block_size: usize,
    digest_size: usize,
    flags: u32,
    extra: Option<&'static DigestParamHook>,
) -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        name,
        id,
        aliases,
        kind: AlgorithmKind::Digest(DigestSpec {
            alg,
            block_size,
            digest_size,
            flags,
            extra,
        }),
    }
}

/// Running digest operation bound to one descriptor.
pub struct DigestContext {
    spec: &'static DigestSpec,
    state: HashState,
}

static DIGEST_GETTABLE: &[ParamSchema] = &[
    ParamSchema::new(key::SIZE, ParamType::Uint),
    ParamSchema::new("blocksize", ParamType::Uint),
];

static EMPTY_SCHEMA: &[ParamSchema] = &[];

impl DigestContext {
    pub(crate) fn new(spec: &'static DigestSpec) -> Self {
        Self {
            spec,
            state: spec.alg.init(),
        }
    }

    /// Streams a chunk of message bytes into the running state.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Finalizes the digest and re-initializes the state for reuse.
    pub fn finish(&mut self) -> Vec<u8> {
        let state = core::mem::replace(&mut self.state, self.spec.alg.init());
        state.finish()
    }

    /// Returns the settable schema: the hook's schema, or empty.
    pub fn settable_params(&self) -> &'static [ParamSchema] {
        match self.spec.extra {
            Some(hook) => hook.settable,
            None => EMPTY_SCHEMA,
        }
    }

    /// Returns the gettable schema (`size`, `blocksize`).
    pub fn gettable_params(&self) -> &'static [ParamSchema] {
        DIGEST_GETTABLE
    }

    /// Applies a parameter batch through the digest's hook.
    ///
    /// Without a hook, unknown keys are ignored by the permissive
    /// convention and the call succeeds without effect. With a strict
    /// hook, any unknown key fails the whole batch; the batch is validated
    /// completely before the first value is applied.
    pub fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        let Some(hook) = self.spec.extra else {
            return Ok(());
        };
        // Validate the whole batch before touching any state.
        for param in params {
            match hook.settable.iter().find(|s| s.key == param.key) {
                Some(schema) => {
                    if param.value.param_type() != schema.ty {
                        return Err(CryptoError::ParamTypeMismatch);
                    }
                }
                None if hook.strict => return Err(CryptoError::ParamUnknownKey),
                None => {}
            }
        }
        for param in params {
            if hook.settable.iter().any(|s| s.key == param.key) {
                (hook.apply)(&mut self.state, param)?;
            }
        }
        Ok(())
    }

    /// Reads one gettable parameter.
    pub fn get_param(&self, param_key: &str) -> Result<ParamValue, CryptoError> {
        match param_key {
            key::SIZE => Ok(ParamValue::Uint(self.spec.digest_size as u64)),
            "blocksize" => Ok(ParamValue::Uint(self.spec.block_size as u64)),
            _ => Err(CryptoError::ParamUnknownKey),
        }
    }

    /// Discards the running state and starts over.
    pub fn reset(&mut self) {
        self.state = self.spec.alg.init();
    }
}

static SHA1_SETTABLE: &[ParamSchema] =
    &[ParamSchema::new(key::SSL3_MS, ParamType::OctetString)];

/// Strict-mode hook injecting SSL3 master-secret transcript material into
/// the running SHA-1 state.
static SHA1_SSL3_HOOK: DigestParamHook = DigestParamHook {
    settable: SHA1_SETTABLE,
    strict: true,
    apply: sha1_inject_transcript,
};

fn sha1_inject_transcript(state: &mut HashState, param: &Param) -> Result<(), CryptoError> {
    let transcript = param.value.as_octets()?;
    state.update(transcript);
    Ok(())
}

/// Registers the built-in SHA family.
pub(crate) fn register_builtin_digests(reg: &mut Registry) -> Result<(), CryptoError> {
    let entries: [(&'static str, u32, &'static [&'static str], HashAlg); 7] = [
        ("sha1", 64, &["sha-1"], HashAlg::Sha1),
        ("sha224", 675, &["sha-224"], HashAlg::Sha224),
        ("sha256", 672, &["sha-256"], HashAlg::Sha256),
        ("sha384", 673, &["sha-384"], HashAlg::Sha384),
        ("sha512", 674, &["sha-512"], HashAlg::Sha512),
        ("sha512-224", 1094, &["sha-512/224"], HashAlg::Sha512_224),
        ("sha512-256", 1095, &["sha-512/256"], HashAlg::Sha512_256),
    ];
    for (name, id, aliases, alg) in entries {
        let extra = if alg == HashAlg::Sha1 {
            Some(&SHA1_SSL3_HOOK)
        } else {
            None
        };
        reg.register(make_digest(
            name,
            id,
            aliases,
            alg,
            alg.block_size(),
            alg.output_size(),
            DIGEST_FLAG_ALGID_ABSENT,
            extra,
        ))?;
    }
    Ok(())
}
