// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Operation contexts.
//!
//! A [`Context`] binds one resolved [`AlgorithmDescriptor`] to one running
//! operation and dispatches the uniform surface (parameters, streaming,
//! derivation) to the bound kind. Invoking an operation the bound kind
//! does not support fails with [`CryptoError::WrongOperation`] and leaves
//! the context unchanged.
//!
//! Contexts are retriable: a failed `set_params` or `derive` keeps the
//! accumulated configuration, so the caller can correct the offending
//! value and try again.

use super::*;

enum ContextInner {
    Digest(DigestContext),
    Kdf(Box<dyn KdfEngine>),
}

/// A running digest or derivation operation.
pub struct Context {
    descriptor: &'static AlgorithmDescriptor,
    inner: ContextInner,
}

impl Context {
    /// Creates a fresh context for a resolved descriptor.
    ///
    /// Digest contexts start with an initialized streaming state; KDF
    /// contexts start unconfigured.
    pub fn new(descriptor: &'static AlgorithmDescriptor) -> Result<Self, CryptoError> {
        let inner = match &descriptor.kind {
            AlgorithmKind::Digest(spec) => ContextInner::Digest(DigestContext::new(spec)),
            AlgorithmKind::Kdf(spec) => ContextInner::Kdf((spec.new_engine)()),
        };
        Ok(Self { descriptor, inner })
    }

    /// Returns the descriptor this context is bound to.
    pub fn descriptor(&self) -> &'static AlgorithmDescriptor {
        self.descriptor
    }

    /// Keys and types this context accepts for setting.
    pub fn settable_params(&self) -> &'static [ParamSchema] {
        match &self.inner {
            ContextInner::Digest(d) => d.settable_params(),
            ContextInner::Kdf(e) => e.settable_params(),
        }
    }

    /// Keys and types this context accepts for getting.
    pub fn gettable_params(&self) -> &'static [ParamSchema] {
        match &self.inner {
            ContextInner::Digest(d) => d.gettable_params(),
            ContextInner::Kdf(e) => e.gettable_params(),
        }
    }

    /// Applies a parameter batch, all-or-nothing.
    pub fn set_params(&mut self, params: &[Param]) -> Result<(), CryptoError> {
        match &mut self.inner {
            ContextInner::Digest(d) => d.set_params(params),
            ContextInner::Kdf(e) => e.set_params(params),
        }
    }

    /// Reads one gettable parameter under the current configuration.
    pub fn get_param(&self, param_key: &str) -> Result<ParamValue, CryptoError> {
        match &self.inner {
            ContextInner::Digest(d) => d.get_param(param_key),
            ContextInner::Kdf(e) => e.get_param(param_key),
        }
    }

    /// Streams message bytes into a digest context.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::WrongOperation` on a KDF context.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        match &mut self.inner {
            ContextInner::Digest(d) => {
                d.update(data);
                Ok(())
            }
            ContextInner::Kdf(_) => Err(CryptoError::WrongOperation),
        }
    }

    /// Finalizes a digest context, returning the digest and re-initializing
    /// the state for reuse.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::WrongOperation` on a KDF context.
    pub fn finish(&mut self) -> Result<Vec<u8>, CryptoError> {
        match &mut self.inner {
            ContextInner::Digest(d) => Ok(d.finish()),
            ContextInner::Kdf(_) => Err(CryptoError::WrongOperation),
        }
    }

    /// Runs the derivation on a KDF context, producing exactly `out_len`
    /// bytes.
    ///
    /// The configuration survives both success and failure; repeated
    /// derivations are independent.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::WrongOperation` on a digest context, or the
    /// engine's validation error.
    pub fn derive(&mut self, out_len: usize) -> Result<SecretBytes, CryptoError> {
        match &mut self.inner {
            ContextInner::Digest(_) => Err(CryptoError::WrongOperation),
            ContextInner::Kdf(e) => e.derive(out_len).inspect_err(|err| {
                tracing::debug!(
                    algorithm = self.descriptor.name,
                    error = %err,
                    "derivation failed"
                );
            }),
        }
    }

    /// Discards all accumulated state and configuration, scrubbing secrets.
    pub fn reset(&mut self) {
        match &mut self.inner {
            ContextInner::Digest(d) => d.reset(),
            ContextInner::Kdf(e) => e.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_context_rejects_derive_and_kdf_rejects_streaming() {
        let mut digest = Context::new(resolve("sha256").unwrap()).unwrap();
        assert_eq!(digest.derive(16).unwrap_err(), CryptoError::WrongOperation);
        let mut kdf = Context::new(resolve("HKDF").unwrap()).unwrap();
        assert_eq!(kdf.update(b"x").unwrap_err(), CryptoError::WrongOperation);
        assert_eq!(kdf.finish().unwrap_err(), CryptoError::WrongOperation);
    }

    #[test]
    fn reset_returns_a_kdf_to_unconfigured() {
        let mut ctx = Context::new(resolve("HKDF").unwrap()).unwrap();
        ctx.set_params(&[
            Param::utf8(key::DIGEST, "sha256"),
            Param::octets(key::KEY, &b"secret"[..]),
        ])
        .unwrap();
        ctx.reset();
        assert_eq!(ctx.derive(16).unwrap_err(), CryptoError::ParamMissing);
    }

    #[test]
    fn failed_derive_keeps_the_configuration() {
        let mut ctx = Context::new(resolve("HKDF").unwrap()).unwrap();
        ctx.set_params(&[
            Param::utf8(key::DIGEST, "sha256"),
            Param::octets(key::KEY, &b"secret"[..]),
        ])
        .unwrap();
        // 255 * 32 is the expansion limit for SHA-256.
        assert_eq!(ctx.derive(255 * 32 + 1).unwrap_err(), CryptoError::InvalidLength);
        assert_eq!(ctx.derive(16).unwrap().len(), 16);
    }

    #[test]
    fn descriptor_is_reachable_from_the_context() {
        let ctx = Context::new(resolve("PBKDF2").unwrap()).unwrap();
        assert_eq!(ctx.descriptor().name, "PBKDF2");
    }
}
