// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Secret-bearing byte buffers.
//!
//! Passwords, keying material, and derived output travel through
//! [`SecretBytes`], an owned buffer that is zeroized on every exit path
//! from its lifetime: drop, reset, and truncation all scrub the memory
//! before release.

use zeroize::Zeroize;

/// An owned byte buffer holding secret material.
///
/// The buffer is scrubbed on drop. Cloning is supported (engines commit
/// staged parameter values by moving, but test comparisons clone); equality
/// is derived and is not constant-time, which is acceptable because the
/// framework never compares secrets on a trust boundary.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretBytes {
    data: Vec<u8>,
}

impl SecretBytes {
    /// Creates an empty secret buffer.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Copies `bytes` into a new secret buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
        }
    }

    /// Wraps an already-owned buffer without copying.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrows the secret material.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Appends `bytes`, growing the buffer.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Scrubs and discards the contents, leaving an empty buffer.
    pub fn clear(&mut self) {
        self.data.zeroize();
        self.data.clear();
    }

    /// Scrubs any tail beyond `len` and truncates to `len`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.data.len() {
            self.data[len..].zeroize();
            self.data.truncate(len);
        }
    }
}

impl Default for SecretBytes {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

impl AsRef<[u8]> for SecretBytes {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl core::fmt::Debug for SecretBytes {
    /// Never prints the secret material, only its length.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SecretBytes({} bytes)", self.data.len())
    }
}
