//! Bearer tokens and their stored digests.

use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of random bytes in a freshly issued token.
const TOKEN_BYTES: usize = 32;

/// Plaintext bearer token presented by clients.
///
/// Only the [`TokenDigest`] is ever persisted; the plaintext value is handed
/// to the user once at registration.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Issues a new random token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wraps a token presented by a client.
    #[must_use]
    pub fn from_presented(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_owned())
    }

    /// Returns the plaintext token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Computes the digest stored for this token.
    #[must_use]
    pub fn digest(&self) -> TokenDigest {
        TokenDigest(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Hex-encoded SHA-256 digest of an [`AuthToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Wraps a digest loaded from storage.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
