//! Subject and authority key identifiers.

use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::key::{PublicKey, UNCOMPRESSED_POINT_TAG};

/// How a key identifier is derived from a public key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyIdMethod {
    /// SHA-1 over the SEC1 uncompressed point, RFC 5280 section 4.2.1.2 method (1).
    #[default]
    Sha1,
    /// Leftmost 160 bits of SHA-256 over the SEC1 uncompressed point.
    Sha256Truncated,
}

/// 20 byte key identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyId([u8; Self::LEN]);

impl KeyId {
    pub const LEN: usize = 20;

    pub fn from_public_key(public_key: &PublicKey, method: KeyIdMethod) -> Self {
        let mut id = [0u8; Self::LEN];
        match method {
            KeyIdMethod::Sha1 => {
                let digest = Sha1::new()
                    .chain_update([UNCOMPRESSED_POINT_TAG])
                    .chain_update(public_key)
                    .finalize();
                id.copy_from_slice(&digest);
            }
            KeyIdMethod::Sha256Truncated => {
                let digest = Sha256::new()
                    .chain_update([UNCOMPRESSED_POINT_TAG])
                    .chain_update(public_key)
                    .finalize();
                id.copy_from_slice(&digest[..Self::LEN]);
            }
        }
        Self(id)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
