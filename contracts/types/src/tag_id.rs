// Copyright (c) 2024 Botho Foundation

//! Tag identifiers.

use sha2::{Digest, Sha256};

use crate::{impl_hex_newtype, Address};

/// Length of a tag identifier in bytes.
pub const TAG_ID_LEN: usize = 32;

/// Identifier of a tag resource, rendered as `0x`-prefixed hex.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TagId([u8; TAG_ID_LEN]);

impl TagId {
    /// Create a tag id from raw bytes.
    pub const fn new(bytes: [u8; TAG_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of this tag id.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; TAG_ID_LEN] {
        &self.0
    }

    /// Derive the id of a new tag.
    ///
    /// `sha256(ledger || creator || nonce_le || entropy)`. The ledger nonce
    /// never repeats, which makes ids unique for the lifetime of a ledger;
    /// the host entropy makes them unpredictable.
    pub fn derive(ledger: &Address, creator: &Address, nonce: u64, entropy: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(ledger.as_bytes());
        hasher.update(creator.as_bytes());
        hasher.update(nonce.to_le_bytes());
        hasher.update(entropy);
        Self(hasher.finalize().into())
    }
}

impl_hex_newtype!(TagId, TAG_ID_LEN);
