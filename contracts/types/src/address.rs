// Copyright (c) 2024 Botho Foundation

//! Account and contract addresses.

use sha2::{Digest, Sha256};

use crate::impl_hex_newtype;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// An account or contract address, rendered as `0x`-prefixed hex.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Create an address from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of this address.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Derive the address of the contract deployed by `deployer` with its
    /// `nonce`-th deployment.
    ///
    /// The address is the last 20 bytes of `sha256(deployer || nonce_le)`.
    pub fn derive_contract(deployer: &Address, nonce: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(deployer.0);
        hasher.update(nonce.to_le_bytes());
        let digest: [u8; 32] = hasher.finalize().into();

        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[32 - ADDRESS_LEN..]);
        Self(bytes)
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl_hex_newtype!(Address, ADDRESS_LEN);
