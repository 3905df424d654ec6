// Copyright (c) 2024 Botho Foundation

//! Types shared by the tagging contracts.
//!
//! - [`Address`]: 20-byte account and contract identifiers
//! - [`TagId`]: 32-byte identifiers of tag resources
//! - [`CallContext`]: the caller identity and host entropy attached to a call
//! - [`Event`] and [`Receipt`]: what a successful call emits

mod address;
mod context;
mod event;
mod tag_id;

pub use address::{Address, ADDRESS_LEN};
pub use context::{CallContext, ENTROPY_LEN};
pub use event::{Event, Receipt};
pub use tag_id::{TagId, TAG_ID_LEN};

use displaydoc::Display;

/// Token amounts, in the smallest indivisible unit.
pub type Amount = u64;

/// Errors parsing a hex-encoded identifier
#[derive(Clone, Debug, Display, PartialEq)]
pub enum ParseError {
    /// Invalid hex: {0}
    InvalidHex(hex::FromHexError),
    /// Wrong length: expected {expected} bytes, got {actual}
    InvalidLength { expected: usize, actual: usize },
}

impl std::error::Error for ParseError {}

impl From<hex::FromHexError> for ParseError {
    fn from(src: hex::FromHexError) -> Self {
        Self::InvalidHex(src)
    }
}

/// Decode `0x`-prefixed (or bare) hex into a fixed-size array.
pub(crate) fn decode_fixed<const N: usize>(src: &str) -> Result<[u8; N], ParseError> {
    let digits = src
        .strip_prefix("0x")
        .or_else(|| src.strip_prefix("0X"))
        .unwrap_or(src);
    let bytes = hex::decode(digits)?;
    if bytes.len() != N {
        return Err(ParseError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut arr = [0u8; N];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}

/// Implements hex `Display`/`FromStr` and string-based serde for a
/// fixed-size byte newtype, so it can be used as a JSON map key.
macro_rules! impl_hex_newtype {
    ($name:ident, $len:expr) => {
        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self)
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::ParseError;

            fn from_str(src: &str) -> Result<Self, Self::Err> {
                $crate::decode_fixed::<$len>(src).map(Self)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse::<$name>().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_hex_newtype;
