//! Content digest used across the system.
use std::convert::TryFrom;
use std::fmt::Formatter;

use blake2::Blake2b;
use digest::consts::U32;
use digest::Digest;
use rand::{thread_rng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Blake2b256 = Blake2b<U32>;

/// Blake2b-256 digest.
#[repr(transparent)]
#[derive(
    Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize, derive_more::From,
)]
pub struct Blake2bDigest256([u8; 32]);

impl Blake2bDigest256 {
    pub const SIZE: usize = 32;

    pub const fn zero() -> Self {
        Blake2bDigest256([0u8; 32])
    }

    pub fn from_base16(s: &str) -> Result<Self, DigestError> {
        let bytes = base16::decode(s)?;
        <[u8; 32]>::try_from(bytes.as_slice())
            .map(Blake2bDigest256)
            .map_err(|_| DigestError::InvalidSize(bytes.len()))
    }

    pub fn random() -> Self {
        let mut bf = [0u8; 32];
        thread_rng().fill_bytes(&mut bf);
        Blake2bDigest256(bf)
    }
}

impl TryFrom<Vec<u8>> for Blake2bDigest256 {
    type Error = DigestError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let len = value.len();
        <[u8; 32]>::try_from(value.as_slice())
            .map(Blake2bDigest256)
            .map_err(|_| DigestError::InvalidSize(len))
    }
}

impl AsRef<[u8]> for Blake2bDigest256 {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl std::fmt::Debug for Blake2bDigest256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        base16::encode_lower(&self.0).fmt(f)
    }
}

impl std::fmt::Display for Blake2bDigest256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        base16::encode_lower(&self.0).fmt(f)
    }
}

/// Blake2b256 hash (256 bit)
pub fn blake2b256_hash(bytes: &[u8]) -> Blake2bDigest256 {
    let mut hasher = Blake2b256::new();
    hasher.update(bytes);
    Blake2bDigest256(hasher.finalize().into())
}

/// Invalid digest encoding.
#[derive(Error, Debug)]
pub enum DigestError {
    /// error decoding from Base16
    #[error("error decoding from Base16: {0}")]
    Base16DecodingError(#[from] base16::DecodeError),
    /// Invalid byte array size
    #[error("invalid byte array size: {0}")]
    InvalidSize(usize),
}
