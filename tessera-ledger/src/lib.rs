use serde::Serialize;

use tessera_crypto::digest::{blake2b256_hash, Blake2bDigest256};

pub mod pointer;
pub mod scan;
pub mod state;
pub mod transaction;

/// Provides digest used across the system for authentication.
pub trait SystemDigest {
    fn digest(&self) -> Blake2bDigest256;
}

/// Marker trait for structs whose hashes can be derived from serialised repr.
/// Public so that externally-authored domain states can opt in.
pub trait DigestViaEncoder: Serialize {}

impl<T: DigestViaEncoder> SystemDigest for T {
    fn digest(&self) -> Blake2bDigest256 {
        let mut encoded = Vec::new();
        ciborium::ser::into_writer(self, &mut encoded).unwrap();
        blake2b256_hash(&encoded)
    }
}
