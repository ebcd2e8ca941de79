//! Streaming MD5 (RFC 1321) for legacy checksums and fingerprints.
//!
//! MD5 is cryptographically broken; nothing here is constant time.

mod digest;
mod error;
mod hash;
mod md5;

#[cfg(test)]
mod proptests;

pub use digest::{Digest, DIGEST_LEN};
pub use error::Md5Error;
pub use hash::Hasher;
pub use self::md5::{Md5, BLOCK_LEN};

/// Returns the lowercase hex MD5 digest of `data`.
///
/// ```
/// assert_eq!(
///     md5sum::md5_hex("abc").unwrap(),
///     "900150983cd24fb0d6963f7d28e17f72"
/// );
/// ```
pub fn md5_hex(data: impl AsRef<[u8]>) -> Result<String, Md5Error> {
    Ok(Md5::digest_message(data)?.to_hex())
}
