use zeroize::Zeroize;

use crate::{Digest, Hasher, Md5Error, DIGEST_LEN};

pub const BLOCK_LEN: usize = 64;
const INITIALISATION_CONSTANTS: [u32; 4] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476];
const LENGTH_FIELD_OFFSET: usize = BLOCK_LEN - 8;

const PADDING: [u8; BLOCK_LEN] = {
    let mut padding = [0u8; BLOCK_LEN];
    padding[0] = 0x80;
    padding
};

// Left-rotation amounts, indexed by round then step within the round (mod 4).
const SHIFTS: [[u32; 4]; 4] = [
    [7, 12, 17, 22],
    [5, 9, 14, 20],
    [4, 11, 16, 23],
    [6, 10, 15, 21],
];

// floor(2^32 * |sin(i + 1)|)
const SINES: [u32; 64] = [
    0xD76AA478, 0xE8C7B756, 0x242070DB, 0xC1BDCEEE, 0xF57C0FAF, 0x4787C62A, 0xA8304613, 0xFD469501,
    0x698098D8, 0x8B44F7AF, 0xFFFF5BB1, 0x895CD7BE, 0x6B901122, 0xFD987193, 0xA679438E, 0x49B40821,
    0xF61E2562, 0xC040B340, 0x265E5A51, 0xE9B6C7AA, 0xD62F105D, 0x02441453, 0xD8A1E681, 0xE7D3FBC8,
    0x21E1CDE6, 0xC33707D6, 0xF4D50D87, 0x455A14ED, 0xA9E3E905, 0xFCEFA3F8, 0x676F02D9, 0x8D2A4C8A,
    0xFFFA3942, 0x8771F681, 0x6D9D6122, 0xFDE5380C, 0xA4BEEA44, 0x4BDECFA9, 0xF6BB4B60, 0xBEBFBC70,
    0x289B7EC6, 0xEAA127FA, 0xD4EF3085, 0x04881D05, 0xD9D4D039, 0xE6DB99E5, 0x1FA27CF8, 0xC4AC5665,
    0xF4292244, 0x432AFF97, 0xAB9423A7, 0xFC93A039, 0x655B59C3, 0x8F0CCC92, 0xFFEFF47D, 0x85845DD1,
    0x6FA87E4F, 0xFE2CE6E0, 0xA3014314, 0x4E0811A1, 0xF7537E82, 0xBD3AF235, 0x2AD7D2BB, 0xEB86D391,
];

/// Streaming MD5 hasher (RFC 1321).
///
/// Feed input with [`Md5::update`] in chunks of any size, then call
/// [`Md5::finalize`]. Once finalized the hasher rejects further input with
/// [`Md5Error::Finalized`] and keeps returning the same digest.
///
/// MD5 is broken as a cryptographic hash. Use this for checksums and
/// fingerprints only.
#[derive(Debug, Clone)]
pub struct Md5 {
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    state: [u32; 4],
    bit_count: u64,
    digest: Option<Digest>,
}

impl Md5 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes a complete message in one go.
    pub fn digest_message(message: impl AsRef<[u8]>) -> Result<Digest, Md5Error> {
        let mut hasher = Self::new();
        hasher.update(message)?;
        Ok(hasher.finalize())
    }

    /// Appends `message` to the input stream.
    ///
    /// On error the hasher is left exactly as it was.
    pub fn update(&mut self, message: impl AsRef<[u8]>) -> Result<(), Md5Error> {
        let message = message.as_ref();
        if self.digest.is_some() {
            tracing::debug!(len = message.len(), "rejected update of finalized md5 hasher");
            return Err(Md5Error::Finalized);
        }

        self.bit_count = u64::try_from(message.len())
            .ok()
            .and_then(|len| len.checked_mul(8))
            .and_then(|bits| self.bit_count.checked_add(bits))
            .ok_or(Md5Error::LengthOverflow)?;
        self.absorb(message);
        Ok(())
    }

    /// Pads the message, computes the digest and wipes the working state.
    ///
    /// Repeated calls return the digest computed by the first.
    pub fn finalize(&mut self) -> Digest {
        if let Some(digest) = self.digest {
            return digest;
        }
        tracing::trace!(bits = self.bit_count, "finalizing md5 hasher");

        let length_field = self.bit_count.to_le_bytes();
        self.absorb(&PADDING[..padding_len(self.buffer_len)]);
        self.absorb(&length_field);
        debug_assert_eq!(self.buffer_len, 0);

        let digest = Digest::from(encode_state(&self.state));
        self.buffer.zeroize();
        self.buffer_len.zeroize();
        self.bit_count.zeroize();
        self.state.zeroize();
        self.digest = Some(digest);
        digest
    }

    pub fn digest(&self) -> Option<Digest> {
        self.digest
    }

    pub fn digest_hex(&self) -> Result<String, Md5Error> {
        self.digest
            .map(|digest| digest.to_hex())
            .ok_or(Md5Error::NotFinalized)
    }

    pub fn is_finalized(&self) -> bool {
        self.digest.is_some()
    }

    // Block bookkeeping shared by `update` and the padding in `finalize`.
    // Does not touch `bit_count`.
    fn absorb(&mut self, mut message: &[u8]) {
        if self.buffer_len > 0 {
            let to_copy = (BLOCK_LEN - self.buffer_len).min(message.len());
            self.buffer[self.buffer_len..self.buffer_len + to_copy]
                .copy_from_slice(&message[..to_copy]);
            self.buffer_len += to_copy;
            message = &message[to_copy..];

            if self.buffer_len < BLOCK_LEN {
                return;
            }
            process_block(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        let mut blocks = message.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            process_block(&mut self.state, block);
        }

        let remainder = blocks.remainder();
        self.buffer[..remainder.len()].copy_from_slice(remainder);
        self.buffer_len = remainder.len();
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self {
            buffer: [0u8; BLOCK_LEN],
            buffer_len: 0,
            state: INITIALISATION_CONSTANTS,
            bit_count: 0,
            digest: None,
        }
    }
}

impl Hasher<DIGEST_LEN> for Md5 {
    fn update(&mut self, data: &[u8]) -> Result<(), Md5Error> {
        Md5::update(self, data)
    }

    fn finalize(&mut self) -> [u8; DIGEST_LEN] {
        Md5::finalize(self).into()
    }
}

/// Number of padding bytes (including the leading 0x80) that bring a
/// buffer holding `buffer_len` bytes up to 56 mod 64.
fn padding_len(buffer_len: usize) -> usize {
    if buffer_len < LENGTH_FIELD_OFFSET {
        LENGTH_FIELD_OFFSET - buffer_len
    } else {
        BLOCK_LEN + LENGTH_FIELD_OFFSET - buffer_len
    }
}

fn process_block(state: &mut [u32; 4], block: &[u8]) {
    debug_assert_eq!(block.len(), BLOCK_LEN);
    let mut x = decode_block(block);

    let mut v = *state;
    for round in 0..4 {
        for r in 0..16 {
            // Target register cycles a, d, c, b.
            let t = (16 - r) % 4;
            let (b, c, d) = (v[(t + 1) % 4], v[(t + 2) % 4], v[(t + 3) % 4]);
            let (mixed, k) = match round {
                0 => (f(b, c, d), r),
                1 => (g(b, c, d), (1 + 5 * r) % 16),
                2 => (h(b, c, d), (5 + 3 * r) % 16),
                _ => (i(b, c, d), (7 * r) % 16),
            };
            v[t] = b.wrapping_add(
                v[t].wrapping_add(mixed)
                    .wrapping_add(x[k])
                    .wrapping_add(SINES[16 * round + r])
                    .rotate_left(SHIFTS[round][r % 4]),
            );
        }
    }

    for (word, working) in state.iter_mut().zip(v) {
        *word = word.wrapping_add(working);
    }
    x.zeroize();
    v.zeroize();
}

fn decode_block(block: &[u8]) -> [u32; 16] {
    std::array::from_fn(|i| {
        u32::from_le_bytes([
            block[4 * i],
            block[4 * i + 1],
            block[4 * i + 2],
            block[4 * i + 3],
        ])
    })
}

fn encode_state(state: &[u32; 4]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    for (bytes, word) in out.chunks_exact_mut(4).zip(state) {
        bytes.copy_from_slice(&word.to_le_bytes());
    }
    out
}

fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}
