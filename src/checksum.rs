//! Table-driven checksum used to hash keys.
//!
//! The table (polynomial 0xEDB88320) is built on first use and is
//! read-only for the rest of the process. Hashing starts from 0 and does
//! not invert the result, so values differ from the usual CRC-32.

use std::sync::OnceLock;

static TABLE: OnceLock<[u32; 256]> = OnceLock::new();

fn table() -> &'static [u32; 256] {
    TABLE.get_or_init(|| {
        let mut t = [0u32; 256];
        for (i, slot) in t.iter_mut().enumerate() {
            let mut c = i as u32;
            for _ in 0..8 {
                c = (0xedb8_8320 * (c & 1)) ^ (c >> 1);
            }
            *slot = c;
        }
        t
    })
}

#[inline]
pub fn crc32_add_byte(checksum: u32, b: u8) -> u32 {
    (checksum >> 8) ^ table()[((b as u32 ^ checksum) & 0xff) as usize]
}

pub fn crc32_add_bytes(checksum: u32, bytes: &[u8]) -> u32 {
    let t = table();
    bytes
        .iter()
        .fold(checksum, |c, &b| (c >> 8) ^ t[((b as u32 ^ c) & 0xff) as usize])
}

/// Hash of a byte string, as used by the standard key types.
#[inline]
pub fn string_hash(bytes: &[u8]) -> u32 {
    crc32_add_bytes(0, bytes)
}
