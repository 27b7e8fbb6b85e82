//! Content fingerprinting

use md5::{Digest, Md5};

/// MD5 of `bytes`, rendered as lowercase hex
pub fn md5_hex(bytes: &[u8]) -> String {
    hex::encode(Md5::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX_LEN: usize = 32;

    #[test]
    fn test_empty_input() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_known_value() {
        assert_eq!(md5_hex(b"hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_fixed_width_lowercase() {
        let hex = md5_hex(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(hex, "9e107d9d372bb6826bd81d3542a419d6");
        assert_eq!(hex.len(), HEX_LEN);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
