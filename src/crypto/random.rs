//! Cryptographically secure randomness
//!
//! Thin helpers over the OS RNG for salts, nonces, and uniform integers.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

/// Fill and return `len` random bytes from the OS RNG.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Uniform random integer in `[0, max]` (inclusive).
///
/// Rejection sampling over `u32` avoids modulo bias.
pub fn random_int(max: u32) -> u32 {
    if max == u32::MAX {
        return OsRng.next_u32();
    }
    let range = max + 1;
    // Largest multiple of `range` that fits in a u32
    let zone = u32::MAX - (u32::MAX % range);
    loop {
        let candidate = OsRng.next_u32();
        if candidate < zone {
            return candidate % range;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes_len() {
        assert_eq!(random_bytes(16).len(), 16);
        assert_eq!(random_bytes(0).len(), 0);
    }

    #[test]
    fn test_random_bytes_vary() {
        // 16 random bytes colliding is effectively impossible
        assert_ne!(random_bytes(16), random_bytes(16));
    }

    #[test]
    fn test_random_int_zero_max() {
        for _ in 0..10 {
            assert_eq!(random_int(0), 0);
        }
    }

    #[test]
    fn test_random_int_in_range() {
        for _ in 0..1000 {
            assert!(random_int(3) <= 3);
        }
    }

    #[test]
    fn test_random_int_covers_range() {
        // With 1000 draws over [0,3], every value should appear
        let mut seen = [false; 4];
        for _ in 0..1000 {
            seen[random_int(3) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
