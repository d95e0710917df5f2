//! Entropy source abstraction for secret generation.
//!
//! Secret generation draws bytes through the [`EntropySource`] trait rather
//! than a process-wide RNG. The hook injects [`SystemEntropy`] in production;
//! tests substitute deterministic or failing sources.
//!
//! A host without a usable secure generator is a recoverable condition, not a
//! crash: the source reports [`EntropyUnavailable`] and the caller decides how
//! to degrade (the flag engine falls back to a visible sentinel and warns).

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;

/// The host has no usable cryptographically secure random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyUnavailable;

impl fmt::Display for EntropyUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no secure random source available on this system")
    }
}

impl std::error::Error for EntropyUnavailable {}

/// A source of cryptographically secure random bytes.
///
/// Implementations must either fill the whole buffer or report
/// [`EntropyUnavailable`]; partial fills are not allowed.
pub trait EntropySource {
    /// Fill `buf` with random bytes.
    fn fill(&mut self, buf: &mut [u8]) -> std::result::Result<(), EntropyUnavailable>;
}

/// Operating-system entropy via [`OsRng`].
///
/// `OsRng` reads from the platform CSPRNG (getrandom / /dev/urandom /
/// BCryptGenRandom). Failure is mapped to [`EntropyUnavailable`] so callers
/// can fall back instead of aborting the whole run.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> std::result::Result<(), EntropyUnavailable> {
        OsRng.try_fill_bytes(buf).map_err(|_| EntropyUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_entropy_fills_buffer() {
        let mut source = SystemEntropy;
        let mut buf = [0u8; 64];
        source.fill(&mut buf).expect("system entropy available");
        // 64 zero bytes from a CSPRNG is a 2^-512 event
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_unavailable_display() {
        assert_eq!(
            EntropyUnavailable.to_string(),
            "no secure random source available on this system"
        );
    }
}
