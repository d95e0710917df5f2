//! Secret generation over a configurable alphabet.
//!
//! Produces cryptographically strong random strings for the flag substitution
//! engine. The alphabet is assembled from independently togglable character
//! classes; the punctuation class drops `' " \ $` because the output is later
//! embedded in environment-variable files read by a shell.
//!
//! Sampling uses rejection to stay uniform over the pool (no modulo bias),
//! drawing bytes from an injected [`EntropySource`].

use crate::entropy::{EntropySource, EntropyUnavailable};
use crate::error::{HookError, Result};

// ============================================================================
// Alphabet
// ============================================================================

const DIGITS: &str = "0123456789";
const ASCII_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Full ASCII punctuation set, before the shell-unsafe subtraction.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Characters excluded from the punctuation class: they break quoting or
/// trigger expansion when the secret lands in a shell-sourced env file.
pub const UNSAFE_PUNCTUATION: &[char] = &['\'', '"', '\\', '$'];

/// Character classes pooled into the sampling alphabet.
///
/// All-false is a caller error: building the pool succeeds, but sampling a
/// non-zero length from it fails (not pre-validated, matching the contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alphabet {
    pub digits: bool,
    pub letters: bool,
    pub punctuation: bool,
}

impl Alphabet {
    /// Letters and digits, the policy for every generated credential.
    pub fn letters_and_digits() -> Self {
        Self {
            digits: true,
            letters: true,
            punctuation: false,
        }
    }

    /// Letters only, the policy for generated user names.
    pub fn letters_only() -> Self {
        Self {
            digits: false,
            letters: true,
            punctuation: false,
        }
    }

    /// Concatenate the requested classes into the sampling pool.
    pub fn pool(&self) -> Vec<char> {
        let mut pool = Vec::new();
        if self.digits {
            pool.extend(DIGITS.chars());
        }
        if self.letters {
            pool.extend(ASCII_LETTERS.chars());
        }
        if self.punctuation {
            pool.extend(
                PUNCTUATION
                    .chars()
                    .filter(|c| !UNSAFE_PUNCTUATION.contains(c)),
            );
        }
        pool
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Outcome of a generation attempt.
///
/// Unavailability is modeled explicitly instead of reusing a sentinel string,
/// so a generated value that happens to equal a flag token can never be
/// mistaken for the fallback case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretOutcome {
    /// A fresh secret of exactly the requested length.
    Generated(String),
    /// No secure random source on this host; the caller must degrade.
    Unavailable,
}

impl SecretOutcome {
    /// Returns the generated string, if any.
    pub fn generated(self) -> Option<String> {
        match self {
            Self::Generated(s) => Some(s),
            Self::Unavailable => None,
        }
    }
}

/// Generate `length` independent uniformly random characters from the pooled
/// alphabet.
///
/// - `length == 0` returns an empty string without touching the source.
/// - A non-zero length over an empty pool is an error, surfaced when sampling
///   is attempted.
/// - A failing entropy source yields [`SecretOutcome::Unavailable`], not an
///   error: the condition is recoverable at the call site.
pub fn generate(
    source: &mut dyn EntropySource,
    length: usize,
    alphabet: Alphabet,
) -> Result<SecretOutcome> {
    let pool = alphabet.pool();

    let mut out = String::with_capacity(length);
    for _ in 0..length {
        if pool.is_empty() {
            return Err(HookError::secret("cannot sample from an empty alphabet"));
        }
        match sample(source, &pool) {
            Ok(c) => out.push(c),
            Err(EntropyUnavailable) => return Ok(SecretOutcome::Unavailable),
        }
    }

    Ok(SecretOutcome::Generated(out))
}

/// Draw one uniform character from `pool` by rejection sampling.
///
/// Bytes at or above the largest multiple of the pool size are discarded,
/// keeping every character equally likely. The pool never exceeds 90 entries
/// so the rejection rate stays low.
fn sample(
    source: &mut dyn EntropySource,
    pool: &[char],
) -> std::result::Result<char, EntropyUnavailable> {
    let n = pool.len();
    debug_assert!(n > 0 && n <= 256);
    let zone = 256 - (256 % n);

    loop {
        let mut byte = [0u8; 1];
        source.fill(&mut byte)?;
        let v = byte[0] as usize;
        if v < zone {
            return Ok(pool[v % n]);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
