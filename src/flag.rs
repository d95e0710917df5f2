//! Flag substitution engine.
//!
//! A "flag" is a literal sentinel token embedded in a generated file, e.g.
//! `!!!SET POSTGRES_PASSWORD!!!`. [`set_flag`] replaces every occurrence of
//! the token with either a caller-supplied value or a freshly generated
//! secret, rewrites the file in place, and returns the value actually written
//! so the same secret can be reused in a second file (the generated database
//! user goes into both the local and the production env file).
//!
//! # Failure Policy
//!
//! - File missing or unreadable/unwritable: **FATAL**. The error propagates
//!   and aborts the run. The hook executes once against fully controlled,
//!   just-generated output; there is nothing sensible to recover to.
//! - Secure randomness unavailable: **recovered**. A warning names the token
//!   and the literal token string is written back, leaving a grep-able marker
//!   the user can find and fix manually.

use std::fs;
use std::path::Path;

use crate::entropy::EntropySource;
use crate::error::Result;
use crate::secret::{self, Alphabet, SecretOutcome};

// ============================================================================
// Request types
// ============================================================================

/// Generation parameters used when no explicit value is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorArgs {
    /// Number of characters to draw.
    pub length: usize,
    /// Character classes pooled into the alphabet.
    pub alphabet: Alphabet,
}

impl GeneratorArgs {
    /// Letters+digits policy at the given length (credentials, secret keys).
    pub fn letters_and_digits(length: usize) -> Self {
        Self {
            length,
            alphabet: Alphabet::letters_and_digits(),
        }
    }

    /// Letters-only policy at the given length (user names).
    pub fn letters_only(length: usize) -> Self {
        Self {
            length,
            alphabet: Alphabet::letters_only(),
        }
    }
}

/// Where the replacement value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagValue<'a> {
    /// Use this value verbatim; no generation occurs.
    Explicit(&'a str),
    /// Generate a fresh secret with these parameters.
    Generate(GeneratorArgs),
}

/// One substitution request against one file.
#[derive(Debug, Clone, Copy)]
pub struct FlagRequest<'a> {
    /// The exact literal token to replace (never partially matched).
    pub token: &'a str,
    /// Source of the replacement value.
    pub value: FlagValue<'a>,
    /// Optional single-slot (`{}`) template applied to a *generated* value
    /// before writing, e.g. `"{}/"` for a URL-path-shaped secret. Ignored for
    /// explicit values and for the unavailability fallback.
    pub formatted: Option<&'a str>,
}

impl<'a> FlagRequest<'a> {
    /// Request replacing `token` with an explicit value.
    pub fn with_value(token: &'a str, value: &'a str) -> Self {
        Self {
            token,
            value: FlagValue::Explicit(value),
            formatted: None,
        }
    }

    /// Request replacing `token` with a generated secret.
    pub fn generated(token: &'a str, generator: GeneratorArgs) -> Self {
        Self {
            token,
            value: FlagValue::Generate(generator),
            formatted: None,
        }
    }

    /// Apply a single-slot format template to the generated value.
    pub fn formatted(mut self, template: &'a str) -> Self {
        self.formatted = Some(template);
        self
    }
}

// ============================================================================
// Substitution
// ============================================================================

/// Replace every occurrence of the request's token in the file at `path` and
/// return the value written.
///
/// The file is fully read, mutated in memory, and fully rewritten. There is
/// no partial-write recovery: this runs exactly once against freshly
/// generated template output, never against user data.
pub fn set_flag(
    path: &Path,
    request: &FlagRequest<'_>,
    source: &mut dyn EntropySource,
) -> Result<String> {
    let resolved = resolve_value(request, source)?;

    let contents = fs::read_to_string(path)?;
    let rewritten = contents.replace(request.token, &resolved);
    fs::write(path, rewritten)?;

    log::debug!("set {} in {}", request.token, path.display());
    Ok(resolved)
}

/// Resolve the replacement value without touching the target file.
fn resolve_value(request: &FlagRequest<'_>, source: &mut dyn EntropySource) -> Result<String> {
    let generator = match request.value {
        FlagValue::Explicit(value) => return Ok(value.to_string()),
        FlagValue::Generate(generator) => generator,
    };

    match secret::generate(source, generator.length, generator.alphabet)? {
        SecretOutcome::Generated(secret) => Ok(match request.formatted {
            Some(template) => template.replacen("{}", &secret, 1),
            None => secret,
        }),
        SecretOutcome::Unavailable => {
            let msg = format!(
                "We couldn't find a secure random source on your system. \
                 Please make sure to set {} manually later.",
                request.token
            );
            log::warn!("{}", msg);
            eprintln!("[WARNING] {}", msg);
            // The raw token stays in the file as a visible, grep-able marker
            Ok(request.token.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
