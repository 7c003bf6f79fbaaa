// src/generator.rs
//! Random password generation from a character-class policy
//!
//! Each output character is one independent 32-bit draw reduced modulo the
//! candidate set size. The slight modulo bias is accepted.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore, TryRngCore};
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_PASSWORD_LENGTH, DIGITS, LOOKALIKES, LOWERCASE, MAX_UI_LENGTH, MIN_UI_LENGTH, SYMBOLS,
    UPPERCASE,
};
use crate::error::{CoreError, Result};

/// Character-class policy for [`generate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    /// Drop `i I l 1 L o 0 O` from the candidate set
    pub exclude_lookalikes: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
            exclude_lookalikes: false,
        }
    }
}

impl PasswordOptions {
    /// Set `length`, clamped to the interactive range (8–32).
    pub fn with_clamped_length(mut self, length: usize) -> Self {
        self.length = length.clamp(MIN_UI_LENGTH, MAX_UI_LENGTH);
        self
    }

    /// Candidate characters in canonical order: upper, lower, digits, symbols.
    /// Never empty: falls back to the lowercase alphabet.
    pub fn charset(&self) -> Vec<char> {
        let classes = [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.numbers, DIGITS),
            (self.symbols, SYMBOLS),
        ];

        let charset: Vec<char> = classes
            .iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, class)| class.chars())
            .filter(|c| !(self.exclude_lookalikes && LOOKALIKES.contains(*c)))
            .collect();

        if charset.is_empty() {
            LOWERCASE.chars().collect()
        } else {
            charset
        }
    }
}

/// Generate a password from the operating system's secure random source.
pub fn generate(options: &PasswordOptions) -> Result<String> {
    assemble(options, || {
        OsRng.try_next_u32().map_err(|e| {
            CoreError::KeyUnavailable(format!("secure random source failed: {e}"))
        })
    })
}

/// Generate a password from a caller-supplied CSPRNG.
///
/// Same options and same random stream give the same password.
pub fn generate_with_rng<R: CryptoRng + ?Sized>(
    options: &PasswordOptions,
    rng: &mut R,
) -> Result<String> {
    assemble(options, || Ok(rng.next_u32()))
}

fn assemble<F>(options: &PasswordOptions, mut next_u32: F) -> Result<String>
where
    F: FnMut() -> Result<u32>,
{
    if options.length == 0 {
        return Err(CoreError::InvalidOptions("length must be at least 1"));
    }

    let charset = options.charset();
    (0..options.length)
        .map(|_| next_u32().map(|draw| charset[draw as usize % charset.len()]))
        .collect()
}
