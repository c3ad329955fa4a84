//! Party join-code generation.

use rand::Rng;

use crate::constants::{PARTY_CODE_ALPHABET, PARTY_CODE_LENGTH};

/// Source of candidate party codes. Uniqueness is checked by the caller.
pub trait PartyCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform draws from the restricted alphabet (no `I`, `L`, `O`, `0`, `1`)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl PartyCodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..PARTY_CODE_LENGTH)
            .map(|_| char::from(PARTY_CODE_ALPHABET[rng.gen_range(0..PARTY_CODE_ALPHABET.len())]))
            .collect()
    }
}

/// Whether `code` has the shape of a generated party code
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == PARTY_CODE_LENGTH && code.bytes().all(|b| PARTY_CODE_ALPHABET.contains(&b))
}
