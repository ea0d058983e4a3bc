//! Short-code generation and collision-resolving allocation.

use crate::constants::{DEFAULT_MAX_ALLOCATION_ATTEMPTS, SHORT_CODE_ALPHABET, SHORT_CODE_LEN};
use crate::db::PasteStorage;
use crate::error::AppError;
use crate::models::paste::{PasteDraft, PasteRecord};
use rand::Rng;
use std::sync::Arc;


/// Source of candidate short codes.
///
/// Generators never consult storage; collisions are detected by the insert.
pub trait CodeGenerator: Send + Sync {
    /// Produce the next candidate.
    fn generate(&self) -> String;
}

/// Uniform random codes over the 62-symbol alphabet.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Generator producing codes of `length` characters.
    pub fn with_length(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::with_length(SHORT_CODE_LEN)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| char::from(SHORT_CODE_ALPHABET[rng.gen_range(0..SHORT_CODE_ALPHABET.len())]))
            .collect()
    }
}

/// Whether `value` has the shape of a generated short code.
pub fn is_short_code(value: &str) -> bool {
    value.len() == SHORT_CODE_LEN && value.bytes().all(|b| SHORT_CODE_ALPHABET.contains(&b))
}

/// Generates candidates and retries inserts until one commits.
#[derive(Clone)]
pub struct ShortCodeAllocator {
    generator: Arc<dyn CodeGenerator>,
    max_attempts: u32,
}

impl Default for ShortCodeAllocator {
    fn default() -> Self {
        Self::new(
            Arc::new(RandomCodeGenerator::default()),
            DEFAULT_MAX_ALLOCATION_ATTEMPTS,
        )
    }
}

impl ShortCodeAllocator {
    /// Build an allocator; `max_attempts` below one is treated as one.
    pub fn new(generator: Arc<dyn CodeGenerator>, max_attempts: u32) -> Self {
        Self {
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Random allocator with a custom attempt cap.
    pub fn random(max_attempts: u32) -> Self {
        Self::new(Arc::new(RandomCodeGenerator::default()), max_attempts)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Persist `draft` under the first candidate that does not collide.
    ///
    /// The record id is fixed on the first attempt and kept across retries;
    /// only the short code changes.
    ///
    /// # Returns
    /// The committed record.
    ///
    /// # Errors
    /// - [`AppError::Conflict`] when every attempt collided.
    /// - [`AppError::Storage`] as soon as storage fails for another reason.
    pub fn allocate(
        &self,
        storage: &dyn PasteStorage,
        draft: PasteDraft,
    ) -> Result<PasteRecord, AppError> {
        let mut record = draft.assign(self.generator.generate());
        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                record.short_code = self.generator.generate();
            }
            if storage.insert_unique(&record)? {
                return Ok(record);
            }
            tracing::warn!(
                attempt,
                max_attempts = self.max_attempts,
                short_code = %record.short_code,
                "Collision occurred while generating short code"
            );
        }
        Err(AppError::Conflict {
            attempts: self.max_attempts,
        })
    }
}
