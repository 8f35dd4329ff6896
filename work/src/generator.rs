//! Proof search (multi-threaded CPU).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rayon::prelude::*;

use crate::validator::{validate_proof, MAX_DIFFICULTY};
use crate::WorkError;

/// Proofs tried per thread between cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 4096;

/// Searches for proofs at a fixed difficulty.
#[derive(Clone, Copy, Debug)]
pub struct ProofGenerator {
    difficulty: u32,
}

impl ProofGenerator {
    pub fn new(difficulty: u32) -> Result<Self, WorkError> {
        if difficulty > MAX_DIFFICULTY {
            return Err(WorkError::DifficultyOutOfRange {
                difficulty,
                max: MAX_DIFFICULTY,
            });
        }
        Ok(Self { difficulty })
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn is_valid_proof(&self, last_proof: u64, proof: u64) -> bool {
        validate_proof(last_proof, proof, self.difficulty)
    }

    /// Find the smallest proof valid against `last_proof`.
    pub fn mine(&self, last_proof: u64) -> Result<u64, WorkError> {
        self.mine_cancellable(last_proof, &AtomicBool::new(false))
    }

    /// Find the smallest proof valid against `last_proof`, giving up once
    /// `cancel` is set.
    ///
    /// The proof space is striped across all rayon threads. Each thread walks
    /// its stripe in increasing order and stops as soon as it passes the best
    /// proof found so far, so the result is the same proof a sequential scan
    /// from zero would return.
    pub fn mine_cancellable(&self, last_proof: u64, cancel: &AtomicBool) -> Result<u64, WorkError> {
        if self.difficulty == 0 {
            return Ok(0);
        }

        let best = AtomicU64::new(u64::MAX);
        let num_threads = rayon::current_num_threads().max(1);
        let stride = num_threads as u64;

        (0..num_threads).into_par_iter().for_each(|thread_id| {
            let mut proof = thread_id as u64;
            let mut since_check = 0u64;

            while proof < best.load(Ordering::Relaxed) {
                since_check += 1;
                if since_check == CANCEL_CHECK_INTERVAL {
                    if cancel.load(Ordering::Relaxed) {
                        return;
                    }
                    since_check = 0;
                }

                if self.is_valid_proof(last_proof, proof) {
                    best.fetch_min(proof, Ordering::Relaxed);
                    return;
                }

                proof = match proof.checked_add(stride) {
                    Some(next) => next,
                    None => return,
                };
            }
        });

        let result = best.load(Ordering::Relaxed);
        if result != u64::MAX {
            Ok(result)
        } else if cancel.load(Ordering::Relaxed) {
            Err(WorkError::Cancelled)
        } else {
            Err(WorkError::Exhausted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential_search(last_proof: u64, difficulty: u32) -> u64 {
        (0..)
            .find(|&p| validate_proof(last_proof, p, difficulty))
            .unwrap()
    }

    #[test]
    fn mined_proof_is_valid() {
        let generator = ProofGenerator::new(3).unwrap();
        let proof = generator.mine(100).unwrap();
        assert!(generator.is_valid_proof(100, proof));
    }

    #[test]
    fn parallel_search_matches_sequential_scan() {
        let generator = ProofGenerator::new(3).unwrap();
        for last_proof in [0u64, 1, 100, 35_293] {
            assert_eq!(
                generator.mine(last_proof).unwrap(),
                sequential_search(last_proof, 3)
            );
        }
    }

    #[test]
    fn zero_difficulty_returns_zero() {
        let generator = ProofGenerator::new(0).unwrap();
        assert_eq!(generator.mine(u64::MAX).unwrap(), 0);
    }

    #[test]
    fn difficulty_above_digest_width_rejected() {
        assert_eq!(
            ProofGenerator::new(65).unwrap_err(),
            WorkError::DifficultyOutOfRange {
                difficulty: 65,
                max: 64
            }
        );
    }

    #[test]
    fn pre_cancelled_search_gives_up() {
        // 16^20 expected attempts: unreachable without cancellation.
        let generator = ProofGenerator::new(20).unwrap();
        let cancel = AtomicBool::new(true);
        assert_eq!(
            generator.mine_cancellable(7, &cancel),
            Err(WorkError::Cancelled)
        );
    }
}
