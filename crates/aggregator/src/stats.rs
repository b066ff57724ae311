// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use cipherstat_fhe::{AlgebraResult, Cipher, CipherAlgebra, EncBool};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Running encrypted aggregate over every applied submission
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedStats {
    pub sum: Cipher,
    pub count: Cipher,
    /// `sum >= threshold` as of the latest applied submission
    pub threshold_alert: EncBool,
}

impl EncryptedStats {
    /// All three fields hold the sentinel until the first submission is applied
    pub fn uninitialized() -> Self {
        Self {
            sum: Cipher::uninitialized(),
            count: Cipher::uninitialized(),
            threshold_alert: EncBool::uninitialized(),
        }
    }

    pub fn is_initialized(&self, algebra: &dyn CipherAlgebra) -> bool {
        algebra.is_initialized(&self.sum)
    }
}

/// Fold `value` into `stats` and return the new aggregate. Works on copies only so a failing
/// adapter call leaves the caller's state as it was.
pub fn apply_ciphertext(
    algebra: &dyn CipherAlgebra,
    stats: &EncryptedStats,
    value: &Cipher,
    threshold: u64,
) -> AlgebraResult<EncryptedStats> {
    let mut next = *stats;

    if !next.is_initialized(algebra) {
        trace!("initializing encrypted stats");
        next = EncryptedStats {
            sum: algebra.encode(0)?,
            count: algebra.encode(0)?,
            threshold_alert: algebra.encode_bool(false)?,
        };
    }

    next.sum = algebra.add(&next.sum, value)?;
    next.count = algebra.add(&next.count, &algebra.encode(1)?)?;
    next.threshold_alert = algebra.gte(&next.sum, &algebra.encode(threshold)?)?;

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use cipherstat_config::DEFAULT_THRESHOLD;
    use cipherstat_fhe::{AlgebraError, Decryptor, MockCoprocessor};
    use cipherstat_utils::create_shared_rng_from_u64;

    fn coprocessor() -> Result<MockCoprocessor> {
        Ok(MockCoprocessor::new(create_shared_rng_from_u64(1))?)
    }

    fn fold(cop: &MockCoprocessor, values: &[u64]) -> Result<EncryptedStats> {
        let mut stats = EncryptedStats::uninitialized();
        for v in values {
            stats = apply_ciphertext(cop, &stats, &cop.encrypt(*v)?, DEFAULT_THRESHOLD)?;
        }
        Ok(stats)
    }

    #[test]
    fn test_first_application_initializes() -> Result<()> {
        let cop = coprocessor()?;
        let stats = EncryptedStats::uninitialized();
        assert!(!stats.is_initialized(&cop));

        let stats = apply_ciphertext(&cop, &stats, &cop.encrypt(0)?, DEFAULT_THRESHOLD)?;
        assert!(stats.is_initialized(&cop));
        assert_eq!(cop.decrypt(&stats.sum)?, 0);
        assert_eq!(cop.decrypt(&stats.count)?, 1);
        assert!(!cop.decrypt_bool(&stats.threshold_alert)?);
        Ok(())
    }

    #[test]
    fn test_threshold_is_recomputed_each_time() -> Result<()> {
        let cop = coprocessor()?;
        let stats = fold(&cop, &[60, 39])?;
        assert_eq!(cop.decrypt(&stats.sum)?, 99);
        assert!(!cop.decrypt_bool(&stats.threshold_alert)?);

        let stats = apply_ciphertext(&cop, &stats, &cop.encrypt(1)?, DEFAULT_THRESHOLD)?;
        assert_eq!(cop.decrypt(&stats.sum)?, 100);
        assert!(cop.decrypt_bool(&stats.threshold_alert)?);
        Ok(())
    }

    #[test]
    fn test_handles_grow_by_a_fixed_amount_per_application() -> Result<()> {
        let cop = coprocessor()?;
        let value = cop.encrypt(3)?;

        let before = cop.len()?;
        let stats = apply_ciphertext(&cop, &EncryptedStats::uninitialized(), &value, 100)?;
        assert_eq!(cop.len()? - before, 3 + 5);

        let before = cop.len()?;
        let stats = apply_ciphertext(&cop, &stats, &value, 100)?;
        apply_ciphertext(&cop, &stats, &value, 100)?;
        assert_eq!(cop.len()? - before, 2 * 5);
        Ok(())
    }

    #[test]
    fn test_custom_threshold() -> Result<()> {
        let cop = coprocessor()?;
        let stats = apply_ciphertext(
            &cop,
            &EncryptedStats::uninitialized(),
            &cop.encrypt(5)?,
            5,
        )?;
        assert!(cop.decrypt_bool(&stats.threshold_alert)?);
        Ok(())
    }

    #[test]
    fn test_adapter_failure_leaves_input_untouched() -> Result<()> {
        let cop = coprocessor()?;
        let before = fold(&cop, &[10])?;
        let bogus = Cipher::uninitialized();

        let result = apply_ciphertext(&cop, &before, &bogus, DEFAULT_THRESHOLD);
        assert_eq!(result, Err(AlgebraError::Uninitialized));
        assert_eq!(cop.decrypt(&before.sum)?, 10);
        assert_eq!(cop.decrypt(&before.count)?, 1);
        Ok(())
    }
}
