// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use cipherstat_fhe::{AlgebraError, AlgebraResult, Cipher, CipherAlgebra, EncBool, SharedAlgebra};
use cipherstat_utils::U256;
use std::sync::atomic::{AtomicBool, Ordering};

/// Algebra that delegates to another one but can be told to fail its comparisons. A comparison
/// is the last adapter call of a submission so an injected fault lands after the sum and count
/// were already computed.
pub struct FaultyAlgebra {
    inner: SharedAlgebra,
    fail_gte: AtomicBool,
}

impl FaultyAlgebra {
    pub fn new(inner: SharedAlgebra) -> Self {
        Self {
            inner,
            fail_gte: AtomicBool::new(false),
        }
    }

    pub fn fail_comparisons(&self, fail: bool) {
        self.fail_gte.store(fail, Ordering::SeqCst);
    }
}

impl CipherAlgebra for FaultyAlgebra {
    fn encode(&self, plain: u64) -> AlgebraResult<Cipher> {
        self.inner.encode(plain)
    }

    fn encode_bool(&self, plain: bool) -> AlgebraResult<EncBool> {
        self.inner.encode_bool(plain)
    }

    fn add(&self, lhs: &Cipher, rhs: &Cipher) -> AlgebraResult<Cipher> {
        self.inner.add(lhs, rhs)
    }

    fn gte(&self, lhs: &Cipher, rhs: &Cipher) -> AlgebraResult<EncBool> {
        if self.fail_gte.load(Ordering::SeqCst) {
            return Err(AlgebraError::Unavailable("injected fault".to_string()));
        }
        self.inner.gte(lhs, rhs)
    }

    fn is_initialized(&self, value: &Cipher) -> bool {
        self.inner.is_initialized(value)
    }

    fn verify(&self, id: U256, cleartexts: &[u8], proof: &[u8]) -> AlgebraResult<bool> {
        self.inner.verify(id, cleartexts, proof)
    }
}
