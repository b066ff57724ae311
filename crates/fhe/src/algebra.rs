// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{AlgebraError, Cipher, EncBool};
use cipherstat_utils::U256;
use std::sync::Arc;

pub type AlgebraResult<T> = Result<T, AlgebraError>;

/// Homomorphic operations the aggregation core consumes. Implementations must keep `add`
/// commutative and associative and must never report the sentinel handle as initialized.
pub trait CipherAlgebra: Send + Sync + 'static {
    fn encode(&self, plain: u64) -> AlgebraResult<Cipher>;
    fn encode_bool(&self, plain: bool) -> AlgebraResult<EncBool>;
    fn add(&self, lhs: &Cipher, rhs: &Cipher) -> AlgebraResult<Cipher>;
    fn gte(&self, lhs: &Cipher, rhs: &Cipher) -> AlgebraResult<EncBool>;
    fn is_initialized(&self, value: &Cipher) -> bool;
    /// Check `proof` attests that `cleartexts` is the correct processing result for `id`
    fn verify(&self, id: U256, cleartexts: &[u8], proof: &[u8]) -> AlgebraResult<bool>;
}

/// Decryption is held by key holders, never by the aggregation core.
pub trait Decryptor: Send + Sync + 'static {
    fn decrypt(&self, value: &Cipher) -> AlgebraResult<u64>;
    fn decrypt_bool(&self, value: &EncBool) -> AlgebraResult<bool>;
}

pub type SharedAlgebra = Arc<dyn CipherAlgebra>;
