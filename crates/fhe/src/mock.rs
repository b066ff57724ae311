// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    AlgebraError, AlgebraResult, Cipher, CipherAlgebra, Decryptor, EncBool, Handle, HANDLE_LEN,
};
use cipherstat_utils::{SharedRng, U256};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::trace;

pub const PROOF_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Plain {
    Uint(u64),
    Bool(bool),
}

impl Plain {
    fn kind(&self) -> &'static str {
        match self {
            Plain::Uint(_) => "uint",
            Plain::Bool(_) => "bool",
        }
    }
}

/// Coprocessor running in mock mode. Handles are random identifiers into a private table of
/// cleartexts so every operation yields a fresh, unlinkable handle. Proofs are keyed hashes
/// over the submission id and the claimed cleartexts.
///
/// Nothing is ever removed from the table, since any handle may still be held in a stored
/// ledger record. Memory grows with every operation (five handles per applied submission),
/// so the mock suits tests and replays rather than long running nodes. `len` reports the size.
pub struct MockCoprocessor {
    rng: SharedRng,
    table: Mutex<HashMap<Handle, Plain>>,
    signing_key: [u8; 32],
}

impl MockCoprocessor {
    pub fn new(rng: SharedRng) -> AlgebraResult<Self> {
        let mut signing_key = [0u8; 32];
        rng.lock()
            .map_err(|e| AlgebraError::Unavailable(e.to_string()))?
            .fill_bytes(&mut signing_key);

        Ok(Self {
            rng,
            table: Mutex::new(HashMap::new()),
            signing_key,
        })
    }

    /// Client side encryption. In mock mode this is the same operation as `encode`.
    pub fn encrypt(&self, plain: u64) -> AlgebraResult<Cipher> {
        self.encode(plain)
    }

    /// Produce a proof that `verify` accepts for the given id and cleartexts
    pub fn prove(&self, id: U256, cleartexts: &[u8]) -> Vec<u8> {
        self.digest(id, cleartexts).to_vec()
    }

    /// Number of ciphertexts the coprocessor currently holds
    pub fn len(&self) -> AlgebraResult<usize> {
        Ok(self.table()?.len())
    }

    pub fn is_empty(&self) -> AlgebraResult<bool> {
        Ok(self.len()? == 0)
    }

    fn digest(&self, id: U256, cleartexts: &[u8]) -> [u8; PROOF_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(self.signing_key);
        hasher.update(id.to_be_bytes::<32>());
        hasher.update(cleartexts);
        hasher.finalize().into()
    }

    fn table(&self) -> AlgebraResult<MutexGuard<'_, HashMap<Handle, Plain>>> {
        self.table
            .lock()
            .map_err(|e| AlgebraError::Unavailable(e.to_string()))
    }

    fn store(&self, plain: Plain) -> AlgebraResult<Handle> {
        let mut table = self.table()?;
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AlgebraError::Unavailable(e.to_string()))?;

        loop {
            let mut bytes = [0u8; HANDLE_LEN];
            rng.fill_bytes(&mut bytes);
            let handle = Handle::new(bytes);
            if handle.is_zero() || table.contains_key(&handle) {
                continue;
            }
            trace!(%handle, kind = plain.kind(), "stored ciphertext");
            table.insert(handle, plain);
            return Ok(handle);
        }
    }

    fn load(&self, handle: Handle) -> AlgebraResult<Plain> {
        if handle.is_zero() {
            return Err(AlgebraError::Uninitialized);
        }
        self.table()?
            .get(&handle)
            .copied()
            .ok_or(AlgebraError::UnknownHandle(handle))
    }

    fn load_uint(&self, value: &Cipher) -> AlgebraResult<u64> {
        match self.load(value.handle())? {
            Plain::Uint(v) => Ok(v),
            other => Err(AlgebraError::TypeMismatch {
                handle: value.handle(),
                expected: "uint",
                found: other.kind(),
            }),
        }
    }
}

impl CipherAlgebra for MockCoprocessor {
    fn encode(&self, plain: u64) -> AlgebraResult<Cipher> {
        Ok(Cipher::from_handle(self.store(Plain::Uint(plain))?))
    }

    fn encode_bool(&self, plain: bool) -> AlgebraResult<EncBool> {
        Ok(EncBool::from_handle(self.store(Plain::Bool(plain))?))
    }

    fn add(&self, lhs: &Cipher, rhs: &Cipher) -> AlgebraResult<Cipher> {
        let sum = self.load_uint(lhs)?.wrapping_add(self.load_uint(rhs)?);
        self.encode(sum)
    }

    fn gte(&self, lhs: &Cipher, rhs: &Cipher) -> AlgebraResult<EncBool> {
        let result = self.load_uint(lhs)? >= self.load_uint(rhs)?;
        self.encode_bool(result)
    }

    fn is_initialized(&self, value: &Cipher) -> bool {
        !value.handle().is_zero()
    }

    fn verify(&self, id: U256, cleartexts: &[u8], proof: &[u8]) -> AlgebraResult<bool> {
        if proof.len() != PROOF_LEN {
            return Err(AlgebraError::MalformedProof {
                expected: PROOF_LEN,
                actual: proof.len(),
            });
        }
        Ok(self.digest(id, cleartexts).as_slice() == proof)
    }
}

impl Decryptor for MockCoprocessor {
    fn decrypt(&self, value: &Cipher) -> AlgebraResult<u64> {
        self.load_uint(value)
    }

    fn decrypt_bool(&self, value: &EncBool) -> AlgebraResult<bool> {
        match self.load(value.handle())? {
            Plain::Bool(v) => Ok(v),
            other => Err(AlgebraError::TypeMismatch {
                handle: value.handle(),
                expected: "bool",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use cipherstat_utils::create_shared_rng_from_u64;
    use proptest::prelude::*;

    fn coprocessor() -> MockCoprocessor {
        MockCoprocessor::new(create_shared_rng_from_u64(42)).unwrap()
    }

    #[test]
    fn test_encoded_zero_is_initialized() -> Result<()> {
        let cop = coprocessor();
        let zero = cop.encode(0)?;
        assert!(cop.is_initialized(&zero));
        assert!(!cop.is_initialized(&Cipher::uninitialized()));
        assert_eq!(cop.decrypt(&zero)?, 0);
        Ok(())
    }

    #[test]
    fn test_encoding_is_randomized() -> Result<()> {
        let cop = coprocessor();
        let a = cop.encode(7)?;
        let b = cop.encode(7)?;
        assert_ne!(a, b);
        assert_eq!(cop.decrypt(&a)?, cop.decrypt(&b)?);
        Ok(())
    }

    #[test]
    fn test_add_and_gte() -> Result<()> {
        let cop = coprocessor();
        let sum = cop.add(&cop.encode(60)?, &cop.encode(40)?)?;
        assert_eq!(cop.decrypt(&sum)?, 100);
        assert!(cop.decrypt_bool(&cop.gte(&sum, &cop.encode(100)?)?)?);
        assert!(!cop.decrypt_bool(&cop.gte(&sum, &cop.encode(101)?)?)?);
        Ok(())
    }

    #[test]
    fn test_operations_on_sentinel_fail() -> Result<()> {
        let cop = coprocessor();
        let one = cop.encode(1)?;
        assert_eq!(
            cop.add(&Cipher::uninitialized(), &one),
            Err(AlgebraError::Uninitialized)
        );
        Ok(())
    }

    #[test]
    fn test_unknown_handle_fails() -> Result<()> {
        let cop = coprocessor();
        let stranger = Cipher::from_handle(Handle::new([9u8; HANDLE_LEN]));
        let one = cop.encode(1)?;
        assert!(matches!(
            cop.add(&one, &stranger),
            Err(AlgebraError::UnknownHandle(_))
        ));
        Ok(())
    }

    #[test]
    fn test_bool_handle_is_not_an_integer() -> Result<()> {
        let cop = coprocessor();
        let flag = cop.encode_bool(true)?;
        let as_uint = Cipher::from_handle(flag.handle());
        assert!(matches!(
            cop.decrypt(&as_uint),
            Err(AlgebraError::TypeMismatch { expected: "uint", found: "bool", .. })
        ));
        Ok(())
    }

    #[test]
    fn test_verify() -> Result<()> {
        let cop = coprocessor();
        let id = U256::from(3);
        let proof = cop.prove(id, b"105");
        assert!(cop.verify(id, b"105", &proof)?);
        assert!(!cop.verify(id, b"106", &proof)?);
        assert!(!cop.verify(U256::from(4), b"105", &proof)?);
        assert_eq!(
            cop.verify(id, b"105", &[1, 2, 3]),
            Err(AlgebraError::MalformedProof {
                expected: PROOF_LEN,
                actual: 3
            })
        );
        Ok(())
    }

    #[test]
    fn test_proofs_are_bound_to_the_coprocessor_key() -> Result<()> {
        let a = coprocessor();
        let b = MockCoprocessor::new(create_shared_rng_from_u64(7))?;
        let proof = a.prove(U256::from(1), b"1");
        assert!(!b.verify(U256::from(1), b"1", &proof)?);
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_add_commutes(x in 0u64..u32::MAX as u64, y in 0u64..u32::MAX as u64) {
            let cop = coprocessor();
            let (cx, cy) = (cop.encode(x).unwrap(), cop.encode(y).unwrap());
            let xy = cop.decrypt(&cop.add(&cx, &cy).unwrap()).unwrap();
            let yx = cop.decrypt(&cop.add(&cy, &cx).unwrap()).unwrap();
            prop_assert_eq!(xy, yx);
            prop_assert_eq!(xy, x + y);
        }
    }
}
