// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

/// Anything that can name a location in a store
pub trait IntoKey {
    fn into_key(self) -> Vec<u8>;
}

impl IntoKey for Vec<u8> {
    fn into_key(self) -> Vec<u8> {
        self
    }
}

impl IntoKey for &[u8] {
    fn into_key(self) -> Vec<u8> {
        self.to_vec()
    }
}

impl IntoKey for &Vec<u8> {
    fn into_key(self) -> Vec<u8> {
        self.as_slice().into_key()
    }
}

impl IntoKey for String {
    fn into_key(self) -> Vec<u8> {
        self.into_bytes()
    }
}

impl IntoKey for &String {
    fn into_key(self) -> Vec<u8> {
        self.as_str().into_key()
    }
}

impl IntoKey for &str {
    fn into_key(self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

/// Path segments, joined with `/`
impl IntoKey for &[&str] {
    fn into_key(self) -> Vec<u8> {
        self.join("/").into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::IntoKey;

    #[test]
    fn test_keys() {
        let segments: &[&str] = &["ledger", "data", "3"];
        assert_eq!(segments.into_key(), b"ledger/data/3".to_vec());
        assert_eq!(String::from("//stats").into_key(), b"//stats".to_vec());
        assert_eq!((&vec![1u8, 2]).into_key(), vec![1, 2]);
    }
}
