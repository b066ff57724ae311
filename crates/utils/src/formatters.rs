// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use core::fmt;

/// Formatter for byte payloads. Long payloads are elided in the middle.
pub fn hexf(data: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", truncate(hex::encode(data)))
}

/// Short form used for 32 byte ciphertext handles in logs: `0x1a2b..9f0e`
pub fn short_hex(data: &[u8]) -> String {
    let s = hex::encode(data);
    if s.len() <= 8 {
        return format!("0x{s}");
    }
    format!("0x{}..{}", &s[..4], &s[s.len() - 4..])
}

fn truncate(s: String) -> String {
    let threshold = 100;
    let limit = 50;
    let cutoff = limit / 2;
    if s.len() <= threshold {
        format!("0x{}", s)
    } else {
        let start = &s[..cutoff];
        let end = &s[s.len() - (limit - cutoff)..];
        format!("<bytes({}):0x{}..{}>", s.len(), start, end)
    }
}
