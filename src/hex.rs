// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CRPC Protocol Simulator - Mock Hex Generator
//
// Mock addresses, salts and commitments. None of these are real hashes.

use rand::Rng;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Digits in a mock node address.
pub const ADDRESS_DIGITS: usize = 40;
/// Digits in a mock salt.
pub const SALT_DIGITS: usize = 8;
/// Digits in a mock commitment.
pub const COMMITMENT_DIGITS: usize = 16;

/// `0x` followed by exactly `length` uniformly drawn lowercase hex digits.
pub fn generate_hex_string<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let mut out = String::with_capacity(length + 2);
    out.push_str("0x");
    for _ in 0..length {
        out.push(HEX_DIGITS[rng.gen_range(0..16)] as char);
    }
    out
}

/// True when `s` is `0x` plus exactly `digits` lowercase hex digits.
pub fn is_hex_string(s: &str, digits: usize) -> bool {
    match s.strip_prefix("0x") {
        Some(body) => {
            body.len() == digits
                && body.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        }
        None => false,
    }
}
