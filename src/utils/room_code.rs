//! Room code generation and normalization.
//!
//! Room codes are 6-character strings using Crockford's Base32 alphabet,
//! chosen so codes survive being read aloud or retyped.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const ROOM_CODE_LEN: usize = 6;

/// Generate a room code from the given RNG.
///
/// Uniqueness is the registry's job; this only draws the characters.
pub fn generate_room_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut s = String::with_capacity(ROOM_CODE_LEN);
    for _ in 0..ROOM_CODE_LEN {
        let idx = rng.random_range(0..CROCKFORD.len());
        s.push(CROCKFORD[idx] as char);
    }
    s
}

/// Canonical form of a human-typed room code: trimmed and uppercased,
/// so `ab12cd` finds the room registered as `AB12CD`.
pub fn normalize_room_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
