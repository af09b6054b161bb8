//! Folding string keys into numeric codes.

/// Folds `key` into a deterministic non-negative code.
///
/// Every UTF-16 code unit is folded into a 32-bit signed accumulator as
/// `code = unit + ((code << 5) - code)`, i.e. `code * 31 + unit`, wrapping on overflow. The
/// result is the absolute value of the accumulator, so `i32::MIN` maps to `2^31`.
///
/// The empty string folds to `0`.
#[inline]
pub fn string_code(key: &str) -> u32 {
    key.encode_utf16()
        .fold(0_i32, |code, unit| {
            i32::from(unit).wrapping_add((code << 5).wrapping_sub(code))
        })
        .unsigned_abs()
}
