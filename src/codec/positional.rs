/// Symbol order of the numeral system; a symbol's index is its digit value.
///
/// This is a plain base-64 integer encoding, most significant digit first. It shares the MIME
/// alphabet but has no padding and no byte-oriented grouping.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Numeral base.
pub const BASE: u32 = 64;

/// Digits used for an instruction's grid position.
pub const POSITION_DIGITS: usize = 3;

/// Digits used for an instruction's run length.
pub const RUN_DIGITS: usize = 2;

/// Characters per encoded instruction.
pub const CHUNK_LEN: usize = POSITION_DIGITS + RUN_DIGITS;

/// Largest position representable in [`POSITION_DIGITS`] digits.
pub const MAX_POSITION: u32 = BASE * BASE * BASE - 1;

/// Largest run length representable in [`RUN_DIGITS`] digits.
pub const MAX_RUN_LENGTH: u32 = BASE * BASE - 1;

const INVALID: u8 = u8::MAX;

const DIGIT_VALUES: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Value of a single symbol, or `None` if it is outside the alphabet.
pub fn digit_value(symbol: u8) -> Option<u32> {
    match DIGIT_VALUES[symbol as usize] {
        INVALID => None,
        v => Some(u32::from(v)),
    }
}

/// Decode a big-endian run of symbols into an integer.
///
/// Returns `None` if any symbol is outside the alphabet or the value does not fit in `u32`.
/// An empty input decodes to `0`.
pub fn decode_digits(digits: &str) -> Option<u32> {
    digits.bytes().try_fold(0u32, |acc, b| {
        acc.checked_mul(BASE)?.checked_add(digit_value(b)?)
    })
}

/// Encode `value` as exactly `width` symbols, zero-padded with `A`.
///
/// Returns `None` if `value` needs more than `width` digits.
pub fn encode_digits(value: u32, width: usize) -> Option<String> {
    let mut out = vec![ALPHABET[0]; width];
    let mut rest = value;
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(rest % BASE) as usize];
        rest /= BASE;
    }
    if rest != 0 {
        return None;
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
#[path = "../../tests/unit/codec/positional.rs"]
mod tests;
