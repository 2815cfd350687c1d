#[inline(always)]
pub const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}

#[inline(always)]
pub const fn is_newline(b: u8) -> bool {
    matches!(b, b'\r' | b'\n')
}

/// Any ASCII whitespace, line breaks included.
#[inline(always)]
pub const fn is_whitespace(b: u8) -> bool {
    is_space(b) || is_newline(b)
}

#[inline(always)]
pub const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Regex `\w` class: letters, digits and underscore.
#[inline(always)]
pub const fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
