//! Allowed-character policy for plain-text content.

/// ASCII letters
pub const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ASCII digits
pub const DIGITS: &[u8] = b"1234567890";

/// Punctuation plus the whitespace controls that count as text
pub const SPECIAL: &[u8] = b" !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~\r\n\t";

/// Immutable membership table built at compile time
#[derive(Debug)]
pub struct AllowedCharacterSet {
    table: [bool; 128],
}

impl AllowedCharacterSet {
    const fn build() -> Self {
        let table = mark([false; 128], LETTERS);
        let table = mark(table, DIGITS);
        let table = mark(table, SPECIAL);
        Self { table }
    }

    /// Whether `codepoint` is valid text.
    ///
    /// Anything in the explicit sets passes, as does the printable range
    /// `31 < cp < 128`. Codepoints of 128 and above never pass.
    pub fn is_allowed(&self, codepoint: u32) -> bool {
        let listed = codepoint < 128 && self.table[codepoint as usize];
        listed || (codepoint > 31 && codepoint < 128)
    }
}

const fn mark(mut table: [bool; 128], set: &[u8]) -> [bool; 128] {
    let mut i = 0;
    while i < set.len() {
        table[set[i] as usize] = true;
        i += 1;
    }
    table
}

/// Process-wide policy instance
pub static ALLOWED: AllowedCharacterSet = AllowedCharacterSet::build();

/// Classify a single symbol under [`ALLOWED`]
pub fn is_allowed(symbol: char) -> bool {
    ALLOWED.is_allowed(symbol as u32)
}
