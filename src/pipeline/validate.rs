use crate::pipeline::classify::is_allowed;
use std::fmt;
use tracing::trace;

/// One disallowed symbol and its byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub index: usize,
    pub symbol: char,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Incorrect symbol [{}] at index [{}]",
            self.symbol, self.index
        )
    }
}

/// Every violation found in a buffer, in position order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// No violations: the content is valid
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// One CRLF-terminated line per violation; empty when clean
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in &self.violations {
            write!(f, "{}\r\n", violation)?;
        }
        Ok(())
    }
}

/// Scan `content` one byte per symbol.
///
/// Bytes map straight to chars (no UTF-8 decoding), so a multi-byte
/// sequence yields one violation per byte and every index is a byte offset.
pub fn validate(content: &[u8]) -> ValidationReport {
    let violations = content
        .iter()
        .enumerate()
        .filter_map(|(index, &byte)| {
            let symbol = char::from(byte);
            trace!(
                "Symbol: [{}], Hex: [{}], Binary: [{:08b}]",
                symbol.escape_debug(),
                hex::encode([byte]),
                byte
            );
            (!is_allowed(symbol)).then_some(Violation { index, symbol })
        })
        .collect();

    ValidationReport { violations }
}
