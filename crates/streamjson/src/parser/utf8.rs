//! Byte-at-a-time UTF-8 validation (RFC 3629).
//!
//! The validator looks at one byte per call, so a multi-byte sequence split
//! across `write` calls is rejected at the same byte no matter where the
//! split falls. Overlong forms, surrogate code points (`ED A0..BF`) and
//! values above U+10FFFF are rejected.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Utf8Step {
    /// The byte completed a scalar (or was ASCII).
    Complete,
    /// The byte is valid so far; more continuation bytes are needed.
    Incomplete,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Utf8Validator {
    /// Continuation bytes still expected.
    need: u8,
    /// Allowed range for the *next* continuation byte.
    lower: u8,
    upper: u8,
}

impl Utf8Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no sequence is in progress.
    pub fn is_idle(&self) -> bool {
        self.need == 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feeds one byte; `Err(())` means the byte cannot appear here.
    pub fn feed(&mut self, b: u8) -> Result<Utf8Step, ()> {
        if self.need == 0 {
            let (need, lower, upper) = match b {
                0x00..=0x7F => return Ok(Utf8Step::Complete),
                0xC2..=0xDF => (1, 0x80, 0xBF),
                0xE0 => (2, 0xA0, 0xBF),
                0xE1..=0xEC | 0xEE..=0xEF => (2, 0x80, 0xBF),
                0xED => (2, 0x80, 0x9F),
                0xF0 => (3, 0x90, 0xBF),
                0xF1..=0xF3 => (3, 0x80, 0xBF),
                0xF4 => (3, 0x80, 0x8F),
                _ => return Err(()),
            };
            *self = Self { need, lower, upper };
            return Ok(Utf8Step::Incomplete);
        }

        if b < self.lower || b > self.upper {
            self.reset();
            return Err(());
        }
        self.need -= 1;
        self.lower = 0x80;
        self.upper = 0xBF;
        if self.need == 0 {
            Ok(Utf8Step::Complete)
        } else {
            Ok(Utf8Step::Incomplete)
        }
    }
}
