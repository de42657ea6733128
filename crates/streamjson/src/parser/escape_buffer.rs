//! Decoding of `\uXXXX` escapes without buffering bytes.
//!
//! [`UnicodeEscapeBuffer`] accumulates exactly four ASCII hexadecimal digits
//! into a UTF-16 code unit as they arrive, so an escape may be split across
//! any number of `write` calls. Surrogate pairing is the parser's business:
//! [`combine_surrogates`] joins a high and a low half once both are known.

/// Accumulates up to four hexadecimal digits into a UTF-16 code unit.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

/// Classification of a decoded `\uXXXX` code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodeUnit {
    /// A scalar value from the basic multilingual plane.
    Scalar(char),
    /// `D800..=DBFF`, must be followed by a low surrogate escape.
    HighSurrogate(u16),
    /// `DC00..=DFFF`, only valid right after a high surrogate.
    LowSurrogate(u16),
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u16> {
        match b {
            b'0'..=b'9' => Some(u16::from(b - b'0')),
            b'a'..=b'f' => Some(u16::from(b - b'a' + 10)),
            b'A'..=b'F' => Some(u16::from(b - b'A' + 10)),
            _ => None,
        }
    }

    /// Feeds one byte of the escape.
    ///
    /// - `Ok(None)` while fewer than four digits have arrived.
    /// - `Ok(Some(unit))` on the fourth digit; the buffer resets itself.
    /// - `Err(())` if `b` is not an ASCII hex digit.
    pub fn feed(&mut self, b: u8) -> Result<Option<CodeUnit>, ()> {
        let d = Self::hex_val(b).ok_or(())?;
        debug_assert!(self.len < 4);

        self.acc = (self.acc << 4) | d;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(match unit {
            0xD800..=0xDBFF => CodeUnit::HighSurrogate(unit),
            0xDC00..=0xDFFF => CodeUnit::LowSurrogate(unit),
            // Every other BMP code unit is a scalar value.
            _ => CodeUnit::Scalar(char::from_u32(u32::from(unit)).unwrap_or('\u{FFFD}')),
        }))
    }
}

/// Joins a surrogate pair into the astral scalar it encodes.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> char {
    let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code).unwrap_or('\u{FFFD}')
}
