//! Buffering and decoding of four-digit `\uXXXX` escape sequences.
//!
//! [`HexEscapeBuffer`] collects up to four ASCII hexadecimal digits
//! (`0-9`, `A-F`, `a-f`) and yields the UTF-16 code unit they spell once the
//! fourth arrives. The digits stay readable until [`HexEscapeBuffer::reset`]
//! so the deserializer can quote them back in an error.
//!
//! Surrogate pairs are combined with [`decode_surrogate_pair`]; the buffer
//! itself never rejects a code unit.
use alloc::string::String;

/// A character that is not an ASCII hexadecimal digit was fed to a
/// [`HexEscapeBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NotHexDigit;

#[derive(Debug, Default)]
pub(crate) struct HexEscapeBuffer {
    digits: [u8; 4],
    len: u8,
    unit: u16,
}

impl HexEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the accumulated digits.
    pub fn reset(&mut self) {
        self.len = 0;
        self.unit = 0;
    }

    /// Feeds one digit.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen.
    /// - `Ok(Some(unit))` on the fourth digit.
    /// - `Err(NotHexDigit)` if `c` is not a hex digit, or if a fifth digit
    ///   arrives without a reset. The buffer keeps what it had.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, NotHexDigit> {
        let Some(value) = c.to_digit(16) else {
            return Err(NotHexDigit);
        };
        if self.len == 4 {
            return Err(NotHexDigit);
        }
        #[allow(clippy::cast_possible_truncation)]
        {
            // to_digit(16) only accepts ASCII
            self.digits[self.len as usize] = c as u8;
            self.unit = (self.unit << 4) | value as u16;
        }
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        Ok(Some(self.unit))
    }

    /// The digits fed since the last reset, as written.
    pub fn digits(&self) -> String {
        self.digits[..self.len as usize]
            .iter()
            .map(|&b| char::from(b))
            .collect()
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Combines a high and a low surrogate into the scalar they encode. Returns
/// `None` if either unit is outside its surrogate range.
pub(crate) fn decode_surrogate_pair(high: u16, low: u16) -> Option<char> {
    if !is_high_surrogate(high) || !is_low_surrogate(low) {
        return None;
    }
    let code = (u32::from(high) - 0xD800) * 0x400 + (u32::from(low) - 0xDC00) + 0x1_0000;
    char::from_u32(code)
}
