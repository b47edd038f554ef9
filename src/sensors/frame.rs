//! D6T-44L thermopile frame layout and decoder.
//!
//! A read of register `0x00` returns one fixed-size frame:
//!
//! ```text
//! ┌──────────────┬───────────────┬─────┬────────────────┬──────────┐
//! │ PTAT (2B LE) │ pixel 0 (2B)  │ ... │ pixel 15 (2B)  │ PEC (1B) │
//! └──────────────┴───────────────┴─────┴────────────────┴──────────┘
//! ```
//!
//! Every word is a signed 16-bit value in tenths of a degree Celsius. The
//! trailing PEC byte must be clocked out to finish the transfer but is not
//! checked.

/// Pixels per frame (4 x 4 array).
pub const PIXEL_COUNT: usize = 16;

/// Bytes per frame: PTAT word + one word per pixel + PEC byte.
pub const FRAME_LEN: usize = 2 * (PIXEL_COUNT + 1) + 1;

/// Register that returns a full frame.
pub const FRAME_REGISTER: u8 = 0x00;

/// Raw counts per degree Celsius.
const COUNTS_PER_DEGREE: f64 = 10.0;

/// A complete raw frame, exactly [`FRAME_LEN`] bytes.
///
/// Construction from a slice fails for any other length, so a short or
/// over-long buffer can never reach the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame([u8; FRAME_LEN]);

impl RawFrame {
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    fn word(&self, offset: usize) -> i16 {
        i16::from_le_bytes([self.0[offset], self.0[offset + 1]])
    }
}

impl TryFrom<&[u8]> for RawFrame {
    type Error = usize;

    /// Fails with the offending length.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; FRAME_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| bytes.len())
    }
}

/// Decoded temperatures from one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalFrame {
    /// PTAT reference temperature, degrees Celsius.
    pub reference_c: f64,
    /// Pixel temperatures in row-major order, degrees Celsius.
    pub pixels: [f64; PIXEL_COUNT],
}

/// Convert one raw word to degrees Celsius.
pub fn counts_to_celsius(raw: i16) -> f64 {
    f64::from(raw) / COUNTS_PER_DEGREE
}

/// Decode a raw frame. Pure; the same frame always yields the same result.
pub fn decode(frame: &RawFrame) -> ThermalFrame {
    let reference_c = counts_to_celsius(frame.word(0));
    let pixels = core::array::from_fn(|j| counts_to_celsius(frame.word(2 + 2 * j)));
    ThermalFrame {
        reference_c,
        pixels,
    }
}
