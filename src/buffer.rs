//! In-memory mirror of the HT16K33 display RAM.
//!
//! [`DisplayBuffer`] holds a complete frame as it goes on the wire: byte 0
//! is the display RAM start address and bytes 1–16 are the RAM contents.
//! Keeping the address byte in place lets a flush send the buffer as-is in
//! a single write.
//!
//! # Layout
//!
//! Each of the 8 rows (COM outputs) takes two data bytes. The first holds
//! columns 0–7 (ROW0–ROW7, LSB first), the second columns 8–15.
//!
//! | Data byte | Buffer index | Contents           |
//! |-----------|--------------|--------------------|
//! | `y*2`     | `y*2 + 1`    | row `y`, cols 0–7  |
//! | `y*2 + 1` | `y*2 + 2`    | row `y`, cols 8–15 |

use crate::registers::{DATA_LEN, DISPLAY_RAM_ADDRESS, FRAME_LEN, HEIGHT, WIDTH};

/// 17-byte frame buffer: register address followed by 16 bytes of RAM.
///
/// All mutation is local; nothing reaches the chip until the owning driver
/// flushes with `show()`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    frame: [u8; FRAME_LEN],
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBuffer {
    /// Create an all-off buffer.
    pub const fn new() -> Self {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = DISPLAY_RAM_ADDRESS;
        Self { frame }
    }

    /// Set every LED on or off.
    pub fn fill(&mut self, on: bool) {
        let value = if on { 0xFF } else { 0x00 };
        self.frame[1..].fill(value);
    }

    /// Turn a single LED on or off.
    ///
    /// Coordinates wrap: `x` is taken modulo 16 and `y` modulo 8.
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        let (low, high) = Self::row_indices(y);
        let mask = Self::column_mask(x);
        let [mask_lo, mask_hi] = mask.to_le_bytes();

        if on {
            self.frame[low] |= mask_lo;
            self.frame[high] |= mask_hi;
        } else {
            self.frame[low] &= !mask_lo;
            self.frame[high] &= !mask_hi;
        }
    }

    /// Whether a single LED is on. Coordinates wrap as in
    /// [`set_pixel`](Self::set_pixel).
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        let (low, high) = Self::row_indices(y);
        let row = u16::from_le_bytes([self.frame[low], self.frame[high]]);
        row & Self::column_mask(x) != 0
    }

    /// Write data byte `index` (0–15, wraps). The register-address byte is
    /// not reachable.
    pub fn set_byte(&mut self, index: usize, value: u8) {
        self.frame[Self::data_index(index)] = value;
    }

    /// Read data byte `index` (0–15, wraps).
    pub fn byte(&self, index: usize) -> u8 {
        self.frame[Self::data_index(index)]
    }

    /// The 16 bytes of display RAM, without the register address.
    pub fn data(&self) -> &[u8; DATA_LEN] {
        let [_, data @ ..] = &self.frame;
        data
    }

    /// The full frame as transmitted, register address first.
    pub(crate) fn frame(&self) -> &[u8; FRAME_LEN] {
        &self.frame
    }

    // -----------------------------------------------------------------------
    // Addressing
    // -----------------------------------------------------------------------

    fn column_mask(x: u8) -> u16 {
        1u16 << (x % WIDTH)
    }

    /// Buffer indices of the low and high byte for row `y`.
    fn row_indices(y: u8) -> (usize, usize) {
        let low = usize::from(y % HEIGHT) * 2 + 1;
        (low, low + 1)
    }

    fn data_index(index: usize) -> usize {
        (index % DATA_LEN) + 1
    }
}
