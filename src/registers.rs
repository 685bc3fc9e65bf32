//! HT16K33 command opcodes and display RAM geometry.
//!
//! The chip has no register file in the usual sense: every command is a
//! single byte whose high nibble selects the function and whose low bits
//! carry the argument. Display RAM is the exception, written as a
//! register-address byte followed by the data bytes.

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// System setup with the oscillator bit set (leaves standby).
pub const OSCILLATOR_ON: u8 = 0x21;

/// Display setup command. Bits 1–2 select the blink rate.
pub const BLINK_CMD: u8 = 0x80;

/// Display-on bit of the display setup command.
pub const BLINK_DISPLAY_ON: u8 = 0x01;

/// Dimming command. Bits 0–3 select one of 16 duty cycles.
pub const BRIGHTNESS_CMD: u8 = 0xE0;

/// Display RAM start address, sent as byte 0 of every frame.
pub const DISPLAY_RAM_ADDRESS: u8 = 0x00;

// ---------------------------------------------------------------------------
// Field widths
// ---------------------------------------------------------------------------

/// Mask for the 2-bit blink rate field.
pub const BLINK_RATE_MASK: u8 = 0x03;

/// Mask for the 4-bit brightness field.
pub const BRIGHTNESS_MASK: u8 = 0x0F;

/// Brightness applied at power-on.
pub const MAX_BRIGHTNESS: u8 = 15;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address (all address straps open).
pub const DEFAULT_ADDRESS: u8 = 0x70;

/// Number of columns (row driver outputs) per row.
pub const WIDTH: u8 = 16;

/// Number of rows (common outputs).
pub const HEIGHT: u8 = 8;

/// Bytes of display RAM.
pub const DATA_LEN: usize = 16;

/// Bytes in a full frame: register address plus display RAM.
pub const FRAME_LEN: usize = DATA_LEN + 1;

/// Encode the display setup byte.
pub(crate) const fn display_setup(rate: u8, on: bool) -> u8 {
    let on_bit = if on { BLINK_DISPLAY_ON } else { 0 };
    BLINK_CMD | on_bit | ((rate & BLINK_RATE_MASK) << 1)
}

/// Encode the dimming byte.
pub(crate) const fn dimming(level: u8) -> u8 {
    BRIGHTNESS_CMD | (level & BRIGHTNESS_MASK)
}
