//! Power-on configuration for the HT16K33 drivers.

use crate::registers::{BLINK_RATE_MASK, BRIGHTNESS_MASK, DEFAULT_ADDRESS, MAX_BRIGHTNESS};

/// Settings applied during driver construction.
///
/// The default matches a freshly strapped module: address `0x70`, no
/// blinking and full brightness.
///
/// # Example
///
/// ```
/// use ht16k33_driver::Config;
///
/// let config = Config::default().with_address(0x71).with_brightness(4);
/// assert_eq!(config.address, 0x71);
/// assert_eq!(config.brightness, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C device address (0x70–0x77 depending on the A0–A2 straps).
    pub address: u8,
    /// Blink rate written at power-on (0–3, masked).
    pub blink_rate: u8,
    /// Brightness written at power-on (0–15, masked).
    pub brightness: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            blink_rate: 0,
            brightness: MAX_BRIGHTNESS,
        }
    }
}

impl Config {
    /// Use a different device address.
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Use a different power-on blink rate.
    pub const fn with_blink_rate(mut self, rate: u8) -> Self {
        self.blink_rate = rate & BLINK_RATE_MASK;
        self
    }

    /// Use a different power-on brightness.
    pub const fn with_brightness(mut self, level: u8) -> Self {
        self.brightness = level & BRIGHTNESS_MASK;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_address_0x70_steady_full_brightness() {
        let config = Config::default();
        assert_eq!(config.address, 0x70);
        assert_eq!(config.blink_rate, 0);
        assert_eq!(config.brightness, 15);
    }

    #[test]
    fn builders_mask_out_of_range_values() {
        let config = Config::default().with_blink_rate(6).with_brightness(0x1C);
        assert_eq!(config.blink_rate, 2);
        assert_eq!(config.brightness, 12);
    }
}
