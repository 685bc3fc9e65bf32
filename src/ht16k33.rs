//! Blocking HT16K33 driver.
//!
//! [`Ht16k33`] owns the bus handle, the local frame buffer and the cached
//! display settings. Pixel edits only touch the buffer; [`Ht16k33::show`]
//! pushes the whole frame to the chip in one write.

use embedded_hal::i2c::I2c;

use crate::buffer::DisplayBuffer;
use crate::config::Config;
use crate::error::Ht16k33Error;
use crate::registers::{self, BLINK_RATE_MASK, BRIGHTNESS_MASK, DATA_LEN, OSCILLATOR_ON};
use crate::transaction::Transaction;

/// Blocking driver for an HT16K33 16×8 LED matrix controller.
///
/// # Example
///
/// ```no_run
/// use ht16k33_driver::{Ht16k33, DEFAULT_ADDRESS};
///
/// // `i2c` is any `embedded-hal` I2C implementation
/// # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
/// let mut matrix = Ht16k33::new(i2c, DEFAULT_ADDRESS)?;
///
/// matrix.set_pixel(0, 0, true);
/// matrix.set_pixel(15, 7, true);
/// matrix.show()?;
/// # Ok::<(), ht16k33_driver::Ht16k33Error<embedded_hal::i2c::ErrorKind>>(())
/// ```
pub struct Ht16k33<I2C> {
    i2c: I2C,
    address: u8,
    buffer: DisplayBuffer,
    blink_rate: u8,
    brightness: u8,
    display_on: bool,
}

impl<I2C> Ht16k33<I2C>
where
    I2C: I2c,
{
    /// Open the device at `address` and bring it up with the default
    /// settings.
    ///
    /// Sends, in order: an all-off frame, oscillator on, blink rate 0
    /// (display on) and brightness 15.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (typically 0x70)
    ///
    /// # Errors
    /// [`Ht16k33Error::I2c`] if any of the start-up writes fails. The bus
    /// handle is dropped with the half-built driver.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, Ht16k33Error<I2C::Error>> {
        Self::with_config(i2c, Config::default().with_address(address))
    }

    /// Open and initialise the device using `config`.
    pub fn with_config(i2c: I2C, config: Config) -> Result<Self, Ht16k33Error<I2C::Error>> {
        let mut driver = Self {
            i2c,
            address: config.address,
            buffer: DisplayBuffer::new(),
            blink_rate: 0,
            brightness: 0,
            display_on: false,
        };

        driver.show()?;
        driver.write_command(OSCILLATOR_ON)?;
        driver.set_blink_rate(config.blink_rate)?;
        driver.set_brightness(config.brightness)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ht16k33 @ {=u8:#x} initialised", driver.address);

        Ok(driver)
    }

    /// Consume the driver and hand back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Device address in use.
    pub fn address(&self) -> u8 {
        self.address
    }

    // -----------------------------------------------------------------------
    // Display settings
    // -----------------------------------------------------------------------

    /// Set the blink rate (0 = steady, 1 = 2 Hz, 2 = 1 Hz, 3 = 0.5 Hz).
    ///
    /// Only the low 2 bits of `rate` are used. This also switches the
    /// display on.
    ///
    /// # Errors
    /// [`Ht16k33Error::I2c`] on communication failure; the cached rate is
    /// left unchanged.
    pub fn set_blink_rate(&mut self, rate: u8) -> Result<(), Ht16k33Error<I2C::Error>> {
        let rate = rate & BLINK_RATE_MASK;
        self.write_command(registers::display_setup(rate, true))?;
        self.blink_rate = rate;
        self.display_on = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("ht16k33 blink rate {=u8}", rate);

        Ok(())
    }

    /// Last blink rate written. No bus access.
    pub fn blink_rate(&self) -> u8 {
        self.blink_rate
    }

    /// Set the brightness (0–15). Only the low 4 bits of `level` are used.
    ///
    /// # Errors
    /// [`Ht16k33Error::I2c`] on communication failure; the cached level is
    /// left unchanged.
    pub fn set_brightness(&mut self, level: u8) -> Result<(), Ht16k33Error<I2C::Error>> {
        let level = level & BRIGHTNESS_MASK;
        self.write_command(registers::dimming(level))?;
        self.brightness = level;

        #[cfg(feature = "defmt")]
        defmt::debug!("ht16k33 brightness {=u8}", level);

        Ok(())
    }

    /// Last brightness written. No bus access.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Blank or unblank the display without touching display RAM.
    ///
    /// The cached blink rate is preserved.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Ht16k33Error<I2C::Error>> {
        self.write_command(registers::display_setup(self.blink_rate, on))?;
        self.display_on = on;
        Ok(())
    }

    /// Whether the display was last switched on. No bus access.
    pub fn is_display_on(&self) -> bool {
        self.display_on
    }

    // -----------------------------------------------------------------------
    // Frame buffer
    // -----------------------------------------------------------------------

    /// Send the whole frame buffer (register address + 16 data bytes) in a
    /// single write.
    pub fn show(&mut self) -> Result<(), Ht16k33Error<I2C::Error>> {
        Transaction::open(&mut self.i2c, self.address).write(self.buffer.frame())
    }

    /// Set every LED in the buffer on or off. Local only.
    pub fn fill(&mut self, on: bool) {
        self.buffer.fill(on);
    }

    /// Turn every LED in the buffer off. Local only.
    pub fn clear(&mut self) {
        self.buffer.fill(false);
    }

    /// Turn the LED at column `x` (0–15), row `y` (0–7) on or off.
    /// Out-of-range coordinates wrap. Local only.
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        self.buffer.set_pixel(x, y, on);
    }

    /// Whether the LED at (`x`, `y`) is on in the buffer.
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        self.buffer.pixel(x, y)
    }

    /// Overwrite display RAM byte `index` (0–15) in the buffer.
    pub fn set_buffer(&mut self, index: usize, value: u8) {
        self.buffer.set_byte(index, value);
    }

    /// Display RAM byte `index` (0–15) from the buffer.
    pub fn buffer_byte(&self, index: usize) -> u8 {
        self.buffer.byte(index)
    }

    /// The 16 bytes of display RAM as they will be sent.
    pub fn data(&self) -> &[u8; DATA_LEN] {
        self.buffer.data()
    }

    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Mutable access to the frame buffer, e.g. for `embedded-graphics`.
    pub fn buffer_mut(&mut self) -> &mut DisplayBuffer {
        &mut self.buffer
    }

    fn write_command(&mut self, command: u8) -> Result<(), Ht16k33Error<I2C::Error>> {
        Transaction::open(&mut self.i2c, self.address).write(&[command])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDRESS: u8 = 0x70;

    fn startup(address: u8) -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write(address, vec![0u8; 17]),
            I2cTransaction::write(address, vec![0x21]),
            I2cTransaction::write(address, vec![0x81]),
            I2cTransaction::write(address, vec![0xEF]),
        ]
    }

    fn driver_with(extra: &[I2cTransaction]) -> (Ht16k33<I2cMock>, I2cMock) {
        let mut expectations = startup(ADDRESS);
        expectations.extend_from_slice(extra);
        let i2c = I2cMock::new(&expectations);
        let driver = Ht16k33::new(i2c.clone(), ADDRESS).unwrap();
        (driver, i2c)
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_sends_startup_sequence() {
        let (driver, mut i2c) = driver_with(&[]);

        assert_eq!(driver.address(), ADDRESS);
        assert_eq!(driver.blink_rate(), 0);
        assert_eq!(driver.brightness(), 15);
        assert!(driver.is_display_on());
        assert_eq!(driver.data(), &[0u8; 16]);

        i2c.done();
    }

    #[test]
    fn with_config_applies_settings() {
        let expectations = [
            I2cTransaction::write(0x73, vec![0u8; 17]),
            I2cTransaction::write(0x73, vec![0x21]),
            I2cTransaction::write(0x73, vec![0x85]),
            I2cTransaction::write(0x73, vec![0xE3]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let config = Config::default()
            .with_address(0x73)
            .with_blink_rate(2)
            .with_brightness(3);

        let driver = Ht16k33::with_config(i2c.clone(), config).unwrap();
        assert_eq!(driver.blink_rate(), 2);
        assert_eq!(driver.brightness(), 3);

        i2c.done();
    }

    #[test]
    fn new_propagates_bus_error() {
        let expectations =
            [I2cTransaction::write(ADDRESS, vec![0u8; 17]).with_error(ErrorKind::NoAcknowledge(
                embedded_hal::i2c::NoAcknowledgeSource::Address,
            ))];
        let mut i2c = I2cMock::new(&expectations);

        let result = Ht16k33::new(i2c.clone(), ADDRESS);
        assert!(matches!(result, Err(Ht16k33Error::I2c(ErrorKind::NoAcknowledge(_)))));

        i2c.done();
    }

    #[test]
    fn new_stops_at_first_failed_command() {
        let expectations = [
            I2cTransaction::write(ADDRESS, vec![0u8; 17]),
            I2cTransaction::write(ADDRESS, vec![0x21]).with_error(ErrorKind::Other),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let result = Ht16k33::new(i2c.clone(), ADDRESS);
        assert!(matches!(result, Err(Ht16k33Error::I2c(ErrorKind::Other))));

        i2c.done();
    }

    // -- Display settings ---------------------------------------------------

    #[test]
    fn blink_rate_round_trips_in_range() {
        let (mut driver, mut i2c) = driver_with(&[
            I2cTransaction::write(ADDRESS, vec![0x81]),
            I2cTransaction::write(ADDRESS, vec![0x83]),
            I2cTransaction::write(ADDRESS, vec![0x85]),
            I2cTransaction::write(ADDRESS, vec![0x87]),
        ]);

        for rate in 0..=3 {
            driver.set_blink_rate(rate).unwrap();
            assert_eq!(driver.blink_rate(), rate);
        }

        i2c.done();
    }

    #[test]
    fn blink_rate_masks_to_two_bits() {
        let (mut driver, mut i2c) = driver_with(&[
            I2cTransaction::write(ADDRESS, vec![0x83]),
            I2cTransaction::write(ADDRESS, vec![0x87]),
        ]);

        driver.set_blink_rate(5).unwrap();
        assert_eq!(driver.blink_rate(), 5 & 0x3);
        driver.set_blink_rate(0xFF).unwrap();
        assert_eq!(driver.blink_rate(), 3);

        i2c.done();
    }

    #[test]
    fn brightness_round_trips_in_range() {
        let extra: Vec<_> = (0..=15u8)
            .map(|level| I2cTransaction::write(ADDRESS, vec![0xE0 | level]))
            .collect();
        let (mut driver, mut i2c) = driver_with(&extra);

        for level in 0..=15 {
            driver.set_brightness(level).unwrap();
            assert_eq!(driver.brightness(), level);
        }

        i2c.done();
    }

    #[test]
    fn brightness_masks_to_four_bits() {
        let (mut driver, mut i2c) = driver_with(&[I2cTransaction::write(ADDRESS, vec![0xE4])]);

        driver.set_brightness(20).unwrap();
        assert_eq!(driver.brightness(), 20 & 0xF);

        i2c.done();
    }

    #[test]
    fn failed_brightness_keeps_cached_value() {
        let (mut driver, mut i2c) =
            driver_with(&[I2cTransaction::write(ADDRESS, vec![0xE7]).with_error(ErrorKind::Bus)]);

        assert_eq!(driver.set_brightness(7), Err(Ht16k33Error::I2c(ErrorKind::Bus)));
        assert_eq!(driver.brightness(), 15);

        i2c.done();
    }

    #[test]
    fn display_off_keeps_blink_rate() {
        let (mut driver, mut i2c) = driver_with(&[
            I2cTransaction::write(ADDRESS, vec![0x85]),
            I2cTransaction::write(ADDRESS, vec![0x84]),
            I2cTransaction::write(ADDRESS, vec![0x85]),
        ]);

        driver.set_blink_rate(2).unwrap();
        driver.set_display_on(false).unwrap();
        assert!(!driver.is_display_on());
        assert_eq!(driver.blink_rate(), 2);

        driver.set_display_on(true).unwrap();
        assert!(driver.is_display_on());

        i2c.done();
    }

    // -- Frame buffer -------------------------------------------------------

    #[test]
    fn pixel_edits_are_local_until_show() {
        let mut frame = vec![0u8; 17];
        frame[1] = 0b0000_0001; // (0, 0)
        frame[16] = 0b1000_0000; // (15, 7)
        let (mut driver, mut i2c) = driver_with(&[I2cTransaction::write(ADDRESS, frame)]);

        driver.set_pixel(0, 0, true);
        driver.set_pixel(15, 7, true);
        driver.set_pixel(4, 4, true);
        driver.set_pixel(4, 4, false);
        assert!(driver.pixel(0, 0));
        assert!(driver.pixel(15, 7));
        assert!(!driver.pixel(4, 4));

        driver.show().unwrap();

        i2c.done();
    }

    #[test]
    fn show_sends_seventeen_bytes_with_zero_address() {
        let mut frame = vec![0xFFu8; 17];
        frame[0] = 0x00;
        let (mut driver, mut i2c) = driver_with(&[I2cTransaction::write(ADDRESS, frame)]);

        driver.fill(true);
        driver.show().unwrap();

        i2c.done();
    }

    #[test]
    fn clear_and_raw_bytes() {
        let mut frame = vec![0u8; 17];
        frame[3] = 0x3C;
        let (mut driver, mut i2c) = driver_with(&[I2cTransaction::write(ADDRESS, frame)]);

        driver.fill(true);
        driver.clear();
        driver.set_buffer(2, 0x3C);
        assert_eq!(driver.buffer_byte(2), 0x3C);
        // Data byte 2 is row 1, columns 2–5.
        assert!(driver.pixel(2, 1));
        assert!(driver.pixel(5, 1));
        assert!(!driver.pixel(6, 1));

        driver.show().unwrap();

        i2c.done();
    }

    #[test]
    fn release_returns_bus() {
        let (driver, _) = driver_with(&[]);
        let mut i2c = driver.release();
        i2c.done();
    }
}
