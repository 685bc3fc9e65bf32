//! Async HT16K33 driver for Embassy firmware.
//!
//! [`Ht16k33Async`] mirrors [`Ht16k33`](crate::Ht16k33) operation for
//! operation. Only bus writes await; buffer edits and setting queries stay
//! synchronous.

use embedded_hal_async::i2c::I2c;

use crate::buffer::DisplayBuffer;
use crate::config::Config;
use crate::error::Ht16k33Error;
use crate::registers::{self, BLINK_RATE_MASK, BRIGHTNESS_MASK, DATA_LEN, OSCILLATOR_ON};
use crate::transaction::AsyncTransaction;

/// Async driver for an HT16K33 16×8 LED matrix controller.
///
/// Takes any `embedded-hal-async` I2C implementation, including the
/// `embassy-embedded-hal` shared-bus `I2cDevice` when the bus also serves
/// other peripherals.
///
/// # Example
///
/// ```no_run
/// use ht16k33_driver::{Ht16k33Async, DEFAULT_ADDRESS};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut matrix = Ht16k33Async::new(i2c, DEFAULT_ADDRESS).await.unwrap();
///
/// matrix.fill(true);
/// matrix.show().await.unwrap();
/// matrix.set_blink_rate(1).await.unwrap();
/// # }
/// ```
pub struct Ht16k33Async<I2C> {
    i2c: I2C,
    address: u8,
    buffer: DisplayBuffer,
    blink_rate: u8,
    brightness: u8,
    display_on: bool,
}

impl<I2C> Ht16k33Async<I2C>
where
    I2C: I2c,
{
    /// Open the device at `address` and bring it up with the default
    /// settings: all-off frame, oscillator on, blink rate 0, brightness 15.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (typically 0x70)
    ///
    /// # Errors
    /// [`Ht16k33Error::I2c`] if any of the start-up writes fails.
    pub async fn new(i2c: I2C, address: u8) -> Result<Self, Ht16k33Error<I2C::Error>> {
        Self::with_config(i2c, Config::default().with_address(address)).await
    }

    /// Open and initialise the device using `config`.
    pub async fn with_config(i2c: I2C, config: Config) -> Result<Self, Ht16k33Error<I2C::Error>> {
        let mut driver = Self {
            i2c,
            address: config.address,
            buffer: DisplayBuffer::new(),
            blink_rate: 0,
            brightness: 0,
            display_on: false,
        };

        driver.show().await?;
        driver.write_command(OSCILLATOR_ON).await?;
        driver.set_blink_rate(config.blink_rate).await?;
        driver.set_brightness(config.brightness).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ht16k33 @ {=u8:#x} initialised", driver.address);

        Ok(driver)
    }

    /// Consume the driver and hand back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    // -----------------------------------------------------------------------
    // Display settings
    // -----------------------------------------------------------------------

    /// Set the blink rate (0–3, masked). Also switches the display on.
    ///
    /// The cached rate only changes once the command has been written.
    pub async fn set_blink_rate(&mut self, rate: u8) -> Result<(), Ht16k33Error<I2C::Error>> {
        let rate = rate & BLINK_RATE_MASK;
        self.write_command(registers::display_setup(rate, true)).await?;
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

    /// Set the brightness (0–15, masked).
    pub async fn set_brightness(&mut self, level: u8) -> Result<(), Ht16k33Error<I2C::Error>> {
        let level = level & BRIGHTNESS_MASK;
        self.write_command(registers::dimming(level)).await?;
        self.brightness = level;

        #[cfg(feature = "defmt")]
        defmt::debug!("ht16k33 brightness {=u8}", level);

        Ok(())
    }

    /// Last brightness written. No bus access.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Blank or unblank the display, keeping the cached blink rate.
    pub async fn set_display_on(&mut self, on: bool) -> Result<(), Ht16k33Error<I2C::Error>> {
        self.write_command(registers::display_setup(self.blink_rate, on)).await?;
        self.display_on = on;
        Ok(())
    }

    pub fn is_display_on(&self) -> bool {
        self.display_on
    }

    // -----------------------------------------------------------------------
    // Frame buffer
    // -----------------------------------------------------------------------

    /// Send the whole frame buffer in a single write.
    ///
    /// At 100 kHz the 17-byte frame takes roughly 2 ms on the wire.
    pub async fn show(&mut self) -> Result<(), Ht16k33Error<I2C::Error>> {
        AsyncTransaction::open(&mut self.i2c, self.address)
            .write(self.buffer.frame())
            .await
    }

    pub fn fill(&mut self, on: bool) {
        self.buffer.fill(on);
    }

    pub fn clear(&mut self) {
        self.buffer.fill(false);
    }

    /// Turn the LED at column `x` (0–15), row `y` (0–7) on or off.
    /// Out-of-range coordinates wrap. Local only.
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        self.buffer.set_pixel(x, y, on);
    }

    pub fn pixel(&self, x: u8, y: u8) -> bool {
        self.buffer.pixel(x, y)
    }

    /// Overwrite display RAM byte `index` (0–15) in the buffer.
    pub fn set_buffer(&mut self, index: usize, value: u8) {
        self.buffer.set_byte(index, value);
    }

    pub fn buffer_byte(&self, index: usize) -> u8 {
        self.buffer.byte(index)
    }

    pub fn data(&self) -> &[u8; DATA_LEN] {
        self.buffer.data()
    }

    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut DisplayBuffer {
        &mut self.buffer
    }

    async fn write_command(&mut self, command: u8) -> Result<(), Ht16k33Error<I2C::Error>> {
        AsyncTransaction::open(&mut self.i2c, self.address)
            .write(&[command])
            .await
    }
}
