//! Scoped bus transactions.
//!
//! A transaction guard mutably borrows the bus and binds it to the device
//! address for as long as it lives. The bus is released when the guard goes
//! out of scope, on every exit path including `?` returns after a failed
//! write. When the bus is an `embassy-embedded-hal` shared-bus `I2cDevice`,
//! each write additionally takes and drops the bus mutex.
//!
//! This module is crate-private; the drivers open one guard per operation.

use embedded_hal::i2c::I2c;
#[cfg(feature = "async")]
use embedded_hal_async::i2c::I2c as AsyncI2c;

use crate::error::Ht16k33Error;

/// Blocking transaction guard.
pub(crate) struct Transaction<'a, I2C> {
    i2c: &'a mut I2C,
    address: u8,
}

impl<'a, I2C> Transaction<'a, I2C>
where
    I2C: I2c,
{
    /// Claim the bus for the device at `address`.
    pub fn open(i2c: &'a mut I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Write raw bytes to the device.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), Ht16k33Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ht16k33 @ {=u8:#x} <- {=[u8]:#x}", self.address, bytes);

        self.i2c.write(self.address, bytes)?;
        Ok(())
    }
}

/// Async transaction guard.
#[cfg(feature = "async")]
pub(crate) struct AsyncTransaction<'a, I2C> {
    i2c: &'a mut I2C,
    address: u8,
}

#[cfg(feature = "async")]
impl<'a, I2C> AsyncTransaction<'a, I2C>
where
    I2C: AsyncI2c,
{
    /// Claim the bus for the device at `address`.
    pub fn open(i2c: &'a mut I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Write raw bytes to the device.
    pub async fn write(&mut self, bytes: &[u8]) -> Result<(), Ht16k33Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ht16k33 @ {=u8:#x} <- {=[u8]:#x}", self.address, bytes);

        self.i2c.write(self.address, bytes).await?;
        Ok(())
    }
}
