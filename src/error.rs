//! Error types for the HT16K33 driver.

use core::fmt;

/// Errors that can occur when talking to the HT16K33.
///
/// Pixel coordinates and command arguments are masked into range rather
/// than rejected, so the bus is the only thing that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ht16k33Error<E> {
    /// Underlying I2C bus error.
    I2c(E),
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for Ht16k33Error<E> {
    fn from(error: E) -> Self {
        Ht16k33Error::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Ht16k33Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Ht16k33Error::I2c(e) => write!(f, "I2C error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Ht16k33Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Ht16k33Error::I2c(e) => defmt::write!(f, "I2C error: {}", e),
        }
    }
}
