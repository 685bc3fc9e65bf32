//! Driver for the Holtek HT16K33 LED matrix controller.
//!
//! The HT16K33 multiplexes up to 16×8 LEDs from 16 bytes of display RAM
//! and is configured over I2C with single-byte commands. This crate keeps
//! a local copy of display RAM, edits it pixel by pixel, and pushes the
//! whole frame to the chip when asked.
//!
//! # Architecture
//!
//! - **[`DisplayBuffer`]** — the 17-byte frame (register address + RAM)
//!   and the row/column bit packing.
//! - **`transaction`** (crate-private) — scoped bus guards that borrow the
//!   I2C peripheral for the length of one operation.
//! - **[`Ht16k33`]** / **[`Ht16k33Async`]** — blocking and async drivers
//!   with identical operations: start-up sequence, blink rate, brightness,
//!   pixel edits and `show()`.
//!
//! # Quick start
//!
//! ```no_run
//! use ht16k33_driver::{Ht16k33, DEFAULT_ADDRESS};
//!
//! # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! // Construct with any `embedded-hal` I2C implementation
//! let mut matrix = Ht16k33::new(i2c, DEFAULT_ADDRESS)?;
//!
//! matrix.set_brightness(8)?;
//! matrix.set_pixel(3, 2, true);
//! matrix.show()?;
//! # Ok::<(), ht16k33_driver::Ht16k33Error<embedded_hal::i2c::ErrorKind>>(())
//! ```
//!
//! # Features
//!
//! - **`async`** *(default)* — [`Ht16k33Async`] over `embedded-hal-async`.
//! - **`defmt`** — `defmt::Format` implementations and trace/debug
//!   logging of bus traffic.
//! - **`graphics`** — `embedded-graphics` `DrawTarget` for
//!   [`DisplayBuffer`].

#![cfg_attr(not(test), no_std)]

pub use buffer::DisplayBuffer;
pub use config::Config;
pub use error::Ht16k33Error;
pub use ht16k33::Ht16k33;
#[cfg(feature = "async")]
pub use ht16k33_async::Ht16k33Async;
pub use registers::{DATA_LEN, DEFAULT_ADDRESS, FRAME_LEN, HEIGHT, MAX_BRIGHTNESS, WIDTH};

mod buffer;
mod config;
mod error;
#[cfg(feature = "graphics")]
mod graphics;
mod ht16k33;
#[cfg(feature = "async")]
mod ht16k33_async;
pub mod registers;
mod transaction;
