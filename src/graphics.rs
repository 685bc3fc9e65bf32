//! `embedded-graphics` support.
//!
//! [`DisplayBuffer`] is a 16×8 [`BinaryColor`] draw target, so shapes and
//! text from `embedded-graphics` can be rendered into a driver's buffer via
//! `buffer_mut()` and then flushed with `show()`. Unlike `set_pixel`,
//! pixels outside the matrix are clipped rather than wrapped.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::buffer::DisplayBuffer;
use crate::registers::{HEIGHT, WIDTH};

impl OriginDimensions for DisplayBuffer {
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

impl DrawTarget for DisplayBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u8::try_from(point.x), u8::try_from(point.y)) else {
                continue;
            };
            if x < WIDTH && y < HEIGHT {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}
