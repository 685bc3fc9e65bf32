//! Blink matrix demo
//!
//! Drives a 16×8 HT16K33 LED matrix from a Raspberry Pi Pico 2: sweeps a
//! lit column across the display, ramps the brightness, then cycles
//! through the four blink rates. Progress is logged via defmt.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                         |
//! |-----------|------------|-------------------------------|
//! | I2C0 SDA  | GP20       | Module has its own pull-ups   |
//! | I2C0 SCL  | GP21       |                               |
//! | A0–A2     | —          | Open, address 0x70            |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use ht16k33_driver::{Ht16k33Async, DEFAULT_ADDRESS, HEIGHT, MAX_BRIGHTNESS, WIDTH};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let mut matrix = Ht16k33Async::new(i2c, DEFAULT_ADDRESS)
        .await
        .expect("HT16K33 did not respond");

    info!("Matrix ready at {=u8:#x}", matrix.address());

    loop {
        // Sweep a single lit column left to right.
        for x in 0..WIDTH {
            matrix.clear();
            for y in 0..HEIGHT {
                matrix.set_pixel(x, y, true);
            }
            if let Err(e) = matrix.show().await {
                error!("Frame write failed: {}", e);
            }
            Timer::after(Duration::from_millis(60)).await;
        }

        // Full panel, brightness down and back up.
        matrix.fill(true);
        if let Err(e) = matrix.show().await {
            error!("Frame write failed: {}", e);
        }
        for level in (0..=MAX_BRIGHTNESS).rev().chain(0..=MAX_BRIGHTNESS) {
            if let Err(e) = matrix.set_brightness(level).await {
                error!("Brightness write failed: {}", e);
            }
            Timer::after(Duration::from_millis(40)).await;
        }

        // Each blink rate for two seconds, then back to steady.
        for rate in [1, 2, 3, 0] {
            match matrix.set_blink_rate(rate).await {
                Ok(()) => info!("Blink rate {}", matrix.blink_rate()),
                Err(e) => error!("Blink rate write failed: {}", e),
            }
            Timer::after(Duration::from_millis(2000)).await;
        }
    }
}
