//! ST7735 TFT LCD Driver
//!
//! A driver for the ST7735 TFT controller, as found on the common 0.96" 80x160
//! and 1.8" 128x160 SPI modules.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Panel offsets for modules smaller than the 132x162 controller RAM
//! - RGBA images with clipping, RGB565 raw frames
//! - Optional reset and backlight pins
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use st7735::{Config, Display, Interface, Rgba, RgbaImage};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let backlight = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc).with_backlight(backlight);
//! let mut display = Display::new(interface, Config::default());
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//! display.set_backlight(true);
//!
//! // 2x2 red square in the top-left corner
//! let pixels = [255, 0, 0, 255].repeat(4);
//! let image = match RgbaImage::new(2, 2, &pixels) {
//!     Ok(image) => image,
//!     Err(_) => return,
//! };
//! let _ = display.display_image(0, 0, &image);
//! let _ = display.clear(Rgba::from_rgb(0x000000));
//! let _ = display.halt();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// RGBA colors, RGB565 packing and image buffers
pub mod color;
/// ST7735 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::{Rgba, RgbaImage, rgb565};
pub use command::{Command, Instruction};
pub use config::{Builder, Config, Geometry, Inversion, NATIVE_COLUMNS, NATIVE_ROWS};
pub use display::Display;
pub use error::{BuilderError, ConnectionError, Error, ImageError};
pub use interface::{
    CHUNK_SIZE, DisplayInterface, Interface, InterfaceError, NoPin, SpiConfig, SpiPort,
};

#[cfg(feature = "graphics")]
pub use graphics::GraphicDisplay;
