//! Graphics support via embedded-graphics
//!
//! This module provides the [`GraphicDisplay`] struct which wraps [`Display`]
//! and implements the [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem.
//!
//! Drawing only touches the framebuffer. Call [`GraphicDisplay::flush`] to
//! send it to the panel. The framebuffer holds RGB565 big-endian pixels in
//! the column-major order the controller expects, so a flush is a single
//! full-window write.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use st7735::GraphicDisplay;
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use st7735::{Config, Display, Interface};
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
//! # let interface = Interface::new(MockSpi, MockPin);
//! # let config = Config::default();
//! # let display_driver = Display::new(interface, config);
//! let buffer = vec![0u8; display_driver.geometry().buffer_size()];
//! let mut display = match GraphicDisplay::try_new(display_driver, buffer) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//!
//! display.clear_buffer(Rgb565::BLACK);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(20, 80), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb565::WHITE, 2))
//!     .draw(&mut display);
//!
//! // Send the framebuffer to the panel
//! let _ = display.flush();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{IntoStorage, Rgb565},
    prelude::Pixel,
};

use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Display with an RGB565 framebuffer
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B` - Buffer type implementing `AsMut<[u8]>`, at least
///   [`Geometry::buffer_size`](crate::Geometry::buffer_size) bytes
pub struct GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsMut<[u8]>,
{
    /// The underlying display driver
    display: Display<I>,
    /// Column-major RGB565 framebuffer
    buffer: B,
}

type GraphicsResult<I> = core::result::Result<(), Error<I>>;
type GraphicsNewResult<I, T> = core::result::Result<T, Error<I>>;

impl<I, B> GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsMut<[u8]>,
{
    /// Create a new GraphicDisplay
    ///
    /// # Panics
    ///
    /// Panics if the buffer is smaller than the geometry's
    /// [`buffer_size`](crate::Geometry::buffer_size).
    pub fn new(display: Display<I>, mut buffer: B) -> Self {
        let required = display.geometry().buffer_size();
        assert!(
            buffer.as_mut().len() >= required,
            "buffer too small: required {} bytes, got {}",
            required,
            buffer.as_mut().len()
        );
        Self { display, buffer }
    }

    /// Try to create a new GraphicDisplay, returning an error if the buffer is too small
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if the buffer is smaller than the
    /// geometry's [`buffer_size`](crate::Geometry::buffer_size).
    pub fn try_new(display: Display<I>, mut buffer: B) -> GraphicsNewResult<I, Self> {
        let required = display.geometry().buffer_size();
        let provided = buffer.as_mut().len();
        if provided < required {
            return Err(Error::BufferTooSmall { required, provided });
        }
        Ok(Self { display, buffer })
    }

    /// Fill the framebuffer with one color
    pub fn clear_buffer(&mut self, color: Rgb565) {
        let bytes = color.into_storage().to_be_bytes();
        for pixel in self.buffer.as_mut().chunks_exact_mut(2) {
            pixel.copy_from_slice(&bytes);
        }
    }

    /// Send the framebuffer to the panel
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if there's a communication error.
    pub fn flush(&mut self) -> GraphicsResult<I> {
        let required = self.display.geometry().buffer_size();
        let buffer = self.buffer.as_mut();
        self.display.display(&buffer[..required])
    }

    /// Get a reference to the underlying display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Get a mutable reference to the underlying display
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Give back the display and the framebuffer
    pub fn release(self) -> (Display<I>, B) {
        (self.display, self.buffer)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb565) {
        let height = u32::from(self.display.geometry().height());
        // Column-major: one column of `height` pixels after another
        let index = ((x * height + y) * 2) as usize;
        if let Some(pixel) = self.buffer.as_mut().get_mut(index..index + 2) {
            pixel.copy_from_slice(&color.into_storage().to_be_bytes());
        }
    }
}

impl<I, B> DrawTarget for GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsMut<[u8]>,
{
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            self.set_pixel(x, y, color);
        }

        Ok(())
    }
}

impl<I, B> OriginDimensions for GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let geometry = self.display.geometry();
        Size::new(u32::from(geometry.width()), u32::from(geometry.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use alloc::vec::Vec;
    use embedded_graphics_core::pixelcolor::RgbColor;
    use embedded_hal::delay::DelayNs;

    #[derive(Debug, Default)]
    struct MockInterface {
        commands: Vec<u8>,
        data: Vec<Vec<u8>>,
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.commands.push(command);
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.data.push(data.to_vec());
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_backlight(&mut self, _on: bool) {}
    }

    fn test_display() -> Display<MockInterface> {
        Display::new(MockInterface::default(), Config::default())
    }

    #[test]
    fn test_graphic_display_size_matches_geometry() {
        let display = test_display();
        let buffer = alloc::vec![0u8; 80 * 160 * 2];
        let gd = GraphicDisplay::new(display, buffer);
        assert_eq!(gd.size(), Size::new(80, 160));
    }

    #[test]
    fn test_try_new_small_buffer_returns_error() {
        let display = test_display();
        let buffer = alloc::vec![0u8; 80 * 160 * 2 - 1];
        let result = GraphicDisplay::try_new(display, buffer);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 25600,
                provided: 25599
            })
        ));
    }

    #[test]
    #[should_panic(expected = "buffer too small")]
    fn test_new_panics_on_small_buffer() {
        let display = test_display();
        let _ = GraphicDisplay::new(display, alloc::vec![0u8; 10]);
    }

    #[test]
    fn test_pixels_are_stored_column_major() {
        let mut gd = GraphicDisplay::new(test_display(), alloc::vec![0u8; 80 * 160 * 2]);
        let _ = gd.draw_iter([
            Pixel(Point::new(0, 1), Rgb565::RED),
            Pixel(Point::new(1, 0), Rgb565::BLUE),
        ]);
        let (_, buffer) = gd.release();
        // (0, 1) is the second pixel of the first column
        assert_eq!(&buffer[2..4], &[0xF8, 0x00]);
        // (1, 0) starts the second column
        assert_eq!(&buffer[320..322], &[0x00, 0x1F]);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_ignored() {
        let mut gd = GraphicDisplay::new(test_display(), alloc::vec![0u8; 80 * 160 * 2]);
        let _ = gd.draw_iter([
            Pixel(Point::new(-1, 0), Rgb565::WHITE),
            Pixel(Point::new(80, 0), Rgb565::WHITE),
            Pixel(Point::new(0, 160), Rgb565::WHITE),
        ]);
        let (_, buffer) = gd.release();
        assert!(buffer.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_flush_streams_full_window() {
        // Larger buffers are allowed; only the frame is sent
        let mut gd = GraphicDisplay::new(test_display(), alloc::vec![0u8; 80 * 160 * 2 + 16]);
        gd.clear_buffer(Rgb565::GREEN);
        gd.flush().unwrap();

        let interface = gd.display().interface();
        assert_eq!(interface.commands, alloc::vec![0x2A, 0x2B, 0x2C]);
        assert_eq!(interface.data[0], alloc::vec![0, 26, 0, 105]);
        assert_eq!(interface.data[1], alloc::vec![0, 1, 0, 160]);
        assert_eq!(interface.data[2].len(), 80 * 160 * 2);
        assert_eq!(&interface.data[2][..2], &[0x07, 0xE0]);
    }
}
