//! RGBA colors and RGB565 packing
//!
//! The controller is configured for 16 bits per pixel (5-6-5). Each pixel
//! is sent as two bytes, most significant byte first.
//!
//! | Bits  | Channel | Source bits |
//! |-------|---------|-------------|
//! | 15-11 | Red     | r[7:3]      |
//! | 10-5  | Green   | g[7:2]      |
//! | 4-0   | Blue    | b[7:3]      |
//!
//! The low bits of each channel are dropped. There is no rounding or
//! dithering.
//!
//! ## Example
//!
//! ```
//! use st7735::{Rgba, rgb565};
//!
//! assert_eq!(rgb565(255, 0, 0), 0xF800);
//! assert_eq!(Rgba::new(0, 0, 255, 0).to_rgb565(), 0x001F);
//! assert_eq!(Rgba::new(0, 255, 0, 0).to_be_bytes(), [0x07, 0xE0]);
//! ```

use crate::error::ImageError;

/// Pack 8-bit channels into an RGB565 value
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    (((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3)
}

/// An 8-bit per channel RGBA color
///
/// Alpha is carried along but ignored when packing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a `0xRRGGBB` value
    ///
    /// ```
    /// use st7735::Rgba;
    ///
    /// assert_eq!(Rgba::from_rgb(0x12_34_56), Rgba::new(0x12, 0x34, 0x56, 0xFF));
    /// ```
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 0xFF,
        }
    }

    /// Pack into the controller's RGB565 format
    pub const fn to_rgb565(self) -> u16 {
        rgb565(self.r, self.g, self.b)
    }

    /// Pack into RGB565 as transmitted on the wire
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.to_rgb565().to_be_bytes()
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb888> for Rgba {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb888) -> Self {
        use embedded_graphics_core::pixelcolor::RgbColor;
        Self::new(color.r(), color.g(), color.b(), 0xFF)
    }
}

/// Borrowed RGBA image
///
/// Pixels are stored row-major, 4 bytes each in `[r, g, b, a]` order.
/// Images are only read for the duration of a single
/// [`Display::display_image`](crate::Display::display_image) call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RgbaImage<'a> {
    width: u16,
    height: u16,
    data: &'a [u8],
}

impl<'a> RgbaImage<'a> {
    /// Bytes per stored pixel
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Wrap a pixel buffer
    ///
    /// Extra bytes past `width * height * 4` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] if `data` is shorter than `width * height * 4`.
    pub fn new(width: u16, height: u16, data: &'a [u8]) -> Result<Self, ImageError> {
        let required = usize::from(width) * usize::from(height) * Self::BYTES_PER_PIXEL;
        if data.len() < required {
            return Err(ImageError {
                required,
                provided: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Color of the pixel at (x, y), or `None` outside the image
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index =
            (usize::from(y) * usize::from(self.width) + usize::from(x)) * Self::BYTES_PER_PIXEL;
        match self.data.get(index..index + Self::BYTES_PER_PIXEL) {
            Some(&[r, g, b, a]) => Some(Rgba::new(r, g, b, a)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_reference_values() {
        assert_eq!(rgb565(0, 0, 0), 0x0000);
        assert_eq!(rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(rgb565(255, 0, 0), 0xF800);
        assert_eq!(rgb565(0, 255, 0), 0x07E0);
        assert_eq!(rgb565(0, 0, 255), 0x001F);
    }

    #[test]
    fn test_rgb565_keeps_most_significant_bits() {
        for value in 0..=255u8 {
            let red = rgb565(value, 0, 0);
            let green = rgb565(0, value, 0);
            let blue = rgb565(0, 0, value);
            assert_eq!(red >> 11, u16::from(value >> 3));
            assert_eq!((green >> 5) & 0x3F, u16::from(value >> 2));
            assert_eq!(blue & 0x1F, u16::from(value >> 3));
        }
    }

    #[test]
    fn test_rgb565_channels_do_not_overlap() {
        let packed = rgb565(0b1010_1111, 0b0101_0011, 0b1100_0111);
        assert_eq!(packed >> 11, 0b10101);
        assert_eq!((packed >> 5) & 0x3F, 0b010100);
        assert_eq!(packed & 0x1F, 0b11000);
    }

    #[test]
    fn test_alpha_is_ignored() {
        assert_eq!(
            Rgba::new(10, 20, 30, 0).to_rgb565(),
            Rgba::new(10, 20, 30, 255).to_rgb565()
        );
    }

    #[test]
    fn test_image_too_small_returns_error() {
        let data = [0u8; 15];
        let result = RgbaImage::new(2, 2, &data);
        assert_eq!(
            result,
            Err(ImageError {
                required: 16,
                provided: 15
            })
        );
    }

    #[test]
    fn test_image_pixel_lookup() {
        #[rustfmt::skip]
        let data = [
            1, 2, 3, 4,    5, 6, 7, 8,
            9, 10, 11, 12, 13, 14, 15, 16,
        ];
        let image = RgbaImage::new(2, 2, &data).unwrap();
        assert_eq!(image.pixel(1, 0), Some(Rgba::new(5, 6, 7, 8)));
        assert_eq!(image.pixel(0, 1), Some(Rgba::new(9, 10, 11, 12)));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.pixel(0, 2), None);
    }
}
