//! Error types for the driver
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`ImageError`] - Pixel buffer does not match its declared size
//! - [`ConnectionError`] - The SPI port could not be opened
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use st7735::{BuilderError, Geometry};
//!
//! // Visible area does not fit into the controller RAM
//! let result = Geometry::new(128, 160, 26, 1);
//! assert!(matches!(result, Err(BuilderError::InvalidGeometry { .. })));
//! ```

use crate::command::Command;
use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// A single transaction failed. The current operation was aborted at
    /// that point and nothing after it was sent.
    Interface(I::Error),
    /// The power-on sequence aborted
    ///
    /// The controller is left in an indeterminate state. Re-run
    /// [`Display::init`](crate::Display::init) to recover.
    Init {
        /// Command whose write failed
        command: Command,
        /// Underlying interface error
        source: I::Error,
    },
    /// Window is empty or exceeds the visible area
    ///
    /// Coordinates are inclusive and must satisfy `x0 <= x1 < width`
    /// and `y0 <= y1 < height`.
    InvalidWindow {
        /// First column
        x0: u16,
        /// First row
        y0: u16,
        /// Last column
        x1: u16,
        /// Last row
        y1: u16,
    },
    /// Buffer is too small for the display
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::Init { command, .. } => {
                write!(f, "Initialization aborted at {command:?}")
            }
            Self::InvalidWindow { x0, y0, x1, y1 } => {
                write!(f, "Invalid window: ({x0}, {y0})-({x1}, {y1})")
            }
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Visible area is empty or does not fit into the controller RAM
    ///
    /// See [`Geometry::new()`](crate::config::Geometry::new) for constraints.
    InvalidGeometry {
        /// Visible width in pixels
        width: u8,
        /// Visible height in pixels
        height: u8,
        /// First visible column in controller RAM
        offset_left: u8,
        /// First visible row in controller RAM
        offset_top: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidGeometry {
                width,
                height,
                offset_left,
                offset_top,
            } => write!(
                f,
                "Invalid geometry {width}x{height} at ({offset_left}, {offset_top}) (controller RAM is {}x{})",
                crate::config::NATIVE_COLUMNS,
                crate::config::NATIVE_ROWS
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Pixel buffer length does not match the declared image size
#[derive(Debug, PartialEq, Eq)]
pub struct ImageError {
    /// Required buffer size in bytes (4 per pixel)
    pub required: usize,
    /// Provided buffer size in bytes
    pub provided: usize,
}

impl core::fmt::Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Image buffer too small: required {} bytes, provided {}",
            self.required, self.provided
        )
    }
}

impl core::error::Error for ImageError {}

/// The SPI port refused the requested bus parameters
#[derive(Debug)]
pub struct ConnectionError<E>(pub E);

impl<E: core::fmt::Debug> core::fmt::Display for ConnectionError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Could not connect to device: {:?}", self.0)
    }
}

impl<E: core::fmt::Debug> core::error::Error for ConnectionError<E> {}
