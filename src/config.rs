//! Display configuration types and builder

pub use crate::error::BuilderError;

use crate::command::Command;

/// Number of columns in the ST7735 frame memory
pub const NATIVE_COLUMNS: u8 = 132;

/// Number of rows in the ST7735 frame memory
pub const NATIVE_ROWS: u8 = 162;

/// Visible width of the common 0.96" module
pub const DEFAULT_WIDTH: u8 = 80;

/// Visible height of the common 0.96" module
pub const DEFAULT_HEIGHT: u8 = 160;

/// Placement of the visible panel inside the controller's 132x162 RAM
///
/// Physical modules are usually smaller than the frame memory and wired to
/// a centered slice of it. Every window the driver sets is shifted by the
/// offsets.
///
/// Only [`Geometry::new`], [`Geometry::centered`] and `Default` construct a
/// geometry, so the visible area always lies inside the controller RAM:
///
/// ```compile_fail
/// use st7735::Geometry;
///
/// let geometry = Geometry {
///     width: 200,
///     height: 160,
///     offset_left: 100,
///     offset_top: 1,
/// };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    width: u8,
    height: u8,
    offset_left: u8,
    offset_top: u8,
}

impl Geometry {
    /// Create new geometry with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidGeometry` if:
    /// - width == 0 or height == 0
    /// - offset_left + width > NATIVE_COLUMNS (132)
    /// - offset_top + height > NATIVE_ROWS (162)
    pub fn new(
        width: u8,
        height: u8,
        offset_left: u8,
        offset_top: u8,
    ) -> Result<Self, BuilderError> {
        let fits_columns = u16::from(offset_left) + u16::from(width) <= u16::from(NATIVE_COLUMNS);
        let fits_rows = u16::from(offset_top) + u16::from(height) <= u16::from(NATIVE_ROWS);
        if width == 0 || height == 0 || !fits_columns || !fits_rows {
            return Err(BuilderError::InvalidGeometry {
                width,
                height,
                offset_left,
                offset_top,
            });
        }
        Ok(Self {
            width,
            height,
            offset_left,
            offset_top,
        })
    }

    /// Visible area centered in the controller RAM
    ///
    /// # Errors
    ///
    /// Same constraints as [`Geometry::new`].
    pub fn centered(width: u8, height: u8) -> Result<Self, BuilderError> {
        let offset_left = NATIVE_COLUMNS.saturating_sub(width) / 2;
        let offset_top = NATIVE_ROWS.saturating_sub(height) / 2;
        Self::new(width, height, offset_left, offset_top)
    }

    /// Visible width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Visible height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// First visible column in controller RAM
    pub const fn offset_left(&self) -> u8 {
        self.offset_left
    }

    /// First visible row in controller RAM
    pub const fn offset_top(&self) -> u8 {
        self.offset_top
    }

    /// Number of visible pixels
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Bytes needed for a full frame of RGB565 pixels
    pub fn buffer_size(&self) -> usize {
        self.pixel_count() * 2
    }
}

impl Default for Geometry {
    /// 80x160 panel centered in the 132x162 RAM (offsets 26 and 1)
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            offset_left: (NATIVE_COLUMNS - DEFAULT_WIDTH) / 2,
            offset_top: (NATIVE_ROWS - DEFAULT_HEIGHT) / 2,
        }
    }
}

/// Display inversion register written during initialization
///
/// The 80x160 IPS modules show true colors with inversion on, which is the
/// default. Panels with TN glass usually want [`Inversion::Off`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Inversion {
    /// Display inversion on (INVON)
    #[default]
    On,
    /// Display inversion off (INVOFF)
    Off,
}

impl Inversion {
    /// Command selecting this inversion state
    pub const fn command(self) -> Command {
        match self {
            Self::On => Command::InversionOn,
            Self::Off => Command::InversionOff,
        }
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config, or `Config::default()` for the
/// 80x160 module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Visible panel geometry
    pub geometry: Geometry,
    /// Display inversion state
    pub inversion: Inversion,
}

impl Config {
    /// Inversion command written during initialization
    pub fn inversion_command(&self) -> Command {
        self.inversion.command()
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use st7735::{Builder, Geometry, Inversion};
///
/// let geometry = match Geometry::new(128, 160, 2, 1) {
///     Ok(geometry) => geometry,
///     Err(_) => return,
/// };
/// let config = Builder::new()
///     .geometry(geometry)
///     .inversion(Inversion::Off)
///     .build();
/// let _ = config;
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Visible panel geometry
    geometry: Geometry,
    /// Display inversion state
    inversion: Inversion,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel geometry
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the display inversion state
    pub fn inversion(mut self, inversion: Inversion) -> Self {
        self.inversion = inversion;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            geometry: self.geometry,
            inversion: self.inversion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_is_centered_80x160() {
        let geometry = Geometry::default();
        assert_eq!(geometry.width(), 80);
        assert_eq!(geometry.height(), 160);
        assert_eq!(geometry.offset_left(), 26);
        assert_eq!(geometry.offset_top(), 1);
    }

    #[test]
    fn test_geometry_full_ram_is_valid() {
        assert!(Geometry::new(132, 162, 0, 0).is_ok());
    }

    #[test]
    fn test_geometry_zero_width_returns_error() {
        let result = Geometry::new(0, 160, 0, 0);
        assert!(matches!(result, Err(BuilderError::InvalidGeometry { width: 0, .. })));
    }

    #[test]
    fn test_geometry_columns_overflow_returns_error() {
        assert!(Geometry::new(80, 160, 53, 1).is_err());
        assert!(Geometry::new(80, 160, 52, 1).is_ok());
    }

    #[test]
    fn test_geometry_rows_overflow_returns_error() {
        assert!(Geometry::new(80, 160, 26, 3).is_err());
        assert!(Geometry::new(80, 160, 26, 2).is_ok());
    }

    #[test]
    fn test_geometry_centered() {
        assert_eq!(Geometry::centered(80, 160), Ok(Geometry::default()));
        let geometry = Geometry::centered(128, 160).unwrap();
        assert_eq!((geometry.offset_left(), geometry.offset_top()), (2, 1));
        assert!(Geometry::centered(140, 160).is_err());
    }

    #[test]
    fn test_buffer_size() {
        assert_eq!(Geometry::default().buffer_size(), 80 * 160 * 2);
    }

    #[test]
    fn test_geometry_rejects_area_past_controller_ram() {
        let result = Geometry::new(200, 160, 100, 1);
        assert_eq!(
            result,
            Err(BuilderError::InvalidGeometry {
                width: 200,
                height: 160,
                offset_left: 100,
                offset_top: 1
            })
        );
    }

    #[test]
    fn test_inversion_command_matches_register() {
        let config = Builder::new().build();
        assert_eq!(config.inversion, Inversion::On);
        assert_eq!(config.inversion_command(), Command::InversionOn);

        let config = Builder::new().inversion(Inversion::Off).build();
        assert_eq!(config.inversion_command(), Command::InversionOff);
    }
}
