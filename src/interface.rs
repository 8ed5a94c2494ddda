//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the ST7735 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The ST7735 requires:
//! - SPI bus (MOSI + SCK, CS handled by the [`SpiDevice`])
//! - 1 to 3 GPIO pins:
//!   - **DC**: Data/Command select (output, required)
//!   - **RST**: Reset (output, active low, optional)
//!   - **BL**: Backlight enable (output, optional)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use st7735::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! // Create interface with SPI, DC pin and a backlight pin
//! let mut interface = Interface::new(MockSpi, MockPin).with_backlight(MockPin);
//!
//! // Send command
//! let _ = interface.send_command(0x11); // Sleep out
//!
//! // Send data
//! let _ = interface.send_data(&[0x01, 0x2C, 0x2D]);
//!
//! // Backlight writes never fail
//! interface.set_backlight(true);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::spi::{MODE_0, Mode, SpiDevice};

use crate::error::ConnectionError;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Largest single SPI write issued for a data payload
///
/// Longer payloads are split; the last chunk carries the remainder.
/// Keeps transfers inside the limits of common SPI drivers (spidev
/// defaults to a 4096 byte buffer).
pub const CHUNK_SIZE: usize = 4096;

/// Trait for hardware interface to ST7735 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., a parallel bus or a shared DC line), implement
/// this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the command byte over SPI in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes over SPI, split into [`CHUNK_SIZE`] writes
    ///
    /// The first failing chunk aborts the remaining ones.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// Does nothing when no reset line is wired. Otherwise:
    /// 1. Set RST pin low
    /// 2. Wait at least 10ms
    /// 3. Set RST pin high
    /// 4. Wait at least 10ms
    ///
    /// # Errors
    ///
    /// Returns an error if the reset pin cannot be driven. The pulse stops
    /// at the failing edge.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Switch the backlight on or off
    ///
    /// Does nothing when no backlight line is wired. Pin errors are not
    /// reported.
    fn set_backlight(&mut self, on: bool);
}

/// Errors that can occur at the interface level
///
/// Generic over SPI, DC pin and reset pin error types. The reset error is
/// [`Infallible`] when no reset pin is wired.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr, ResetErr = Infallible> {
    /// SPI communication error
    Spi(SpiErr),
    /// Data/Command pin error
    Pin(PinErr),
    /// Reset pin error
    Reset(ResetErr),
}

impl<SpiErr: Debug, PinErr: Debug, ResetErr: Debug> core::fmt::Display
    for InterfaceError<SpiErr, PinErr, ResetErr>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Reset(e) => write!(f, "Reset pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug, ResetErr: Debug> core::error::Error
    for InterfaceError<SpiErr, PinErr, ResetErr>
{
}

/// SPI bus parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpiConfig {
    /// Clock rate in Hz
    pub frequency_hz: u32,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Bits per word
    pub word_bits: u8,
}

impl SpiConfig {
    /// Known-good parameters for the ST7735: 4 MHz, mode 0, 8-bit words
    pub const ST7735: Self = Self {
        frequency_hz: 4_000_000,
        mode: MODE_0,
        word_bits: 8,
    };
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::ST7735
    }
}

/// An SPI port that can be opened with bus parameters
///
/// Implement this for the platform's SPI bus to let
/// [`Interface::connect`] configure it. Platforms whose [`SpiDevice`] is
/// already configured can use [`Interface::new`] directly.
pub trait SpiPort {
    /// Configured device handle
    type Device: SpiDevice;
    /// Error returned when the parameters are rejected
    type Error: Debug;

    /// Open the port with the given parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot run at the requested parameters.
    fn connect(self, config: SpiConfig) -> InterfaceResult<Self::Device, Self::Error>;
}

/// Placeholder for an unwired optional pin
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Hardware interface implementation for ST7735
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
/// Owns the SPI device and all pins for its lifetime.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`] ([`NoPin`] when unwired)
/// * `BL` - Backlight pin implementing [`OutputPin`] ([`NoPin`] when unwired)
#[derive(Debug)]
pub struct Interface<SPI, DC, RST = NoPin, BL = NoPin> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: Option<RST>,
    /// Backlight enable pin (active high)
    backlight: Option<BL>,
}

impl<SPI, DC> Interface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new Interface on an already configured SPI device
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self {
            spi,
            dc,
            rst: None,
            backlight: None,
        }
    }

    /// Open `port` with [`SpiConfig::ST7735`] and create a new Interface
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] if the port rejects the bus parameters.
    pub fn connect<P>(port: P, dc: DC) -> Result<Self, ConnectionError<P::Error>>
    where
        P: SpiPort<Device = SPI>,
    {
        let config = SpiConfig::ST7735;
        let spi = port.connect(config).map_err(ConnectionError)?;
        log::debug!(
            "st7735: connected at {} Hz, {} bit words",
            config.frequency_hz,
            config.word_bits
        );
        Ok(Self::new(spi, dc))
    }
}

impl<SPI, DC, RST, BL> Interface<SPI, DC, RST, BL> {
    /// Attach a hardware reset pin
    pub fn with_reset<R: OutputPin>(self, rst: R) -> Interface<SPI, DC, R, BL> {
        Interface {
            spi: self.spi,
            dc: self.dc,
            rst: Some(rst),
            backlight: self.backlight,
        }
    }

    /// Attach a backlight enable pin
    pub fn with_backlight<B: OutputPin>(self, backlight: B) -> Interface<SPI, DC, RST, B> {
        Interface {
            spi: self.spi,
            dc: self.dc,
            rst: self.rst,
            backlight: Some(backlight),
        }
    }

    /// Whether a reset pin is wired
    pub fn has_reset(&self) -> bool {
        self.rst.is_some()
    }

    /// Whether a backlight pin is wired
    pub fn has_backlight(&self) -> bool {
        self.backlight.is_some()
    }

    /// Give back the SPI device and pins
    pub fn release(self) -> (SPI, DC, Option<RST>, Option<BL>) {
        (self.spi, self.dc, self.rst, self.backlight)
    }
}

impl<SPI, DC, RST, BL> DisplayInterface for Interface<SPI, DC, RST, BL>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
    RST: OutputPin,
    BL: OutputPin,
{
    type Error = InterfaceError<SPI::Error, DC::Error, RST::Error>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        for chunk in data.chunks(CHUNK_SIZE) {
            self.spi.write(chunk).map_err(InterfaceError::Spi)?;
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(());
        };
        // Reset sequence: LOW -> wait 10ms -> HIGH -> wait 10ms
        rst.set_low().map_err(InterfaceError::Reset)?;
        delay.delay_ms(10);
        rst.set_high().map_err(InterfaceError::Reset)?;
        delay.delay_ms(10);
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) {
        let Some(backlight) = self.backlight.as_mut() else {
            return;
        };
        let result = if on {
            backlight.set_high()
        } else {
            backlight.set_low()
        };
        if result.is_err() {
            log::warn!("st7735: backlight pin write failed");
        }
    }
}
