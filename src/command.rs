//! ST7735 command definitions
//!
//! This module defines the command opcodes used to drive the ST7735 TFT
//! controller and the [`Instruction`] unit the initialization sequence is
//! built from. Commands are sent over SPI with the DC pin low, their
//! parameters with the DC pin high.
//!
//! ## Command Structure
//!
//! All register writes follow the pattern:
//! 1. Set DC low (command mode)
//! 2. Send command byte
//! 3. Set DC high (data mode)
//! 4. Send parameter bytes (if any)
//! 5. Wait the settle time the command requires (if any)
//!
//! ## Example
//!
//! ```rust,no_run
//! use st7735::{Command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = Interface::new(MockSpi, MockPin);
//! // Column address set for a full 80 pixel wide window at offset 26
//! let _ = interface.send_command(Command::ColumnAddressSet.opcode());
//! let _ = interface.send_data(&[0x00, 26, 0x00, 105]);
//! ```

/// ST7735 command opcodes
///
/// Only the commands this driver issues are listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Software reset (0x01)
    ///
    /// Resets all registers to their defaults. Requires 120ms+ before the
    /// next command; the init sequence waits 150ms.
    SoftwareReset = 0x01,
    /// Sleep in (0x10)
    ///
    /// Enters minimum power consumption mode. The display RAM is kept.
    SleepIn = 0x10,
    /// Sleep out (0x11)
    ///
    /// Leaves sleep mode. The booster and oscillator need time to settle;
    /// the init sequence waits 500ms.
    SleepOut = 0x11,
    /// Normal display mode on (0x13)
    NormalDisplayOn = 0x13,
    /// Display inversion off (0x20)
    InversionOff = 0x20,
    /// Display inversion on (0x21)
    InversionOn = 0x21,
    /// Display on (0x29)
    DisplayOn = 0x29,
    /// Column address set (0x2A)
    ///
    /// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
    ColumnAddressSet = 0x2A,
    /// Row address set (0x2B)
    ///
    /// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
    RowAddressSet = 0x2B,
    /// Memory write (0x2C)
    ///
    /// Arms the controller for pixel data. Every data byte that follows is
    /// written to the current window, auto-incrementing the address counter.
    MemoryWrite = 0x2C,
    /// Memory data access control (0x36)
    ///
    /// Requires 1 byte selecting row/column order, refresh direction and
    /// RGB/BGR order.
    MemoryAccessControl = 0x36,
    /// Interface pixel format (0x3A)
    ///
    /// Requires 1 byte: 0x03 = 12 bit, 0x05 = 16 bit, 0x06 = 18 bit
    ColorMode = 0x3A,
    /// Frame rate control in normal mode (0xB1)
    ///
    /// Requires 3 bytes: [RTNA, FPA, BPA]
    FrameRateControl1 = 0xB1,
    /// Frame rate control in idle mode (0xB2)
    ///
    /// Requires 3 bytes: [RTNB, FPB, BPB]
    FrameRateControl2 = 0xB2,
    /// Frame rate control in partial mode (0xB3)
    ///
    /// Requires 6 bytes: dot inversion triple then column inversion triple
    FrameRateControl3 = 0xB3,
    /// Display inversion control (0xB4)
    InversionControl = 0xB4,
    /// Power control 1 (0xC0)
    PowerControl1 = 0xC0,
    /// Power control 2 (0xC1)
    PowerControl2 = 0xC1,
    /// Power control 4, partial mode (0xC3)
    PowerControl4 = 0xC3,
    /// Power control 5, idle mode (0xC4)
    PowerControl5 = 0xC4,
    /// VCOM control 1 (0xC5)
    VcomControl1 = 0xC5,
    /// Positive gamma correction (0xE0)
    ///
    /// Requires 16 bytes.
    GammaPositive = 0xE0,
    /// Negative gamma correction (0xE1)
    ///
    /// Requires 16 bytes.
    GammaNegative = 0xE1,
}

impl Command {
    /// Get the raw opcode byte
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.opcode()
    }
}

/// A single register write: command, parameters and settle time
///
/// Instructions are executed strictly in order. The controller's internal
/// state machine depends on it (reset before sleep-out, sleep-out before any
/// other configuration).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// Command to send
    pub command: Command,
    /// Parameter bytes sent in data mode (may be empty)
    pub params: &'a [u8],
    /// Time to wait after the write, in milliseconds
    pub delay_ms: u32,
}

impl<'a> Instruction<'a> {
    /// Create an instruction with parameters and no settle time
    pub const fn new(command: Command, params: &'a [u8]) -> Self {
        Self {
            command,
            params,
            delay_ms: 0,
        }
    }

    /// Create a parameterless instruction followed by a settle time
    pub const fn with_delay(command: Command, delay_ms: u32) -> Self {
        Self {
            command,
            params: &[],
            delay_ms,
        }
    }
}

// Fixed register values for the power-on sequence

/// Frame rate for normal and idle mode: fosc / (1 * 2 + 40) * (LINE + 0x2C + 0x2D)
pub const FRAME_RATE: [u8; 3] = [0x01, 0x2C, 0x2D];

/// Frame rate for partial mode, dot inversion then column inversion
pub const FRAME_RATE_PARTIAL: [u8; 6] = [0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D];

/// Display inversion control: no inversion in any mode
pub const INVERSION_CONTROL: [u8; 1] = [0x07];

/// Power control 1: -4.6V, auto mode
pub const POWER_CONTROL1: [u8; 3] = [0xA2, 0x02, 0x84];

/// Power control 2: VGH25 = 2.4C, VGSEL = -10, VGH = 3 * AVDD
pub const POWER_CONTROL2: [u8; 2] = [0x0A, 0x00];

/// Power control 4: BCLK/2, opamp current small and medium low
pub const POWER_CONTROL4: [u8; 2] = [0x8A, 0x2A];

/// Power control 5
pub const POWER_CONTROL5: [u8; 2] = [0x8A, 0xEE];

/// VCOM control 1
pub const VCOM_CONTROL1: [u8; 1] = [0x0E];

/// Memory access control: MY | MX | BGR
///
/// Row and column address order are both mirrored and subpixels are in
/// BGR order. Row/column exchange (MV) stays clear. Pixel data is streamed
/// column-major under this setting.
pub const MEMORY_ACCESS_CONTROL: [u8; 1] = [0xC8];

/// Interface pixel format: 16 bits per pixel
pub const COLOR_MODE_16BIT: [u8; 1] = [0x05];

/// Positive gamma correction curve
pub const GAMMA_POSITIVE: [u8; 16] = [
    0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D, 0x29, 0x25, 0x2B, 0x39, 0x00, 0x01, 0x03, 0x10,
];

/// Negative gamma correction curve
pub const GAMMA_NEGATIVE: [u8; 16] = [
    0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D, 0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00, 0x02, 0x10,
];

/// Settle time after software reset
pub const SOFTWARE_RESET_DELAY_MS: u32 = 150;

/// Settle time after sleep out
pub const SLEEP_OUT_DELAY_MS: u32 = 500;

/// Settle time after normal display on and display on
pub const DISPLAY_ON_DELAY_MS: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcodes_match_datasheet() {
        assert_eq!(Command::SoftwareReset.opcode(), 0x01);
        assert_eq!(Command::SleepIn.opcode(), 0x10);
        assert_eq!(Command::SleepOut.opcode(), 0x11);
        assert_eq!(Command::ColumnAddressSet.opcode(), 0x2A);
        assert_eq!(Command::RowAddressSet.opcode(), 0x2B);
        assert_eq!(Command::MemoryWrite.opcode(), 0x2C);
        assert_eq!(Command::MemoryAccessControl.opcode(), 0x36);
        assert_eq!(u8::from(Command::GammaNegative), 0xE1);
    }

    #[test]
    fn test_instruction_constructors() {
        let instr = Instruction::new(Command::ColorMode, &COLOR_MODE_16BIT);
        assert_eq!(instr.params, &[0x05]);
        assert_eq!(instr.delay_ms, 0);

        let instr = Instruction::with_delay(Command::SleepOut, SLEEP_OUT_DELAY_MS);
        assert!(instr.params.is_empty());
        assert_eq!(instr.delay_ms, 500);
    }

    #[test]
    fn test_memory_access_control_bits() {
        let madctl = MEMORY_ACCESS_CONTROL[0];
        // MY, MX and BGR set
        assert_eq!(madctl & 0x80, 0x80);
        assert_eq!(madctl & 0x40, 0x40);
        assert_eq!(madctl & 0x08, 0x08);
        // MV clear
        assert_eq!(madctl & 0x20, 0);
    }
}
