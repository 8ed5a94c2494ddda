//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::color::{Rgba, RgbaImage};
use crate::command::{
    COLOR_MODE_16BIT, Command, DISPLAY_ON_DELAY_MS, FRAME_RATE, FRAME_RATE_PARTIAL,
    GAMMA_NEGATIVE, GAMMA_POSITIVE, INVERSION_CONTROL, Instruction, MEMORY_ACCESS_CONTROL,
    POWER_CONTROL1, POWER_CONTROL2, POWER_CONTROL4, POWER_CONTROL5, SLEEP_OUT_DELAY_MS,
    SOFTWARE_RESET_DELAY_MS, VCOM_CONTROL1,
};
use crate::config::{Config, Geometry};
use crate::error::Error;
use crate::interface::{CHUNK_SIZE, DisplayInterface};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Encode an inclusive address range as CASET/RASET parameters
fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [start_hi, start_lo] = start.to_be_bytes();
    let [end_hi, end_lo] = end.to_be_bytes();
    [start_hi, start_lo, end_hi, end_lo]
}

/// Core display driver for ST7735
///
/// Owns the hardware interface for its whole lifetime. Every operation is a
/// blocking sequence of bus writes; share a `Display` between callers only
/// behind a mutex.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`init`](Self::init) is called.
    pub fn new(interface: I, config: Config) -> Self {
        Self { interface, config }
    }

    /// Pulse the hardware reset line, if one is wired
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if the reset pin cannot be driven.
    pub fn hardware_reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("st7735: hardware reset");
        self.interface.reset(delay).map_err(Error::Interface)
    }

    /// Run the power-on register sequence
    ///
    /// Software reset, sleep out, frame rate, power, inversion, memory
    /// access, color mode, address window, gamma, then display on. The
    /// settle delays (150ms, 500ms, 100ms, 100ms) are blocking waits on
    /// `delay`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Init`] naming the command whose write failed. Nothing
    /// after it is sent.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let geometry = self.config.geometry;
        let left = u16::from(geometry.offset_left());
        let top = u16::from(geometry.offset_top());
        let columns = address_range(left, (left + u16::from(geometry.width())).saturating_sub(1));
        let rows = address_range(top, (top + u16::from(geometry.height())).saturating_sub(1));

        let sequence = [
            Instruction::with_delay(Command::SoftwareReset, SOFTWARE_RESET_DELAY_MS),
            Instruction::with_delay(Command::SleepOut, SLEEP_OUT_DELAY_MS),
            Instruction::new(Command::FrameRateControl1, &FRAME_RATE),
            Instruction::new(Command::FrameRateControl2, &FRAME_RATE),
            Instruction::new(Command::FrameRateControl3, &FRAME_RATE_PARTIAL),
            Instruction::new(Command::InversionControl, &INVERSION_CONTROL),
            Instruction::new(Command::PowerControl1, &POWER_CONTROL1),
            Instruction::new(Command::PowerControl2, &POWER_CONTROL2),
            Instruction::new(Command::PowerControl4, &POWER_CONTROL4),
            Instruction::new(Command::PowerControl5, &POWER_CONTROL5),
            Instruction::new(Command::VcomControl1, &VCOM_CONTROL1),
            Instruction::new(self.config.inversion_command(), &[]),
            Instruction::new(Command::MemoryAccessControl, &MEMORY_ACCESS_CONTROL),
            Instruction::new(Command::ColorMode, &COLOR_MODE_16BIT),
            Instruction::new(Command::ColumnAddressSet, &columns),
            Instruction::new(Command::RowAddressSet, &rows),
            Instruction::new(Command::GammaPositive, &GAMMA_POSITIVE),
            Instruction::new(Command::GammaNegative, &GAMMA_NEGATIVE),
            Instruction::with_delay(Command::NormalDisplayOn, DISPLAY_ON_DELAY_MS),
            Instruction::with_delay(Command::DisplayOn, DISPLAY_ON_DELAY_MS),
        ];

        log::debug!(
            "st7735: init {}x{} at ({}, {})",
            geometry.width(),
            geometry.height(),
            geometry.offset_left(),
            geometry.offset_top()
        );
        self.run(&sequence, delay)?;
        log::debug!("st7735: init complete");
        Ok(())
    }

    /// Execute instructions in order, stopping at the first failure
    fn run<D: DelayNs>(&mut self, sequence: &[Instruction<'_>], delay: &mut D) -> DisplayResult<I> {
        for instruction in sequence {
            let command = instruction.command;
            log::trace!("st7735: {:?} {:02X?}", command, instruction.params);
            self.interface
                .send_command(command.opcode())
                .map_err(|source| Error::Init { command, source })?;
            if !instruction.params.is_empty() {
                self.interface
                    .send_data(instruction.params)
                    .map_err(|source| Error::Init { command, source })?;
            }
            if instruction.delay_ms > 0 {
                delay.delay_ms(instruction.delay_ms);
            }
        }
        Ok(())
    }

    /// Set the drawing window and arm the controller for pixel data
    ///
    /// Coordinates are inclusive and relative to the visible panel; the
    /// configured offsets are added before they are sent. Since a
    /// [`Geometry`] always fits the controller RAM, a window inside the
    /// visible panel never addresses past it. Pixel bytes sent afterwards
    /// fill the window column by column.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` if:
    /// - x0 > x1 or y0 > y1
    /// - x1 >= width or y1 >= height
    ///
    /// Returns `Error::Interface` if a write fails. Do not stream pixels
    /// after a failed window set.
    pub fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> DisplayResult<I> {
        let geometry = self.config.geometry;
        if x0 > x1
            || y0 > y1
            || x1 >= u16::from(geometry.width())
            || y1 >= u16::from(geometry.height())
        {
            return Err(Error::InvalidWindow { x0, y0, x1, y1 });
        }

        let left = u16::from(geometry.offset_left());
        let top = u16::from(geometry.offset_top());
        log::trace!("st7735: window ({x0}, {y0})-({x1}, {y1})");

        self.send_command(Command::ColumnAddressSet)?;
        self.send_data(&address_range(x0 + left, x1 + left))?;

        self.send_command(Command::RowAddressSet)?;
        self.send_data(&address_range(y0 + top, y1 + top))?;

        self.send_command(Command::MemoryWrite)
    }

    /// Draw an RGBA image with its top-left corner at (x, y)
    ///
    /// Pixels outside the visible panel are clipped. An image that lies
    /// entirely outside sends nothing at all.
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if a write fails. Pixels already sent stay
    /// on the panel.
    pub fn display_image(&mut self, x: i32, y: i32, image: &RgbaImage<'_>) -> DisplayResult<I> {
        let geometry = self.config.geometry;
        let left = x.max(0);
        let top = y.max(0);
        let right = x
            .saturating_add(i32::from(image.width()))
            .min(i32::from(geometry.width()));
        let bottom = y
            .saturating_add(i32::from(image.height()))
            .min(i32::from(geometry.height()));

        if left >= right || top >= bottom {
            log::trace!("st7735: image at ({x}, {y}) is outside the panel");
            return Ok(());
        }

        // Clipped bounds lie inside the panel, so they fit in u16
        let (left, top, right, bottom) = (left as u16, top as u16, right as u16, bottom as u16);
        self.set_window(left, top, right - 1, bottom - 1)?;

        // Column-major to match MEMORY_ACCESS_CONTROL
        let pixels = (left..right).flat_map(|column| {
            (top..bottom).map(move |row| {
                let src_x = (i32::from(column) - x) as u16;
                let src_y = (i32::from(row) - y) as u16;
                let pixel = image.pixel(src_x, src_y);
                debug_assert!(
                    pixel.is_some(),
                    "clipped pixel ({src_x}, {src_y}) is outside the image"
                );
                pixel.unwrap_or_default().to_be_bytes()
            })
        });
        self.stream_pixels(pixels)
    }

    /// Stream raw pixel bytes into the full visible area
    ///
    /// `data` is sent verbatim: RGB565, big-endian, column-major,
    /// [`Geometry::buffer_size`] bytes for a full frame.
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if a write fails.
    pub fn display(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.set_full_window()?;
        self.send_data(data)
    }

    /// Fill the full visible area with one color
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if a write fails.
    pub fn clear(&mut self, color: Rgba) -> DisplayResult<I> {
        self.set_full_window()?;
        let pixel = color.to_be_bytes();
        let count = self.config.geometry.pixel_count();
        self.stream_pixels(core::iter::repeat_n(pixel, count))
    }

    /// Enter sleep mode
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if the write fails.
    pub fn sleep(&mut self) -> DisplayResult<I> {
        self.send_command(Command::SleepIn)
    }

    /// Enter sleep mode, leaving the backlight as it is
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if the write fails.
    pub fn powersave(&mut self) -> DisplayResult<I> {
        log::debug!("st7735: powersave");
        self.sleep()
    }

    /// Switch the backlight off, then enter sleep mode
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if the write fails.
    pub fn halt(&mut self) -> DisplayResult<I> {
        log::debug!("st7735: halt");
        self.set_backlight(false);
        self.sleep()
    }

    /// Switch the backlight on or off
    ///
    /// Does nothing when no backlight pin is wired.
    pub fn set_backlight(&mut self, on: bool) {
        self.interface.set_backlight(on);
    }

    /// Get panel geometry
    pub fn geometry(&self) -> &Geometry {
        &self.config.geometry
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the hardware interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Give back the hardware interface
    pub fn release(self) -> I {
        self.interface
    }

    fn set_full_window(&mut self) -> DisplayResult<I> {
        let geometry = self.config.geometry;
        self.set_window(
            0,
            0,
            u16::from(geometry.width()).saturating_sub(1),
            u16::from(geometry.height()).saturating_sub(1),
        )
    }

    /// Pack pixels into a stack buffer and send it in [`CHUNK_SIZE`] pieces
    fn stream_pixels<P>(&mut self, pixels: P) -> DisplayResult<I>
    where
        P: IntoIterator<Item = [u8; 2]>,
    {
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut len = 0;
        for pixel in pixels {
            chunk[len..len + 2].copy_from_slice(&pixel);
            len += 2;
            if len == CHUNK_SIZE {
                self.send_data(&chunk)?;
                len = 0;
            }
        }
        if len > 0 {
            self.send_data(&chunk[..len])?;
        }
        Ok(())
    }

    /// Send a command to the display controller
    fn send_command(&mut self, command: Command) -> DisplayResult<I> {
        self.interface
            .send_command(command.opcode())
            .map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}
