//! Output latch that re-times the confirmed-press pulse into the fast domain.
//!
//! Provides [`OutputLatch`], which owns the observable output and drives it
//! once per fast-domain tick, and the [`StatusLed`] trait for the hardware
//! behind it.

use crate::fmt::trace;
use crate::synchronizer::Synchronizer;
use crate::types::{ConfigError, CoreConfig, OutputMode};

/// Trait for abstracting the observable output bit.
///
/// Implement this for your LED hardware (GPIO, shift register, CSR, etc.).
/// Handle any hardware errors internally - this method cannot fail.
pub trait StatusLed {
    /// Drives the output high (`true`) or low (`false`).
    fn set_on(&mut self, on: bool);
}

impl<L: StatusLed + ?Sized> StatusLed for &mut L {
    fn set_on(&mut self, on: bool) {
        (**self).set_on(on);
    }
}

/// Drives a [`StatusLed`] from the debouncer's pulse, one fast tick at a time.
///
/// The LED is written only when the driven level changes.
///
/// # Type Parameters
/// * `L` - LED implementation type
/// * `N` - Stages of the fast-domain synchronizer
pub struct OutputLatch<L: StatusLed, const N: usize> {
    led: L,
    mode: OutputMode,
    sync: Synchronizer<N>,
    last_pressed: bool,
    blink_counter: u32,
    level: bool,
}

impl<L: StatusLed, const N: usize> OutputLatch<L, N> {
    /// Creates a latch with the LED turned off.
    ///
    /// # Errors
    /// * `BlinkBitOutOfRange` - `Blink` selects a bit the counter does not have
    pub fn new(mut led: L, mode: OutputMode) -> Result<Self, ConfigError> {
        CoreConfig::new(mode).validate()?;

        led.set_on(false);

        Ok(Self {
            led,
            mode,
            sync: Synchronizer::new(),
            last_pressed: false,
            blink_counter: 0,
            level: false,
        })
    }

    /// Advances the latch by one fast tick.
    ///
    /// `pulse` is the debouncer's registered flag as seen from the fast
    /// domain. Returns the level driven onto the LED for this tick.
    pub fn tick(&mut self, pulse: bool) -> bool {
        let level = match self.mode {
            OutputMode::Direct => pulse,
            OutputMode::Synchronized => self.sync.tick(pulse),
            OutputMode::Blink { bit } => {
                let pressed = self.sync.tick(pulse);
                let rising = pressed && !self.last_pressed;
                self.last_pressed = pressed;

                if rising {
                    trace!("output: press, restarting blink phase");
                    self.blink_counter = 0;
                } else {
                    self.blink_counter = self.blink_counter.wrapping_add(1);
                }

                (self.blink_counter >> bit) & 1 == 1
            }
        };

        if level != self.level {
            self.led.set_on(level);
            self.level = level;
        }

        level
    }

    /// Returns the level currently driven onto the LED.
    #[inline]
    pub fn level(&self) -> bool {
        self.level
    }

    /// Returns the configured output mode.
    #[inline]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Returns the blink counter. Only advances in `Blink` mode.
    #[inline]
    pub fn blink_counter(&self) -> u32 {
        self.blink_counter
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Consumes the latch and returns the LED.
    pub fn into_led(self) -> L {
        self.led
    }

    /// Returns to the power-on state and turns the LED off.
    pub fn reset(&mut self) {
        self.sync.reset();
        self.last_pressed = false;
        self.blink_counter = 0;
        self.level = false;
        self.led.set_on(false);
    }
}
