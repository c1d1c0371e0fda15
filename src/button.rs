//! Button pipeline spanning both timing domains.
//!
//! Provides [`ButtonCore`], which wires the slow-domain synchronizer and
//! debouncer to the fast-domain output latch, and the [`ButtonInput`] trait
//! the platform layer implements for the raw button.

use crate::debounce::{DebounceSnapshot, Debouncer};
use crate::output::{OutputLatch, StatusLed};
use crate::synchronizer::Synchronizer;
use crate::types::{ConfigError, CoreConfig, Domain};
use crate::{DEFAULT_DEBOUNCE_TICKS, DEFAULT_SYNC_STAGES};
use core::cell::Cell;

/// Trait for abstracting the raw button input.
///
/// Sampled once per slow-domain tick. The value may change at any instant
/// relative to that tick; the core synchronizes it before use.
pub trait ButtonInput {
    /// Returns true while the button reads as pressed.
    fn is_pressed(&self) -> bool;
}

impl ButtonInput for bool {
    fn is_pressed(&self) -> bool {
        *self
    }
}

impl ButtonInput for Cell<bool> {
    fn is_pressed(&self) -> bool {
        self.get()
    }
}

impl<B: ButtonInput + ?Sized> ButtonInput for &B {
    fn is_pressed(&self) -> bool {
        (**self).is_pressed()
    }
}

/// What the slow domain registered on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlowTick {
    /// Raw button sample shifted into the synchronizer.
    pub raw: bool,

    /// Synchronized level the debouncer consumed.
    pub level: bool,

    /// Debouncer registers after the tick.
    pub debounce: DebounceSnapshot,
}

/// Outcome of a [`ButtonCore::tick`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickReport {
    /// Fast domain ticked; carries the LED level.
    Fast(bool),

    /// Slow domain ticked.
    Slow(SlowTick),
}

/// Synchronizer, debouncer and output latch for one button.
///
/// Each domain's state is touched only by that domain's tick method. The
/// one value read across domains, the debouncer's pulse register, reaches
/// the LED through the latch's own synchronizer unless `OutputMode::Direct`
/// is configured.
///
/// # Type Parameters
/// * `L` - LED implementation type
/// * `N` - Synchronizer stages, used on both crossings
/// * `MAX` - Debounce period in slow ticks
pub struct ButtonCore<L: StatusLed, const N: usize, const MAX: u32> {
    input_sync: Synchronizer<N>,
    debouncer: Debouncer<MAX>,
    latch: OutputLatch<L, N>,
    config: CoreConfig,
}

/// A [`ButtonCore`] with two synchronizer stages and a 400-tick debounce.
pub type DefaultButtonCore<L> = ButtonCore<L, DEFAULT_SYNC_STAGES, DEFAULT_DEBOUNCE_TICKS>;

impl<L: StatusLed, const N: usize, const MAX: u32> ButtonCore<L, N, MAX> {
    /// Creates a core in its power-on state with the LED turned off.
    ///
    /// # Errors
    /// Returns an error if `config` fails [`CoreConfig::validate`].
    pub fn new(led: L, config: CoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            input_sync: Synchronizer::new(),
            debouncer: Debouncer::new(),
            latch: OutputLatch::new(led, config.output_mode)?,
            config,
        })
    }

    /// Advances the slow domain by one tick.
    pub fn slow_tick<B: ButtonInput + ?Sized>(&mut self, button: &B) -> SlowTick {
        let raw = button.is_pressed();
        let level = self.input_sync.tick(raw);
        self.debouncer.tick(level);

        SlowTick {
            raw,
            level,
            debounce: self.debouncer.snapshot(),
        }
    }

    /// Advances the fast domain by one tick and returns the LED level.
    pub fn fast_tick(&mut self) -> bool {
        self.latch.tick(self.debouncer.pulse())
    }

    /// Dispatches a tick of `domain`.
    pub fn tick<B: ButtonInput + ?Sized>(&mut self, domain: Domain, button: &B) -> TickReport {
        match domain {
            Domain::Fast => TickReport::Fast(self.fast_tick()),
            Domain::Slow => TickReport::Slow(self.slow_tick(button)),
        }
    }

    /// Returns the confirmed-press flag as registered by the slow domain.
    #[inline]
    pub fn pulse(&self) -> bool {
        self.debouncer.pulse()
    }

    /// Returns the level currently driven onto the LED.
    #[inline]
    pub fn led_level(&self) -> bool {
        self.latch.level()
    }

    /// Returns the button synchronizer.
    pub fn input_synchronizer(&self) -> &Synchronizer<N> {
        &self.input_sync
    }

    /// Returns the debouncer.
    pub fn debouncer(&self) -> &Debouncer<MAX> {
        &self.debouncer
    }

    /// Returns the output latch.
    pub fn latch(&self) -> &OutputLatch<L, N> {
        &self.latch
    }

    /// Returns the configuration the core was built with.
    pub fn config(&self) -> CoreConfig {
        self.config
    }

    /// Returns every component to its power-on state.
    pub fn reset(&mut self) {
        self.input_sync.reset();
        self.debouncer.reset();
        self.latch.reset();
    }

    /// Consumes the core and returns the LED.
    pub fn into_led(self) -> L {
        self.latch.into_led()
    }
}
