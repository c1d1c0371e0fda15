//! Debounce and press-confirmation state machine.
//!
//! Provides [`Debouncer`], which consumes the synchronized button level once
//! per slow-domain tick and emits a single-tick confirmed-press pulse after
//! the level has stayed high for `MAX` ticks.

use crate::fmt::debug;
use crate::types::DebounceState;

/// Register contents of a [`Debouncer`] after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceSnapshot {
    /// FSM state.
    pub state: DebounceState,
    /// Countdown value.
    pub counter: u32,
    /// Confirmed-press flag.
    pub pulse: bool,
    /// Whether a new press may start a countdown.
    pub armed: bool,
}

/// Debounce state machine with a countdown of `MAX` ticks.
///
/// All outputs are registered: every value read after [`tick`](Self::tick)
/// was decided by that tick and holds until the next one.
///
/// The machine disarms itself after a confirmation and re-arms only once the
/// level has been seen low, so a held button produces exactly one pulse.
///
/// # Type Parameters
/// * `MAX` - Ticks the level must stay high before a press is confirmed, at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer<const MAX: u32> {
    state: DebounceState,
    counter: u32,
    pulse: bool,
    armed: bool,
}

impl<const MAX: u32> Debouncer<MAX> {
    const PERIOD_OK: () = assert!(MAX >= 1, "debounce period must be at least one tick");

    /// Creates an idle, armed debouncer.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::PERIOD_OK;

        Self {
            state: DebounceState::Idle,
            counter: MAX,
            pulse: false,
            armed: true,
        }
    }

    /// Advances the machine by one tick with the synchronized `level`.
    ///
    /// Returns the confirmed-press flag decided by this tick.
    pub fn tick(&mut self, level: bool) -> bool {
        match self.state {
            DebounceState::Idle => {
                self.pulse = false;

                if !level {
                    self.armed = true;
                } else if self.armed {
                    debug!("debounce: level high, counting down");
                    self.state = DebounceState::Debounce;
                    self.counter = MAX;
                }
            }
            DebounceState::Debounce => {
                // Release is checked before the countdown: a release on the
                // tick the counter would hit zero confirms nothing.
                if !level {
                    debug!("debounce: released before confirmation");
                    self.enter_idle();
                    self.armed = true;
                } else if self.counter == 0 {
                    self.enter_idle();
                } else {
                    self.counter = self.counter.saturating_sub(1);
                    if self.counter == 0 {
                        debug!("debounce: press confirmed");
                        self.pulse = true;
                        self.armed = false;
                    }
                }
            }
        }

        self.pulse
    }

    fn enter_idle(&mut self) {
        self.state = DebounceState::Idle;
        self.pulse = false;
    }

    /// Returns the current FSM state.
    #[inline]
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Returns the countdown value.
    #[inline]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Returns the registered confirmed-press flag.
    #[inline]
    pub fn pulse(&self) -> bool {
        self.pulse
    }

    /// Returns true if a rising level would start a new countdown.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns every register at once.
    pub fn snapshot(&self) -> DebounceSnapshot {
        DebounceSnapshot {
            state: self.state,
            counter: self.counter,
            pulse: self.pulse,
            armed: self.armed,
        }
    }

    /// Debounce period in ticks.
    #[inline]
    pub const fn period(&self) -> u32 {
        MAX
    }

    /// Returns to the power-on state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<const MAX: u32> Default for Debouncer<MAX> {
    fn default() -> Self {
        Self::new()
    }
}
