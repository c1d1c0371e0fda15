//! Deterministic host-side simulation of a button wired to a [`ButtonCore`].
//!
//! A [`Stimulus`] scripts the raw button level over time, a [`DualClock`]
//! supplies both domains' ticks, and [`Simulator`] delivers each tick to the
//! core in time order.

use crate::button::{ButtonCore, TickReport};
use crate::fmt::trace;
use crate::output::StatusLed;
use crate::tick::{ClockEdge, DualClock};
use heapless::Vec;

/// Stimulus construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StimulusError {
    /// A transition was scheduled before an earlier one.
    OutOfOrder {
        /// Time of the rejected transition.
        at: u64,
        /// Time of the latest accepted transition.
        previous: u64,
    },

    /// Stimulus capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for StimulusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StimulusError::OutOfOrder { at, previous } => {
                write!(
                    f,
                    "transition at {} scheduled before previous transition at {}",
                    at, previous
                )
            }
            StimulusError::CapacityExceeded => {
                write!(f, "stimulus capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StimulusError {}

/// A level change of the raw button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Time from which `level` holds.
    pub at: u64,

    /// Raw button level.
    pub level: bool,
}

/// Raw button level as a piecewise-constant function of time.
///
/// The level is `false` before the first transition.
///
/// # Type Parameters
/// * `CAP` - Maximum number of transitions
#[derive(Debug, Clone)]
pub struct Stimulus<const CAP: usize> {
    transitions: Vec<Transition, CAP>,
}

impl<const CAP: usize> Stimulus<CAP> {
    /// Creates a new stimulus builder.
    pub fn builder() -> StimulusBuilder<CAP> {
        StimulusBuilder::new()
    }

    /// A button that is never pressed.
    pub fn released() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Returns the raw level at `time`.
    pub fn level_at(&self, time: u64) -> bool {
        // Transitions are sorted by `at`
        let idx = self.transitions.partition_point(|t| t.at <= time);
        idx.checked_sub(1)
            .map(|i| self.transitions[i].level)
            .unwrap_or(false)
    }

    /// Returns the scheduled transitions in time order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}

/// Builder for time-ordered [`Stimulus`] scripts.
#[derive(Debug)]
pub struct StimulusBuilder<const CAP: usize> {
    transitions: Vec<Transition, CAP>,
    cursor: u64,
}

impl<const CAP: usize> StimulusBuilder<CAP> {
    /// Creates an empty builder with its cursor at time zero.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            cursor: 0,
        }
    }

    /// Sets the level from `time` on and moves the cursor there.
    ///
    /// # Errors
    /// * `OutOfOrder` - `time` is before the previous transition
    /// * `CapacityExceeded` - More than `CAP` transitions
    pub fn at(mut self, time: u64, level: bool) -> Result<Self, StimulusError> {
        if let Some(last) = self.transitions.last_mut() {
            if time < last.at {
                return Err(StimulusError::OutOfOrder {
                    at: time,
                    previous: last.at,
                });
            }
            if time == last.at {
                last.level = level;
                self.cursor = time;
                return Ok(self);
            }
        }

        self.transitions
            .push(Transition { at: time, level })
            .map_err(|_| StimulusError::CapacityExceeded)?;
        self.cursor = time;
        Ok(self)
    }

    /// Holds `level` for `duration`, starting at the cursor.
    ///
    /// # Errors
    /// * `CapacityExceeded` - More than `CAP` transitions
    pub fn hold(self, level: bool, duration: u64) -> Result<Self, StimulusError> {
        let start = self.cursor;
        let mut builder = self.at(start, level)?;
        builder.cursor = start.saturating_add(duration);
        Ok(builder)
    }

    /// Returns the end of the last `hold`.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Builds the stimulus.
    pub fn build(self) -> Stimulus<CAP> {
        Stimulus {
            transitions: self.transitions,
        }
    }
}

impl<const CAP: usize> Default for StimulusBuilder<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

/// One clock edge delivered by a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimEvent {
    /// The edge that was delivered.
    pub edge: ClockEdge,

    /// What the core did on that edge.
    pub report: TickReport,
}

/// Drives a [`ButtonCore`] from a [`DualClock`] and a [`Stimulus`].
///
/// # Type Parameters
/// * `L` - LED implementation type
/// * `N` - Synchronizer stages
/// * `MAX` - Debounce period in slow ticks
/// * `CAP` - Stimulus capacity
pub struct Simulator<L: StatusLed, const N: usize, const MAX: u32, const CAP: usize> {
    core: ButtonCore<L, N, MAX>,
    clock: DualClock,
    stimulus: Stimulus<CAP>,
    now: u64,
}

impl<L: StatusLed, const N: usize, const MAX: u32, const CAP: usize> Simulator<L, N, MAX, CAP> {
    /// Creates a simulator at time zero.
    pub fn new(core: ButtonCore<L, N, MAX>, clock: DualClock, stimulus: Stimulus<CAP>) -> Self {
        Self {
            core,
            clock,
            stimulus,
            now: 0,
        }
    }

    /// Delivers the next clock edge.
    ///
    /// Returns `None` only once the clock has run out of representable time.
    pub fn step(&mut self) -> Option<SimEvent> {
        let edge = self.clock.next()?;
        let pressed = self.stimulus.level_at(edge.time);
        self.now = edge.time;

        trace!("sim: edge at {=u64}", edge.time);
        let report = self.core.tick(edge.domain, &pressed);

        Some(SimEvent { edge, report })
    }

    /// Delivers every edge up to and including `end`, calling `on_event` for each.
    ///
    /// Returns the number of edges delivered.
    pub fn run_until<F>(&mut self, end: u64, mut on_event: F) -> usize
    where
        F: FnMut(&SimEvent),
    {
        let mut delivered = 0;
        while self.clock.peek_time().is_some_and(|t| t <= end) {
            match self.step() {
                Some(event) => {
                    on_event(&event);
                    delivered += 1;
                }
                None => break,
            }
        }
        delivered
    }

    /// Time of the most recently delivered edge.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Returns the core under simulation.
    pub fn core(&self) -> &ButtonCore<L, N, MAX> {
        &self.core
    }

    /// Returns the clock pair.
    pub fn clock(&self) -> &DualClock {
        &self.clock
    }

    /// Rewinds the clocks and returns the core to power-on.
    pub fn reset(&mut self) {
        self.core.reset();
        self.clock.reset();
        self.now = 0;
    }

    /// Consumes the simulator and returns the core.
    pub fn into_core(self) -> ButtonCore<L, N, MAX> {
        self.core
    }
}
