#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Overview
//!
//! Clock-domain-safe push-button synchronization and debouncing.
//!
//! A mechanical button bounces, and its level changes at instants that bear
//! no relation to the clock sampling it. This crate turns such an input into
//! one clean, single-tick "press confirmed" pulse and drives an output from
//! it in a second, independent timing domain.
//!
//! # Core Concepts
//!
//! - **`Synchronizer`**: `N`-stage shift register that re-times a bit into the consuming domain
//! - **`Debouncer`**: IDLE/DEBOUNCE state machine that confirms a press after `MAX` stable ticks
//! - **`OutputLatch`**: Re-times the pulse into the fast domain and drives a `StatusLed`
//! - **`ButtonCore`**: The whole pipeline, one method per domain tick
//! - **`ButtonInput`**: Trait to implement for your raw button
//! - **`StatusLed`**: Trait to implement for your output hardware
//! - **`DualClock`**: Two free-running clocks merged into one edge stream, for host-side driving
//! - **`Simulator`**: Drives a `ButtonCore` from a `DualClock` and a scripted `Stimulus`
//!
//! Every component is a plain state struct updated once per tick of its own
//! domain. Nothing reads another domain's state except through a synchronizer,
//! with `OutputMode::Direct` as the single documented opt-out.

pub(crate) mod fmt;

pub mod types;
pub mod tick;
pub mod synchronizer;
pub mod debounce;
pub mod output;
pub mod button;
pub mod simulation;

pub use button::{ButtonCore, ButtonInput, DefaultButtonCore, SlowTick, TickReport};
pub use debounce::{DebounceSnapshot, Debouncer};
pub use output::{OutputLatch, StatusLed};
pub use simulation::{SimEvent, Simulator, Stimulus, StimulusBuilder, StimulusError, Transition};
pub use synchronizer::Synchronizer;
pub use tick::{ClockEdge, ClockError, ClockSpec, DualClock};
pub use types::{ConfigError, CoreConfig, DebounceState, Domain, OutputMode};

/// Synchronizer depth used by [`DefaultButtonCore`].
pub const DEFAULT_SYNC_STAGES: usize = 2;

/// Debounce period, in slow ticks, used by [`DefaultButtonCore`].
pub const DEFAULT_DEBOUNCE_TICKS: u32 = 400;

/// Blink bit that reproduces the reference board's LED rate.
///
/// With a 100 MHz fast clock, bit 25 toggles roughly every 0.34 s.
pub const REFERENCE_BLINK_BIT: u8 = 25;
