//! Shared test infrastructure for debounce-sync integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use debounce_sync::{ButtonCore, ButtonInput, CoreConfig, OutputMode, SlowTick, StatusLed};

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records every level written to it
pub struct MockLed {
    on: bool,
    history: heapless::Vec<bool, 64>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            on: false,
            history: heapless::Vec::new(),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn history(&self) -> &[bool] {
        &self.history
    }
}

impl StatusLed for MockLed {
    fn set_on(&mut self, on: bool) {
        self.on = on;
        let _ = self.history.push(on);
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// Mock button whose level the test sets between ticks
pub struct MockButton {
    pressed: Cell<bool>,
}

impl MockButton {
    pub fn new() -> Self {
        Self {
            pressed: Cell::new(false),
        }
    }

    pub fn set(&self, pressed: bool) {
        self.pressed.set(pressed);
    }
}

impl ButtonInput for MockButton {
    fn is_pressed(&self) -> bool {
        self.pressed.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Builds a core around a fresh `MockLed`
pub fn core_with<const N: usize, const MAX: u32>(mode: OutputMode) -> ButtonCore<MockLed, N, MAX> {
    ButtonCore::new(MockLed::new(), CoreConfig::new(mode)).unwrap()
}

/// Raw level `pattern` of `(level, ticks)` segments, then low forever
pub fn pattern_level(pattern: &[(bool, u64)], tick: u64) -> bool {
    let mut start = 0;
    for &(level, ticks) in pattern {
        if tick < start + ticks {
            return level;
        }
        start += ticks;
    }
    false
}

/// Feeds `level_at(tick)` into the slow domain for `ticks` ticks and records each result
pub fn run_slow<L, const N: usize, const MAX: u32>(
    core: &mut ButtonCore<L, N, MAX>,
    ticks: u64,
    level_at: impl Fn(u64) -> bool,
) -> Vec<SlowTick>
where
    L: StatusLed,
{
    (0..ticks).map(|t| core.slow_tick(&level_at(t))).collect()
}

/// Tick indices on which the confirmed-press flag was high
pub fn pulse_ticks(trace: &[SlowTick]) -> Vec<u64> {
    trace
        .iter()
        .enumerate()
        .filter(|(_, t)| t.debounce.pulse)
        .map(|(i, _)| i as u64)
        .collect()
}
