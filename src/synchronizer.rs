//! Multi-stage synchronizer for bits crossing into a foreign timing domain.
//!
//! Provides [`Synchronizer`], a chain of `N` registers clocked by the
//! consuming domain. Stage 0 samples the raw input every tick, whatever its
//! condition; only the last stage is ever read by downstream logic.

/// An `N`-stage shift-register synchronizer.
///
/// A value sampled on tick `t` becomes visible on tick `t + N`. Anything that
/// toggles faster than one tick may be coalesced or dropped.
///
/// # Type Parameters
/// * `N` - Number of register stages, at least 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Synchronizer<const N: usize> {
    stages: [bool; N],
}

impl<const N: usize> Synchronizer<N> {
    const STAGES_OK: () = assert!(N >= 2, "synchronizer needs at least two stages");

    /// Creates a synchronizer with every stage cleared.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::STAGES_OK;

        Self { stages: [false; N] }
    }

    /// Clocks the chain once.
    ///
    /// Returns the settled value visible during this tick, then shifts `raw`
    /// into stage 0.
    pub fn tick(&mut self, raw: bool) -> bool {
        let settled = self.output();

        self.stages.copy_within(0..N - 1, 1);
        self.stages[0] = raw;

        settled
    }

    /// Returns the settled last stage.
    #[inline]
    pub fn output(&self) -> bool {
        self.stages[N - 1]
    }

    /// Returns every stage, stage 0 first.
    #[inline]
    pub fn stages(&self) -> &[bool; N] {
        &self.stages
    }

    /// Number of ticks between sampling a value and seeing it at the output.
    #[inline]
    pub const fn latency(&self) -> usize {
        N
    }

    /// Clears every stage.
    pub fn reset(&mut self) {
        self.stages = [false; N];
    }
}

impl<const N: usize> Default for Synchronizer<N> {
    fn default() -> Self {
        Self::new()
    }
}
