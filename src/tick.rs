//! Tick sources for the two timing domains.
//!
//! The platform layer normally supplies the ticks. [`DualClock`] models two
//! free-running clocks with arbitrary periods and phases so the core can be
//! driven deterministically on the host.

use crate::types::Domain;

/// Period and phase of one domain clock, in abstract time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSpec {
    /// Time between consecutive edges.
    pub period: u64,

    /// Time of the first edge. Must be below `period`.
    pub phase: u64,
}

impl ClockSpec {
    /// Creates a clock spec.
    #[inline]
    pub const fn new(period: u64, phase: u64) -> Self {
        Self { period, phase }
    }

    fn validate(&self, domain: Domain) -> Result<(), ClockError> {
        if self.period == 0 {
            return Err(ClockError::ZeroPeriod(domain));
        }
        if self.phase >= self.period {
            return Err(ClockError::PhaseNotBelowPeriod(domain));
        }
        Ok(())
    }
}

/// A single tick delivered by a [`DualClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockEdge {
    /// Domain that ticked.
    pub domain: Domain,

    /// Absolute time of the edge.
    pub time: u64,

    /// Zero-based tick index within the domain.
    pub index: u64,
}

/// Clock configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// A domain was given a zero period.
    ZeroPeriod(Domain),

    /// A domain's phase is not below its period.
    PhaseNotBelowPeriod(Domain),
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClockError::ZeroPeriod(domain) => {
                write!(f, "{:?} clock period must be non-zero", domain)
            }
            ClockError::PhaseNotBelowPeriod(domain) => {
                write!(f, "{:?} clock phase must be less than its period", domain)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClockError {}

#[derive(Debug, Clone, Copy)]
struct DomainClock {
    spec: ClockSpec,
    next_index: u64,
}

impl DomainClock {
    fn next_time(&self) -> Option<u64> {
        self.spec
            .period
            .checked_mul(self.next_index)
            .and_then(|t| t.checked_add(self.spec.phase))
    }
}

/// Two independent periodic clocks merged into one time-ordered edge stream.
///
/// Edges that coincide are delivered slow domain first, so a fast-domain
/// consumer ticking at the same instant reads the slow domain's freshly
/// registered outputs. The stream ends only when time overflows `u64`.
#[derive(Debug, Clone)]
pub struct DualClock {
    fast: DomainClock,
    slow: DomainClock,
}

impl DualClock {
    /// Creates a clock pair.
    ///
    /// # Errors
    /// * `ZeroPeriod` - A domain has a zero period
    /// * `PhaseNotBelowPeriod` - A domain's first edge lies beyond its period
    pub fn new(fast: ClockSpec, slow: ClockSpec) -> Result<Self, ClockError> {
        fast.validate(Domain::Fast)?;
        slow.validate(Domain::Slow)?;

        Ok(Self {
            fast: DomainClock {
                spec: fast,
                next_index: 0,
            },
            slow: DomainClock {
                spec: slow,
                next_index: 0,
            },
        })
    }

    /// Returns the spec of the given domain.
    pub fn spec(&self, domain: Domain) -> ClockSpec {
        match domain {
            Domain::Fast => self.fast.spec,
            Domain::Slow => self.slow.spec,
        }
    }

    /// Returns the time of the next edge without consuming it.
    pub fn peek_time(&self) -> Option<u64> {
        match (self.fast.next_time(), self.slow.next_time()) {
            (Some(f), Some(s)) => Some(f.min(s)),
            (f, s) => f.or(s),
        }
    }

    /// Number of ticks delivered so far in the given domain.
    pub fn ticks(&self, domain: Domain) -> u64 {
        match domain {
            Domain::Fast => self.fast.next_index,
            Domain::Slow => self.slow.next_index,
        }
    }

    /// Rewinds both clocks to time zero.
    pub fn reset(&mut self) {
        self.fast.next_index = 0;
        self.slow.next_index = 0;
    }
}

impl Iterator for DualClock {
    type Item = ClockEdge;

    fn next(&mut self) -> Option<ClockEdge> {
        let domain = match (self.fast.next_time(), self.slow.next_time()) {
            (Some(f), Some(s)) if f < s => Domain::Fast,
            (_, Some(_)) => Domain::Slow,
            (Some(_), None) => Domain::Fast,
            (None, None) => return None,
        };

        let clock = match domain {
            Domain::Fast => &mut self.fast,
            Domain::Slow => &mut self.slow,
        };
        let time = clock.next_time()?;
        let index = clock.next_index;
        clock.next_index += 1;

        Some(ClockEdge { domain, time, index })
    }
}
