//! Core types shared by the synchronizer, debouncer and output latch.

/// One of the two independent timing domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Domain {
    /// Output domain. Drives the observable LED.
    Fast,

    /// Sampling domain. Owns the button synchronizer and the debouncer.
    Slow,
}

/// State of the debounce machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Waiting for the synchronized level to go high.
    Idle,

    /// Counting down while the level stays high.
    Debounce,
}

/// How the output latch turns the confirmed-press pulse into an LED level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Drive the LED straight from the pulse register.
    ///
    /// No re-synchronization into the fast domain. The LED is high for
    /// exactly the fast ticks that observe the one-slow-tick pulse.
    Direct,

    /// Pass the pulse through a fast-domain synchronizer first.
    #[default]
    Synchronized,

    /// Free-running fast counter, cleared on each synchronized press.
    ///
    /// The LED shows counter bit `bit`, so every press restarts the blink
    /// phase from "off".
    Blink {
        /// Counter bit mirrored on the LED.
        bit: u8,
    },
}

/// Runtime configuration for [`ButtonCore`](crate::button::ButtonCore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreConfig {
    /// Output latch behavior.
    pub output_mode: OutputMode,
}

impl CoreConfig {
    /// Creates a configuration with the given output mode.
    #[inline]
    pub const fn new(output_mode: OutputMode) -> Self {
        Self { output_mode }
    }

    /// Checks the configuration against the limits of the latch.
    ///
    /// # Errors
    /// * `BlinkBitOutOfRange` - `Blink` selects a bit outside the 32-bit counter
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.output_mode {
            OutputMode::Blink { bit } if u32::from(bit) >= u32::BITS => {
                Err(ConfigError::BlinkBitOutOfRange { bit })
            }
            _ => Ok(()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Blink counter bit does not exist.
    BlinkBitOutOfRange {
        /// The requested bit.
        bit: u8,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::BlinkBitOutOfRange { bit } => {
                write!(
                    f,
                    "blink bit {} is out of range (counter is {} bits wide)",
                    bit,
                    u32::BITS
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
