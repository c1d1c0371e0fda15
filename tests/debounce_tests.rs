//! Integration tests for Debouncer and the slow-domain pipeline

mod common;
use common::*;

use debounce_sync::{DebounceState, Debouncer, OutputMode};

fn pulses<const MAX: u32>(levels: impl IntoIterator<Item = bool>) -> Vec<u64> {
    let mut deb = Debouncer::<MAX>::new();
    levels
        .into_iter()
        .enumerate()
        .filter(|&(_, level)| deb.tick(level))
        .map(|(i, _)| i as u64)
        .collect()
}

fn high_for(width: u64, total: u64) -> impl Iterator<Item = bool> {
    (0..total).map(move |t| t < width)
}

#[test]
fn short_pulses_never_confirm() {
    for width in 1..=16 {
        assert!(
            pulses::<16>(high_for(width, 100)).is_empty(),
            "pulse of width {width} was confirmed"
        );
    }
}

#[test]
fn short_pulses_never_confirm_at_reference_period() {
    for width in [1, 2, 5, 50, 200, 399, 400] {
        assert!(pulses::<400>(high_for(width, 1_000)).is_empty());
    }
}

#[test]
fn long_press_confirms_once_after_period() {
    for width in 17..=64 {
        assert_eq!(pulses::<16>(high_for(width, 200)), [16], "width {width}");
    }
    assert_eq!(pulses::<400>(high_for(401, 1_000)), [400]);
    assert_eq!(pulses::<400>(high_for(800, 2_000)), [400]);
}

#[test]
fn held_button_confirms_exactly_once() {
    assert_eq!(pulses::<400>(core::iter::repeat(true).take(10_000)), [400]);
}

#[test]
fn pulse_never_lasts_two_ticks() {
    let mut deb = Debouncer::<3>::new();
    let mut previous = false;
    let mut state = 0x1234_5678u32;

    for _ in 0..5_000 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        // Mostly-high noise so confirmations actually happen
        let level = state % 8 != 0;

        let pulse = deb.tick(level);
        assert!(!(pulse && previous));
        previous = pulse;
    }
}

#[test]
fn confirmations_are_separated_by_release_and_full_period() {
    let mut deb = Debouncer::<5>::new();
    let mut state = 0xdead_beefu32;
    let mut last_pulse: Option<u64> = None;
    let mut released_since = true;

    for t in 0..20_000u64 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let level = (state >> 16) % 10 != 0;

        if deb.tick(level) {
            assert!(released_since, "second pulse at {t} without a release");
            if let Some(prev) = last_pulse {
                assert!(t - prev > 5, "pulses at {prev} and {t}");
            }
            last_pulse = Some(t);
            released_since = false;
        } else if !level {
            released_since = true;
        }
    }

    assert!(last_pulse.is_some());
}

#[test]
fn re_press_after_release_confirms_again() {
    let levels = core::iter::repeat(true)
        .take(450)
        .chain(core::iter::repeat(false).take(5))
        .chain(core::iter::repeat(true).take(450));

    // Second entry at 455, confirmed 400 ticks later
    assert_eq!(pulses::<400>(levels), [400, 855]);
}

#[test]
fn release_on_final_countdown_tick_is_not_a_press() {
    // Entry at 0, counter would reach zero at tick 10
    let levels = high_for(10, 30);
    assert!(pulses::<10>(levels).is_empty());

    let levels = high_for(11, 30);
    assert_eq!(pulses::<10>(levels), [10]);
}

#[test]
fn reference_press_scenario() {
    let mut core = core_with::<2, 400>(OutputMode::Direct);
    let pattern = [(false, 10), (true, 410)];
    let trace = run_slow(&mut core, 600, |t| pattern_level(&pattern, t));

    assert!(!trace[11].level);
    assert!(trace[12].level);

    assert_eq!(trace[11].debounce.state, DebounceState::Idle);
    assert_eq!(trace[12].debounce.state, DebounceState::Debounce);
    assert_eq!(trace[12].debounce.counter, 400);

    assert_eq!(trace[411].debounce.counter, 1);
    assert_eq!(trace[412].debounce.counter, 0);
    assert_eq!(pulse_ticks(&trace), [412]);

    assert_eq!(trace[413].debounce.state, DebounceState::Idle);
    assert!(!trace[413].debounce.pulse);

    // Still held after the confirmation, but no new countdown starts
    assert!(trace[421].level);
    assert!(trace[414..].iter().all(|t| t.debounce.state == DebounceState::Idle));
    assert!(trace[422].debounce.armed);
}

#[test]
fn reference_bounce_scenario() {
    let mut core = core_with::<2, 400>(OutputMode::Direct);
    let pattern = [(true, 5), (false, 3), (true, 5)];
    let trace = run_slow(&mut core, 1_000, |t| pattern_level(&pattern, t));

    assert!(pulse_ticks(&trace).is_empty());

    // Both bursts started a countdown that was abandoned
    assert_eq!(trace[2].debounce.state, DebounceState::Debounce);
    assert_eq!(trace[7].debounce.state, DebounceState::Idle);
    assert_eq!(trace[10].debounce.state, DebounceState::Debounce);
    assert_eq!(trace[10].debounce.counter, 400);
    assert_eq!(trace[15].debounce.state, DebounceState::Idle);
}

#[test]
fn bounce_then_settle_confirms_from_last_rise() {
    let mut core = core_with::<2, 20>(OutputMode::Direct);
    let pattern = [
        (true, 2),
        (false, 1),
        (true, 3),
        (false, 2),
        (true, 1),
        (false, 1),
        (true, 100),
    ];
    let trace = run_slow(&mut core, 200, |t| pattern_level(&pattern, t));

    // Final rise sampled at tick 10, visible at 12, confirmed 20 ticks on
    assert_eq!(pulse_ticks(&trace), [32]);
}

#[test]
fn period_echoes_configuration() {
    assert_eq!(Debouncer::<400>::new().period(), 400);
    assert_eq!(Debouncer::<1>::default().period(), 1);

    let core = core_with::<2, 25>(OutputMode::Direct);
    assert_eq!(core.debouncer().period(), 25);
}
