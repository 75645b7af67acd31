//! Tests for the oscillating power meter.

use proptest::prelude::*;
use strictly_hoops::{MeterPhase, MeterSettings, PowerMeter, Sweep};

fn charging(start: i32, end: i32, step: i32) -> PowerMeter {
    let mut meter = PowerMeter::new(&MeterSettings::new(start, end, step));
    meter.start().unwrap();
    meter
}

#[test]
fn test_meter_bounces_between_bounds() {
    let mut meter = charging(0, 100, 25);
    let mut seen = Vec::new();
    for _ in 0..8 {
        meter.advance(1);
        seen.push(meter.value());
    }
    assert_eq!(seen, vec![25, 50, 75, 100, 75, 50, 25, 0]);
    assert_eq!(meter.sweep(), Sweep::Rising);
}

#[test]
fn test_stop_freezes_value() {
    let mut meter = charging(0, 100, 10);
    meter.advance(3);
    assert_eq!(meter.stop(), Some(30));
    meter.advance(5);
    assert_eq!(meter.value(), 30);
    assert_eq!(meter.phase(), MeterPhase::Stopped);
    assert_eq!(meter.stop(), None, "second stop captures nothing");
}

#[test]
fn test_start_twice_is_rejected() {
    let mut meter = charging(0, 100, 10);
    let err = meter.start().unwrap_err();
    assert_eq!(err.phase, MeterPhase::Charging);
}

#[test]
fn test_reset_returns_to_start() {
    let mut meter = charging(10, 50, 7);
    meter.advance(9);
    meter.stop();
    meter.reset();
    assert_eq!(meter.value(), 10);
    assert_eq!(meter.phase(), MeterPhase::Idle);
    assert_eq!(meter.sweep(), Sweep::Rising);
    assert_eq!(meter.fill_ratio(), 0.0);
}

proptest! {
    #[test]
    fn prop_value_stays_in_bounds(
        start in -500i32..500,
        span in 1i32..500,
        step in 1i32..600,
        ticks in 0u32..2_000,
    ) {
        let end = start + span;
        let mut meter = charging(start, end, step);
        for _ in 0..ticks {
            meter.advance(1);
            prop_assert!((start..=end).contains(&meter.value()));
        }
        let ratio = meter.fill_ratio();
        prop_assert!((0.0..=1.0).contains(&ratio));
    }

    #[test]
    fn prop_sweep_is_periodic(
        half_period in 1u32..50,
        step in 1i32..10,
        ticks in 0u32..200,
    ) {
        let end = step * half_period as i32;
        let mut a = charging(0, end, step);
        let mut b = charging(0, end, step);
        a.advance(ticks);
        b.advance(ticks + 2 * half_period);
        prop_assert_eq!(a.value(), b.value());
        prop_assert_eq!(a.sweep(), b.sweep());
    }
}
