//! Oscillating power meter.
//!
//! The meter sweeps between two bounds and back (ping-pong, never
//! wraparound). It has no clock of its own: an external driver calls
//! [`PowerMeter::advance`] once per frame.

use crate::match_config::MeterSettings;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Lifecycle of the meter within one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MeterPhase {
    /// Armed at the start bound, not moving.
    Idle,
    /// Sweeping on every advance.
    Charging,
    /// Frozen at the captured power until reset.
    Stopped,
}

/// Direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sweep {
    /// Towards the end bound.
    Rising,
    /// Towards the start bound.
    Falling,
}

/// Rejected meter operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Meter cannot {} while {}", operation, phase)]
pub struct MeterError {
    /// What was attempted.
    pub operation: &'static str,
    /// Phase at the time.
    pub phase: MeterPhase,
}

/// Ping-pong counter bounded to `[start, end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerMeter {
    start: i32,
    end: i32,
    step: i32,
    position: i32,
    sweep: Sweep,
    phase: MeterPhase,
}

impl PowerMeter {
    /// Creates an idle meter at the start bound.
    ///
    /// Settings are expected to be validated; a zero or negative step is
    /// treated as one and inverted bounds are swapped.
    #[instrument]
    pub fn new(settings: &MeterSettings) -> Self {
        let (start, end) = if settings.start() <= settings.end() {
            (*settings.start(), *settings.end())
        } else {
            (*settings.end(), *settings.start())
        };
        Self {
            start,
            end,
            step: (*settings.step()).max(1),
            position: start,
            sweep: Sweep::Rising,
            phase: MeterPhase::Idle,
        }
    }

    /// Begins the sweep.
    ///
    /// # Errors
    ///
    /// Returns [`MeterError`] unless the meter is idle.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn start(&mut self) -> Result<(), MeterError> {
        if self.phase != MeterPhase::Idle {
            return Err(MeterError {
                operation: "start",
                phase: self.phase,
            });
        }
        self.phase = MeterPhase::Charging;
        debug!(position = self.position, "Meter charging");
        Ok(())
    }

    /// Moves the indicator `step` units per tick, bouncing off the bounds.
    ///
    /// Does nothing unless the meter is charging.
    pub fn advance(&mut self, delta_ticks: u32) {
        if self.phase != MeterPhase::Charging {
            return;
        }
        for _ in 0..u64::from(delta_ticks) % self.period() {
            self.step_once();
        }
    }

    fn span(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start)
    }

    /// Ticks for one full sweep up and back; the motion repeats after it.
    fn period(&self) -> u64 {
        let step = i64::from(self.step);
        let half = (self.span() + step - 1) / step;
        2 * half.max(1) as u64
    }

    fn step_once(&mut self) {
        match self.sweep {
            Sweep::Rising => {
                let next = self.position.saturating_add(self.step);
                if next >= self.end {
                    self.position = self.end;
                    self.sweep = Sweep::Falling;
                } else {
                    self.position = next;
                }
            }
            Sweep::Falling => {
                let next = self.position.saturating_sub(self.step);
                if next <= self.start {
                    self.position = self.start;
                    self.sweep = Sweep::Rising;
                } else {
                    self.position = next;
                }
            }
        }
    }

    /// Freezes the indicator and returns it as the captured power.
    ///
    /// Returns `None` unless the meter is charging; the meter then stays
    /// inert until [`reset`](Self::reset).
    #[instrument(skip(self), fields(phase = %self.phase, position = self.position))]
    pub fn stop(&mut self) -> Option<i32> {
        if self.phase != MeterPhase::Charging {
            return None;
        }
        self.phase = MeterPhase::Stopped;
        debug!(power = self.position, "Meter stopped");
        Some(self.position)
    }

    /// Returns to the start bound, rising, idle.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.position = self.start;
        self.sweep = Sweep::Rising;
        self.phase = MeterPhase::Idle;
    }

    /// Current indicator position.
    pub fn value(&self) -> i32 {
        self.position
    }

    /// Current phase.
    pub fn phase(&self) -> MeterPhase {
        self.phase
    }

    /// Current direction of travel.
    pub fn sweep(&self) -> Sweep {
        self.sweep
    }

    /// Lower bound.
    pub fn start_bound(&self) -> i32 {
        self.start
    }

    /// Upper bound.
    pub fn end_bound(&self) -> i32 {
        self.end
    }

    /// Position as a fraction of the span, for gauges.
    pub fn fill_ratio(&self) -> f64 {
        let span = self.span() as f64;
        if span <= 0.0 {
            return 0.0;
        }
        ((i64::from(self.position) - i64::from(self.start)) as f64 / span).clamp(0.0, 1.0)
    }
}
