//! Global simulation clock.
//!
//! Converts a single real-time frame delta into per-unit increments
//! ("ticks") and keeps five independent calendar counters for display.

use bevy::log::info;

use crate::types::{
    DAYS_PER_YEAR, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, wrap,
};

/// Errors produced by the time system.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("invalid tick rate {0} (must be finite and non-negative)")]
    InvalidTickRate(f64),

    #[error("invalid frame delta {0} (must be finite and non-negative)")]
    InvalidFrameDelta(f64),
}

/// Increments produced by one clock advance.
///
/// Each field is the elapsed time expressed in the unit that feeds the
/// matching counter: `minute` is model seconds, `hour` is minutes, `day` is
/// hours and `year` is days. All four derive from the same tick rate, so
/// changing the rate speeds every unit up consistently.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimeTicks {
    pub minute: f64,
    pub hour: f64,
    pub day: f64,
    pub year: f64,
}

impl TimeTicks {
    /// Ticks for `tick_rate` model seconds per real second over `dt` seconds.
    pub fn from_rate(tick_rate: f64, dt: f64) -> Self {
        let seconds = tick_rate * dt;
        Self {
            minute: seconds,
            hour: seconds / SECONDS_PER_MINUTE,
            day: seconds / SECONDS_PER_HOUR,
            year: seconds / SECONDS_PER_DAY,
        }
    }
}

/// Simulation clock.
///
/// Counters are accumulated in floating point and wrapped independently
/// (60, 60, 24, 365, unbounded). They are not derived from one another, so
/// over long runs they drift apart from exact calendar carry semantics.
#[derive(Clone, Debug)]
pub struct TimeSystem {
    /// Model seconds advanced per real second.
    tick_rate: f64,
    second: f64,
    minute: f64,
    hour: f64,
    day: f64,
    year: f64,
    /// Unbounded day total, for diagnostics.
    elapsed_days: f64,
    /// Bumped on every time-affecting configuration change.
    revision: u64,
}

impl Default for TimeSystem {
    fn default() -> Self {
        Self::with_rate(1.0)
    }
}

impl TimeSystem {
    /// Create a clock running at `tick_rate` model seconds per real second.
    pub fn new(tick_rate: f64) -> Result<Self, TimeError> {
        validate_tick_rate(tick_rate)?;
        Ok(Self::with_rate(tick_rate))
    }

    fn with_rate(tick_rate: f64) -> Self {
        Self {
            tick_rate,
            second: 0.0,
            minute: 0.0,
            hour: 0.0,
            day: 0.0,
            year: 0.0,
            elapsed_days: 0.0,
            revision: 0,
        }
    }

    pub fn tick_rate(&self) -> f64 {
        self.tick_rate
    }

    /// Change the tick rate. Takes effect on the next [`advance`](Self::advance).
    pub fn set_tick_rate(&mut self, tick_rate: f64) -> Result<(), TimeError> {
        validate_tick_rate(tick_rate)?;
        if tick_rate != self.tick_rate {
            info!("Tick rate: {}x", tick_rate);
            self.tick_rate = tick_rate;
            self.revision += 1;
        }
        Ok(())
    }

    /// Ticks that a frame of `dt` real seconds would produce at the current rate.
    pub fn ticks_for(&self, dt: f64) -> TimeTicks {
        TimeTicks::from_rate(self.tick_rate, dt)
    }

    /// Advance the clock by one frame and return that frame's ticks.
    ///
    /// The returned snapshot is what propagation consumes; the rate is read
    /// exactly once per frame.
    pub fn advance(&mut self, dt: f64) -> Result<TimeTicks, TimeError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(TimeError::InvalidFrameDelta(dt));
        }

        let ticks = self.ticks_for(dt);

        self.second = wrap(self.second + ticks.minute, SECONDS_PER_MINUTE);
        self.minute = wrap(self.minute + ticks.hour, 60.0);
        self.hour = wrap(self.hour + ticks.day, 24.0);
        self.day = wrap(self.day + ticks.year, DAYS_PER_YEAR);
        self.year += ticks.year / DAYS_PER_YEAR;
        self.elapsed_days += ticks.year;

        Ok(ticks)
    }

    /// Zero all counters, keeping the tick rate.
    pub fn reset(&mut self) {
        *self = Self {
            revision: self.revision + 1,
            ..Self::with_rate(self.tick_rate)
        };
    }

    /// Seconds within the current minute, in `[0, 60)`.
    pub fn second(&self) -> f64 {
        self.second
    }

    /// Minutes within the current hour, in `[0, 60)`.
    pub fn minute(&self) -> f64 {
        self.minute
    }

    /// Hours within the current day, in `[0, 24)`.
    pub fn hour(&self) -> f64 {
        self.hour
    }

    /// Days within the current year, in `[0, 365)`.
    pub fn day(&self) -> f64 {
        self.day
    }

    /// Elapsed years (fractional, unbounded).
    pub fn year(&self) -> f64 {
        self.year
    }

    /// Total elapsed days since creation or the last reset.
    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    /// Configuration revision.
    ///
    /// Tools that need to recompute when the time configuration changes keep
    /// the last value they saw and compare.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn validate_tick_rate(tick_rate: f64) -> Result<(), TimeError> {
    if !tick_rate.is_finite() || tick_rate < 0.0 {
        return Err(TimeError::InvalidTickRate(tick_rate));
    }
    Ok(())
}
