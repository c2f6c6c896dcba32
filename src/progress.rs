//! Progress aggregation.
//!
//! The tracker is a flat global counter: it knows the fixed total for the
//! session and how many resources have completed, never which kind a
//! completion belonged to. Progress therefore reflects overall completion,
//! not per-kind weighting.

use crate::config::ConfigError;

/// A completion fraction in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ProgressFraction(f64);

impl ProgressFraction {
    /// Creates a fraction, returning `None` if `value` is outside `[0, 1]`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The zero fraction.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// The complete fraction.
    pub fn complete() -> Self {
        Self(1.0)
    }

    /// Returns the fraction as an `f64` in `[0, 1]`.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Returns `true` if every resource has completed.
    pub fn is_complete(self) -> bool {
        self.0 == 1.0
    }

    /// Renders the fraction as a CSS percentage width, e.g. `"50%"`.
    pub fn as_css_percent(self) -> String {
        format!("{}%", self.0 * 100.0)
    }
}

impl std::fmt::Display for ProgressFraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Counts completed resources against a fixed total.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
}

impl ProgressTracker {
    /// Creates a tracker with the session's fixed denominator.
    ///
    /// A zero total is a configuration error; sessions whose groups are all
    /// empty complete without ever constructing a tracker.
    pub fn new(total: usize) -> Result<Self, ConfigError> {
        if total == 0 {
            return Err(ConfigError::ZeroTotal);
        }
        Ok(Self {
            total,
            completed: 0,
        })
    }

    /// Records one completion and returns the updated fraction.
    ///
    /// The counter never exceeds the total and is never decremented.
    pub fn record_completion(&mut self) -> ProgressFraction {
        self.completed = (self.completed + 1).min(self.total);
        self.fraction()
    }

    /// The current fraction, `completed / total`.
    pub fn fraction(&self) -> ProgressFraction {
        Self::ratio(self.completed, self.total)
    }

    /// The fixed total.
    pub fn total(&self) -> usize {
        self.total
    }

    /// How many resources have completed so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    fn ratio(completed: usize, total: usize) -> ProgressFraction {
        ProgressFraction(completed as f64 / total as f64)
    }
}
