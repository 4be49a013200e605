//! Parameter sweep definitions.

use crate::sweep_executor::SweepError;
use std::fmt;

/// Independent variable of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepQuantity {
    Temperature,
    Pressure,
}

impl SweepQuantity {
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "K",
            Self::Pressure => "Pa",
        }
    }
}

impl fmt::Display for SweepQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Pressure => write!(f, "Pressure"),
        }
    }
}

/// Spacing of sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepType {
    /// `start + i * step`
    Linear,
    /// Uniform in `ln(value)`
    Logarithmic,
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

/// A one-dimensional sweep over temperature or pressure, in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub quantity: SweepQuantity,
    pub start: f64,
    pub step: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    /// Evenly spaced points from `start` to `end` inclusive.
    pub fn between(
        quantity: SweepQuantity,
        start: f64,
        end: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> Result<Self, SweepError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SweepError::InvalidConfiguration {
                reason: "start and end must be finite",
            });
        }
        if num_points < 2 {
            return Err(SweepError::InvalidConfiguration {
                reason: "sweep must have at least 2 points",
            });
        }
        if start == end {
            return Err(SweepError::InvalidConfiguration {
                reason: "start and end must differ",
            });
        }
        let intervals = (num_points - 1) as f64;
        let step = match sweep_type {
            SweepType::Linear => (end - start) / intervals,
            SweepType::Logarithmic => {
                if start <= 0.0 || end <= 0.0 {
                    return Err(SweepError::InvalidConfiguration {
                        reason: "logarithmic sweep needs positive bounds",
                    });
                }
                (end / start).ln() / intervals
            }
        };
        Ok(Self {
            quantity,
            start,
            step,
            num_points,
            sweep_type,
        })
    }

    /// `count` linear points `start + i * step`.
    pub fn from_step(
        quantity: SweepQuantity,
        start: f64,
        step: f64,
        count: usize,
    ) -> Result<Self, SweepError> {
        if !start.is_finite() || !step.is_finite() || step == 0.0 {
            return Err(SweepError::InvalidConfiguration {
                reason: "start must be finite and step finite and non-zero",
            });
        }
        if count == 0 {
            return Err(SweepError::InvalidConfiguration {
                reason: "sweep must have at least 1 point",
            });
        }
        Ok(Self {
            quantity,
            start,
            step,
            num_points: count,
            sweep_type: SweepType::Linear,
        })
    }

    pub fn end(&self) -> f64 {
        self.point(self.num_points.saturating_sub(1))
    }

    fn point(&self, i: usize) -> f64 {
        match self.sweep_type {
            SweepType::Linear => self.step * i as f64 + self.start,
            SweepType::Logarithmic => self.start * (self.step * i as f64).exp(),
        }
    }

    /// All points, in sweep order.
    pub fn generate_points(&self) -> Vec<f64> {
        (0..self.num_points).map(|i| self.point(i)).collect()
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.quantity.unit();
        write!(
            f,
            "Sweep {} from {} {unit} to {} {unit} ({} points, {})",
            self.quantity,
            self.start,
            self.end(),
            self.num_points,
            self.sweep_type
        )
    }
}
