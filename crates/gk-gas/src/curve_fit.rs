//! Piecewise temperature curve fits.
//!
//! Two segment forms are supported:
//! - [`Nasa9`]: NASA Glenn 9-coefficient polynomials for Cp, H and S°.
//! - [`CeaTransport`]: CEA `ln(q) = A ln T + B/T + C/T² + D` fits for viscosity and
//!   thermal conductivity.
//!
//! A [`PiecewiseFit`] owns an ascending, gap-free sequence of segments. Lookup never
//! extrapolates: a temperature outside the union of segments yields `None`.

use gk_defs::validate::SEGMENT_JOIN_TOL;
use gk_defs::{CeaSegmentDef, Nasa9SegmentDef};

/// A curve-fit segment with a closed temperature validity interval.
pub trait FitSegment {
    /// Validity interval `(t_lo, t_hi)` [K].
    fn bounds(&self) -> (f64, f64);

    fn contains(&self, t: f64) -> bool {
        let (lo, hi) = self.bounds();
        lo <= t && t <= hi
    }
}

/// Reason a segment table was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitTableError {
    Empty,
    InvalidRange { index: usize },
    Discontinuous { index: usize },
}

impl FitTableError {
    pub fn reason(self) -> &'static str {
        match self {
            Self::Empty => "no segments",
            Self::InvalidRange { .. } => "segment has lo >= hi or non-positive bounds",
            Self::Discontinuous { .. } => "segments are not contiguous",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseFit<S> {
    segments: Vec<S>,
}

impl<S: FitSegment> PiecewiseFit<S> {
    /// Build a fit from segments in ascending temperature order.
    pub fn new(segments: Vec<S>) -> Result<Self, FitTableError> {
        if segments.is_empty() {
            return Err(FitTableError::Empty);
        }
        for (index, seg) in segments.iter().enumerate() {
            let (lo, hi) = seg.bounds();
            if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || lo >= hi {
                return Err(FitTableError::InvalidRange { index });
            }
            if index > 0 {
                let (_, prev_hi) = segments[index - 1].bounds();
                if (lo - prev_hi).abs() > SEGMENT_JOIN_TOL {
                    return Err(FitTableError::Discontinuous { index });
                }
            }
        }
        Ok(Self { segments })
    }

    /// Segment covering `t`. A shared boundary belongs to the lower segment.
    pub fn segment_for(&self, t: f64) -> Option<&S> {
        self.segments.iter().find(|s| s.contains(t))
    }

    /// Union of all segment intervals.
    pub fn range(&self) -> (f64, f64) {
        let lo = self.segments.first().map(|s| s.bounds().0).unwrap_or(f64::NAN);
        let hi = self.segments.last().map(|s| s.bounds().1).unwrap_or(f64::NAN);
        (lo, hi)
    }

    pub fn segments(&self) -> &[S] {
        &self.segments
    }
}

/// NASA Glenn 9-coefficient segment.
///
/// `Cp/R = a1 T⁻² + a2 T⁻¹ + a3 + a4 T + a5 T² + a6 T³ + a7 T⁴`
#[derive(Debug, Clone, PartialEq)]
pub struct Nasa9 {
    pub t_lo: f64,
    pub t_hi: f64,
    pub a: [f64; 7],
    /// b1 (enthalpy integration constant), b2 (entropy integration constant)
    pub b: [f64; 2],
}

impl FitSegment for Nasa9 {
    fn bounds(&self) -> (f64, f64) {
        (self.t_lo, self.t_hi)
    }
}

impl Nasa9 {
    /// Dimensionless heat capacity Cp/R.
    pub fn cp_r(&self, t: f64) -> f64 {
        let a = &self.a;
        a[0] / (t * t) + a[1] / t + a[2] + t * (a[3] + t * (a[4] + t * (a[5] + t * a[6])))
    }

    /// Dimensionless enthalpy H/(RT), including the formation enthalpy carried by b1.
    pub fn h_rt(&self, t: f64) -> f64 {
        let a = &self.a;
        -a[0] / (t * t)
            + a[1] * t.ln() / t
            + a[2]
            + t * (a[3] / 2.0 + t * (a[4] / 3.0 + t * (a[5] / 4.0 + t * a[6] / 5.0)))
            + self.b[0] / t
    }

    /// Dimensionless standard-state entropy S°/R.
    pub fn s_r(&self, t: f64) -> f64 {
        let a = &self.a;
        -a[0] / (2.0 * t * t) - a[1] / t
            + a[2] * t.ln()
            + t * (a[3] + t * (a[4] / 2.0 + t * (a[5] / 3.0 + t * a[6] / 4.0)))
            + self.b[1]
    }
}

impl TryFrom<&Nasa9SegmentDef> for Nasa9 {
    type Error = usize;

    /// Fails with the offending coefficient count when `a`/`b` have the wrong length.
    fn try_from(def: &Nasa9SegmentDef) -> Result<Self, Self::Error> {
        let a: [f64; 7] = def.a.as_slice().try_into().map_err(|_| def.a.len())?;
        let b: [f64; 2] = def.b.as_slice().try_into().map_err(|_| def.b.len())?;
        Ok(Self {
            t_lo: def.t_lo,
            t_hi: def.t_hi,
            a,
            b,
        })
    }
}

/// CEA transport segment, `ln(q) = a ln T + b/T + c/T² + d`.
///
/// `q` is in the fit's native unit (micropoise or µW/(cm·K)); callers scale it.
#[derive(Debug, Clone, PartialEq)]
pub struct CeaTransport {
    pub t_lo: f64,
    pub t_hi: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl FitSegment for CeaTransport {
    fn bounds(&self) -> (f64, f64) {
        (self.t_lo, self.t_hi)
    }
}

impl CeaTransport {
    pub fn eval(&self, t: f64) -> f64 {
        (self.a * t.ln() + self.b / t + self.c / (t * t) + self.d).exp()
    }
}

impl From<&CeaSegmentDef> for CeaTransport {
    fn from(def: &CeaSegmentDef) -> Self {
        Self {
            t_lo: def.t_lo,
            t_hi: def.t_hi,
            a: def.a,
            b: def.b,
            c: def.c,
            d: def.d,
        }
    }
}
