//! Thermodynamic evaluator for a thermally-perfect mixture.
//!
//! Every function here is a pure function of the model, the composition and
//! the two independent state variables. Species properties come from the
//! NASA-9 fits; mixture values are mass-fraction weighted, and the
//! temperature must lie inside every active species' thermo window.

use crate::composition::MassFractions;
use crate::error::DomainError;
use crate::model::GasModel;
use gk_core::constants::R_UNIVERSAL;
use gk_core::{ensure_finite, ensure_positive};
use gk_defs::FitKind;
use tracing::trace;

/// Newton iteration cap for the inverse solves.
pub const MAX_ITERATIONS: usize = 100;

/// Relative temperature tolerance for the inverse solves.
pub const T_TOLERANCE: f64 = 1e-12;

/// Thermodynamic state of the mixture at one (p, T) point. All values in SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoProps {
    /// Pressure [Pa].
    pub p: f64,
    /// Temperature [K].
    pub t: f64,
    /// Density [kg/m^3].
    pub rho: f64,
    /// Specific internal energy [J/kg].
    pub e: f64,
    /// Specific enthalpy [J/kg].
    pub h: f64,
    /// Specific heat at constant pressure [J/(kg·K)].
    pub cp: f64,
    /// Specific heat at constant volume [J/(kg·K)].
    pub cv: f64,
    pub gamma: f64,
    /// Frozen sound speed [m/s].
    pub a: f64,
    /// Specific entropy [J/(kg·K)].
    pub s: f64,
    /// Mixture molecular weight [kg/mol].
    pub mw_mix: f64,
    /// Mixture gas constant [J/(kg·K)].
    pub r_mix: f64,
}

/// Caloric sums at a temperature, independent of pressure.
#[derive(Debug, Clone, Copy)]
struct Caloric {
    h: f64,
    cp: f64,
    r_mix: f64,
}

impl Caloric {
    fn e(&self, t: f64) -> f64 {
        self.h - self.r_mix * t
    }

    fn cv(&self) -> f64 {
        self.cp - self.r_mix
    }
}

fn caloric(model: &GasModel, massf: &MassFractions, t: f64) -> Result<Caloric, DomainError> {
    let mut sums = Caloric {
        h: 0.0,
        cp: 0.0,
        r_mix: 0.0,
    };
    for (i, y) in massf.active() {
        let sp = &model.species()[i];
        sums.h += y * sp.enthalpy(t)?;
        sums.cp += y * sp.cp(t)?;
        sums.r_mix += y * sp.gas_constant();
    }
    Ok(sums)
}

/// Thermodynamic properties from pressure and temperature.
///
/// Checks, in order: `p` and `t` positive and finite, composition valid for
/// `model`, `t` inside the thermo fit of every species with a non-zero mass
/// fraction.
pub fn update_thermo_from_pt(
    model: &GasModel,
    massf: &MassFractions,
    p: f64,
    t: f64,
) -> Result<ThermoProps, DomainError> {
    ensure_positive(p, "pressure")?;
    ensure_positive(t, "temperature")?;
    massf.check(model)?;

    let cal = caloric(model, massf, t)?;
    let mw_mix = massf.mixture_molecular_weight(model);
    let x = massf.mole_fractions(model);

    let mut s = 0.0;
    for (i, y) in massf.active() {
        let sp = &model.species()[i];
        let p_ref = sp.reference().pressure;
        s += y * (sp.standard_entropy(t)? - sp.gas_constant() * (x[i] * p / p_ref).ln());
    }

    let rho = p * mw_mix / (R_UNIVERSAL * t);
    let cv = cal.cv();
    let gamma = cal.cp / cv;
    let props = ThermoProps {
        p,
        t,
        rho,
        e: cal.e(t),
        h: cal.h,
        cp: cal.cp,
        cv,
        gamma,
        a: (gamma * cal.r_mix * t).sqrt(),
        s,
        mw_mix,
        r_mix: cal.r_mix,
    };
    trace!(p, t, rho, h = props.h, "thermo updated from (p, T)");
    Ok(props)
}

/// Thermodynamic properties from density and temperature.
pub fn update_thermo_from_rhot(
    model: &GasModel,
    massf: &MassFractions,
    rho: f64,
    t: f64,
) -> Result<ThermoProps, DomainError> {
    ensure_positive(rho, "density")?;
    ensure_positive(t, "temperature")?;
    massf.check(model)?;
    let p = rho * R_UNIVERSAL * t / massf.mixture_molecular_weight(model);
    update_thermo_from_pt(model, massf, p, t)
}

/// Thermodynamic properties from density and specific internal energy.
///
/// Solves `e(T) = u` inside the common thermo window of the active species.
pub fn update_thermo_from_rhou(
    model: &GasModel,
    massf: &MassFractions,
    rho: f64,
    u: f64,
) -> Result<ThermoProps, DomainError> {
    ensure_positive(rho, "density")?;
    ensure_finite(u, "internal energy")?;
    massf.check(model)?;
    let t = solve_temperature(model, massf, "internal energy", u, |cal, t| {
        (cal.e(t), cal.cv())
    })?;
    update_thermo_from_rhot(model, massf, rho, t)
}

/// Thermodynamic properties from pressure and specific enthalpy.
///
/// Solves `h(T) = h` inside the common thermo window of the active species.
pub fn update_thermo_from_ph(
    model: &GasModel,
    massf: &MassFractions,
    p: f64,
    h: f64,
) -> Result<ThermoProps, DomainError> {
    ensure_positive(p, "pressure")?;
    ensure_finite(h, "enthalpy")?;
    massf.check(model)?;
    let t = solve_temperature(model, massf, "enthalpy", h, |cal, _| (cal.h, cal.cp))?;
    update_thermo_from_pt(model, massf, p, t)
}

/// Safeguarded Newton solve of `f(T) = target` for a monotonically
/// increasing caloric function `f` with derivative `df`.
fn solve_temperature<F>(
    model: &GasModel,
    massf: &MassFractions,
    what: &'static str,
    target: f64,
    f: F,
) -> Result<f64, DomainError>
where
    F: Fn(&Caloric, f64) -> (f64, f64),
{
    let (mut lo, mut hi) = model
        .common_range(massf, FitKind::Thermo)
        .ok_or(DomainError::NoCommonRange {
            fit: FitKind::Thermo,
        })?;
    let (f_lo, _) = f(&caloric(model, massf, lo)?, lo);
    let (f_hi, _) = f(&caloric(model, massf, hi)?, hi);
    if target < f_lo || target > f_hi {
        return Err(DomainError::NoSolution {
            what,
            value: target,
            min: f_lo,
            max: f_hi,
        });
    }
    if target == f_lo {
        return Ok(lo);
    }
    if target == f_hi {
        return Ok(hi);
    }

    // Start from the secant through the window ends.
    let mut t = lo + (target - f_lo) * (hi - lo) / (f_hi - f_lo);
    for iteration in 0..MAX_ITERATIONS {
        let (value, slope) = f(&caloric(model, massf, t)?, t);
        let residual = value - target;
        if residual == 0.0 {
            return Ok(t);
        }
        if residual < 0.0 {
            lo = t;
        } else {
            hi = t;
        }

        let newton = t - residual / slope;
        let next = if slope > 0.0 && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };
        trace!(iteration, t, next, residual, "temperature solve step");
        if (next - t).abs() <= T_TOLERANCE * t || hi - lo <= T_TOLERANCE * t {
            return Ok(next);
        }
        t = next;
    }
    Err(DomainError::ConvergenceFailed {
        what,
        iterations: MAX_ITERATIONS,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn ph_inverts_pt(t in 200.0_f64..20_000.0, y_n2 in 0.0_f64..=1.0, p in 1e3_f64..1e7) {
            let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("../../models/thermally-perfect-N2-O2.yaml");
            let model = GasModel::load(path).unwrap();
            let y = MassFractions::from_vec(&model, vec![y_n2, 1.0 - y_n2]).unwrap();
            let pt = update_thermo_from_pt(&model, &y, p, t).unwrap();
            prop_assert!(pt.rho > 0.0 && pt.cp > pt.cv && pt.gamma > 1.0);
            let back = update_thermo_from_ph(&model, &y, p, pt.h).unwrap();
            prop_assert!((back.t - t).abs() < 1e-6 * t);
        }
    }
}
