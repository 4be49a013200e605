//! Mixture viscosity and thermal conductivity.

use crate::composition::MassFractions;
use crate::error::DomainError;
use crate::model::GasModel;
use gk_core::ensure_positive;
use gk_defs::MixingRuleDef;
use tracing::trace;

/// Rule combining per-species transport coefficients into mixture values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixingRule {
    /// Wilke's rule for viscosity, with the same weights applied to
    /// conductivity (Mason-Saxena).
    #[default]
    Wilke,
}

impl From<MixingRuleDef> for MixingRule {
    fn from(def: MixingRuleDef) -> Self {
        match def {
            MixingRuleDef::Wilke => MixingRule::Wilke,
        }
    }
}

/// Mixture transport coefficients at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportProps {
    /// Temperature [K].
    pub t: f64,
    /// Dynamic viscosity [Pa·s].
    pub mu: f64,
    /// Thermal conductivity [W/(m·K)].
    pub k: f64,
}

/// Wilke interaction weight between species `i` and `j`.
///
/// `Φ_ij = [1 + sqrt(μ_i/μ_j) (M_j/M_i)^¼]² / sqrt(8 (1 + M_i/M_j))`, so `Φ_ii = 1`.
pub fn wilke_phi(mu_i: f64, mu_j: f64, mw_i: f64, mw_j: f64) -> f64 {
    let num = 1.0 + (mu_i / mu_j).sqrt() * (mw_j / mw_i).powf(0.25);
    num * num / (8.0 * (1.0 + mw_i / mw_j)).sqrt()
}

/// Wilke mixture of `values` (viscosities or conductivities).
///
/// `x`, `mu` and `mw` describe the active species only; the interaction
/// weights always use the viscosities.
pub fn wilke_mix(x: &[f64], mu: &[f64], mw: &[f64], values: &[f64]) -> f64 {
    let n = x.len();
    let mut mix = 0.0;
    for i in 0..n {
        let denom: f64 = (0..n)
            .map(|j| {
                if i == j {
                    x[j]
                } else {
                    x[j] * wilke_phi(mu[i], mu[j], mw[i], mw[j])
                }
            })
            .sum();
        mix += x[i] * values[i] / denom;
    }
    mix
}

/// Mixture viscosity and conductivity at temperature `t`.
///
/// Species with a zero mass fraction are skipped entirely: their fits are
/// neither evaluated nor range-checked.
pub fn update_trans_coeffs(
    model: &GasModel,
    massf: &MassFractions,
    t: f64,
) -> Result<TransportProps, DomainError> {
    ensure_positive(t, "temperature")?;
    massf.check(model)?;

    let x_all = massf.mole_fractions(model);
    let active: Vec<usize> = massf.active().map(|(i, _)| i).collect();
    let mut x = Vec::with_capacity(active.len());
    let mut mw = Vec::with_capacity(active.len());
    let mut mu = Vec::with_capacity(active.len());
    let mut k = Vec::with_capacity(active.len());
    for &i in &active {
        let sp = &model.species()[i];
        x.push(x_all[i]);
        mw.push(sp.molecular_weight());
        mu.push(sp.viscosity(t)?);
        k.push(sp.thermal_conductivity(t)?);
    }

    let props = match model.mixing_rule() {
        MixingRule::Wilke => TransportProps {
            t,
            mu: wilke_mix(&x, &mu, &mw, &mu),
            k: wilke_mix(&x, &mu, &mw, &k),
        },
    };
    trace!(t, mu = props.mu, k = props.k, "transport coefficients updated");
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_fit::{CeaTransport, Nasa9};
    use crate::species::Species;
    use crate::species::test_support::simple_species;
    use gk_core::{Tolerances, nearly_equal};
    use gk_defs::FitKind;
    use std::path::PathBuf;

    fn air() -> GasModel {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../models/thermally-perfect-N2-O2.yaml");
        GasModel::load(path).unwrap()
    }

    fn rel(tol: f64) -> Tolerances {
        Tolerances::relative(tol)
    }

    #[test]
    fn phi_self_term_is_one() {
        assert_eq!(wilke_phi(1.8e-5, 1.8e-5, 0.028, 0.028), 1.0);
        let a = wilke_phi(1.8e-5, 2.0e-5, 0.028, 0.032);
        let b = wilke_phi(2.0e-5, 1.8e-5, 0.032, 0.028);
        // Not symmetric, but both near 1 for similar molecules.
        assert!(a > 0.9 && a < 1.1 && b > 0.9 && b < 1.1);
        assert_ne!(a, b);
    }

    #[test]
    fn single_species_is_exact() {
        let model = air();
        let y = MassFractions::pure(&model, "O2").unwrap();
        let o2 = model.species_by_name("O2").unwrap();
        for t in [200.0, 300.0, 4321.0, 19_900.0] {
            let props = update_trans_coeffs(&model, &y, t).unwrap();
            assert_eq!(props.mu, o2.viscosity(t).unwrap());
            assert_eq!(props.k, o2.thermal_conductivity(t).unwrap());
        }
    }

    #[test]
    fn air_at_300k() {
        let model = air();
        let y = MassFractions::from_named(&model, [("N2", 0.78), ("O2", 0.22)]).unwrap();
        let props = update_trans_coeffs(&model, &y, 300.0).unwrap();
        assert!(nearly_equal(props.mu, 1.8469e-5, rel(1e-4)), "mu = {}", props.mu);
        assert!(nearly_equal(props.k, 2.6244e-2, rel(1e-4)), "k = {}", props.k);

        let n2 = model.species_by_name("N2").unwrap();
        let o2 = model.species_by_name("O2").unwrap();
        let (mu_lo, mu_hi) = (n2.viscosity(300.0).unwrap(), o2.viscosity(300.0).unwrap());
        assert!(props.mu > mu_lo && props.mu < mu_hi);
    }

    #[test]
    fn symmetric_under_species_reordering() {
        let a = simple_species("A", 0.004, 190.0, 1500.0);
        let b = simple_species("B", 0.028, 180.0, 260.0);
        let c = simple_species("C", 0.044, 150.0, 170.0);
        let fwd = GasModel::new("f", vec![a.clone(), b.clone(), c.clone()], MixingRule::Wilke)
            .unwrap();
        let rev = GasModel::new("r", vec![c, b, a], MixingRule::Wilke).unwrap();
        let entries = [("A", 0.1), ("B", 0.6), ("C", 0.3)];
        let yf = MassFractions::from_named(&fwd, entries).unwrap();
        let yr = MassFractions::from_named(&rev, entries).unwrap();
        let pf = update_trans_coeffs(&fwd, &yf, 500.0).unwrap();
        let pr = update_trans_coeffs(&rev, &yr, 500.0).unwrap();
        assert!(nearly_equal(pf.mu, pr.mu, rel(1e-14)));
        assert!(nearly_equal(pf.k, pr.k, rel(1e-14)));
    }

    #[test]
    fn out_of_range_temperature() {
        let model = air();
        let y = MassFractions::from_named(&model, [("N2", 0.78), ("O2", 0.22)]).unwrap();
        for t in [100.0, 25_000.0] {
            match update_trans_coeffs(&model, &y, t) {
                Err(DomainError::OutOfRange {
                    species, fit, t_lo, t_hi, ..
                }) => {
                    assert_eq!(species, "N2");
                    assert_eq!(fit, FitKind::Viscosity);
                    assert_eq!((t_lo, t_hi), (200.0, 20_000.0));
                }
                other => panic!("expected OutOfRange, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_fraction_species_are_skipped() {
        // Fits end at 500 K.
        let narrow = Species::new(
            "N",
            0.028,
            vec![Nasa9 {
                t_lo: 100.0,
                t_hi: 500.0,
                a: [0.0, 0.0, 3.5, 0.0, 0.0, 0.0, 0.0],
                b: [0.0, 0.0],
            }],
            vec![CeaTransport {
                t_lo: 100.0,
                t_hi: 500.0,
                a: 0.0,
                b: 0.0,
                c: 0.0,
                d: 5.0,
            }],
            vec![CeaTransport {
                t_lo: 100.0,
                t_hi: 500.0,
                a: 0.0,
                b: 0.0,
                c: 0.0,
                d: 5.5,
            }],
        )
        .unwrap();
        let model = GasModel::new(
            "m",
            vec![narrow, simple_species("W", 0.032, 200.0, 270.0)],
            MixingRule::Wilke,
        )
        .unwrap();
        let y = MassFractions::pure(&model, "W").unwrap();
        let w = model.species_by_name("W").unwrap();
        let props = update_trans_coeffs(&model, &y, 600.0).unwrap();
        assert_eq!(props.mu, w.viscosity(600.0).unwrap());

        let mixed = MassFractions::from_named(&model, [("N", 0.5), ("W", 0.5)]).unwrap();
        assert!(matches!(
            update_trans_coeffs(&model, &mixed, 600.0),
            Err(DomainError::OutOfRange { ref species, .. }) if species == "N"
        ));
    }

    #[test]
    fn rejects_bad_composition() {
        let model = air();
        let y = MassFractions::from_named(&model, [("N2", 0.78), ("O2", 0.23)]).unwrap();
        assert!(matches!(
            update_trans_coeffs(&model, &y, 300.0),
            Err(DomainError::InvalidComposition(_))
        ));
    }

    #[test]
    fn mixing_rule_from_definition() {
        assert_eq!(MixingRule::from(MixingRuleDef::Wilke), MixingRule::Wilke);
        assert_eq!(MixingRule::default(), MixingRule::Wilke);
    }
}
