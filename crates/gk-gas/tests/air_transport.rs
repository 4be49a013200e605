//! End-to-end transport properties of air as an N2/O2 mixture.

use gk_gas::{
    DomainError, FitKind, GasError, GasModel, GasState, MassFractions, StatePhase,
    SweepDefinition, SweepQuantity, execute_temperature_sweep_at_pressure,
};
use std::path::PathBuf;

fn load(file: &str) -> GasModel {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../models")
        .join(file);
    GasModel::load(path).expect("air model loads")
}

fn air_model() -> GasModel {
    load("thermally-perfect-N2-O2.yaml")
}

fn rel_err(a: f64, b: f64) -> f64 {
    ((a - b) / b).abs()
}

#[test]
fn air_table_sequential() {
    let model = air_model();
    let mut q = GasState::new(&model);
    q.set_p(1.0e5);
    q.set_massf([("N2", 0.78), ("O2", 0.22)]).unwrap();

    let mut rows = Vec::new();
    for i in 0..199 {
        q.set_t(100.0 * i as f64 + 200.0);
        q.update_thermo_from_pt().unwrap();
        q.update_trans_coeffs().unwrap();
        assert_eq!(q.phase(), StatePhase::FullyUpdated);
        rows.push((q.t(), q.mu().unwrap(), q.k().unwrap()));
    }

    assert_eq!(rows.len(), 199);
    assert_eq!(rows[0].0, 200.0);
    assert_eq!(rows[198].0, 20_000.0);
    for (t, mu, k) in &rows {
        assert!(mu.is_finite() && *mu > 0.0, "mu at {t} K");
        assert!(k.is_finite() && *k > 0.0, "k at {t} K");
    }
    for w in rows.windows(2) {
        assert!(w[1].1 > w[0].1, "mu not increasing at {} K", w[1].0);
        assert!(w[1].2 > w[0].2, "k not increasing at {} K", w[1].0);
    }

    // Reference values from an independent evaluation of the same fits.
    assert!(rel_err(rows[0].1, 1.325141e-5) < 1e-6);
    assert!(rel_err(rows[0].2, 1.849553e-2) < 1e-6);
    assert!(rel_err(rows[198].1, 3.904180e-4) < 1e-6);
    assert!(rel_err(rows[198].2, 1.562222) < 1e-6);
}

#[test]
fn parallel_sweep_matches_sequential_states() {
    let model = air_model();
    let y = MassFractions::from_named(&model, [("N2", 0.78), ("O2", 0.22)]).unwrap();
    let sweep = SweepDefinition::from_step(SweepQuantity::Temperature, 200.0, 100.0, 199).unwrap();
    let result = execute_temperature_sweep_at_pressure(&model, &y, &sweep, 1.0e5).unwrap();
    assert!(result.is_complete());
    assert_eq!(result.num_successful(), 199);

    let mut q = GasState::new(&model);
    q.set_mass_fractions(y.clone()).unwrap();
    for (t, point) in result.successful() {
        q.set_t(t);
        q.update_all_from_pt().unwrap();
        assert_eq!(point.transport.mu, q.mu().unwrap());
        assert_eq!(point.transport.k, q.k().unwrap());
        assert_eq!(point.thermo.rho, q.rho().unwrap());
    }
}

#[test]
fn outside_intersection_is_out_of_range() {
    let model = air_model();
    let mut q = GasState::new(&model);
    q.set_massf([("N2", 0.78), ("O2", 0.22)]).unwrap();
    for t in [199.0, 20_001.0] {
        q.set_t(t);
        assert!(q.update_thermo_from_pt().is_err());
        assert_eq!(q.phase(), StatePhase::Stale);
    }
}

#[test]
fn thermo_window_wider_than_transport_window() {
    let model = load("thermally-perfect-N2-O2-cea15000.yaml");
    let mut q = GasState::new(&model);
    q.set_massf([("N2", 0.78), ("O2", 0.22)]).unwrap();
    q.set_t(17_000.0);

    q.update_thermo_from_pt().unwrap();
    assert_eq!(q.phase(), StatePhase::ThermoUpdated);
    assert!(q.rho().unwrap() > 0.0);

    match q.update_trans_coeffs() {
        Err(GasError::Domain(DomainError::OutOfRange {
            species,
            fit,
            t,
            t_lo,
            t_hi,
        })) => {
            assert_eq!(species, "N2");
            assert_eq!(fit, FitKind::Viscosity);
            assert_eq!((t, t_lo, t_hi), (17_000.0, 200.0, 15_000.0));
        }
        other => panic!("expected viscosity OutOfRange, got {other:?}"),
    }
    assert_eq!(q.phase(), StatePhase::Stale);
    assert!(q.rho().is_err());

    // The window end itself is valid.
    q.set_t(15_000.0);
    q.update_all_from_pt().unwrap();
    assert_eq!(q.phase(), StatePhase::FullyUpdated);
}

#[test]
fn table_sweep_fails_only_above_published_transport_window() {
    let model = load("thermally-perfect-N2-O2-cea15000.yaml");
    let y = MassFractions::from_named(&model, [("N2", 0.78), ("O2", 0.22)]).unwrap();
    let sweep = SweepDefinition::from_step(SweepQuantity::Temperature, 200.0, 100.0, 199).unwrap();
    let result = execute_temperature_sweep_at_pressure(&model, &y, &sweep, 1.0e5).unwrap();

    assert_eq!(result.num_successful(), 149);
    assert_eq!(result.failures.len(), 50);
    assert!(result.failures.iter().all(|f| f.value > 15_000.0));
    assert!(result.failures.iter().all(|f| matches!(
        f.error,
        GasError::Domain(DomainError::OutOfRange {
            fit: FitKind::Viscosity,
            ..
        })
    )));
}
