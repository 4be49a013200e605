//! Parallel execution of property sweeps.
//!
//! Each rayon task owns one [`GasState`]; the shared [`GasModel`] is only
//! read. Results come back in sweep order regardless of scheduling.

use crate::composition::MassFractions;
use crate::error::{DomainError, GasError, GasResult};
use crate::model::GasModel;
use crate::state::GasState;
use crate::sweeps::{SweepDefinition, SweepQuantity};
use crate::thermo::ThermoProps;
use crate::transport::TransportProps;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

/// Error in sweep setup. Per-point failures are reported in [`SweepResult`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid sweep configuration: {reason}")]
    InvalidConfiguration { reason: &'static str },

    #[error("Expected a {expected} sweep, got {found}")]
    WrongQuantity {
        expected: SweepQuantity,
        found: SweepQuantity,
    },

    #[error("Sweep composition rejected: {0}")]
    Composition(#[from] DomainError),
}

/// Fully-updated properties at one sweep point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub thermo: ThermoProps,
    pub transport: TransportProps,
}

/// A sweep point whose update failed.
#[derive(Debug)]
pub struct SweepFailure {
    pub index: usize,
    pub value: f64,
    pub error: GasError,
}

/// Result of a property sweep.
#[derive(Debug)]
pub struct SweepResult {
    pub quantity: SweepQuantity,
    /// Independent variable values, in sweep order.
    pub independent_values: Vec<f64>,
    /// One entry per value; `None` where the update failed.
    pub points: Vec<Option<SweepPoint>>,
    pub failures: Vec<SweepFailure>,
}

impl SweepResult {
    pub fn num_successful(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    pub fn num_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// `(value, point)` pairs for successful points.
    pub fn successful(&self) -> impl Iterator<Item = (f64, &SweepPoint)> + '_ {
        self.independent_values
            .iter()
            .zip(&self.points)
            .filter_map(|(v, p)| p.as_ref().map(|p| (*v, p)))
    }

    /// Viscosity array [Pa·s] (excluding failed points).
    pub fn viscosity(&self) -> Vec<f64> {
        self.successful().map(|(_, p)| p.transport.mu).collect()
    }

    /// Thermal conductivity array [W/(m·K)] (excluding failed points).
    pub fn conductivity(&self) -> Vec<f64> {
        self.successful().map(|(_, p)| p.transport.k).collect()
    }

    /// Density array [kg/m^3] (excluding failed points).
    pub fn density(&self) -> Vec<f64> {
        self.successful().map(|(_, p)| p.thermo.rho).collect()
    }
}

/// Temperature sweep at fixed pressure.
pub fn execute_temperature_sweep_at_pressure(
    model: &GasModel,
    massf: &MassFractions,
    sweep: &SweepDefinition,
    fixed_pressure_pa: f64,
) -> Result<SweepResult, SweepError> {
    expect_quantity(sweep, SweepQuantity::Temperature)?;
    execute(model, massf, sweep, |state, t| {
        state.set_p(fixed_pressure_pa);
        state.set_t(t);
    })
}

/// Pressure sweep at fixed temperature.
pub fn execute_pressure_sweep_at_temperature(
    model: &GasModel,
    massf: &MassFractions,
    sweep: &SweepDefinition,
    fixed_temperature_k: f64,
) -> Result<SweepResult, SweepError> {
    expect_quantity(sweep, SweepQuantity::Pressure)?;
    execute(model, massf, sweep, |state, p| {
        state.set_p(p);
        state.set_t(fixed_temperature_k);
    })
}

fn expect_quantity(sweep: &SweepDefinition, expected: SweepQuantity) -> Result<(), SweepError> {
    if sweep.quantity != expected {
        return Err(SweepError::WrongQuantity {
            expected,
            found: sweep.quantity,
        });
    }
    Ok(())
}

fn execute<F>(
    model: &GasModel,
    massf: &MassFractions,
    sweep: &SweepDefinition,
    apply: F,
) -> Result<SweepResult, SweepError>
where
    F: Fn(&mut GasState<'_>, f64) + Sync,
{
    massf.check(model)?;
    let values = sweep.generate_points();
    debug!(sweep = %sweep, model = model.name(), "executing sweep");

    let outcomes: Vec<GasResult<SweepPoint>> = values
        .par_iter()
        .map_init(
            || GasState::with_composition(model, massf.clone()),
            |state, &value| -> GasResult<SweepPoint> {
                apply(state, value);
                state.update_all_from_pt()?;
                Ok(SweepPoint {
                    thermo: *state.thermo_props()?,
                    transport: *state.transport_props()?,
                })
            },
        )
        .collect();

    let mut points = Vec::with_capacity(values.len());
    let mut failures = Vec::new();
    for (index, (outcome, &value)) in outcomes.into_iter().zip(&values).enumerate() {
        match outcome {
            Ok(point) => points.push(Some(point)),
            Err(error) => {
                warn!(index, value, %error, "sweep point failed");
                points.push(None);
                failures.push(SweepFailure { index, value, error });
            }
        }
    }
    debug!(
        successful = points.len() - failures.len(),
        failed = failures.len(),
        "sweep finished"
    );

    Ok(SweepResult {
        quantity: sweep.quantity,
        independent_values: values,
        points,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweeps::SweepType;
    use std::path::PathBuf;

    fn air() -> GasModel {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../models/thermally-perfect-N2-O2.yaml");
        GasModel::load(path).unwrap()
    }

    #[test]
    fn temperature_sweep_in_order() {
        let model = air();
        let y = MassFractions::from_named(&model, [("N2", 0.78), ("O2", 0.22)]).unwrap();
        let sweep = SweepDefinition::from_step(SweepQuantity::Temperature, 200.0, 100.0, 50).unwrap();
        let result = execute_temperature_sweep_at_pressure(&model, &y, &sweep, 1e5).unwrap();
        assert!(result.is_complete());
        assert_eq!(result.num_successful(), 50);
        for (t, point) in result.successful() {
            assert_eq!(point.thermo.t, t);
            assert_eq!(point.transport.t, t);
            assert_eq!(point.thermo.p, 1e5);
        }
        let mu = result.viscosity();
        assert!(mu.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn failed_points_are_reported_in_place() {
        let model = air();
        let y = MassFractions::pure(&model, "N2").unwrap();
        let sweep = SweepDefinition::from_step(SweepQuantity::Temperature, 19_000.0, 500.0, 4).unwrap();
        let result = execute_temperature_sweep_at_pressure(&model, &y, &sweep, 1e5).unwrap();
        assert_eq!(result.num_successful(), 3);
        assert_eq!(result.num_failed(), 1);
        assert!(result.points[3].is_none());
        assert_eq!(result.failures[0].index, 3);
        assert_eq!(result.failures[0].value, 20_500.0);
        assert!(matches!(
            result.failures[0].error,
            GasError::Domain(DomainError::OutOfRange { .. })
        ));
    }

    #[test]
    fn pressure_sweep_density_scales() {
        let model = air();
        let y = MassFractions::from_named(&model, [("N2", 0.78), ("O2", 0.22)]).unwrap();
        let sweep =
            SweepDefinition::between(SweepQuantity::Pressure, 1e4, 1e6, 3, SweepType::Logarithmic)
                .unwrap();
        let result = execute_pressure_sweep_at_temperature(&model, &y, &sweep, 500.0).unwrap();
        let rho = result.density();
        assert_eq!(rho.len(), 3);
        assert!((rho[1] / rho[0] - 10.0).abs() < 1e-9);
        assert!((rho[2] / rho[1] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn setup_errors() {
        let model = air();
        let y = MassFractions::pure(&model, "N2").unwrap();
        let sweep = SweepDefinition::from_step(SweepQuantity::Pressure, 1e5, 1e5, 3).unwrap();
        assert_eq!(
            execute_temperature_sweep_at_pressure(&model, &y, &sweep, 1e5).unwrap_err(),
            SweepError::WrongQuantity {
                expected: SweepQuantity::Temperature,
                found: SweepQuantity::Pressure,
            }
        );

        let bad = MassFractions::from_named(&model, [("N2", 0.5)]).unwrap();
        assert!(matches!(
            execute_pressure_sweep_at_temperature(&model, &bad, &sweep, 300.0),
            Err(SweepError::Composition(DomainError::InvalidComposition(_)))
        ));
    }
}
