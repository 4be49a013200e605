//! gk-gas: thermally-perfect gas mixture properties for gaskit.
//!
//! Provides:
//! - Species curve fits (NASA-9 thermo, CEA transport) with validity windows
//! - `GasModel`, the immutable species database built from a model definition
//! - Thermodynamic evaluator (p-T, rho-T, rho-u and p-h updates)
//! - Transport engine (Wilke mixing rule)
//! - `GasState`, a mutable state with an explicit update-phase machine
//! - Parallel temperature and pressure sweeps
//!
//! # Example
//!
//! ```no_run
//! use gk_gas::{GasModel, GasState};
//!
//! let model = GasModel::load("models/thermally-perfect-N2-O2.yaml")?;
//! let mut q = GasState::new(&model);
//! q.set_p(1.0e5);
//! q.set_massf([("N2", 0.78), ("O2", 0.22)])?;
//! q.set_t(300.0);
//! q.update_thermo_from_pt()?;
//! q.update_trans_coeffs()?;
//! println!("mu = {:e} Pa.s, k = {:e} W/(m.K)", q.mu()?, q.k()?);
//! # Ok::<(), gk_gas::GasError>(())
//! ```

pub mod composition;
pub mod curve_fit;
pub mod error;
pub mod model;
pub mod species;
pub mod state;
pub mod sweep_executor;
pub mod sweeps;
pub mod thermo;
pub mod transport;

// Re-exports for ergonomics
pub use composition::{FRACTION_SUM_TOL, MassFractions};
pub use curve_fit::{CeaTransport, FitSegment, FitTableError, Nasa9, PiecewiseFit};
pub use error::{
    CompositionIssue, DomainError, GasError, GasResult, LoadError, PreconditionViolation,
};
pub use gk_defs::FitKind;
pub use model::GasModel;
pub use species::{ReferenceState, Species};
pub use state::{GasState, StatePhase};
pub use sweep_executor::{
    SweepError, SweepFailure, SweepPoint, SweepResult, execute_pressure_sweep_at_temperature,
    execute_temperature_sweep_at_pressure,
};
pub use sweeps::{SweepDefinition, SweepQuantity, SweepType};
pub use thermo::{
    ThermoProps, update_thermo_from_ph, update_thermo_from_pt, update_thermo_from_rhot,
    update_thermo_from_rhou,
};
pub use transport::{MixingRule, TransportProps, update_trans_coeffs, wilke_mix, wilke_phi};
