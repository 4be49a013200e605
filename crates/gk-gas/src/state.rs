//! Mutable gas state with an explicit update-phase machine.

use crate::composition::MassFractions;
use crate::error::{DomainError, GasResult, PreconditionViolation};
use crate::model::GasModel;
use crate::thermo::{self, ThermoProps};
use crate::transport::{self, TransportProps};
use gk_core::constants::R_UNIVERSAL;
use gk_core::units::{Density, DynVisc, Pressure, Temperature, ThermCond, Velocity};
use gk_core::{k, kg_per_m3, mps, pa, pa_s, w_per_m_k};
use std::fmt;
use tracing::trace;

/// Default pressure of a fresh state [Pa].
pub const DEFAULT_PRESSURE: f64 = 1.0e5;
/// Default temperature of a fresh state [K].
pub const DEFAULT_TEMPERATURE: f64 = 300.0;

/// How far the derived quantities of a [`GasState`] have been computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatePhase {
    /// Inputs changed since the last successful update.
    Stale,
    /// Thermodynamic properties are current.
    ThermoUpdated,
    /// Thermodynamic and transport properties are current.
    FullyUpdated,
}

impl fmt::Display for StatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatePhase::Stale => "stale",
            StatePhase::ThermoUpdated => "thermo-updated",
            StatePhase::FullyUpdated => "fully-updated",
        };
        f.write_str(s)
    }
}

/// Pressure, temperature and composition of one gas sample, plus the
/// properties derived from them by the last successful update.
///
/// Any setter resets the phase to [`StatePhase::Stale`]. Derived getters
/// return [`PreconditionViolation`] until the matching update has run.
#[derive(Debug, Clone)]
pub struct GasState<'m> {
    model: &'m GasModel,
    p: f64,
    t: f64,
    massf: MassFractions,
    thermo: Option<ThermoProps>,
    transport: Option<TransportProps>,
}

impl<'m> GasState<'m> {
    /// Fresh stale state: 1 bar, 300 K, pure first species of the model.
    pub fn new(model: &'m GasModel) -> Self {
        Self {
            model,
            p: DEFAULT_PRESSURE,
            t: DEFAULT_TEMPERATURE,
            massf: MassFractions::pure_index(model, 0),
            thermo: None,
            transport: None,
        }
    }

    /// Fresh stale state with a composition already validated for `model`.
    pub(crate) fn with_composition(model: &'m GasModel, massf: MassFractions) -> Self {
        Self {
            massf,
            ..Self::new(model)
        }
    }

    pub fn model(&self) -> &'m GasModel {
        self.model
    }

    pub fn phase(&self) -> StatePhase {
        match (&self.thermo, &self.transport) {
            (None, _) => StatePhase::Stale,
            (Some(_), None) => StatePhase::ThermoUpdated,
            (Some(_), Some(_)) => StatePhase::FullyUpdated,
        }
    }

    fn invalidate(&mut self) {
        self.thermo = None;
        self.transport = None;
    }

    // Setters

    pub fn set_p(&mut self, p: f64) {
        self.p = p;
        self.invalidate();
    }

    pub fn set_t(&mut self, t: f64) {
        self.t = t;
        self.invalidate();
    }

    pub fn set_pressure(&mut self, p: Pressure) {
        self.set_p(p.value);
    }

    pub fn set_temperature(&mut self, t: Temperature) {
        self.set_t(t.value);
    }

    /// Replace the composition from `(name, mass fraction)` pairs.
    ///
    /// On error the previous composition and phase are kept.
    pub fn set_massf<I, S>(&mut self, entries: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let massf = MassFractions::from_named(self.model, entries)?;
        self.install(massf);
        Ok(())
    }

    /// Replace the composition from `(name, mole fraction)` pairs.
    pub fn set_molef<I, S>(&mut self, entries: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let massf = MassFractions::from_mole_fractions(self.model, entries)?;
        self.install(massf);
        Ok(())
    }

    /// Replace the composition, matching species by name.
    ///
    /// A composition built for another model is re-indexed onto this one;
    /// species this model does not know are rejected.
    pub fn set_mass_fractions(&mut self, massf: MassFractions) -> Result<(), DomainError> {
        let massf = if massf.matches(self.model) {
            massf
        } else {
            massf.remap(self.model)?
        };
        self.install(massf);
        Ok(())
    }

    fn install(&mut self, massf: MassFractions) {
        self.massf = massf;
        self.invalidate();
    }

    // Updates

    fn apply_thermo(
        &mut self,
        result: Result<ThermoProps, DomainError>,
    ) -> Result<(), DomainError> {
        self.invalidate();
        let props = result?;
        self.p = props.p;
        self.t = props.t;
        self.thermo = Some(props);
        trace!(p = self.p, t = self.t, "state thermo-updated");
        Ok(())
    }

    /// Compute thermodynamic properties from the current p and T.
    pub fn update_thermo_from_pt(&mut self) -> Result<(), DomainError> {
        let result = thermo::update_thermo_from_pt(self.model, &self.massf, self.p, self.t);
        self.apply_thermo(result)
    }

    /// Set density, keep the current T and derive p.
    pub fn update_thermo_from_rhot(&mut self, rho: f64) -> Result<(), DomainError> {
        let result = thermo::update_thermo_from_rhot(self.model, &self.massf, rho, self.t);
        self.apply_thermo(result)
    }

    /// Set density and internal energy; derive T and p.
    pub fn update_thermo_from_rhou(&mut self, rho: f64, u: f64) -> Result<(), DomainError> {
        let result = thermo::update_thermo_from_rhou(self.model, &self.massf, rho, u);
        self.apply_thermo(result)
    }

    /// Set enthalpy, keep the current p and derive T.
    pub fn update_thermo_from_ph(&mut self, h: f64) -> Result<(), DomainError> {
        let result = thermo::update_thermo_from_ph(self.model, &self.massf, self.p, h);
        self.apply_thermo(result)
    }

    /// Compute mixture transport coefficients at the current T.
    ///
    /// Requires a thermo-updated (or fully-updated) state. A domain failure
    /// leaves the state stale.
    pub fn update_trans_coeffs(&mut self) -> GasResult<()> {
        if self.thermo.is_none() {
            return Err(PreconditionViolation {
                property: "transport coefficients",
                required: StatePhase::ThermoUpdated,
                actual: self.phase(),
            }
            .into());
        }
        match transport::update_trans_coeffs(self.model, &self.massf, self.t) {
            Ok(props) => {
                self.transport = Some(props);
                trace!(t = self.t, "state fully-updated");
                Ok(())
            }
            Err(err) => {
                self.invalidate();
                Err(err.into())
            }
        }
    }

    /// Shorthand for `update_thermo_from_pt` followed by `update_trans_coeffs`.
    pub fn update_all_from_pt(&mut self) -> GasResult<()> {
        self.update_thermo_from_pt()?;
        self.update_trans_coeffs()
    }

    // Always-available inputs

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.p)
    }

    pub fn temperature(&self) -> Temperature {
        k(self.t)
    }

    pub fn mass_fractions(&self) -> &MassFractions {
        &self.massf
    }

    /// Mass fraction of a species, `None` if the model has no such species.
    pub fn massf(&self, name: &str) -> Option<f64> {
        self.model.index_of(name).map(|i| self.massf.get(i))
    }

    /// Mole fractions in model species order.
    pub fn molef(&self) -> Vec<f64> {
        self.massf.mole_fractions(self.model)
    }

    // Phase-checked derived properties

    pub fn thermo_props(&self) -> Result<&ThermoProps, PreconditionViolation> {
        self.thermo.as_ref().ok_or(PreconditionViolation {
            property: "thermodynamic properties",
            required: StatePhase::ThermoUpdated,
            actual: self.phase(),
        })
    }

    pub fn transport_props(&self) -> Result<&TransportProps, PreconditionViolation> {
        self.transport.as_ref().ok_or(PreconditionViolation {
            property: "transport coefficients",
            required: StatePhase::FullyUpdated,
            actual: self.phase(),
        })
    }

    fn thermo_value(
        &self,
        property: &'static str,
        get: impl FnOnce(&ThermoProps) -> f64,
    ) -> Result<f64, PreconditionViolation> {
        self.thermo.as_ref().map(get).ok_or(PreconditionViolation {
            property,
            required: StatePhase::ThermoUpdated,
            actual: self.phase(),
        })
    }

    fn transport_value(
        &self,
        property: &'static str,
        get: impl FnOnce(&TransportProps) -> f64,
    ) -> Result<f64, PreconditionViolation> {
        self.transport.as_ref().map(get).ok_or(PreconditionViolation {
            property,
            required: StatePhase::FullyUpdated,
            actual: self.phase(),
        })
    }

    /// Density [kg/m^3].
    pub fn rho(&self) -> Result<f64, PreconditionViolation> {
        self.thermo_value("rho", |t| t.rho)
    }

    /// Specific internal energy [J/kg].
    pub fn e(&self) -> Result<f64, PreconditionViolation> {
        self.thermo_value("e", |t| t.e)
    }

    /// Specific enthalpy [J/kg].
    pub fn h(&self) -> Result<f64, PreconditionViolation> {
        self.thermo_value("h", |t| t.h)
    }

    pub fn cp(&self) -> Result<f64, PreconditionViolation> {
        self.thermo_value("cp", |t| t.cp)
    }

    pub fn cv(&self) -> Result<f64, PreconditionViolation> {
        self.thermo_value("cv", |t| t.cv)
    }

    pub fn gamma(&self) -> Result<f64, PreconditionViolation> {
        self.thermo_value("gamma", |t| t.gamma)
    }

    /// Sound speed [m/s].
    pub fn a(&self) -> Result<f64, PreconditionViolation> {
        self.thermo_value("a", |t| t.a)
    }

    /// Specific entropy [J/(kg·K)].
    pub fn s(&self) -> Result<f64, PreconditionViolation> {
        self.thermo_value("s", |t| t.s)
    }

    /// Dynamic viscosity [Pa·s].
    pub fn mu(&self) -> Result<f64, PreconditionViolation> {
        self.transport_value("mu", |t| t.mu)
    }

    /// Thermal conductivity [W/(m·K)].
    pub fn k(&self) -> Result<f64, PreconditionViolation> {
        self.transport_value("k", |t| t.k)
    }

    /// Molar concentrations [mol/m^3] in model species order.
    pub fn conc(&self) -> Result<Vec<f64>, PreconditionViolation> {
        let thermo = self.thermo_props()?;
        let total = thermo.p / (R_UNIVERSAL * thermo.t);
        Ok(self.molef().into_iter().map(|x| x * total).collect())
    }

    pub fn density(&self) -> Result<Density, PreconditionViolation> {
        self.rho().map(kg_per_m3)
    }

    pub fn sound_speed(&self) -> Result<Velocity, PreconditionViolation> {
        self.a().map(mps)
    }

    pub fn viscosity(&self) -> Result<DynVisc, PreconditionViolation> {
        self.mu().map(pa_s)
    }

    pub fn conductivity(&self) -> Result<ThermCond, PreconditionViolation> {
        self.k().map(w_per_m_k)
    }
}

impl fmt::Display for GasState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p = {} Pa, T = {} K [{}]", self.p, self.t, self.phase())?;
        if let Some(th) = &self.thermo {
            write!(f, ", rho = {:.6e} kg/m^3, e = {:.6e} J/kg, h = {:.6e} J/kg", th.rho, th.e, th.h)?;
        }
        if let Some(tr) = &self.transport {
            write!(f, ", mu = {:.6e} Pa.s, k = {:.6e} W/(m.K)", tr.mu, tr.k)?;
        }
        Ok(())
    }
}
