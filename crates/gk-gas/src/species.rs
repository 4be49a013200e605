//! Species database records.

use crate::curve_fit::{CeaTransport, FitTableError, Nasa9, PiecewiseFit};
use crate::error::{DomainError, LoadError};
use gk_core::constants::{MICROPOISE, MICROWATT_PER_CM_K, P_REF, R_UNIVERSAL, T_REF};
use gk_defs::{FitKind, ReferenceDef, SpeciesDef};

/// Standard-state reference constants for a species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceState {
    /// Reference temperature [K] at which the enthalpy equals the formation enthalpy.
    pub temperature: f64,
    /// Reference pressure [Pa] for the entropy pressure term.
    pub pressure: f64,
}

impl Default for ReferenceState {
    fn default() -> Self {
        Self {
            temperature: T_REF,
            pressure: P_REF,
        }
    }
}

impl From<&ReferenceDef> for ReferenceState {
    fn from(def: &ReferenceDef) -> Self {
        let base = Self::default();
        Self {
            temperature: def.temperature.unwrap_or(base.temperature),
            pressure: def.pressure.unwrap_or(base.pressure),
        }
    }
}

/// Immutable per-species data: molecular weight and curve fits.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    name: String,
    description: Option<String>,
    /// [kg/mol]
    molecular_weight: f64,
    thermo: PiecewiseFit<Nasa9>,
    viscosity: PiecewiseFit<CeaTransport>,
    conductivity: PiecewiseFit<CeaTransport>,
    reference: ReferenceState,
}

impl Species {
    /// Build a species from fit segments, enforcing the database invariants.
    pub fn new(
        name: impl Into<String>,
        molecular_weight: f64,
        thermo: Vec<Nasa9>,
        viscosity: Vec<CeaTransport>,
        conductivity: Vec<CeaTransport>,
    ) -> Result<Self, LoadError> {
        let name = name.into();
        if !molecular_weight.is_finite() || molecular_weight <= 0.0 {
            return Err(LoadError::InvalidMolecularWeight {
                species: name,
                value: molecular_weight,
            });
        }
        let fit_err = |fit: FitKind, e: FitTableError| LoadError::InvalidFit {
            species: name.clone(),
            fit,
            reason: e.reason(),
        };
        let thermo = PiecewiseFit::new(thermo).map_err(|e| fit_err(FitKind::Thermo, e))?;
        let viscosity =
            PiecewiseFit::new(viscosity).map_err(|e| fit_err(FitKind::Viscosity, e))?;
        let conductivity = PiecewiseFit::new(conductivity)
            .map_err(|e| fit_err(FitKind::ThermalConductivity, e))?;

        Ok(Self {
            name,
            description: None,
            molecular_weight,
            thermo,
            viscosity,
            conductivity,
            reference: ReferenceState::default(),
        })
    }

    pub fn from_def(def: &SpeciesDef) -> Result<Self, LoadError> {
        let thermo = def
            .thermo
            .iter()
            .map(|seg| {
                Nasa9::try_from(seg).map_err(|_| LoadError::InvalidFit {
                    species: def.name.clone(),
                    fit: FitKind::Thermo,
                    reason: "NASA-9 segment needs 7 a and 2 b coefficients",
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let viscosity = def.viscosity.iter().map(CeaTransport::from).collect();
        let conductivity = def
            .thermal_conductivity
            .iter()
            .map(CeaTransport::from)
            .collect();

        let mut species = Self::new(
            def.name.clone(),
            def.molecular_weight,
            thermo,
            viscosity,
            conductivity,
        )?;
        species.description = def.description.clone();
        if let Some(reference) = &def.reference {
            species.reference = ReferenceState::from(reference);
        }
        Ok(species)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Molecular weight [kg/mol].
    pub fn molecular_weight(&self) -> f64 {
        self.molecular_weight
    }

    /// Specific gas constant R/M [J/(kg·K)].
    pub fn gas_constant(&self) -> f64 {
        R_UNIVERSAL / self.molecular_weight
    }

    pub fn reference(&self) -> ReferenceState {
        self.reference
    }

    /// Validity window `(t_lo, t_hi)` of one of the species' fits.
    pub fn fit_range(&self, fit: FitKind) -> (f64, f64) {
        match fit {
            FitKind::Thermo => self.thermo.range(),
            FitKind::Viscosity => self.viscosity.range(),
            FitKind::ThermalConductivity => self.conductivity.range(),
        }
    }

    /// Intersection of the viscosity and conductivity windows.
    pub fn transport_range(&self) -> (f64, f64) {
        let (v_lo, v_hi) = self.viscosity.range();
        let (k_lo, k_hi) = self.conductivity.range();
        (v_lo.max(k_lo), v_hi.min(k_hi))
    }

    fn out_of_range(&self, fit: FitKind, t: f64) -> DomainError {
        let (t_lo, t_hi) = self.fit_range(fit);
        DomainError::OutOfRange {
            species: self.name.clone(),
            fit,
            t,
            t_lo,
            t_hi,
        }
    }

    fn thermo_segment(&self, t: f64) -> Result<&Nasa9, DomainError> {
        self.thermo
            .segment_for(t)
            .ok_or_else(|| self.out_of_range(FitKind::Thermo, t))
    }

    /// Specific heat at constant pressure [J/(kg·K)].
    pub fn cp(&self, t: f64) -> Result<f64, DomainError> {
        Ok(self.thermo_segment(t)?.cp_r(t) * self.gas_constant())
    }

    /// Specific enthalpy [J/kg], including the enthalpy of formation.
    pub fn enthalpy(&self, t: f64) -> Result<f64, DomainError> {
        Ok(self.thermo_segment(t)?.h_rt(t) * self.gas_constant() * t)
    }

    /// Specific internal energy [J/kg].
    pub fn internal_energy(&self, t: f64) -> Result<f64, DomainError> {
        Ok(self.enthalpy(t)? - self.gas_constant() * t)
    }

    /// Enthalpy at the reference temperature [J/kg]; the formation enthalpy
    /// for NASA-9 data.
    pub fn reference_enthalpy(&self) -> Result<f64, DomainError> {
        self.enthalpy(self.reference.temperature)
    }

    /// Standard-state specific entropy at the reference pressure [J/(kg·K)].
    pub fn standard_entropy(&self, t: f64) -> Result<f64, DomainError> {
        Ok(self.thermo_segment(t)?.s_r(t) * self.gas_constant())
    }

    /// Dynamic viscosity [Pa·s].
    pub fn viscosity(&self, t: f64) -> Result<f64, DomainError> {
        let seg = self
            .viscosity
            .segment_for(t)
            .ok_or_else(|| self.out_of_range(FitKind::Viscosity, t))?;
        Ok(seg.eval(t) * MICROPOISE)
    }

    /// Thermal conductivity [W/(m·K)].
    pub fn thermal_conductivity(&self, t: f64) -> Result<f64, DomainError> {
        let seg = self
            .conductivity
            .segment_for(t)
            .ok_or_else(|| self.out_of_range(FitKind::ThermalConductivity, t))?;
        Ok(seg.eval(t) * MICROWATT_PER_CM_K)
    }

    /// Number of segments in a fit table.
    pub fn segment_count(&self, fit: FitKind) -> usize {
        match fit {
            FitKind::Thermo => self.thermo.segments().len(),
            FitKind::Viscosity => self.viscosity.segments().len(),
            FitKind::ThermalConductivity => self.conductivity.segments().len(),
        }
    }

    /// Whether every fit of the species covers `t`.
    pub fn covers(&self, t: f64) -> bool {
        self.thermo.segment_for(t).is_some()
            && self.viscosity.segment_for(t).is_some()
            && self.conductivity.segment_for(t).is_some()
    }
}
