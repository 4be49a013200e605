//! The immutable gas model: species database plus mixing rule.

use crate::composition::MassFractions;
use crate::error::{DomainError, LoadError};
use crate::species::Species;
use crate::thermo::{self, ThermoProps};
use crate::transport::{self, MixingRule, TransportProps};
use gk_defs::{FitKind, ModelDef};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Thermally-perfect, non-reacting multi-species gas model.
///
/// Built once by the loader and shared read-only by any number of
/// [`GasState`](crate::GasState)s. `GasModel` is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct GasModel {
    name: String,
    description: Option<String>,
    species: Vec<Species>,
    index: HashMap<String, usize>,
    mixing_rule: MixingRule,
}

impl GasModel {
    pub fn new(
        name: impl Into<String>,
        species: Vec<Species>,
        mixing_rule: MixingRule,
    ) -> Result<Self, LoadError> {
        if species.is_empty() {
            return Err(LoadError::NoSpecies);
        }
        let mut index = HashMap::with_capacity(species.len());
        for (i, sp) in species.iter().enumerate() {
            if index.insert(sp.name().to_string(), i).is_some() {
                return Err(LoadError::DuplicateSpecies {
                    name: sp.name().to_string(),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            description: None,
            species,
            index,
            mixing_rule,
        })
    }

    /// Build a model from a parsed definition.
    pub fn from_def(def: &ModelDef) -> Result<Self, LoadError> {
        gk_defs::validate_model(def)?;
        let species = def
            .ordered_species()
            .into_iter()
            .map(Species::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        let mut model = Self::new(def.name.clone(), species, def.mixing_rule.into())?;
        model.description = def.description.clone();
        debug!(
            model = %model.name,
            n_species = model.n_species(),
            mixing_rule = ?model.mixing_rule,
            "gas model built"
        );
        Ok(model)
    }

    /// Load a model definition file (YAML or JSON, by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading gas model");
        let def = gk_defs::load(path)?;
        Self::from_def(&def)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, LoadError> {
        Self::from_def(&gk_defs::from_yaml_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Self::from_def(&gk_defs::from_json_str(content)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn species_at(&self, idx: usize) -> Option<&Species> {
        self.species.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn species_by_name(&self, name: &str) -> Option<&Species> {
        self.index_of(name).map(|i| &self.species[i])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.species.iter().map(|s| s.name())
    }

    pub fn mixing_rule(&self) -> MixingRule {
        self.mixing_rule
    }

    /// Intersection of a fit's validity windows over the species active in `massf`.
    ///
    /// Returns `None` when the windows do not overlap.
    pub fn common_range(&self, massf: &MassFractions, fit: FitKind) -> Option<(f64, f64)> {
        let mut lo = f64::NEG_INFINITY;
        let mut hi = f64::INFINITY;
        for (i, _) in massf.active() {
            let (s_lo, s_hi) = self.species[i].fit_range(fit);
            lo = lo.max(s_lo);
            hi = hi.min(s_hi);
        }
        (lo.is_finite() && hi.is_finite() && lo < hi).then_some((lo, hi))
    }

    /// Thermodynamic properties at (p, T); see [`thermo::update_thermo_from_pt`].
    pub fn thermo_from_pt(
        &self,
        massf: &MassFractions,
        p: f64,
        t: f64,
    ) -> Result<ThermoProps, DomainError> {
        thermo::update_thermo_from_pt(self, massf, p, t)
    }

    /// Mixture transport coefficients at T; see [`transport::update_trans_coeffs`].
    pub fn trans_coeffs(&self, massf: &MassFractions, t: f64) -> Result<TransportProps, DomainError> {
        transport::update_trans_coeffs(self, massf, t)
    }
}
