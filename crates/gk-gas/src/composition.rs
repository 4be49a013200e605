//! Mixture composition expressed as mass fractions over a model's species.

use crate::error::{CompositionIssue, DomainError};
use crate::model::GasModel;
use gk_core::numeric::{Tolerances, nearly_equal};

/// Allowed deviation of the fraction sum from 1.
pub const FRACTION_SUM_TOL: f64 = 1e-6;

/// Mass fractions indexed by the species order of a [`GasModel`].
///
/// The species names travel with the fractions, so a composition built for
/// one model is rejected by a model with a different species list or order.
/// Individual fractions are always finite and in [0, 1]. The sum is never
/// normalized; [`MassFractions::check`] rejects sums away from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct MassFractions {
    species: Vec<String>,
    fractions: Vec<f64>,
}

impl MassFractions {
    /// Build from `(species name, mass fraction)` pairs; omitted species get 0.
    pub fn from_named<I, S>(model: &GasModel, entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        Ok(Self {
            species: species_names(model),
            fractions: collect_named(model, entries)?,
        })
    }

    /// Build from `(species name, mole fraction)` pairs.
    ///
    /// Mole fractions must already sum to 1; they are converted with the
    /// model's molecular weights, `Y_i = x_i M_i / Σ x_j M_j`.
    pub fn from_mole_fractions<I, S>(model: &GasModel, entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let x = collect_named(model, entries)?;
        check_sum(x.iter().sum())?;
        let mix_mw: f64 = x
            .iter()
            .zip(model.species())
            .map(|(xi, sp)| xi * sp.molecular_weight())
            .sum();
        let fractions = x
            .iter()
            .zip(model.species())
            .map(|(xi, sp)| xi * sp.molecular_weight() / mix_mw)
            .collect();
        Ok(Self {
            species: species_names(model),
            fractions,
        })
    }

    /// Single species with mass fraction 1.
    pub fn pure(model: &GasModel, name: &str) -> Result<Self, DomainError> {
        Self::from_named(model, [(name, 1.0)])
    }

    /// Species at `idx` with mass fraction 1.
    pub(crate) fn pure_index(model: &GasModel, idx: usize) -> Self {
        let mut fractions = vec![0.0; model.n_species()];
        if let Some(y) = fractions.get_mut(idx) {
            *y = 1.0;
        }
        Self {
            species: species_names(model),
            fractions,
        }
    }

    /// Build from a vector already in model species order.
    pub fn from_vec(model: &GasModel, fractions: Vec<f64>) -> Result<Self, DomainError> {
        if fractions.len() != model.n_species() {
            return Err(CompositionIssue::LengthMismatch {
                expected: model.n_species(),
                found: fractions.len(),
            }
            .into());
        }
        for (value, sp) in fractions.iter().zip(model.species()) {
            check_fraction(sp.name(), *value)?;
        }
        Ok(Self {
            species: species_names(model),
            fractions,
        })
    }

    /// Verify that the composition was built for `model`'s species, in the
    /// same order, and that fractions sum to 1.
    pub fn check(&self, model: &GasModel) -> Result<(), DomainError> {
        if !self.matches(model) {
            return Err(CompositionIssue::SpeciesMismatch {
                expected: species_names(model),
                found: self.species.clone(),
            }
            .into());
        }
        check_sum(self.sum())
    }

    /// Whether the species list equals `model`'s, in order.
    pub fn matches(&self, model: &GasModel) -> bool {
        self.species.len() == model.n_species()
            && self
                .species
                .iter()
                .zip(model.species())
                .all(|(name, sp)| name == sp.name())
    }

    /// Re-index onto `model` by species name.
    ///
    /// Every named species must exist in `model`; species `model` has but
    /// this composition lacks get 0.
    pub fn remap(&self, model: &GasModel) -> Result<Self, DomainError> {
        Self::from_named(model, self.named())
    }

    /// `(species name, mass fraction)` pairs in stored order.
    pub fn named(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.species
            .iter()
            .map(String::as_str)
            .zip(self.fractions.iter().copied())
    }

    pub fn species_names(&self) -> &[String] {
        &self.species
    }

    pub fn sum(&self) -> f64 {
        self.fractions.iter().sum()
    }

    pub fn get(&self, idx: usize) -> f64 {
        self.fractions.get(idx).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.fractions
    }

    /// Species indices with a non-zero fraction.
    pub fn active(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.fractions
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, y)| *y > 0.0)
    }

    /// Mole fractions `x_i = (Y_i/M_i) / Σ (Y_j/M_j)`.
    pub fn mole_fractions(&self, model: &GasModel) -> Vec<f64> {
        let moles: Vec<f64> = self
            .fractions
            .iter()
            .zip(model.species())
            .map(|(y, sp)| y / sp.molecular_weight())
            .collect();
        let total: f64 = moles.iter().sum();
        if total <= 0.0 {
            return vec![0.0; moles.len()];
        }
        moles.into_iter().map(|n| n / total).collect()
    }

    /// Mixture molecular weight [kg/mol], `1 / Σ (Y_i/M_i)`.
    pub fn mixture_molecular_weight(&self, model: &GasModel) -> f64 {
        let moles: f64 = self
            .fractions
            .iter()
            .zip(model.species())
            .map(|(y, sp)| y / sp.molecular_weight())
            .sum();
        1.0 / moles
    }
}

fn species_names(model: &GasModel) -> Vec<String> {
    model.species().iter().map(|sp| sp.name().to_string()).collect()
}

fn collect_named<I, S>(model: &GasModel, entries: I) -> Result<Vec<f64>, DomainError>
where
    I: IntoIterator<Item = (S, f64)>,
    S: AsRef<str>,
{
    let mut fractions = vec![0.0; model.n_species()];
    let mut seen = vec![false; model.n_species()];
    for (name, value) in entries {
        let name = name.as_ref();
        let idx = model
            .index_of(name)
            .ok_or_else(|| CompositionIssue::UnknownSpecies {
                name: name.to_string(),
            })?;
        if seen[idx] {
            return Err(CompositionIssue::DuplicateSpecies {
                name: name.to_string(),
            }
            .into());
        }
        check_fraction(name, value)?;
        seen[idx] = true;
        fractions[idx] = value;
    }
    Ok(fractions)
}

fn check_fraction(name: &str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(CompositionIssue::FractionOutOfBounds {
            name: name.to_string(),
            value,
        }
        .into());
    }
    Ok(())
}

fn check_sum(sum: f64) -> Result<(), DomainError> {
    if !nearly_equal(sum, 1.0, Tolerances::absolute(FRACTION_SUM_TOL)) {
        return Err(CompositionIssue::BadSum {
            sum,
            tolerance: FRACTION_SUM_TOL,
        }
        .into());
    }
    Ok(())
}
