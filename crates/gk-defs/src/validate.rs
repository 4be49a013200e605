//! Model definition validation.

use crate::schema::{FitKind, ModelDef, SpeciesDef};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

/// NASA-9 segments carry seven `a` and two `b` coefficients.
pub const NASA9_A_COUNT: usize = 7;
pub const NASA9_B_COUNT: usize = 2;

/// Allowed mismatch between adjacent segment bounds [K].
pub const SEGMENT_JOIN_TOL: f64 = 1e-9;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version} (latest is {latest})")]
    UnsupportedVersion { version: u32, latest: u32 },

    #[error("Model '{model}' defines no species")]
    NoSpecies { model: String },

    #[error("Duplicate species: {name}")]
    DuplicateSpecies { name: String },

    #[error("Missing reference: {name} in {context}")]
    MissingReference { name: String, context: String },

    #[error("Invalid value: {species}.{field} = {value} ({reason})")]
    InvalidValue {
        species: String,
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Species '{species}' has no {fit} fit")]
    MissingFit { species: String, fit: FitKind },

    #[error("Species '{species}' {fit} segment {index}: invalid range [{t_lo}, {t_hi}] K")]
    InvalidRange {
        species: String,
        fit: FitKind,
        index: usize,
        t_lo: f64,
        t_hi: f64,
    },

    #[error(
        "Species '{species}' {fit} segment {index} starts at {t_lo} K but the previous segment ends at {prev_hi} K"
    )]
    Discontinuous {
        species: String,
        fit: FitKind,
        index: usize,
        prev_hi: f64,
        t_lo: f64,
    },

    #[error(
        "Species '{species}' {fit} segment {index}: expected {expected} '{field}' coefficients, found {found}"
    )]
    CoefficientCount {
        species: String,
        fit: FitKind,
        index: usize,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Species '{species}' {fit} segment {index}: non-finite coefficient")]
    NonFiniteCoefficient {
        species: String,
        fit: FitKind,
        index: usize,
    },
}

pub fn validate_model(model: &ModelDef) -> Result<(), ValidationError> {
    if model.version == 0 || model.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: model.version,
            latest: LATEST_VERSION,
        });
    }

    if model.species.is_empty() {
        return Err(ValidationError::NoSpecies {
            model: model.name.clone(),
        });
    }

    let mut names = HashSet::new();
    for species in &model.species {
        if !names.insert(species.name.as_str()) {
            return Err(ValidationError::DuplicateSpecies {
                name: species.name.clone(),
            });
        }
        validate_species(species)?;
    }

    if let Some(order) = &model.species_order {
        let mut seen = HashSet::new();
        for name in order {
            if !names.contains(name.as_str()) {
                return Err(ValidationError::MissingReference {
                    name: name.clone(),
                    context: "species_order".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::DuplicateSpecies { name: name.clone() });
            }
        }
        if let Some(missing) = model
            .species
            .iter()
            .find(|s| !seen.contains(s.name.as_str()))
        {
            return Err(ValidationError::MissingReference {
                name: missing.name.clone(),
                context: "species_order (species not listed)".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_species(species: &SpeciesDef) -> Result<(), ValidationError> {
    if species.name.trim().is_empty() {
        return Err(ValidationError::MissingReference {
            name: species.name.clone(),
            context: "species name must not be empty".to_string(),
        });
    }

    let mw = species.molecular_weight;
    if !mw.is_finite() || mw <= 0.0 {
        return Err(ValidationError::InvalidValue {
            species: species.name.clone(),
            field: "molecular_weight",
            value: mw,
            reason: "must be positive and finite",
        });
    }

    if let Some(reference) = &species.reference {
        for (field, value) in [
            ("reference.temperature", reference.temperature),
            ("reference.pressure", reference.pressure),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ValidationError::InvalidValue {
                        species: species.name.clone(),
                        field,
                        value,
                        reason: "must be positive and finite",
                    });
                }
            }
        }
    }

    for (index, seg) in species.thermo.iter().enumerate() {
        check_count(species, FitKind::Thermo, index, "a", NASA9_A_COUNT, seg.a.len())?;
        check_count(species, FitKind::Thermo, index, "b", NASA9_B_COUNT, seg.b.len())?;
        if seg.a.iter().chain(&seg.b).any(|c| !c.is_finite()) {
            return Err(ValidationError::NonFiniteCoefficient {
                species: species.name.clone(),
                fit: FitKind::Thermo,
                index,
            });
        }
    }

    for (fit, segments) in [
        (FitKind::Viscosity, &species.viscosity),
        (FitKind::ThermalConductivity, &species.thermal_conductivity),
    ] {
        for (index, seg) in segments.iter().enumerate() {
            if ![seg.a, seg.b, seg.c, seg.d].iter().all(|c| c.is_finite()) {
                return Err(ValidationError::NonFiniteCoefficient {
                    species: species.name.clone(),
                    fit,
                    index,
                });
            }
        }
    }

    for fit in [
        FitKind::Thermo,
        FitKind::Viscosity,
        FitKind::ThermalConductivity,
    ] {
        validate_bounds(&species.name, fit, &species.fit_bounds(fit))?;
    }

    Ok(())
}

fn check_count(
    species: &SpeciesDef,
    fit: FitKind,
    index: usize,
    field: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), ValidationError> {
    if expected != found {
        return Err(ValidationError::CoefficientCount {
            species: species.name.clone(),
            fit,
            index,
            field,
            expected,
            found,
        });
    }
    Ok(())
}

/// Segments must exist, have `lo < hi`, and join end to end in ascending order.
fn validate_bounds(species: &str, fit: FitKind, bounds: &[(f64, f64)]) -> Result<(), ValidationError> {
    if bounds.is_empty() {
        return Err(ValidationError::MissingFit {
            species: species.to_string(),
            fit,
        });
    }

    for (index, &(t_lo, t_hi)) in bounds.iter().enumerate() {
        if !t_lo.is_finite() || !t_hi.is_finite() || t_lo <= 0.0 || t_lo >= t_hi {
            return Err(ValidationError::InvalidRange {
                species: species.to_string(),
                fit,
                index,
                t_lo,
                t_hi,
            });
        }
        if index > 0 {
            let prev_hi = bounds[index - 1].1;
            if (t_lo - prev_hi).abs() > SEGMENT_JOIN_TOL {
                return Err(ValidationError::Discontinuous {
                    species: species.to_string(),
                    fit,
                    index,
                    prev_hi,
                    t_lo,
                });
            }
        }
    }
    Ok(())
}
