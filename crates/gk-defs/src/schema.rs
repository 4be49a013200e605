//! Model definition schema.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    pub version: u32,
    pub name: String,
    /// Free-form notes about the data, shown by tools that list the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub mixing_rule: MixingRuleDef,
    /// Optional explicit species ordering; defaults to the order of `species`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_order: Option<Vec<String>>,
    #[serde(default)]
    pub species: Vec<SpeciesDef>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MixingRuleDef {
    #[default]
    Wilke,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesDef {
    pub name: String,
    /// Molecular weight [kg/mol].
    pub molecular_weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// NASA Glenn 9-coefficient segments, ascending in temperature.
    #[serde(default)]
    pub thermo: Vec<Nasa9SegmentDef>,
    /// CEA viscosity segments [micropoise], ascending in temperature.
    #[serde(default)]
    pub viscosity: Vec<CeaSegmentDef>,
    /// CEA thermal conductivity segments [µW/(cm·K)], ascending in temperature.
    #[serde(default)]
    pub thermal_conductivity: Vec<CeaSegmentDef>,
    /// Standard-state overrides; omitted values use 298.15 K and 1e5 Pa.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceDef>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ReferenceDef {
    /// Reference temperature [K].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Reference pressure [Pa] of the entropy pressure term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Nasa9SegmentDef {
    pub t_lo: f64,
    pub t_hi: f64,
    /// a1..a7
    pub a: Vec<f64>,
    /// b1 (enthalpy), b2 (entropy)
    pub b: Vec<f64>,
}

/// `ln(q) = a ln(T) + b/T + c/T^2 + d`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CeaSegmentDef {
    pub t_lo: f64,
    pub t_hi: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// Which curve-fit table of a species a definition entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitKind {
    Thermo,
    Viscosity,
    ThermalConductivity,
}

impl FitKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Thermo => "thermo",
            Self::Viscosity => "viscosity",
            Self::ThermalConductivity => "thermal_conductivity",
        }
    }
}

impl std::fmt::Display for FitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl SpeciesDef {
    /// Validity bounds `(t_lo, t_hi)` of each segment of a fit table.
    pub fn fit_bounds(&self, kind: FitKind) -> Vec<(f64, f64)> {
        match kind {
            FitKind::Thermo => self.thermo.iter().map(|s| (s.t_lo, s.t_hi)).collect(),
            FitKind::Viscosity => self.viscosity.iter().map(|s| (s.t_lo, s.t_hi)).collect(),
            FitKind::ThermalConductivity => self
                .thermal_conductivity
                .iter()
                .map(|s| (s.t_lo, s.t_hi))
                .collect(),
        }
    }
}

impl ModelDef {
    /// Species definitions in model order (`species_order` when present).
    ///
    /// Names missing from `species` are skipped; validation reports them.
    pub fn ordered_species(&self) -> Vec<&SpeciesDef> {
        match &self.species_order {
            Some(order) => order
                .iter()
                .filter_map(|name| self.species.iter().find(|s| &s.name == name))
                .collect(),
            None => self.species.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixing_rule_defaults_to_wilke() {
        let def: ModelDef = serde_yaml::from_str("version: 1\nname: empty\n").unwrap();
        assert_eq!(def.mixing_rule, MixingRuleDef::Wilke);
        assert!(def.species.is_empty());
        assert!(def.species_order.is_none());
    }

    #[test]
    fn mixing_rule_parses_snake_case() {
        let def: ModelDef =
            serde_yaml::from_str("version: 1\nname: m\nmixing_rule: wilke\n").unwrap();
        assert_eq!(def.mixing_rule, MixingRuleDef::Wilke);
        assert!(serde_yaml::from_str::<ModelDef>("version: 1\nname: m\nmixing_rule: blend\n").is_err());
    }

    #[test]
    fn ordered_species_follows_explicit_order() {
        let sp = |name: &str| SpeciesDef {
            name: name.to_string(),
            molecular_weight: 0.028,
            description: None,
            thermo: vec![],
            viscosity: vec![],
            thermal_conductivity: vec![],
            reference: None,
        };
        let def = ModelDef {
            version: 1,
            name: "m".to_string(),
            description: None,
            mixing_rule: MixingRuleDef::Wilke,
            species_order: Some(vec!["O2".to_string(), "N2".to_string()]),
            species: vec![sp("N2"), sp("O2")],
        };
        let names: Vec<&str> = def.ordered_species().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["O2", "N2"]);
    }

    #[test]
    fn reference_block_is_optional_and_partial() {
        let yaml = "name: X\nmolecular_weight: 0.028\nreference: { pressure: 101325.0 }\n";
        let sp: SpeciesDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            sp.reference,
            Some(ReferenceDef {
                temperature: None,
                pressure: Some(101_325.0)
            })
        );
        let sp: SpeciesDef = serde_yaml::from_str("name: X\nmolecular_weight: 0.028\n").unwrap();
        assert!(sp.reference.is_none());
    }
}
