//! Loading gas models from definition files.

use gk_defs::{ModelDef, ReferenceDef};
use gk_gas::{
    CompositionIssue, DomainError, GasModel, GasState, LoadError, MassFractions,
    update_thermo_from_pt,
};
use std::path::PathBuf;

fn models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models")
}

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("gk-gas-{}-{name}", std::process::id()))
}

#[test]
fn json_and_yaml_definitions_build_the_same_model() {
    let yaml_path = models_dir().join("thermally-perfect-N2-O2.yaml");
    let def = gk_defs::load(&yaml_path).unwrap();

    let json_path = scratch("air.json");
    gk_defs::save_json(&json_path, &def).unwrap();
    let from_json = GasModel::load(&json_path).unwrap();
    let from_yaml = GasModel::load(&yaml_path).unwrap();
    std::fs::remove_file(&json_path).ok();

    assert_eq!(from_json.name(), from_yaml.name());
    assert_eq!(from_json.n_species(), from_yaml.n_species());
    for (a, b) in from_json.species().iter().zip(from_yaml.species()) {
        assert_eq!(a.name(), b.name());
        for t in [250.0, 1000.0, 7500.0] {
            let close = |x: f64, y: f64| ((x - y) / y).abs() < 1e-12;
            assert!(close(a.cp(t).unwrap(), b.cp(t).unwrap()));
            assert!(close(a.viscosity(t).unwrap(), b.viscosity(t).unwrap()));
            assert!(close(
                a.thermal_conductivity(t).unwrap(),
                b.thermal_conductivity(t).unwrap()
            ));
        }
    }
}

#[test]
fn species_order_reorders_the_database() {
    let yaml_path = models_dir().join("thermally-perfect-N2-O2.yaml");
    let mut def: ModelDef = gk_defs::load(&yaml_path).unwrap();
    def.species_order = Some(vec!["O2".to_string(), "N2".to_string()]);
    let model = GasModel::from_def(&def).unwrap();
    assert_eq!(model.names().collect::<Vec<_>>(), vec!["O2", "N2"]);
}

#[test]
fn unknown_extension_and_missing_file() {
    let err = GasModel::load("air.lua").unwrap_err();
    assert!(matches!(err, LoadError::Definition(_)));
    assert!(err.to_string().contains("air.lua"));

    let err = GasModel::load(models_dir().join("does-not-exist.yaml")).unwrap_err();
    assert!(matches!(err, LoadError::Definition(_)));
}

#[test]
fn gap_between_segments_is_rejected() {
    let yaml = r#"
version: 1
name: gappy
species:
  - name: A
    molecular_weight: 0.028
    thermo:
      - { t_lo: 200.0, t_hi: 1000.0, a: [0, 0, 3.5, 0, 0, 0, 0], b: [0, 0] }
      - { t_lo: 1100.0, t_hi: 6000.0, a: [0, 0, 3.5, 0, 0, 0, 0], b: [0, 0] }
    viscosity:
      - { t_lo: 200.0, t_hi: 6000.0, a: 0.6, b: -30.0, c: -1600.0, d: 1.7 }
    thermal_conductivity:
      - { t_lo: 200.0, t_hi: 6000.0, a: 0.8, b: 100.0, c: -12000.0, d: 0.5 }
"#;
    let err = GasModel::from_yaml_str(yaml).unwrap_err();
    assert!(err.to_string().contains("thermo"), "{err}");
}

fn air_def() -> ModelDef {
    gk_defs::load(&models_dir().join("thermally-perfect-N2-O2.yaml")).unwrap()
}

#[test]
fn composition_is_bound_to_species_names() {
    let air = GasModel::from_def(&air_def()).unwrap();
    let mut reversed_def = air_def();
    reversed_def.species_order = Some(vec!["O2".to_string(), "N2".to_string()]);
    let reversed = GasModel::from_def(&reversed_def).unwrap();

    let y = MassFractions::from_named(&air, [("N2", 0.78), ("O2", 0.22)]).unwrap();
    let err = update_thermo_from_pt(&reversed, &y, 1.0e5, 300.0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidComposition(CompositionIssue::SpeciesMismatch { .. })
    ));

    let mut q = GasState::new(&reversed);
    q.set_mass_fractions(y.clone()).unwrap();
    assert_eq!(q.massf("N2"), Some(0.78));
    assert_eq!(q.massf("O2"), Some(0.22));
    q.update_thermo_from_pt().unwrap();
    let expected = update_thermo_from_pt(&air, &y, 1.0e5, 300.0).unwrap();
    let got = q.thermo_props().unwrap();
    assert!((got.mw_mix - expected.mw_mix).abs() < 1e-15);
    assert!((got.mw_mix - 0.0288026).abs() < 1e-7);
    assert!(((got.rho - expected.rho) / expected.rho).abs() < 1e-12);
}

#[test]
fn reference_pressure_from_definition_shifts_entropy() {
    let base = GasModel::from_def(&air_def()).unwrap();
    let mut def = air_def();
    for sp in &mut def.species {
        sp.reference = Some(ReferenceDef {
            temperature: None,
            pressure: Some(101_325.0),
        });
    }
    let atm = GasModel::from_def(&def).unwrap();

    let y_base = MassFractions::pure(&base, "N2").unwrap();
    let y_atm = MassFractions::pure(&atm, "N2").unwrap();
    let s_base = update_thermo_from_pt(&base, &y_base, 1.0e5, 500.0).unwrap().s;
    let s_atm = update_thermo_from_pt(&atm, &y_atm, 1.0e5, 500.0).unwrap().s;
    let r_n2 = base.species_by_name("N2").unwrap().gas_constant();
    assert!((s_atm - s_base - r_n2 * (101_325.0_f64 / 1.0e5).ln()).abs() < 1e-9);
}
