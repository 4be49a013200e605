mod args;
mod error;
mod table;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use gk_gas::{
    FitKind, GasModel, GasState, MassFractions, SweepDefinition, SweepQuantity,
    execute_temperature_sweep_at_pressure,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const AIR: &str = "N2=0.78,O2=0.22";

#[derive(Parser)]
#[command(name = "gk-cli")]
#[command(about = "gaskit CLI - thermally-perfect gas mixture properties", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a gas model definition
    Validate {
        /// Path to the model YAML/JSON file
        model_path: PathBuf,
    },
    /// List the species of a gas model
    Species {
        /// Path to the model YAML/JSON file
        model_path: PathBuf,
    },
    /// Evaluate one state at (p, T)
    State {
        /// Path to the model YAML/JSON file
        model_path: PathBuf,
        /// Pressure in Pa
        #[arg(long, default_value_t = 1.0e5)]
        p: f64,
        /// Temperature in K
        #[arg(long)]
        t: f64,
        /// Mass fractions, e.g. N2=0.78,O2=0.22
        #[arg(long, default_value = AIR)]
        massf: String,
    },
    /// Write a viscosity / conductivity table over a temperature range
    TransProps {
        /// Path to the model YAML/JSON file
        model_path: PathBuf,
        /// Pressure in Pa
        #[arg(long, default_value_t = 1.0e5)]
        p: f64,
        /// Mass fractions, e.g. N2=0.78,O2=0.22
        #[arg(long, default_value = AIR)]
        massf: String,
        /// First temperature in K
        #[arg(long, default_value_t = 200.0)]
        t_low: f64,
        /// Temperature step in K
        #[arg(long, default_value_t = 100.0)]
        dt: f64,
        /// Number of samples
        #[arg(long, default_value_t = 199)]
        count: usize,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    // Diagnostics go to stderr so tables on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { model_path } => cmd_validate(&model_path),
        Commands::Species { model_path } => cmd_species(&model_path),
        Commands::State {
            model_path,
            p,
            t,
            massf,
        } => cmd_state(&model_path, p, t, &massf),
        Commands::TransProps {
            model_path,
            p,
            massf,
            t_low,
            dt,
            count,
            output,
        } => cmd_trans_props(&model_path, p, &massf, t_low, dt, count, output.as_deref()),
    }
}

fn cmd_validate(model_path: &Path) -> CliResult<()> {
    println!("Validating gas model: {}", model_path.display());
    let model = GasModel::load(model_path)?;
    println!(
        "✓ Model '{}' is valid ({} species)",
        model.name(),
        model.n_species()
    );
    Ok(())
}

fn cmd_species(model_path: &Path) -> CliResult<()> {
    let model = GasModel::load(model_path)?;
    println!("Species in '{}' (mixing rule {:?}):", model.name(), model.mixing_rule());
    if let Some(desc) = model.description() {
        println!("  note: {desc}");
    }
    for sp in model.species() {
        let (th_lo, th_hi) = sp.fit_range(FitKind::Thermo);
        let (tr_lo, tr_hi) = sp.transport_range();
        print!(
            "  {:<8} M = {:.7} kg/mol  thermo {}-{} K  transport {}-{} K",
            sp.name(),
            sp.molecular_weight(),
            th_lo,
            th_hi,
            tr_lo,
            tr_hi
        );
        match sp.description() {
            Some(desc) => println!("  ({desc})"),
            None => println!(),
        }
    }
    Ok(())
}

fn load_with_composition(
    model_path: &Path,
    massf: &str,
) -> CliResult<(GasModel, Vec<(String, f64)>)> {
    let fractions = args::parse_fractions(massf)?;
    let model = GasModel::load(model_path)?;
    Ok((model, fractions))
}

fn cmd_state(model_path: &Path, p: f64, t: f64, massf: &str) -> CliResult<()> {
    let (model, fractions) = load_with_composition(model_path, massf)?;
    let mut q = GasState::new(&model);
    q.set_massf(fractions.iter().map(|(n, y)| (n.as_str(), *y)))?;
    q.set_p(p);
    q.set_t(t);
    q.update_thermo_from_pt()?;
    q.update_trans_coeffs()?;

    println!("{q}");
    println!("  rho   = {:.6e} kg/m^3", q.rho()?);
    println!("  e     = {:.6e} J/kg", q.e()?);
    println!("  h     = {:.6e} J/kg", q.h()?);
    println!("  s     = {:.6e} J/(kg.K)", q.s()?);
    println!("  cp    = {:.6e} J/(kg.K)", q.cp()?);
    println!("  cv    = {:.6e} J/(kg.K)", q.cv()?);
    println!("  gamma = {:.6}", q.gamma()?);
    println!("  a     = {:.6e} m/s", q.a()?);
    println!("  mu    = {:.6e} Pa.s", q.mu()?);
    println!("  k     = {:.6e} W/(m.K)", q.k()?);
    for ((name, x), c) in model.names().zip(q.molef()).zip(q.conc()?) {
        println!("  {name:<8} x = {x:.6}  conc = {c:.6e} mol/m^3");
    }
    Ok(())
}

fn cmd_trans_props(
    model_path: &Path,
    p: f64,
    massf: &str,
    t_low: f64,
    dt: f64,
    count: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    let (model, fractions) = load_with_composition(model_path, massf)?;
    let y = MassFractions::from_named(&model, fractions.iter().map(|(n, y)| (n.as_str(), *y)))?;
    let sweep = SweepDefinition::from_step(SweepQuantity::Temperature, t_low, dt, count)?;
    debug!(%sweep, p, "computing transport table");

    let mut result = execute_temperature_sweep_at_pressure(&model, &y, &sweep, p)?;
    if !result.failures.is_empty() {
        let failure = result.failures.swap_remove(0);
        return Err(CliError::SweepPoint {
            value: failure.value,
            source: failure.error,
        });
    }
    let rows = result
        .successful()
        .map(|(t, point)| (t, point.transport.mu, point.transport.k));

    match output {
        Some(path) => {
            info!(path = %path.display(), "opening file for writing");
            let write_err = |source| CliError::OutputWrite {
                path: path.to_path_buf(),
                source,
            };
            let file = File::create(path).map_err(write_err)?;
            let mut out = BufWriter::new(file);
            let n = table::write_trans_props(&mut out, rows).map_err(write_err)?;
            info!(rows = n, "file closed");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            table::write_trans_props(&mut out, rows)?;
        }
    }
    Ok(())
}
