use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::info;

use osc_core::Real;
use osc_project::{ProjectError, Scenario, SolverKind, ValidationError};
use osc_results::{
    RunManifest, RunSeries, RunStore, SeriesEntry, compute_run_id, utc_timestamp,
};
use osc_sim::{Method, SimError, Solver};

const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "osc-cli")]
#[command(about = "Oscsim CLI - fixed-step oscillator simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and structure
    Validate {
        /// Path to the scenario file (JSON, or YAML by extension)
        scenario_path: PathBuf,
    },
    /// Run the configured solver(s) and store the results
    Run {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a scenario
    Runs {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Export a stored series as CSV
    Export {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Series label, e.g. EulerHarmonic or EulerHarmonicEnergy
        label: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            no_cache,
        } => cmd_run(&scenario_path, !no_cache),
        Commands::Runs { scenario_path } => cmd_runs(&scenario_path),
        Commands::Export {
            scenario_path,
            run_id,
            label,
            output,
        } => cmd_export(&scenario_path, &run_id, &label, output.as_deref()),
    }
}

/// Load a scenario, treating unknown model/solver names as a reported
/// no-op rather than a failure.
fn load_or_report(scenario_path: &Path) -> Result<Option<Scenario>, Box<dyn Error>> {
    match osc_project::load(scenario_path) {
        Ok(scenario) => Ok(Some(scenario)),
        Err(ProjectError::Validation(ValidationError::UnknownSelector { kind, name })) => {
            println!(
                "Unknown {kind} '{name}' in {} - nothing to do",
                scenario_path.display()
            );
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_validate(scenario_path: &Path) -> Result<(), Box<dyn Error>> {
    println!("Validating scenario: {}", scenario_path.display());
    let Some(scenario) = load_or_report(scenario_path)? else {
        return Ok(());
    };
    println!(
        "✓ Scenario is valid: model={}, solver={}",
        scenario.model, scenario.solver
    );
    Ok(())
}

fn cmd_run(scenario_path: &Path, use_cache: bool) -> Result<(), Box<dyn Error>> {
    let Some(scenario) = load_or_report(scenario_path)? else {
        return Ok(());
    };

    let model = scenario.model_kind()?;
    let equation = scenario.equation()?;
    let range = scenario.time_range()?;
    let initial = scenario.initial_state();

    let store = RunStore::for_scenario(scenario_path)?;
    let run_id = compute_run_id(&scenario, SOLVER_VERSION);

    if use_cache && store.has_run(&run_id) {
        let manifest = store.load_manifest(&run_id)?;
        println!("✓ Loaded from cache: {run_id}");
        print_series_summary(&manifest);
        return Ok(());
    }

    // Assemble the method matrix, skipping combinations without support.
    let mut jobs: Vec<(SolverKind, Method)> = Vec::new();
    for kind in scenario.solver_kind()?.expand() {
        let Some(method) = method_for(kind) else {
            continue;
        };
        if method == Method::Analytic && !equation.has_closed_form() {
            println!("  skipping Analytic{model}: no closed-form solution");
            continue;
        }
        jobs.push((kind, method));
    }

    info!(
        run_id = %run_id,
        model = %model,
        jobs = jobs.len(),
        "starting simulation"
    );

    // Jobs are independent: each solver owns its trajectory buffer and the
    // equation is shared read-only.
    let series = jobs
        .par_iter()
        .map(|&(kind, method)| -> Result<(SolverKind, RunSeries), SimError> {
            let mut solver = Solver::new(&equation, method);
            solver.compute(initial, range)?;
            Ok((
                kind,
                RunSeries {
                    label: format!("{kind}{model}"),
                    trajectory: solver.trajectory()?.to_vec(),
                    energy: solver.energy_series()?,
                },
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let manifest = RunManifest {
        run_id: run_id.clone(),
        scenario_name: scenario.display_name().to_string(),
        timestamp: utc_timestamp(),
        solver_version: SOLVER_VERSION.to_string(),
        series: series
            .iter()
            .map(|(kind, s)| SeriesEntry {
                label: s.label.clone(),
                solver: kind.to_string(),
                model: model.to_string(),
                samples: s.trajectory.len(),
            })
            .collect(),
    };

    let payload: Vec<RunSeries> = series.into_iter().map(|(_, s)| s).collect();
    store.save_run(&manifest, &payload)?;

    println!("✓ Simulation completed: {run_id}");
    for s in &payload {
        println!(
            "  {}: {} samples, energy drift {}",
            s.label,
            s.trajectory.len(),
            format_drift(&s.energy)
        );
    }

    Ok(())
}

fn cmd_runs(scenario_path: &Path) -> Result<(), Box<dyn Error>> {
    let Some(scenario) = load_or_report(scenario_path)? else {
        return Ok(());
    };

    let store = RunStore::for_scenario(scenario_path)?;
    let runs = store.list_runs(scenario.display_name())?;

    if runs.is_empty() {
        println!("No cached runs found for scenario: {}", scenario.display_name());
    } else {
        println!("Cached runs for scenario '{}':", scenario.display_name());
        for manifest in runs {
            println!("  {} ({})", manifest.run_id, manifest.timestamp);
        }
    }
    Ok(())
}

fn cmd_export(
    scenario_path: &Path,
    run_id: &str,
    label: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let store = RunStore::for_scenario(scenario_path)?;

    let csv = if let Some(base) = label.strip_suffix("Energy") {
        let series = store.load_energy(run_id, base)?;
        let mut csv = String::from("time,energy\n");
        for (t, e) in &series {
            csv.push_str(&format!("{},{}\n", t, e));
        }
        csv
    } else {
        let trajectory = store.load_trajectory(run_id, label)?;
        let mut csv = String::from("time,x,v\n");
        for s in &trajectory {
            csv.push_str(&format!("{},{},{}\n", s[0], s[1], s[2]));
        }
        csv
    };

    if let Some(path) = output {
        std::fs::write(path, &csv)?;
        println!(
            "✓ Exported {} data rows to {}",
            csv.lines().count().saturating_sub(1),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn method_for(kind: SolverKind) -> Option<Method> {
    match kind {
        SolverKind::Analytic => Some(Method::Analytic),
        SolverKind::Euler => Some(Method::Euler),
        SolverKind::Heun => Some(Method::Heun),
        SolverKind::RungeKutta4 => Some(Method::RungeKutta4),
        // `All` is expanded before jobs are assembled.
        SolverKind::All => None,
    }
}

fn print_series_summary(manifest: &RunManifest) {
    for entry in &manifest.series {
        println!("  {}: {} samples", entry.label, entry.samples);
    }
}

fn format_drift(energy: &[(Real, Real)]) -> String {
    match (energy.first(), energy.last()) {
        (Some((_, first)), Some((_, last))) if *first != 0.0 => {
            format!("{:+.3e}", (last - first) / first)
        }
        _ => "n/a".to_string(),
    }
}
