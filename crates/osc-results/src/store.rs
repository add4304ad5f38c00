//! Run storage API.
//!
//! Layout on disk, one directory per run:
//!
//! ```text
//! <root>/<run_id>/manifest.json
//! <root>/<run_id>/<label>.bin          state records
//! <root>/<run_id>/<label>Energy.bin    energy records
//! ```
//!
//! Labels follow the `<Solver><Model>` convention (e.g. `EulerHarmonic`),
//! one pair of files per computed combination.

use crate::record::{decode_energy, decode_states, encode_energy, encode_states};
use crate::types::{RunManifest, RunSeries};
use crate::{ResultsError, ResultsResult};
use osc_core::{Real, State};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store rooted next to a scenario file, under `.oscsim/runs`.
    pub fn for_scenario(scenario_path: &Path) -> ResultsResult<Self> {
        let scenario_dir = scenario_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "scenario path has no parent directory".to_string(),
            })?;
        let runs_dir = scenario_dir.join(".oscsim").join("runs");
        Self::new(runs_dir)
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, series: &[RunSeries]) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_path = run_dir.join("manifest.json");
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(manifest_path, manifest_json)?;

        for s in series {
            let trajectory_path = run_dir.join(format!("{}.bin", s.label));
            fs::write(trajectory_path, encode_states(&s.trajectory))?;

            let energy_path = run_dir.join(format!("{}Energy.bin", s.label));
            fs::write(energy_path, encode_energy(&s.energy))?;
        }

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_trajectory(&self, run_id: &str, label: &str) -> ResultsResult<Vec<State>> {
        decode_states(&self.load_series_bytes(run_id, &format!("{label}.bin"), label)?)
    }

    pub fn load_energy(&self, run_id: &str, label: &str) -> ResultsResult<Vec<(Real, Real)>> {
        decode_energy(&self.load_series_bytes(run_id, &format!("{label}Energy.bin"), label)?)
    }

    fn load_series_bytes(
        &self,
        run_id: &str,
        file_name: &str,
        label: &str,
    ) -> ResultsResult<Vec<u8>> {
        let path = self.run_dir(run_id).join(file_name);
        if !path.exists() {
            return Err(ResultsError::SeriesNotFound {
                label: label.to_string(),
                run_id: run_id.to_string(),
            });
        }
        Ok(fs::read(path)?)
    }

    pub fn list_runs(&self, scenario_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id)
                    && manifest.scenario_name == scenario_name
                {
                    runs.push(manifest);
                }
            }
        }

        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
