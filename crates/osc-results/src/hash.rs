//! Content-based hashing for run IDs.

use osc_project::Scenario;
use sha2::{Digest, Sha256};

/// Run identity is derived from the scenario content plus the solver
/// version, so identical requests map onto the same cached run.
pub fn compute_run_id(scenario: &Scenario, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let scenario_json = serde_json::to_string(scenario).unwrap_or_default();
    hasher.update(scenario_json.as_bytes());
    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
