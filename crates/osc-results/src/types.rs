//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

/// Manifest describing one stored run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub solver_version: String,
    pub series: Vec<SeriesEntry>,
}

/// One computed (solver, model) combination inside a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub label: String,
    pub solver: String,
    pub model: String,
    pub samples: usize,
}

/// In-memory payload for one series: the trajectory plus its derived
/// energy, handed to the store by the caller (the solvers never touch the
/// filesystem themselves).
#[derive(Debug, Clone)]
pub struct RunSeries {
    pub label: String,
    pub trajectory: Vec<osc_core::State>,
    pub energy: Vec<(osc_core::Real, osc_core::Real)>,
}

/// RFC 3339 UTC timestamp for manifests.
pub fn utc_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
