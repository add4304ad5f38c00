//! Error types for trajectory computation.

use thiserror::Error;

/// Errors surfaced by solvers and trajectory queries.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Trajectory queried before compute")]
    NotComputed,

    #[error("No sample at step {index} (len={len})")]
    IndexOob { index: usize, len: usize },

    #[error(transparent)]
    Unsupported(#[from] osc_model::ModelError),
}

pub type SimResult<T> = Result<T, SimError>;
