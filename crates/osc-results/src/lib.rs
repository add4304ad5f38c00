//! osc-results: run cache and binary series storage.

pub mod hash;
pub mod record;
pub mod store;
pub mod types;

pub use hash::compute_run_id;
pub use record::{
    ENERGY_RECORD_WIDTH, STATE_RECORD_WIDTH, decode_energy, decode_states, encode_energy,
    encode_states,
};
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Series not found: {label} in run {run_id}")]
    SeriesNotFound { label: String, run_id: String },

    #[error("Malformed record data: {what} ({len} bytes)")]
    MalformedRecord { what: &'static str, len: usize },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
