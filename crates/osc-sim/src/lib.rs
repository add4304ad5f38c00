//! Fixed-step trajectory computation for oscillator models.
//!
//! Provides:
//! - explicit Euler, Heun predictor-corrector and classical RK4 stepping rules
//! - an analytical path for models with a closed form
//! - the trajectory/energy accumulator with warm-up to an arbitrary start time
//!
//! Fixed-step only: no adaptive control, no error estimation, no stiff
//! handling.

pub mod error;
pub mod scheme;
pub mod solver;

pub use error::{SimError, SimResult};
pub use scheme::{Euler, Heun, RungeKutta4, Scheme};
pub use solver::{Method, Solver};
