//! Phase-space state vectors.
//!
//! A state is one sampled instant of the system: component 0 is simulation
//! time, components 1..D-1 are phase coordinates. States are value types,
//! created per integration step and never shared.

use nalgebra::SVector;

use crate::numeric::Real;

/// Phase vector of dimension `D`, component 0 always simulation time.
pub type Phase<const D: usize> = SVector<Real, D>;

/// Dimension used by the oscillator family: (time, position, velocity).
pub const DIM: usize = 3;

/// The concrete state for second-order scalar oscillators.
pub type State = Phase<DIM>;

/// Build a `(time, position, velocity)` state.
#[inline]
pub fn state(time: Real, position: Real, velocity: Real) -> State {
    State::new(time, position, velocity)
}

/// Simulation time of a sample.
#[inline]
pub fn time_of(s: &State) -> Real {
    s[0]
}

/// Position coordinate of a sample.
#[inline]
pub fn position_of(s: &State) -> Real {
    s[1]
}

/// Velocity coordinate of a sample.
#[inline]
pub fn velocity_of(s: &State) -> Real {
    s[2]
}
