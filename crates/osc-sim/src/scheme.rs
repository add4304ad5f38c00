//! Fixed-step stepping rules.

use osc_core::{Real, State};
use osc_model::Equation;

/// Trait for single-step integration rules.
///
/// A scheme advances one state by one step of size `h`; it never errors and
/// never records anything. Any input state is accepted: non-finite values
/// propagate into the result.
pub trait Scheme {
    /// One step: `k0 -> k1`.
    fn step(&self, eq: &Equation, k0: &State, h: Real) -> State;
}

/// Explicit Euler, first-order local error.
#[derive(Clone, Debug)]
pub struct Euler;

impl Scheme for Euler {
    fn step(&self, eq: &Equation, k0: &State, h: Real) -> State {
        k0 + eq.derivative(k0) * h
    }
}

/// Heun predictor-corrector (trapezoid), second-order local error.
#[derive(Clone, Debug)]
pub struct Heun;

impl Scheme for Heun {
    fn step(&self, eq: &Equation, k0: &State, h: Real) -> State {
        let predicted = k0 + eq.derivative(k0) * h;
        k0 + (eq.derivative(k0) + eq.derivative(&predicted)) * (h / 2.0)
    }
}

/// Classical 4th-order Runge-Kutta.
#[derive(Clone, Debug)]
pub struct RungeKutta4;

impl Scheme for RungeKutta4 {
    fn step(&self, eq: &Equation, k0: &State, h: Real) -> State {
        let d1 = eq.derivative(k0);
        let d2 = eq.derivative(&(k0 + d1 * (h / 2.0)));
        let d3 = eq.derivative(&(k0 + d2 * (h / 2.0)));
        let d4 = eq.derivative(&(k0 + d3 * h));
        k0 + (d1 + d2 * 2.0 + d3 * 2.0 + d4) * (h / 6.0)
    }
}
