//! Trajectory computation and the energy accumulator.

use osc_core::{Real, State, TimeRange, time_of};
use osc_model::Equation;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::scheme::{Euler, Heun, RungeKutta4, Scheme};

/// Solver strategy selection (closed set).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Closed-form evaluation, no iteration error.
    Analytic,
    /// Explicit Euler (1st order).
    Euler,
    /// Heun predictor-corrector (2nd order).
    Heun,
    /// Classical Runge-Kutta (4th order).
    RungeKutta4,
}

impl Method {
    /// The stepping rule behind a numerical method; `None` for `Analytic`.
    fn scheme(&self) -> Option<&'static dyn Scheme> {
        match self {
            Method::Analytic => None,
            Method::Euler => Some(&Euler),
            Method::Heun => Some(&Heun),
            Method::RungeKutta4 => Some(&RungeKutta4),
        }
    }
}

/// Computes and owns one trajectory for `(equation, initial, range)`.
///
/// Every solver instance owns its trajectory buffer exclusively; equations
/// are read-only and can back any number of solvers at once. All stepping is
/// synchronous and bounded by the validated range.
pub struct Solver<'a> {
    equation: &'a Equation,
    method: Method,
    trajectory: Vec<State>,
    computed: bool,
}

impl<'a> Solver<'a> {
    pub fn new(equation: &'a Equation, method: Method) -> Self {
        Self {
            equation,
            method,
            trajectory: Vec::new(),
            computed: false,
        }
    }

    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    #[inline]
    pub fn equation(&self) -> &Equation {
        self.equation
    }

    /// Compute the trajectory over `[range.start, range.stop)`.
    ///
    /// The previous trajectory is fully discarded before repopulating, so a
    /// failed or shorter recomputation can never leave stale samples behind.
    pub fn compute(&mut self, initial: State, range: TimeRange) -> SimResult<()> {
        self.trajectory.clear();
        self.computed = false;

        debug!(
            method = ?self.method,
            start = range.start(),
            stop = range.stop(),
            step = range.step(),
            "computing trajectory"
        );

        match self.method.scheme() {
            None => self.compute_analytic(initial, range)?,
            Some(scheme) => self.compute_stepped(scheme, initial, range),
        }

        self.computed = true;
        debug!(samples = self.trajectory.len(), "trajectory computed");
        Ok(())
    }

    fn compute_analytic(&mut self, initial: State, range: TimeRange) -> SimResult<()> {
        let constants = self.equation.constants(&initial)?;
        self.trajectory.reserve(range.num_steps() + 1);
        let mut time = range.start();
        while time < range.stop() {
            self.trajectory
                .push(self.equation.state_at(time, &constants)?);
            time += range.step();
        }
        Ok(())
    }

    fn compute_stepped(&mut self, scheme: &dyn Scheme, initial: State, range: TimeRange) {
        if range.stop() == range.start() {
            return;
        }
        let h = range.step();
        let mut k0 = self.warm_up(scheme, initial, &range);
        self.trajectory.reserve(range.num_steps() + 1);
        let mut time = range.start();
        while time < range.stop() {
            // The recorded sample at each time point is the state entering
            // the step, matching the analytical sampling convention.
            self.trajectory.push(k0);
            k0 = scheme.step(self.equation, &k0, h);
            time += h;
        }
    }

    /// Advance the initial condition from its own time to `range.start`
    /// with the same rule and step size.
    ///
    /// This decouples where the caller knows the state from where sampling
    /// begins: the state entering the first recorded step is identical to
    /// what direct integration up to `range.start` would produce.
    fn warm_up(&self, scheme: &dyn Scheme, initial: State, range: &TimeRange) -> State {
        let h = range.step();
        let mut k0 = initial;
        let mut time = time_of(&initial);
        while time < range.start() {
            k0 = scheme.step(self.equation, &k0, h);
            time += h;
        }
        k0
    }

    /// Whether `compute` has completed since construction or the last failure.
    #[inline]
    pub fn is_computed(&self) -> bool {
        self.computed
    }

    /// Number of computed samples (zero before `compute`).
    #[inline]
    pub fn samples(&self) -> usize {
        self.trajectory.len()
    }

    fn computed_slice(&self) -> SimResult<&[State]> {
        if !self.computed {
            return Err(SimError::NotComputed);
        }
        Ok(&self.trajectory)
    }

    /// All samples in time order.
    pub fn trajectory(&self) -> SimResult<&[State]> {
        self.computed_slice()
    }

    /// Sample at a step index.
    pub fn coords(&self, step: usize) -> SimResult<State> {
        let trajectory = self.computed_slice()?;
        trajectory.get(step).copied().ok_or(SimError::IndexOob {
            index: step,
            len: trajectory.len(),
        })
    }

    /// Mechanical energy at a step index.
    ///
    /// Recomputed from the stored state and the equation's frequency on every
    /// call; never cached, so recomputation can't serve stale values.
    pub fn energy_at(&self, step: usize) -> SimResult<Real> {
        Ok(self.equation.energy(&self.coords(step)?))
    }

    /// `(time, energy)` pairs in trajectory order.
    pub fn energy_series(&self) -> SimResult<Vec<(Real, Real)>> {
        Ok(self
            .computed_slice()?
            .iter()
            .map(|s| (time_of(s), self.equation.energy(s)))
            .collect())
    }
}
