//! The closed family of oscillator equations.
//!
//! Every variant is a pure function of state: `derivative` maps a sampled
//! state to its time derivative (component 0 advances time at unit rate).
//! Variants with a known closed form also expose `constants` (integration
//! constants from an initial condition) and `state_at` (direct evaluation at
//! an arbitrary time, no iteration).

use nalgebra::SVector;

use osc_core::{Real, State, position_of, state, time_of, velocity_of};

use crate::error::{ModelError, ModelResult};
use crate::force::{DrivingForce, Waveform};

/// Integration constants of a closed-form solution.
pub type Constants = SVector<Real, 2>;

/// Damping regime, decided once at model construction.
///
/// The comparison is exact: the three closed forms are not numerically
/// continuous at `gamma == omega`, and an epsilon band would only relocate
/// the discontinuity instead of removing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    Overdamped,
    Underdamped,
    Critical,
}

impl Regime {
    pub fn classify(gamma: Real, omega: Real) -> Self {
        if gamma > omega {
            Regime::Overdamped
        } else if gamma < omega {
            Regime::Underdamped
        } else {
            Regime::Critical
        }
    }
}

/// Second-order oscillator models, reduced to first-order systems over
/// `[time, x, v]` states.
///
/// The variant set is closed by domain; operations are matching functions
/// over it. Models are immutable after construction and hold no integration
/// state, so one model can back any number of solvers.
#[derive(Clone, Copy, Debug)]
pub enum Equation {
    /// `x'' + W^2 x = 0`
    Harmonic { omega: Real },
    /// `x'' + W^2 sin(x) = 0`, nonlinear, no closed form.
    Pendulum { omega: Real },
    /// `x'' + 2G x' + W^2 x = 0`
    Damped {
        omega: Real,
        gamma: Real,
        regime: Regime,
    },
    /// `x'' + 2G x' + W^2 x = F(t, x, v)`
    Driven {
        omega: Real,
        gamma: Real,
        regime: Regime,
        force: DrivingForce,
    },
}

impl Equation {
    pub fn harmonic(omega: Real) -> Self {
        Equation::Harmonic { omega }
    }

    pub fn pendulum(omega: Real) -> Self {
        Equation::Pendulum { omega }
    }

    pub fn damped(omega: Real, gamma: Real) -> Self {
        Equation::Damped {
            omega,
            gamma,
            regime: Regime::classify(gamma, omega),
        }
    }

    pub fn driven(omega: Real, gamma: Real, force: DrivingForce) -> Self {
        Equation::Driven {
            omega,
            gamma,
            regime: Regime::classify(gamma, omega),
            force,
        }
    }

    /// Natural frequency `W`.
    pub fn omega(&self) -> Real {
        match *self {
            Equation::Harmonic { omega }
            | Equation::Pendulum { omega }
            | Equation::Damped { omega, .. }
            | Equation::Driven { omega, .. } => omega,
        }
    }

    /// Damping coefficient `G` (zero for the undamped variants).
    pub fn gamma(&self) -> Real {
        match *self {
            Equation::Damped { gamma, .. } | Equation::Driven { gamma, .. } => gamma,
            _ => 0.0,
        }
    }

    /// Whether `constants`/`state_at` are available for this model.
    pub fn has_closed_form(&self) -> bool {
        match *self {
            Equation::Harmonic { .. } | Equation::Damped { .. } => true,
            Equation::Pendulum { .. } => false,
            Equation::Driven { force, .. } => matches!(force.waveform(), Waveform::Cosine),
        }
    }

    /// Time derivative of a state: `[1, v, a(x, v, t)]`.
    ///
    /// Pure and total: any state is accepted and non-finite values propagate
    /// into the result.
    pub fn derivative(&self, s: &State) -> State {
        let x = position_of(s);
        let v = velocity_of(s);
        let accel = match *self {
            Equation::Harmonic { omega } => -omega * omega * x,
            Equation::Pendulum { omega } => -omega * omega * x.sin(),
            Equation::Damped { omega, gamma, .. } => -2.0 * gamma * v - omega * omega * x,
            Equation::Driven {
                omega,
                gamma,
                ref force,
                ..
            } => -2.0 * gamma * v - omega * omega * x + force.evaluate(s),
        };
        state(1.0, v, accel)
    }

    /// Integration constants from an initial condition.
    ///
    /// The harmonic form honors a nonzero initial time; the damped family
    /// anchors its constants at `t = 0`.
    pub fn constants(&self, initial: &State) -> ModelResult<Constants> {
        let x0 = position_of(initial);
        let v0 = velocity_of(initial);
        match *self {
            Equation::Harmonic { omega } => {
                let t0 = time_of(initial);
                let c1 = (x0 * omega * (omega * t0).sin() + v0 * (omega * t0).cos()) / omega;
                let c2 = (x0 * omega * (omega * t0).cos() - v0 * (omega * t0).sin()) / omega;
                Ok(Constants::new(c1, c2))
            }
            Equation::Pendulum { .. } => Err(ModelError::UnsupportedOperation {
                what: "closed-form solution of the nonlinear pendulum",
            }),
            Equation::Damped {
                omega,
                gamma,
                regime,
            } => Ok(damped_constants(omega, gamma, regime, x0, v0)),
            Equation::Driven {
                omega,
                gamma,
                regime,
                force,
            } => {
                let Waveform::Cosine = force.waveform() else {
                    return Err(ModelError::UnsupportedOperation {
                        what: "driven closed form requires the cosine drive",
                    });
                };
                // Homogeneous constants after removing the steady-state
                // particular solution at t = 0.
                let (xp0, vp0) = driven_particular(omega, gamma, &force, 0.0);
                Ok(damped_constants(omega, gamma, regime, x0 - xp0, v0 - vp0))
            }
        }
    }

    /// Closed-form state at an arbitrary time.
    pub fn state_at(&self, t: Real, c: &Constants) -> ModelResult<State> {
        match *self {
            Equation::Harmonic { omega } => {
                let (c1, c2) = (c[0], c[1]);
                let x = c1 * (omega * t).sin() + c2 * (omega * t).cos();
                let v = c1 * omega * (omega * t).cos() - c2 * omega * (omega * t).sin();
                Ok(state(t, x, v))
            }
            Equation::Pendulum { .. } => Err(ModelError::UnsupportedOperation {
                what: "closed-form solution of the nonlinear pendulum",
            }),
            Equation::Damped {
                omega,
                gamma,
                regime,
            } => {
                let (x, v) = damped_state(omega, gamma, regime, t, c);
                Ok(state(t, x, v))
            }
            Equation::Driven {
                omega,
                gamma,
                regime,
                force,
            } => {
                let Waveform::Cosine = force.waveform() else {
                    return Err(ModelError::UnsupportedOperation {
                        what: "driven closed form requires the cosine drive",
                    });
                };
                let (xh, vh) = damped_state(omega, gamma, regime, t, c);
                let (xp, vp) = driven_particular(omega, gamma, &force, t);
                Ok(state(t, xh + xp, vh + vp))
            }
        }
    }

    /// Mechanical energy of a sample: `v^2/2 + W^2 x^2/2`.
    ///
    /// A conservation oracle for the harmonic/damped family; defined for all
    /// variants from their natural frequency.
    pub fn energy(&self, s: &State) -> Real {
        let omega = self.omega();
        let x = position_of(s);
        let v = velocity_of(s);
        v * v / 2.0 + omega * omega * x * x / 2.0
    }

    /// Steady-state amplitude of the driven oscillator,
    /// `F / sqrt((W^2 - W0^2)^2 + 4 G^2 W0^2)`; `None` for other variants.
    pub fn steady_amplitude(&self) -> Option<Real> {
        match *self {
            Equation::Driven {
                omega,
                gamma,
                ref force,
                ..
            } => Some(force.amplitude() / resonance_denominator(omega, gamma, force.frequency()).sqrt()),
            _ => None,
        }
    }
}

/// `4 G^2 W0^2 + W^4 - 2 W^2 W0^2 + W0^4`, zero at undamped resonance.
///
/// Used as written, with no near-zero guard: non-finite values propagate.
fn resonance_denominator(omega: Real, gamma: Real, w0: Real) -> Real {
    4.0 * gamma * gamma * w0 * w0 + omega.powi(4) - 2.0 * omega * omega * w0 * w0 + w0.powi(4)
}

/// Steady-state particular solution `(x_p, v_p)` of the cosine-driven
/// oscillator at time `t`.
fn driven_particular(omega: Real, gamma: Real, force: &DrivingForce, t: Real) -> (Real, Real) {
    let f = force.amplitude();
    let w0 = force.frequency();
    let d = resonance_denominator(omega, gamma, w0);
    let detune = omega * omega - w0 * w0;
    let (sin, cos) = (w0 * t).sin_cos();
    let xp = f * (detune * cos + 2.0 * gamma * w0 * sin) / d;
    let vp = f * w0 * (-detune * sin + 2.0 * gamma * w0 * cos) / d;
    (xp, vp)
}

fn damped_constants(omega: Real, gamma: Real, regime: Regime, x0: Real, v0: Real) -> Constants {
    match regime {
        Regime::Overdamped => {
            let alpha = (gamma * gamma - omega * omega).sqrt();
            let c1 = (v0 + (alpha + gamma) * x0) / (2.0 * alpha);
            let c2 = (-v0 + (alpha - gamma) * x0) / (2.0 * alpha);
            Constants::new(c1, c2)
        }
        Regime::Underdamped => {
            let reduced = (omega * omega - gamma * gamma).sqrt();
            Constants::new(x0, (v0 + gamma * x0) / reduced)
        }
        Regime::Critical => Constants::new(x0, v0 + gamma * x0),
    }
}

fn damped_state(omega: Real, gamma: Real, regime: Regime, t: Real, c: &Constants) -> (Real, Real) {
    let (c1, c2) = (c[0], c[1]);
    let decay = (-gamma * t).exp();
    match regime {
        Regime::Overdamped => {
            let alpha = (gamma * gamma - omega * omega).sqrt();
            let grow = (alpha * t).exp();
            let x = decay * (c1 * grow + c2 / grow);
            let v = -gamma * x + decay * (alpha * c1 * grow - alpha * c2 / grow);
            (x, v)
        }
        Regime::Underdamped => {
            let reduced = (omega * omega - gamma * gamma).sqrt();
            let (sin, cos) = (reduced * t).sin_cos();
            let x = decay * (c1 * cos + c2 * sin);
            let v = -gamma * x + reduced * decay * (-c1 * sin + c2 * cos);
            (x, v)
        }
        Regime::Critical => {
            let x = decay * (c1 + c2 * t);
            let v = -gamma * x + decay * c2;
            (x, v)
        }
    }
}
