//! Scenario schema definitions.
//!
//! The on-disk field names (`W`, `G`, `F`, `W0`, `T0`, `X0`, `V0`, `Start`,
//! `Stop`, `Step`, `Model`, `Solver`) are a fixed external interface;
//! `Model` and `Solver` carry free strings that are mapped onto the closed
//! selector enums when the scenario is used.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use osc_core::{Real, State, TimeRange, state};
use osc_model::{DrivingForce, Equation};

use crate::validate::ValidationError;

/// One simulation request: physical parameters, initial condition, sampling
/// range and the model/solver selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Optional display name used for run bookkeeping.
    #[serde(rename = "Name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Natural frequency.
    #[serde(rename = "W")]
    pub omega: Real,

    /// Damping coefficient (damped/driven models).
    #[serde(rename = "G", default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<Real>,

    /// Driving amplitude (driven model).
    #[serde(rename = "F", default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<Real>,

    /// Driving frequency (driven model).
    #[serde(rename = "W0", default, skip_serializing_if = "Option::is_none")]
    pub drive_omega: Option<Real>,

    /// Time of the initial condition.
    #[serde(rename = "T0", default)]
    pub t0: Real,

    /// Initial position.
    #[serde(rename = "X0")]
    pub x0: Real,

    /// Initial velocity.
    #[serde(rename = "V0")]
    pub v0: Real,

    #[serde(rename = "Start")]
    pub start: Real,

    #[serde(rename = "Stop")]
    pub stop: Real,

    #[serde(rename = "Step")]
    pub step: Real,

    #[serde(rename = "Model")]
    pub model: String,

    #[serde(rename = "Solver")]
    pub solver: String,
}

/// The closed set of model names accepted in scenario files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    Harmonic,
    Pendulum,
    Damped,
    Driven,
}

impl FromStr for ModelKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Harmonic" => Ok(ModelKind::Harmonic),
            "Pendulum" => Ok(ModelKind::Pendulum),
            "Damped" => Ok(ModelKind::Damped),
            "Driven" => Ok(ModelKind::Driven),
            _ => Err(ValidationError::UnknownSelector {
                kind: "model",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Harmonic => "Harmonic",
            ModelKind::Pendulum => "Pendulum",
            ModelKind::Damped => "Damped",
            ModelKind::Driven => "Driven",
        };
        write!(f, "{name}")
    }
}

/// The closed set of solver names accepted in scenario files.
///
/// `All` runs the full method matrix in one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverKind {
    Analytic,
    Euler,
    Heun,
    RungeKutta4,
    All,
}

impl SolverKind {
    /// The concrete solvers selected by this kind.
    pub fn expand(self) -> Vec<SolverKind> {
        match self {
            SolverKind::All => vec![
                SolverKind::Analytic,
                SolverKind::Euler,
                SolverKind::Heun,
                SolverKind::RungeKutta4,
            ],
            single => vec![single],
        }
    }
}

impl FromStr for SolverKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Analytic" => Ok(SolverKind::Analytic),
            "Euler" => Ok(SolverKind::Euler),
            "Heun" => Ok(SolverKind::Heun),
            "RungeKutta4" => Ok(SolverKind::RungeKutta4),
            "All" => Ok(SolverKind::All),
            _ => Err(ValidationError::UnknownSelector {
                kind: "solver",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverKind::Analytic => "Analytic",
            SolverKind::Euler => "Euler",
            SolverKind::Heun => "Heun",
            SolverKind::RungeKutta4 => "RungeKutta4",
            SolverKind::All => "All",
        };
        write!(f, "{name}")
    }
}

impl Scenario {
    /// Name for run bookkeeping: the explicit `Name`, or the model name.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.model
        } else {
            &self.name
        }
    }

    pub fn model_kind(&self) -> Result<ModelKind, ValidationError> {
        self.model.parse()
    }

    pub fn solver_kind(&self) -> Result<SolverKind, ValidationError> {
        self.solver.parse()
    }

    /// Initial condition `[T0, X0, V0]`.
    pub fn initial_state(&self) -> State {
        state(self.t0, self.x0, self.v0)
    }

    /// Validated sampling range.
    pub fn time_range(&self) -> Result<TimeRange, ValidationError> {
        Ok(TimeRange::new(self.start, self.stop, self.step)?)
    }

    /// Build the configured equation.
    pub fn equation(&self) -> Result<Equation, ValidationError> {
        match self.model_kind()? {
            ModelKind::Harmonic => Ok(Equation::harmonic(self.omega)),
            ModelKind::Pendulum => Ok(Equation::pendulum(self.omega)),
            ModelKind::Damped => {
                let gamma = self.gamma.ok_or(ValidationError::MissingField {
                    field: "G",
                    model: "Damped",
                })?;
                Ok(Equation::damped(self.omega, gamma))
            }
            ModelKind::Driven => {
                let gamma = self.gamma.ok_or(ValidationError::MissingField {
                    field: "G",
                    model: "Driven",
                })?;
                let amplitude = self.amplitude.ok_or(ValidationError::MissingField {
                    field: "F",
                    model: "Driven",
                })?;
                let drive_omega = self.drive_omega.ok_or(ValidationError::MissingField {
                    field: "W0",
                    model: "Driven",
                })?;
                Ok(Equation::driven(
                    self.omega,
                    gamma,
                    DrivingForce::cosine(amplitude, drive_omega),
                ))
            }
        }
    }
}
