//! Scenario validation logic.

use osc_core::ensure_finite;

use crate::schema::Scenario;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unknown {kind}: {name}")]
    UnknownSelector { kind: &'static str, name: String },

    #[error("Missing field: {field} (required by the {model} model)")]
    MissingField {
        field: &'static str,
        model: &'static str,
    },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error(transparent)]
    Core(#[from] osc_core::CoreError),
}

/// Check everything that can be checked before a run starts: selectors,
/// finiteness, the sampling range and model-specific parameter presence.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    scenario.model_kind()?;
    scenario.solver_kind()?;

    let required = [
        (scenario.omega, "W"),
        (scenario.t0, "T0"),
        (scenario.x0, "X0"),
        (scenario.v0, "V0"),
        (scenario.start, "Start"),
        (scenario.stop, "Stop"),
        (scenario.step, "Step"),
    ];
    for (value, field) in required {
        ensure_finite(value, field)?;
    }
    for (value, field) in [
        (scenario.gamma, "G"),
        (scenario.amplitude, "F"),
        (scenario.drive_omega, "W0"),
    ] {
        if let Some(v) = value {
            ensure_finite(v, field)?;
        }
    }

    if scenario.omega <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "W",
            value: scenario.omega,
            reason: "natural frequency must be positive",
        });
    }
    if let Some(gamma) = scenario.gamma
        && gamma < 0.0
    {
        return Err(ValidationError::InvalidValue {
            field: "G",
            value: gamma,
            reason: "damping can't be negative",
        });
    }
    if scenario.t0 < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "T0",
            value: scenario.t0,
            reason: "initial time can't be negative",
        });
    }

    scenario.time_range()?;
    scenario.equation()?;
    Ok(())
}
