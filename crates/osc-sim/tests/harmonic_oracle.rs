//! Integration tests: energy conservation oracles for the harmonic model.
//!
//! The undamped harmonic oscillator has a known exact solution, which makes
//! its energy the primary regression oracle: the analytic trajectory must
//! conserve it, Euler must visibly leak it, RK4 must hold it tight.

use osc_core::{State, TimeRange, state};
use osc_model::Equation;
use osc_sim::{Method, Solver};

const TWO_PI: f64 = 6.283185;

fn one_period() -> TimeRange {
    TimeRange::new(0.0, TWO_PI, 0.01).unwrap()
}

fn unit_oscillator_energies(method: Method) -> Vec<(f64, f64)> {
    let eq = Equation::harmonic(1.0);
    let mut solver = Solver::new(&eq, method);
    solver.compute(state(0.0, 1.0, 0.0), one_period()).unwrap();
    solver.energy_series().unwrap()
}

#[test]
fn analytic_energy_is_constant() {
    let energies = unit_oscillator_energies(Method::Analytic);
    let e0 = energies[0].1;
    for (t, e) in &energies {
        assert!(
            (e - e0).abs() <= 1e-9 * e0,
            "energy {e} at t={t} deviates from {e0}"
        );
    }
}

#[test]
fn analytic_returns_after_one_period() {
    let eq = Equation::harmonic(1.0);
    let mut solver = Solver::new(&eq, Method::Analytic);
    solver.compute(state(0.0, 1.0, 0.0), one_period()).unwrap();

    let last = solver.coords(solver.samples() - 1).unwrap();
    assert!((last[1] - 1.0).abs() < 1e-2, "x = {}", last[1]);
    assert!(last[2].abs() < 1e-2, "v = {}", last[2]);
}

#[test]
fn sample_count_is_nominal_within_one() {
    let eq = Equation::harmonic(1.0);
    let range = one_period();
    for method in [Method::Analytic, Method::Euler, Method::Heun, Method::RungeKutta4] {
        let mut solver = Solver::new(&eq, method);
        solver.compute(state(0.0, 1.0, 0.0), range).unwrap();
        let diff = solver.samples() as i64 - range.num_steps() as i64;
        assert!(diff.abs() <= 1, "{method:?} produced {} samples", solver.samples());
    }
}

#[test]
fn euler_energy_drifts_monotonically_upward() {
    let energies = unit_oscillator_energies(Method::Euler);
    for pair in energies.windows(2) {
        assert!(
            pair[1].1 >= pair[0].1,
            "energy decreased from {} to {}",
            pair[0].1,
            pair[1].1
        );
    }
    let first = energies.first().unwrap().1;
    let last = energies.last().unwrap().1;
    assert!(
        (last - first) / first > 0.01,
        "Euler drift over one period was only {}",
        (last - first) / first
    );
}

#[test]
fn rk4_energy_error_is_bounded_and_small() {
    let energies = unit_oscillator_energies(Method::RungeKutta4);
    let e0 = energies[0].1;
    let max_err = energies
        .iter()
        .map(|(_, e)| (e - e0).abs() / e0)
        .fold(0.0_f64, f64::max);
    assert!(max_err < 1e-5, "RK4 relative drift {max_err}");
}

#[test]
fn rk4_beats_euler_by_orders_of_magnitude() {
    let euler = unit_oscillator_energies(Method::Euler);
    let rk4 = unit_oscillator_energies(Method::RungeKutta4);
    let e0 = euler[0].1;
    let euler_err = (euler.last().unwrap().1 - e0).abs() / e0;
    let rk4_err = (rk4.last().unwrap().1 - e0).abs() / e0;
    assert!(rk4_err * 1e3 < euler_err);
}

#[test]
fn heun_sits_between_euler_and_rk4() {
    let euler = unit_oscillator_energies(Method::Euler);
    let heun = unit_oscillator_energies(Method::Heun);
    let e0 = euler[0].1;
    let euler_err = (euler.last().unwrap().1 - e0).abs() / e0;
    let heun_err = (heun.last().unwrap().1 - e0).abs() / e0;
    assert!(heun_err < euler_err);
}

#[test]
fn warm_up_matches_direct_integration() {
    let eq = Equation::harmonic(1.0);
    let initial = state(0.0, 1.0, 0.0);

    // Sampling starts mid-trajectory; the initial condition is at t = 0.
    let mut windowed = Solver::new(&eq, Method::Heun);
    windowed
        .compute(initial, TimeRange::new(2.0, 3.0, 0.01).unwrap())
        .unwrap();

    // Direct integration from t = 0 with the same rule and step.
    let mut direct = Solver::new(&eq, Method::Heun);
    direct
        .compute(initial, TimeRange::new(0.0, 3.0, 0.01).unwrap())
        .unwrap();

    let seam: State = windowed.coords(0).unwrap();
    let reference: State = direct.coords(200).unwrap();
    assert!(
        (seam[1] - reference[1]).abs() < 1e-12,
        "x seam mismatch: {} vs {}",
        seam[1],
        reference[1]
    );
    assert!((seam[2] - reference[2]).abs() < 1e-12);
}

#[test]
fn damped_energy_decays_under_every_method() {
    let eq = Equation::damped(1.0, 0.1);
    for method in [Method::Analytic, Method::Euler, Method::Heun, Method::RungeKutta4] {
        let mut solver = Solver::new(&eq, method);
        solver.compute(state(0.0, 1.0, 0.0), one_period()).unwrap();
        let first = solver.energy_at(0).unwrap();
        let last = solver.energy_at(solver.samples() - 1).unwrap();
        assert!(last < first, "{method:?}: {last} !< {first}");
    }
}

#[test]
fn small_angle_pendulum_tracks_the_linear_model() {
    let eq_lin = Equation::harmonic(1.0);
    let eq_pend = Equation::pendulum(1.0);
    let initial = state(0.0, 0.01, 0.0);
    let range = one_period();

    let mut linear = Solver::new(&eq_lin, Method::RungeKutta4);
    linear.compute(initial, range).unwrap();
    let mut pendulum = Solver::new(&eq_pend, Method::RungeKutta4);
    pendulum.compute(initial, range).unwrap();

    assert_eq!(linear.samples(), pendulum.samples());
    for step in 0..linear.samples() {
        let a = linear.coords(step).unwrap();
        let b = pendulum.coords(step).unwrap();
        assert!((a[1] - b[1]).abs() < 1e-5);
    }
}

#[test]
fn rejected_range_fails_before_any_integration() {
    assert!(TimeRange::new(5.0, 2.0, 0.1).is_err());
}
