use osc_core::state;
use osc_results::*;

fn sample_manifest(run_id: &str, scenario_name: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        scenario_name: scenario_name.to_string(),
        timestamp: "2026-08-06T12:00:00Z".to_string(),
        solver_version: "0.1.0".to_string(),
        series: vec![SeriesEntry {
            label: "EulerHarmonic".to_string(),
            solver: "Euler".to_string(),
            model: "Harmonic".to_string(),
            samples: 2,
        }],
    }
}

fn sample_series() -> RunSeries {
    RunSeries {
        label: "EulerHarmonic".to_string(),
        trajectory: vec![state(0.0, 1.0, 0.0), state(0.01, 1.0, -0.01)],
        energy: vec![(0.0, 0.5), (0.01, 0.50005)],
    }
}

#[test]
fn save_and_load_run() {
    let temp_dir = std::env::temp_dir().join("oscsim_results_test");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir.clone()).unwrap();
    let manifest = sample_manifest("run_abc", "unit-oscillator");
    store.save_run(&manifest, &[sample_series()]).unwrap();

    let loaded = store.load_manifest("run_abc").unwrap();
    assert_eq!(loaded.run_id, manifest.run_id);
    assert_eq!(loaded.series.len(), 1);

    let trajectory = store.load_trajectory("run_abc", "EulerHarmonic").unwrap();
    assert_eq!(trajectory.len(), 2);
    assert_eq!(trajectory[0], state(0.0, 1.0, 0.0));

    let energy = store.load_energy("run_abc", "EulerHarmonic").unwrap();
    assert_eq!(energy, vec![(0.0, 0.5), (0.01, 0.50005)]);
}

#[test]
fn missing_run_and_series_are_reported() {
    let temp_dir = std::env::temp_dir().join("oscsim_results_test_missing");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir).unwrap();
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));

    let manifest = sample_manifest("run_x", "unit-oscillator");
    store.save_run(&manifest, &[]).unwrap();
    assert!(matches!(
        store.load_trajectory("run_x", "HeunHarmonic"),
        Err(ResultsError::SeriesNotFound { .. })
    ));
}

#[test]
fn list_runs_filters_by_scenario() {
    let temp_dir = std::env::temp_dir().join("oscsim_results_test_list");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir).unwrap();
    store
        .save_run(&sample_manifest("run_1", "scenario-a"), &[])
        .unwrap();
    store
        .save_run(&sample_manifest("run_2", "scenario-a"), &[])
        .unwrap();
    store
        .save_run(&sample_manifest("run_3", "scenario-b"), &[])
        .unwrap();

    let runs = store.list_runs("scenario-a").unwrap();
    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|m| m.scenario_name == "scenario-a"));
}

#[test]
fn delete_run_removes_everything() {
    let temp_dir = std::env::temp_dir().join("oscsim_results_test_delete");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir).unwrap();
    store
        .save_run(&sample_manifest("run_del", "scenario-a"), &[sample_series()])
        .unwrap();
    assert!(store.has_run("run_del"));

    store.delete_run("run_del").unwrap();
    assert!(!store.has_run("run_del"));
    assert!(store.load_manifest("run_del").is_err());
}
