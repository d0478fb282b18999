extern crate fxquat;
extern crate tempfile;

use fxquat::drift::{DriftParams, DriftSim};

fn params(cycles: u64, wide: bool) -> DriftParams {
    DriftParams {
        step_degrees: 2.0,
        jitter_degrees: 0.5,
        renormalize_every: 3,
        wide,
        cycles,
        report_every: 0,
        seed: Some(1234),
    }
}

fn test_resume_with(total: u64, first: u64, ext: &str) {
    let dir = tempfile::tempdir().expect("Unable to create temp directory");
    for &wide in &[false, true] {
        println!("resuming after {} of {} cycles, wide = {}", first, total, wide);
        let mut whole = DriftSim::from_params(params(total, wide), dir.path().join(format!("whole.{}", ext)));
        while !whole.finished() {
            whole.run_once();
        }

        let small_path = dir.path().join(format!("small.{}", ext));
        let mut small = DriftSim::from_params(params(first, wide), small_path.clone());
        while !small.finished() {
            small.run_once();
        }
        small.save().expect("error saving");

        let mut resumed = DriftSim::load(&small_path).expect("error loading");
        assert_eq!(resumed.cycles, first);
        assert_eq!(resumed.attitude, small.attitude);
        assert_eq!(resumed.save_as, small_path);
        resumed.params.cycles = total;
        while !resumed.finished() {
            resumed.run_once();
        }

        assert_eq!(resumed.cycles, whole.cycles);
        assert_eq!(resumed.attitude, whole.attitude);
    }
}

#[test]
fn test_resume_yaml() {
    test_resume_with(2, 1, "yaml");
    test_resume_with(100, 99, "yaml");
    test_resume_with(1_000, 500, "yaml");
}

#[test]
fn test_resume_json() {
    test_resume_with(10, 5, "json");
    test_resume_with(1_000, 1, "json");
}

#[test]
fn run_saves_final_state() {
    let dir = tempfile::tempdir().expect("Unable to create temp directory");
    let path = dir.path().join("drift.yaml");
    let mut p = params(50, false);
    p.report_every = 20;
    let mut sim = DriftSim::from_params(p, path.clone());
    sim.run().expect("error running");
    let saved = DriftSim::load(&path).expect("error loading");
    assert_eq!(saved.cycles, 50);
    assert_eq!(saved.attitude, sim.attitude);
}

#[test]
fn load_missing_file_fails() {
    let dir = tempfile::tempdir().expect("Unable to create temp directory");
    assert!(DriftSim::load(dir.path().join("nothing.yaml")).is_err());
}
