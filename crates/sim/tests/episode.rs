use std::path::PathBuf;
use std::sync::Arc;

use puzzle_agent::{
    HistoryTreeStrategist, InlineExecutor, PredeterminedTreeStrategist, RandomMoveStrategist,
    export_csv,
};
use puzzle_core::{Action, AgentConfig};
use puzzle_sim::{PuzzleWorld, load_scenario, run_episode};

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn world(name: &str) -> PuzzleWorld {
    let scenario = load_scenario(&scenario_path(name)).expect("sample scenario loads");
    PuzzleWorld::new(scenario, AgentConfig::default().costumes)
}

#[test]
fn test_fixed_tree_escapes_the_corridor() {
    let mut world = world("corridor.json");
    assert!(world.state().escapable, "escapability derived on load");

    let mut strategist = PredeterminedTreeStrategist::new(&AgentConfig::new().with_seed(0));
    let report = run_episode(&mut world, &mut strategist, 50);

    assert!(report.won);
    let actions: Vec<Action> = report.decisions.iter().map(|d| d.action).collect();
    assert_eq!(actions, [Action::Activate, Action::MoveUp]);
    assert!(world.state().inputs[0].active);
    assert!(world.state().outputs[0].active);
}

#[test]
fn test_fixed_tree_solves_the_plate() {
    let mut world = world("plate.json");
    let mut strategist = PredeterminedTreeStrategist::new(&AgentConfig::new().with_seed(0));
    let report = run_episode(&mut world, &mut strategist, 50);

    assert!(report.won);
    let actions: Vec<Action> = report.decisions.iter().map(|d| d.action).collect();
    assert_eq!(
        actions,
        [
            Action::PickUp,
            Action::MoveUp,
            Action::MoveUp,
            Action::Drop,
            Action::MoveUp,
        ]
    );
    assert_eq!(report.idle_ticks, 0);
}

#[test]
fn test_tick_limit_ends_episode() {
    let mut world = world("plate.json");
    let mut strategist = RandomMoveStrategist::new(&AgentConfig::new().with_seed(1));
    let report = run_episode(&mut world, &mut strategist, 3);
    assert!(report.ticks <= 3);
    assert_eq!(report.decisions.len() as u64, report.ticks);
}

#[test]
fn test_history_episode_exports_training_rows() {
    let mut world = world("corridor.json");
    let config = AgentConfig::new().with_seed(6);
    let mut strategist = HistoryTreeStrategist::new(&config, Arc::new(InlineExecutor));
    let report = run_episode(&mut world, &mut strategist, 40);
    assert_eq!(strategist.history().len() as u64, report.ticks);

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("history.csv");
    let rows = export_csv(&path, strategist.history()).expect("export succeeds");
    assert_eq!(rows as u64, report.ticks);
}

#[test]
fn test_malformed_scenarios_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"state\": {} }").expect("write");
    assert!(load_scenario(&path).is_err());

    let path = dir.path().join("timer.json");
    std::fs::write(
        &path,
        r#"{
            "state": {
                "player": { "position": { "x": 0.0, "y": 0.0 } },
                "exit": { "x": 0.0, "y": 100.0 },
                "inputs": [
                    { "position": { "x": 0.0, "y": 40.0 }, "kind": "AlarmClock", "timer": 0 }
                ]
            }
        }"#,
    )
    .expect("write");
    let error = load_scenario(&path).expect_err("zero timer rejected");
    assert!(format!("{error:#}").contains("timer"));

    assert!(load_scenario(&dir.path().join("missing.json")).is_err());
}
