use std::collections::BTreeSet;
use std::sync::Arc;

use puzzle_agent::{
    ActionModel, Assessor, CSV_HEADER, ExternalModelStrategist, HistoryTreeStrategist,
    InlineExecutor, ModelError, PolicyTree, PredeterminedTreeStrategist, Strategist,
    TokioExecutor, TreeLabel, export_csv, trees,
};
use puzzle_core::{
    AbstractGameState, AbstractPlayer, AbstractSignalReceivable, AbstractSignalSender, Action,
    AgentConfig, Decision, InputKind, Point, Scenario,
};

/// Player at the origin, exit straight up, one active lever halfway that is
/// wired to the exit.
fn wired_corridor() -> AbstractGameState {
    let exit = Point::new(0.0, 200.0);
    AbstractGameState::new(
        AbstractPlayer::new(Point::ORIGIN),
        exit,
        vec![
            AbstractSignalSender::new(Point::new(0.0, 100.0), InputKind::Lever)
                .with_outputs(vec![exit])
                .with_active(true),
        ],
        vec![AbstractSignalReceivable::new(exit, true)],
    )
}

/// End-to-end: assessment, fixed tree and resolution on one concrete level.
#[test]
fn test_wired_corridor_heads_for_the_lever() {
    let state = wired_corridor();
    assert!(state.escapable);

    let assessment = Assessor::default().assess(&state, &[]);
    assert!(!assessment.can_escape, "exit is 200 away");
    assert!(!assessment.near_exit);
    assert!(!assessment.near_input, "lever is 100 away");
    assert!(assessment.all_inputs_active);

    let label = *trees::predetermined()
        .find_action(&assessment)
        .expect("assessment answers every question");
    assert_eq!(label, puzzle_agent::MetaDirective::MoveInputCloser.into());

    let mut strategist = PredeterminedTreeStrategist::new(&AgentConfig::new().with_seed(0));
    assert_eq!(
        strategist.best_move_for_active_player(&state),
        Decision::new(Action::MoveUp, 0)
    );
}

#[test]
fn test_exit_seeking_moves_right() {
    let mut state = AbstractGameState::new(
        AbstractPlayer::new(Point::ORIGIN),
        Point::new(128.0, 0.0),
        Vec::new(),
        Vec::new(),
    );
    let action = puzzle_agent::heuristics::step_toward(&state, state.exit);
    assert_eq!(action, Action::MoveRight);

    state.apply(action);
    assert_eq!(state.player.position, Point::new(64.0, 0.0));
}

#[test]
fn test_history_strategist_wanders_below_threshold() {
    let config = AgentConfig::new().with_seed(21);
    let mut strategist = HistoryTreeStrategist::new(&config, Arc::new(InlineExecutor));
    let state = wired_corridor();

    let mut seen = BTreeSet::new();
    for _ in 0..AgentConfig::MIN_TRAINING_SAMPLES {
        let decision = strategist.best_move_for_active_player(&state);
        assert!(
            Action::WANDER.contains(&decision.action),
            "{} is not a wandering action",
            decision.action
        );
        seen.insert(decision.action);
    }

    assert_eq!(strategist.history().len(), AgentConfig::MIN_TRAINING_SAMPLES);
    let wander = TreeLabel::Directive(puzzle_agent::MetaDirective::MoveRandom);
    assert!(strategist.history().iter().all(|item| item.derived == wander));
    // Uniform over five actions: twenty draws hit more than one
    assert!(seen.len() > 1);
}

#[test]
fn test_learned_tree_takes_over_on_a_later_cycle() {
    let config = AgentConfig::new().with_seed(8);
    let mut strategist = HistoryTreeStrategist::new(&config, Arc::new(InlineExecutor));
    let state = wired_corridor();

    for _ in 0..AgentConfig::MIN_TRAINING_SAMPLES {
        strategist
            .record_demonstration(&state, Action::MoveUp)
            .expect("state is valid");
    }

    // Triggering cycle still runs on the fallback tree
    let first = strategist.best_move_for_active_player(&state);
    assert!(Action::WANDER.contains(&first.action));
    assert_ne!(*strategist.learned_tree(), trees::fallback());

    // From now on the learned tree answers
    for _ in 0..5 {
        assert_eq!(
            strategist.best_move_for_active_player(&state).action,
            Action::MoveUp
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_learned_tree_published_from_blocking_pool() {
    let executor = TokioExecutor::current().expect("inside a runtime");
    let config = AgentConfig::new().with_seed(8);
    let mut strategist = HistoryTreeStrategist::new(&config, Arc::new(executor));
    let mut published = strategist.subscribe();
    let state = wired_corridor();

    for _ in 0..AgentConfig::MIN_TRAINING_SAMPLES {
        strategist
            .record_demonstration(&state, Action::Activate)
            .expect("state is valid");
    }
    strategist.best_move_for_active_player(&state);

    tokio::time::timeout(std::time::Duration::from_secs(5), published.changed())
        .await
        .expect("rebuild finishes")
        .expect("builder alive");

    let learned: Arc<PolicyTree> = published.borrow_and_update().clone();
    assert_eq!(*learned, PolicyTree::constant(Action::Activate.into()));
    assert_eq!(
        strategist.best_move_for_active_player(&state).action,
        Action::Activate
    );
}

#[test]
fn test_scenario_objects_reach_the_assessor() {
    let scenario = Scenario::new(
        AbstractGameState::new(
            AbstractPlayer::new(Point::ORIGIN),
            Point::new(900.0, 900.0),
            Vec::new(),
            Vec::new(),
        ),
        vec![Point::new(10.0, 10.0)],
    );
    let mut strategist = PredeterminedTreeStrategist::new(&AgentConfig::new().with_seed(0));
    assert_eq!(
        strategist.best_move_for_active_player(&scenario).action,
        Action::PickUp
    );
}

#[test]
fn test_model_failures_never_escape() {
    struct Broken;
    impl ActionModel for Broken {
        fn predict(
            &mut self,
            _: &puzzle_agent::ModelInput,
        ) -> Result<puzzle_agent::Prediction, ModelError> {
            Err(ModelError::Prediction("model crashed".to_string()))
        }
    }

    let config = AgentConfig::new().with_seed(0);
    let mut broken = ExternalModelStrategist::load(&config, || Ok(Box::new(Broken)));
    let mut missing = ExternalModelStrategist::load(&config, || {
        Err(ModelError::Load("file not found".to_string()))
    });

    let state = wired_corridor();
    assert_eq!(broken.best_move_for_active_player(&state), Decision::stop());
    assert_eq!(missing.best_move_for_active_player(&state), Decision::stop());
}

#[test]
fn test_csv_export_header_is_stable() {
    let config = AgentConfig::new().with_seed(3);
    let mut strategist = HistoryTreeStrategist::new(&config, Arc::new(InlineExecutor));
    let state = wired_corridor();
    for _ in 0..4 {
        strategist.best_move_for_active_player(&state);
    }

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("training.csv");
    let rows = export_csv(&path, strategist.history()).expect("export succeeds");
    assert_eq!(rows, 4);

    let text = std::fs::read_to_string(&path).expect("file written");
    let mut lines = text.lines();
    let header = lines.next().expect("header line");
    assert_eq!(header, CSV_HEADER);
    assert_eq!(
        header.split(',').collect::<Vec<_>>(),
        [
            "canEscape",
            "nearExit",
            "nearInput",
            "inputActive",
            "inputRelevant",
            "requiresObject",
            "requiresCostume",
            "wearingCostume",
            "hasObject",
            "nearObject",
            "allInputsActive",
            "action",
        ]
    );
    for line in lines {
        let cells: Vec<&str> = line.split(',').collect();
        assert_eq!(cells.len(), 12);
        assert!(cells[..11].iter().all(|c| *c == "true" || *c == "false"));
        assert!(cells[11].parse::<Action>().is_ok());
    }
}
