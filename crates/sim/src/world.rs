//! Headless stand-in for the live puzzle scene.
//!
//! [`PuzzleWorld`] carries out concrete actions on a [`Scenario`] the way the
//! scene would, so strategies can be driven without rendering or physics.
//! Interaction reach is [`AgentConfig::NEAR_RADIUS`] (straight-line), the
//! same radius the assessor uses for "near".

use puzzle_agent::assess::{closest_input, closest_object};
use puzzle_core::{
    AbstractGameState, Action, AgentConfig, Costume, CostumeTable, InputKind, Point, Scenario,
    euclidean_distance,
};
use tracing::debug;

/// What a step did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    Moved(Point),
    /// Input `input` was switched to `active`.
    Toggled { input: usize, active: bool },
    PickedUp(Point),
    /// The carried object was put down; `plate` is the pressure plate it
    /// landed on, if any.
    Dropped { at: Point, plate: Option<usize> },
    CostumeChanged(Costume),
    /// The action had nothing to act on (or is not modelled).
    NoEffect,
}

/// A scenario plus the rules that mutate it.
#[derive(Clone, Debug)]
pub struct PuzzleWorld {
    scenario: Scenario,
    costumes: CostumeTable,
    /// Initial timer of each input; timed inputs switch off after this many
    /// ticks.
    durations: Vec<Option<i32>>,
    tick: u64,
}

impl PuzzleWorld {
    pub fn new(scenario: Scenario, costumes: CostumeTable) -> Self {
        let durations = scenario.state.inputs.iter().map(|input| input.timer).collect();
        let mut world = Self {
            scenario,
            costumes,
            durations,
            tick: 0,
        };
        for input in &mut world.scenario.state.inputs {
            if !input.active {
                input.timer = None;
            }
        }
        world.refresh();
        world
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn state(&self) -> &AbstractGameState {
        &self.scenario.state
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The player stands at an escapable exit.
    pub fn is_won(&self) -> bool {
        let state = &self.scenario.state;
        state.is_win(&state.player)
    }

    /// Applies one action and advances the clock by one tick.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        let outcome = match action {
            Action::MoveUp | Action::MoveDown | Action::MoveLeft | Action::MoveRight => {
                self.scenario.state.apply(action);
                StepOutcome::Moved(self.scenario.state.player.position)
            }
            Action::Activate => self.activate(),
            Action::PickUp => self.pick_up(),
            Action::Drop => self.drop_object(),
            Action::SwitchNextCostume => self.change_costume(Costume::next),
            Action::SwitchPrevCostume => self.change_costume(Costume::previous),
            Action::Stop | Action::DeployClone | Action::RetractClone => StepOutcome::NoEffect,
        };

        self.tick += 1;
        self.run_timers();
        self.refresh();

        debug!(tick = self.tick, %action, ?outcome, "world step");
        outcome
    }

    /// Index of the closest input, if it is within reach.
    fn reachable_input(&self) -> Option<usize> {
        let state = &self.scenario.state;
        let input = closest_input(state)?;
        if euclidean_distance(state.player.position, input.position) >= AgentConfig::NEAR_RADIUS {
            return None;
        }
        state.inputs.iter().position(|candidate| std::ptr::eq(candidate, input))
    }

    fn activate(&mut self) -> StepOutcome {
        let Some(index) = self.reachable_input() else {
            return StepOutcome::NoEffect;
        };

        let state = &self.scenario.state;
        let input = &state.inputs[index];
        if input.kind.requires_object() {
            // Plates react to objects, not to the player
            return StepOutcome::NoEffect;
        }
        if input.kind.requires_costume()
            && self.costumes.required(input.kind) != Some(state.player.costume)
        {
            return StepOutcome::NoEffect;
        }

        let active = !input.active;
        self.set_active(index, active);
        StepOutcome::Toggled { input: index, active }
    }

    fn pick_up(&mut self) -> StepOutcome {
        let state = &self.scenario.state;
        if state.player.carrying_item {
            return StepOutcome::NoEffect;
        }
        let Some(object) = closest_object(state, &self.scenario.objects) else {
            return StepOutcome::NoEffect;
        };
        if euclidean_distance(state.player.position, object) >= AgentConfig::NEAR_RADIUS {
            return StepOutcome::NoEffect;
        }

        if let Some(index) = self.scenario.objects.iter().position(|&o| o == object) {
            self.scenario.objects.remove(index);
        }
        self.scenario.state.player.carrying_item = true;
        StepOutcome::PickedUp(object)
    }

    fn drop_object(&mut self) -> StepOutcome {
        if !self.scenario.state.player.carrying_item {
            return StepOutcome::NoEffect;
        }
        let at = self.scenario.state.player.position;
        self.scenario.state.player.carrying_item = false;
        self.scenario.objects.push(at);

        let plate = self
            .reachable_input()
            .filter(|&index| self.scenario.state.inputs[index].kind == InputKind::PressurePlate);
        if let Some(index) = plate {
            self.set_active(index, true);
        }
        StepOutcome::Dropped { at, plate }
    }

    fn change_costume(&mut self, change: fn(Costume) -> Costume) -> StepOutcome {
        let player = &mut self.scenario.state.player;
        player.costume = change(player.costume);
        StepOutcome::CostumeChanged(player.costume)
    }

    /// Switches an input and re-evaluates every receiver it feeds.
    fn set_active(&mut self, index: usize, active: bool) {
        let state = &mut self.scenario.state;
        let input = &mut state.inputs[index];
        input.active = active;
        input.timer = if active { self.durations[index] } else { None };

        let fed: Vec<Point> = input.outputs.clone();
        for receiver in &mut state.outputs {
            if fed.contains(&receiver.location) {
                receiver.active = state
                    .inputs
                    .iter()
                    .any(|input| input.active && input.feeds(receiver.location));
            }
        }
    }

    /// Counts down active timed inputs and switches off the expired ones.
    fn run_timers(&mut self) {
        let mut expired = Vec::new();
        for (index, input) in self.scenario.state.inputs.iter_mut().enumerate() {
            if let Some(remaining) = input.timer.as_mut() {
                *remaining -= 1;
                if *remaining <= 0 {
                    expired.push(index);
                }
            }
        }
        for index in expired {
            self.set_active(index, false);
        }
    }

    fn refresh(&mut self) {
        self.scenario.state.refresh_escapable();
    }
}
