#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation engine that replays the robot's fixed movement policy.
//!
//! Each iteration checks for the goal, records the configuration signature,
//! applies the current tile's effect, resolves the next move and advances the
//! robot. The run ends on the goal, on a repeated configuration, or when the
//! robot is boxed in.

mod replay;

use maze_robot_core::{CellCoord, Command, Direction, Event, LoopReason, Outcome};
use maze_robot_system_loop_detection::{state_space_bound, LoopDetector, Observation};
use maze_robot_system_movement::{MoveDecision, MoveResolver};
use maze_robot_system_tile_effects::TileEffects;
use maze_robot_world::{self as world, query, Grid, World};
use tracing::{debug, info, trace};

pub use replay::{replay, ReplayError, ReplayOutcome};

/// Lifecycle of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// The robot is still moving.
    Running,
    /// The robot reached a goal cell.
    Success,
    /// A configuration repeated, so the goal can never be reached.
    CycleDetected,
    /// No direction was passable from the robot's cell.
    Stuck,
}

impl EngineState {
    /// Reports whether the run has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Summary produced once a run terminates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// Terminal result: the path taken, or the loop reason.
    pub outcome: Outcome,
    /// Number of moves the robot made, including moves of failed runs.
    pub steps: usize,
    /// Number of distinct configurations the loop detector recorded.
    pub configurations: usize,
    /// Number of teleporter hops the world carried out.
    pub teleports: usize,
    /// Walls destroyed during the run, in row-major order.
    pub destroyed_walls: Vec<CellCoord>,
    /// Cell the robot occupied when the run ended.
    pub final_cell: CellCoord,
}

/// Stateful engine that owns the world and the systems driving the robot.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    effects: TileEffects,
    movement: MoveResolver,
    detector: LoopDetector,
    path: Vec<Direction>,
    state: EngineState,
    teleports: usize,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Creates an engine positioned at the grid's start cell.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let world = World::new(grid);
        let layout = query::grid(&world);
        let effects = TileEffects::new(layout.cell_count());
        let movement = MoveResolver::new(layout.columns(), layout.rows());
        debug!(
            cells = layout.cell_count(),
            breakable_walls = layout.breakable_walls().len(),
            bound = ?state_space_bound(layout.cell_count(), layout.breakable_walls().len()),
            "configuration space"
        );
        Self {
            world,
            effects,
            movement,
            detector: LoopDetector::new(),
            path: Vec::new(),
            state: EngineState::Running,
            teleports: 0,
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Read-only access to the world being simulated.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Moves taken so far, in travel order.
    #[must_use]
    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    /// Advances the run by one iteration and returns the resulting state.
    ///
    /// Calling this on a finished run leaves it untouched.
    pub fn step(&mut self) -> EngineState {
        if self.state.is_terminal() {
            return self.state;
        }

        if query::at_goal(&self.world) {
            return self.finish(EngineState::Success);
        }

        if self.detector.observe(query::signature(&self.world)) == Observation::Repeated {
            return self.finish(EngineState::CycleDetected);
        }

        self.apply_tile_effect();

        match self.resolve_move() {
            MoveDecision::Forward(direction) | MoveDecision::Redirected(direction) => {
                self.path.push(direction);
                self.state
            }
            MoveDecision::Stuck => self.finish(EngineState::Stuck),
        }
    }

    /// Steps until the run terminates and summarises it.
    pub fn run(mut self) -> Report {
        while !self.step().is_terminal() {}
        self.report()
    }

    fn report(&self) -> Report {
        let outcome = match self.state {
            EngineState::Success | EngineState::Running => Outcome::Success {
                path: self.path.clone(),
            },
            EngineState::CycleDetected => Outcome::Loop {
                reason: LoopReason::CycleDetected,
            },
            EngineState::Stuck => Outcome::Loop {
                reason: LoopReason::Stuck,
            },
        };

        Report {
            outcome,
            steps: self.path.len(),
            configurations: self.detector.configurations(),
            teleports: self.teleports,
            destroyed_walls: query::destroyed_walls(&self.world),
            final_cell: query::robot(&self.world).cell,
        }
    }

    fn apply_tile_effect(&mut self) {
        let robot = query::robot(&self.world);
        let world = &self.world;
        self.effects.handle(
            &robot,
            |cell| query::tile_at(world, cell),
            |cell| query::teleporter_partner(world, cell),
            &mut self.commands,
        );
        self.execute();
    }

    fn resolve_move(&mut self) -> MoveDecision {
        let robot = query::robot(&self.world);
        let world = &self.world;
        let decision = self.movement.handle(
            &robot,
            |cell| query::is_passable(world, cell),
            &mut self.commands,
        );
        debug!(
            step = self.path.len(),
            cell = ?robot.cell,
            facing = %robot.facing,
            breaker = robot.breaker,
            inverted = robot.inverted,
            ?decision,
            "resolved move"
        );
        self.execute();
        decision
    }

    fn execute(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        for event in self.events.drain(..) {
            if matches!(event, Event::RobotTeleported { .. }) {
                self.teleports += 1;
            }
            trace!(?event, "world event");
        }
    }

    fn finish(&mut self, state: EngineState) -> EngineState {
        self.state = state;
        info!(
            ?state,
            steps = self.path.len(),
            configurations = self.detector.configurations(),
            destroyed = query::destroyed_fingerprint(&self.world).count(),
            "simulation finished"
        );
        state
    }
}

/// Runs the robot on `grid` until it reaches a goal or is proven to loop.
#[must_use]
pub fn simulate(grid: Grid) -> Report {
    Simulation::new(grid).run()
}
