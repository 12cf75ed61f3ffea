use maze_robot_core::{CellCoord, Command, Direction, RobotSnapshot};
use maze_robot_system_movement::{MoveDecision, MoveResolver};
use maze_robot_world::{self as world, query, Grid, World};

fn world_from(rows: &[&str]) -> World {
    World::new(Grid::from_rows(rows).expect("valid grid"))
}

fn decide(world: &World) -> MoveDecision {
    let grid = query::grid(world);
    let resolver = MoveResolver::new(grid.columns(), grid.rows());
    resolver.resolve(&query::robot(world), |cell| query::is_passable(world, cell))
}

fn decide_with(robot: RobotSnapshot, open: &[CellCoord]) -> MoveDecision {
    MoveResolver::new(3, 3).resolve(&robot, |cell| open.contains(&cell))
}

fn centre(facing: Direction, inverted: bool) -> RobotSnapshot {
    RobotSnapshot {
        cell: CellCoord::new(1, 1),
        facing,
        breaker: false,
        inverted,
    }
}

const SOUTH_OF_CENTRE: CellCoord = CellCoord::new(1, 2);
const EAST_OF_CENTRE: CellCoord = CellCoord::new(2, 1);
const NORTH_OF_CENTRE: CellCoord = CellCoord::new(1, 0);
const WEST_OF_CENTRE: CellCoord = CellCoord::new(0, 1);

#[test]
fn forward_is_preferred_over_priority_order() {
    let all = [
        SOUTH_OF_CENTRE,
        EAST_OF_CENTRE,
        NORTH_OF_CENTRE,
        WEST_OF_CENTRE,
    ];
    for facing in Direction::PRIORITY {
        assert_eq!(
            decide_with(centre(facing, false), &all),
            MoveDecision::Forward(facing)
        );
        assert_eq!(
            decide_with(centre(facing, true), &all),
            MoveDecision::Forward(facing)
        );
    }
}

#[test]
fn normal_priority_scans_south_east_north_west() {
    let robot = centre(Direction::West, false);

    assert_eq!(
        decide_with(robot, &[SOUTH_OF_CENTRE, EAST_OF_CENTRE, NORTH_OF_CENTRE]),
        MoveDecision::Redirected(Direction::South)
    );
    assert_eq!(
        decide_with(robot, &[EAST_OF_CENTRE, NORTH_OF_CENTRE]),
        MoveDecision::Redirected(Direction::East)
    );
    assert_eq!(
        decide_with(robot, &[NORTH_OF_CENTRE]),
        MoveDecision::Redirected(Direction::North)
    );
    assert_eq!(
        decide_with(centre(Direction::South, false), &[WEST_OF_CENTRE]),
        MoveDecision::Redirected(Direction::West)
    );
}

#[test]
fn inverted_priority_scans_west_north_east_south() {
    let robot = centre(Direction::South, true);

    assert_eq!(
        decide_with(robot, &[WEST_OF_CENTRE, NORTH_OF_CENTRE, EAST_OF_CENTRE]),
        MoveDecision::Redirected(Direction::West)
    );
    assert_eq!(
        decide_with(robot, &[NORTH_OF_CENTRE, EAST_OF_CENTRE]),
        MoveDecision::Redirected(Direction::North)
    );
    assert_eq!(
        decide_with(robot, &[EAST_OF_CENTRE]),
        MoveDecision::Redirected(Direction::East)
    );
    assert_eq!(
        decide_with(centre(Direction::West, true), &[SOUTH_OF_CENTRE]),
        MoveDecision::Redirected(Direction::South)
    );
}

#[test]
fn walls_and_intact_breakable_walls_block() {
    let mut world = world_from(&["#####", "#X@##", "##$##"]);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::FaceRobot {
            direction: Direction::West,
        },
        &mut events,
    );

    assert_eq!(decide(&world), MoveDecision::Redirected(Direction::South));
}

#[test]
fn breaker_mode_opens_breakable_walls() {
    let mut world = world_from(&["#####", "#X@##", "##$##"]);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::FaceRobot {
            direction: Direction::West,
        },
        &mut events,
    );
    world::apply(&mut world, Command::ToggleBreaker, &mut events);

    assert_eq!(decide(&world), MoveDecision::Forward(Direction::West));
}

#[test]
fn enclosed_robot_is_stuck() {
    let world = world_from(&["###", "#@#", "###", "#$#"]);
    assert_eq!(decide(&world), MoveDecision::Stuck);
}

#[test]
fn handle_emits_step_command_for_decision() {
    let world = world_from(&["@ ", " $"]);
    let grid = query::grid(&world);
    let resolver = MoveResolver::new(grid.columns(), grid.rows());
    let mut commands = Vec::new();

    let decision = resolver.handle(
        &query::robot(&world),
        |cell| query::is_passable(&world, cell),
        &mut commands,
    );

    assert_eq!(decision, MoveDecision::Forward(Direction::South));
    assert_eq!(
        commands,
        vec![Command::StepRobot {
            direction: Direction::South,
        }]
    );
}
