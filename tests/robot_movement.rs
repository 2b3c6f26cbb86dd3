// tests/robot_movement.rs
use glam::Vec3;
use robot_tilegrid::{
    Direction, GridConfig, GridError, GridRobot, Heading, Robot, parse_str,
};

fn robot(map: &str) -> GridRobot {
    let grid = parse_str(map).unwrap();
    GridRobot::locate(grid, &GridConfig::default()).expect("map has a robot marker")
}

#[test]
fn test_locate_reads_marker_heading() {
    let east = robot("2x3\n.>.\n...");
    assert_eq!(east.cell(), (0, 1));
    assert_eq!(east.heading(), Heading::East);

    let south = robot("2x2\n..\nv.");
    assert_eq!(south.cell(), (1, 0));
    assert_eq!(south.heading(), Heading::South);

    let none = parse_str("1x2\n..").unwrap();
    assert!(GridRobot::locate(none, &GridConfig::default()).is_none());
}

#[test]
fn test_move_forward_until_wall() {
    let mut bot = robot("1x4\n>..#");

    bot.move_forward().unwrap();
    bot.move_forward().unwrap();
    assert_eq!(bot.cell(), (0, 2));
    assert!(!bot.can_move(Direction::Forward));
    assert_eq!(
        bot.move_forward(),
        Err(GridError::Blocked(Direction::Forward))
    );
    assert_eq!(bot.cell(), (0, 2), "Blocked move leaves the robot in place");
}

#[test]
fn test_grid_edge_blocks_movement() {
    let bot = robot("1x1\n>");
    for direction in [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ] {
        assert!(!bot.can_move(direction), "{direction:?} should be blocked");
    }
}

#[test]
fn test_relative_directions() {
    // Robot in the middle facing east; wall to its north (left).
    let bot = robot("3x3\n.#.\n.>.\n...");
    assert!(!bot.can_move(Direction::Left));
    assert!(bot.can_move(Direction::Right));
    assert!(bot.can_move(Direction::Forward));
    assert!(bot.can_move(Direction::Backward));
}

#[test]
fn test_rotation_cycles() {
    let mut bot = robot("1x1\n>");
    bot.rotate_right();
    assert_eq!(bot.heading(), Heading::South);
    bot.rotate_right();
    bot.rotate_right();
    bot.rotate_right();
    assert_eq!(bot.heading(), Heading::East);
    bot.rotate_left();
    assert_eq!(bot.heading(), Heading::North);
}

#[test]
fn test_walk_to_exit() {
    let mut bot = robot("2x3\nv..\n..X");
    bot.move_forward().unwrap();
    bot.rotate_left();
    assert_eq!(bot.heading(), Heading::East);
    bot.move_forward().unwrap();
    assert!(!bot.on_exit());
    bot.move_forward().unwrap();
    assert!(bot.on_exit());
    assert_eq!(bot.position(), Vec3::new(0.5, 0.0, 1.0));
}

#[test]
fn test_scene_forward_matches_heading() {
    let mut bot = robot("1x1\n>");
    assert!(bot.forward().abs_diff_eq(Vec3::Z, 1e-5));
    bot.rotate_right();
    assert!(bot.forward().abs_diff_eq(Vec3::X, 1e-5));
    bot.rotate_right();
    assert!(bot.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
}

#[test]
fn test_new_rejects_walls_and_out_of_bounds() {
    let grid = parse_str("1x2\n.#").unwrap();
    let config = GridConfig::default();
    assert!(matches!(
        GridRobot::new(grid.clone(), &config, (0, 1), Heading::East),
        Err(GridError::InvalidArgument(_))
    ));
    assert!(matches!(
        GridRobot::new(grid.clone(), &config, (3, 0), Heading::East),
        Err(GridError::InvalidArgument(_))
    ));
    assert!(GridRobot::new(grid, &config, (0, 0), Heading::West).is_ok());
}
